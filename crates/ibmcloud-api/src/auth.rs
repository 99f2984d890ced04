//! IAM authentication: turns credentials into request headers.

use crate::errors::{HttpError, Result};
use ibmcloud_utils::{mask_secret, truncate_for_log};
use log::{debug, error, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";
const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// How the client proves its identity
#[derive(Clone)]
pub enum Credentials {
    /// IAM API key, exchanged for a bearer token on connect
    ApiKey(String),
    /// Pre-issued IAM access token
    BearerToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(key) => write!(f, "ApiKey({})", mask_secret(key)),
            Credentials::BearerToken(token) => write!(f, "BearerToken({})", mask_secret(token)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchanges API keys for IAM bearer tokens
#[derive(Debug, Clone)]
pub struct IamAuthenticator {
    client: Client,
    iam_url: String,
}

impl IamAuthenticator {
    pub fn new(iam_url: Option<String>) -> Result<Self> {
        let client = Client::builder().build().map_err(HttpError::Request)?;
        Ok(Self::with_client(client, iam_url))
    }

    pub fn with_client(client: Client, iam_url: Option<String>) -> Self {
        let iam_url = iam_url.unwrap_or_else(|| DEFAULT_IAM_URL.to_string());
        debug!("Creating IamAuthenticator for {}", iam_url);
        Self { client, iam_url }
    }

    /// Request an access token for an API key
    pub async fn request_token(&self, api_key: &str) -> Result<String> {
        debug!("Requesting IAM token with API key {}", mask_secret(api_key));

        let response = self
            .client
            .post(&self.iam_url)
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", APIKEY_GRANT_TYPE), ("apikey", api_key)])
            .send()
            .await
            .map_err(|e| {
                error!("IAM token request failed: {:?}", e);
                HttpError::Request(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(HttpError::Request)?;

        if !status.is_success() {
            error!("IAM token request rejected with status {}", status);
            debug!("IAM error body: {}", truncate_for_log(&text));
            return Err(HttpError::AuthenticationFailed(format!(
                "IAM returned status {}",
                status.as_u16()
            ))
            .into());
        }

        let token: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            HttpError::AuthenticationFailed(format!("unexpected IAM response: {}", e))
        })?;

        info!(
            "Obtained IAM token (expires in {}s)",
            token.expires_in.unwrap_or_default()
        );

        Ok(token.access_token)
    }

    /// Build the headers every API request carries
    pub async fn headers(&self, credentials: &Credentials) -> Result<HeaderMap> {
        let token = match credentials {
            Credentials::ApiKey(api_key) => self.request_token(api_key).await?,
            Credentials::BearerToken(token) => token.clone(),
        };
        bearer_headers(&token)
    }
}

/// `Authorization: Bearer <token>` plus JSON content negotiation
pub fn bearer_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
    authorization.set_sensitive(true);

    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}
