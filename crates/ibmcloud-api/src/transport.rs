//! Transport seam between the dispatcher and the network.
//!
//! The dispatcher only needs `query` and the two-field [`TransportResponse`];
//! [`HttpTransport`] is the reqwest implementation used outside tests.

use crate::errors::{HttpError, Result};
use ibmcloud_utils::truncate_for_log;
use log::{debug, error, trace};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use std::fmt;
use std::future::Future;

pub const RESOURCE_CONTROLLER_URL: &str = "https://resource-controller.cloud.ibm.com";
pub const DEFAULT_REGION: &str = "us-south";

/// Remote API family a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// VPC infrastructure (instances, VPCs, subnets)
    Iaas,
    /// Resource Controller (resource groups, resource instances)
    ResourceController,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Iaas => "iaas",
            Service::ResourceController => "rg",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw result of one round trip: the parsed body, if any, and the status
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub data: Option<Value>,
    pub status_code: u16,
}

impl TransportResponse {
    pub fn new(status_code: u16, data: Option<Value>) -> Self {
        Self { data, status_code }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Trait for issuing a single HTTP request
///
/// Implementations must not retry: a returned `Err` means the request did
/// not complete, every HTTP status (including 4xx/5xx) is an `Ok`.
pub trait Transport: Send + Sync {
    fn query(
        &self,
        service: Service,
        method: Method,
        path: &str,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// Base URLs per service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub iaas: String,
    pub resource_controller: String,
}

impl Endpoints {
    pub fn for_region(region: &str) -> Self {
        Self {
            iaas: format!("https://{}.iaas.cloud.ibm.com", region),
            resource_controller: RESOURCE_CONTROLLER_URL.to_string(),
        }
    }

    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Iaas => &self.iaas,
            Service::ResourceController => &self.resource_controller,
        }
    }

    pub fn url(&self, service: Service, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url(service).trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::for_region(DEFAULT_REGION)
    }
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoints: Endpoints,
}

impl HttpTransport {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ibmcloud-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HttpError::Request)?;

        debug!("Creating HttpTransport");
        debug!("  iaas: {}", endpoints.iaas);
        debug!("  rg: {}", endpoints.resource_controller);

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl Transport for HttpTransport {
    async fn query(
        &self,
        service: Service,
        method: Method,
        path: &str,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> Result<TransportResponse> {
        let url = self.endpoints.url(service, path);

        debug!("HTTP {} request to: {}", method, url);
        trace!("Request header names: {:?}", headers.keys().collect::<Vec<_>>());

        let mut request = self.client.request(method.clone(), &url).headers(headers.clone());

        if let Some(body) = body {
            trace!("Request body: {}", truncate_for_log(&body.to_string()));
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("{} {} failed: {:?}", method, url, e);
            if e.is_connect() {
                HttpError::Connection(e.to_string())
            } else {
                HttpError::Request(e)
            }
        })?;

        let status_code = response.status().as_u16();
        debug!("Response status: {}", status_code);

        let text = response.text().await.map_err(|e| {
            error!("Failed to read response body from {}: {:?}", url, e);
            HttpError::Request(e)
        })?;

        let data = if text.trim().is_empty() {
            None
        } else {
            // Gateways occasionally answer with HTML; keep it as a string body.
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        };

        Ok(TransportResponse { data, status_code })
    }
}
