use crate::auth::{Credentials, IamAuthenticator};
use crate::context::{Context, DEFAULT_GENERATION, DEFAULT_VERSION};
use crate::dispatcher::Dispatcher;
use crate::errors::{ApiError, Result};
use crate::resources::{Instances, ResourceGroups, ResourceInstances, Subnets, Vpcs};
use crate::transport::{Endpoints, HttpTransport, Transport, DEFAULT_REGION};
use ibmcloud_core::AmbiguityPolicy;
use ibmcloud_utils::mask_secret;
use log::{debug, error};

pub const API_KEY_ENV: &str = "IBMCLOUD_API_KEY";
pub const REGION_ENV: &str = "IBMCLOUD_REGION";

/// Trait for providing configuration to the API client
/// This allows the CLI to implement config without circular dependencies
pub trait ApiConfig {
    type Error;

    /// Get the IAM API key used for authentication
    fn get_api_key(&self) -> std::result::Result<String, Self::Error>;

    /// Connection settings (region, versioning, endpoint overrides)
    fn get_settings(&self) -> std::result::Result<ClientSettings, Self::Error> {
        Ok(ClientSettings::default())
    }
}

/// Everything except credentials needed to open a client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub region: String,
    pub version: String,
    pub generation: String,
    pub iam_url: Option<String>,
    pub iaas_endpoint: Option<String>,
    pub controller_endpoint: Option<String>,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            version: DEFAULT_VERSION.to_string(),
            generation: DEFAULT_GENERATION.to_string(),
            iam_url: None,
            iaas_endpoint: None,
            controller_endpoint: None,
            ambiguity: AmbiguityPolicy::default(),
        }
    }
}

impl ClientSettings {
    /// Service endpoints for the configured region, with overrides applied
    pub fn endpoints(&self) -> Endpoints {
        let mut endpoints = Endpoints::for_region(&self.region);
        if let Some(iaas) = &self.iaas_endpoint {
            endpoints.iaas = iaas.clone();
        }
        if let Some(controller) = &self.controller_endpoint {
            endpoints.resource_controller = controller.clone();
        }
        endpoints
    }
}

/// Client for the IBM Cloud VPC and Resource Controller APIs
///
/// Owns a transport and a [`Context`]; resource collections borrow both.
#[derive(Debug, Clone)]
pub struct IbmCloudClient<T = HttpTransport> {
    transport: T,
    context: Context,
}

impl IbmCloudClient<HttpTransport> {
    /// Authenticate and open a client over HTTP
    pub async fn connect(credentials: Credentials, settings: ClientSettings) -> Result<Self> {
        debug!("Creating IbmCloudClient");
        debug!("  Credentials: {:?}", credentials);
        debug!("  Region: {}", settings.region);

        let authenticator = IamAuthenticator::new(settings.iam_url.clone())?;
        let headers = authenticator.headers(&credentials).await?;

        let context = Context::new(settings.version.clone(), settings.generation.clone(), headers)
            .with_ambiguity(settings.ambiguity);
        let transport = HttpTransport::new(settings.endpoints())?;

        Ok(Self::new(transport, context))
    }

    /// Create a client from `IBMCLOUD_API_KEY` and optionally `IBMCLOUD_REGION`
    pub async fn from_env() -> Result<Self> {
        debug!("Creating IbmCloudClient from environment variables");
        let api_key = api_key_from(std::env::var(API_KEY_ENV))?;

        let mut settings = ClientSettings::default();
        if let Ok(region) = std::env::var(REGION_ENV) {
            debug!("Using region {} from environment", region);
            settings.region = region;
        }

        Self::connect(Credentials::ApiKey(api_key), settings).await
    }

    /// Create a client from any [`ApiConfig`] implementation
    pub async fn from_config<C>(config: &C) -> std::result::Result<Self, C::Error>
    where
        C: ApiConfig,
        C::Error: From<ApiError>,
    {
        debug!("Creating IbmCloudClient from config");
        let api_key = config.get_api_key()?;
        debug!("Got API key from config: {}", mask_secret(&api_key));

        let settings = config.get_settings()?;
        Ok(Self::connect(Credentials::ApiKey(api_key), settings).await?)
    }
}

impl<T: Transport> IbmCloudClient<T> {
    pub fn new(transport: T, context: Context) -> Self {
        Self { transport, context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn dispatcher(&self) -> Dispatcher<'_, T> {
        Dispatcher::new(&self.transport, &self.context)
    }

    pub fn instances(&self) -> Instances<'_, T> {
        Instances::new(self.dispatcher())
    }

    pub fn vpcs(&self) -> Vpcs<'_, T> {
        Vpcs::new(self.dispatcher())
    }

    pub fn subnets(&self) -> Subnets<'_, T> {
        Subnets::new(self.dispatcher())
    }

    pub fn resource_groups(&self) -> ResourceGroups<'_, T> {
        ResourceGroups::new(self.dispatcher())
    }

    pub fn resource_instances(&self) -> ResourceInstances<'_, T> {
        ResourceInstances::new(self.dispatcher())
    }
}

/// A missing or non-UTF-8 API key is a configuration failure, never a transport one
fn api_key_from(value: std::result::Result<String, std::env::VarError>) -> Result<String> {
    value.map_err(|_| {
        error!("{} environment variable not set", API_KEY_ENV);
        ApiError::Config(format!("{} environment variable not set", API_KEY_ENV))
    })
}
