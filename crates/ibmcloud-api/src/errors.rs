use ibmcloud_core::CloudError;
use thiserror::Error;

/// API-specific errors for ibmcloud-api
///
/// `Http` is a transport failure; `Cloud` carries structured outcomes such as
/// `not_found`, remote error codes and local validation failures.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("{0}")]
    Cloud(#[from] CloudError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Machine-readable code for structured outcomes, `None` for transport
    /// and configuration failures
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Cloud(err) => Some(err.code()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Cloud(err) if err.is_not_found())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Http(_))
    }
}

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
