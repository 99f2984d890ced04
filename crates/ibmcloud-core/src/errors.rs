use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Machine-readable error codes
pub mod codes {
    pub const NOT_FOUND: &str = "not_found";
    pub const AMBIGUOUS: &str = "ambiguous";
    pub const MISSING_ARGUMENT: &str = "missing_argument";
    pub const INVALID_ARGUMENT: &str = "invalid_argument";
    pub const INVALID_RESPONSE: &str = "invalid_response";
}

/// Error reported by the remote API for a non-2xx response
///
/// `body` keeps the untouched response payload so callers can inspect
/// fields this client does not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteError {
    pub status: u16,
    pub code: String,
    pub message: Option<String>,
    pub more_info: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl RemoteError {
    pub fn new(status: u16, code: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: None,
            more_info: None,
            body: None,
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} [{}]", self.status, self.code)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

/// Domain errors - no I/O dependencies
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("{kind} not found: {reference}")]
    NotFound { kind: String, reference: String },

    #[error("{kind} name '{name}' is ambiguous: {count} resources share it")]
    Ambiguous {
        kind: String,
        name: String,
        count: usize,
    },

    #[error("Required argument(s) missing: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote error: {0}")]
    Remote(RemoteError),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CloudError {
    pub fn not_found(kind: impl Into<String>, reference: impl Into<String>) -> Self {
        CloudError::NotFound {
            kind: kind.into(),
            reference: reference.into(),
        }
    }

    /// Machine-readable code, e.g. `"not_found"`
    pub fn code(&self) -> &str {
        match self {
            CloudError::NotFound { .. } => codes::NOT_FOUND,
            CloudError::Ambiguous { .. } => codes::AMBIGUOUS,
            CloudError::MissingArguments(_) => codes::MISSING_ARGUMENT,
            CloudError::InvalidArgument(_) => codes::INVALID_ARGUMENT,
            CloudError::Remote(remote) => &remote.code,
            CloudError::InvalidResponse(_) | CloudError::Serde(_) => codes::INVALID_RESPONSE,
        }
    }

    /// True for both locally detected and remotely reported absence
    pub fn is_not_found(&self) -> bool {
        self.code() == codes::NOT_FOUND
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
