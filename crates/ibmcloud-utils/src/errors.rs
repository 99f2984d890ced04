use thiserror::Error;

/// Errors raised by the utility helpers
#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

pub type Result<T> = std::result::Result<T, UtilsError>;
