// --- File: crates/bluepay_common/src/error.rs ---
use thiserror::Error;

/// The base error type shared across the gateway bridge crates.
///
/// Feature crates define their own error enums and convert into this one via
/// `From<SpecificError> for GatewayError`.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for GatewayError {
    fn status_code(&self) -> u16 {
        match self {
            GatewayError::HttpError(_) => 500,
            GatewayError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::HttpError(err.to_string())
    }
}
