// --- File: crates/bluepay_gateway/src/error.rs ---
use bluepay_common::{GatewayError, HttpStatusCode};
use thiserror::Error;

/// BluePay-specific error types.
///
/// Gateway declines are NOT errors — they come back as ordinary
/// `GatewayResponse` values with a non-success status. Only faults that
/// prevent a request from being expressed at all surface here.
#[derive(Error, Debug)]
pub enum BluePayError {
    /// Failed to encode the form body
    #[error("Failed to encode request body: {0}")]
    EncodingError(String),
}

/// Convert BluePayError to GatewayError
impl From<BluePayError> for GatewayError {
    fn from(err: BluePayError) -> Self {
        match err {
            BluePayError::EncodingError(msg) => {
                GatewayError::InternalError(format!("BluePay body encoding error: {}", msg))
            }
        }
    }
}

impl HttpStatusCode for BluePayError {
    fn status_code(&self) -> u16 {
        match self {
            BluePayError::EncodingError(_) => 500,
        }
    }
}
