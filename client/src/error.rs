//! Error types for contacts-client

use std::collections::BTreeMap;

use thiserror::Error;

/// contacts-client error type
#[derive(Error, Debug)]
pub enum ClientError {
    /// 422 from the API
    #[error("{message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },

    /// 404 from the API
    #[error("{0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("Request failed: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Connection error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;
