//! Error types for the HubSpot MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the HubSpot API or validating tool input.
#[derive(Error, Debug)]
pub enum CrmApiError {
    /// No access token configured; raised before any request is sent
    #[error("Missing HubSpot access token (set HUBSPOT_ACCESS_TOKEN)")]
    MissingCredential,

    /// Required input absent or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

impl CrmApiError {
    /// Stable machine-readable name reported in tool envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            CrmApiError::MissingCredential => "missing_credential",
            CrmApiError::InvalidInput(_) => "invalid_input",
            CrmApiError::NotFound(_) => "not_found",
            _ => "remote_failure",
        }
    }
}

impl From<ValidationError> for CrmApiError {
    fn from(err: ValidationError) -> Self {
        CrmApiError::InvalidInput(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with CrmApiError
pub type CrmApiResult<T> = Result<T, CrmApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
