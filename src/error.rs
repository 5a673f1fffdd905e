//! Error types for the YandexGPT client.
//!
//! Failures fall into two families: authentication (credential and IAM token
//! acquisition) and API (everything that happens once a token is in hand),
//! plus the orchestrator-level timeout and cancellation outcomes of the
//! asynchronous image poll loop. API errors always carry an HTTP-status-like
//! numeric code; the code is 0 when no HTTP exchange took place.

use std::time::Duration;
use thiserror::Error;

/// Boxed source error attached to [`YandexGptError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the YandexGPT client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum YandexGptError {
    /// Credential or IAM token acquisition failure: empty credential,
    /// token endpoint failure, malformed token response.
    #[error("authentication error: {message}")]
    Authentication {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// API failure: invalid model name, transport failure, non-2xx response,
    /// malformed body, or a server-reported operation error.
    #[error("API error (code {code}): {message}")]
    Api {
        /// HTTP-status-like code; 0 when no HTTP exchange occurred.
        code: u16,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The image generation operation did not complete within the poll
    /// ceiling. The server-side job may still finish later; its status
    /// remains queryable via `get_operation`.
    #[error("operation timed out after {waited:?}")]
    Timeout { waited: Duration },

    /// The caller abandoned the poll loop through a
    /// [`CancelHandle`](crate::utils::cancel::CancelHandle).
    #[error("operation cancelled")]
    Cancelled,
}

impl YandexGptError {
    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            source: None,
        }
    }

    /// Create an authentication error wrapping an underlying cause.
    pub fn authentication_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Authentication {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an API error with an HTTP-status-like code.
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an API error wrapping an underlying cause.
    pub fn api_with(code: u16, message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// HTTP-status-like code of an API error, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this is an authentication failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

/// Result type for YandexGPT client operations.
pub type Result<T> = std::result::Result<T, YandexGptError>;
