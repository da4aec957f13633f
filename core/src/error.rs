//! Error types for the inventory API client.
//!
//! # Design
//! Variants follow what a screen needs to tell the user: the request never
//! completed (`Network`), the backend failed (`Server`), the product is gone
//! (`NotFound`), or the payload was rejected (`Validation`). The backend's
//! own message travels with each variant so it can be surfaced verbatim.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by `InventoryClient` parse methods and transports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never reached the server or no response came back.
    #[error("network error: {0}")]
    Network(String),

    /// The server returned a 5xx status.
    #[error("server error (HTTP {status}){}", suffix(.message))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// The server returned 404: the requested product does not exist.
    #[error("product not found{}", suffix(.message))]
    NotFound { message: Option<String> },

    /// The server rejected the payload (400 or 422).
    #[error("validation failed{}", suffix(.message))]
    Validation {
        message: Option<String>,
        details: Vec<String>,
    },

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

fn suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

impl ApiError {
    /// Human-readable text supplied by the server, if any.
    ///
    /// For validation failures without a top-level message the field-level
    /// details are joined instead.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::Server { message, .. } | ApiError::NotFound { message } => message.clone(),
            ApiError::Validation { message: Some(m), .. } => Some(m.clone()),
            ApiError::Validation { message: None, details } if !details.is_empty() => {
                Some(details.join("; "))
            }
            _ => None,
        }
    }

    /// The single string a screen shows for this error.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Classify a non-2xx response.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let parsed = ErrorBody::parse(body);
        match status {
            404 => ApiError::NotFound {
                message: parsed.error_message,
            },
            400 | 422 => ApiError::Validation {
                message: parsed.error_message,
                details: parsed.details,
            },
            500..=599 => ApiError::Server {
                status,
                message: parsed.error_message,
            },
            _ => ApiError::UnexpectedStatus {
                status,
                body: body.to_string(),
            },
        }
    }
}

/// Error payload shape: `{"errorMessage": "...", "details": ["..."]}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(alias = "message")]
    error_message: Option<String>,
    #[serde(default)]
    details: Vec<String>,
}

impl ErrorBody {
    /// Bodies that are not the JSON error shape contribute no message.
    fn parse(body: &str) -> Self {
        let mut parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        parsed.error_message = parsed.error_message.filter(|m| !m.trim().is_empty());
        parsed
    }
}
