use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when a failed prediction carries no usable `error` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while predicting the price";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("'{0}' is not a valid ocean proximity; expected one of <1H OCEAN, INLAND, ISLAND, NEAR BAY, NEAR OCEAN")]
    InvalidOceanProximity(String),
}

/// Error body returned by the prediction service alongside a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Parses a raw response body, treating empty or non-JSON bodies as carrying no message.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn into_message(self) -> Option<String> {
        self.error.filter(|message| !message.is_empty())
    }
}
