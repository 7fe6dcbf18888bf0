use shared::error::FALLBACK_ERROR_MESSAGE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("prediction service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service returned status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("malformed prediction service response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PredictError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    /// Message supplied by the service in its error body, if any.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            PredictError::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Text shown to the user for a failed prediction.
    pub fn user_message(&self) -> String {
        self.service_message()
            .unwrap_or(FALLBACK_ERROR_MESSAGE)
            .to_string()
    }
}
