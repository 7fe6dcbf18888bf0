//! UI/backend events and error modeling for the predictor window.

use client_core::SubmissionSnapshot;
use shared::protocol::ServiceInfo;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    ServiceReady(ServiceInfo),
    Submission(SubmissionSnapshot),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    ServiceProbe,
}

pub fn classify_probe_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("unreachable")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Prediction service unreachable; check the API URL and that the service is running."
            .to_string()
    } else {
        format!("Prediction service error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("unreachable")
            || message_lower.contains("connection")
            || message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("network")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("service")
            || message_lower.contains("status")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Service
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Service => "Service",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_probe_gets_actionable_message() {
        let message = classify_probe_failure(
            "prediction service unreachable: error sending request for url (http://localhost:5000/)",
        );
        assert!(message.starts_with("Prediction service unreachable"));

        let err = UiError::from_message(UiErrorContext::ServiceProbe, message);
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::ServiceProbe);
    }

    #[test]
    fn other_probe_failures_keep_the_error_text() {
        let message = classify_probe_failure("prediction service returned status 404");
        assert_eq!(
            message,
            "Prediction service error: prediction service returned status 404"
        );
        assert_eq!(
            UiError::from_message(UiErrorContext::ServiceProbe, message).category(),
            UiErrorCategory::Service
        );
    }

    #[test]
    fn classifies_command_queue_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err_label(err.category()), "Transport");
    }

    #[test]
    fn invalid_settings_are_validation_errors() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "invalid prediction service url 'ftp://x': unsupported scheme 'ftp'",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }
}
