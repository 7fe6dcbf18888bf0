//! View state folded from backend events.

use client_core::{FormState, SubmissionSnapshot, SubmissionState};
use shared::protocol::{PredictionResult, ServiceInfo};

use crate::controller::events::{err_label, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

/// What the area under the form shows. At most one of these is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmissionPanel<'a> {
    Empty,
    Loading,
    Failed(&'a str),
    Succeeded(&'a PredictionResult),
}

#[derive(Debug)]
pub struct ViewState {
    pub status: String,
    pub status_banner: Option<StatusBanner>,
    pub service: Option<ServiceInfo>,
    pub submission: SubmissionSnapshot,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            status: "Connecting to prediction service".to_string(),
            status_banner: None,
            service: None,
            submission: SubmissionSnapshot::default(),
        }
    }
}

impl ViewState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::ServiceReady(info) => {
                self.status = format!("Connected: {}", info.message);
                self.service = Some(info);
            }
            UiEvent::Submission(snapshot) => {
                self.submission = snapshot;
            }
            UiEvent::Error(err) => {
                self.status = match err.context() {
                    UiErrorContext::BackendStartup => {
                        format!("Backend worker failed to start: {}", err.message())
                    }
                    UiErrorContext::ServiceProbe => {
                        format!("{} error: {}", err_label(err.category()), err.message())
                    }
                };
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Error,
                    message: err.message().to_string(),
                });
            }
        }
    }

    /// Disables the submit button until the worker reports back.
    pub fn mark_submit_pending(&mut self) {
        self.submission.loading = true;
    }

    pub fn can_submit(&self, form: &FormState) -> bool {
        !self.submission.loading && form.is_complete()
    }

    pub fn submission_panel(&self) -> SubmissionPanel<'_> {
        if self.submission.loading {
            return SubmissionPanel::Loading;
        }
        match &self.submission.state {
            SubmissionState::Idle => SubmissionPanel::Empty,
            SubmissionState::Loading => SubmissionPanel::Loading,
            SubmissionState::Failed(message) => SubmissionPanel::Failed(message),
            SubmissionState::Succeeded(result) => SubmissionPanel::Succeeded(result),
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.status_banner = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use shared::domain::NumericField;

    use super::*;
    use crate::controller::events::UiError;

    fn snapshot(state: SubmissionState, loading: bool, submissions: u64) -> SubmissionSnapshot {
        SubmissionSnapshot {
            state,
            loading,
            submissions,
        }
    }

    #[test]
    fn starts_with_empty_panel() {
        let view = ViewState::default();
        assert_eq!(view.submission_panel(), SubmissionPanel::Empty);
        assert!(view.status_banner.is_none());
    }

    #[test]
    fn loading_snapshot_shows_spinner_and_blocks_submit() {
        let mut view = ViewState::default();
        view.apply(UiEvent::Submission(snapshot(SubmissionState::Loading, true, 1)));

        assert_eq!(view.submission_panel(), SubmissionPanel::Loading);
        assert!(!view.can_submit(&FormState::sample()));
    }

    #[test]
    fn outcome_stored_before_loading_clears_still_shows_spinner() {
        let mut view = ViewState::default();
        let result = PredictionResult::new("$452,600.00");
        view.apply(UiEvent::Submission(snapshot(
            SubmissionState::Succeeded(result.clone()),
            true,
            1,
        )));
        assert_eq!(view.submission_panel(), SubmissionPanel::Loading);

        view.apply(UiEvent::Submission(snapshot(
            SubmissionState::Succeeded(result.clone()),
            false,
            1,
        )));
        assert_eq!(view.submission_panel(), SubmissionPanel::Succeeded(&result));
        assert!(view.can_submit(&FormState::sample()));
    }

    #[test]
    fn failure_shows_message_verbatim() {
        let mut view = ViewState::default();
        view.apply(UiEvent::Submission(snapshot(
            SubmissionState::Failed("model unavailable".into()),
            false,
            1,
        )));
        assert_eq!(
            view.submission_panel(),
            SubmissionPanel::Failed("model unavailable")
        );
        assert!(view.status_banner.is_none());
    }

    #[test]
    fn incomplete_form_cannot_be_submitted() {
        let view = ViewState::default();
        let mut form = FormState::sample();
        form.set_numeric(NumericField::Households, "  ");

        assert!(!view.can_submit(&form));
        assert!(!view.can_submit(&FormState::default()));
    }

    #[test]
    fn pending_mark_is_replaced_by_worker_snapshot() {
        let mut view = ViewState::default();
        view.mark_submit_pending();
        assert!(!view.can_submit(&FormState::sample()));

        view.apply(UiEvent::Submission(snapshot(
            SubmissionState::Failed("boom".into()),
            false,
            1,
        )));
        assert!(view.can_submit(&FormState::sample()));
    }

    #[test]
    fn service_ready_updates_status_line() {
        let mut view = ViewState::default();
        view.apply(UiEvent::ServiceReady(ServiceInfo {
            message: "House Price Prediction API".into(),
            endpoints: BTreeMap::new(),
        }));
        assert_eq!(view.status, "Connected: House Price Prediction API");
        assert!(view.service.is_some());
    }

    #[test]
    fn errors_raise_a_dismissible_banner() {
        let mut view = ViewState::default();
        view.apply(UiEvent::Error(UiError::from_message(
            UiErrorContext::ServiceProbe,
            "Prediction service unreachable; check the API URL and that the service is running.",
        )));

        assert!(view.status.starts_with("Transport error:"));
        let banner = view.status_banner.clone().expect("banner");
        assert_eq!(banner.severity, StatusBannerSeverity::Error);

        view.dismiss_banner();
        assert!(view.status_banner.is_none());
    }

    #[test]
    fn startup_failure_gets_its_own_status() {
        let mut view = ViewState::default();
        view.apply(UiEvent::Error(UiError::from_message(
            UiErrorContext::BackendStartup,
            "failed to build runtime",
        )));
        assert_eq!(
            view.status,
            "Backend worker failed to start: failed to build runtime"
        );
    }
}
