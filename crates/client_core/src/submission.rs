//! Submission Controller: turns the form into a prediction request and
//! tracks the request lifecycle.

use std::sync::Arc;

use shared::protocol::PredictionResult;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{coercion::build_request, form::FormState, PredictionApi};

/// Outcome of the latest submission. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Succeeded(PredictionResult),
    Failed(String),
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            SubmissionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Published view of the controller.
///
/// `loading` drives the spinner and submit affordance. It is set together with
/// `Loading` and cleared in a later update, after the outcome is stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionSnapshot {
    pub state: SubmissionState,
    pub loading: bool,
    pub submissions: u64,
}

pub struct SubmissionController {
    api: Arc<dyn PredictionApi>,
    state: watch::Sender<SubmissionSnapshot>,
}

impl SubmissionController {
    pub fn new(api: Arc<dyn PredictionApi>) -> Self {
        let (state, _) = watch::channel(SubmissionSnapshot::default());
        Self { api, state }
    }

    pub fn snapshot(&self) -> SubmissionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionSnapshot> {
        self.state.subscribe()
    }

    /// Runs one submission to completion. Failures end up in
    /// [`SubmissionState::Failed`]; nothing is returned to the caller.
    ///
    /// Concurrent submissions are not coalesced or cancelled: whichever
    /// response arrives last determines the final state.
    pub async fn submit(&self, form: &FormState) {
        let submission = self.begin();

        let request = build_request(form);
        if request.has_non_finite_values() {
            debug!(submission, "forwarding non-numeric input as null");
        }

        match self.api.predict(&request).await {
            Ok(result) => {
                info!(
                    submission,
                    price = %result.formatted_price,
                    "prediction succeeded"
                );
                self.state
                    .send_modify(|snapshot| snapshot.state = SubmissionState::Succeeded(result));
            }
            Err(err) => {
                let message = err.user_message();
                warn!(submission, error = %err, "prediction failed");
                self.state
                    .send_modify(|snapshot| snapshot.state = SubmissionState::Failed(message));
            }
        }

        self.state.send_modify(|snapshot| snapshot.loading = false);
    }

    fn begin(&self) -> u64 {
        let mut submission = 0;
        self.state.send_modify(|snapshot| {
            snapshot.submissions += 1;
            snapshot.state = SubmissionState::Loading;
            snapshot.loading = true;
            submission = snapshot.submissions;
        });
        info!(submission, "prediction submitted");
        submission
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
