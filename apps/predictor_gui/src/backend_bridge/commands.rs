//! Backend commands queued from UI to backend worker.

use client_core::FormState;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Run one submission against a snapshot of the form.
    Submit { form: FormState },
    /// Fetch the service banner for the status line.
    ProbeService,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit { .. } => "submit",
            BackendCommand::ProbeService => "probe_service",
        }
    }
}
