//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. Returns `false` and writes a status
/// line when the queue cannot take it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn queued_command_leaves_status_untouched() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut status = "Ready".to_string();

        assert!(dispatch_backend_command(
            &cmd_tx,
            BackendCommand::ProbeService,
            &mut status
        ));
        assert_eq!(status, "Ready");
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::ProbeService)));
    }

    #[test]
    fn full_queue_reports_retry() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut status = String::new();

        assert!(dispatch_backend_command(
            &cmd_tx,
            BackendCommand::ProbeService,
            &mut status
        ));
        assert!(!dispatch_backend_command(
            &cmd_tx,
            BackendCommand::ProbeService,
            &mut status
        ));
        assert_eq!(status, "UI command queue is full; please retry");
    }

    #[test]
    fn disconnected_worker_is_reported() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut status = String::new();

        assert!(!dispatch_backend_command(
            &cmd_tx,
            BackendCommand::Submit {
                form: client_core::FormState::sample(),
            },
            &mut status
        ));
        assert!(status.starts_with("Backend command processor disconnected"));
    }
}
