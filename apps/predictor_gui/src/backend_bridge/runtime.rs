//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{PredictorClient, Settings, SubmissionController};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_probe_failure, UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(run_worker(settings, cmd_rx, ui_tx));
    });
}

async fn run_worker(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let client = PredictorClient::new(&settings);
    let controller = Arc::new(SubmissionController::new(Arc::new(client.clone())));

    let mut snapshots = controller.subscribe();
    let snapshot_tx = ui_tx.clone();
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            let _ = snapshot_tx.try_send(UiEvent::Submission(snapshot));
        }
    });

    tracing::info!(api_base_url = %client.base_url(), "backend worker ready");
    let _ = ui_tx.try_send(UiEvent::Info(format!(
        "Using prediction service at {}",
        client.base_url()
    )));

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Submit { form } => {
                let controller = controller.clone();
                tokio::spawn(async move { controller.submit(&form).await });
            }
            BackendCommand::ProbeService => {
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = match client.service_info().await {
                        Ok(info) => UiEvent::ServiceReady(info),
                        Err(err) => {
                            tracing::warn!(error = %err, "service probe failed");
                            UiEvent::Error(UiError::from_message(
                                UiErrorContext::ServiceProbe,
                                classify_probe_failure(&err.to_string()),
                            ))
                        }
                    };
                    let _ = ui_tx.try_send(event);
                });
            }
        }
    }
    tracing::debug!("ui command channel closed; backend worker exiting");
}
