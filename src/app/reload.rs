use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::message::ReloadResult;
use crate::services::DashboardReport;

/// Rebuilds the report on a background thread, one request at a time.
pub struct Reloader {
    request_tx: Sender<()>,
    result_rx: Receiver<ReloadResult>,
}

impl Reloader {
    pub fn spawn<F>(load: F) -> Self
    where
        F: Fn() -> anyhow::Result<DashboardReport> + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<()>();
        let (result_tx, result_rx) = mpsc::channel::<ReloadResult>();

        thread::spawn(move || {
            while request_rx.recv().is_ok() {
                let msg = match load() {
                    Ok(report) => ReloadResult::Success(Box::new(report)),
                    Err(e) => {
                        tracing::warn!("reload failed: {e:#}");
                        ReloadResult::Error(format!("{e:#}"))
                    }
                };
                if result_tx.send(msg).is_err() {
                    break;
                }
            }
        });

        Self {
            request_tx,
            result_rx,
        }
    }

    pub fn request(&self) {
        let _ = self.request_tx.send(());
    }

    pub fn try_result(&self) -> Option<ReloadResult> {
        self.result_rx.try_recv().ok()
    }
}
