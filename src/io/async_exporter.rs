//! Asynchronous export requests.
//!
//! The HTTP round trip runs on a background thread so the window keeps
//! repainting, and the busy export button stays visible while it runs.

use eframe::egui;
use cryptodash::{ExportError, ExportTransport, PendingExport};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

type ExportResult = Result<Vec<u8>, ExportError>;

/// An export whose payload is still on its way
struct InFlight {
    pending: PendingExport,
    receiver: Receiver<ExportResult>,
}

/// Runs at most one export request at a time off the GUI thread.
///
/// The [`PendingExport`] never leaves the GUI thread; only a copy of its
/// request is handed to the worker.
pub struct AsyncExporter {
    /// The transport, or why none could be built
    transport: Result<Arc<dyn ExportTransport>, String>,
    in_flight: Option<InFlight>,
}

impl AsyncExporter {
    pub fn new(transport: Arc<dyn ExportTransport>) -> Self {
        Self {
            transport: Ok(transport),
            in_flight: None,
        }
    }

    /// An exporter whose every request fails with `reason`
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            transport: Err(reason.into()),
            in_flight: None,
        }
    }

    /// Checks if an export request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts sending `pending` in the background.
    ///
    /// Gives the export back when another one is still in flight.
    /// Call `check_completion()` once per frame to collect the result.
    pub fn start(&mut self, pending: PendingExport, ctx: &egui::Context) -> Result<(), PendingExport> {
        if self.is_busy() {
            return Err(pending);
        }

        let (sender, receiver) = channel();
        match &self.transport {
            Ok(transport) => {
                let transport = Arc::clone(transport);
                let request = pending.request.clone();
                let ctx_handle = ctx.clone();

                debug!(format = request.format.extension(), "starting export worker");
                thread::spawn(move || {
                    let result = transport.request_export(&request);
                    let _ = sender.send(result);
                    // Notify GUI thread to repaint
                    ctx_handle.request_repaint();
                });
            }
            Err(reason) => {
                let _ = sender.send(Err(ExportError::Transport(reason.clone())));
            }
        }

        self.in_flight = Some(InFlight { pending, receiver });
        Ok(())
    }

    /// Returns the finished export and its payload, if the worker is done.
    ///
    /// A worker that died without answering yields `ExportError::Disconnected`.
    pub fn check_completion(&mut self) -> Option<(PendingExport, ExportResult)> {
        let result = match self.in_flight.as_ref()?.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                warn!("export worker exited without a result");
                Err(ExportError::Disconnected)
            }
        };

        let in_flight = self.in_flight.take()?;
        Some((in_flight.pending, result))
    }
}
