//! Process-wide failure channel.
//!
//! Any component may push a failure in; at most one is active at a time,
//! and a new report replaces the current one (no queue). The surface is an
//! injected service, not global state: construct one and hand clones to
//! whoever needs to report.

use tokio::sync::watch;

use encit_core::EncItError;

/// The failure currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfacedError {
    /// Text to display: a transport response body verbatim, or the
    /// error's rendering otherwise.
    pub message: String,
}

/// Single-slot error channel with subscriber notification.
#[derive(Debug, Clone)]
pub struct ErrorSurface {
    tx: watch::Sender<Option<SurfacedError>>,
}

impl ErrorSurface {
    /// Surface with no active error.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Show a failure, replacing any active one.
    pub fn report(&self, error: &EncItError) {
        tracing::warn!(%error, "surfacing error");
        self.tx.send_replace(Some(SurfacedError { message: error.surface_message() }));
    }

    /// Clear the active error. Idempotent when none is active.
    pub fn dismiss(&self) {
        self.tx.send_replace(None);
    }

    /// The currently active error, if any.
    pub fn current(&self) -> Option<SurfacedError> {
        self.tx.borrow().clone()
    }

    /// Watch for changes to the active error.
    pub fn subscribe(&self) -> watch::Receiver<Option<SurfacedError>> {
        self.tx.subscribe()
    }
}

impl Default for ErrorSurface {
    fn default() -> Self {
        Self::new()
    }
}
