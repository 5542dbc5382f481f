//! Shared workflow types.
//!
//! Both flows are pure state machines in the same shape: events in,
//! actions out, `Result` for precondition failures. Backend calls appear
//! as actions carrying a monotonic sequence number; a completion older
//! than the latest dispatched request is dropped, so a superseded call can
//! never overwrite newer state.

use encit_core::codec::NamedBlob;

/// Observable phase of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    /// Required inputs are missing.
    Idle,
    /// All required inputs are present; a submit would dispatch.
    Ready,
    /// A request is in flight.
    Submitting,
    /// A decrypt result is held for display.
    Result,
}

/// Actions the embedding UI executes on the flow's behalf.
///
/// Presentation (save dialogs, clipboard access, toasts) is outside this
/// crate; these are the complete instructions it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Offer the blob for save-to-disk under its suggested name.
    SaveBlob(NamedBlob),
    /// Place the text on the clipboard.
    CopyToClipboard(String),
    /// Show a short transient notification.
    Notify(String),
}
