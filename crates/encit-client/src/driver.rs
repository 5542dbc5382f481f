//! Async glue between a flow, a backend, and the error surface.
//!
//! The flows are pure; the drivers own the I/O. Dispatching an event runs
//! the flow, performs any backend call its actions request, feeds the
//! completion straight back, and routes every failure to the error
//! surface. UI actions (save blob, copy, notify) are returned for the
//! embedding caller to execute.

use crate::decrypt_flow::{DecryptAction, DecryptEvent, DecryptFlow};
use crate::encrypt_flow::{EncryptAction, EncryptEvent, EncryptFlow};
use crate::encryption::EncryptBackend;
use crate::error_surface::ErrorSurface;
use crate::flow::UiAction;

/// Drives an [`EncryptFlow`] against a backend.
pub struct EncryptDriver<B> {
    flow: EncryptFlow,
    backend: B,
    surface: ErrorSurface,
}

impl<B: EncryptBackend> EncryptDriver<B> {
    /// Driver over a fresh flow.
    pub fn new(backend: B, surface: ErrorSurface) -> Self {
        Self { flow: EncryptFlow::new(), backend, surface }
    }

    /// The underlying flow, for state inspection.
    pub fn flow(&self) -> &EncryptFlow {
        &self.flow
    }

    /// Feed an event through the flow, executing backend calls as they
    /// are requested. Failures land on the error surface; UI actions are
    /// returned to the caller.
    pub async fn dispatch(&mut self, event: EncryptEvent) -> Vec<UiAction> {
        let mut ui = Vec::new();
        let mut queue = vec![event];

        while let Some(event) = queue.pop() {
            match self.flow.handle(event) {
                Ok(actions) => {
                    for action in actions {
                        match action {
                            EncryptAction::Encrypt { seq, request } => {
                                let result = self.backend.encrypt(request).await;
                                queue.push(EncryptEvent::Completed { seq, result });
                            },
                            EncryptAction::Ui(action) => ui.push(action),
                        }
                    }
                },
                Err(error) => self.surface.report(&error),
            }
        }

        ui
    }
}

/// Drives a [`DecryptFlow`] against a backend.
pub struct DecryptDriver<B> {
    flow: DecryptFlow,
    backend: B,
    surface: ErrorSurface,
}

impl<B: EncryptBackend> DecryptDriver<B> {
    /// Driver over a fresh flow.
    pub fn new(backend: B, surface: ErrorSurface) -> Self {
        Self { flow: DecryptFlow::new(), backend, surface }
    }

    /// The underlying flow, for state and result inspection.
    pub fn flow(&self) -> &DecryptFlow {
        &self.flow
    }

    /// Feed an event through the flow, executing backend calls as they
    /// are requested. Failures land on the error surface; UI actions are
    /// returned to the caller.
    pub async fn dispatch(&mut self, event: DecryptEvent) -> Vec<UiAction> {
        let mut ui = Vec::new();
        let mut queue = vec![event];

        while let Some(event) = queue.pop() {
            match self.flow.handle(event) {
                Ok(actions) => {
                    for action in actions {
                        match action {
                            DecryptAction::Decrypt { seq, request } => {
                                let result = self.backend.decrypt(request).await;
                                queue.push(DecryptEvent::Completed { seq, result });
                            },
                            DecryptAction::Ui(action) => ui.push(action),
                        }
                    }
                },
                Err(error) => self.surface.report(&error),
            }
        }

        ui
    }
}

impl<B> std::fmt::Debug for EncryptDriver<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptDriver").field("flow", &self.flow).finish_non_exhaustive()
    }
}

impl<B> std::fmt::Debug for DecryptDriver<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptDriver").field("flow", &self.flow).finish_non_exhaustive()
    }
}
