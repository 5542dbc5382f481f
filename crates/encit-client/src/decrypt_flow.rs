//! Decrypt workflow state machine.
//!
//! `Idle` -> `Ready` (a ciphertext message or an uploaded ciphertext file;
//! identity is optional) -> `Submitting` -> `Result` holding an
//! [`EncItMessage`] for display and download. An explicit reset clears the
//! held result and inputs back to `Idle` in one step.

use encit_core::codec::{self, FileUpload, TextFile};
use encit_core::EncItError;
use encit_proto::{DecryptRequest, EncItMessage, MessageType};

use crate::flow::{FlowPhase, UiAction};

/// Events fed into the decrypt flow.
#[derive(Debug, Clone)]
pub enum DecryptEvent {
    /// Identity selection changed. `None` lets the backend try every
    /// identity the caller owns.
    SelectIdentity(Option<String>),
    /// Ciphertext text edited.
    SetMessage(String),
    /// The user picked ciphertext files in the upload control.
    FilesSelected(Vec<FileUpload>),
    /// Explicit submit.
    Submit,
    /// A dispatched decrypt call resolved.
    Completed {
        /// Sequence number the call was dispatched with.
        seq: u64,
        /// The backend's answer.
        result: Result<EncItMessage, EncItError>,
    },
    /// Save the held result's payload to disk.
    Download,
    /// Clear the held result and every input back to `Idle`.
    Reset,
}

/// Actions produced by the decrypt flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptAction {
    /// Perform the decrypt call and feed [`DecryptEvent::Completed`] back
    /// with the same sequence number.
    Decrypt {
        /// Sequence number for completion matching.
        seq: u64,
        /// The request body to send.
        request: DecryptRequest,
    },
    /// Hand off to the embedding UI.
    Ui(UiAction),
}

/// Decrypt workflow state machine. Pure: the caller executes returned
/// actions and feeds completions back.
#[derive(Debug, Clone, Default)]
pub struct DecryptFlow {
    identity: Option<String>,
    message: String,
    file: Option<TextFile>,
    result: Option<EncItMessage>,
    in_flight: Option<u64>,
    next_seq: u64,
}

impl DecryptFlow {
    /// Fresh flow with no inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> FlowPhase {
        if self.in_flight.is_some() {
            FlowPhase::Submitting
        } else if self.result.is_some() {
            FlowPhase::Result
        } else if self.file.is_some() || !self.message.is_empty() {
            FlowPhase::Ready
        } else {
            FlowPhase::Idle
        }
    }

    /// The held decrypt result, if any.
    pub fn result(&self) -> Option<&EncItMessage> {
        self.result.as_ref()
    }

    /// Name of the pending ciphertext upload, if any.
    pub fn pending_file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    /// The held result's payload decoded for display.
    ///
    /// Plaintext payloads decode to UTF-8 text; file payloads have no
    /// display form and yield `None`, as does the absence of a result.
    pub fn display_text(&self) -> Result<Option<String>, EncItError> {
        let Some(result) = &self.result else { return Ok(None) };
        if result.message_type != MessageType::Plaintext {
            return Ok(None);
        }
        let bytes = codec::decode_text_to_bytes(&result.payload)?;
        Ok(Some(String::from_utf8(bytes)?))
    }

    /// Process an event and return resulting actions.
    ///
    /// # Errors
    ///
    /// Returns `EncItError` when a precondition fails or a dispatched call
    /// came back with a failure; inputs are kept so the action can be
    /// retried.
    pub fn handle(&mut self, event: DecryptEvent) -> Result<Vec<DecryptAction>, EncItError> {
        match event {
            DecryptEvent::SelectIdentity(identity) => {
                self.identity = identity;
                Ok(vec![])
            },
            DecryptEvent::SetMessage(message) => {
                self.message = message;
                Ok(vec![])
            },
            DecryptEvent::FilesSelected(files) => {
                if let Some(text_file) = codec::read_text_selection(&files)? {
                    self.file = Some(text_file);
                }
                Ok(vec![])
            },
            DecryptEvent::Submit => self.handle_submit(),
            DecryptEvent::Completed { seq, result } => self.handle_completed(seq, result),
            DecryptEvent::Download => Ok(self.handle_download()?.into_iter().collect()),
            DecryptEvent::Reset => {
                // One atomic clear: no residual state from the previous
                // decrypt may leak into a subsequent submit.
                self.result = None;
                self.message.clear();
                self.file = None;
                self.in_flight = None;
                Ok(vec![])
            },
        }
    }

    fn handle_submit(&mut self) -> Result<Vec<DecryptAction>, EncItError> {
        if self.file.is_some() && !self.message.is_empty() {
            return Err(EncItError::Validation {
                reason: "both a file and a message are pending; submit one or the other".to_string(),
            });
        }

        let cipher_text = match &self.file {
            Some(file) => file.text.clone(),
            None if self.message.is_empty() => return Err(EncItError::missing("message or file")),
            None => self.message.clone(),
        };

        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight = Some(seq);

        let request = DecryptRequest { identity: self.identity.clone(), message: cipher_text };
        Ok(vec![DecryptAction::Decrypt { seq, request }])
    }

    fn handle_completed(
        &mut self,
        seq: u64,
        result: Result<EncItMessage, EncItError>,
    ) -> Result<Vec<DecryptAction>, EncItError> {
        // Only the latest dispatched request may settle the flow.
        if self.in_flight != Some(seq) {
            return Ok(vec![]);
        }
        self.in_flight = None;

        // Replaces any previously held result.
        self.result = Some(result?);
        Ok(vec![])
    }

    fn handle_download(&self) -> Result<Option<DecryptAction>, EncItError> {
        let Some(result) = &self.result else { return Ok(None) };
        let bytes = codec::decode_text_to_bytes(&result.payload)?;
        let blob = codec::package_for_download(bytes, result.download_name());
        Ok(Some(DecryptAction::Ui(UiAction::SaveBlob(blob))))
    }
}
