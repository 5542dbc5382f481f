//! Encrypt workflow state machine.
//!
//! `Idle` (inputs missing) -> `Ready` (identity, friend, and a typed
//! message or an uploaded file) -> `Submitting` -> settled: success turns
//! into a clipboard copy or file download action, failure is returned for
//! the error surface and inputs stay intact so the user can retry.
//!
//! A file upload and a typed message are mutually exclusive at submit
//! time; a later file selection replaces a pending one; a successful file
//! encrypt clears the pending file so a repeat submit cannot resend a
//! stale payload.

use encit_core::codec::{self, EncodedFile, FileUpload};
use encit_core::EncItError;
use encit_proto::{EncryptRequest, MessageType};

use crate::flow::{FlowPhase, UiAction};

/// Where a successful plaintext encrypt should land.
///
/// File encrypts always download; there is nothing readable to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// Copy the encrypted text to the clipboard.
    Clipboard,
    /// Save the encrypted text as a `.enc` file.
    Download,
}

/// Events fed into the encrypt flow.
#[derive(Debug, Clone)]
pub enum EncryptEvent {
    /// Identity selection changed.
    SelectIdentity(Option<String>),
    /// Friend selection changed.
    SelectFriend(Option<String>),
    /// Subject line edited.
    SetSubject(String),
    /// Message text edited.
    SetMessage(String),
    /// The user picked files in the upload control.
    FilesSelected(Vec<FileUpload>),
    /// Explicit submit.
    Submit {
        /// Destination for a plaintext result.
        target: OutputTarget,
    },
    /// A dispatched encrypt call resolved.
    Completed {
        /// Sequence number the call was dispatched with.
        seq: u64,
        /// The backend's answer.
        result: Result<String, EncItError>,
    },
    /// Clear every input back to `Idle`.
    Clear,
}

/// Actions produced by the encrypt flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptAction {
    /// Perform the encrypt call and feed [`EncryptEvent::Completed`] back
    /// with the same sequence number.
    Encrypt {
        /// Sequence number for completion matching.
        seq: u64,
        /// The request body to send.
        request: EncryptRequest,
    },
    /// Hand off to the embedding UI.
    Ui(UiAction),
}

/// What a dispatched request will do with its result.
#[derive(Debug, Clone)]
enum Submission {
    File { file_name: String },
    Plaintext { target: OutputTarget, subject: String },
}

#[derive(Debug, Clone)]
struct InFlight {
    seq: u64,
    submission: Submission,
}

/// Encrypt workflow state machine. Pure: the caller executes returned
/// actions and feeds completions back.
#[derive(Debug, Clone, Default)]
pub struct EncryptFlow {
    identity: Option<String>,
    friend: Option<String>,
    subject: String,
    message: String,
    pending_file: Option<EncodedFile>,
    in_flight: Option<InFlight>,
    next_seq: u64,
}

impl EncryptFlow {
    /// Fresh flow with no inputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> FlowPhase {
        if self.in_flight.is_some() {
            FlowPhase::Submitting
        } else if self.ready() {
            FlowPhase::Ready
        } else {
            FlowPhase::Idle
        }
    }

    /// Name of the pending upload, if any.
    pub fn pending_file_name(&self) -> Option<&str> {
        self.pending_file.as_ref().map(|f| f.name.as_str())
    }

    fn ready(&self) -> bool {
        self.identity.is_some()
            && self.friend.is_some()
            && (self.pending_file.is_some() || !self.message.is_empty())
    }

    /// Process an event and return resulting actions.
    ///
    /// # Errors
    ///
    /// Returns `EncItError` when a precondition fails or a dispatched call
    /// came back with a failure; either way the inputs are kept so the
    /// action can be retried.
    pub fn handle(&mut self, event: EncryptEvent) -> Result<Vec<EncryptAction>, EncItError> {
        match event {
            EncryptEvent::SelectIdentity(identity) => {
                self.identity = identity;
                Ok(vec![])
            },
            EncryptEvent::SelectFriend(friend) => {
                self.friend = friend;
                Ok(vec![])
            },
            EncryptEvent::SetSubject(subject) => {
                self.subject = subject;
                Ok(vec![])
            },
            EncryptEvent::SetMessage(message) => {
                self.message = message;
                Ok(vec![])
            },
            EncryptEvent::FilesSelected(files) => {
                // Zero files is a no-op; one replaces any pending upload.
                if let Some(encoded) = codec::encode_file_selection(&files)? {
                    self.pending_file = Some(encoded);
                }
                Ok(vec![])
            },
            EncryptEvent::Submit { target } => self.handle_submit(target),
            EncryptEvent::Completed { seq, result } => self.handle_completed(seq, result),
            EncryptEvent::Clear => {
                self.identity = None;
                self.friend = None;
                self.subject.clear();
                self.message.clear();
                self.pending_file = None;
                // A submit outstanding at clear time is abandoned; its
                // completion must not emit actions against the empty form.
                self.in_flight = None;
                Ok(vec![])
            },
        }
    }

    fn handle_submit(&mut self, target: OutputTarget) -> Result<Vec<EncryptAction>, EncItError> {
        let identity = self.identity.clone().ok_or_else(|| EncItError::missing("identity"))?;
        let friend = self.friend.clone().ok_or_else(|| EncItError::missing("friend"))?;

        if self.pending_file.is_some() && !self.message.is_empty() {
            return Err(EncItError::Validation {
                reason: "both a file and a message are pending; submit one or the other".to_string(),
            });
        }

        let (request, submission) = if let Some(file) = &self.pending_file {
            let subject =
                if self.subject.is_empty() { file.name.clone() } else { self.subject.clone() };
            (
                EncryptRequest {
                    identity,
                    friend,
                    subject: Some(subject),
                    message_type: MessageType::File,
                    message: file.base64.clone(),
                },
                Submission::File { file_name: file.name.clone() },
            )
        } else if self.message.is_empty() {
            return Err(EncItError::missing("message or file"));
        } else {
            let subject = (!self.subject.is_empty()).then(|| self.subject.clone());
            (
                EncryptRequest {
                    identity,
                    friend,
                    subject,
                    message_type: MessageType::Plaintext,
                    message: self.message.clone(),
                },
                Submission::Plaintext { target, subject: self.subject.clone() },
            )
        };

        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight = Some(InFlight { seq, submission });

        Ok(vec![EncryptAction::Encrypt { seq, request }])
    }

    fn handle_completed(
        &mut self,
        seq: u64,
        result: Result<String, EncItError>,
    ) -> Result<Vec<EncryptAction>, EncItError> {
        // Only the latest dispatched request may settle the flow.
        let Some(in_flight) = self.in_flight.take() else { return Ok(vec![]) };
        if in_flight.seq != seq {
            self.in_flight = Some(in_flight);
            return Ok(vec![]);
        }

        let cipher_text = result?;

        match in_flight.submission {
            Submission::File { file_name } => {
                self.pending_file = None;
                let blob = codec::package_for_download(
                    cipher_text.into_bytes(),
                    format!("{file_name}.enc"),
                );
                Ok(vec![EncryptAction::Ui(UiAction::SaveBlob(blob))])
            },
            Submission::Plaintext { target: OutputTarget::Clipboard, .. } => Ok(vec![
                EncryptAction::Ui(UiAction::CopyToClipboard(cipher_text)),
                EncryptAction::Ui(UiAction::Notify("Copied to clipboard".to_string())),
            ]),
            Submission::Plaintext { target: OutputTarget::Download, subject } => {
                let name = if subject.is_empty() { "message".to_string() } else { subject };
                let blob = codec::package_for_download(
                    cipher_text.into_bytes(),
                    format!("{name}.enc"),
                );
                Ok(vec![EncryptAction::Ui(UiAction::SaveBlob(blob))])
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn ready_flow() -> EncryptFlow {
        let mut flow = EncryptFlow::new();
        flow.handle(EncryptEvent::SelectIdentity(Some("Alice".to_string()))).unwrap();
        flow.handle(EncryptEvent::SelectFriend(Some("Bob".to_string()))).unwrap();
        flow.handle(EncryptEvent::SetMessage("hi".to_string())).unwrap();
        flow
    }

    fn submitted_seq(actions: &[EncryptAction]) -> u64 {
        match actions {
            [EncryptAction::Encrypt { seq, .. }] => *seq,
            other => panic!("expected a single Encrypt action, got {other:?}"),
        }
    }

    #[test]
    fn starts_idle_and_becomes_ready() {
        let mut flow = EncryptFlow::new();
        assert_eq!(flow.phase(), FlowPhase::Idle);

        flow.handle(EncryptEvent::SelectIdentity(Some("Alice".to_string()))).unwrap();
        flow.handle(EncryptEvent::SelectFriend(Some("Bob".to_string()))).unwrap();
        assert_eq!(flow.phase(), FlowPhase::Idle);

        flow.handle(EncryptEvent::SetMessage("hi".to_string())).unwrap();
        assert_eq!(flow.phase(), FlowPhase::Ready);
    }

    #[test]
    fn submit_without_identity_is_a_validation_error() {
        let mut flow = EncryptFlow::new();
        flow.handle(EncryptEvent::SelectFriend(Some("Bob".to_string()))).unwrap();
        flow.handle(EncryptEvent::SetMessage("hi".to_string())).unwrap();

        let result = flow.handle(EncryptEvent::Submit { target: OutputTarget::Clipboard });
        assert!(matches!(result, Err(EncItError::Validation { .. })));
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }

    #[test]
    fn plaintext_submit_builds_exact_request() {
        let mut flow = ready_flow();
        let actions = flow.handle(EncryptEvent::Submit { target: OutputTarget::Clipboard }).unwrap();

        match &actions[..] {
            [EncryptAction::Encrypt { request, .. }] => {
                assert_eq!(request.identity, "Alice");
                assert_eq!(request.friend, "Bob");
                assert_eq!(request.subject, None);
                assert_eq!(request.message_type, MessageType::Plaintext);
                assert_eq!(request.message, "hi");
            },
            other => panic!("expected a single Encrypt action, got {other:?}"),
        }
        assert_eq!(flow.phase(), FlowPhase::Submitting);
    }

    #[test]
    fn plaintext_success_copies_and_notifies() {
        let mut flow = ready_flow();
        let actions = flow.handle(EncryptEvent::Submit { target: OutputTarget::Clipboard }).unwrap();
        let seq = submitted_seq(&actions);

        let actions = flow
            .handle(EncryptEvent::Completed { seq, result: Ok("cipher".to_string()) })
            .unwrap();

        assert_eq!(
            actions,
            vec![
                EncryptAction::Ui(UiAction::CopyToClipboard("cipher".to_string())),
                EncryptAction::Ui(UiAction::Notify("Copied to clipboard".to_string())),
            ]
        );
        // Inputs are kept: the flow settles back to Ready.
        assert_eq!(flow.phase(), FlowPhase::Ready);
    }

    #[test]
    fn plaintext_download_names_blob_after_subject() {
        let mut flow = ready_flow();
        flow.handle(EncryptEvent::SetSubject("greeting".to_string())).unwrap();
        let actions = flow.handle(EncryptEvent::Submit { target: OutputTarget::Download }).unwrap();
        let seq = submitted_seq(&actions);

        let actions = flow
            .handle(EncryptEvent::Completed { seq, result: Ok("cipher".to_string()) })
            .unwrap();

        match &actions[..] {
            [EncryptAction::Ui(UiAction::SaveBlob(blob))] => {
                assert_eq!(blob.name, "greeting.enc");
                assert_eq!(blob.bytes, b"cipher".to_vec());
            },
            other => panic!("expected a SaveBlob action, got {other:?}"),
        }
    }

    #[test]
    fn failure_surfaces_and_leaves_flow_ready() {
        let mut flow = ready_flow();
        let actions = flow.handle(EncryptEvent::Submit { target: OutputTarget::Clipboard }).unwrap();
        let seq = submitted_seq(&actions);

        let result = flow.handle(EncryptEvent::Completed {
            seq,
            result: Err(EncItError::Transport { status: Some(500), message: "boom".to_string() }),
        });

        assert!(matches!(result, Err(EncItError::Transport { .. })));
        assert_eq!(flow.phase(), FlowPhase::Ready);
    }

    #[test]
    fn file_submit_encodes_and_falls_back_to_filename_subject() {
        let mut flow = EncryptFlow::new();
        flow.handle(EncryptEvent::SelectIdentity(Some("Alice".to_string()))).unwrap();
        flow.handle(EncryptEvent::SelectFriend(Some("Bob".to_string()))).unwrap();
        flow.handle(EncryptEvent::FilesSelected(vec![FileUpload {
            name: "notes.txt".to_string(),
            bytes: vec![0x41, 0x42],
        }]))
        .unwrap();
        assert_eq!(flow.phase(), FlowPhase::Ready);

        let actions = flow.handle(EncryptEvent::Submit { target: OutputTarget::Download }).unwrap();
        match &actions[..] {
            [EncryptAction::Encrypt { request, .. }] => {
                assert_eq!(request.subject.as_deref(), Some("notes.txt"));
                assert_eq!(request.message_type, MessageType::File);
                assert_eq!(request.message, "QUI=");
            },
            other => panic!("expected a single Encrypt action, got {other:?}"),
        }
    }

    #[test]
    fn file_success_downloads_and_clears_pending_file() {
        let mut flow = EncryptFlow::new();
        flow.handle(EncryptEvent::SelectIdentity(Some("Alice".to_string()))).unwrap();
        flow.handle(EncryptEvent::SelectFriend(Some("Bob".to_string()))).unwrap();
        flow.handle(EncryptEvent::FilesSelected(vec![FileUpload {
            name: "notes.txt".to_string(),
            bytes: b"secret".to_vec(),
        }]))
        .unwrap();

        let actions = flow.handle(EncryptEvent::Submit { target: OutputTarget::Download }).unwrap();
        let seq = submitted_seq(&actions);
        let actions = flow
            .handle(EncryptEvent::Completed { seq, result: Ok("cipher".to_string()) })
            .unwrap();

        match &actions[..] {
            [EncryptAction::Ui(UiAction::SaveBlob(blob))] => {
                assert_eq!(blob.name, "notes.txt.enc");
            },
            other => panic!("expected a SaveBlob action, got {other:?}"),
        }

        // A repeat submit cannot resend the stale payload.
        assert_eq!(flow.pending_file_name(), None);
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }

    #[test]
    fn second_file_selection_replaces_the_first() {
        let mut flow = EncryptFlow::new();
        flow.handle(EncryptEvent::FilesSelected(vec![FileUpload {
            name: "first.bin".to_string(),
            bytes: vec![1],
        }]))
        .unwrap();
        flow.handle(EncryptEvent::FilesSelected(vec![FileUpload {
            name: "second.bin".to_string(),
            bytes: vec![2],
        }]))
        .unwrap();

        assert_eq!(flow.pending_file_name(), Some("second.bin"));
    }

    #[test]
    fn empty_file_selection_keeps_pending_upload() {
        let mut flow = EncryptFlow::new();
        flow.handle(EncryptEvent::FilesSelected(vec![FileUpload {
            name: "keep.bin".to_string(),
            bytes: vec![1],
        }]))
        .unwrap();
        flow.handle(EncryptEvent::FilesSelected(vec![])).unwrap();

        assert_eq!(flow.pending_file_name(), Some("keep.bin"));
    }

    #[test]
    fn submit_with_both_file_and_message_is_rejected() {
        let mut flow = ready_flow();
        flow.handle(EncryptEvent::FilesSelected(vec![FileUpload {
            name: "notes.txt".to_string(),
            bytes: vec![1],
        }]))
        .unwrap();

        let result = flow.handle(EncryptEvent::Submit { target: OutputTarget::Clipboard });
        assert!(matches!(result, Err(EncItError::Validation { .. })));
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut flow = ready_flow();
        let first = flow.handle(EncryptEvent::Submit { target: OutputTarget::Clipboard }).unwrap();
        let first_seq = submitted_seq(&first);
        let second = flow.handle(EncryptEvent::Submit { target: OutputTarget::Clipboard }).unwrap();
        let second_seq = submitted_seq(&second);

        // The superseded call's late result must not settle the flow.
        let actions = flow
            .handle(EncryptEvent::Completed { seq: first_seq, result: Ok("old".to_string()) })
            .unwrap();
        assert!(actions.is_empty());
        assert_eq!(flow.phase(), FlowPhase::Submitting);

        let actions = flow
            .handle(EncryptEvent::Completed { seq: second_seq, result: Ok("new".to_string()) })
            .unwrap();
        assert_eq!(
            actions[0],
            EncryptAction::Ui(UiAction::CopyToClipboard("new".to_string()))
        );
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut flow = ready_flow();
        flow.handle(EncryptEvent::Clear).unwrap();
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }

    #[test]
    fn completion_after_clear_is_dropped() {
        let mut flow = ready_flow();
        let actions = flow.handle(EncryptEvent::Submit { target: OutputTarget::Clipboard }).unwrap();
        let seq = submitted_seq(&actions);

        flow.handle(EncryptEvent::Clear).unwrap();
        assert_eq!(flow.phase(), FlowPhase::Idle);

        // The abandoned call's result must not act on the cleared form.
        let actions = flow
            .handle(EncryptEvent::Completed { seq, result: Ok("late".to_string()) })
            .unwrap();
        assert!(actions.is_empty());
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }
}
