//! Shared error taxonomy.

use thiserror::Error;

/// Errors from client operations.
///
/// No variant is fatal to the process: failures are surfaced to the user,
/// never retried automatically, and the triggering action can be repeated
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncItError {
    /// A required field is missing or empty. Caught before any network
    /// call is made.
    #[error("validation error: {reason}")]
    Validation {
        /// Which precondition failed.
        reason: String,
    },

    /// The server reported a duplicate name on create.
    #[error("conflict: {reason}")]
    Conflict {
        /// The server's description of the conflict.
        reason: String,
    },

    /// Network or server failure, including decrypt failures the backend
    /// reports only as a message string (no matching identity, malformed
    /// ciphertext, signature mismatch).
    #[error("transport error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Transport {
        /// HTTP status, when a response was received at all.
        status: Option<u16>,
        /// Response body text, verbatim.
        message: String,
    },

    /// Malformed base64 or non-UTF-8 text in a local payload.
    #[error("decode error: {reason}")]
    Decode {
        /// Description of the decode failure.
        reason: String,
    },

    /// A local file read produced unusable input.
    #[error("read error: {reason}")]
    Read {
        /// Description of the read failure.
        reason: String,
    },
}

impl EncItError {
    /// Validation failure for a missing or empty required field.
    pub fn missing(field: &str) -> Self {
        Self::Validation { reason: format!("{field} is required") }
    }

    /// The text shown to the user when this error reaches the error
    /// surface.
    ///
    /// Transport failures carry the backend's human-readable reason in the
    /// response body, which is surfaced unchanged; everything else uses the
    /// Display rendering.
    pub fn surface_message(&self) -> String {
        match self {
            Self::Transport { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<base64::DecodeError> for EncItError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode { reason: err.to_string() }
    }
}

impl From<std::string::FromUtf8Error> for EncItError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Decode { reason: err.to_string() }
    }
}
