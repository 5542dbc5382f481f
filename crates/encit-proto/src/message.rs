//! Encrypt/decrypt operation bodies and the decrypt result envelope.

use serde::{Deserialize, Serialize};

/// Kind of content carried by an encrypt request.
///
/// File content is base64-encoded client-side before transmission;
/// plaintext is transmitted as-is and the server performs any encoding
/// internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Base64-encoded file bytes.
    File,
    /// Raw UTF-8 text typed by the user.
    Plaintext,
}

/// Body of `POST /v1/encrypt`.
///
/// The response is opaque encrypted text and is never parsed client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptRequest {
    /// Name of the sender's identity.
    pub identity: String,
    /// Name of the receiving friend.
    pub friend: String,
    /// Optional subject line; callers fall back to the original filename
    /// for file content.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<String>,
    /// Whether `message` is base64 file bytes or plain text.
    pub message_type: MessageType,
    /// The content to encrypt, encoded per `message_type`.
    pub message: String,
}

/// Body of `POST /v1/decrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptRequest {
    /// Identity to decrypt with. Omitted: the backend attempts decryption
    /// against every identity the caller owns.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub identity: Option<String>,
    /// The opaque encrypted text.
    pub message: String,
}

/// Decrypt result envelope.
///
/// `payload` is always standard base64, independent of `message_type`;
/// callers must decode it before treating the result as file bytes, and
/// treat the decoded bytes as UTF-8 when displaying plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncItMessage {
    /// Name of the sender as claimed by the message.
    pub sender: String,
    /// Name of the identity the message was decrypted with.
    pub receiver: String,
    /// Subject line; the original filename for file messages. May be
    /// absent for plaintext messages sent without one.
    #[serde(default)]
    pub subject: Option<String>,
    /// Whether the payload decodes to file bytes or display text.
    pub message_type: MessageType,
    /// Base64-encoded content bytes.
    pub payload: String,
    /// Whether the sender's signature matched the claimed sender's known
    /// public key.
    pub verified: bool,
}

impl EncItMessage {
    /// Filename to suggest when saving the payload to disk.
    ///
    /// The subject carries the original filename for file messages; a
    /// fixed fallback keeps downloads working when it is absent.
    pub fn download_name(&self) -> &str {
        self.subject.as_deref().filter(|s| !s.is_empty()).unwrap_or("message")
    }
}
