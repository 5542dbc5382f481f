//! Payload codec.
//!
//! Bridges raw binary (file uploads, downloaded blobs) and backend-safe
//! base64 text, and bridges the decrypt envelope's payload into
//! downloadable bytes.
//!
//! ## Encoding rules
//!
//! - File uploads are always base64-encoded client-side before
//!   transmission (`messageType = file`).
//! - Plaintext messages are transmitted as-is; the server performs any
//!   encoding internally.
//! - Decrypt results are always base64 in `payload`, independent of the
//!   original message type.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::EncItError;

/// A file handed to the client by the embedding UI, already read into
/// memory. File reads complete (or fail) before encoding proceeds; there
/// is no partial-file streaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original filename.
    pub name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

/// A file upload encoded for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    /// Original filename, kept as the subject fallback.
    pub name: String,
    /// Base64 of the file bytes.
    pub base64: String,
}

/// A ciphertext file read as text, ready to submit for decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    /// Original filename.
    pub name: String,
    /// File content as UTF-8 text.
    pub text: String,
}

/// Bytes paired with a suggested filename for save-to-disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBlob {
    /// Suggested filename.
    pub name: String,
    /// Content to write.
    pub bytes: Vec<u8>,
}

/// Base64-encode raw file bytes for transmission.
pub fn encode_file_to_text(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode transport base64 back into raw bytes.
///
/// Malformed base64 is rejected with a [`EncItError::Decode`] rather than
/// silently truncated.
pub fn decode_text_to_bytes(text: &str) -> Result<Vec<u8>, EncItError> {
    Ok(STANDARD.decode(text)?)
}

/// Encode a file selection for an encrypt submission.
///
/// Zero files selected is a no-op (`Ok(None)`); exactly one file is
/// encoded; anything else fails with [`EncItError::Read`].
pub fn encode_file_selection(files: &[FileUpload]) -> Result<Option<EncodedFile>, EncItError> {
    match files {
        [] => Ok(None),
        [file] => Ok(Some(EncodedFile {
            name: file.name.clone(),
            base64: encode_file_to_text(&file.bytes),
        })),
        _ => Err(EncItError::Read { reason: format!("expected exactly one file, got {}", files.len()) }),
    }
}

/// Read a ciphertext file selection as text for a decrypt submission.
///
/// Same selection contract as [`encode_file_selection`]; content that is
/// not valid UTF-8 fails with [`EncItError::Decode`].
pub fn read_text_selection(files: &[FileUpload]) -> Result<Option<TextFile>, EncItError> {
    match files {
        [] => Ok(None),
        [file] => {
            let text = String::from_utf8(file.bytes.clone())?;
            Ok(Some(TextFile { name: file.name.clone(), text }))
        },
        _ => Err(EncItError::Read { reason: format!("expected exactly one file, got {}", files.len()) }),
    }
}

/// Wrap bytes with a suggested filename for save-to-disk.
pub fn package_for_download(bytes: Vec<u8>, name: impl Into<String>) -> NamedBlob {
    NamedBlob { name: name.into(), bytes }
}
