//! Core building blocks for the EncIt client.
//!
//! Two concerns live here, both free of I/O:
//!
//! - [`codec`]: bridging raw bytes (file uploads, downloadable blobs) and
//!   the backend-safe base64 text that crosses the wire
//! - [`EncItError`]: the error taxonomy shared by every layer of the client
//!
//! # Components
//!
//! - [`codec::encode_file_selection`] / [`codec::read_text_selection`]:
//!   the upload contracts
//! - [`codec::decode_text_to_bytes`]: strict base64 decoding
//! - [`codec::NamedBlob`]: bytes paired with a suggested filename

mod error;

pub mod codec;

pub use error::EncItError;
