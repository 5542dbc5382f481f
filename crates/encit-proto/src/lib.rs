//! Wire types for the EncIt backend JSON protocol.
//!
//! The backend owns all cryptography and key storage; this crate only
//! describes the shapes that cross the HTTP boundary:
//!
//! - [`Identity`] and [`Friend`]: the directory records
//! - [`EncryptRequest`] / [`DecryptRequest`]: the two operation bodies
//! - [`EncItMessage`]: the decrypt result envelope
//!
//! All bodies are camelCase JSON. Optional fields are omitted when absent
//! rather than serialized as `null`.

mod directory;
mod message;

pub use directory::{AddFriendRequest, AddIdentityRequest, Friend, Identity, KeyFormat};
pub use message::{DecryptRequest, EncItMessage, EncryptRequest, MessageType};
