//! EncIt client
//!
//! Client for a message-encryption backend: users manage identities (their
//! own key pairs) and friends (other parties' public keys), encrypt
//! messages or files addressed to a friend, and decrypt messages addressed
//! to one of their identities. All cryptography, key generation, and key
//! storage happen behind the backend HTTP API; this crate is the workflow
//! and transport layer in front of it.
//!
//! # Architecture
//!
//! The workflow state machines are pure:
//! - They receive events from the caller (selections, typed input, file
//!   uploads, submits, request completions)
//! - They produce actions for the caller to execute (backend calls, blob
//!   downloads, clipboard copies)
//! - All I/O lives in [`HttpTransport`] and the drivers
//!
//! # Components
//!
//! - [`DirectoryClient`]: list/add/get identities and friends
//! - [`EncryptionClient`]: the encrypt and decrypt round trips
//! - [`EncryptFlow`] / [`DecryptFlow`]: the user-facing state machines
//! - [`ErrorSurface`]: single-slot failure channel with subscribers
//! - [`EncryptDriver`] / [`DecryptDriver`]: async glue between a flow, a
//!   backend, and the error surface

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod decrypt_flow;
mod directory;
mod driver;
mod encrypt_flow;
mod encryption;
mod error_surface;
mod flow;
mod transport;

pub use config::BackendConfig;
pub use decrypt_flow::{DecryptAction, DecryptEvent, DecryptFlow};
pub use directory::DirectoryClient;
pub use driver::{DecryptDriver, EncryptDriver};
pub use encrypt_flow::{EncryptAction, EncryptEvent, EncryptFlow, OutputTarget};
pub use encryption::{EncryptBackend, EncryptionClient};
pub use error_surface::{ErrorSurface, SurfacedError};
pub use flow::{FlowPhase, UiAction};
pub use transport::HttpTransport;

pub use encit_core::{EncItError, codec};
pub use encit_proto::{
    AddFriendRequest, AddIdentityRequest, DecryptRequest, EncItMessage, EncryptRequest, Friend,
    Identity, KeyFormat, MessageType,
};
