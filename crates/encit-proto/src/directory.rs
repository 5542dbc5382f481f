//! Directory record types.
//!
//! Identities are key pairs the user controls; friends are counterparties'
//! public keys. Both are referenced by a unique, non-empty name. Uniqueness
//! is enforced server-side; a duplicate name on create is a conflict, never
//! a silent overwrite.

use serde::{Deserialize, Serialize};

/// A key pair the user controls, referenced by name.
///
/// The private key never appears in client-visible data: the server
/// generates the pair on create and only ever returns the public half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique, user-chosen handle.
    pub name: String,
    /// PEM-encoded public key.
    pub public_key: String,
}

/// A counterparty's known public key, referenced by name.
///
/// Once added, the key is immutable public data; there is no update
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    /// Unique, user-chosen handle.
    pub name: String,
    /// Public key as returned by the server.
    pub public_key: String,
}

/// Input encoding of a public key submitted when adding a friend.
///
/// The server normalizes the encoding; the client performs no format
/// validation or conversion itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyFormat {
    /// PEM text, as produced by OpenSSL tooling.
    Pem,
    /// Base64 of the PEM bytes.
    Base64,
    /// Hex of the PEM bytes.
    Hex,
}

/// Body of `POST /v1/identities`.
///
/// The server generates the key pair; the new identity is only visible
/// through a subsequent list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddIdentityRequest {
    /// Unique handle for the new identity.
    pub name: String,
}

/// Body of `POST /v1/friends`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFriendRequest {
    /// Unique handle for the new friend.
    pub name: String,
    /// How the server should interpret `public_key`.
    pub key_format: KeyFormat,
    /// The key material in the declared encoding.
    pub public_key: String,
}
