//! Directory service: list and add identities and friends.
//!
//! Directory lists are never cached. Every caller that needs them
//! refetches; a failed call must not be partially applied over a
//! previously shown list.

use encit_core::EncItError;
use encit_proto::{AddFriendRequest, AddIdentityRequest, Friend, Identity, KeyFormat};

use crate::transport::HttpTransport;

/// CRUD-style access to the identity and friend directories.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    transport: HttpTransport,
}

impl DirectoryClient {
    /// Directory service over the given transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Fetch all identities.
    pub async fn list_identities(&self) -> Result<Vec<Identity>, EncItError> {
        self.transport.get_json("/v1/identities").await
    }

    /// Fetch a single identity by name. Unknown names surface the
    /// backend's 404 body as a transport error.
    pub async fn get_identity(&self, name: &str) -> Result<Identity, EncItError> {
        self.transport.get_json_resource("/v1/identities", name).await
    }

    /// Create an identity. The server generates the key pair; the new
    /// identity is only visible through a subsequent
    /// [`Self::list_identities`] call.
    ///
    /// An empty name never reaches the network.
    pub async fn add_identity(&self, name: &str) -> Result<(), EncItError> {
        if name.trim().is_empty() {
            return Err(EncItError::missing("identity name"));
        }
        let request = AddIdentityRequest { name: name.to_string() };
        self.transport.post_json("/v1/identities", &request).await
    }

    /// Fetch all friends.
    pub async fn list_friends(&self) -> Result<Vec<Friend>, EncItError> {
        self.transport.get_json("/v1/friends").await
    }

    /// Fetch a single friend by name.
    pub async fn get_friend(&self, name: &str) -> Result<Friend, EncItError> {
        self.transport.get_json_resource("/v1/friends", name).await
    }

    /// Add a friend's public key. `key_format` tells the server how to
    /// interpret the key text; the client performs no format validation or
    /// conversion itself.
    ///
    /// An empty name never reaches the network; a duplicate name is a
    /// [`EncItError::Conflict`].
    pub async fn add_friend(
        &self,
        name: &str,
        key_format: KeyFormat,
        public_key: &str,
    ) -> Result<(), EncItError> {
        if name.trim().is_empty() {
            return Err(EncItError::missing("friend name"));
        }
        if public_key.trim().is_empty() {
            return Err(EncItError::missing("public key"));
        }
        let request = AddFriendRequest {
            name: name.to_string(),
            key_format,
            public_key: public_key.to_string(),
        };
        self.transport.post_json("/v1/friends", &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn client() -> DirectoryClient {
        // The URL is never contacted in these tests.
        #[allow(clippy::unwrap_used)]
        let transport = HttpTransport::new(&BackendConfig::new("http://unreachable.invalid")).unwrap();
        DirectoryClient::new(transport)
    }

    #[tokio::test]
    async fn add_identity_rejects_empty_name_locally() {
        let result = client().add_identity("").await;
        assert!(matches!(result, Err(EncItError::Validation { .. })));
    }

    #[tokio::test]
    async fn add_friend_rejects_blank_name_locally() {
        let result = client().add_friend("   ", KeyFormat::Pem, "some-key").await;
        assert!(matches!(result, Err(EncItError::Validation { .. })));
    }

    #[tokio::test]
    async fn add_friend_rejects_empty_key_locally() {
        let result = client().add_friend("bob", KeyFormat::Base64, "").await;
        assert!(matches!(result, Err(EncItError::Validation { .. })));
    }
}
