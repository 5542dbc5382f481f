//! Encryption service: the two cryptographic round trips.
//!
//! Calls are one-shot request/response with no retry and no cancellation.
//! The backend does not distinguish decrypt failure causes by code; it
//! reports a human-readable reason in the response body, which travels
//! unchanged inside [`EncItError::Transport`].

use async_trait::async_trait;

use encit_core::EncItError;
use encit_proto::{DecryptRequest, EncItMessage, EncryptRequest};

use crate::transport::HttpTransport;

/// Backend seam for the workflow drivers.
///
/// Flows and drivers are written against this trait so they can be
/// exercised without a server.
#[async_trait]
pub trait EncryptBackend: Send + Sync {
    /// Encrypt a message for a friend. Returns backend-issued opaque
    /// encrypted text, never parsed client-side.
    async fn encrypt(&self, request: EncryptRequest) -> Result<String, EncItError>;

    /// Decrypt opaque encrypted text into its envelope.
    async fn decrypt(&self, request: DecryptRequest) -> Result<EncItMessage, EncItError>;
}

#[async_trait]
impl<B: EncryptBackend + ?Sized> EncryptBackend for std::sync::Arc<B> {
    async fn encrypt(&self, request: EncryptRequest) -> Result<String, EncItError> {
        (**self).encrypt(request).await
    }

    async fn decrypt(&self, request: DecryptRequest) -> Result<EncItMessage, EncItError> {
        (**self).decrypt(request).await
    }
}

/// Encrypt/decrypt over the backend HTTP API.
#[derive(Debug, Clone)]
pub struct EncryptionClient {
    transport: HttpTransport,
}

impl EncryptionClient {
    /// Encryption service over the given transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl EncryptBackend for EncryptionClient {
    async fn encrypt(&self, request: EncryptRequest) -> Result<String, EncItError> {
        self.transport.post_json_text("/v1/encrypt", &request).await
    }

    async fn decrypt(&self, request: DecryptRequest) -> Result<EncItMessage, EncItError> {
        self.transport.post_json_typed("/v1/decrypt", &request).await
    }
}
