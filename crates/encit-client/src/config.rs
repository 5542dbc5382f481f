//! Backend endpoint configuration.

/// Where the backend lives. A deployment-time value: defaults match the
/// backend's own default bind, and `ENCIT_BACKEND_URL` overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
}

impl BackendConfig {
    /// Default backend address.
    pub const DEFAULT_URL: &'static str = "http://localhost:8080";

    /// Configuration pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// Configuration from the `ENCIT_BACKEND_URL` environment variable,
    /// falling back to [`Self::DEFAULT_URL`].
    pub fn from_env() -> Self {
        match std::env::var("ENCIT_BACKEND_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_URL)
    }
}
