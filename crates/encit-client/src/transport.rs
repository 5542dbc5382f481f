//! HTTP transport shared by the directory and encryption services.
//!
//! One-shot request/response only: no retries, no streaming, no
//! client-side timeout policy. Transport failures are whatever reqwest
//! reports; non-success responses carry the backend's reason in the body,
//! which is preserved verbatim.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use encit_core::EncItError;

use crate::config::BackendConfig;

/// Thin reqwest wrapper bound to a backend base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport for the given backend.
    pub fn new(config: &BackendConfig) -> Result<Self, EncItError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| EncItError::Transport { status: None, message: e.to_string() })?;
        Ok(Self { base_url: config.base_url.clone(), client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, EncItError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let resp = self.client.get(&url).send().await.map_err(send_error)?;
        let resp = check(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| EncItError::Decode { reason: e.to_string() })
    }

    /// GET a JSON resource addressed by a user-chosen name.
    ///
    /// The name is appended as a single percent-encoded path segment, so
    /// names containing `/`, `?`, or `#` cannot address a different route.
    pub(crate) async fn get_json_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        name: &str,
    ) -> Result<T, EncItError> {
        let url = self.resource_url(path, name)?;
        tracing::debug!(%url, "GET");
        let resp = self.client.get(url).send().await.map_err(send_error)?;
        let resp = check(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| EncItError::Decode { reason: e.to_string() })
    }

    fn resource_url(&self, path: &str, name: &str) -> Result<reqwest::Url, EncItError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| EncItError::Transport { status: None, message: e.to_string() })?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| EncItError::Transport {
                status: None,
                message: "base URL cannot carry a path".to_string(),
            })?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|p| !p.is_empty()));
            segments.push(name);
        }
        Ok(url)
    }

    /// POST a JSON body, expecting an empty response.
    pub(crate) async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), EncItError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let resp = self.client.post(&url).json(body).send().await.map_err(send_error)?;
        check(resp).await?;
        Ok(())
    }

    /// POST a JSON body, expecting an opaque text response.
    pub(crate) async fn post_json_text<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, EncItError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let resp = self.client.post(&url).json(body).send().await.map_err(send_error)?;
        let resp = check(resp).await?;
        resp.text().await.map_err(send_error)
    }

    /// POST a JSON body, expecting a JSON response.
    pub(crate) async fn post_json_typed<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, EncItError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let resp = self.client.post(&url).json(body).send().await.map_err(send_error)?;
        let resp = check(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| EncItError::Decode { reason: e.to_string() })
    }

    /// Liveness probe against `GET /health`.
    pub async fn health(&self) -> Result<(), EncItError> {
        let url = self.url("/health");
        let resp = self.client.get(&url).send().await.map_err(send_error)?;
        check(resp).await?;
        Ok(())
    }
}

fn send_error(err: reqwest::Error) -> EncItError {
    EncItError::Transport { status: None, message: err.to_string() }
}

/// Map a non-success response into the error taxonomy.
///
/// The body text is the backend's human-readable reason and is kept
/// verbatim. 409 is the duplicate-name signal on create.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, EncItError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %message, "backend error response");

    if status == StatusCode::CONFLICT {
        Err(EncItError::Conflict { reason: message })
    } else {
        Err(EncItError::Transport { status: Some(status.as_u16()), message })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(http::Response::builder().status(status).body(body).unwrap())
    }

    #[tokio::test]
    async fn check_passes_successful_responses_through() {
        let resp = check(response(200, "alive")).await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "alive");
    }

    #[tokio::test]
    async fn check_maps_conflict_to_conflict_with_verbatim_body() {
        let err = check(response(409, "There is already a friend with that name"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EncItError::Conflict {
                reason: "There is already a friend with that name".to_string()
            }
        );
    }

    #[tokio::test]
    async fn check_maps_other_failures_to_transport_with_verbatim_body() {
        let err = check(response(500, "friend not found: Bob")).await.unwrap_err();
        assert_eq!(
            err,
            EncItError::Transport {
                status: Some(500),
                message: "friend not found: Bob".to_string()
            }
        );
    }

    #[test]
    fn resource_url_encodes_the_name_segment() {
        let transport = HttpTransport::new(&BackendConfig::new("http://localhost:8080")).unwrap();
        let url = transport.resource_url("/v1/identities", "a/b?c#d").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/identities/a%2Fb%3Fc%23d"
        );
    }
}
