//! Core `StageInvoker` trait and `HttpInvoker` implementation.
//!
//! `HttpInvoker` performs one JSON request/response exchange per stage call
//! against the generation service.  All connection details come from
//! [`ApiConfig`]; nothing is hardcoded.  The invoker never retries and never
//! touches the project — it is a stateless function from (stage, payload) to
//! (result | error).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::remote::wire::{
    AudioRequest, AudioResponse, DownloadRequest, DownloadResponse, PreviewRequest,
    PreviewResponse, ScriptRequest, ScriptResponse, VideoRequest, VideoResponse,
};

// ---------------------------------------------------------------------------
// StageOp
// ---------------------------------------------------------------------------

/// The five remote stage operations and their endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOp {
    GenerateScript,
    FetchPreviews,
    DownloadSelected,
    GenerateAudio,
    GenerateVideo,
}

impl StageOp {
    /// The endpoint path for this operation, joined onto the configured base
    /// URL.
    pub fn path(&self) -> &'static str {
        match self {
            StageOp::GenerateScript => "/generate_script",
            StageOp::FetchPreviews => "/get_urls",
            StageOp::DownloadSelected => "/download_selected_visuals",
            StageOp::GenerateAudio => "/generate_audio",
            StageOp::GenerateVideo => "/generate_video",
        }
    }
}

impl std::fmt::Display for StageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageOp::GenerateScript => "generate_script",
            StageOp::FetchPreviews => "fetch_previews",
            StageOp::DownloadSelected => "download_selected",
            StageOp::GenerateAudio => "generate_audio",
            StageOp::GenerateVideo => "generate_video",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// RemoteError
// ---------------------------------------------------------------------------

/// Classified outcome of a failed stage call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// Transport or connection failure.
    #[error("request failed: {0}")]
    Network(String),

    /// The call did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The service answered with a non-success HTTP status.
    #[error("service returned status {0}")]
    Service(u16),

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if e.is_decode() {
            RemoteError::Malformed(e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// StageInvoker trait
// ---------------------------------------------------------------------------

/// Async trait for one request/response exchange per stage.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn StageInvoker>`.  Implementations do not retry and do not mutate
/// any project state.
#[async_trait]
pub trait StageInvoker: Send + Sync {
    async fn generate_script(&self, req: &ScriptRequest) -> Result<ScriptResponse, RemoteError>;

    async fn fetch_previews(&self, req: &PreviewRequest) -> Result<PreviewResponse, RemoteError>;

    async fn download_selected(
        &self,
        req: &DownloadRequest,
    ) -> Result<DownloadResponse, RemoteError>;

    async fn generate_audio(&self, req: &AudioRequest) -> Result<AudioResponse, RemoteError>;

    async fn generate_video(&self, req: &VideoRequest) -> Result<VideoResponse, RemoteError>;
}

// ---------------------------------------------------------------------------
// HttpInvoker
// ---------------------------------------------------------------------------

/// Calls the generation service over HTTP with JSON bodies.
///
/// The per-call timeout from [`ApiConfig::timeout_secs`] is configured on
/// the client; exceeding it surfaces as [`RemoteError::Timeout`].
pub struct HttpInvoker {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInvoker {
    /// Build an `HttpInvoker` from application config.
    ///
    /// A default (no-timeout) client is used as a last-resort fallback if
    /// the builder fails (should never happen in practice).
    pub fn from_config(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    fn endpoint(&self, op: StageOp) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), op.path())
    }

    async fn post<Req, Resp>(&self, op: StageOp, req: &Req) -> Result<Resp, RemoteError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(op);
        log::debug!("remote: POST {url}");

        let response = self.client.post(&url).json(req).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("remote: {op} returned status {status}");
            return Err(RemoteError::Service(status.as_u16()));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| RemoteError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl StageInvoker for HttpInvoker {
    async fn generate_script(&self, req: &ScriptRequest) -> Result<ScriptResponse, RemoteError> {
        self.post(StageOp::GenerateScript, req).await
    }

    async fn fetch_previews(&self, req: &PreviewRequest) -> Result<PreviewResponse, RemoteError> {
        self.post(StageOp::FetchPreviews, req).await
    }

    async fn download_selected(
        &self,
        req: &DownloadRequest,
    ) -> Result<DownloadResponse, RemoteError> {
        self.post(StageOp::DownloadSelected, req).await
    }

    async fn generate_audio(&self, req: &AudioRequest) -> Result<AudioResponse, RemoteError> {
        self.post(StageOp::GenerateAudio, req).await
    }

    async fn generate_video(&self, req: &VideoRequest) -> Result<VideoResponse, RemoteError> {
        self.post(StageOp::GenerateVideo, req).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn make_config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _invoker = HttpInvoker::from_config(&make_config("http://127.0.0.1:8000"));
    }

    #[test]
    fn endpoint_joins_base_url_and_path() {
        let invoker = HttpInvoker::from_config(&make_config("http://127.0.0.1:8000"));
        assert_eq!(
            invoker.endpoint(StageOp::GenerateScript),
            "http://127.0.0.1:8000/generate_script"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let invoker = HttpInvoker::from_config(&make_config("http://127.0.0.1:8000/"));
        assert_eq!(
            invoker.endpoint(StageOp::FetchPreviews),
            "http://127.0.0.1:8000/get_urls"
        );
    }

    #[test]
    fn every_op_has_a_distinct_path() {
        let ops = [
            StageOp::GenerateScript,
            StageOp::FetchPreviews,
            StageOp::DownloadSelected,
            StageOp::GenerateAudio,
            StageOp::GenerateVideo,
        ];
        for (i, a) in ops.iter().enumerate() {
            assert!(a.path().starts_with('/'));
            for b in &ops[i + 1..] {
                assert_ne!(a.path(), b.path());
            }
        }
    }

    #[test]
    fn remote_error_messages_are_human_readable() {
        assert_eq!(RemoteError::Timeout.to_string(), "request timed out");
        assert_eq!(
            RemoteError::Service(502).to_string(),
            "service returned status 502"
        );
    }

    /// Verify that `HttpInvoker` is object-safe (usable as `dyn StageInvoker`).
    #[test]
    fn invoker_is_object_safe() {
        let invoker: Box<dyn StageInvoker> =
            Box::new(HttpInvoker::from_config(&make_config("http://localhost:1")));
        drop(invoker);
    }
}
