//! HTTP implementation of [`StageBackend`].

use super::StageBackend;
use crate::config::BackendConfig;
use crate::core::StageId;
use crate::errors::{PipelineError, PipelineOp, Result};
use crate::models::{
    DatasetFile, HealthReport, ModelSpec, PreprocessReport, PreprocessRequest, ResetAck,
    SplitReport, SplitRequest, TrainingReport, UploadReport,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Talks to the classification service over HTTP.
///
/// Stage replies carry a `success` flag alongside their payload; a reply
/// with `success: false` or a non-2xx status becomes
/// [`PipelineError::Service`] with the service's own message.
pub struct HttpBackend {
    http: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// Builds a backend from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] when the configuration is invalid
    /// or the HTTP client cannot be constructed.
    pub fn new(config: BackendConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PipelineError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// The configuration this backend was built with.
    #[must_use]
    pub const fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn stage_url(&self, stage: StageId) -> Result<String> {
        stage.endpoint().map(|path| self.url(path)).ok_or_else(|| {
            PipelineError::service(PipelineOp::Advance(stage), "stage has no backing service")
        })
    }

    fn map_send_error(&self, op: PipelineOp, source: reqwest::Error) -> PipelineError {
        if source.is_timeout() {
            let limit = match op {
                PipelineOp::Advance(StageId::Upload) => self.config.upload_timeout(),
                _ => self.config.request_timeout(),
            };
            PipelineError::Timeout { op, limit }
        } else {
            PipelineError::Transport { op, source }
        }
    }

    async fn post_stage<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        stage: StageId,
        body: &B,
    ) -> Result<T> {
        let op = PipelineOp::Advance(stage);
        let url = self.stage_url(stage)?;
        debug!(%stage, %url, "posting stage request");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(op, e))?;
        Self::decode_reply(op, response).await
    }

    /// Decodes a stage reply, turning service-level failures into
    /// [`PipelineError::Service`].
    ///
    /// A non-2xx reply is a service failure even when its body is not
    /// JSON (a proxy's HTML error page, for instance); the status line
    /// becomes the message then.
    async fn decode_reply<T: DeserializeOwned>(
        op: PipelineOp,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(serde_json::Value::as_str)
                        .map(ToOwned::to_owned)
                })
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(PipelineError::service(op, message));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PipelineError::Transport { op, source: e })?;
        if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let message = value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| format!("HTTP {status}"), ToOwned::to_owned);
            return Err(PipelineError::service(op, message));
        }

        serde_json::from_value(value).map_err(|e| PipelineError::Decode { op, source: e })
    }
}

#[async_trait]
impl StageBackend for HttpBackend {
    async fn upload(&self, file: &DatasetFile) -> Result<UploadReport> {
        let op = PipelineOp::Advance(StageId::Upload);
        if file.size_bytes() > self.config.max_upload_bytes {
            return Err(PipelineError::service(
                op,
                format!(
                    "file {:?} is {} bytes, over the {} byte limit",
                    file.filename,
                    file.size_bytes(),
                    self.config.max_upload_bytes
                ),
            ));
        }

        let form = Form::new().part(
            "file",
            Part::bytes(file.bytes.clone()).file_name(file.filename.clone()),
        );
        debug!(filename = %file.filename, size = file.size_bytes(), "uploading dataset");
        let response = self
            .http
            .post(self.stage_url(StageId::Upload)?)
            .multipart(form)
            .timeout(self.config.upload_timeout())
            .send()
            .await
            .map_err(|e| self.map_send_error(op, e))?;
        Self::decode_reply(op, response).await
    }

    async fn preprocess(&self, request: &PreprocessRequest) -> Result<PreprocessReport> {
        self.post_stage(StageId::Preprocess, request).await
    }

    async fn split(&self, request: &SplitRequest) -> Result<SplitReport> {
        self.post_stage(StageId::Split, request).await
    }

    async fn train(&self, spec: &ModelSpec) -> Result<TrainingReport> {
        self.post_stage(StageId::Train, spec).await
    }

    async fn reset(&self) -> Result<ResetAck> {
        let op = PipelineOp::Reset;
        let response = self
            .http
            .post(self.url("/api/reset"))
            .send()
            .await
            .map_err(|e| self.map_send_error(op, e))?;
        Self::decode_reply(op, response).await
    }

    async fn health(&self) -> Result<HealthReport> {
        // The health reply has no success flag, only status and session
        // booleans, so it skips the shared decode path.
        let op = PipelineOp::Health;
        let response = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(|e| self.map_send_error(op, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::service(op, format!("HTTP {status}")));
        }
        response
            .json()
            .await
            .map_err(|e| PipelineError::Transport { op, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn backend() -> HttpBackend {
        HttpBackend::new(BackendConfig::new("http://localhost:5000")).unwrap()
    }

    #[test]
    fn joins_paths_against_the_base_url() {
        assert_eq!(backend().url("/api/upload"), "http://localhost:5000/api/upload");
    }

    #[test]
    fn trailing_slash_on_base_url_is_tolerated() {
        let backend = HttpBackend::new(BackendConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(backend.url("/api/train"), "http://localhost:5000/api/train");
    }

    #[test]
    fn stage_urls_follow_the_stage_endpoints() {
        let backend = backend();
        assert_eq!(
            backend.stage_url(StageId::Train).unwrap(),
            "http://localhost:5000/api/train"
        );
        assert!(backend.stage_url(StageId::Results).is_err());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let result = HttpBackend::new(BackendConfig::new("not-a-url"));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[tokio::test]
    async fn stalled_service_maps_to_timeout_not_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                // Accept and keep the connection open without replying.
                held.push(socket);
            }
        });

        let backend = HttpBackend::new(
            BackendConfig::new(format!("http://{addr}"))
                .with_request_timeout(Duration::from_secs(1))
                .with_upload_timeout(Duration::from_secs(1)),
        )
        .unwrap();

        let err = backend.reset().await.unwrap_err();
        assert!(err.is_timeout(), "expected a timeout, got {err:?}");
        assert_eq!(err.op(), Some(PipelineOp::Reset));
        assert!(err.is_retryable());

        let file = DatasetFile::new("iris.csv", b"a,b\n1,2\n".to_vec());
        match backend.upload(&file).await.unwrap_err() {
            PipelineError::Timeout { op, limit } => {
                assert_eq!(op, PipelineOp::Advance(StageId::Upload));
                assert_eq!(limit, backend.config().upload_timeout());
            }
            other => panic!("expected a timeout, got {other:?}"),
        }
        server.abort();
    }

    #[tokio::test]
    async fn non_json_error_page_maps_to_service_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let body = "<html>Bad Gateway</html>";
            let reply = format!(
                "HTTP/1.1 502 Bad Gateway\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        let backend = HttpBackend::new(BackendConfig::new(format!("http://{addr}"))).unwrap();
        let err = backend.reset().await.unwrap_err();
        match err {
            PipelineError::Service { op, ref message } => {
                assert_eq!(op, PipelineOp::Reset);
                assert_eq!(message, "HTTP 502 Bad Gateway");
            }
            ref other => panic!("expected a service error, got {other:?}"),
        }
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn oversized_upload_fails_before_any_request() {
        let backend = HttpBackend::new(
            BackendConfig::new("http://localhost:5000").with_max_upload_bytes(8),
        )
        .unwrap();
        let file = DatasetFile::new("big.csv", vec![0u8; 16]);

        let err = backend.upload(&file).await.unwrap_err();
        match err {
            PipelineError::Service { op, message } => {
                assert_eq!(op, PipelineOp::Advance(StageId::Upload));
                assert!(message.contains("over the 8 byte limit"), "{message}");
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }
}
