//! Backend client configuration.

use crate::errors::PipelineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_upload_timeout_secs() -> u64 {
    60
}

const fn default_max_upload_bytes() -> u64 {
    50 * 1024 * 1024 // 50MB
}

/// Configuration for the HTTP stage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `http://localhost:5000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for every call except upload, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upload-specific timeout, in seconds. Uploads move whole files and
    /// get a longer, explicit bound.
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
    /// Largest accepted upload payload. Oversized files fail locally
    /// before any request is sent.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            upload_timeout_secs: default_upload_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl BackendConfig {
    /// Configuration pointing at the given base URL, defaults elsewhere.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads overrides from `CLASSIFLOW_BASE_URL`,
    /// `CLASSIFLOW_REQUEST_TIMEOUT_SECS`, `CLASSIFLOW_UPLOAD_TIMEOUT_SECS`
    /// and `CLASSIFLOW_MAX_UPLOAD_MB`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("CLASSIFLOW_BASE_URL") {
            config.base_url = url;
        }
        if let Some(secs) = env_u64("CLASSIFLOW_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = secs;
        }
        if let Some(secs) = env_u64("CLASSIFLOW_UPLOAD_TIMEOUT_SECS") {
            config.upload_timeout_secs = secs;
        }
        if let Some(mb) = env_u64("CLASSIFLOW_MAX_UPLOAD_MB") {
            config.max_upload_bytes = mb * 1024 * 1024;
        }
        config
    }

    /// Sets the general request timeout, rounded up to whole seconds.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = ceil_secs(timeout);
        self
    }

    /// Sets the upload timeout, rounded up to whole seconds.
    #[must_use]
    pub const fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout_secs = ceil_secs(timeout);
        self
    }

    /// Sets the upload size limit.
    #[must_use]
    pub const fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// The general request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The upload timeout as a [`Duration`].
    #[must_use]
    pub const fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    /// Checks the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for a non-HTTP base URL or a zero
    /// timeout or size limit.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(PipelineError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 || self.upload_timeout_secs == 0 {
            return Err(PipelineError::Config(
                "timeouts must be positive".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(PipelineError::Config(
                "max upload size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

// Timeouts are stored in whole seconds; a nonzero duration must stay
// nonzero through the conversion.
const fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + (duration.subsec_nanos() > 0) as u64
}
