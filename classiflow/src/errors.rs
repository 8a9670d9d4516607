//! Error taxonomy for pipeline operations.
//!
//! Errors fall into three families: transport (connection or timeout
//! trouble reaching a stage service), domain (the service rejected the
//! request and said why), and precondition (an advance that the slot table
//! forbids). None of them ever mutates recorded stage state.

use crate::core::StageId;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The backend call an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineOp {
    /// An `advance` call for the given stage.
    Advance(StageId),
    /// The session reset call.
    Reset,
    /// The read-only health probe.
    Health,
}

impl fmt::Display for PipelineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advance(stage) => write!(f, "{stage}"),
            Self::Reset => write!(f, "reset"),
            Self::Health => write!(f, "health"),
        }
    }
}

/// The error type for controller and backend operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The service could not be reached. Worth retrying as-is.
    #[error("could not reach the {op} service: {source}")]
    Transport {
        /// The failed call.
        op: PipelineOp,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// The bounded wait for a call elapsed. Distinct from [`Self::Transport`]
    /// so callers can suggest a smaller input instead of a plain retry.
    #[error("the {op} request did not finish within {}s; try a smaller input", limit.as_secs())]
    Timeout {
        /// The timed-out call.
        op: PipelineOp,
        /// The wait that elapsed.
        limit: Duration,
    },

    /// The service rejected the request and reported why.
    #[error("{op} failed: {message}")]
    Service {
        /// The rejected call.
        op: PipelineOp,
        /// The service-provided message.
        message: String,
    },

    /// An advance was requested for a stage whose predecessor has no result.
    /// A correctly wired UI never issues this; the controller refuses it
    /// without touching any slot.
    #[error("cannot advance {stage}: {missing} has no result yet")]
    Blocked {
        /// The stage that was requested.
        stage: StageId,
        /// The predecessor whose result is missing.
        missing: StageId,
    },

    /// A response arrived but did not match the stage contract.
    #[error("could not decode the {op} response: {source}")]
    Decode {
        /// The call whose response was malformed.
        op: PipelineOp,
        /// The deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// The client configuration is unusable (bad base URL, zero timeout).
    #[error("invalid backend configuration: {0}")]
    Config(String),
}

impl PipelineError {
    /// The backend call the error belongs to, if any.
    #[must_use]
    pub const fn op(&self) -> Option<PipelineOp> {
        match self {
            Self::Transport { op, .. }
            | Self::Timeout { op, .. }
            | Self::Service { op, .. }
            | Self::Decode { op, .. } => Some(*op),
            Self::Blocked { stage, .. } => Some(PipelineOp::Advance(*stage)),
            Self::Config(_) => None,
        }
    }

    /// Whether re-issuing the same call might succeed without changing it.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// Whether the error came from the bounded-wait path.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Shorthand for a domain rejection.
    #[must_use]
    pub fn service(op: PipelineOp, message: impl Into<String>) -> Self {
        Self::Service {
            op,
            message: message.into(),
        }
    }
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_names_both_stages() {
        let err = PipelineError::Blocked {
            stage: StageId::Split,
            missing: StageId::Preprocess,
        };
        assert_eq!(
            err.to_string(),
            "cannot advance split: preprocess has no result yet"
        );
        assert_eq!(err.op(), Some(PipelineOp::Advance(StageId::Split)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn timeout_suggests_smaller_input() {
        let err = PipelineError::Timeout {
            op: PipelineOp::Advance(StageId::Upload),
            limit: Duration::from_secs(60),
        };
        assert!(err.to_string().contains("60s"));
        assert!(err.to_string().contains("smaller input"));
        assert!(err.is_timeout());
        assert!(err.is_retryable());
    }

    #[test]
    fn service_carries_the_backend_message() {
        let err = PipelineError::service(
            PipelineOp::Advance(StageId::Preprocess),
            "Target must have at least 2 classes.",
        );
        assert_eq!(
            err.to_string(),
            "preprocess failed: Target must have at least 2 classes."
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn op_display() {
        assert_eq!(PipelineOp::Reset.to_string(), "reset");
        assert_eq!(PipelineOp::Advance(StageId::Train).to_string(), "train");
        assert_eq!(PipelineOp::Health.to_string(), "health");
    }

    #[test]
    fn config_has_no_op() {
        let err = PipelineError::Config("base URL is empty".to_string());
        assert_eq!(err.op(), None);
    }
}
