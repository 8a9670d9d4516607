//! Lifecycle events emitted by the controller.
//!
//! Events are fire-and-forget notifications about state transitions.
//! Sinks observe; they cannot veto or reorder anything.

use crate::core::StageId;
use parking_lot::RwLock;
use tracing::{info, warn};

/// A state transition the controller went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// An advance request passed its precondition and is executing.
    AdvanceStarted {
        /// The advancing stage.
        stage: StageId,
    },
    /// An advance finished and its result was recorded.
    AdvanceSucceeded {
        /// The stage that advanced.
        stage: StageId,
        /// Downstream stages whose results were discarded by this advance.
        invalidated: Vec<StageId>,
    },
    /// An advance failed. No state changed.
    AdvanceFailed {
        /// The stage whose advance failed.
        stage: StageId,
        /// Rendered error message.
        error: String,
    },
    /// The session was reset; every recorded result is gone.
    ResetCompleted,
    /// The reset call failed and all recorded results were kept.
    ResetFailed {
        /// Rendered error message.
        error: String,
    },
}

impl PipelineEvent {
    /// Stable dotted name for log routing.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AdvanceStarted { .. } => "stage.advance.started",
            Self::AdvanceSucceeded { .. } => "stage.advance.succeeded",
            Self::AdvanceFailed { .. } => "stage.advance.failed",
            Self::ResetCompleted => "session.reset.completed",
            Self::ResetFailed { .. } => "session.reset.failed",
        }
    }
}

/// Receives controller events.
pub trait EventSink: Send + Sync {
    /// Handles one event. Must not block for long; the controller holds
    /// its state lock while emitting.
    fn emit(&self, event: &PipelineEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn emit(&self, _event: &PipelineEvent) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventSink;

impl EventSink for LoggingEventSink {
    fn emit(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::AdvanceStarted { stage } => {
                info!(event = event.name(), %stage, "stage advance started");
            }
            PipelineEvent::AdvanceSucceeded { stage, invalidated } => {
                info!(
                    event = event.name(),
                    %stage,
                    invalidated = invalidated.len(),
                    "stage advance succeeded"
                );
            }
            PipelineEvent::AdvanceFailed { stage, error } => {
                warn!(event = event.name(), %stage, %error, "stage advance failed");
            }
            PipelineEvent::ResetCompleted => {
                info!(event = event.name(), "session reset");
            }
            PipelineEvent::ResetFailed { error } => {
                warn!(event = event.name(), %error, "session reset failed");
            }
        }
    }
}

/// Buffers events in memory. Test support.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<PipelineEvent>>,
}

impl CollectingEventSink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event seen so far, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.read().clone()
    }

    /// Number of events seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Whether no events have been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Drops all buffered events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl EventSink for CollectingEventSink {
    fn emit(&self, event: &PipelineEvent) {
        self.events.write().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn event_names_are_stable() {
        assert_eq!(
            PipelineEvent::AdvanceStarted {
                stage: StageId::Upload
            }
            .name(),
            "stage.advance.started"
        );
        assert_eq!(PipelineEvent::ResetCompleted.name(), "session.reset.completed");
    }

    #[test]
    fn collecting_sink_preserves_order() {
        let sink = CollectingEventSink::new();
        assert!(sink.is_empty());

        sink.emit(&PipelineEvent::AdvanceStarted {
            stage: StageId::Upload,
        });
        sink.emit(&PipelineEvent::AdvanceSucceeded {
            stage: StageId::Upload,
            invalidated: vec![],
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            PipelineEvent::AdvanceStarted {
                stage: StageId::Upload
            }
        );

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn noop_sink_accepts_everything() {
        NoOpEventSink.emit(&PipelineEvent::ResetFailed {
            error: "connection refused".to_string(),
        });
    }
}
