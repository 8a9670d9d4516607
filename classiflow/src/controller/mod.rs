//! The pipeline controller: the single writer of stage state.
//!
//! All mutation goes through [`PipelineController::advance`] and
//! [`PipelineController::reset`]. Both take the state lock for their full
//! duration, backend call included, so concurrent callers queue and each
//! observes the table only between complete operations.

use crate::backend::StageBackend;
use crate::core::{PipelineProgress, StageId, StageStatus};
use crate::errors::{PipelineError, Result};
use crate::events::{EventSink, NoOpEventSink, PipelineEvent};
use crate::models::{
    DatasetFile, HealthReport, ModelSpec, PreprocessReport, PreprocessRequest, ResetAck,
    SplitReport, SplitRequest, StageReport, StageRequest, TrainingReport, UploadReport,
};
use crate::registry::{StageOutcome, StageRegistry};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

/// Identity of one controller session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Random id, minted at construction.
    pub session_id: Uuid,
    /// When the controller was constructed.
    pub started_at: DateTime<Utc>,
}

impl SessionIdentity {
    fn mint() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

/// Drives the five-stage classification workflow against a backend.
pub struct PipelineController {
    backend: Arc<dyn StageBackend>,
    sink: Arc<dyn EventSink>,
    session: SessionIdentity,
    state: Mutex<StageRegistry>,
}

impl PipelineController {
    /// A controller over the given backend, discarding events.
    #[must_use]
    pub fn new(backend: Arc<dyn StageBackend>) -> Self {
        Self::with_event_sink(backend, Arc::new(NoOpEventSink))
    }

    /// A controller that forwards lifecycle events to the given sink.
    #[must_use]
    pub fn with_event_sink(backend: Arc<dyn StageBackend>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            backend,
            sink,
            session: SessionIdentity::mint(),
            state: Mutex::new(StageRegistry::new()),
        }
    }

    /// This controller's session identity.
    #[must_use]
    pub const fn session(&self) -> &SessionIdentity {
        &self.session
    }

    /// Runs one stage and records its result.
    ///
    /// Refuses without issuing any backend call when the stage's
    /// predecessor has no result. On success the result is recorded and
    /// every downstream result is discarded. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Blocked`] for an out-of-order request, otherwise
    /// whatever the backend call produced.
    pub async fn advance(&self, request: StageRequest) -> Result<StageReport> {
        let stage = request.stage();
        let mut state = self.state.lock().await;

        if let Some(missing) = stage.predecessor().filter(|pred| !state.is_present(*pred)) {
            let err = PipelineError::Blocked { stage, missing };
            self.sink.emit(&PipelineEvent::AdvanceFailed {
                stage,
                error: err.to_string(),
            });
            return Err(err);
        }

        self.sink.emit(&PipelineEvent::AdvanceStarted { stage });
        let outcome = match &request {
            StageRequest::Upload(file) => self.backend.upload(file).await.map(StageReport::Upload),
            StageRequest::Preprocess(params) => self
                .backend
                .preprocess(params)
                .await
                .map(StageReport::Preprocess),
            StageRequest::Split(params) => self.backend.split(params).await.map(StageReport::Split),
            StageRequest::Train(spec) => self.backend.train(spec).await.map(StageReport::Train),
        };

        // A recording refusal takes the same failure arm as a backend
        // error, so the event stream never misses a failed advance.
        let recorded = outcome.and_then(|report| {
            state
                .record(report.clone())
                .map(|invalidated| (report, invalidated))
        });
        match recorded {
            Ok((report, invalidated)) => {
                info!(
                    session = %self.session.session_id,
                    %stage,
                    invalidated = invalidated.len(),
                    "stage advanced"
                );
                self.sink.emit(&PipelineEvent::AdvanceSucceeded { stage, invalidated });
                Ok(report)
            }
            Err(err) => {
                warn!(session = %self.session.session_id, %stage, error = %err, "stage advance failed");
                self.sink.emit(&PipelineEvent::AdvanceFailed {
                    stage,
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Uploads a dataset file.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    pub async fn upload(&self, file: DatasetFile) -> Result<UploadReport> {
        match self.advance(StageRequest::Upload(file)).await? {
            StageReport::Upload(report) => Ok(report),
            // advance dispatches on the request variant, so the report
            // variant always matches it.
            _ => unreachable!("upload request produced a non-upload report"),
        }
    }

    /// Preprocesses the uploaded dataset.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    pub async fn preprocess(&self, request: PreprocessRequest) -> Result<PreprocessReport> {
        match self.advance(StageRequest::Preprocess(request)).await? {
            StageReport::Preprocess(report) => Ok(report),
            _ => unreachable!("preprocess request produced a non-preprocess report"),
        }
    }

    /// Splits the processed dataset.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    pub async fn split(&self, request: SplitRequest) -> Result<SplitReport> {
        match self.advance(StageRequest::Split(request)).await? {
            StageReport::Split(report) => Ok(report),
            _ => unreachable!("split request produced a non-split report"),
        }
    }

    /// Trains a model on the split dataset.
    ///
    /// # Errors
    ///
    /// See [`Self::advance`].
    pub async fn train(&self, spec: ModelSpec) -> Result<TrainingReport> {
        match self.advance(StageRequest::Train(spec)).await? {
            StageReport::Train(report) => Ok(report),
            _ => unreachable!("train request produced a non-train report"),
        }
    }

    /// Discards all recorded results, server side first.
    ///
    /// The local table is cleared only after the backend acknowledges, so
    /// a failed reset leaves everything recorded.
    ///
    /// # Errors
    ///
    /// Whatever the backend reset call produced.
    pub async fn reset(&self) -> Result<ResetAck> {
        let mut state = self.state.lock().await;
        match self.backend.reset().await {
            Ok(ack) => {
                state.clear_all();
                info!(session = %self.session.session_id, "session reset");
                self.sink.emit(&PipelineEvent::ResetCompleted);
                Ok(ack)
            }
            Err(err) => {
                warn!(session = %self.session.session_id, error = %err, "session reset failed");
                self.sink.emit(&PipelineEvent::ResetFailed {
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Snapshot of the derived progress.
    pub async fn progress(&self) -> PipelineProgress {
        self.state.lock().await.progress()
    }

    /// Derived status of one stage.
    pub async fn status_of(&self, stage: StageId) -> StageStatus {
        self.state.lock().await.status_of(stage)
    }

    /// The recorded outcome for a stage, if present.
    pub async fn outcome(&self, stage: StageId) -> Option<StageOutcome> {
        self.state.lock().await.outcome(stage).cloned()
    }

    /// Probes backend liveness. Read-only; does not touch the state lock.
    ///
    /// # Errors
    ///
    /// Whatever the backend health call produced.
    pub async fn health(&self) -> Result<HealthReport> {
        self.backend.health().await
    }
}
