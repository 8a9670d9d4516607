//! A backend driven by scripted replies.

use crate::backend::StageBackend;
use crate::core::StageId;
use crate::errors::{PipelineError, PipelineOp, Result};
use crate::models::{
    DatasetFile, HealthReport, ModelSpec, PreprocessReport, PreprocessRequest, ResetAck,
    SplitReport, SplitRequest, TrainingReport, UploadReport,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// A [`StageBackend`] that pops pre-scripted replies per call.
///
/// Each call pops the oldest reply scripted for it and records the call
/// in an inspectable log. A call with no scripted reply left yields a
/// service error, so tests notice unexpected traffic. An optional reply
/// delay keeps each call in flight for a while, for tests that need to
/// overlap operations.
#[derive(Default)]
pub struct ScriptedBackend {
    upload_replies: Mutex<VecDeque<Result<UploadReport>>>,
    preprocess_replies: Mutex<VecDeque<Result<PreprocessReport>>>,
    split_replies: Mutex<VecDeque<Result<SplitReport>>>,
    train_replies: Mutex<VecDeque<Result<TrainingReport>>>,
    reset_replies: Mutex<VecDeque<Result<ResetAck>>>,
    health_replies: Mutex<VecDeque<Result<HealthReport>>>,
    reply_delay: Option<Duration>,
    calls: Mutex<Vec<PipelineOp>>,
}

impl ScriptedBackend {
    /// A backend with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful upload reply.
    #[must_use]
    pub fn expect_upload(self, report: UploadReport) -> Self {
        self.upload_replies.lock().push_back(Ok(report));
        self
    }

    /// Scripts a failed upload.
    #[must_use]
    pub fn fail_upload(self, error: PipelineError) -> Self {
        self.upload_replies.lock().push_back(Err(error));
        self
    }

    /// Scripts a successful preprocess reply.
    #[must_use]
    pub fn expect_preprocess(self, report: PreprocessReport) -> Self {
        self.preprocess_replies.lock().push_back(Ok(report));
        self
    }

    /// Scripts a failed preprocess.
    #[must_use]
    pub fn fail_preprocess(self, error: PipelineError) -> Self {
        self.preprocess_replies.lock().push_back(Err(error));
        self
    }

    /// Scripts a successful split reply.
    #[must_use]
    pub fn expect_split(self, report: SplitReport) -> Self {
        self.split_replies.lock().push_back(Ok(report));
        self
    }

    /// Scripts a failed split.
    #[must_use]
    pub fn fail_split(self, error: PipelineError) -> Self {
        self.split_replies.lock().push_back(Err(error));
        self
    }

    /// Scripts a successful training reply.
    #[must_use]
    pub fn expect_train(self, report: TrainingReport) -> Self {
        self.train_replies.lock().push_back(Ok(report));
        self
    }

    /// Scripts a failed training run.
    #[must_use]
    pub fn fail_train(self, error: PipelineError) -> Self {
        self.train_replies.lock().push_back(Err(error));
        self
    }

    /// Scripts a successful reset.
    #[must_use]
    pub fn expect_reset(self, ack: ResetAck) -> Self {
        self.reset_replies.lock().push_back(Ok(ack));
        self
    }

    /// Scripts a failed reset.
    #[must_use]
    pub fn fail_reset(self, error: PipelineError) -> Self {
        self.reset_replies.lock().push_back(Err(error));
        self
    }

    /// Scripts a health reply.
    #[must_use]
    pub fn expect_health(self, report: HealthReport) -> Self {
        self.health_replies.lock().push_back(Ok(report));
        self
    }

    /// Keeps every call in flight for the given duration before it
    /// resolves.
    #[must_use]
    pub const fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = Some(delay);
        self
    }

    /// The calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<PipelineOp> {
        self.calls.lock().clone()
    }

    async fn pop<T>(&self, op: PipelineOp, queue: &Mutex<VecDeque<Result<T>>>) -> Result<T> {
        self.calls.lock().push(op);
        if let Some(delay) = self.reply_delay {
            tokio::time::sleep(delay).await;
        }
        queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(PipelineError::service(op, "no scripted reply")))
    }
}

#[async_trait]
impl StageBackend for ScriptedBackend {
    async fn upload(&self, _file: &DatasetFile) -> Result<UploadReport> {
        self.pop(PipelineOp::Advance(StageId::Upload), &self.upload_replies)
            .await
    }

    async fn preprocess(&self, _request: &PreprocessRequest) -> Result<PreprocessReport> {
        self.pop(
            PipelineOp::Advance(StageId::Preprocess),
            &self.preprocess_replies,
        )
        .await
    }

    async fn split(&self, _request: &SplitRequest) -> Result<SplitReport> {
        self.pop(PipelineOp::Advance(StageId::Split), &self.split_replies)
            .await
    }

    async fn train(&self, _spec: &ModelSpec) -> Result<TrainingReport> {
        self.pop(PipelineOp::Advance(StageId::Train), &self.train_replies)
            .await
    }

    async fn reset(&self) -> Result<ResetAck> {
        self.pop(PipelineOp::Reset, &self.reset_replies).await
    }

    async fn health(&self) -> Result<HealthReport> {
        self.pop(PipelineOp::Health, &self.health_replies).await
    }
}
