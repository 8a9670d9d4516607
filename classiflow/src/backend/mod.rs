//! Stage execution backends.
//!
//! A backend performs the actual work of a stage. The shipped
//! implementation, [`HttpBackend`], talks to the classification service
//! over HTTP. Tests substitute a scripted backend from
//! [`crate::testing`].

mod http;

pub use http::HttpBackend;

use crate::errors::Result;
use crate::models::{
    DatasetFile, HealthReport, ModelSpec, PreprocessReport, PreprocessRequest, ResetAck,
    SplitReport, SplitRequest, TrainingReport, UploadReport,
};
use async_trait::async_trait;

/// Executes stage work on behalf of the controller.
///
/// There is no method for the results stage. Results is a
/// view over the training outcome and performs no work of its own.
#[async_trait]
pub trait StageBackend: Send + Sync {
    /// Ingests a dataset file and profiles its columns.
    async fn upload(&self, file: &DatasetFile) -> Result<UploadReport>;

    /// Cleans and scales the uploaded dataset.
    async fn preprocess(&self, request: &PreprocessRequest) -> Result<PreprocessReport>;

    /// Splits the processed dataset into train and test partitions.
    async fn split(&self, request: &SplitRequest) -> Result<SplitReport>;

    /// Trains a model on the split dataset.
    async fn train(&self, spec: &ModelSpec) -> Result<TrainingReport>;

    /// Discards all server-side session state.
    async fn reset(&self) -> Result<ResetAck>;

    /// Reports backend liveness and which artifacts its session holds.
    async fn health(&self) -> Result<HealthReport>;
}
