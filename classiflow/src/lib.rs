//! # Classiflow
//!
//! A client-side state machine for a guided classification workflow.
//!
//! Classiflow drives a dataset through five ordered stages against an
//! HTTP classification service:
//!
//! - **Upload**: ingest a CSV file and profile its columns
//! - **Preprocess**: clean, scale and encode features and target
//! - **Split**: partition into train and test sets, stratified
//! - **Train**: fit a model and collect its evaluation metrics
//! - **Results**: a read-only view over the training outcome
//!
//! The controller enforces stage order, discards downstream results when
//! an earlier stage reruns, and serializes all mutation so state is only
//! ever observed between complete operations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use classiflow::prelude::*;
//! use std::sync::Arc;
//!
//! let backend = Arc::new(HttpBackend::new(BackendConfig::from_env())?);
//! let controller = PipelineController::new(backend);
//!
//! controller.upload(DatasetFile::new("iris.csv", bytes)).await?;
//! controller.preprocess(PreprocessRequest::auto("species")).await?;
//! controller.split(SplitRequest::default()).await?;
//! let report = controller.train(ModelSpec::random_forest()).await?;
//! println!("test accuracy {}", report.metrics.test_accuracy);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod backend;
pub mod config;
pub mod controller;
pub mod core;
pub mod errors;
pub mod events;
pub mod models;
pub mod observability;
pub mod registry;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::backend::{HttpBackend, StageBackend};
    pub use crate::config::BackendConfig;
    pub use crate::controller::{PipelineController, SessionIdentity};
    pub use crate::core::{PipelineProgress, StageId, StageStatus};
    pub use crate::errors::{PipelineError, PipelineOp, Result};
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, PipelineEvent,
    };
    pub use crate::models::{
        DatasetFile, HealthReport, MissingStrategy, ModelSpec, PreprocessReport,
        PreprocessRequest, ResetAck, ScalingMethod, SessionState, SplitReport, SplitRequest,
        StageReport, StageRequest, SvmKernel, TrainingReport, UploadReport,
    };
    pub use crate::registry::{StageOutcome, StageRegistry};
}
