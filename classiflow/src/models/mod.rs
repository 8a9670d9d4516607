//! Typed request and response contracts for the stage services.
//!
//! Field names follow the services' camelCase wire form via serde renames.
//! Payloads the controller does not interpret (sample rows, plot images) are
//! carried as opaque JSON.

mod preprocess;
mod session;
mod split;
mod train;
mod upload;

pub use preprocess::{MissingStrategy, PreprocessReport, PreprocessRequest, ScalingMethod};
pub use session::{HealthReport, ResetAck, SessionState};
pub use split::{SplitReport, SplitRequest};
pub use train::{Metrics, ModelSpec, SvmKernel, TrainingReport};
pub use upload::{ColumnInfo, DataQuality, DatasetFile, UploadReport};

use crate::core::StageId;

/// The parameters of one stage-advance call, tagged by target stage.
///
/// There is no `Results` variant: the results view has no
/// backing service, so an advance targeting it is unrepresentable.
#[derive(Debug, Clone)]
pub enum StageRequest {
    /// Upload a dataset file.
    Upload(DatasetFile),
    /// Prepare features and labels.
    Preprocess(PreprocessRequest),
    /// Partition into train and test sets.
    Split(SplitRequest),
    /// Fit and evaluate a model.
    Train(ModelSpec),
}

impl StageRequest {
    /// The stage this request advances.
    #[must_use]
    pub const fn stage(&self) -> StageId {
        match self {
            Self::Upload(_) => StageId::Upload,
            Self::Preprocess(_) => StageId::Preprocess,
            Self::Split(_) => StageId::Split,
            Self::Train(_) => StageId::Train,
        }
    }
}

/// The successful output of one stage, tagged by producing stage.
///
/// Mirrors [`StageRequest`]: `Results` never produces a report of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum StageReport {
    /// Dataset profile from the upload service.
    Upload(UploadReport),
    /// Feature/label summary from the preprocess service.
    Preprocess(PreprocessReport),
    /// Partition summary from the split service.
    Split(SplitReport),
    /// Metrics and diagnostics from the training service.
    Train(TrainingReport),
}

impl StageReport {
    /// The stage that produced this report.
    #[must_use]
    pub const fn stage(&self) -> StageId {
        match self {
            Self::Upload(_) => StageId::Upload,
            Self::Preprocess(_) => StageId::Preprocess,
            Self::Split(_) => StageId::Split,
            Self::Train(_) => StageId::Train,
        }
    }

    /// The upload profile, if this is an upload report.
    #[must_use]
    pub const fn as_upload(&self) -> Option<&UploadReport> {
        match self {
            Self::Upload(report) => Some(report),
            _ => None,
        }
    }

    /// The preprocess summary, if this is a preprocess report.
    #[must_use]
    pub const fn as_preprocess(&self) -> Option<&PreprocessReport> {
        match self {
            Self::Preprocess(report) => Some(report),
            _ => None,
        }
    }

    /// The split summary, if this is a split report.
    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitReport> {
        match self {
            Self::Split(report) => Some(report),
            _ => None,
        }
    }

    /// The training report, if this is one.
    #[must_use]
    pub const fn as_train(&self) -> Option<&TrainingReport> {
        match self {
            Self::Train(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_and_report_agree_on_stage() {
        let request = StageRequest::Split(SplitRequest::default());
        assert_eq!(request.stage(), StageId::Split);

        let request = StageRequest::Train(ModelSpec::Knn { n_neighbors: 5 });
        assert_eq!(request.stage(), StageId::Train);
    }

    #[test]
    fn report_accessors_match_variant() {
        let report = StageReport::Split(SplitReport::default());
        assert!(report.as_split().is_some());
        assert!(report.as_upload().is_none());
        assert!(report.as_train().is_none());
        assert_eq!(report.stage(), StageId::Split);
    }
}
