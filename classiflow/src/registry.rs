//! The five-slot stage-output table.
//!
//! The registry is the single place stage outputs live. Recording a result
//! enforces the dependency order (a stage needs its predecessor's result)
//! and applies the one generic invalidation rule: a new result for rank *k*
//! clears every slot after *k*, whether or not the payload changed.

use crate::core::{PipelineProgress, StageId, StageStatus};
use crate::errors::PipelineError;
use crate::models::StageReport;
use chrono::{DateTime, Utc};

/// A recorded stage result and when it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// The service payload.
    pub report: StageReport,
    /// When the controller accepted it.
    pub recorded_at: DateTime<Utc>,
}

impl StageOutcome {
    fn new(report: StageReport) -> Self {
        Self {
            report,
            recorded_at: Utc::now(),
        }
    }
}

/// Ordered table of the five stage slots, indexed by rank.
///
/// The `Results` slot exists but is never written: the results view derives
/// its readiness from `Train`, so [`StageReport`] has no variant that could
/// land there.
#[derive(Debug, Default)]
pub struct StageRegistry {
    slots: [Option<StageOutcome>; 5],
}

impl StageRegistry {
    /// An empty table: Upload pending, everything else blocked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful stage result and clears every downstream slot.
    ///
    /// Returns the stages that were invalidated. Fails with
    /// [`PipelineError::Blocked`] when the stage's predecessor has no
    /// result, leaving the table untouched.
    pub fn record(&mut self, report: StageReport) -> Result<Vec<StageId>, PipelineError> {
        let stage = report.stage();
        if let Some(missing) = stage.predecessor().filter(|pred| !self.is_present(*pred)) {
            return Err(PipelineError::Blocked { stage, missing });
        }

        self.slots[Self::index(stage)] = Some(StageOutcome::new(report));
        Ok(self.invalidate_downstream(stage))
    }

    /// Clears every slot after the given stage, returning what was cleared.
    pub fn invalidate_downstream(&mut self, stage: StageId) -> Vec<StageId> {
        let mut cleared = Vec::new();
        for later in stage.downstream() {
            if self.slots[Self::index(later)].take().is_some() {
                cleared.push(later);
            }
        }
        cleared
    }

    /// Clears all five slots.
    pub fn clear_all(&mut self) {
        self.slots = Default::default();
    }

    /// The recorded outcome for a stage, if present.
    #[must_use]
    pub fn outcome(&self, stage: StageId) -> Option<&StageOutcome> {
        self.slots[Self::index(stage)].as_ref()
    }

    /// Whether a stage has a recorded output. Always false for `Results`,
    /// which is a view.
    #[must_use]
    pub fn is_present(&self, stage: StageId) -> bool {
        self.slots[Self::index(stage)].is_some()
    }

    /// Derived status of one stage.
    #[must_use]
    pub fn status_of(&self, stage: StageId) -> StageStatus {
        if stage.is_view() {
            return if self.is_present(StageId::Train) {
                StageStatus::Ready
            } else {
                StageStatus::Blocked
            };
        }
        if self.is_present(stage) {
            return StageStatus::Ready;
        }
        match stage.predecessor() {
            None => StageStatus::Pending,
            Some(pred) if self.status_of(pred).is_ready() => StageStatus::Pending,
            Some(_) => StageStatus::Blocked,
        }
    }

    /// Derived overall progress.
    #[must_use]
    pub fn progress(&self) -> PipelineProgress {
        let mut present = [false; 5];
        for stage in StageId::ALL {
            present[Self::index(stage)] = self.is_present(stage);
        }
        PipelineProgress::derive(&present)
    }

    const fn index(stage: StageId) -> usize {
        (stage.rank() - 1) as usize
    }
}
