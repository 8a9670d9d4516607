//! Pure derivation of overall pipeline progress.

use super::StageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Overall progress derived from the five-slot table.
///
/// This is the single notion of "how far along is the pipeline": every
/// consumer derives it through [`PipelineProgress::derive`] instead of
/// re-scanning the slots ad hoc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineProgress {
    /// Rank of the furthest stage with a result, scanning from the end
    /// backward; `Train` maps to 5 because `Results` is its view. 1 when the
    /// table is empty.
    pub current_step: u8,
    /// Ranks considered satisfied. Includes 5 whenever 4 is present.
    pub completed_steps: BTreeSet<u8>,
}

impl PipelineProgress {
    /// Derives progress from the presence of each slot, indexed by rank - 1.
    ///
    /// The `Results` slot (index 4) never holds an output of its own; its
    /// completion follows `Train`.
    #[must_use]
    pub fn derive(present: &[bool; 5]) -> Self {
        let mut completed_steps = BTreeSet::new();
        for stage in StageId::ALL {
            if present[usize::from(stage.rank() - 1)] {
                completed_steps.insert(stage.rank());
            }
        }
        let train_done = present[usize::from(StageId::Train.rank() - 1)];
        if train_done {
            completed_steps.insert(StageId::Results.rank());
        }

        let furthest = completed_steps.iter().max().copied();
        let current_step = match furthest {
            Some(rank) => rank,
            None => StageId::Upload.rank(),
        };

        Self {
            current_step,
            completed_steps,
        }
    }

    /// Whether a given rank is satisfied.
    #[must_use]
    pub fn is_completed(&self, stage: StageId) -> bool {
        self.completed_steps.contains(&stage.rank())
    }

    /// Whether every stage is satisfied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed_steps.len() == StageId::ALL.len()
    }
}

impl Default for PipelineProgress {
    fn default() -> Self {
        Self::derive(&[false; 5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn steps(ranks: &[u8]) -> BTreeSet<u8> {
        ranks.iter().copied().collect()
    }

    #[test]
    fn empty_table_is_step_one() {
        let progress = PipelineProgress::derive(&[false; 5]);
        assert_eq!(progress.current_step, 1);
        assert!(progress.completed_steps.is_empty());
        assert!(!progress.is_finished());
    }

    #[test]
    fn three_results_give_step_three() {
        let progress = PipelineProgress::derive(&[true, true, true, false, false]);
        assert_eq!(progress.current_step, 3);
        assert_eq!(progress.completed_steps, steps(&[1, 2, 3]));
    }

    #[test]
    fn train_completes_results_too() {
        let progress = PipelineProgress::derive(&[true, true, true, true, false]);
        assert_eq!(progress.current_step, 5);
        assert_eq!(progress.completed_steps, steps(&[1, 2, 3, 4, 5]));
        assert!(progress.is_finished());
        assert!(progress.is_completed(StageId::Results));
    }

    #[test]
    fn completed_is_the_present_prefix() {
        let progress = PipelineProgress::derive(&[true, true, false, false, false]);
        assert_eq!(progress.current_step, 2);
        assert_eq!(progress.completed_steps, steps(&[1, 2]));
        assert!(!progress.is_completed(StageId::Split));
    }

    #[test]
    fn upload_only() {
        let progress = PipelineProgress::derive(&[true, false, false, false, false]);
        assert_eq!(progress.current_step, 1);
        assert_eq!(progress.completed_steps, steps(&[1]));
    }
}
