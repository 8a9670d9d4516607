//! Stage identifiers and their fixed ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five ordered pipeline stages.
///
/// Stages form a strict chain: a stage can only produce a result once its
/// predecessor has one, and replacing a result destroys every result
/// downstream of it. `Results` is special: it has no backing service and no
/// output of its own, it is a read-only view of `Train`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    /// Dataset ingestion and profiling.
    Upload,
    /// Feature and label preparation.
    Preprocess,
    /// Train/test partitioning.
    Split,
    /// Model fitting and evaluation.
    Train,
    /// Results dashboard, a pure view of `Train`.
    Results,
}

impl StageId {
    /// All stages in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Upload,
        Self::Preprocess,
        Self::Split,
        Self::Train,
        Self::Results,
    ];

    /// The 1-based rank defining the total order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Upload => 1,
            Self::Preprocess => 2,
            Self::Split => 3,
            Self::Train => 4,
            Self::Results => 5,
        }
    }

    /// Looks up a stage by rank.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::Upload),
            2 => Some(Self::Preprocess),
            3 => Some(Self::Split),
            4 => Some(Self::Train),
            5 => Some(Self::Results),
            _ => None,
        }
    }

    /// The stage immediately before this one, if any.
    #[must_use]
    pub const fn predecessor(self) -> Option<Self> {
        Self::from_rank(self.rank() - 1)
    }

    /// All stages strictly after this one, in order.
    pub fn downstream(self) -> impl Iterator<Item = Self> {
        ((self.rank() + 1)..=5).filter_map(Self::from_rank)
    }

    /// The API path of the backing service, or `None` for the derived
    /// `Results` view.
    #[must_use]
    pub const fn endpoint(self) -> Option<&'static str> {
        match self {
            Self::Upload => Some("/api/upload"),
            Self::Preprocess => Some("/api/preprocess"),
            Self::Split => Some("/api/split"),
            Self::Train => Some("/api/train"),
            Self::Results => None,
        }
    }

    /// Whether this stage is a derived view with no output of its own.
    #[must_use]
    pub const fn is_view(self) -> bool {
        matches!(self, Self::Results)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::Preprocess => write!(f, "preprocess"),
            Self::Split => write!(f, "split"),
            Self::Train => write!(f, "train"),
            Self::Results => write!(f, "results"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_a_total_order() {
        let ranks: Vec<u8> = StageId::ALL.iter().map(|s| s.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(StageId::Upload < StageId::Preprocess);
        assert!(StageId::Train < StageId::Results);
    }

    #[test]
    fn from_rank_round_trips() {
        for stage in StageId::ALL {
            assert_eq!(StageId::from_rank(stage.rank()), Some(stage));
        }
        assert_eq!(StageId::from_rank(0), None);
        assert_eq!(StageId::from_rank(6), None);
    }

    #[test]
    fn predecessor_chain() {
        assert_eq!(StageId::Upload.predecessor(), None);
        assert_eq!(StageId::Preprocess.predecessor(), Some(StageId::Upload));
        assert_eq!(StageId::Results.predecessor(), Some(StageId::Train));
    }

    #[test]
    fn downstream_of_preprocess() {
        let tail: Vec<StageId> = StageId::Preprocess.downstream().collect();
        assert_eq!(tail, vec![StageId::Split, StageId::Train, StageId::Results]);
        assert_eq!(StageId::Results.downstream().count(), 0);
    }

    #[test]
    fn only_results_is_a_view() {
        assert!(StageId::Results.is_view());
        assert!(StageId::Results.endpoint().is_none());
        for stage in [StageId::Upload, StageId::Preprocess, StageId::Split, StageId::Train] {
            assert!(!stage.is_view());
            assert!(stage.endpoint().is_some());
        }
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&StageId::Preprocess).unwrap();
        assert_eq!(json, r#""preprocess""#);
    }
}
