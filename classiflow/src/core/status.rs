//! Derived per-stage status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The derived state of a single stage.
///
/// Status is never stored; it is computed from the slot table. A stage moves
/// `Blocked -> Pending -> Ready`, loops `Ready -> Ready` on a re-run, and
/// falls back out of `Ready` only through upstream invalidation or a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// The predecessor has no result yet; the stage cannot be entered.
    Blocked,
    /// The stage can be run but has no result yet.
    Pending,
    /// The stage has a valid result.
    Ready,
}

impl StageStatus {
    /// Whether the stage has produced a valid result.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Whether the stage may be advanced right now.
    #[must_use]
    pub const fn is_advanceable(self) -> bool {
        matches!(self, Self::Pending | Self::Ready)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked => write!(f, "blocked"),
            Self::Pending => write!(f, "pending"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(StageStatus::Blocked.to_string(), "blocked");
        assert_eq!(StageStatus::Pending.to_string(), "pending");
        assert_eq!(StageStatus::Ready.to_string(), "ready");
    }

    #[test]
    fn ready_and_pending_are_advanceable() {
        assert!(StageStatus::Ready.is_advanceable());
        assert!(StageStatus::Pending.is_advanceable());
        assert!(!StageStatus::Blocked.is_advanceable());
        assert!(StageStatus::Ready.is_ready());
        assert!(!StageStatus::Pending.is_ready());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&StageStatus::Pending).unwrap();
        assert_eq!(json, r#""pending""#);
        let back: StageStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StageStatus::Pending);
    }
}
