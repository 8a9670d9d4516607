//! Split request parameters and partition summary response.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters for the split service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    /// Fraction of rows assigned to the training set, in (0, 1). The
    /// service itself enforces its accepted range and rejects the rest.
    pub split_ratio: f64,
    /// Seed for the partition shuffle.
    pub random_state: i64,
}

impl SplitRequest {
    /// A split with the given train fraction and seed.
    #[must_use]
    pub const fn new(split_ratio: f64, random_state: i64) -> Self {
        Self {
            split_ratio,
            random_state,
        }
    }
}

impl Default for SplitRequest {
    fn default() -> Self {
        Self::new(0.8, 42)
    }
}

/// Response of the split service: the partition summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    /// Service-level success flag.
    pub success: bool,
    /// Rows in the training partition.
    pub train_size: u64,
    /// Rows in the test partition.
    pub test_size: u64,
    /// Rows overall.
    #[serde(default)]
    pub total_size: u64,
    /// The ratio that was applied.
    #[serde(default)]
    pub split_ratio: f64,
    /// Class id -> count in the training partition.
    pub train_distribution: HashMap<String, u64>,
    /// Class id -> count in the test partition.
    pub test_distribution: HashMap<String, u64>,
    /// Encoded class id -> original label.
    #[serde(default)]
    pub class_labels: HashMap<String, String>,
    /// Feature columns carried into the partitions.
    #[serde(default)]
    pub features: Vec<String>,
    /// Convenience count of `features`.
    #[serde(default)]
    pub num_features: u64,
    /// Whether the partition preserved class proportions.
    #[serde(default)]
    pub stratified: bool,
    /// Service warnings, e.g. stratification fallbacks.
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}
