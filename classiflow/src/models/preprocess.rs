//! Preprocess request parameters and feature/label summary response.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Feature scaling applied by the preprocess service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMethod {
    /// Zero mean, unit variance.
    #[default]
    Standard,
    /// Scale to the [0, 1] range.
    Minmax,
    /// Median and IQR based, outlier tolerant.
    Robust,
    /// Leave features unscaled.
    None,
}

impl fmt::Display for ScalingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Minmax => write!(f, "minmax"),
            Self::Robust => write!(f, "robust"),
            Self::None => write!(f, "none"),
        }
    }
}

/// How the preprocess service fills or drops missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingStrategy {
    /// Let the service pick per column type.
    #[default]
    Auto,
    /// Fill with the column mean.
    Mean,
    /// Fill with the column median.
    Median,
    /// Fill with the most frequent value.
    Mode,
    /// Fill with zero.
    Zero,
    /// Drop rows with missing values.
    Drop,
}

impl fmt::Display for MissingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Mean => write!(f, "mean"),
            Self::Median => write!(f, "median"),
            Self::Mode => write!(f, "mode"),
            Self::Zero => write!(f, "zero"),
            Self::Drop => write!(f, "drop"),
        }
    }
}

/// Parameters for the preprocess service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessRequest {
    /// Feature scaling method.
    pub scaling_method: ScalingMethod,
    /// Missing-value strategy.
    pub handle_missing: MissingStrategy,
    /// Column holding the class label.
    pub target_column: String,
    /// Explicit feature selection; empty when auto-selecting.
    pub selected_features: Vec<String>,
    /// Let the service pick usable feature columns itself.
    pub auto_select: bool,
}

impl PreprocessRequest {
    /// A request that auto-selects features for the given target column.
    #[must_use]
    pub fn auto(target_column: impl Into<String>) -> Self {
        Self {
            scaling_method: ScalingMethod::default(),
            handle_missing: MissingStrategy::default(),
            target_column: target_column.into(),
            selected_features: Vec::new(),
            auto_select: true,
        }
    }

    /// Switches to an explicit feature list.
    #[must_use]
    pub fn with_features(mut self, features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.selected_features = features.into_iter().map(Into::into).collect();
        self.auto_select = false;
        self
    }

    /// Sets the scaling method.
    #[must_use]
    pub const fn with_scaling(mut self, method: ScalingMethod) -> Self {
        self.scaling_method = method;
        self
    }

    /// Sets the missing-value strategy.
    #[must_use]
    pub const fn with_missing(mut self, strategy: MissingStrategy) -> Self {
        self.handle_missing = strategy;
        self
    }
}

/// Response of the preprocess service: the prepared feature/label summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessReport {
    /// Service-level success flag.
    pub success: bool,
    /// Scaling that was applied.
    #[serde(default)]
    pub scaling_method: ScalingMethod,
    /// Missing-value strategy that was applied.
    #[serde(default)]
    pub handle_missing: MissingStrategy,
    /// Rows remaining after cleaning.
    pub rows_after_processing: u64,
    /// Rows dropped during cleaning.
    #[serde(default)]
    pub rows_removed: u64,
    /// Feature columns that survived preparation.
    pub features_used: Vec<String>,
    /// Convenience count of `features_used`.
    #[serde(default)]
    pub features_count: u64,
    /// The resolved target column.
    #[serde(default)]
    pub target_column: String,
    /// Encoded class id -> sample count.
    pub class_distribution: HashMap<String, u64>,
    /// Encoded class id -> original label.
    #[serde(default)]
    pub class_labels: HashMap<String, String>,
    /// Number of distinct classes.
    pub num_classes: u64,
    /// Size of the smallest class.
    #[serde(default)]
    pub min_class_count: u64,
    /// Whether the class ratio is within the service's balance threshold.
    #[serde(default)]
    pub is_balanced: bool,
    /// Preview rows of the prepared frame, as opaque JSON objects.
    #[serde(default)]
    pub sample_data: Vec<serde_json::Map<String, serde_json::Value>>,
}
