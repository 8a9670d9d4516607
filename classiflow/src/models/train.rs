//! Model selection, per-model hyperparameters, and the training report.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kernel choice for the SVM model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvmKernel {
    /// Linear decision boundary.
    Linear,
    /// Radial basis function, the service default.
    #[default]
    Rbf,
    /// Polynomial boundary.
    Poly,
}

impl fmt::Display for SvmKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Rbf => write!(f, "rbf"),
            Self::Poly => write!(f, "poly"),
        }
    }
}

/// Model choice with its own parameter set.
///
/// One variant per supported model type, each carrying only the parameters
/// that model accepts, so a request can never smuggle irrelevant fields.
/// Serializes to the service wire form
/// `{"modelType": "...", "params": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType", content = "params", rename_all = "snake_case")]
pub enum ModelSpec {
    /// Linear model with L2 regularization.
    #[serde(rename_all = "camelCase")]
    LogisticRegression {
        /// Solver iteration cap.
        max_iter: u32,
        /// Inverse regularization strength.
        #[serde(rename = "C")]
        c: f64,
    },
    /// Single decision tree.
    #[serde(rename_all = "camelCase")]
    DecisionTree {
        /// Depth cap; `None` lets the tree grow freely.
        max_depth: Option<u32>,
        /// Minimum samples required to split a node.
        min_samples_split: u32,
    },
    /// Bagged ensemble of decision trees.
    #[serde(rename_all = "camelCase")]
    RandomForest {
        /// Number of trees.
        n_estimators: u32,
        /// Depth cap per tree; `None` for unbounded.
        max_depth: Option<u32>,
    },
    /// Boosted ensemble of shallow trees.
    #[serde(rename_all = "camelCase")]
    GradientBoosting {
        /// Number of boosting rounds.
        n_estimators: u32,
        /// Shrinkage applied per round.
        learning_rate: f64,
    },
    /// Support vector machine.
    #[serde(rename_all = "camelCase")]
    Svm {
        /// Regularization strength.
        #[serde(rename = "C")]
        c: f64,
        /// Kernel function.
        kernel: SvmKernel,
    },
    /// K-nearest neighbors.
    #[serde(rename_all = "camelCase")]
    Knn {
        /// Neighborhood size.
        n_neighbors: u32,
    },
}

impl ModelSpec {
    /// The wire identifier of the model type.
    #[must_use]
    pub const fn model_type(&self) -> &'static str {
        match self {
            Self::LogisticRegression { .. } => "logistic_regression",
            Self::DecisionTree { .. } => "decision_tree",
            Self::RandomForest { .. } => "random_forest",
            Self::GradientBoosting { .. } => "gradient_boosting",
            Self::Svm { .. } => "svm",
            Self::Knn { .. } => "knn",
        }
    }

    /// Human-readable model name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::LogisticRegression { .. } => "Logistic Regression",
            Self::DecisionTree { .. } => "Decision Tree",
            Self::RandomForest { .. } => "Random Forest",
            Self::GradientBoosting { .. } => "Gradient Boosting",
            Self::Svm { .. } => "Support Vector Machine",
            Self::Knn { .. } => "K-Nearest Neighbors",
        }
    }

    /// Logistic regression with the service defaults.
    #[must_use]
    pub const fn logistic_regression() -> Self {
        Self::LogisticRegression {
            max_iter: 1000,
            c: 1.0,
        }
    }

    /// Random forest with the service defaults.
    #[must_use]
    pub const fn random_forest() -> Self {
        Self::RandomForest {
            n_estimators: 100,
            max_depth: None,
        }
    }
}

/// Evaluation metrics reported by the training service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Accuracy on the held-out test partition.
    pub test_accuracy: f64,
    /// Accuracy on the training partition.
    pub train_accuracy: f64,
    /// Precision (positive class for binary, weighted otherwise).
    pub precision: f64,
    /// Recall (positive class for binary, weighted otherwise).
    pub recall: f64,
    /// F1 score.
    pub f1_score: f64,
    /// Mean cross-validation accuracy, when the service ran CV.
    #[serde(default)]
    pub cv_mean: Option<f64>,
    /// Cross-validation accuracy spread.
    #[serde(default)]
    pub cv_std: Option<f64>,
}

impl Metrics {
    /// Train-minus-test accuracy; a large gap hints at overfitting.
    #[must_use]
    pub fn generalization_gap(&self) -> f64 {
        self.train_accuracy - self.test_accuracy
    }
}

/// Response of the training service: metrics and model diagnostics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    /// Service-level success flag.
    pub success: bool,
    /// Wire identifier of the trained model.
    pub model_type: String,
    /// Human-readable model name.
    #[serde(default)]
    pub model_display_name: String,
    /// Evaluation metrics.
    pub metrics: Metrics,
    /// Confusion matrix, rows = actual, columns = predicted.
    #[serde(default)]
    pub confusion_matrix: Vec<Vec<u64>>,
    /// Class labels in confusion-matrix order.
    #[serde(default)]
    pub class_labels: Vec<String>,
    /// Feature name -> importance, for tree-based models.
    #[serde(default)]
    pub feature_importance: Option<HashMap<String, f64>>,
    /// Feature name -> coefficient, for linear models.
    #[serde(default)]
    pub coefficients: Option<HashMap<String, f64>>,
    /// Base64 PNG of the confusion matrix, consumed opaquely.
    #[serde(default)]
    pub confusion_matrix_image: Option<String>,
    /// Base64 PNG of feature importances, consumed opaquely.
    #[serde(default)]
    pub feature_importance_image: Option<String>,
    /// Base64 PNG of coefficients, consumed opaquely.
    #[serde(default)]
    pub coefficients_image: Option<String>,
    /// Number of classes seen in training.
    #[serde(default)]
    pub num_classes: u64,
    /// Training partition size.
    #[serde(default)]
    pub train_samples: u64,
    /// Test partition size.
    #[serde(default)]
    pub test_samples: u64,
    /// Number of features the model consumed.
    #[serde(default)]
    pub num_features: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn logistic_regression_wire_form() {
        let spec = ModelSpec::logistic_regression();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "modelType": "logistic_regression",
                "params": {"maxIter": 1000, "C": 1.0}
            })
        );
    }

    #[test]
    fn null_max_depth_is_preserved() {
        let spec = ModelSpec::random_forest();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "modelType": "random_forest",
                "params": {"nEstimators": 100, "maxDepth": null}
            })
        );
    }

    #[test]
    fn svm_uses_capital_c_and_kernel_name() {
        let spec = ModelSpec::Svm {
            c: 10.0,
            kernel: SvmKernel::Poly,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "modelType": "svm",
                "params": {"C": 10.0, "kernel": "poly"}
            })
        );
    }

    #[test]
    fn every_variant_has_a_stable_type_tag() {
        let specs = [
            ModelSpec::logistic_regression(),
            ModelSpec::DecisionTree {
                max_depth: Some(5),
                min_samples_split: 2,
            },
            ModelSpec::random_forest(),
            ModelSpec::GradientBoosting {
                n_estimators: 100,
                learning_rate: 0.1,
            },
            ModelSpec::Svm {
                c: 1.0,
                kernel: SvmKernel::Rbf,
            },
            ModelSpec::Knn { n_neighbors: 5 },
        ];
        let tags: Vec<&str> = specs.iter().map(ModelSpec::model_type).collect();
        assert_eq!(
            tags,
            vec![
                "logistic_regression",
                "decision_tree",
                "random_forest",
                "gradient_boosting",
                "svm",
                "knn"
            ]
        );
        for spec in &specs {
            let json = serde_json::to_value(spec).unwrap();
            assert_eq!(json["modelType"], spec.model_type());
            let back: ModelSpec = serde_json::from_value(json).unwrap();
            assert_eq!(&back, spec);
        }
    }

    #[test]
    fn deserializes_training_report() {
        let json = serde_json::json!({
            "success": true,
            "modelType": "random_forest",
            "modelDisplayName": "Random Forest",
            "metrics": {
                "trainAccuracy": 1.0,
                "testAccuracy": 0.9667,
                "precision": 0.9672,
                "recall": 0.9667,
                "f1Score": 0.9666,
                "cvMean": 0.95,
                "cvStd": 0.02
            },
            "confusionMatrix": [[10, 0], [1, 9]],
            "classLabels": ["no", "yes"],
            "featureImportance": {"a": 0.7, "b": 0.3},
            "numClasses": 2,
            "trainSamples": 120,
            "testSamples": 30,
            "numFeatures": 2
        });

        let report: TrainingReport = serde_json::from_value(json).unwrap();
        assert_eq!(report.model_type, "random_forest");
        assert_eq!(report.metrics.cv_mean, Some(0.95));
        assert!(report.metrics.generalization_gap() > 0.03);
        assert_eq!(report.confusion_matrix[1][0], 1);
        assert_eq!(report.coefficients, None);
        assert_eq!(report.confusion_matrix_image, None);
    }
}
