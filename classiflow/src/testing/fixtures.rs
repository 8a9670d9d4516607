//! Canned stage reports modelled on an Iris-sized dataset.

use crate::models::{
    ColumnInfo, DataQuality, DatasetFile, HealthReport, Metrics, PreprocessReport, ResetAck,
    SessionState, SplitReport, TrainingReport, UploadReport,
};
use std::collections::HashMap;

/// A small in-memory CSV file.
#[must_use]
pub fn dataset_file() -> DatasetFile {
    DatasetFile::new(
        "iris.csv",
        b"sepal_length,sepal_width,species\n5.1,3.5,setosa\n6.4,3.2,versicolor\n".to_vec(),
    )
}

/// A successful upload profile with two numeric features and a target.
#[must_use]
pub fn upload_report() -> UploadReport {
    let numeric = |name: &str, unique: u64| ColumnInfo {
        name: name.to_string(),
        column_type: "numeric".to_string(),
        dtype: Some("float64".to_string()),
        null_count: 0,
        null_percent: 0.0,
        unique_count: unique,
        is_numeric: true,
        is_usable: true,
        sample_values: Vec::new(),
    };
    UploadReport {
        success: true,
        filename: "iris.csv".to_string(),
        rows: 150,
        columns: 3,
        column_info: vec![
            numeric("sepal_length", 35),
            numeric("sepal_width", 23),
            ColumnInfo {
                name: "species".to_string(),
                column_type: "categorical".to_string(),
                dtype: Some("object".to_string()),
                null_count: 0,
                null_percent: 0.0,
                unique_count: 3,
                is_numeric: false,
                is_usable: true,
                sample_values: Vec::new(),
            },
        ],
        sample_data: Vec::new(),
        data_quality: Some(DataQuality {
            total_nulls: 0,
            total_cells: 450,
            completeness: 100.0,
            numeric_columns: 2,
            categorical_columns: 1,
            usable_columns: 3,
        }),
    }
}

/// A successful preprocess summary over the [`upload_report`] dataset.
#[must_use]
pub fn preprocess_report() -> PreprocessReport {
    PreprocessReport {
        success: true,
        rows_after_processing: 150,
        rows_removed: 0,
        features_used: vec!["sepal_length".to_string(), "sepal_width".to_string()],
        features_count: 2,
        target_column: "species".to_string(),
        class_distribution: HashMap::from([
            ("0".to_string(), 50),
            ("1".to_string(), 50),
            ("2".to_string(), 50),
        ]),
        class_labels: HashMap::from([
            ("0".to_string(), "setosa".to_string()),
            ("1".to_string(), "versicolor".to_string()),
            ("2".to_string(), "virginica".to_string()),
        ]),
        num_classes: 3,
        min_class_count: 50,
        is_balanced: true,
        ..PreprocessReport::default()
    }
}

/// A successful stratified 80/20 split.
#[must_use]
pub fn split_report() -> SplitReport {
    SplitReport {
        success: true,
        train_size: 120,
        test_size: 30,
        total_size: 150,
        split_ratio: 0.8,
        train_distribution: HashMap::from([
            ("0".to_string(), 40),
            ("1".to_string(), 40),
            ("2".to_string(), 40),
        ]),
        test_distribution: HashMap::from([
            ("0".to_string(), 10),
            ("1".to_string(), 10),
            ("2".to_string(), 10),
        ]),
        class_labels: HashMap::from([
            ("0".to_string(), "setosa".to_string()),
            ("1".to_string(), "versicolor".to_string()),
            ("2".to_string(), "virginica".to_string()),
        ]),
        features: vec!["sepal_length".to_string(), "sepal_width".to_string()],
        num_features: 2,
        stratified: true,
        warnings: None,
    }
}

/// A successful random-forest training run.
#[must_use]
pub fn training_report() -> TrainingReport {
    TrainingReport {
        success: true,
        model_type: "random_forest".to_string(),
        model_display_name: "Random Forest".to_string(),
        metrics: Metrics {
            test_accuracy: 0.9667,
            train_accuracy: 1.0,
            precision: 0.9672,
            recall: 0.9667,
            f1_score: 0.9666,
            cv_mean: Some(0.95),
            cv_std: Some(0.02),
        },
        confusion_matrix: vec![vec![10, 0, 0], vec![0, 9, 1], vec![0, 0, 10]],
        class_labels: vec![
            "setosa".to_string(),
            "versicolor".to_string(),
            "virginica".to_string(),
        ],
        feature_importance: Some(HashMap::from([
            ("sepal_length".to_string(), 0.62),
            ("sepal_width".to_string(), 0.38),
        ])),
        num_classes: 3,
        train_samples: 120,
        test_samples: 30,
        num_features: 2,
        ..TrainingReport::default()
    }
}

/// A successful reset acknowledgement.
#[must_use]
pub fn reset_ack() -> ResetAck {
    ResetAck {
        success: true,
        message: Some("Session reset successfully".to_string()),
    }
}

/// A healthy service holding no artifacts.
#[must_use]
pub fn health_report() -> HealthReport {
    HealthReport {
        status: "healthy".to_string(),
        session_state: SessionState::default(),
    }
}
