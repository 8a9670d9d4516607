//! Upload request payload and dataset profile response.

use serde::{Deserialize, Serialize};

/// A dataset file to be sent to the upload service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    /// Original file name, including extension.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl DatasetFile {
    /// Wraps a file name and its contents.
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// The payload size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Profile of one dataset column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Semantic type detected by the service (`numeric`, `categorical`,
    /// `text`, `datetime`, ...).
    #[serde(rename = "type")]
    pub column_type: String,
    /// Raw storage dtype as reported by the service.
    #[serde(default)]
    pub dtype: Option<String>,
    /// Number of missing values.
    pub null_count: u64,
    /// Missing values as a percentage of rows.
    #[serde(default)]
    pub null_percent: f64,
    /// Number of distinct values.
    pub unique_count: u64,
    /// Whether the column is numeric or numeric-like.
    pub is_numeric: bool,
    /// Whether the column can serve as a feature or target.
    pub is_usable: bool,
    /// A few example values, as opaque JSON.
    #[serde(default)]
    pub sample_values: Vec<serde_json::Value>,
}

/// Dataset-level quality summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    /// Total missing cells.
    pub total_nulls: u64,
    /// Total cells in the dataset.
    pub total_cells: u64,
    /// Percentage of non-missing cells.
    pub completeness: f64,
    /// Count of numeric columns.
    pub numeric_columns: u64,
    /// Count of categorical columns.
    pub categorical_columns: u64,
    /// Count of columns usable for modelling.
    pub usable_columns: u64,
}

/// Response of the upload service: the profiled dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    /// Service-level success flag.
    pub success: bool,
    /// Name of the stored file.
    pub filename: String,
    /// Row count.
    pub rows: u64,
    /// Column count.
    pub columns: u64,
    /// Per-column profiles.
    pub column_info: Vec<ColumnInfo>,
    /// Preview rows, as opaque JSON objects.
    #[serde(default)]
    pub sample_data: Vec<serde_json::Map<String, serde_json::Value>>,
    /// Dataset-level quality summary.
    #[serde(default)]
    pub data_quality: Option<DataQuality>,
}

impl UploadReport {
    /// Names of usable columns other than the given target, in dataset
    /// order. This is the auto-select rule the preprocessing form applies.
    #[must_use]
    pub fn usable_feature_names(&self, target: &str) -> Vec<String> {
        self.column_info
            .iter()
            .filter(|col| col.is_usable && col.name != target)
            .map(|col| col.name.clone())
            .collect()
    }

    /// Looks up a column profile by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.column_info.iter().find(|col| col.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dataset_file_size() {
        let file = DatasetFile::new("iris.csv", b"a,b\n1,2\n".to_vec());
        assert_eq!(file.size_bytes(), 8);
        assert_eq!(file.filename, "iris.csv");
    }

    #[test]
    fn deserializes_service_wire_form() {
        let json = serde_json::json!({
            "success": true,
            "filename": "iris.csv",
            "rows": 150,
            "columns": 5,
            "columnInfo": [
                {
                    "name": "sepal_length",
                    "type": "numeric",
                    "dtype": "float64",
                    "nullCount": 0,
                    "nullPercent": 0.0,
                    "uniqueCount": 35,
                    "isNumeric": true,
                    "isUsable": true,
                    "sampleValues": [5.1, 4.9]
                },
                {
                    "name": "notes",
                    "type": "text",
                    "nullCount": 12,
                    "nullPercent": 8.0,
                    "uniqueCount": 120,
                    "isNumeric": false,
                    "isUsable": false
                }
            ],
            "sampleData": [{"sepal_length": 5.1}],
            "dataQuality": {
                "totalNulls": 12,
                "totalCells": 750,
                "completeness": 98.4,
                "numericColumns": 4,
                "categoricalColumns": 1,
                "usableColumns": 5
            }
        });

        let report: UploadReport = serde_json::from_value(json).unwrap();
        assert!(report.success);
        assert_eq!(report.rows, 150);
        assert_eq!(report.column_info.len(), 2);
        assert_eq!(report.column_info[0].column_type, "numeric");
        assert_eq!(report.column_info[1].dtype, None);
        assert_eq!(report.data_quality.as_ref().unwrap().usable_columns, 5);
        assert_eq!(report.sample_data.len(), 1);
    }

    #[test]
    fn usable_features_exclude_target_and_unusable() {
        let mut report = UploadReport::default();
        for (name, usable) in [("a", true), ("species", true), ("notes", false)] {
            report.column_info.push(ColumnInfo {
                name: name.to_string(),
                is_usable: usable,
                ..ColumnInfo::default()
            });
        }
        assert_eq!(report.usable_feature_names("species"), vec!["a".to_string()]);
        assert!(report.column("notes").is_some());
        assert!(report.column("missing").is_none());
    }
}
