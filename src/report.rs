//! Report records emitted by the experiment driver.
//!
//! Records carry raw values only. Turning them into text lines or JSON is the
//! caller's job.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use similarity::ERROR_METRIC;

/// Exact-matrix construction for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaselineRecord {
    pub dataset_label: String,
    pub documents: usize,
    /// Vocabulary size `L`.
    pub dimension: usize,
    /// Number of document pairs in the baseline matrix.
    pub pairs: usize,
    #[serde(rename = "elapsed_ms", with = "crate::serde_millis")]
    pub elapsed: Duration,
}

/// One sketch size `k` for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SketchRecord {
    pub dataset_label: String,
    /// Target sketch size.
    pub k: usize,
    /// Pool size the signatures were built from (never below `k`).
    pub permutations: usize,
    /// Signature generation plus sketch-matrix construction.
    #[serde(rename = "elapsed_ms", with = "crate::serde_millis")]
    pub elapsed: Duration,
    /// Name of the metric in `error`, always [`ERROR_METRIC`].
    pub metric: String,
    /// Root-sum-of-squares error against the baseline; not averaged per pair.
    pub error: f64,
    /// Number of pairs contributing to `error`.
    pub pairs: usize,
}

impl SketchRecord {
    /// Per-pair root-mean-square error derived from `error`.
    pub fn rmse(&self) -> f64 {
        if self.pairs == 0 {
            0.0
        } else {
            self.error / (self.pairs as f64).sqrt()
        }
    }
}

/// Baseline record followed by one row per sketch size, in ascending `k`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetReport {
    pub baseline: BaselineRecord,
    pub rows: Vec<SketchRecord>,
}

/// Every dataset's report, in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentReport {
    /// Name of the error metric in every [`SketchRecord::error`].
    pub metric: String,
    pub datasets: Vec<DatasetReport>,
}

impl ExperimentReport {
    pub fn new(datasets: Vec<DatasetReport>) -> Self {
        Self {
            metric: ERROR_METRIC.to_string(),
            datasets,
        }
    }

    /// All sketch rows across datasets, in emission order.
    pub fn rows(&self) -> impl Iterator<Item = &SketchRecord> {
        self.datasets.iter().flat_map(|report| report.rows.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(error: f64, pairs: usize) -> SketchRecord {
        SketchRecord {
            dataset_label: "standard feature vector".into(),
            k: 16,
            permutations: 16,
            elapsed: Duration::from_millis(12),
            metric: ERROR_METRIC.to_string(),
            error,
            pairs,
        }
    }

    #[test]
    fn rmse_divides_by_root_pair_count() {
        assert!((row(2.0, 4).rmse() - 1.0).abs() < 1e-12);
        assert_eq!(row(0.0, 0).rmse(), 0.0);
    }

    #[test]
    fn sketch_record_serializes_elapsed_as_millis() {
        let json = serde_json::to_value(row(0.25, 3)).unwrap();
        assert_eq!(json["elapsed_ms"], 12);
        assert_eq!(json["k"], 16);
        assert_eq!(json["metric"], "root_sum_squares");
        assert_eq!(json["pairs"], 3);
        let back: SketchRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, row(0.25, 3));
    }

    #[test]
    fn report_names_its_metric() {
        let report = ExperimentReport::new(Vec::new());
        assert_eq!(report.metric, "root_sum_squares");
        assert_eq!(report.rows().count(), 0);
    }
}
