//! Umbrella crate for the minwise similarity experiments.
//!
//! For each dataset the driver builds the exact Jaccard matrix once, then for
//! every target sketch size grows that dataset's permutation pool, regenerates
//! signatures over the whole pool, estimates the matrix from them and scores
//! the estimate against the baseline.

pub use corpus::{
    load_dataset, parse_dataset, CorpusError, Dataset, DocumentId, FeatureVector, LabeledDataset,
};
pub use similarity::{
    build_exact, build_matrix, build_sketch, exact_jaccard, root_sum_squares, sketch_jaccard,
    ErrorValue, SimilarityError, SimilarityInput, SimilarityMatrix, SimilarityMode, ERROR_METRIC,
};
pub use sketch::{
    generate_signatures, EmptyVectorPolicy, Permutation, PermutationPool, Signature, Signatures,
    SketchConfig, SketchError,
};

pub mod config;
mod report;
mod serde_millis;

pub use crate::report::{BaselineRecord, DatasetReport, ExperimentReport, SketchRecord};

use std::error::Error;
use std::fmt;
use std::time::Instant;

use tracing::{info, warn, Level};

/// Sketch sizes used when none are configured.
pub const DEFAULT_K_VALUES: [usize; 5] = [16, 32, 64, 128, 256];

/// Report labels of the two datasets produced by feature extraction.
pub const DEFAULT_DATASET_LABELS: [&str; 2] = ["standard feature vector", "pared feature vector"];

/// Errors that abort an experiment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    InvalidConfig(String),
    LabelCountMismatch { labels: usize, datasets: usize },
    Sketch { dataset: String, source: SketchError },
    Similarity { dataset: String, source: SimilarityError },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::InvalidConfig(msg) => write!(f, "invalid experiment config: {msg}"),
            ExperimentError::LabelCountMismatch { labels, datasets } => write!(
                f,
                "{labels} dataset labels configured for {datasets} datasets"
            ),
            ExperimentError::Sketch { dataset, source } => {
                write!(f, "sketching failed for '{dataset}': {source}")
            }
            ExperimentError::Similarity { dataset, source } => {
                write!(f, "error evaluation failed for '{dataset}': {source}")
            }
        }
    }
}

impl Error for ExperimentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExperimentError::Sketch { source, .. } => Some(source),
            ExperimentError::Similarity { source, .. } => Some(source),
            ExperimentError::InvalidConfig(_) | ExperimentError::LabelCountMismatch { .. } => None,
        }
    }
}

/// Explicit configuration for one experiment run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Target sketch sizes; positive and strictly ascending. May be empty.
    pub k_values: Vec<usize>,
    /// One label per dataset, in presentation order.
    pub dataset_labels: Vec<String>,
    pub sketch: SketchConfig,
}

impl ExperimentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k_values(mut self, k_values: impl Into<Vec<usize>>) -> Self {
        self.k_values = k_values.into();
        self
    }

    pub fn with_dataset_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dataset_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sketch(mut self, sketch: SketchConfig) -> Self {
        self.sketch = sketch;
        self
    }

    pub fn validate(&self) -> Result<(), ExperimentError> {
        if self.k_values.contains(&0) {
            return Err(ExperimentError::InvalidConfig(
                "k_values must be >= 1".to_string(),
            ));
        }
        if self.k_values.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ExperimentError::InvalidConfig(format!(
                "k_values must be strictly ascending (got {:?})",
                self.k_values
            )));
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            k_values: DEFAULT_K_VALUES.to_vec(),
            dataset_labels: DEFAULT_DATASET_LABELS.iter().map(|s| s.to_string()).collect(),
            sketch: SketchConfig::default(),
        }
    }
}

/// Run the experiment over `datasets`, labeled by `cfg.dataset_labels`.
///
/// Datasets are processed one after another, each with its own pool. The first
/// failure aborts the run; no partial report is returned.
pub fn run_experiment(
    datasets: &[Dataset],
    cfg: &ExperimentConfig,
) -> Result<ExperimentReport, ExperimentError> {
    cfg.validate()?;
    if cfg.dataset_labels.len() != datasets.len() {
        return Err(ExperimentError::LabelCountMismatch {
            labels: cfg.dataset_labels.len(),
            datasets: datasets.len(),
        });
    }
    let labeled = cfg
        .dataset_labels
        .iter()
        .map(String::as_str)
        .zip(datasets);
    run_all(labeled, cfg)
}

/// Run the experiment over datasets that carry their own labels.
///
/// `cfg.dataset_labels` is ignored.
pub fn run_labeled_experiment(
    datasets: &[LabeledDataset],
    cfg: &ExperimentConfig,
) -> Result<ExperimentReport, ExperimentError> {
    cfg.validate()?;
    let labeled = datasets.iter().map(|d| (d.label.as_str(), &d.dataset));
    run_all(labeled, cfg)
}

fn run_all<'a, I>(datasets: I, cfg: &ExperimentConfig) -> Result<ExperimentReport, ExperimentError>
where
    I: IntoIterator<Item = (&'a str, &'a Dataset)>,
{
    let mut reports = Vec::new();
    for (index, (label, dataset)) in datasets.into_iter().enumerate() {
        reports.push(run_dataset(label, dataset, index as u64, cfg)?);
    }
    Ok(ExperimentReport::new(reports))
}

/// Baseline plus one row per configured `k` for a single dataset.
///
/// `stream` selects this dataset's RNG stream when a seed is configured.
pub fn run_dataset(
    label: &str,
    dataset: &Dataset,
    stream: u64,
    cfg: &ExperimentConfig,
) -> Result<DatasetReport, ExperimentError> {
    let span = tracing::span!(Level::INFO, "minwise.dataset", dataset = %label);
    let _guard = span.enter();

    let result = run_dataset_inner(label, dataset, stream, cfg);
    if let Err(err) = &result {
        warn!(error = %err, "dataset_aborted");
    }
    result
}

fn run_dataset_inner(
    label: &str,
    dataset: &Dataset,
    stream: u64,
    cfg: &ExperimentConfig,
) -> Result<DatasetReport, ExperimentError> {
    let use_parallel = cfg.sketch.use_parallel;

    let start = Instant::now();
    let baseline = build_exact(dataset, use_parallel);
    let baseline_record = BaselineRecord {
        dataset_label: label.to_string(),
        documents: dataset.len(),
        dimension: dataset.dimension(),
        pairs: baseline.len(),
        elapsed: start.elapsed(),
    };
    info!(
        documents = baseline_record.documents,
        dimension = baseline_record.dimension,
        pairs = baseline_record.pairs,
        elapsed_micros = baseline_record.elapsed.as_micros(),
        "baseline_built"
    );

    let sketch_err = |source: SketchError| ExperimentError::Sketch {
        dataset: label.to_string(),
        source,
    };

    let mut pool = PermutationPool::from_config(dataset.dimension(), &cfg.sketch, stream);
    let mut rows = Vec::with_capacity(cfg.k_values.len());
    for &k in &cfg.k_values {
        pool.ensure(k).map_err(sketch_err)?;

        let start = Instant::now();
        let signatures = generate_signatures(dataset, &pool, &cfg.sketch).map_err(sketch_err)?;
        let estimate = build_sketch(&signatures, use_parallel);
        let elapsed = start.elapsed();

        let error = root_sum_squares(&baseline, &estimate).map_err(|source| {
            ExperimentError::Similarity {
                dataset: label.to_string(),
                source,
            }
        })?;

        info!(
            k,
            permutations = pool.len(),
            elapsed_micros = elapsed.as_micros(),
            error = error.value,
            pairs = error.pairs,
            "sketch_scored"
        );
        rows.push(SketchRecord {
            dataset_label: label.to_string(),
            k,
            permutations: pool.len(),
            elapsed,
            metric: ERROR_METRIC.to_string(),
            error: error.value,
            pairs: error.pairs,
        });
    }

    Ok(DatasetReport {
        baseline: baseline_record,
        rows,
    })
}
