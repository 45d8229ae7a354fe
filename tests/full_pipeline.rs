use std::io::Write;

use minwise::config::MinwiseConfig;
use minwise::{
    build_exact, run_experiment, run_labeled_experiment, Dataset, DocumentId, ExperimentConfig,
    ExperimentError, FeatureVector, SketchConfig,
};
use tempfile::NamedTempFile;

fn fv(bits: &[u8]) -> FeatureVector {
    bits.iter().map(|&b| b == 1).collect()
}

fn scenario_dataset() -> Dataset {
    Dataset::from_documents([
        ("d0", fv(&[1, 1, 0, 0])),
        ("d1", fv(&[1, 0, 1, 0])),
        ("d2", fv(&[0, 0, 0, 0])),
    ])
    .expect("scenario dataset")
}

fn wide_dataset(docs: usize, dimension: usize, stride: usize) -> Dataset {
    Dataset::from_documents((0..docs).map(|i| {
        let set: Vec<usize> = (0..dimension).filter(|j| (i + j) % stride == 0).collect();
        (format!("doc-{i:03}"), FeatureVector::from_indices(dimension, &set))
    }))
    .expect("wide dataset")
}

#[test]
fn baseline_scores_for_reference_scenario() {
    let baseline = build_exact(&scenario_dataset(), false);
    let id = |s: &str| DocumentId::from(s);

    let d01 = baseline.get(&id("d0"), &id("d1")).unwrap();
    assert!((d01 - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(baseline.get(&id("d0"), &id("d2")), Some(0.0));
    assert_eq!(baseline.get(&id("d1"), &id("d2")), Some(0.0));
}

#[test]
fn full_experiment_over_two_datasets() -> Result<(), ExperimentError> {
    let standard = wide_dataset(12, 120, 3);
    let pared = wide_dataset(12, 40, 4);
    let cfg = ExperimentConfig::default().with_sketch(SketchConfig::new().with_seed(2024));

    let report = run_experiment(&[standard, pared], &cfg)?;

    assert_eq!(report.metric, "root_sum_squares");
    assert_eq!(report.datasets.len(), 2);
    assert_eq!(
        report.datasets[0].baseline.dataset_label,
        "standard feature vector"
    );
    assert_eq!(report.datasets[1].baseline.dataset_label, "pared feature vector");
    assert_eq!(report.datasets[0].baseline.dimension, 120);
    assert_eq!(report.datasets[1].baseline.dimension, 40);

    for dataset in &report.datasets {
        assert_eq!(dataset.baseline.pairs, 12 * 11 / 2);
        let ks: Vec<usize> = dataset.rows.iter().map(|r| r.k).collect();
        assert_eq!(ks, vec![16, 32, 64, 128, 256]);
        for row in &dataset.rows {
            assert_eq!(row.permutations, row.k);
            assert_eq!(row.pairs, dataset.baseline.pairs);
            assert!(row.error.is_finite() && row.error >= 0.0);
            assert_eq!(row.dataset_label, dataset.baseline.dataset_label);
            assert_eq!(row.metric, report.metric);
        }
    }
    assert_eq!(report.rows().count(), 10);
    Ok(())
}

#[test]
fn empty_k_sequence_yields_baseline_only() -> Result<(), ExperimentError> {
    let cfg = ExperimentConfig::new()
        .with_k_values(Vec::new())
        .with_dataset_labels(["scenario"]);
    let report = run_experiment(&[scenario_dataset()], &cfg)?;

    assert_eq!(report.datasets.len(), 1);
    assert_eq!(report.datasets[0].baseline.pairs, 3);
    assert!(report.datasets[0].rows.is_empty());
    Ok(())
}

#[test]
fn empty_k_sequence_with_zero_dimension_does_not_fail() -> Result<(), ExperimentError> {
    let cfg = ExperimentConfig::new()
        .with_k_values(Vec::new())
        .with_dataset_labels(["empty"]);
    let report = run_experiment(&[Dataset::new()], &cfg)?;
    assert_eq!(report.datasets[0].baseline.documents, 0);
    assert!(report.datasets[0].rows.is_empty());
    Ok(())
}

#[test]
fn config_file_drives_labeled_run() {
    let mut standard = NamedTempFile::new().unwrap();
    standard
        .write_all(
            br#"{"label": "standard feature vector",
                 "documents": {"d0": [1,1,0,0,1,0], "d1": [1,0,1,0,1,1], "d2": [0,0,0,1,0,1]}}"#,
        )
        .unwrap();
    let mut pared = NamedTempFile::new().unwrap();
    pared
        .write_all(br#"{"label": "pared feature vector", "documents": {"d0": [1,0,1,1,0,0,1], "d1": [0,1,1,0,0,1,1]}}"#)
        .unwrap();

    let yaml = format!(
        r#"
version: "1.0"
experiment:
  k_values: [4, 8, 16]
  seed: 7
datasets:
  - path: "{}"
  - path: "{}"
output: "json"
"#,
        standard.path().display(),
        pared.path().display()
    );

    let config = MinwiseConfig::from_yaml(&yaml).unwrap();
    let datasets = config.load_datasets().unwrap();
    let experiment = config.experiment_config(&datasets);
    let report = run_labeled_experiment(&datasets, &experiment).unwrap();

    assert_eq!(report.datasets.len(), 2);
    assert_eq!(report.datasets[0].baseline.dataset_label, "standard feature vector");
    assert_eq!(report.datasets[1].baseline.pairs, 1);
    assert_eq!(report.datasets[1].rows.len(), 3);

    let line = serde_json::to_string(&report.datasets[0].rows[0]).unwrap();
    assert!(line.contains("\"k\":4"));
    assert!(line.contains("\"elapsed_ms\""));
    assert!(line.contains("\"metric\":\"root_sum_squares\""));
}
