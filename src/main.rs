use std::env;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use minwise::config::{MinwiseConfig, OutputFormat};
use minwise::{run_labeled_experiment, ExperimentReport};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut config = match env::args().nth(1) {
        Some(path) => MinwiseConfig::from_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => MinwiseConfig::default(),
    };
    apply_env_overrides(&mut config)?;

    if config.datasets.is_empty() {
        bail!("no datasets configured; usage: minwise <config.yaml>");
    }

    let datasets = config.load_datasets()?;
    let experiment = config.experiment_config(&datasets);
    let report = run_labeled_experiment(&datasets, &experiment)?;

    match config.output {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

fn init_tracing() {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr);

    if env::var("MINWISE_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn apply_env_overrides(config: &mut MinwiseConfig) -> anyhow::Result<()> {
    if let Ok(seed) = env::var("MINWISE_SEED") {
        let seed = seed
            .parse::<u64>()
            .with_context(|| format!("MINWISE_SEED must be an unsigned integer (got {seed:?})"))?;
        config.experiment.seed = Some(seed);
    }
    if let Ok(flag) = env::var("MINWISE_PARALLEL") {
        config.experiment.use_parallel = matches!(flag.as_str(), "1" | "true" | "yes");
    }
    Ok(())
}

fn print_text(report: &ExperimentReport) {
    for dataset in &report.datasets {
        let baseline = &dataset.baseline;
        println!(
            "Generated baseline matrix for {} ({} documents, {} features) in {:.3} seconds",
            baseline.dataset_label,
            baseline.documents,
            baseline.dimension,
            baseline.elapsed.as_secs_f64()
        );
        for row in &dataset.rows {
            println!(
                "{} k={}: root-sum-of-squares error {:.6} over {} pairs (per-pair rmse {:.6}) in {:.3} seconds",
                row.dataset_label,
                row.k,
                row.error,
                row.pairs,
                row.rmse(),
                row.elapsed.as_secs_f64()
            );
        }
    }
}

fn print_json(report: &ExperimentReport) -> anyhow::Result<()> {
    for dataset in &report.datasets {
        println!("{}", serde_json::to_string(&dataset.baseline)?);
        for row in &dataset.rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}
