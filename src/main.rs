// src/main.rs

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tcg_metrics_exporter::config::Config;
use tcg_metrics_exporter::db::accessors::PostgresWarehouse;
use tcg_metrics_exporter::export::exporter::run_export;
use tcg_metrics_exporter::queries::export_jobs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the JSON documents are written to.
    #[arg(long, default_value = "static/data")]
    output_dir: PathBuf,
    /// Override the dataset name taken from the environment.
    #[arg(long)]
    dataset: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ERROR: {err}");
            process::exit(1);
        }
    };
    if let Some(dataset) = args.dataset {
        config.dataset = dataset;
    }

    info!("--- Warehouse Metrics Export ---");
    info!("Project: {}", config.project_id);
    info!("Dataset: {}", config.dataset);
    info!("Connection: [REDACTED]");
    info!("Output directory: {}", args.output_dir.display());

    let warehouse = PostgresWarehouse::connect(&config.dsn).await?;
    let jobs = export_jobs(&config.project_id, &config.dataset);
    run_export(&warehouse, &jobs, &args.output_dir).await?;

    info!("Export completed successfully");
    Ok(())
}
