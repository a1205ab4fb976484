use std::env;
use std::error::Error;
use std::process::ExitCode;

use reeldex::{run_pipeline, NoDetailFetcher, NoFilmDetails, PipelineConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "config_load_failed");
            return ExitCode::FAILURE;
        }
    };

    // Offline run: no detail fetcher or film lookup wired in, so enrichment
    // resumes from the checkpoint and film details fall back.
    match run_pipeline(&config, &NoDetailFetcher, &NoFilmDetails) {
        Ok(summary) => {
            println!(
                "pipeline complete: {} records ({} inactive) across {} dataset files",
                summary.emitted, summary.inactive, summary.dataset_files
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "pipeline_failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<PipelineConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => Ok(PipelineConfig::from_file(path)?),
        None => Ok(PipelineConfig::default()),
    }
}
