//! Mind Color Map - terminal entry point.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::Result;
use clap::Parser;
use mindcolor_common::logging::init_logging;
use mindcolor_common::Config;
use mindcolor_oracle::GeminiOracle;

mod app;
mod render;

/// Numerology analysis at the terminal: intake, oracle, report.
#[derive(Parser, Debug)]
#[command(name = "mindcolor")]
#[command(version = "0.1.0")]
#[command(about = "Decode your mind color map.", long_about = None)]
struct Cli {
    /// Generation model to consult
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature (0.0 - 1.0)
    #[arg(long)]
    temperature: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then let flags override it
    let mut config = Config::load()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.observability.log_format = format;
    }
    config.validate()?;

    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!(model = %config.model, "Mind Color Map v{}", env!("CARGO_PKG_VERSION"));

    let oracle = GeminiOracle::new(
        config.api_keys.google.as_deref(),
        config.model.clone(),
        config.temperature,
    );

    app::run(&oracle).await
}
