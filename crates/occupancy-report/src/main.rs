//! Main entry point for the occupancy report command.

use anyhow::Context;
use occupancy_common::init_logging;
use occupancy_config::ConfigLoader;
use occupancy_report::{CliArgs, CliError, OutputFormat, ReportApp, OUTPUT_ENV};
use std::env;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    init_logging(&config.logging).map_err(|e| CliError::Logging(e.to_string()))?;

    info!("Starting occupancy report");

    let args = CliArgs::parse(env::args().skip(1))?;
    let format = match env::var(OUTPUT_ENV) {
        Ok(value) => value.parse::<OutputFormat>()?,
        Err(_) => OutputFormat::default(),
    };

    match ReportApp::new(config).run(&args, format) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("Report failed: {}", e);
            Err(e.into())
        }
    }
}
