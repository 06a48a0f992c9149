//! Argument handling, input loading and report rendering.

use crate::error::{CliError, CliResult};
use occupancy_common::{Reservation, SiteNight};
use occupancy_config::{Config, ReportConfig};
use occupancy_engine::ReportEngine;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Environment variable selecting the output format.
pub const OUTPUT_ENV: &str = "OCCUPANCY_OUTPUT";

/// Usage line printed on bad arguments.
pub const USAGE: &str = "usage: occupancy-report <facts.json> [reservations.json]";

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The full report as pretty JSON.
    #[default]
    Json,
    /// The per-site table as CSV.
    Csv,
    /// File name, table CSV and, when configured, chart series as JSON.
    Export,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "export" => Ok(Self::Export),
            other => Err(CliError::Usage(format!(
                "unknown output format '{other}', expected json, csv or export"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Export => "export",
        };
        f.write_str(name)
    }
}

/// Input files named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// JSON array of site-night facts.
    pub facts: PathBuf,
    /// Optional JSON array of reservations.
    pub reservations: Option<PathBuf>,
}

impl CliArgs {
    /// Parse the arguments following the program name.
    pub fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let facts = args
            .next()
            .ok_or_else(|| CliError::Usage(USAGE.to_string()))?;
        let reservations = args.next().map(PathBuf::from);
        if args.next().is_some() {
            return Err(CliError::Usage(USAGE.to_string()));
        }

        Ok(Self {
            facts: PathBuf::from(facts),
            reservations,
        })
    }
}

/// Read a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// One command-line run over a loaded configuration.
#[derive(Debug, Clone)]
pub struct ReportApp {
    config: Config,
}

impl ReportApp {
    /// Creates an app for `config`.
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load the inputs named in `args` and render the report as `format`.
    #[instrument(skip(self, args), fields(facts = %args.facts.display()))]
    pub fn run(&self, args: &CliArgs, format: OutputFormat) -> CliResult<String> {
        let facts: Vec<SiteNight> = read_json(&args.facts)?;
        let reservations: Vec<Reservation> = match &args.reservations {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };
        debug!(
            "Loaded {} site-nights and {} reservations",
            facts.len(),
            reservations.len()
        );

        let engine = ReportEngine::new(ReportConfig::from_config(&self.config));
        let report = engine.build(&facts, &reservations)?;

        let output = match format {
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            OutputFormat::Csv => report.to_csv()?,
            OutputFormat::Export => {
                serde_json::to_string_pretty(&report.export(self.config.report.export_options)?)?
            }
        };
        info!("Rendered {} output for {}", format, report.headline);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use occupancy_common::test_utils::{date, fixtures};
    use occupancy_config::ExportOptions;
    use std::io::Write;

    fn write_json<T: serde::Serialize>(value: &T) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(value).unwrap().as_bytes())
            .unwrap();
        file
    }

    #[test]
    fn test_parse_args() {
        let args = CliArgs::parse(vec!["facts.json".to_string()]).unwrap();
        assert_eq!(args.facts, PathBuf::from("facts.json"));
        assert!(args.reservations.is_none());

        let args = CliArgs::parse(vec!["a.json".to_string(), "b.json".to_string()]).unwrap();
        assert_eq!(args.reservations, Some(PathBuf::from("b.json")));

        assert!(matches!(CliArgs::parse(Vec::new()), Err(CliError::Usage(_))));
        let too_many = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(CliArgs::parse(too_many).is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(" json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_run_renders_each_format() {
        let data = fixtures::portfolio(2, date(2025, 1, 1), 90);
        let facts = write_json(&data.site_nights);
        let reservations = write_json(&data.reservations);
        let args = CliArgs {
            facts: facts.path().to_path_buf(),
            reservations: Some(reservations.path().to_path_buf()),
        };

        let mut config = Config::default();
        config.report.export_options = ExportOptions::IncludeCharts;
        let app = ReportApp::new(config);

        let json: serde_json::Value =
            serde_json::from_str(&app.run(&args, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["table"].as_array().unwrap().len(), 2);

        let csv = app.run(&args, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("Site Name,"));
        assert_eq!(csv.lines().count(), 3);

        let export: serde_json::Value =
            serde_json::from_str(&app.run(&args, OutputFormat::Export).unwrap()).unwrap();
        assert_eq!(export["fileName"], "occupancy-report-2025-02-01.csv");
        assert!(export["charts"]["trend"].is_array());
    }

    #[test]
    fn test_run_reports_unreadable_and_invalid_input() {
        let app = ReportApp::new(Config::default());

        let missing = CliArgs {
            facts: PathBuf::from("/nonexistent/facts.json"),
            reservations: None,
        };
        assert!(matches!(
            app.run(&missing, OutputFormat::Json),
            Err(CliError::Read { .. })
        ));

        let mut garbage = tempfile::NamedTempFile::new().unwrap();
        garbage.write_all(b"{not json").unwrap();
        let garbled = CliArgs {
            facts: garbage.path().to_path_buf(),
            reservations: None,
        };
        assert!(matches!(
            app.run(&garbled, OutputFormat::Json),
            Err(CliError::Parse { .. })
        ));

        let site = fixtures::site(1);
        let night = fixtures::vacant(&site, date(2025, 2, 2));
        let duplicated = write_json(&vec![night.clone(), night]);
        let invalid = CliArgs {
            facts: duplicated.path().to_path_buf(),
            reservations: None,
        };
        let err = app.run(&invalid, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, CliError::Report(ref inner) if inner.is_input_error()));
    }
}
