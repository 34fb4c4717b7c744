//! Command-line surface: remove outliers from one column of a CSV file.

pub mod error;
pub mod output;
pub mod table;

pub use self::error::{CliError, CliResult};
pub use self::table::{Table, default_destination};

use crate::detection::{NumericSeries, TrailingZScoreDetector, UnivariateModel, WindowConfig};
use clap::{Parser, builder::BoolishValueParser};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Remove outliers from a CSV.
///
/// Flags observations of FIELD whose trailing z-score exceeds the threshold,
/// prints them, and writes the remaining rows to a new file.
#[derive(Debug, Parser)]
#[command(name = "rust_outliers")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the csv to remove outliers from
    pub src_path: PathBuf,

    /// Column name of the variable to evaluate
    pub field: String,

    /// Output file. Defaults to the source name suffixed with '-altered'
    #[arg(long)]
    pub dest_path: Option<PathBuf>,

    /// Include the current observation in the z-score calculation (true/false, yes/no, 1/0)
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub inc_current: Option<bool>,

    /// Look back window used to calculate z-scores [default: 26]
    #[arg(long)]
    pub lookback: Option<usize>,

    /// Absolute z-score above which a value is an outlier [default: 3]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Observations required before a window is scored [default: 1]
    #[arg(long)]
    pub min_obs: Option<usize>,

    /// TOML file with detector settings; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rows: usize,
    pub outliers: usize,
    pub destination: PathBuf,
}

impl Cli {
    /// Detector configuration: config file (or defaults) overridden by flags.
    pub fn window_config(&self) -> CliResult<WindowConfig> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => WindowConfig::default(),
        };

        let config = WindowConfig::new(
            self.lookback.unwrap_or(base.lookback_window()),
            self.min_obs.unwrap_or(base.min_observations()),
            self.threshold.unwrap_or(base.z_score_threshold()),
            self.inc_current.unwrap_or(base.include_current_observation()),
        )?;
        debug!(?config, "detector configuration");
        Ok(config)
    }

    /// Run the command, writing the report to `out`.
    pub fn execute<W: Write>(&self, out: &mut W) -> CliResult<RunSummary> {
        let config = self.window_config()?;

        let src_path = std::path::absolute(&self.src_path)?;
        if !src_path.is_file() {
            return Err(CliError::MissingFile(src_path));
        }

        let table = Table::read(&src_path)?;
        info!(path = %src_path.display(), rows = table.len(), "loaded table");

        let series = NumericSeries::convert(&table.column(&self.field)?)?;
        let mask = TrailingZScoreDetector::new(config).fit_predict(&series)?;

        output::outlier_report(out, &table, &mask)?;

        let destination = self.dest_path.clone().unwrap_or_else(|| default_destination(&src_path));
        let written = table.write_retained(&destination, &mask)?;
        info!(path = %destination.display(), rows = written, "saved cleaned table");
        output::saved(out, &destination)?;

        Ok(RunSummary { rows: table.len(), outliers: mask.count(), destination })
    }
}

fn load_config(path: &Path) -> CliResult<WindowConfig> {
    let invalid = |message: String| CliError::Config { path: path.to_path_buf(), message };
    let document = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    WindowConfig::from_toml_str(&document).map_err(|e| invalid(e.message().to_string()))
}
