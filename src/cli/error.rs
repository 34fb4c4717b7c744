//! Error types for the command-line surface

use crate::detection::OutlierError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("File '{}' does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("File {} cannot be read as csv", .0.display())]
    UnreadableCsv(PathBuf),

    #[error("column '{0}' not a valid column name")]
    MissingColumn(String),

    #[error("Invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Detection(#[from] OutlierError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
