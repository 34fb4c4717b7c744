//! detection — trailing z-score outlier detection for univariate series.
//!
//! Purpose
//! -------
//! Collect the detection core: input conversion, trailing-window statistics,
//! z-score strategies, threshold classification, validated configuration,
//! and the model seam that composes them.
//!
//! Key behaviors
//! -------------
//! - Convert caller data into a [`NumericSeries`] ([`series`]).
//! - Compute trailing mean / sample std per index ([`RollingStats`]).
//! - Score each observation with or without its own contribution and flag
//!   `|z| > threshold` ([`ZScoreSeries`], [`OutlierMask`]).
//! - Expose the composition as [`TrailingZScoreDetector`] behind the
//!   [`UnivariateModel`] trait, plus the [`detect_outliers`] entry point.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every stage is a pure function of its inputs; no state survives a call.
//! - Inputs of length ≤ 2 are rejected outright.
//! - Undefined statistics never produce an outlier flag.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; index 0 is the oldest observation.
//! - Errors are reported as [`OutlierError`] via [`OutlierResult`]; panics
//!   indicate programming errors only.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_outliers::detection::{WindowConfig, detect_outliers};
//!
//!   let mask = detect_outliers(&[1.0, 1.2, 0.9, 1.1, 9.0], &WindowConfig::default())?;
//!   assert_eq!(mask.len(), 5);
//!   # Ok::<(), rust_outliers::detection::OutlierError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own stage; integration tests
//!   under `tests/` exercise the composed pipeline and the CLI.

pub mod config;
pub mod detector;
pub mod errors;
pub mod rolling;
pub mod series;
pub mod validation;
pub mod zscore;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::config::WindowConfig;
pub use self::detector::{TrailingZScoreDetector, UnivariateModel, detect_outliers};
pub use self::errors::{ErrorKind, OutlierError, OutlierResult};
pub use self::rolling::RollingStats;
pub use self::series::{NumericSeries, Observation};
pub use self::zscore::{OutlierMask, ZScoreSeries};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        NumericSeries, OutlierError, OutlierMask, OutlierResult, TrailingZScoreDetector,
        UnivariateModel, WindowConfig, detect_outliers,
    };
}
