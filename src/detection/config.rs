//! detection::config — validated configuration for trailing z-score detection.
//!
//! Purpose
//! -------
//! Hold the four tuning knobs of the detector in an immutable value that is
//! validated once, at construction, whether it is built in code, via
//! overrides, or deserialized from a TOML document.
//!
//! Key behaviors
//! -------------
//! - [`WindowConfig::new`] rejects out-of-domain values with the same
//!   [`OutlierError`] variants the computation stages use.
//! - `Deserialize` routes through the validating constructor; missing fields
//!   fall back to the defaults below, unknown fields are rejected.
//! - `with_*` methods return a new validated configuration with one field
//!   replaced (used for CLI flag overrides).
//!
//! Invariants & assumptions
//! ------------------------
//! - `lookback_window > 0`.
//! - `1 ≤ min_observations ≤ lookback_window`.
//! - `z_score_threshold` is finite and `≥ 0`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover defaults, each rejection path, overrides, and TOML
//!   parsing (partial documents, invalid values, unknown keys).

use crate::detection::{
    errors::{OutlierError, OutlierResult},
    validation::{validate_threshold, validate_window},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOOKBACK_WINDOW: usize = 26;
pub const DEFAULT_Z_SCORE_THRESHOLD: f64 = 3.0;
pub const DEFAULT_MIN_OBSERVATIONS: usize = 1;
pub const DEFAULT_INCLUDE_CURRENT: bool = false;

/// `WindowConfig` — validated detector configuration.
///
/// Fields
/// ------
/// - `lookback_window`: `usize`
///   Maximum number of positions in each trailing window.
/// - `min_observations`: `usize`
///   Available observations required before window statistics are defined.
/// - `z_score_threshold`: `f64`
///   Absolute z-score above which an observation is an outlier.
/// - `include_current_observation`: `bool`
///   Scoring strategy: compare against the window including the observation
///   itself (`true`) or the window as it stood before it (`false`).
///
/// Invariants
/// ----------
/// - See the module docs; enforced by every constructor.
///
/// Examples
/// --------
/// ```rust
/// # use rust_outliers::detection::config::WindowConfig;
/// let config = WindowConfig::from_toml_str("lookback_window = 10").unwrap();
/// assert_eq!(config.lookback_window(), 10);
/// assert_eq!(config.z_score_threshold(), 3.0);
///
/// assert!(WindowConfig::new(5, 6, 3.0, false).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWindowConfig", into = "RawWindowConfig")]
pub struct WindowConfig {
    lookback_window: usize,
    min_observations: usize,
    z_score_threshold: f64,
    include_current_observation: bool,
}

impl WindowConfig {
    /// Construct a validated configuration.
    ///
    /// Errors
    /// ------
    /// - `OutlierError::InvalidLookbackWindow` when `lookback_window == 0`.
    /// - `OutlierError::InvalidMinObservations` when `min_observations` is
    ///   zero or exceeds `lookback_window`.
    /// - `OutlierError::InvalidThreshold` when the threshold is negative or
    ///   not finite.
    pub fn new(
        lookback_window: usize, min_observations: usize, z_score_threshold: f64,
        include_current_observation: bool,
    ) -> OutlierResult<Self> {
        validate_window(lookback_window, min_observations)?;
        validate_threshold(z_score_threshold)?;
        Ok(WindowConfig {
            lookback_window,
            min_observations,
            z_score_threshold,
            include_current_observation,
        })
    }

    /// Parse a TOML document; absent keys take their defaults.
    pub fn from_toml_str(document: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(document)
    }

    pub fn lookback_window(&self) -> usize {
        self.lookback_window
    }

    pub fn min_observations(&self) -> usize {
        self.min_observations
    }

    pub fn z_score_threshold(&self) -> f64 {
        self.z_score_threshold
    }

    pub fn include_current_observation(&self) -> bool {
        self.include_current_observation
    }

    pub fn with_lookback_window(self, lookback_window: usize) -> OutlierResult<Self> {
        WindowConfig::new(
            lookback_window,
            self.min_observations,
            self.z_score_threshold,
            self.include_current_observation,
        )
    }

    pub fn with_min_observations(self, min_observations: usize) -> OutlierResult<Self> {
        WindowConfig::new(
            self.lookback_window,
            min_observations,
            self.z_score_threshold,
            self.include_current_observation,
        )
    }

    pub fn with_z_score_threshold(self, z_score_threshold: f64) -> OutlierResult<Self> {
        WindowConfig::new(
            self.lookback_window,
            self.min_observations,
            z_score_threshold,
            self.include_current_observation,
        )
    }

    pub fn with_include_current_observation(self, include_current_observation: bool) -> Self {
        WindowConfig { include_current_observation, ..self }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            lookback_window: DEFAULT_LOOKBACK_WINDOW,
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            z_score_threshold: DEFAULT_Z_SCORE_THRESHOLD,
            include_current_observation: DEFAULT_INCLUDE_CURRENT,
        }
    }
}

/// Unvalidated serde mirror of [`WindowConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawWindowConfig {
    lookback_window: usize,
    min_observations: usize,
    z_score_threshold: f64,
    include_current_observation: bool,
}

impl Default for RawWindowConfig {
    fn default() -> Self {
        WindowConfig::default().into()
    }
}

impl TryFrom<RawWindowConfig> for WindowConfig {
    type Error = OutlierError;

    fn try_from(raw: RawWindowConfig) -> OutlierResult<Self> {
        WindowConfig::new(
            raw.lookback_window,
            raw.min_observations,
            raw.z_score_threshold,
            raw.include_current_observation,
        )
    }
}

impl From<WindowConfig> for RawWindowConfig {
    fn from(config: WindowConfig) -> Self {
        RawWindowConfig {
            lookback_window: config.lookback_window,
            min_observations: config.min_observations,
            z_score_threshold: config.z_score_threshold,
            include_current_observation: config.include_current_observation,
        }
    }
}
