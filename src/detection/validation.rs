//! detection::validation — shared input guards for the detection core.
//!
//! Purpose
//! -------
//! Centralize the precondition checks shared by configuration construction,
//! rolling-statistics computation, and classification, so each stage reports
//! the same [`OutlierError`] variant for the same violation.
//!
//! Invariants & assumptions
//! ------------------------
//! - A series must contain more than 2 positions (missing values included).
//! - `lookback_window > 0` and `1 ≤ min_observations ≤ lookback_window`.
//! - The z-score threshold is finite and non-negative.
//!
//! Conventions
//! -----------
//! - Pure functions, no allocation, no I/O. A successful return (`Ok(())`)
//!   is a guarantee that the checked constraint holds.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and a success path for each guard.

use crate::detection::errors::{OutlierError, OutlierResult};

/// Smallest series length that can be assessed.
pub const MIN_SERIES_LEN: usize = 3;

/// Validate that a series is long enough to assess outliers.
///
/// Errors
/// ------
/// - `OutlierError::InsufficientData { len }` when `len ≤ 2`.
#[inline]
pub fn validate_series_len(len: usize) -> OutlierResult<()> {
    if len < MIN_SERIES_LEN {
        return Err(OutlierError::InsufficientData { len });
    }
    Ok(())
}

/// Validate trailing-window parameters.
///
/// Parameters
/// ----------
/// - `lookback_window`: `usize`
///   Maximum number of positions in the trailing window. Must be `> 0`.
/// - `min_observations`: `usize`
///   Minimum number of available observations before statistics are
///   defined. Must satisfy `1 ≤ min_observations ≤ lookback_window`.
///
/// Errors
/// ------
/// - `OutlierError::InvalidLookbackWindow(0)`
/// - `OutlierError::InvalidMinObservations { .. }`
pub fn validate_window(lookback_window: usize, min_observations: usize) -> OutlierResult<()> {
    if lookback_window == 0 {
        return Err(OutlierError::InvalidLookbackWindow(lookback_window));
    }

    if min_observations == 0 || min_observations > lookback_window {
        return Err(OutlierError::InvalidMinObservations { min_observations, lookback_window });
    }

    Ok(())
}

/// Validate a z-score threshold (finite and `≥ 0`).
#[inline]
pub fn validate_threshold(threshold: f64) -> OutlierResult<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(OutlierError::InvalidThreshold(threshold));
    }
    Ok(())
}
