//! detection::zscore — trailing z-scores and threshold classification.
//!
//! Purpose
//! -------
//! Score every observation against its trailing statistics and flag those
//! whose absolute score exceeds a threshold.
//!
//! Key behaviors
//! -------------
//! - [`ZScoreSeries::from_stats`] implements both scoring strategies behind a
//!   single `include_current` flag:
//!   - `true`: `z[i] = (target[i] − mu[i]) / sigma[i]`, the observation is
//!     part of the window it is compared against;
//!   - `false`: `z[0] = 0` and `z[i] = (target[i] − mu[i−1]) / sigma[i−1]`,
//!     the observation is compared against the window as it stood before it
//!     arrived. More sensitive to subtle shifts, with more false positives.
//! - The zero-variance guard replaces `sigma == 0` with 1 before dividing.
//! - [`ZScoreSeries::classify`] produces an [`OutlierMask`] with
//!   `mask[i] = |z[i]| > threshold` (strict).
//!
//! Invariants & assumptions
//! ------------------------
//! - Scores are `Some(finite)` or `None`; `NaN`/±∞ never appear.
//! - `None` scores (undefined statistics or a missing observation) classify
//!   as non-outliers.
//! - Under `include_current = false`, index 0 scores exactly 0 and is never
//!   flagged.
//!
//! Testing notes
//! -------------
//! - Unit tests cover both strategies on hand-computed inputs, the guard on
//!   flat windows, strict/absolute comparison, and threshold validation.

use crate::detection::{
    errors::{OutlierError, OutlierResult},
    rolling::RollingStats,
    validation::validate_threshold,
};
use ndarray::{Array1, Zip};

/// `ZScoreSeries` — one optional z-score per index.
#[derive(Debug, Clone, PartialEq)]
pub struct ZScoreSeries {
    scores: Array1<Option<f64>>,
}

impl ZScoreSeries {
    /// Score a series against its trailing statistics.
    ///
    /// Parameters
    /// ----------
    /// - `stats`: `&RollingStats`
    ///   Output of the rolling-statistics stage (or assembled via
    ///   [`RollingStats::from_parts`]).
    /// - `include_current`: `bool`
    ///   Strategy selector; see the module docs.
    ///
    /// Returns
    /// -------
    /// `ZScoreSeries` of length `stats.len()`.
    ///
    /// Notes
    /// -----
    /// - `stats` is not modified; the zero-variance guard works on a copy.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_outliers::detection::{rolling::RollingStats, zscore::ZScoreSeries};
    /// let stats = RollingStats::compute(&[1.0, 2.0, 3.0, 10.0], 3, 1).unwrap();
    /// let z = ZScoreSeries::from_stats(&stats, false);
    /// assert_eq!(z.scores()[0], Some(0.0));
    /// assert_eq!(z.scores()[3], Some(8.0));
    /// ```
    pub fn from_stats(stats: &RollingStats, include_current: bool) -> Self {
        let target = stats.target();
        let mu = stats.mu();
        let sigma = stats.guarded_sigma();
        let n = stats.len();

        let scores = if include_current {
            let mut scores = Array1::from_elem(n, None);
            Zip::from(&mut scores).and(target).and(mu).and(&sigma).for_each(|z, &x, &m, &s| {
                *z = standardise(x, m, s);
            });
            scores
        } else {
            Array1::from_shape_fn(n, |i| match i {
                0 => Some(0.0),
                _ => standardise(target[i], mu[i - 1], sigma[i - 1]),
            })
        };

        ZScoreSeries { scores }
    }

    /// Optional scores in index order.
    pub fn scores(&self) -> &Array1<Option<f64>> {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Flag every index whose absolute score strictly exceeds `threshold`.
    ///
    /// Errors
    /// ------
    /// - `OutlierError::InvalidThreshold` when `threshold` is negative or not
    ///   finite.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_outliers::detection::zscore::ZScoreSeries;
    /// let z = ZScoreSeries::from(vec![-3.4, 4.5, -2.4, 2.3]);
    /// let mask = z.classify(3.0).unwrap();
    /// assert_eq!(mask.to_vec(), vec![true, true, false, false]);
    /// ```
    pub fn classify(&self, threshold: f64) -> OutlierResult<OutlierMask> {
        validate_threshold(threshold)?;
        let flags = self.scores.mapv(|z| z.is_some_and(|z| z.abs() > threshold));
        Ok(OutlierMask { flags })
    }
}

impl From<Vec<f64>> for ZScoreSeries {
    /// Wrap raw scores; non-finite entries become `None`.
    fn from(scores: Vec<f64>) -> Self {
        let scores = scores.into_iter().map(|z| Some(z).filter(|z| z.is_finite())).collect();
        ZScoreSeries { scores }
    }
}

/// `(x − m) / s`, or `None` when any operand is undefined or the result is
/// not finite.
#[inline]
fn standardise(x: f64, m: Option<f64>, s: Option<f64>) -> Option<f64> {
    let z = (x - m?) / s?;
    z.is_finite().then_some(z)
}

/// `OutlierMask` — boolean classification, `true` marks an outlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlierMask {
    flags: Array1<bool>,
}

impl OutlierMask {
    /// Build a mask from flags; `flags.len()` must equal `expected_len`.
    ///
    /// Errors
    /// ------
    /// - `OutlierError::LengthMismatch` otherwise.
    pub fn from_flags(flags: Vec<bool>, expected_len: usize) -> OutlierResult<Self> {
        if flags.len() != expected_len {
            return Err(OutlierError::LengthMismatch {
                expected: expected_len,
                actual: flags.len(),
            });
        }
        Ok(OutlierMask { flags: Array1::from(flags) })
    }

    pub fn flags(&self) -> &Array1<bool> {
        &self.flags
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_outlier(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Number of flagged indices.
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    /// Indices flagged as outliers, ascending.
    pub fn outlier_indices(&self) -> Vec<usize> {
        self.flags.iter().enumerate().filter_map(|(i, &flag)| flag.then_some(i)).collect()
    }

    /// Complement of the mask (`true` marks a retained observation).
    pub fn retained(&self) -> Array1<bool> {
        self.flags.mapv(|flag| !flag)
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.flags.to_vec()
    }
}
