//! detection::rolling — trailing-window mean and standard deviation.
//!
//! Purpose
//! -------
//! Compute, for every index of a univariate series, the mean and sample
//! standard deviation of the trailing window ending at that index. These
//! statistics are the reference against which each observation is scored.
//!
//! Key behaviors
//! -------------
//! - [`RollingStats::compute`] converts raw elements, enforces the length
//!   precondition, and produces the parallel `(target, mu, sigma)` triple.
//! - Each window is summarised independently with a two-pass mean /
//!   sum-of-squares over its available observations, so a large value
//!   leaving the window leaves no residue in later statistics. Cost is
//!   O(n · lookback_window).
//! - A window whose available observations are all identical reports
//!   `sigma = 0` exactly and `mu` equal to that value.
//!
//! Invariants & assumptions
//! ------------------------
//! - The window ending at `i` spans positions `max(0, i + 1 − lookback)..=i`.
//!   Missing observations occupy positions but are not counted.
//! - `mu[i]` is defined iff the window holds `≥ min_observations` available
//!   observations; `sigma[i]` additionally needs at least 2.
//! - All three sequences have the length of the input series.
//!
//! Conventions
//! -----------
//! - "No value" is `None`, never `NaN`.
//! - The standard deviation uses the unbiased `(count − 1)` denominator.
//!
//! Testing notes
//! -------------
//! - Unit tests compare against a direct two-pass computation over each
//!   window, cover missing observations, `min_observations > 1`, flat
//!   windows, a huge value leaving the window, and the guarded sigma view.

use crate::detection::{
    errors::{OutlierError, OutlierResult},
    series::{NumericSeries, Observation},
    validation::{validate_series_len, validate_window},
};
use ndarray::{Array1, s};

/// `RollingStats` — per-index trailing statistics of a series.
///
/// Fields
/// ------
/// - `target`: `Array1<f64>`
///   The observations themselves (`NaN` = missing).
/// - `mu`: `Array1<Option<f64>>`
///   Trailing mean ending at each index, or `None`.
/// - `sigma`: `Array1<Option<f64>>`
///   Trailing sample standard deviation ending at each index, or `None`.
///
/// Invariants
/// ----------
/// - `target.len() == mu.len() == sigma.len()`.
/// - `sigma[i].is_some()` implies `mu[i].is_some()` for computed stats.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingStats {
    target: Array1<f64>,
    mu: Array1<Option<f64>>,
    sigma: Array1<Option<f64>>,
}

impl RollingStats {
    /// Compute trailing statistics from raw elements.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[T]`
    ///   Raw elements in temporal order; each must convert to `f64`.
    /// - `lookback_window`: `usize`
    ///   Maximum number of positions in each window. Must be `> 0`.
    /// - `min_observations`: `usize`
    ///   Available observations required before statistics are defined.
    ///   Must satisfy `1 ≤ min_observations ≤ lookback_window`.
    ///
    /// Returns
    /// -------
    /// `OutlierResult<RollingStats>`
    ///
    /// Errors
    /// ------
    /// - `OutlierError::NonNumericData` when an element does not convert.
    ///   Checked first.
    /// - `OutlierError::InsufficientData` when `data.len() ≤ 2`.
    /// - `OutlierError::InvalidLookbackWindow` /
    ///   `OutlierError::InvalidMinObservations` for bad window parameters.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_outliers::detection::rolling::RollingStats;
    /// let stats = RollingStats::compute(&[1.0, 2.0, 3.0, 10.0], 3, 1).unwrap();
    /// assert_eq!(stats.mu()[2], Some(2.0));
    /// assert_eq!(stats.sigma()[0], None);
    /// ```
    pub fn compute<T: Observation>(
        data: &[T], lookback_window: usize, min_observations: usize,
    ) -> OutlierResult<Self> {
        let series = NumericSeries::convert(data)?;
        RollingStats::from_series(&series, lookback_window, min_observations)
    }

    /// Compute trailing statistics from an already converted series.
    ///
    /// Same contract as [`RollingStats::compute`] minus the conversion step.
    pub fn from_series(
        series: &NumericSeries, lookback_window: usize, min_observations: usize,
    ) -> OutlierResult<Self> {
        validate_series_len(series.len())?;
        validate_window(lookback_window, min_observations)?;

        let values = series.values();
        let n = values.len();
        let mut mu = Array1::from_elem(n, None);
        let mut sigma = Array1::from_elem(n, None);
        let mut available = Vec::with_capacity(lookback_window);

        for i in 0..n {
            let start = (i + 1).saturating_sub(lookback_window);
            available.clear();
            available.extend(values.slice(s![start..=i]).iter().copied().filter(|v| !v.is_nan()));

            if available.len() >= min_observations {
                let (mean, std_dev) = window_moments(&available);
                mu[i] = mean;
                sigma[i] = std_dev;
            }
        }

        Ok(RollingStats { target: values.clone(), mu, sigma })
    }

    /// Assemble statistics from externally computed parts.
    ///
    /// Errors
    /// ------
    /// - `OutlierError::LengthMismatch` when `mu` or `sigma` differ in length
    ///   from `target`.
    pub fn from_parts(
        target: Array1<f64>, mu: Array1<Option<f64>>, sigma: Array1<Option<f64>>,
    ) -> OutlierResult<Self> {
        for len in [mu.len(), sigma.len()] {
            if len != target.len() {
                return Err(OutlierError::LengthMismatch { expected: target.len(), actual: len });
            }
        }
        Ok(RollingStats { target, mu, sigma })
    }

    pub fn target(&self) -> &Array1<f64> {
        &self.target
    }

    pub fn mu(&self) -> &Array1<Option<f64>> {
        &self.mu
    }

    pub fn sigma(&self) -> &Array1<Option<f64>> {
        &self.sigma
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Standard deviations with the zero-variance guard applied.
    ///
    /// Every `Some(0.0)` becomes `Some(1.0)`, so a flat window yields a
    /// bounded z-score instead of a division by zero. `None` stays `None`.
    pub fn guarded_sigma(&self) -> Array1<Option<f64>> {
        self.sigma.mapv(|s| s.map(|s| if s == 0.0 { 1.0 } else { s }))
    }
}

/// Mean and sample standard deviation of the available observations of
/// one window.
///
/// Notes
/// -----
/// - The mean is refined by the mean residual so that the second pass sums
///   squared deviations about an accurate centre.
/// - A window whose observations are all identical returns that value and
///   `0.0` exactly.
fn window_moments(window: &[f64]) -> (Option<f64>, Option<f64>) {
    let Some(&first) = window.first() else {
        return (None, None);
    };
    if window.iter().all(|&v| v == first) {
        let sigma = (window.len() > 1).then_some(0.0);
        return (Some(first), sigma);
    }

    let count = window.len() as f64;
    let rough = window.iter().sum::<f64>() / count;
    let mean = rough + window.iter().map(|v| v - rough).sum::<f64>() / count;

    let ss = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    (Some(mean), Some((ss / (count - 1.0)).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Hand-computed trailing statistics on a short series.
    // - Agreement with a direct per-window two-pass computation.
    // - Missing observations and `min_observations > 1`.
    // - Flat windows and the guarded sigma view.
    // - Error ordering (conversion before length) and window validation.
    //
    // They intentionally DO NOT cover:
    // - Z-scores or classification (see `zscore`).
    // -------------------------------------------------------------------------

    /// Two-pass mean / sample std of the available values in `window`.
    fn direct_stats(window: &[f64], min_observations: usize) -> (Option<f64>, Option<f64>) {
        let available: Vec<f64> = window.iter().copied().filter(|v| !v.is_nan()).collect();
        let count = available.len();
        if count < min_observations || count == 0 {
            return (None, None);
        }
        let mean = available.iter().sum::<f64>() / count as f64;
        if count < 2 {
            return (Some(mean), None);
        }
        let var = available.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        (Some(mean), Some(var.sqrt()))
    }

    fn assert_option_close(actual: Option<f64>, expected: Option<f64>, index: usize) {
        match (actual, expected) {
            (Some(a), Some(e)) => assert_relative_eq!(a, e, epsilon = 1e-12, max_relative = 1e-10),
            (None, None) => (),
            other => panic!("mismatch at index {index}: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify trailing mean / std on a series small enough to check by hand.
    //
    // Given
    // -----
    // - data = [1, 2, 3, 10], lookback = 3, min_observations = 1.
    //
    // Expect
    // ------
    // - mu    = [1, 1.5, 2, 5]
    // - sigma = [None, √0.5, 1, √19]
    fn compute_short_series_matches_hand_values() {
        // Arrange
        let data = [1.0, 2.0, 3.0, 10.0];

        // Act
        let stats = RollingStats::compute(&data, 3, 1).expect("valid input");

        // Assert
        assert_eq!(stats.target(), &array![1.0, 2.0, 3.0, 10.0]);
        assert_eq!(stats.mu().to_vec(), vec![Some(1.0), Some(1.5), Some(2.0), Some(5.0)]);
        assert_eq!(stats.sigma()[0], None);
        assert_relative_eq!(stats.sigma()[1].unwrap(), 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(stats.sigma()[2].unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(stats.sigma()[3].unwrap(), 19.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the windowed moments against a naive computation over every
    // window on a longer, irregular series.
    //
    // Given
    // -----
    // - 40 values from a deterministic quadratic-residue sequence.
    // - lookback ∈ {1, 2, 4, 7}, min_observations ∈ {1, lookback}.
    //
    // Expect
    // ------
    // - mu/sigma agree with `direct_stats` at every index.
    fn compute_matches_direct_window_computation() {
        // Arrange
        let data: Vec<f64> = (0..40).map(|i| ((i * i * 37 + 11) % 101) as f64 / 7.0).collect();

        for lookback in [1, 2, 4, 7] {
            for min_observations in [1, lookback] {
                // Act
                let stats = RollingStats::compute(&data, lookback, min_observations).unwrap();

                // Assert
                for i in 0..data.len() {
                    let start = (i + 1).saturating_sub(lookback);
                    let (mu, sigma) = direct_stats(&data[start..=i], min_observations);
                    assert_option_close(stats.mu()[i], mu, i);
                    assert_option_close(stats.sigma()[i], sigma, i);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure missing observations occupy window positions without counting
    // towards `min_observations`.
    //
    // Given
    // -----
    // - data = [1, NaN, 3, NaN, NaN, 8], lookback = 3, min_observations = 2.
    //
    // Expect
    // ------
    // - Index 2: window [1, NaN, 3] → 2 available → mu 2.
    // - Index 3: window [NaN, 3, NaN] → 1 available → None.
    // - Index 5: window [NaN, NaN, 8] → 1 available → None.
    fn compute_with_missing_values_counts_only_available() {
        // Arrange
        let data = [Some(1.0), None, Some(3.0), None, None, Some(8.0)];

        // Act
        let stats = RollingStats::compute(&data, 3, 2).unwrap();

        // Assert
        assert_eq!(stats.mu()[0], None);
        assert_eq!(stats.mu()[1], None);
        assert_eq!(stats.mu()[2], Some(2.0));
        assert_relative_eq!(stats.sigma()[2].unwrap(), 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(stats.mu()[3], None);
        assert_eq!(stats.mu()[4], None);
        assert_eq!(stats.mu()[5], None);
        assert!(stats.target()[1].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Verify that flat windows report zero variance exactly, and that the
    // guarded view substitutes 1 for it.
    //
    // Given
    // -----
    // - data = [0.1, 0.1, 0.1, 0.1, 0.7], lookback = 3.
    //
    // Expect
    // ------
    // - sigma[1..=3] == Some(0.0); guarded sigma[1..=3] == Some(1.0).
    // - sigma[4] > 0 and unchanged by the guard.
    fn compute_flat_window_has_exact_zero_sigma() {
        // Arrange
        let data = [0.1, 0.1, 0.1, 0.1, 0.7];

        // Act
        let stats = RollingStats::compute(&data, 3, 1).unwrap();
        let guarded = stats.guarded_sigma();

        // Assert
        for i in 1..=3 {
            assert_eq!(stats.sigma()[i], Some(0.0), "index {i}");
            assert_eq!(stats.mu()[i], Some(0.1), "index {i}");
            assert_eq!(guarded[i], Some(1.0), "index {i}");
        }
        assert!(stats.sigma()[4].unwrap() > 0.0);
        assert_eq!(guarded[4], stats.sigma()[4]);
        assert_eq!(guarded[0], None);
    }

    #[test]
    fn compute_flat_window_after_variation_is_detected() {
        // Values leave the window; the remaining ones are identical.
        let data = [9.0, -4.0, 2.0, 2.0, 2.0];
        let stats = RollingStats::compute(&data, 3, 1).unwrap();
        assert_eq!(stats.sigma()[4], Some(0.0));
        assert_eq!(stats.mu()[4], Some(2.0));
    }

    #[test]
    // Purpose
    // -------
    // Check that a huge value leaving the window leaves no trace in the
    // statistics of later windows.
    //
    // Given
    // -----
    // - A series opening with 1e9 followed by small, varied values,
    //   lookback 3.
    //
    // Expect
    // ------
    // - Every window matches the direct computation, and once 1e9 has left
    //   (index ≥ 3) sigma is that of the small values alone.
    fn compute_large_value_leaving_window_leaves_no_residue() {
        // Arrange
        let data = [1e9, 1.1, 2.2, 3.0, 4.1, 5.0, 6.2, 7.1, 8.0, 9.3, 10.1];

        // Act
        let stats = RollingStats::compute(&data, 3, 1).unwrap();

        // Assert
        for i in 0..data.len() {
            let start = (i + 1).saturating_sub(3);
            let (mu, sigma) = direct_stats(&data[start..=i], 1);
            assert_option_close(stats.mu()[i], mu, i);
            assert_option_close(stats.sigma()[i], sigma, i);
        }
        assert_relative_eq!(stats.mu()[3].unwrap(), 2.1, max_relative = 1e-12);
        assert!(stats.sigma()[10].unwrap() < 1.5, "sigma[10] = {:?}", stats.sigma()[10]);
    }

    #[test]
    fn compute_lookback_one_never_defines_sigma() {
        let stats = RollingStats::compute(&[1.0, 2.0, 3.0], 1, 1).unwrap();
        assert_eq!(stats.mu().to_vec(), vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert!(stats.sigma().iter().all(Option::is_none));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that short series are rejected regardless of window settings.
    //
    // Given
    // -----
    // - Series of length 0 and 2.
    //
    // Expect
    // ------
    // - `OutlierError::InsufficientData` for both.
    fn compute_two_or_fewer_values_returns_insufficient_data() {
        // Arrange
        let empty: [f64; 0] = [];
        let two = [0.2, 0.4];

        // Act & Assert
        assert_eq!(
            RollingStats::compute(&empty, 5, 1),
            Err(OutlierError::InsufficientData { len: 0 })
        );
        assert_eq!(RollingStats::compute(&two, 5, 1), Err(OutlierError::InsufficientData { len: 2 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify that conversion is checked before length.
    //
    // Given
    // -----
    // - Two non-numeric cells (too short and non-numeric at once).
    //
    // Expect
    // ------
    // - `OutlierError::NonNumericData`.
    fn compute_non_numeric_is_reported_before_length() {
        // Arrange
        let data = ["hello", "world"];

        // Act
        let result = RollingStats::compute(&data, 5, 1);

        // Assert
        assert_eq!(result, Err(OutlierError::NonNumericData));
    }

    #[test]
    fn compute_invalid_window_is_rejected() {
        let data = [1.0, 2.0, 3.0];
        assert_eq!(RollingStats::compute(&data, 0, 1), Err(OutlierError::InvalidLookbackWindow(0)));
        assert!(matches!(
            RollingStats::compute(&data, 2, 3),
            Err(OutlierError::InvalidMinObservations { .. })
        ));
    }

    #[test]
    fn from_parts_rejects_length_mismatch() {
        let result = RollingStats::from_parts(
            array![1.0, 2.0, 3.0],
            array![Some(1.0), Some(1.5)],
            array![None, None, None],
        );
        assert_eq!(result, Err(OutlierError::LengthMismatch { expected: 3, actual: 2 }));
    }
}
