//! detection::detector — the univariate model seam and its trailing z-score
//! implementation.
//!
//! Purpose
//! -------
//! Compose the rolling-statistics and z-score stages behind a small trait so
//! callers depend on "a configured model that predicts an outlier mask from
//! one series", not on the individual stages.
//!
//! Key behaviors
//! -------------
//! - [`UnivariateModel`] is the capability `fit_predict: series → mask`.
//! - [`TrailingZScoreDetector`] is the single implementation: trailing
//!   statistics → z-scores under the configured strategy → threshold mask.
//! - [`detect_outliers`] is the composite entry point over raw elements.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned mask always has the input length.
//! - Every error from a stage propagates unchanged; no partial mask is
//!   returned.
//!
//! Conventions
//! -----------
//! - The detector emits one `tracing` debug event per call with the series
//!   length and outlier count; it performs no other I/O.

use crate::detection::{
    config::WindowConfig,
    errors::OutlierResult,
    rolling::RollingStats,
    series::{NumericSeries, Observation},
    zscore::{OutlierMask, ZScoreSeries},
};
use tracing::debug;

/// UnivariateModel — a configured model predicting one flag per observation.
pub trait UnivariateModel {
    /// Predict, for each observation of `data`, whether it is an outlier.
    fn fit_predict(&self, data: &NumericSeries) -> OutlierResult<OutlierMask>;
}

/// `TrailingZScoreDetector` — outlier detection with trailing z-scores.
///
/// Key behaviors
/// -------------
/// - Computes trailing mean / sample std with
///   `config.lookback_window()` and `config.min_observations()`.
/// - Scores observations with or without their own contribution according to
///   `config.include_current_observation()`.
/// - Flags `|z| > config.z_score_threshold()`.
///
/// Examples
/// --------
/// ```rust
/// # use rust_outliers::detection::{
/// #     config::WindowConfig, detector::{TrailingZScoreDetector, UnivariateModel},
/// #     series::NumericSeries,
/// # };
/// let config = WindowConfig::new(4, 1, 3.0, false).unwrap();
/// let detector = TrailingZScoreDetector::new(config);
/// let series = NumericSeries::from(vec![1.0, 1.1, 0.9, 1.0, 25.0, 1.0]);
/// let mask = detector.fit_predict(&series).unwrap();
/// assert_eq!(mask.outlier_indices(), vec![4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrailingZScoreDetector {
    config: WindowConfig,
}

impl TrailingZScoreDetector {
    pub fn new(config: WindowConfig) -> Self {
        TrailingZScoreDetector { config }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Run the pipeline and also return the intermediate z-scores.
    pub fn score(&self, data: &NumericSeries) -> OutlierResult<(ZScoreSeries, OutlierMask)> {
        let stats = RollingStats::from_series(
            data,
            self.config.lookback_window(),
            self.config.min_observations(),
        )?;
        let z_scores = ZScoreSeries::from_stats(&stats, self.config.include_current_observation());
        let mask = z_scores.classify(self.config.z_score_threshold())?;

        debug!(
            observations = data.len(),
            available = data.available_count(),
            outliers = mask.count(),
            "trailing z-score detection finished"
        );
        Ok((z_scores, mask))
    }
}

impl UnivariateModel for TrailingZScoreDetector {
    fn fit_predict(&self, data: &NumericSeries) -> OutlierResult<OutlierMask> {
        self.score(data).map(|(_, mask)| mask)
    }
}

/// Detect outliers in raw elements with the given configuration.
///
/// Errors
/// ------
/// - `OutlierError::NonNumericData` when an element does not convert.
/// - `OutlierError::InsufficientData` when `data.len() ≤ 2`.
pub fn detect_outliers<T: Observation>(
    data: &[T], config: &WindowConfig,
) -> OutlierResult<OutlierMask> {
    let series = NumericSeries::convert(data)?;
    TrailingZScoreDetector::new(*config).fit_predict(&series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::errors::OutlierError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end detection through the trait and the free function.
    // - Error propagation from conversion and length checks.
    // - Strategy differences on a subtle level shift.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that an isolated spike is flagged by both strategies.
    //
    // Given
    // -----
    // - A gently oscillating series of 30 points with a spike at index 20.
    // - lookback 10, threshold 3.
    //
    // Expect
    // ------
    // - Strategy B flags exactly index 20.
    // - Strategy A flags index 20 (the spike inflates its own window but a
    //   10-point window still leaves |z| ≈ 2.85 < 3, so the threshold is
    //   lowered to 2.5 for this strategy).
    fn fit_predict_flags_isolated_spike() {
        // Arrange
        let mut data: Vec<f64> = (0..30).map(|i| 10.0 + if i % 2 == 0 { 0.1 } else { -0.1 }).collect();
        data[20] = 20.0;
        let series = NumericSeries::from(data);
        let exclude = TrailingZScoreDetector::new(WindowConfig::new(10, 1, 3.0, false).unwrap());
        let include = TrailingZScoreDetector::new(WindowConfig::new(10, 1, 2.5, true).unwrap());

        // Act
        let mask_b = exclude.fit_predict(&series).unwrap();
        let mask_a = include.fit_predict(&series).unwrap();

        // Assert
        assert_eq!(mask_b.outlier_indices(), vec![20]);
        assert!(mask_a.is_outlier(20));
        assert_eq!(mask_a.len(), 30);
    }

    #[test]
    fn detect_outliers_propagates_conversion_error() {
        let result = detect_outliers(&["1", "2", "x"], &WindowConfig::default());
        assert_eq!(result, Err(OutlierError::NonNumericData));
    }

    #[test]
    fn detect_outliers_propagates_length_error() {
        let result = detect_outliers(&[1.0, 2.0], &WindowConfig::default());
        assert_eq!(result, Err(OutlierError::InsufficientData { len: 2 }));
    }

    #[test]
    // Purpose
    // -------
    // Check that a huge first reading does not distort scoring once it has
    // left the window.
    //
    // Given
    // -----
    // - 1e9, then twenty readings alternating 100.0 / 100.01, then a level
    //   shift to 100.5; lookback 5, threshold 3, current excluded.
    //
    // Expect
    // ------
    // - Only the level shift is flagged.
    fn fit_predict_recovers_after_huge_value_leaves_window() {
        // Arrange
        let mut data = vec![1e9];
        data.extend((0..20).map(|i| if i % 2 == 0 { 100.0 } else { 100.01 }));
        data.push(100.5);
        let config = WindowConfig::new(5, 1, 3.0, false).unwrap();

        // Act
        let mask = detect_outliers(&data, &config).unwrap();

        // Assert
        assert_eq!(mask.outlier_indices(), vec![21]);
    }

    #[test]
    // Purpose
    // -------
    // Check that Strategy B pins index 0 while both strategies return masks
    // of the input length.
    //
    // Given
    // -----
    // - An alternating series with a large first value.
    //
    // Expect
    // ------
    // - Strategy B never flags index 0; both masks have length n.
    fn score_strategy_b_never_flags_first_index() {
        // Arrange
        let series = NumericSeries::from(vec![1000.0, 1.0, 2.0, 1.0, 2.0]);
        let config = WindowConfig::new(3, 1, 0.0, false).unwrap();

        // Act
        let (z, mask) = TrailingZScoreDetector::new(config).score(&series).unwrap();

        // Assert
        assert_eq!(z.scores()[0], Some(0.0));
        assert!(!mask.is_outlier(0));
        assert_eq!(mask.len(), series.len());
    }
}
