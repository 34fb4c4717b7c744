//! rust_outliers — trailing z-score outlier detection for univariate series.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers, the library behind the
//! `rust_outliers` command-line tool, and the PyO3 bridge that exposes the
//! detector to Python via the `_rust_outliers` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the detection core ([`detection`]) as the public crate
//!   surface.
//! - Provide the CSV cleaning command ([`cli`]) used by the binary.
//! - When the `python-bindings` feature is enabled, define the
//!   `#[pyclass]` wrapper, the module-level `detect_outliers` function, and
//!   the `#[pymodule]` initializer for `_rust_outliers`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in [`detection`]; this file performs only FFI
//!   glue, input conversion, and error mapping.
//! - Python-visible defaults mirror [`detection::config`]: lookback 26,
//!   minimum observations 1, threshold 3, current observation excluded.
//!
//! Conventions
//! -----------
//! - Errors from the core are propagated as [`detection::OutlierError`] and
//!   converted to `ValueError` / `TypeError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code depends on [`detection`] directly and can ignore the
//!   PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by integration tests under `tests/`; the bindings are exercised
//!   from Python.

pub mod cli;
pub mod detection;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    detection::{TrailingZScoreDetector, UnivariateModel, WindowConfig},
    utils::extract_series,
};

/// TrailingZScore — Python-facing wrapper for [`TrailingZScoreDetector`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `TrailingZScore(lookback_window=26, min_observations=1,
/// z_score_threshold=3.0, include_current=False)`; invalid combinations
/// raise `ValueError`.
///
/// Notes
/// -----
/// - Native Rust callers should use [`TrailingZScoreDetector`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_outliers.detection", frozen)]
pub struct TrailingZScore {
    inner: TrailingZScoreDetector,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl TrailingZScore {
    #[new]
    #[pyo3(
        signature = (
            lookback_window = 26,
            min_observations = 1,
            z_score_threshold = 3.0,
            include_current = false,
        ),
        text_signature = "(lookback_window=26, min_observations=1, z_score_threshold=3.0, \
                          include_current=False)"
    )]
    pub fn new(
        lookback_window: usize, min_observations: usize, z_score_threshold: f64,
        include_current: bool,
    ) -> PyResult<Self> {
        let config =
            WindowConfig::new(lookback_window, min_observations, z_score_threshold, include_current)?;
        Ok(TrailingZScore { inner: TrailingZScoreDetector::new(config) })
    }

    /// Outlier flags for each element of `data` (array-like of length > 2).
    #[pyo3(signature = (data, /))]
    pub fn fit_predict<'py>(&self, data: &Bound<'py, PyAny>) -> PyResult<Vec<bool>> {
        let series = extract_series(data)?;
        Ok(self.inner.fit_predict(&series)?.to_vec())
    }

    /// Trailing z-scores for each element of `data`; `None` where undefined.
    #[pyo3(signature = (data, /))]
    pub fn z_scores<'py>(&self, data: &Bound<'py, PyAny>) -> PyResult<Vec<Option<f64>>> {
        let series = extract_series(data)?;
        let (z_scores, _) = self.inner.score(&series)?;
        Ok(z_scores.scores().to_vec())
    }

    #[getter]
    pub fn lookback_window(&self) -> usize {
        self.inner.config().lookback_window()
    }

    #[getter]
    pub fn min_observations(&self) -> usize {
        self.inner.config().min_observations()
    }

    #[getter]
    pub fn z_score_threshold(&self) -> f64 {
        self.inner.config().z_score_threshold()
    }

    #[getter]
    pub fn include_current(&self) -> bool {
        self.inner.config().include_current_observation()
    }
}

/// Module-level shortcut: `detect_outliers(data, lookback_window=26, ...)`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "detect_outliers")]
#[pyo3(
    signature = (
        data,
        /,
        lookback_window = 26,
        min_observations = 1,
        z_score_threshold = 3.0,
        include_current = false,
    ),
    text_signature = "(data, /, lookback_window=26, min_observations=1, z_score_threshold=3.0, \
                      include_current=False)"
)]
pub fn py_detect_outliers<'py>(
    data: &Bound<'py, PyAny>, lookback_window: usize, min_observations: usize,
    z_score_threshold: f64, include_current: bool,
) -> PyResult<Vec<bool>> {
    TrailingZScore::new(lookback_window, min_observations, z_score_threshold, include_current)?
        .fit_predict(data)
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_outliers<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let detection_mod = PyModule::new(_py, "detection")?;
    register_detection(_py, m, &detection_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_outliers.detection", detection_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn register_detection<'py>(
    _py: Python, rust_outliers: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<TrailingZScore>()?;
    m.add_function(wrap_pyfunction!(py_detect_outliers, m)?)?;
    rust_outliers.add_submodule(m)?;
    Ok(())
}
