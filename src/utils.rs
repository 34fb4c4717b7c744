//! utils — conversion helpers for the optional Python bindings.
//!
//! Purpose
//! -------
//! Turn Python inputs (NumPy arrays, pandas Series, plain sequences of
//! numbers or strings) into a [`NumericSeries`] with the same conversion
//! rules the Rust API applies.
//!
//! Conventions
//! -----------
//! - Contiguous `float64` arrays are read without an intermediate copy of
//!   Python objects; everything else goes through PyO3 extraction.
//! - Values that cannot be read as numbers raise `TypeError` with the fixed
//!   non-numeric message.

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::detection::{NumericSeries, errors::NON_NUMERIC_MESSAGE};

/// Extract a [`NumericSeries`] from a Python object.
///
/// Accepted inputs, tried in order:
/// - a 1-D contiguous `numpy.ndarray[float64]`,
/// - any object with `to_numpy()` returning one (e.g. `pandas.Series`),
/// - a sequence of numbers / `None`,
/// - a sequence of strings (parsed with the Rust text rules).
#[cfg(feature = "python-bindings")]
pub fn extract_series(raw_data: &Bound<'_, PyAny>) -> PyResult<NumericSeries> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if let Ok(slice) = arr_ro.as_slice() {
            return Ok(NumericSeries::from(slice.to_vec()));
        }
    }

    if let Ok(obj) = raw_data.call_method0("to_numpy") {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if let Ok(slice) = series_ro.as_slice() {
                return Ok(NumericSeries::from(slice.to_vec()));
            }
        }
    }

    if let Ok(values) = raw_data.extract::<Vec<Option<f64>>>() {
        return Ok(NumericSeries::convert(&values)?);
    }

    if let Ok(cells) = raw_data.extract::<Vec<String>>() {
        return Ok(NumericSeries::convert(&cells)?);
    }

    Err(PyTypeError::new_err(NON_NUMERIC_MESSAGE))
}
