//! detection::series — numeric input series and element conversion.
//!
//! Purpose
//! -------
//! Turn caller-owned raw values (numbers, optional numbers, or text cells
//! from a table) into a [`NumericSeries`] of `f64` observations, failing with
//! a conversion error when any element cannot be read as a number.
//!
//! Key behaviors
//! -------------
//! - [`Observation`] is implemented for the primitive numeric types, for
//!   `Option<f64>`, and for text (`str` / `String`), so callers can hand the
//!   detector whatever column representation they already own.
//! - Text cells recognise the usual spreadsheet missing-value markers
//!   (empty, `NA`, `null`, `NaN`, …) as missing observations.
//! - Missing and non-finite values are stored as `NaN`. They keep their
//!   position in the series but are never "available" for window statistics.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed [`NumericSeries`] contains only finite values or `NaN`.
//! - Order is preserved; index `i` of the series is index `i` of the input.
//! - Construction never mutates the caller's data.
//!
//! Testing notes
//! -------------
//! - Unit tests cover text parsing (numbers, whitespace, missing markers,
//!   garbage), normalisation of non-finite values, and the fixed conversion
//!   error.

use crate::detection::errors::{OutlierError, OutlierResult};
use ndarray::Array1;

/// Text cells treated as missing observations rather than conversion errors.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Observation — element-wise conversion to an `f64` observation.
///
/// Returns
/// -------
/// - `Some(x)` with a finite `x` for a regular observation.
/// - `Some(f64::NAN)` for a missing observation.
/// - `None` when the element cannot be interpreted as a number at all.
pub trait Observation {
    fn to_observation(&self) -> Option<f64>;
}

impl Observation for f64 {
    fn to_observation(&self) -> Option<f64> {
        Some(*self)
    }
}

impl Observation for f32 {
    fn to_observation(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl Observation for i32 {
    fn to_observation(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl Observation for i64 {
    fn to_observation(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl Observation for u32 {
    fn to_observation(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl Observation for u64 {
    fn to_observation(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl Observation for Option<f64> {
    fn to_observation(&self) -> Option<f64> {
        Some(self.unwrap_or(f64::NAN))
    }
}

impl Observation for str {
    fn to_observation(&self) -> Option<f64> {
        let cell = self.trim();
        if MISSING_MARKERS.contains(&cell) {
            return Some(f64::NAN);
        }
        cell.parse::<f64>().ok()
    }
}

impl Observation for String {
    fn to_observation(&self) -> Option<f64> {
        self.as_str().to_observation()
    }
}

impl<T: Observation + ?Sized> Observation for &T {
    fn to_observation(&self) -> Option<f64> {
        (**self).to_observation()
    }
}

/// `NumericSeries` — ordered univariate observations with missing markers.
///
/// Fields
/// ------
/// - `values`: `Array1<f64>`
///   Observations in temporal order; `NaN` marks a missing observation.
///
/// Invariants
/// ----------
/// - Every entry is either finite or `NaN` (±∞ are normalised to `NaN`).
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSeries {
    values: Array1<f64>,
}

impl NumericSeries {
    /// Convert raw elements into a [`NumericSeries`].
    ///
    /// Parameters
    /// ----------
    /// - `values`: `&[T]`
    ///   Raw elements in temporal order, any type implementing
    ///   [`Observation`].
    ///
    /// Returns
    /// -------
    /// `OutlierResult<NumericSeries>`
    ///   - `Ok(series)` when every element converts.
    ///   - `Err(OutlierError::NonNumericData)` as soon as one element does not.
    ///
    /// Notes
    /// -----
    /// - No length check happens here; length is a precondition of the
    ///   rolling-statistics stage, which runs after conversion.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_outliers::detection::series::NumericSeries;
    /// let series = NumericSeries::convert(&["1.5", " 2 ", ""]).unwrap();
    /// assert_eq!(series.len(), 3);
    /// assert_eq!(series.available_count(), 2);
    ///
    /// assert!(NumericSeries::convert(&["1.0", "two"]).is_err());
    /// ```
    pub fn convert<T: Observation>(values: &[T]) -> OutlierResult<Self> {
        let values = values
            .iter()
            .map(|raw| raw.to_observation().map(normalise).ok_or(OutlierError::NonNumericData))
            .collect::<OutlierResult<Array1<f64>>>()?;
        Ok(NumericSeries { values })
    }

    /// Observations in temporal order (`NaN` = missing).
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether position `index` holds an available (non-missing) observation.
    pub fn is_available(&self, index: usize) -> bool {
        self.values.get(index).is_some_and(|v| !v.is_nan())
    }

    /// Number of available (non-missing) observations.
    pub fn available_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

impl From<Array1<f64>> for NumericSeries {
    fn from(values: Array1<f64>) -> Self {
        NumericSeries { values: values.mapv(normalise) }
    }
}

impl From<Vec<f64>> for NumericSeries {
    fn from(values: Vec<f64>) -> Self {
        NumericSeries::from(Array1::from(values))
    }
}

#[inline]
fn normalise(value: f64) -> f64 {
    if value.is_finite() { value } else { f64::NAN }
}
