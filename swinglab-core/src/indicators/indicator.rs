//! Indicator trait and the aligned indicator column set.
//!
//! Indicators are pure functions: a price series in, a numeric column of the
//! same length out. Undefined values (warm-up, zero denominators) are NaN.

use crate::domain::Series;
use std::collections::BTreeMap;

/// Trait for indicators computed over a whole series.
///
/// # Look-ahead guard
/// No value at position t may depend on price data from position t+1 or later.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "MA20", "RSI").
    fn name(&self) -> &str;

    /// Number of leading positions that are always undefined.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire series.
    ///
    /// Returns a `Vec<f64>` of the same length as `series`.
    fn compute(&self, series: &Series) -> Vec<f64>;
}

/// Named indicator columns aligned 1:1 with a series.
///
/// Immutable once built: columns are assembled through [`IndicatorSetBuilder`]
/// and only read afterwards. Names iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    len: usize,
    columns: BTreeMap<String, Vec<f64>>,
}

impl IndicatorSet {
    pub fn builder(len: usize) -> IndicatorSetBuilder {
        IndicatorSetBuilder {
            set: IndicatorSet {
                len,
                columns: BTreeMap::new(),
            },
        }
    }

    /// Value of a named column at a position. NaN means undefined.
    pub fn get(&self, name: &str, position: usize) -> Option<f64> {
        self.columns
            .get(name)
            .and_then(|v| v.get(position).copied())
    }

    /// Value at a position, or `None` when the column is missing or undefined there.
    pub fn defined(&self, name: &str, position: usize) -> Option<f64> {
        self.get(name, position).filter(|v| !v.is_nan())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of positions every column covers.
    pub fn series_len(&self) -> usize {
        self.len
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One-shot builder for [`IndicatorSet`].
#[derive(Debug)]
pub struct IndicatorSetBuilder {
    set: IndicatorSet,
}

impl IndicatorSetBuilder {
    /// Add a column. Its length must match the series length.
    pub fn column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        let name = name.into();
        assert_eq!(
            values.len(),
            self.set.len,
            "indicator '{name}' produced {} values for {} positions",
            values.len(),
            self.set.len
        );
        self.set.columns.insert(name, values);
        self
    }

    /// Compute and add a column from an [`Indicator`].
    pub fn indicator(self, indicator: &dyn Indicator, series: &Series) -> Self {
        let values = indicator.compute(series);
        self.column(indicator.name().to_string(), values)
    }

    pub fn build(self) -> IndicatorSet {
        self.set
    }
}
