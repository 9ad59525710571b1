//! Exponential Moving Average (EMA), non-adjusted recursive form.
//!
//! EMA[0] = x[0]; EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1].
//! Span form: alpha = 2 / (span + 1). Center-of-mass form: alpha = 1 / (com + 1).
//! Leading NaN inputs stay NaN and the recursion seeds at the first defined
//! value. A NaN after the seed holds the previous average.
//! Lookback: 0.

use super::indicator::Indicator;
use crate::domain::Series;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("EMA{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, series: &Series) -> Vec<f64> {
        ema_of_series(&series.closes(), self.span)
    }
}

/// Smoothing factor for a span.
pub fn span_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Smoothing factor for a center of mass.
pub fn com_alpha(com: f64) -> f64 {
    1.0 / (com + 1.0)
}

/// Non-adjusted exponentially weighted mean with an explicit `alpha`.
pub fn ewm_of_series(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    let mut prev: Option<f64> = None;

    for (out, &v) in result.iter_mut().zip(values) {
        let next = match (prev, v.is_nan()) {
            (None, true) => continue,
            (None, false) => v,
            (Some(p), true) => p,
            (Some(p), false) => alpha * v + (1.0 - alpha) * p,
        };
        *out = next;
        prev = Some(next);
    }

    result
}

/// EMA of an arbitrary series with the given span.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    ewm_of_series(values, span_alpha(span))
}

/// MACD line: EMA12 - EMA26 of the input.
pub fn macd_of_series(values: &[f64]) -> Vec<f64> {
    let fast = ema_of_series(values, 12);
    let slow = ema_of_series(values, 26);
    fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
}
