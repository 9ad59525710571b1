//! Relative Strength Index (RSI) with exponential up/down smoothing.
//!
//! delta = x[t] - x[t-1]; up = max(delta, 0); down = max(-delta, 0).
//! ema_up / ema_down use the non-adjusted EWM with alpha = 1 / (com + 1),
//! seeded at the first defined delta. RSI = 100 - 100 / (1 + ema_up / ema_down).
//!
//! The first `invalid_prefix` positions are forced to NaN regardless of the
//! recursion's own warm-up. Zero denominators follow IEEE-754: ema_down == 0
//! saturates at 100, 0/0 is NaN.

use super::ema::{com_alpha, ewm_of_series};
use super::indicator::Indicator;
use super::rolling::diff;
use crate::domain::Series;

/// Center of mass of the standard RSI (14-period Wilder smoothing).
pub const RSI_COM: f64 = 13.0;
pub const RSI_INVALID_PREFIX: usize = 14;

/// Short RSI used by Connors RSI.
pub const SHORT_RSI_COM: f64 = 2.0;
pub const SHORT_RSI_INVALID_PREFIX: usize = 3;

#[derive(Debug, Clone)]
pub struct Rsi {
    com: f64,
    invalid_prefix: usize,
    name: String,
}

impl Rsi {
    /// RSI(14): com = 13, first 14 positions undefined.
    pub fn standard() -> Self {
        Self::new("RSI", RSI_COM, RSI_INVALID_PREFIX)
    }

    /// RSI(3) as used inside Connors RSI: com = 2, first 3 positions undefined.
    pub fn short() -> Self {
        Self::new("RSI-3", SHORT_RSI_COM, SHORT_RSI_INVALID_PREFIX)
    }

    pub fn new(name: impl Into<String>, com: f64, invalid_prefix: usize) -> Self {
        assert!(com >= 0.0, "RSI center of mass must be >= 0");
        Self {
            com,
            invalid_prefix,
            name: name.into(),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.invalid_prefix.max(1)
    }

    fn compute(&self, series: &Series) -> Vec<f64> {
        rsi_of_series(&series.closes(), self.com, self.invalid_prefix)
    }
}

/// RSI of an arbitrary series.
pub fn rsi_of_series(values: &[f64], com: f64, invalid_prefix: usize) -> Vec<f64> {
    let delta = diff(values);
    let up: Vec<f64> = delta
        .iter()
        .map(|&d| if d.is_nan() { d } else { d.max(0.0) })
        .collect();
    let down: Vec<f64> = delta
        .iter()
        .map(|&d| if d.is_nan() { d } else { (-d).max(0.0) })
        .collect();

    let alpha = com_alpha(com);
    let ema_up = ewm_of_series(&up, alpha);
    let ema_down = ewm_of_series(&down, alpha);

    let mut result: Vec<f64> = ema_up
        .iter()
        .zip(&ema_down)
        .map(|(u, d)| 100.0 - 100.0 / (1.0 + u / d))
        .collect();

    for v in result.iter_mut().take(invalid_prefix) {
        *v = f64::NAN;
    }

    result
}
