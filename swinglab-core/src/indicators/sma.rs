//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices: MA_n[t] = mean(close[t-n+1..=t]).
//! Lookback: period - 1.

use super::indicator::Indicator;
use super::rolling::rolling_mean;
use crate::domain::Series;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("MA{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, series: &Series) -> Vec<f64> {
        rolling_mean(&series.closes(), self.period)
    }
}
