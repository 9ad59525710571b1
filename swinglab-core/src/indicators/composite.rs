//! Composite oscillator: mean of RSI, CRSI and stochastic RSI.
//!
//! Undefined wherever any input is undefined. The inputs are not rescaled:
//! stochastic RSI stays in [0, 1] while the other two are in [0, 100].

use super::connors::connors_of_series;
use super::indicator::Indicator;
use super::rolling::mean_of_columns;
use super::rsi::{rsi_of_series, RSI_COM, RSI_INVALID_PREFIX};
use super::stochastic::{stoch_rsi_of_series, STOCH_RSI_PERIOD};
use crate::domain::Series;

pub fn composite_of(rsi: &[f64], crsi: &[f64], stoch_rsi: &[f64]) -> Vec<f64> {
    mean_of_columns(&[rsi, crsi, stoch_rsi])
}

#[derive(Debug, Clone, Default)]
pub struct Composite;

impl Composite {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Composite {
    fn name(&self) -> &str {
        "composite"
    }

    fn lookback(&self) -> usize {
        // CRSI's relative-magnitude window dominates the RSI + stochRSI warm-up (27).
        super::connors::RELATIVE_MAGNITUDE_WINDOW
    }

    fn compute(&self, series: &Series) -> Vec<f64> {
        let closes = series.closes();
        let rsi = rsi_of_series(&closes, RSI_COM, RSI_INVALID_PREFIX);
        let stoch = stoch_rsi_of_series(&rsi, STOCH_RSI_PERIOD);
        let crsi = connors_of_series(&closes).crsi;
        composite_of(&rsi, &crsi, &stoch.stoch_rsi)
    }
}
