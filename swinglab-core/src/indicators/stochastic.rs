//! Stochastic oscillator (%K / %D).
//!
//! %K[t] = (close[t] - min(low, n)) * 100 / (max(high, n) - min(low, n))
//! %D[t] = SMA(%K, d)
//! A zero high-low range yields ±inf or NaN, never a panic.

use super::indicator::Indicator;
use super::rolling::{rolling_max, rolling_mean, rolling_min};
use crate::domain::Series;

/// Look-back of stochastic RSI over the RSI(14) column.
pub const STOCH_RSI_PERIOD: usize = 14;

/// Which line of the oscillator to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    smoothing: usize,
    line: StochasticLine,
    name: String,
}

impl Stochastic {
    /// Fast line over `period` points.
    pub fn k(period: usize) -> Self {
        assert!(period >= 1, "stochastic period must be >= 1");
        Self {
            period,
            smoothing: 1,
            line: StochasticLine::K,
            name: "%K".to_string(),
        }
    }

    /// Slow line: `smoothing`-point mean of %K.
    pub fn d(period: usize, smoothing: usize) -> Self {
        assert!(period >= 1, "stochastic period must be >= 1");
        assert!(smoothing >= 1, "stochastic smoothing must be >= 1");
        Self {
            period,
            smoothing,
            line: StochasticLine::D,
            name: "%D".to_string(),
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::K => self.period - 1,
            StochasticLine::D => self.period + self.smoothing - 2,
        }
    }

    fn compute(&self, series: &Series) -> Vec<f64> {
        let cols = stochastic_of_series(
            &series.highs(),
            &series.lows(),
            &series.closes(),
            self.period,
            self.smoothing,
        );
        match self.line {
            StochasticLine::K => cols.k,
            StochasticLine::D => cols.d,
        }
    }
}

/// Every column the oscillator derives, including the rolling extremes.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticColumns {
    pub highest_high: Vec<f64>,
    pub lowest_low: Vec<f64>,
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

pub fn stochastic_of_series(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    smoothing: usize,
) -> StochasticColumns {
    let highest_high = rolling_max(highs, period);
    let lowest_low = rolling_min(lows, period);
    let k: Vec<f64> = closes
        .iter()
        .zip(highest_high.iter().zip(&lowest_low))
        .map(|(c, (h, l))| (c - l) * 100.0 / (h - l))
        .collect();
    let d = rolling_mean(&k, smoothing);
    StochasticColumns {
        highest_high,
        lowest_low,
        k,
        d,
    }
}

/// Stochastic RSI: position of RSI within its own rolling range.
///
/// `(rsi - min(rsi, n)) / (max(rsi, n) - min(rsi, n))`, undefined wherever the
/// window holds an undefined RSI or the range is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StochRsiColumns {
    pub rsi_high: Vec<f64>,
    pub rsi_low: Vec<f64>,
    pub stoch_rsi: Vec<f64>,
}

pub fn stoch_rsi_of_series(rsi: &[f64], period: usize) -> StochRsiColumns {
    let rsi_high = rolling_max(rsi, period);
    let rsi_low = rolling_min(rsi, period);
    let stoch_rsi = rsi
        .iter()
        .zip(rsi_high.iter().zip(&rsi_low))
        .map(|(r, (h, l))| (r - l) / (h - l))
        .collect();
    StochRsiColumns {
        rsi_high,
        rsi_low,
        stoch_rsi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn k_warmup_and_value() {
        // high = close + 1, low = close - 1
        let closes: Vec<f64> = (0..16).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&closes);
        let k = Stochastic::k(14).compute(&series);
        assert!(k[..13].iter().all(|v| v.is_nan()));
        // t = 13: lows 99..=112 → 99, highs 101..=114 → 114, close 113
        assert_approx(k[13], (113.0 - 99.0) * 100.0 / (114.0 - 99.0), DEFAULT_EPSILON);
    }

    #[test]
    fn d_is_three_point_mean_of_k() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let series = make_series(&closes);
        let k = Stochastic::k(14).compute(&series);
        let d = Stochastic::d(14, 3).compute(&series);
        assert!(d[14].is_nan());
        assert_approx(d[15], (k[13] + k[14] + k[15]) / 3.0, DEFAULT_EPSILON);
        assert_eq!(Stochastic::d(14, 3).lookback(), 15);
    }

    #[test]
    fn stoch_rsi_zero_range_is_undefined() {
        let rsi = [50.0; 5];
        let cols = stoch_rsi_of_series(&rsi, 3);
        assert!(cols.stoch_rsi.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn stoch_rsi_scales_into_unit_range() {
        let rsi = [f64::NAN, 20.0, 40.0, 30.0, 60.0];
        let cols = stoch_rsi_of_series(&rsi, 3);
        assert!(cols.stoch_rsi[2].is_nan()); // window holds NaN
        assert_approx(cols.stoch_rsi[3], 0.5, DEFAULT_EPSILON);
        assert_approx(cols.stoch_rsi[4], 1.0, DEFAULT_EPSILON);
        assert_approx(cols.rsi_low[4], 30.0, DEFAULT_EPSILON);
    }
}
