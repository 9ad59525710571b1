//! Connors RSI (CRSI): mean of a short RSI, a streak RSI and a
//! return-percentile ("relative magnitude") measure.
//!
//! crsi(close) = avg(rsi3(close), rsi3(streak(close)), relative_magnitude(close))
//!
//! RSI-3 and streak-RSI use com = 2 with the first 3 positions forced
//! undefined. Relative magnitude needs a full window of 100 one-period returns.

use super::indicator::Indicator;
use super::rolling::{mean_of_columns, pct_change, rolling_apply};
use super::rsi::{rsi_of_series, SHORT_RSI_COM, SHORT_RSI_INVALID_PREFIX};
use super::streak::streak_of_series;
use crate::domain::Series;

pub const RELATIVE_MAGNITUDE_WINDOW: usize = 100;

/// The three components plus the intermediate series they derive from.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnorsColumns {
    pub rsi3: Vec<f64>,
    pub streak: Vec<f64>,
    pub streak_rsi: Vec<f64>,
    pub ret1: Vec<f64>,
    pub relative_magnitude: Vec<f64>,
    pub crsi: Vec<f64>,
}

pub fn connors_of_series(closes: &[f64]) -> ConnorsColumns {
    let rsi3 = rsi_of_series(closes, SHORT_RSI_COM, SHORT_RSI_INVALID_PREFIX);
    let streak = streak_of_series(closes);
    let streak_rsi = rsi_of_series(&streak, SHORT_RSI_COM, SHORT_RSI_INVALID_PREFIX);
    let ret1 = pct_change(closes);
    let relative_magnitude = relative_magnitude_of_returns(&ret1, RELATIVE_MAGNITUDE_WINDOW);
    let crsi = mean_of_columns(&[&rsi3, &streak_rsi, &relative_magnitude]);
    ConnorsColumns {
        rsi3,
        streak,
        streak_rsi,
        ret1,
        relative_magnitude,
        crsi,
    }
}

/// Percentage of the trailing `window` returns strictly below the latest one.
pub fn relative_magnitude_of_returns(returns: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(returns, window, |w| {
        let latest = w[w.len() - 1];
        let below = w.iter().filter(|&&r| r < latest).count();
        below as f64 * 100.0 / w.len() as f64
    })
}

#[derive(Debug, Clone, Default)]
pub struct ConnorsRsi;

impl ConnorsRsi {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for ConnorsRsi {
    fn name(&self) -> &str {
        "CRSI"
    }

    /// Relative magnitude is the slowest component: first return at 1,
    /// first full window ending at `RELATIVE_MAGNITUDE_WINDOW`.
    fn lookback(&self) -> usize {
        RELATIVE_MAGNITUDE_WINDOW
    }

    fn compute(&self, series: &Series) -> Vec<f64> {
        connors_of_series(&series.closes()).crsi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 8.0 + (i as f64 * 0.05))
            .collect()
    }

    #[test]
    fn warmups() {
        let cols = connors_of_series(&wave(130));
        assert!(cols.rsi3[..3].iter().all(|v| v.is_nan()));
        assert!(cols.streak_rsi[..3].iter().all(|v| v.is_nan()));
        assert!(cols.relative_magnitude[..100].iter().all(|v| v.is_nan()));
        assert!(!cols.relative_magnitude[100].is_nan());
        assert!(cols.crsi[..100].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn crsi_is_mean_of_components() {
        let cols = connors_of_series(&wave(130));
        for t in 100..130 {
            let expected = (cols.rsi3[t] + cols.streak_rsi[t] + cols.relative_magnitude[t]) / 3.0;
            if expected.is_nan() {
                assert!(cols.crsi[t].is_nan());
            } else {
                assert_approx(cols.crsi[t], expected, DEFAULT_EPSILON);
            }
        }
    }

    #[test]
    fn streak_rsi_matches_rsi_of_streak() {
        let closes = wave(40);
        let cols = connors_of_series(&closes);
        let direct = rsi_of_series(&streak_of_series(&closes), 2.0, 3);
        for (a, b) in cols.streak_rsi.iter().zip(&direct) {
            assert!(a.is_nan() && b.is_nan() || (a - b).abs() < DEFAULT_EPSILON);
        }
    }

    #[test]
    fn relative_magnitude_counts_strictly_lower() {
        let returns = [f64::NAN, 1.0, 3.0, 2.0, 2.0];
        let rm = relative_magnitude_of_returns(&returns, 4);
        assert!(rm[3].is_nan());
        // window [1, 3, 2, 2], latest 2: only 1 is strictly lower
        assert_approx(rm[4], 25.0, DEFAULT_EPSILON);
    }

    #[test]
    fn indicator_matches_columns() {
        let closes = wave(120);
        let series = make_series(&closes);
        let result = ConnorsRsi::new().compute(&series);
        assert_eq!(result.len(), 120);
        assert!(result[..100].iter().all(|v| v.is_nan()));
        assert_eq!(ConnorsRsi::new().name(), "CRSI");
    }
}
