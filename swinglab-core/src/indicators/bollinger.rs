//! Bollinger Bands over the typical ("technical") price.
//!
//! TP = (close + low + high) / 3
//! Middle (MA-TP): SMA(TP, period); std: population stddev of TP over period.
//! Upper: middle + mult * std; Lower: middle - mult * std.
//! Lookback: period - 1.

use super::indicator::Indicator;
use super::rolling::{rolling_mean, rolling_std_pop};
use crate::domain::Series;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Upper, format!("BOLU{period}"))
    }

    pub fn middle(period: usize) -> Self {
        Self::with_band(period, 0.0, BollingerBand::Middle, "MA-TP".to_string())
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Lower, format!("BOLD{period}"))
    }

    fn with_band(period: usize, multiplier: f64, band: BollingerBand, name: String) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            band,
            name,
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, series: &Series) -> Vec<f64> {
        let bands = bollinger_of_series(&series.typical_prices(), self.period, self.multiplier);
        match self.band {
            BollingerBand::Upper => bands.upper,
            BollingerBand::Middle => bands.middle,
            BollingerBand::Lower => bands.lower,
        }
    }
}

/// All Bollinger columns for one input series.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerColumns {
    pub middle: Vec<f64>,
    pub std: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger_of_series(values: &[f64], period: usize, multiplier: f64) -> BollingerColumns {
    let middle = rolling_mean(values, period);
    let std = rolling_std_pop(values, period);
    let upper = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m + multiplier * s)
        .collect();
    let lower = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m - multiplier * s)
        .collect();
    BollingerColumns {
        middle,
        std,
        upper,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn middle_is_sma_of_typical_price() {
        // make_series: high = close + 1, low = close - 1 → TP = close
        let series = make_series(&[10.0, 11.0, 12.0, 13.0]);
        let result = Bollinger::middle(3).compute(&series);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bands_symmetric() {
        let cols = bollinger_of_series(&[10.0, 11.0, 15.0, 13.0, 14.0], 3, 2.0);
        for i in 2..5 {
            assert_approx(
                cols.upper[i] - cols.middle[i],
                cols.middle[i] - cols.lower[i],
                DEFAULT_EPSILON,
            );
            assert_approx(cols.upper[i] - cols.middle[i], 2.0 * cols.std[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn constant_price_zero_width() {
        let series = make_series(&[100.0; 25]);
        let upper = Bollinger::upper(20, 2.0).compute(&series);
        let lower = Bollinger::lower(20, 2.0).compute(&series);
        assert!(upper[18].is_nan());
        assert_approx(upper[19], 100.0, DEFAULT_EPSILON);
        assert_approx(lower[24], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn names() {
        assert_eq!(Bollinger::upper(20, 2.0).name(), "BOLU20");
        assert_eq!(Bollinger::lower(20, 2.0).name(), "BOLD20");
        assert_eq!(Bollinger::middle(20).name(), "MA-TP");
        assert_eq!(Bollinger::middle(20).lookback(), 19);
    }
}
