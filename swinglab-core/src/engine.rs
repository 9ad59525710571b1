//! Indicator engine: one pure pass from a series to its full indicator set.
//!
//! Every column is computed by explicit function composition from the raw
//! price columns; no column is read back from the set while it is built.

use crate::domain::Series;
use crate::indicators::rolling::{diff, rolling_mean};
use crate::indicators::rsi::{RSI_COM, RSI_INVALID_PREFIX};
use crate::indicators::stochastic::STOCH_RSI_PERIOD;
use crate::indicators::{
    bollinger_of_series, composite_of, connors_of_series, ema_of_series, macd_of_series,
    rsi_of_series, stoch_rsi_of_series, stochastic_of_series, IndicatorSet,
};
use tracing::debug;

/// Column names of the indicator set.
pub mod columns {
    pub const MA7: &str = "MA7";
    pub const MA20: &str = "MA20";
    pub const TP: &str = "TP";
    pub const STD: &str = "std";
    pub const MA_TP: &str = "MA-TP";
    pub const BOLU20: &str = "BOLU20";
    pub const BOLD20: &str = "BOLD20";
    pub const EMA12: &str = "EMA12";
    pub const EMA20: &str = "EMA20";
    pub const EMA26: &str = "EMA26";
    pub const EMA50: &str = "EMA50";
    pub const EMA100: &str = "EMA100";
    pub const MACD: &str = "MACD";
    pub const DELTA: &str = "delta";
    pub const RSI: &str = "RSI";
    pub const RSI_HIGH_14: &str = "14-RSI-high";
    pub const RSI_LOW_14: &str = "14-RSI-low";
    pub const STOCH_RSI: &str = "stochRSI";
    pub const HIGH_14: &str = "14-high";
    pub const LOW_14: &str = "14-low";
    pub const K: &str = "%K";
    pub const D: &str = "%D";
    pub const RSI_3: &str = "RSI-3";
    pub const STREAK: &str = "streak";
    pub const STREAK_RSI: &str = "streak-RSI";
    pub const RET1: &str = "ret1";
    pub const RELATIVE_MAGNITUDE: &str = "relative-magnitude";
    pub const CRSI: &str = "CRSI";
    pub const COMPOSITE: &str = "composite";

    /// Every column the engine produces.
    pub const ALL: [&str; 29] = [
        MA7,
        MA20,
        TP,
        STD,
        MA_TP,
        BOLU20,
        BOLD20,
        EMA12,
        EMA20,
        EMA26,
        EMA50,
        EMA100,
        MACD,
        DELTA,
        RSI,
        RSI_HIGH_14,
        RSI_LOW_14,
        STOCH_RSI,
        HIGH_14,
        LOW_14,
        K,
        D,
        RSI_3,
        STREAK,
        STREAK_RSI,
        RET1,
        RELATIVE_MAGNITUDE,
        CRSI,
        COMPOSITE,
    ];
}

const BOLLINGER_PERIOD: usize = 20;
const BOLLINGER_MULTIPLIER: f64 = 2.0;
const STOCHASTIC_PERIOD: usize = 14;
const STOCHASTIC_SMOOTHING: usize = 3;
const EMA_SPANS: [(usize, &str); 5] = [
    (12, columns::EMA12),
    (20, columns::EMA20),
    (26, columns::EMA26),
    (50, columns::EMA50),
    (100, columns::EMA100),
];

/// Compute every indicator column for `series`.
pub fn compute_indicators(series: &Series) -> IndicatorSet {
    let closes = series.closes();
    let highs = series.highs();
    let lows = series.lows();
    let tp = series.typical_prices();

    let bands = bollinger_of_series(&tp, BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER);

    let emas: Vec<(&str, Vec<f64>)> = EMA_SPANS
        .iter()
        .map(|&(span, name)| (name, ema_of_series(&closes, span)))
        .collect();

    let rsi = rsi_of_series(&closes, RSI_COM, RSI_INVALID_PREFIX);
    let stoch_rsi = stoch_rsi_of_series(&rsi, STOCH_RSI_PERIOD);
    let stochastic = stochastic_of_series(
        &highs,
        &lows,
        &closes,
        STOCHASTIC_PERIOD,
        STOCHASTIC_SMOOTHING,
    );
    let connors = connors_of_series(&closes);
    let composite = composite_of(&rsi, &connors.crsi, &stoch_rsi.stoch_rsi);

    let mut builder = IndicatorSet::builder(series.len())
        .column(columns::MA7, rolling_mean(&closes, 7))
        .column(columns::MA20, rolling_mean(&closes, 20))
        .column(columns::TP, tp)
        .column(columns::STD, bands.std)
        .column(columns::MA_TP, bands.middle)
        .column(columns::BOLU20, bands.upper)
        .column(columns::BOLD20, bands.lower);
    for (name, values) in emas {
        builder = builder.column(name, values);
    }
    let set = builder
        .column(columns::MACD, macd_of_series(&closes))
        .column(columns::DELTA, diff(&closes))
        .column(columns::RSI, rsi)
        .column(columns::RSI_HIGH_14, stoch_rsi.rsi_high)
        .column(columns::RSI_LOW_14, stoch_rsi.rsi_low)
        .column(columns::STOCH_RSI, stoch_rsi.stoch_rsi)
        .column(columns::HIGH_14, stochastic.highest_high)
        .column(columns::LOW_14, stochastic.lowest_low)
        .column(columns::K, stochastic.k)
        .column(columns::D, stochastic.d)
        .column(columns::RSI_3, connors.rsi3)
        .column(columns::STREAK, connors.streak)
        .column(columns::STREAK_RSI, connors.streak_rsi)
        .column(columns::RET1, connors.ret1)
        .column(columns::RELATIVE_MAGNITUDE, connors.relative_magnitude)
        .column(columns::CRSI, connors.crsi)
        .column(columns::COMPOSITE, composite)
        .build();

    debug!(
        points = series.len(),
        columns = set.len(),
        "indicator set computed"
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{
        assert_approx, make_series, Ema, Indicator, Rsi, Sma, DEFAULT_EPSILON,
    };

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 6.0 + (i as f64 * 0.11).cos() * 2.0)
            .collect()
    }

    #[test]
    fn produces_every_column_aligned() {
        let series = make_series(&wave(150));
        let set = compute_indicators(&series);
        assert_eq!(set.len(), columns::ALL.len());
        for name in columns::ALL {
            assert_eq!(set.column(name).map(<[f64]>::len), Some(150), "{name}");
        }
    }

    #[test]
    fn matches_standalone_indicators() {
        let series = make_series(&wave(60));
        let set = compute_indicators(&series);
        for (indicator, name) in [
            (Box::new(Sma::new(20)) as Box<dyn Indicator>, columns::MA20),
            (Box::new(Ema::new(26)), columns::EMA26),
            (Box::new(Rsi::standard()), columns::RSI),
        ] {
            let direct = indicator.compute(&series);
            let column = set.column(name).unwrap();
            for (a, b) in direct.iter().zip(column) {
                assert!(a.is_nan() && b.is_nan() || (a - b).abs() < DEFAULT_EPSILON);
            }
        }
    }

    #[test]
    fn warmup_invalidation() {
        let series = make_series(&wave(150));
        let set = compute_indicators(&series);
        for t in 0..14 {
            assert!(set.get(columns::RSI, t).unwrap().is_nan(), "RSI at {t}");
        }
        for t in 0..3 {
            assert!(set.get(columns::RSI_3, t).unwrap().is_nan());
            assert!(set.get(columns::STREAK_RSI, t).unwrap().is_nan());
        }
        for t in 0..19 {
            assert!(set.get(columns::BOLU20, t).unwrap().is_nan());
        }
        assert!(set.defined(columns::BOLU20, 19).is_some());
        assert!(set.defined(columns::EMA100, 0).is_some());
    }

    #[test]
    fn macd_is_ema_difference() {
        let series = make_series(&wave(40));
        let set = compute_indicators(&series);
        for t in 0..40 {
            let expected = set.get(columns::EMA12, t).unwrap() - set.get(columns::EMA26, t).unwrap();
            assert_approx(set.get(columns::MACD, t).unwrap(), expected, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_bands_bracket_mean() {
        let series = make_series(&wave(40));
        let set = compute_indicators(&series);
        for t in 19..40 {
            let std = set.get(columns::STD, t).unwrap();
            let mid = set.get(columns::MA_TP, t).unwrap();
            assert_approx(set.get(columns::BOLU20, t).unwrap(), mid + 2.0 * std, DEFAULT_EPSILON);
            assert_approx(set.get(columns::BOLD20, t).unwrap(), mid - 2.0 * std, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn short_series_is_all_warmup_where_needed() {
        let series = make_series(&[10.0, 11.0, 12.0]);
        let set = compute_indicators(&series);
        assert!(set.column(columns::MA7).unwrap().iter().all(|v| v.is_nan()));
        assert!(set.column(columns::CRSI).unwrap().iter().all(|v| v.is_nan()));
        assert_eq!(set.column(columns::EMA12).unwrap()[0], 10.0);
    }
}
