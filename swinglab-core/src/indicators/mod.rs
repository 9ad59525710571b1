//! Concrete indicator implementations and shared helpers.
//!
//! Each indicator is available two ways: as an `Indicator` over a `Series`
//! (name, lookback, compute) and as a pure function over `&[f64]` so that
//! composed indicators (CRSI, stochastic RSI, composite) are explicit
//! function composition rather than column lookups.

pub mod bollinger;
pub mod composite;
pub mod connors;
pub mod ema;
pub mod indicator;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod streak;

pub use bollinger::{bollinger_of_series, Bollinger, BollingerBand, BollingerColumns};
pub use composite::{composite_of, Composite};
pub use connors::{connors_of_series, relative_magnitude_of_returns, ConnorsColumns, ConnorsRsi};
pub use ema::{com_alpha, ema_of_series, ewm_of_series, macd_of_series, span_alpha, Ema};
pub use indicator::{Indicator, IndicatorSet, IndicatorSetBuilder};
pub use rsi::{rsi_of_series, Rsi};
pub use sma::Sma;
pub use stochastic::{
    stoch_rsi_of_series, stochastic_of_series, StochRsiColumns, Stochastic, StochasticColumns,
    StochasticLine,
};
pub use streak::{streak_of_series, StreakState};

/// Build a series from close prices for testing.
///
/// open = close, high = close + 1, low = close - 1 (so the typical price
/// equals the close), volume = 1000, one point per minute.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> crate::domain::Series {
    use crate::domain::{PricePoint, Series};
    let base = 1_704_153_600_000_i64; // 2024-01-02T00:00:00Z
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PricePoint::from_millis(
                base + i as i64 * 60_000,
                close,
                close + 1.0,
                close - 1.0,
                close,
                1000.0,
            )
            .unwrap()
        })
        .collect();
    Series::new(points).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
