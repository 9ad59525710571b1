//! Property tests for analysis invariants.
//!
//! Uses proptest to verify:
//! 1. Warm-up invalidation holds for any price path
//! 2. Extrema are strict within their neighbourhood
//! 3. The candidate pool never grows between maxima
//! 4. Trades are ordered and never reuse a minimum
//! 5. Summary arithmetic matches the trade list

use proptest::prelude::*;
use swinglab_core::engine::{columns, compute_indicators};
use swinglab_core::extrema::{find_extrema, BoundaryMode};
use swinglab_core::{optimize_trades_traced, PortfolioSummary, PricePoint, Series};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0), min_len..max_len)
}

fn arb_order() -> impl Strategy<Value = usize> {
    1usize..6
}

fn arb_boundary() -> impl Strategy<Value = BoundaryMode> {
    prop_oneof![Just(BoundaryMode::Truncate), Just(BoundaryMode::Clip)]
}

fn series_of(closes: &[f64]) -> Series {
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            PricePoint::from_millis(1_700_000_000_000 + i as i64 * 86_400_000, c, c * 1.01, c * 0.99, c, 500.0)
                .unwrap()
        })
        .collect();
    Series::new(points).unwrap()
}

// ── 1. Warm-up ───────────────────────────────────────────────────────

proptest! {
    /// RSI is undefined for the first 14 points and the short RSIs for the
    /// first 3, whatever the prices.
    #[test]
    fn rsi_warmup_is_forced(closes in arb_closes(20, 60)) {
        let set = compute_indicators(&series_of(&closes));
        for t in 0..14 {
            prop_assert!(set.get(columns::RSI, t).unwrap().is_nan());
        }
        for t in 0..3 {
            prop_assert!(set.get(columns::RSI_3, t).unwrap().is_nan());
            prop_assert!(set.get(columns::STREAK_RSI, t).unwrap().is_nan());
        }
    }

    /// Every column has exactly one value per input point.
    #[test]
    fn columns_are_aligned(closes in arb_closes(1, 40)) {
        let set = compute_indicators(&series_of(&closes));
        for name in columns::ALL {
            prop_assert_eq!(set.column(name).map(|c| c.len()), Some(closes.len()));
        }
    }
}

// ── 2. Extremum strictness ───────────────────────────────────────────

proptest! {
    /// A reported maximum is strictly greater than every in-window
    /// neighbour within its order; minima likewise strictly smaller.
    #[test]
    fn extrema_are_strict(
        closes in arb_closes(2, 80),
        max_order in arb_order(),
        min_order in arb_order(),
        mode in arb_boundary(),
    ) {
        let e = find_extrema(&closes, max_order, min_order, mode).unwrap();
        let n = closes.len();

        for &t in &e.maxima {
            let lo = t.saturating_sub(max_order);
            let hi = (t + max_order).min(n - 1);
            for k in lo..=hi {
                if k != t {
                    prop_assert!(closes[t] > closes[k], "max {} vs {}", t, k);
                }
            }
        }
        for &t in &e.minima {
            let lo = t.saturating_sub(min_order);
            let hi = (t + min_order).min(n - 1);
            for k in lo..=hi {
                if k != t {
                    prop_assert!(closes[t] < closes[k], "min {} vs {}", t, k);
                }
            }
        }
    }

    /// Clip never reports the first or last position.
    #[test]
    fn clip_excludes_edges(closes in arb_closes(2, 80), order in arb_order()) {
        let e = find_extrema(&closes, order, order, BoundaryMode::Clip).unwrap();
        let n = closes.len();
        for &t in e.maxima.iter().chain(&e.minima) {
            prop_assert!(t != 0 && t != n - 1);
        }
    }
}

// ── 3. Pool monotonicity ─────────────────────────────────────────────

proptest! {
    #[test]
    fn pool_never_grows(
        closes in arb_closes(2, 120),
        max_order in arb_order(),
        min_order in arb_order(),
    ) {
        let e = find_extrema(&closes, max_order, min_order, BoundaryMode::Truncate).unwrap();
        let opt = optimize_trades_traced(&closes, &e.maxima, &e.minima).unwrap();

        let mut previous = e.minima.len();
        for step in &opt.steps {
            prop_assert_eq!(step.pool_before, previous);
            prop_assert!(step.pool_after <= step.pool_before);
            previous = step.pool_after;
        }
    }
}

// ── 4. Trade ordering ────────────────────────────────────────────────

proptest! {
    #[test]
    fn trades_are_ordered_and_disjoint(
        closes in arb_closes(2, 120),
        max_order in arb_order(),
        min_order in arb_order(),
        mode in arb_boundary(),
    ) {
        let e = find_extrema(&closes, max_order, min_order, mode).unwrap();
        let opt = optimize_trades_traced(&closes, &e.maxima, &e.minima).unwrap();

        for t in &opt.trades {
            prop_assert!(t.buy_position < t.sell_position);
            prop_assert_eq!(t.buy_price, closes[t.buy_position]);
            prop_assert_eq!(t.sell_price, closes[t.sell_position]);
        }
        for pair in opt.trades.windows(2) {
            prop_assert!(pair[0].sell_position < pair[1].sell_position);
            prop_assert!(pair[0].sell_position < pair[1].buy_position);
        }
    }
}

// ── 5. Summary arithmetic ────────────────────────────────────────────

proptest! {
    #[test]
    fn summary_matches_trades(closes in arb_closes(10, 120), order in arb_order()) {
        let e = find_extrema(&closes, order, order, BoundaryMode::Truncate).unwrap();
        let opt = optimize_trades_traced(&closes, &e.maxima, &e.minima).unwrap();

        match PortfolioSummary::from_trades(&opt.trades) {
            Ok(summary) => {
                let total: f64 = opt.trades.iter().map(|t| t.return_pct).sum();
                prop_assert_eq!(summary.trade_count, opt.trades.len());
                prop_assert!((summary.total_return_pct - total).abs() < 1e-9);
                prop_assert!(
                    (summary.avg_return_per_trade_pct * summary.trade_count as f64 - total).abs() < 1e-6
                );
            }
            Err(_) => prop_assert!(opt.trades.is_empty()),
        }
    }
}
