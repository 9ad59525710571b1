//! Greedy trade optimizer over local extrema.
//!
//! Walks the maxima in ascending order. Each maximum takes every pooled
//! minimum strictly before it as its candidate set, buys at the candidate
//! with the highest return, and then removes the *whole* candidate set from
//! the pool. Later maxima therefore never look back past the next
//! unconsumed minimum, and no two trades share a minimum.
//!
//! Tie-break among equal returns: lowest buy price, then lowest position.

use crate::domain::trade::return_pct;
use crate::domain::Trade;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    #[error("{which} position {position} is outside a window of {window} points")]
    PositionOutOfWindow {
        which: &'static str,
        position: usize,
        window: usize,
    },

    #[error("{which} positions are not strictly ascending at {position}")]
    UnsortedPositions {
        which: &'static str,
        position: usize,
    },
}

/// Pool bookkeeping for one maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStep {
    pub maxima_position: usize,
    pub pool_before: usize,
    pub pool_after: usize,
    pub traded: bool,
}

/// Trades plus the per-maximum pool history that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    pub trades: Vec<Trade>,
    pub steps: Vec<PoolStep>,
}

/// Trades for `closes` given ascending maxima and minima positions.
pub fn optimize_trades(
    closes: &[f64],
    maxima: &[usize],
    minima: &[usize],
) -> Result<Vec<Trade>, OptimizeError> {
    optimize_trades_traced(closes, maxima, minima).map(|o| o.trades)
}

/// Like [`optimize_trades`], also returning the pool size at every step.
pub fn optimize_trades_traced(
    closes: &[f64],
    maxima: &[usize],
    minima: &[usize],
) -> Result<Optimization, OptimizeError> {
    validate_positions("maxima", maxima, closes.len())?;
    validate_positions("minima", minima, closes.len())?;

    let mut pool: BTreeSet<usize> = minima.iter().copied().collect();
    let mut trades = Vec::new();
    let mut steps = Vec::with_capacity(maxima.len());

    for &sell in maxima {
        let pool_before = pool.len();
        // `pool` keeps positions < sell; everything else stays available.
        let later = pool.split_off(&sell);
        let candidates = std::mem::replace(&mut pool, later);

        let Some(&first) = candidates.first() else {
            debug!(sell, pool = pool_before, "no candidate minima, skipping maximum");
            steps.push(PoolStep {
                maxima_position: sell,
                pool_before,
                pool_after: pool.len(),
                traded: false,
            });
            continue;
        };

        let buy = best_buy(closes, sell, first, &candidates);
        let trade = Trade::new(buy, closes[buy], sell, closes[sell]);
        debug!(
            buy,
            sell,
            return_pct = trade.return_pct,
            consumed = candidates.len(),
            pool = pool.len(),
            "trade matched"
        );
        trades.push(trade);
        steps.push(PoolStep {
            maxima_position: sell,
            pool_before,
            pool_after: pool.len(),
            traded: true,
        });
    }

    Ok(Optimization { trades, steps })
}

/// Candidate with the highest return; ties go to the lower price, then the
/// lower position. `candidates` iterates in ascending position order.
fn best_buy(closes: &[f64], sell: usize, first: usize, candidates: &BTreeSet<usize>) -> usize {
    let sell_price = closes[sell];
    let mut best = first;
    let mut best_return = return_pct(closes[first], sell_price);

    for &b in candidates.iter().skip(1) {
        let r = return_pct(closes[b], sell_price);
        if r > best_return || (r == best_return && closes[b] < closes[best]) {
            best = b;
            best_return = r;
        }
    }

    best
}

fn validate_positions(
    which: &'static str,
    positions: &[usize],
    window: usize,
) -> Result<(), OptimizeError> {
    if let Some(&position) = positions.iter().find(|&&p| p >= window) {
        return Err(OptimizeError::PositionOutOfWindow {
            which,
            position,
            window,
        });
    }
    if let Some(pair) = positions.windows(2).find(|w| w[1] <= w[0]) {
        return Err(OptimizeError::UnsortedPositions {
            which,
            position: pair[1],
        });
    }
    Ok(())
}
