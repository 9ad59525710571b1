//! Portfolio summary: aggregate statistics over a trade list.

use crate::domain::Trade;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// The average return per trade is undefined for zero trades.
    #[error("no trades: average return per trade is undefined")]
    EmptyTradeSet,
}

/// Aggregate return statistics for one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub trade_count: usize,
    pub total_return_pct: f64,
    pub avg_return_per_trade_pct: f64,
    pub winning_trades: usize,
}

impl PortfolioSummary {
    /// Summarize a non-empty trade list.
    pub fn from_trades(trades: &[Trade]) -> Result<Self, SummaryError> {
        if trades.is_empty() {
            return Err(SummaryError::EmptyTradeSet);
        }
        let total_return_pct = cumulative_return(trades);
        Ok(Self {
            trade_count: trades.len(),
            total_return_pct,
            avg_return_per_trade_pct: total_return_pct / trades.len() as f64,
            winning_trades: trades.iter().filter(|t| t.is_winner()).count(),
        })
    }

    /// Fraction of trades with a positive return.
    pub fn win_rate(&self) -> f64 {
        self.winning_trades as f64 / self.trade_count as f64
    }
}

/// Sum of per-trade percentage returns; 0.0 for an empty list.
pub fn cumulative_return(trades: &[Trade]) -> f64 {
    trades.iter().map(|t| t.return_pct).sum()
}
