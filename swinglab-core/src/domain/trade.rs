//! Trade: a matched buy/sell position pair inside an analysis window.

use serde::{Deserialize, Serialize};

/// A retrospective buy at a local minimum and sell at a later local maximum.
///
/// Positions are relative to the analysed window. Serialized field names
/// follow the trade-list output format (`buy_index`, `sell_index`, `return`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "buy_index")]
    pub buy_position: usize,
    pub buy_price: f64,
    #[serde(rename = "sell_index")]
    pub sell_position: usize,
    pub sell_price: f64,
    #[serde(rename = "return")]
    pub return_pct: f64,
}

impl Trade {
    /// Build a trade, deriving `return_pct` from the two prices.
    pub fn new(buy_position: usize, buy_price: f64, sell_position: usize, sell_price: f64) -> Self {
        debug_assert!(
            buy_position < sell_position,
            "buy position {buy_position} must precede sell position {sell_position}"
        );
        Self {
            buy_position,
            buy_price,
            sell_position,
            sell_price,
            return_pct: return_pct(buy_price, sell_price),
        }
    }

    /// Number of positions between buy and sell.
    pub fn holding_span(&self) -> usize {
        self.sell_position - self.buy_position
    }

    pub fn is_winner(&self) -> bool {
        self.return_pct > 0.0
    }
}

/// Percentage return of selling at `sell_price` after buying at `buy_price`.
pub fn return_pct(buy_price: f64, sell_price: f64) -> f64 {
    (sell_price / buy_price - 1.0) * 100.0
}
