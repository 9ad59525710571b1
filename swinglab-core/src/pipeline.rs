//! Analysis pipeline: indicators → extrema → trades → summary.
//!
//! Each call owns its indicator set, extrema lists and pool; nothing is
//! shared between runs, so independent series can be analysed concurrently.

use crate::config::{AnalysisConfig, AnalysisConfigError};
use crate::domain::{Series, Trade};
use crate::engine::compute_indicators;
use crate::extrema::{find_extrema, Extrema, ExtremaError};
use crate::indicators::IndicatorSet;
use crate::optimizer::{optimize_trades_traced, OptimizeError, PoolStep};
use crate::summary::{PortfolioSummary, SummaryError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid analysis config: {0}")]
    InvalidConfig(#[from] AnalysisConfigError),

    #[error("extrema detection failed: {0}")]
    Extrema(#[from] ExtremaError),

    #[error("trade optimization failed: {0}")]
    Optimize(#[from] OptimizeError),
}

/// Everything one end-to-end run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub indicators: IndicatorSet,
    /// Series position of window position 0.
    pub window_start: usize,
    pub window_closes: Vec<f64>,
    pub extrema: Extrema,
    pub trades: Vec<Trade>,
    pub pool_steps: Vec<PoolStep>,
    /// `Err(EmptyTradeSet)` when no maximum found a candidate.
    pub summary: Result<PortfolioSummary, SummaryError>,
}

/// Trades over the trailing `subset_size` closes of `series`.
pub fn optimal_trades(series: &Series, config: &AnalysisConfig) -> Result<Vec<Trade>, AnalysisError> {
    config.validate()?;
    let (_, window) = series.trailing_closes(config.subset_size);
    let extrema = find_extrema(&window, config.maxima_order, config.minima_order, config.boundary)?;
    Ok(optimize_trades_traced(&window, &extrema.maxima, &extrema.minima)?.trades)
}

/// Full run: indicator set for the whole series plus trades and summary
/// for the trailing window.
pub fn analyze(series: &Series, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    config.validate()?;

    let indicators = compute_indicators(series);

    let (window_start, window_closes) = series.trailing_closes(config.subset_size);
    let extrema = find_extrema(
        &window_closes,
        config.maxima_order,
        config.minima_order,
        config.boundary,
    )?;
    let optimization = optimize_trades_traced(&window_closes, &extrema.maxima, &extrema.minima)?;
    let summary = PortfolioSummary::from_trades(&optimization.trades);

    debug!(
        points = series.len(),
        window = window_closes.len(),
        maxima = extrema.maxima.len(),
        minima = extrema.minima.len(),
        trades = optimization.trades.len(),
        "analysis complete"
    );

    Ok(Analysis {
        indicators,
        window_start,
        window_closes,
        extrema,
        trades: optimization.trades,
        pool_steps: optimization.steps,
        summary,
    })
}
