//! Analysis runner: wires loading, the core pipeline and reporting together.
//!
//! Entry points:
//! - `run_series()`: analyse one pre-loaded series. No I/O.
//! - `run_many()`: load and analyse every series of a `RunConfig` in parallel.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use swinglab_core::{
    analyze, Analysis, AnalysisConfig, AnalysisError, Extrema, PoolStep, PortfolioSummary, Series,
    Trade,
};

use crate::config::{ConfigError, RunConfig, SeriesSpec};
use crate::data_loader::{load_csv, LoadError, LoadedSeries};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Serializable outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub config: AnalysisConfig,
    pub dataset_hash: String,
    pub has_synthetic: bool,
    pub point_count: usize,
    pub first_timestamp: DateTime<Utc>,
    pub last_timestamp: DateTime<Utc>,
    /// Series position of the first window point.
    pub window_start: usize,
    pub window_len: usize,
    pub extrema: Extrema,
    pub trades: Vec<Trade>,
    pub pool_steps: Vec<PoolStep>,
    /// None when no trade was produced.
    pub summary: Option<PortfolioSummary>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl AnalysisReport {
    fn new(loaded: &LoadedSeries, config: &AnalysisConfig, analysis: &Analysis) -> Self {
        let points = loaded.series.points();
        // Series is never empty; fall back to the epoch only to stay total.
        let first_timestamp = points.first().map(|p| p.timestamp).unwrap_or_default();
        let last_timestamp = points.last().map(|p| p.timestamp).unwrap_or_default();

        Self {
            schema_version: SCHEMA_VERSION,
            symbol: loaded.symbol.clone(),
            config: *config,
            dataset_hash: loaded.dataset_hash.clone(),
            has_synthetic: loaded.has_synthetic,
            point_count: points.len(),
            first_timestamp,
            last_timestamp,
            window_start: analysis.window_start,
            window_len: analysis.window_closes.len(),
            extrema: analysis.extrema.clone(),
            trades: analysis.trades.clone(),
            pool_steps: analysis.pool_steps.clone(),
            summary: analysis.summary.ok(),
        }
    }
}

/// Everything a run produced: the report plus the in-memory inputs and
/// indicator set needed for CSV export.
#[derive(Debug, Clone)]
pub struct SeriesRun {
    pub report: AnalysisReport,
    pub series: Series,
    pub analysis: Analysis,
}

/// Analyse a pre-loaded series.
pub fn run_series(loaded: &LoadedSeries, config: &AnalysisConfig) -> Result<SeriesRun, RunError> {
    let start = Instant::now();
    let analysis = analyze(&loaded.series, config)?;
    let report = AnalysisReport::new(loaded, config, &analysis);

    info!(
        symbol = %loaded.symbol,
        points = report.point_count,
        trades = report.trades.len(),
        total_return_pct = report.summary.map(|s| s.total_return_pct),
        synthetic = loaded.has_synthetic,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "series analysed"
    );

    Ok(SeriesRun {
        report,
        series: loaded.series.clone(),
        analysis,
    })
}

/// Load and analyse one configured series.
pub fn run_spec(spec: &SeriesSpec, config: &AnalysisConfig) -> Result<SeriesRun, RunError> {
    let loaded = load_csv(&spec.path, Some(&spec.symbol))?;
    run_series(&loaded, config)
}

/// Run every configured series in parallel.
///
/// Each run owns its own state; a failure in one series does not affect the
/// others. Results come back in configuration order.
pub fn run_many(config: &RunConfig) -> Vec<(String, Result<SeriesRun, RunError>)> {
    let start = Instant::now();
    let results: Vec<(String, Result<SeriesRun, RunError>)> = config
        .series
        .par_iter()
        .map(|spec| (spec.symbol.clone(), run_spec(spec, &config.analysis)))
        .collect();

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    for (symbol, result) in &results {
        if let Err(e) = result {
            warn!(%symbol, error = %e, "series run failed");
        }
    }
    info!(
        series = results.len(),
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch complete"
    );
    results
}
