//! Swinglab Core: price series, indicators, extrema, trade optimization.
//!
//! This crate contains the analytical heart of swinglab:
//! - Domain types (price points, validated series, trades)
//! - Indicator implementations and the aligned `IndicatorSet`
//! - Indicator engine computing every column in one pure pass
//! - Local extrema detection with configurable neighbourhoods
//! - Greedy trade optimizer with pool consumption
//! - Portfolio summary and the end-to-end `analyze` pipeline
//!
//! Nothing here performs I/O.

pub mod config;
pub mod domain;
pub mod engine;
pub mod extrema;
pub mod indicators;
pub mod optimizer;
pub mod pipeline;
pub mod summary;

pub use config::{AnalysisConfig, AnalysisConfigError};
pub use domain::{PricePoint, Series, SeriesError, Trade};
pub use engine::compute_indicators;
pub use extrema::{find_extrema, BoundaryMode, Extrema, ExtremaError, Extremum, ExtremumKind};
pub use indicators::{Indicator, IndicatorSet};
pub use optimizer::{optimize_trades, optimize_trades_traced, OptimizeError, Optimization, PoolStep};
pub use pipeline::{analyze, optimal_trades, Analysis, AnalysisError};
pub use summary::{cumulative_return, PortfolioSummary, SummaryError};
