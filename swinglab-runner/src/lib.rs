//! Swinglab Runner: series loading, run configuration, batch runs, export.
//!
//! This crate builds on `swinglab-core` to provide:
//! - CSV loading with canonicalization and a synthetic fallback
//! - TOML run configuration with content-addressed run ids
//! - Single-series and parallel multi-series runs
//! - JSON, CSV and Markdown artifacts

pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use config::{ConfigError, OutputConfig, RunConfig, RunId, SeriesSpec};
pub use data_loader::{
    canonicalize, dataset_hash, load_csv, load_from_reader, synthetic_series, Canonical,
    LoadError, LoadedSeries,
};
pub use export::{
    export_indicators_csv, export_json, export_trades_csv, generate_report, import_json,
    load_artifacts, save_artifacts,
};
pub use runner::{run_many, run_series, run_spec, AnalysisReport, RunError, SeriesRun, SCHEMA_VERSION};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn run_config_is_send_sync() {
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
    }

    #[test]
    fn loaded_series_is_send_sync() {
        assert_send::<LoadedSeries>();
        assert_sync::<LoadedSeries>();
    }

    #[test]
    fn series_run_is_send_sync() {
        assert_send::<SeriesRun>();
        assert_sync::<SeriesRun>();
        assert_send::<AnalysisReport>();
        assert_sync::<AnalysisReport>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }
}
