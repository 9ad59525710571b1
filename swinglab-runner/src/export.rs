//! Reporting and export: JSON, CSV, and Markdown artifact generation.
//!
//! - **JSON**: full `AnalysisReport` serialization with schema versioning
//! - **CSV**: the trade list, and the series with every indicator column
//! - **Markdown**: human-readable single-run report
//!
//! Persisted reports include a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use swinglab_core::{IndicatorSet, Series, Trade};

use crate::runner::{AnalysisReport, SeriesRun, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AnalysisReport` to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export a trade list as CSV.
///
/// Columns: buy_index, buy_price, sell_index, sell_price, return
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["buy_index", "buy_price", "sell_index", "sell_price", "return"])?;

    for t in trades {
        wtr.write_record([
            t.buy_position.to_string(),
            t.buy_price.to_string(),
            t.sell_position.to_string(),
            t.sell_price.to_string(),
            t.return_pct.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export the series with every indicator column, one row per point.
///
/// Columns: timestamp (ms), open, high, low, close, volume, then indicator
/// columns in name order. Undefined values are written as empty fields.
pub fn export_indicators_csv(series: &Series, indicators: &IndicatorSet) -> Result<String> {
    if indicators.series_len() != series.len() {
        bail!(
            "indicator set covers {} points but the series has {}",
            indicators.series_len(),
            series.len()
        );
    }

    let columns: Vec<(&str, &[f64])> = indicators.columns().collect();
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = vec!["timestamp", "open", "high", "low", "close", "volume"];
    header.extend(columns.iter().map(|(name, _)| *name));
    wtr.write_record(&header)?;

    let mut row: Vec<String> = Vec::with_capacity(header.len());
    for (t, p) in series.iter().enumerate() {
        row.clear();
        row.push(p.timestamp.timestamp_millis().to_string());
        for v in [p.open, p.high, p.low, p.close, p.volume] {
            row.push(v.to_string());
        }
        for (_, values) in &columns {
            row.push(format_value(values[t]));
        }
        wtr.write_record(&row)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        v.to_string()
    }
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a single run.
///
/// Creates `{symbol}_{hash prefix}/` under `output_dir` containing:
/// - `report.json`: the full `AnalysisReport`
/// - `trades.csv`: the trade list
/// - `indicators.csv`: series plus every indicator column
/// - `report.md`: Markdown summary
///
/// The directory name is derived from the dataset hash, so re-running the
/// same data overwrites the previous artifacts. Returns the directory path.
pub fn save_artifacts(run: &SeriesRun, output_dir: &Path) -> Result<PathBuf> {
    let report = &run.report;
    let hash = &report.dataset_hash;
    let dirname = format!("{}_{}", report.symbol, hash.get(..12).unwrap_or(hash));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    write_file(&run_dir.join("report.json"), &export_json(report)?)?;
    write_file(&run_dir.join("trades.csv"), &export_trades_csv(&report.trades)?)?;
    write_file(
        &run_dir.join("indicators.csv"),
        &export_indicators_csv(&run.series, &run.analysis.indicators)?,
    )?;
    write_file(&run_dir.join("report.md"), &generate_report(report))?;

    Ok(run_dir)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Load an `AnalysisReport` from an artifact directory's report.json.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for a single run.
pub fn generate_report(report: &AnalysisReport) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Swing Trade Report\n\n");

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Symbol | {} |\n", report.symbol));
    md.push_str(&format!(
        "| Period | {} to {} |\n",
        report.first_timestamp.format("%Y-%m-%d %H:%M"),
        report.last_timestamp.format("%Y-%m-%d %H:%M")
    ));
    md.push_str(&format!("| Points | {} |\n", report.point_count));
    md.push_str(&format!(
        "| Window | last {} points (from position {}) |\n",
        report.window_len, report.window_start
    ));
    md.push_str(&format!(
        "| Orders | maxima {}, minima {} ({:?}) |\n",
        report.config.maxima_order, report.config.minima_order, report.config.boundary
    ));
    md.push_str(&format!("| Dataset Hash | {} |\n", report.dataset_hash));
    if report.has_synthetic {
        md.push_str("| Data | **SYNTHETIC** |\n");
    }
    md.push('\n');

    md.push_str("## Summary\n\n");
    md.push_str(&format!(
        "Extrema: {} maxima, {} minima\n\n",
        report.extrema.maxima.len(),
        report.extrema.minima.len()
    ));
    match &report.summary {
        Some(s) => {
            md.push_str("| Metric | Value |\n");
            md.push_str("| --- | --- |\n");
            md.push_str(&format!("| Trades | {} |\n", s.trade_count));
            md.push_str(&format!("| Total Return | {:.2}% |\n", s.total_return_pct));
            md.push_str(&format!(
                "| Avg Return / Trade | {:.2}% |\n",
                s.avg_return_per_trade_pct
            ));
            md.push_str(&format!("| Win Rate | {:.1}% |\n", s.win_rate() * 100.0));
            md.push('\n');
        }
        None => md.push_str("No trades.\n\n"),
    }

    if !report.trades.is_empty() {
        md.push_str("## Trades\n\n");
        md.push_str("| Buy | Buy Price | Sell | Sell Price | Return |\n");
        md.push_str("| --- | --- | --- | --- | --- |\n");
        for t in &report.trades {
            md.push_str(&format!(
                "| {} | {:.4} | {} | {:.4} | {:.2}% |\n",
                t.buy_position, t.buy_price, t.sell_position, t.sell_price, t.return_pct
            ));
        }
        md.push('\n');
    }

    md
}
