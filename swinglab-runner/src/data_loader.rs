//! Series loading for the runner.
//!
//! Reads OHLCV CSV files (`timestamp,open,high,low,close,volume`, timestamp in
//! milliseconds since the Unix epoch), canonicalizes the rows and wraps them
//! in a validated [`Series`]. Extra columns are ignored.
//!
//! Canonicalization:
//! 1. Rows with a missing or non-finite OHLCV field are dropped
//! 2. Rows are stably sorted by timestamp
//! 3. Duplicate timestamps keep their first occurrence
//!
//! A synthetic random-walk generator is available for demos and tests.
//! Results produced from synthetic data are tagged.

use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use swinglab_core::{PricePoint, Series, SeriesError};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in '{source_name}': {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("'{source_name}' row {row}: timestamp {millis} is out of range")]
    TimestampOutOfRange {
        source_name: String,
        row: usize,
        millis: i64,
    },

    #[error("no usable rows in '{0}'")]
    NoRows(String),

    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),
}

/// A loaded, canonical series with provenance.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub symbol: String,
    pub series: Series,
    /// BLAKE3 over the symbol and every point.
    pub dataset_hash: String,
    pub has_synthetic: bool,
    /// Rows removed during canonicalization.
    pub dropped_rows: usize,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: i64,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
}

/// Canonical points plus what was removed to get there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canonical {
    pub points: Vec<PricePoint>,
    pub dropped_non_finite: usize,
    pub dropped_duplicates: usize,
}

/// Load a CSV file; the symbol defaults to the file stem.
pub fn load_csv(path: &Path, symbol: Option<&str>) -> Result<LoadedSeries, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let symbol = symbol
        .map(str::to_string)
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| path.display().to_string());
    load_from_reader(&symbol, file)
}

/// Load CSV text from any reader.
pub fn load_from_reader<R: Read>(symbol: &str, reader: R) -> Result<LoadedSeries, LoadError> {
    let raw = read_points(symbol, reader)?;
    let row_count = raw.len();
    let canonical = canonicalize(raw);

    if canonical.dropped_non_finite > 0 {
        warn!(
            symbol,
            dropped = canonical.dropped_non_finite,
            "dropped rows with missing or non-finite fields"
        );
    }
    if canonical.dropped_duplicates > 0 {
        warn!(
            symbol,
            dropped = canonical.dropped_duplicates,
            "dropped rows with duplicate timestamps"
        );
    }
    if canonical.points.is_empty() {
        return Err(LoadError::NoRows(symbol.to_string()));
    }

    let dropped_rows = canonical.dropped_non_finite + canonical.dropped_duplicates;
    let series = Series::new(canonical.points)?;
    debug!(symbol, rows = row_count, points = series.len(), "series loaded");

    Ok(LoadedSeries {
        symbol: symbol.to_string(),
        dataset_hash: dataset_hash(symbol, &series),
        series,
        has_synthetic: false,
        dropped_rows,
    })
}

/// Parse rows in file order. Missing numeric fields become NaN.
fn read_points<R: Read>(source_name: &str, reader: R) -> Result<Vec<PricePoint>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (row, record) in rdr.deserialize::<CsvRow>().enumerate() {
        let r = record.map_err(|source| LoadError::Csv {
            source_name: source_name.to_string(),
            source,
        })?;
        let nan = f64::NAN;
        let point = PricePoint::from_millis(
            r.timestamp,
            r.open.unwrap_or(nan),
            r.high.unwrap_or(nan),
            r.low.unwrap_or(nan),
            r.close.unwrap_or(nan),
            r.volume.unwrap_or(nan),
        )
        .ok_or_else(|| LoadError::TimestampOutOfRange {
            source_name: source_name.to_string(),
            row,
            millis: r.timestamp,
        })?;
        points.push(point);
    }
    Ok(points)
}

/// Drop non-finite rows, sort by timestamp, keep the first of each timestamp.
pub fn canonicalize(points: Vec<PricePoint>) -> Canonical {
    let total = points.len();
    let mut kept: Vec<PricePoint> = points
        .into_iter()
        .filter(|p| p.first_non_finite_field().is_none())
        .collect();
    let dropped_non_finite = total - kept.len();

    kept.sort_by_key(|p| p.timestamp);
    let before_dedup = kept.len();
    kept.dedup_by_key(|p| p.timestamp);

    Canonical {
        dropped_duplicates: before_dedup - kept.len(),
        dropped_non_finite,
        points: kept,
    }
}

/// Compute a deterministic BLAKE3 hash over a series.
pub fn dataset_hash(symbol: &str, series: &Series) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(symbol.as_bytes());
    for p in series {
        hasher.update(&p.timestamp.timestamp_millis().to_le_bytes());
        hasher.update(&p.open.to_le_bytes());
        hasher.update(&p.high.to_le_bytes());
        hasher.update(&p.low.to_le_bytes());
        hasher.update(&p.close.to_le_bytes());
        hasher.update(&p.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// First timestamp of synthetic series: 2024-01-01T00:00:00Z.
const SYNTHETIC_START_MILLIS: i64 = 1_704_067_200_000;
const SYNTHETIC_STEP_MILLIS: i64 = 3_600_000;

/// Generate an hourly random-walk series seeded from the symbol name.
///
/// Same symbol and length always produce the same series.
pub fn synthetic_series(symbol: &str, points: usize) -> Result<LoadedSeries, LoadError> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut price = 100.0_f64;
    let mut out = Vec::with_capacity(points);
    for i in 0..points {
        let step_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + step_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500.0..5_000.0);

        let millis = SYNTHETIC_START_MILLIS + i as i64 * SYNTHETIC_STEP_MILLIS;
        let point = PricePoint::from_millis(millis, open, high, low, close, volume).ok_or_else(
            || LoadError::TimestampOutOfRange {
                source_name: symbol.to_string(),
                row: i,
                millis,
            },
        )?;
        out.push(point);
        price = close;
    }

    warn!(symbol, points, "generated synthetic data; results will be tagged as synthetic");
    let series = Series::new(out)?;
    Ok(LoadedSeries {
        symbol: symbol.to_string(),
        dataset_hash: dataset_hash(symbol, &series),
        series,
        has_synthetic: true,
        dropped_rows: 0,
    })
}
