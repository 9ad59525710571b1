//! PricePoint: one OHLCV observation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV point at a single timestamp.
///
/// Immutable once ingested. A series of points must be strictly ascending by
/// `timestamp`; see [`crate::domain::Series`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    /// Build a point from a millisecond Unix epoch timestamp.
    ///
    /// Returns `None` when the timestamp is outside the representable range.
    pub fn from_millis(
        millis: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Option<Self> {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Name of the first non-finite numeric field, if any.
    pub fn first_non_finite_field(&self) -> Option<&'static str> {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }

    /// Typical ("technical") price: (close + low + high) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.close + self.low + self.high) / 3.0
    }
}
