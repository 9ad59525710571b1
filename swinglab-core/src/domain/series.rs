//! Series: validated, chronologically ordered price points.

use super::point::PricePoint;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Structural violations of the input contract. Any of these rejects the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,

    #[error(
        "timestamp at position {position} ({current}) is not after the previous one ({previous})"
    )]
    NonMonotonicTimestamp {
        position: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    #[error("non-finite {field} at position {position}")]
    NonFiniteField {
        position: usize,
        field: &'static str,
    },

    #[error("close at position {position} is {close}; prices must be positive")]
    NonPositiveClose { position: usize, close: f64 },
}

/// Price points addressed by 0-based position; position order is time order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Validate and wrap a point sequence.
    ///
    /// Fails fast on an empty input, a non-finite OHLCV field, a close that is
    /// not strictly positive, or a timestamp that does not strictly increase.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (position, point) in points.iter().enumerate() {
            if let Some(field) = point.first_non_finite_field() {
                return Err(SeriesError::NonFiniteField { position, field });
            }
            if point.close <= 0.0 {
                return Err(SeriesError::NonPositiveClose {
                    position,
                    close: point.close,
                });
            }
        }
        for (position, pair) in points.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(SeriesError::NonMonotonicTimestamp {
                    position: position + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn get(&self, position: usize) -> Option<&PricePoint> {
        self.points.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.low).collect()
    }

    pub fn typical_prices(&self) -> Vec<f64> {
        self.points.iter().map(PricePoint::typical_price).collect()
    }

    /// Start position and closes of the trailing window of at most `size` points.
    ///
    /// A window larger than the series covers the whole series.
    pub fn trailing_closes(&self, size: usize) -> (usize, Vec<f64>) {
        let start = self.points.len().saturating_sub(size);
        let closes = self.points[start..].iter().map(|p| p.close).collect();
        (start, closes)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(millis: i64, close: f64) -> PricePoint {
        PricePoint::from_millis(millis, close, close + 1.0, close - 1.0, close, 10.0).unwrap()
    }

    #[test]
    fn accepts_ascending_points() {
        let s = Series::new(vec![point(1_000, 1.0), point(2_000, 2.0)]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.closes(), vec![1.0, 2.0]);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Series::new(vec![]), Err(SeriesError::Empty));
    }

    #[test]
    fn rejects_duplicate_timestamp() {
        let err = Series::new(vec![point(1_000, 1.0), point(1_000, 2.0)]).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::NonMonotonicTimestamp { position: 1, .. }
        ));
    }

    #[test]
    fn rejects_descending_timestamp() {
        let err =
            Series::new(vec![point(1_000, 1.0), point(3_000, 2.0), point(2_000, 3.0)]).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::NonMonotonicTimestamp { position: 2, .. }
        ));
    }

    #[test]
    fn rejects_non_finite_close() {
        let mut bad = point(2_000, 2.0);
        bad.close = f64::NAN;
        let err = Series::new(vec![point(1_000, 1.0), bad]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::NonFiniteField {
                position: 1,
                field: "close"
            }
        );
    }

    #[test]
    fn reports_first_non_finite_field() {
        let err = Series::new(vec![point(1_000, f64::INFINITY)]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::NonFiniteField {
                position: 0,
                field: "open"
            }
        );
    }

    #[test]
    fn rejects_zero_and_negative_close() {
        let err = Series::new(vec![point(1_000, 1.0), point(2_000, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::NonPositiveClose {
                position: 1,
                close: 0.0
            }
        );
        assert!(matches!(
            Series::new(vec![point(1_000, -3.0)]),
            Err(SeriesError::NonPositiveClose { position: 0, .. })
        ));
    }

    #[test]
    fn trailing_closes_clamps_to_series_length() {
        let s = Series::new((1..6).map(|i| point(i * 1_000, i as f64)).collect()).unwrap();
        assert_eq!(s.trailing_closes(3), (2, vec![3.0, 4.0, 5.0]));
        assert_eq!(s.trailing_closes(100), (0, vec![1.0, 2.0, 3.0, 4.0, 5.0]));
    }
}
