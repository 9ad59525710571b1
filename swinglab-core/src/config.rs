//! Analysis parameters shared by the optimizer entry points.

use crate::extrema::BoundaryMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SUBSET_SIZE: usize = 100;
pub const DEFAULT_MAXIMA_ORDER: usize = 5;
pub const END_TO_END_MAXIMA_ORDER: usize = 10;
pub const DEFAULT_MINIMA_ORDER: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisConfigError {
    #[error("subset_size must be >= 1")]
    EmptySubset,

    #[error("{which}_order must be >= 1")]
    ZeroOrder { which: &'static str },
}

/// Window and neighbourhood settings for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of most recent points analysed for extrema and trades.
    pub subset_size: usize,
    /// Neighbourhood radius for maxima.
    pub maxima_order: usize,
    /// Neighbourhood radius for minima.
    pub minima_order: usize,
    /// Whether callers should dump the trade list verbatim.
    pub print_trades: bool,
    pub boundary: BoundaryMode,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            subset_size: DEFAULT_SUBSET_SIZE,
            maxima_order: DEFAULT_MAXIMA_ORDER,
            minima_order: DEFAULT_MINIMA_ORDER,
            print_trades: false,
            boundary: BoundaryMode::default(),
        }
    }
}

impl AnalysisConfig {
    /// Settings of the end-to-end entry point: wider maxima neighbourhood.
    pub fn end_to_end() -> Self {
        Self {
            maxima_order: END_TO_END_MAXIMA_ORDER,
            ..Self::default()
        }
    }

    /// Reject settings that cannot describe a window or neighbourhood.
    pub fn validate(&self) -> Result<(), AnalysisConfigError> {
        if self.subset_size == 0 {
            return Err(AnalysisConfigError::EmptySubset);
        }
        if self.maxima_order == 0 {
            return Err(AnalysisConfigError::ZeroOrder { which: "maxima" });
        }
        if self.minima_order == 0 {
            return Err(AnalysisConfigError::ZeroOrder { which: "minima" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = AnalysisConfig::default();
        assert_eq!((c.subset_size, c.maxima_order, c.minima_order), (100, 5, 5));
        assert!(!c.print_trades);
        assert_eq!(AnalysisConfig::end_to_end().maxima_order, 10);
        assert_eq!(AnalysisConfig::end_to_end().minima_order, 5);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: AnalysisConfig = serde_json::from_str(r#"{"maxima_order": 7}"#).unwrap();
        assert_eq!(c.maxima_order, 7);
        assert_eq!(c.subset_size, 100);
        assert_eq!(c.boundary, BoundaryMode::Truncate);
    }

    #[test]
    fn validate_rejects_zeroes() {
        assert!(AnalysisConfig::default().validate().is_ok());
        let c = AnalysisConfig {
            subset_size: 0,
            ..AnalysisConfig::default()
        };
        assert_eq!(c.validate(), Err(AnalysisConfigError::EmptySubset));
        let c = AnalysisConfig {
            minima_order: 0,
            ..AnalysisConfig::default()
        };
        let err = c.validate().unwrap_err();
        assert_eq!(err, AnalysisConfigError::ZeroOrder { which: "minima" });
        assert_eq!(err.to_string(), "minima_order must be >= 1");
        let c = AnalysisConfig {
            maxima_order: 0,
            ..AnalysisConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(AnalysisConfigError::ZeroOrder { which: "maxima" })
        );
    }
}
