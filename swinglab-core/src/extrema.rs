//! Local extrema detection over a window of close prices.
//!
//! Position `i` is a local maximum when its value is strictly greater than
//! every other value within `order` positions on either side; minima mirror
//! this with strictly-less. Equal neighbours disqualify, so plateaus are
//! never flagged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtremaError {
    #[error("{which} order must be >= 1")]
    ZeroOrder { which: &'static str },
}

/// How neighbourhoods that cross the window edge are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Compare only against neighbours inside the window. Edge positions can
    /// qualify on a partial neighbourhood.
    #[default]
    Truncate,
    /// Out-of-window neighbours are replaced by the nearest edge value. The
    /// first and last positions then compare against themselves and never
    /// qualify.
    Clip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtremumKind {
    Max,
    Min,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extremum {
    pub position: usize,
    pub kind: ExtremumKind,
}

/// Ascending maxima and minima positions, relative to the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extrema {
    pub maxima: Vec<usize>,
    pub minima: Vec<usize>,
}

impl Extrema {
    /// Both lists merged in position order.
    pub fn merged(&self) -> Vec<Extremum> {
        let mut all: Vec<Extremum> = self
            .maxima
            .iter()
            .map(|&position| Extremum {
                position,
                kind: ExtremumKind::Max,
            })
            .chain(self.minima.iter().map(|&position| Extremum {
                position,
                kind: ExtremumKind::Min,
            }))
            .collect();
        all.sort_by_key(|e| e.position);
        all
    }

    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty() && self.minima.is_empty()
    }
}

/// Find maxima and minima of `window` with independent neighbourhood radii.
pub fn find_extrema(
    window: &[f64],
    maxima_order: usize,
    minima_order: usize,
    mode: BoundaryMode,
) -> Result<Extrema, ExtremaError> {
    if maxima_order == 0 {
        return Err(ExtremaError::ZeroOrder { which: "maxima" });
    }
    if minima_order == 0 {
        return Err(ExtremaError::ZeroOrder { which: "minima" });
    }
    Ok(Extrema {
        maxima: local_maxima(window, maxima_order, mode),
        minima: local_minima(window, minima_order, mode),
    })
}

pub fn local_maxima(values: &[f64], order: usize, mode: BoundaryMode) -> Vec<usize> {
    relative_extrema(values, order, mode, |a, b| a > b)
}

pub fn local_minima(values: &[f64], order: usize, mode: BoundaryMode) -> Vec<usize> {
    relative_extrema(values, order, mode, |a, b| a < b)
}

fn relative_extrema<F>(values: &[f64], order: usize, mode: BoundaryMode, beats: F) -> Vec<usize>
where
    F: Fn(f64, f64) -> bool,
{
    let n = values.len();
    if n < 2 || order == 0 {
        return Vec::new();
    }
    let last = n - 1;

    (0..n)
        .filter(|&i| match mode {
            BoundaryMode::Truncate => {
                let lo = i.saturating_sub(order);
                let hi = (i + order).min(last);
                (lo..=hi)
                    .filter(|&j| j != i)
                    .all(|j| beats(values[i], values[j]))
            }
            BoundaryMode::Clip => (1..=order).all(|shift| {
                let left = i.saturating_sub(shift);
                let right = (i + shift).min(last);
                beats(values[i], values[left]) && beats(values[i], values[right])
            }),
        })
        .collect()
}
