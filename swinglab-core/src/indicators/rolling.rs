//! Rolling-window and differencing primitives over plain `f64` slices.
//!
//! Every window function requires a full window of defined values: the
//! output at `t` is NaN when `t < window - 1` or when any value in
//! `values[t-window+1..=t]` is NaN. Infinite values are treated as defined.

/// Apply `f` to every full trailing window of `values`.
pub fn rolling_apply<F>(values: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    for end in (window - 1)..n {
        let slice = &values[end + 1 - window..=end];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[end] = f(slice);
    }

    result
}

pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, mean)
}

/// Population standard deviation (divide by N).
pub fn rolling_std_pop(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        let m = mean(w);
        let variance = w.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / w.len() as f64;
        variance.sqrt()
    })
}

pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

/// First difference: `out[t] = values[t] - values[t-1]`, NaN at t = 0.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for t in 1..values.len() {
        result[t] = values[t] - values[t - 1];
    }
    result
}

/// One-period percentage change: `(v[t] - v[t-1]) / v[t-1] * 100`, NaN at t = 0.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for t in 1..values.len() {
        result[t] = (values[t] - values[t - 1]) / values[t - 1] * 100.0;
    }
    result
}

/// Element-wise mean of equally long columns; NaN wherever any input is NaN.
pub fn mean_of_columns(columns: &[&[f64]]) -> Vec<f64> {
    let n = columns.first().map_or(0, |c| c.len());
    debug_assert!(columns.iter().all(|c| c.len() == n));
    (0..n)
        .map(|t| columns.iter().map(|c| c[t]).sum::<f64>() / columns.len() as f64)
        .collect()
}

fn mean(w: &[f64]) -> f64 {
    w.iter().sum::<f64>() / w.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rolling_mean_warmup_and_values() {
        let r = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!(r[0].is_nan());
        assert!(r[1].is_nan());
        assert_approx(r[2], 2.0, DEFAULT_EPSILON);
        assert_approx(r[3], 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_window_with_nan_is_undefined() {
        let r = rolling_max(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);
        assert!(r[1].is_nan());
        assert!(r[2].is_nan());
        assert_approx(r[3], 4.0, DEFAULT_EPSILON);
        assert_approx(r[4], 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_std_is_population() {
        // values 2,4,4,4,5,5,7,9: population std = 2
        let r = rolling_std_pop(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
        assert_approx(r[7], 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_min_tracks_window() {
        let r = rolling_min(&[5.0, 3.0, 4.0, 6.0], 2);
        assert_eq!(&r[1..], &[3.0, 3.0, 4.0]);
    }

    #[test]
    fn diff_and_pct_change() {
        let d = diff(&[10.0, 12.0, 9.0]);
        assert!(d[0].is_nan());
        assert_eq!(&d[1..], &[2.0, -3.0]);

        let p = pct_change(&[10.0, 12.0, 9.0]);
        assert!(p[0].is_nan());
        assert_approx(p[1], 20.0, DEFAULT_EPSILON);
        assert_approx(p[2], -25.0, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_window_is_all_nan() {
        assert!(rolling_apply(&[1.0, 2.0], 0, |w| w[0]).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn mean_of_columns_propagates_nan() {
        let a = [1.0, f64::NAN, 3.0];
        let b = [3.0, 2.0, 5.0];
        let m = mean_of_columns(&[&a, &b]);
        assert_eq!(m[0], 2.0);
        assert!(m[1].is_nan());
        assert_eq!(m[2], 4.0);
    }
}
