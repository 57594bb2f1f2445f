//! Return series helpers.
//!
//! These operate on partially defined series (`Option<f64>`), so a gap at the
//! start of a series keeps propagating the way a rolling window over missing
//! values would.

use statrs::statistics::Statistics;

/// Fractional change from the previous value.
///
/// The first point has no predecessor and is `None`; so is any point whose
/// predecessor is zero.
pub fn pct_change(data: &[f64]) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(data.len());
    if data.is_empty() {
        return result;
    }

    result.push(None);
    for pair in data.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        result.push(if prev == 0.0 {
            None
        } else {
            Some((curr - prev) / prev)
        });
    }

    result
}

/// Rolling sample standard deviation (N - 1) over `window` points.
///
/// A point is defined only when every value in its window is defined.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    assert!(window > 1, "Window must be greater than 1");

    let mut result = vec![None; values.len()];
    if values.len() < window {
        return result;
    }

    for (i, slice) in values.windows(window).enumerate() {
        let defined: Option<Vec<f64>> = slice.iter().copied().collect();
        if let Some(points) = defined {
            result[window - 1 + i] = Some(points.iter().std_dev());
        }
    }

    result
}

/// Shift a series back by `n` points so each point holds a later value.
///
/// The trailing `n` points become `None`.
pub fn lead(values: &[Option<f64>], n: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| values.get(i + n).copied().flatten())
        .collect()
}
