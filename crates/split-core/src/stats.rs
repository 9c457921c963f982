//! Robust summary statistics over slices of split-derived values
//!
//! Everything here ignores non-finite values and returns `None` for an empty
//! effective sample, so callers never see a made-up zero.

use ordered_float::OrderedFloat;

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use split_core::stats::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by_key(|&x| OrderedFloat(x));
    sorted
}

/// Median of the finite values in `data`
///
/// Even-sized samples average the two middle order statistics.
///
/// # Examples
///
/// ```rust
/// use split_core::stats::median;
///
/// assert_eq!(median(&[4.0, 1.0, 3.0]), Some(3.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(data: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    median_of_sorted(&sorted(&finite))
}

/// Median of an already sorted, finite slice
pub fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Calculate the mean of the finite values in a slice
///
/// # Examples
///
/// ```rust
/// use split_core::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    let (sum, count) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(sum, count), &x| (sum + x, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Minimum of the finite values, returning the first index on ties
pub fn argmin(data: &[f64]) -> Option<(usize, f64)> {
    data.iter()
        .copied()
        .enumerate()
        .filter(|(_, x)| x.is_finite())
        .fold(None, |best: Option<(usize, f64)>, (i, x)| match best {
            Some((_, b)) if b <= x => best,
            _ => Some((i, x)),
        })
}
