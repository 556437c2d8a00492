use serde::Serialize;

/// A percentile together with the value found at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentilePoint {
    /// Percentile in `[0, 100]`.
    pub percentile: f32,
    pub value: f32,
}

/// Evaluates each of `points` over sorted data, keeping the requested order.
///
/// ```
/// use pairdist_stats::percentiles::percentile_points;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let points = percentile_points(&sorted, &[75.0, 25.0]);
/// assert_eq!(points[0].value, 4.0);
/// assert_eq!(points[1].value, 2.0);
/// ```
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
#[must_use]
pub fn percentile_points(sorted_values: &[f32], points: &[f32]) -> Vec<PercentilePoint> {
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    points
        .iter()
        .map(|&percentile| PercentilePoint {
            percentile,
            value: compute_percentile(sorted_values, percentile),
        })
        .collect()
}

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks: the k-th percentile
/// sits at fractional position `(n - 1) * k / 100`. The 50th percentile is
/// therefore the conventional median.
///
/// Returns `f32::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use pairdist_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 0.0), 1.0);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f32], percentile: f32) -> f32 {
    let Some(&last) = sorted_values.last() else {
        return f32::NAN;
    };
    let position = f64::from(percentile.clamp(0.0, 100.0)) / 100.0
        * (sorted_values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if upper >= sorted_values.len() {
        return last;
    }
    let fraction = position - lower as f64;
    let lo = f64::from(sorted_values[lower]);
    let hi = f64::from(sorted_values[upper]);
    (lo + (hi - lo) * fraction) as f32
}
