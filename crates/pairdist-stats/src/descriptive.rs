use serde::Serialize;

use crate::percentiles;

/// Summary of a distance sample: location, spread and extremes.
///
/// These are the numbers a distribution plot is annotated with. Dispersion is
/// computed over the whole sample (population variance, no Bessel correction).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    /// Middle value; the mean of the two middle values for even counts.
    pub median: f32,
    pub variance: f32,
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Summarizes values in any order. `None` for an empty sample.
    ///
    /// ```
    /// use pairdist_stats::descriptive::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::new([9.0, 1.0, 5.0]).unwrap();
    /// assert_eq!((stats.min, stats.median, stats.max), (1.0, 5.0, 9.0));
    /// assert!(DescriptiveStats::new([]).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f32::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Summarizes values already sorted ascending. `None` for an empty sample.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is out of order.
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f32]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;

        // Accumulate in f64 to keep large samples stable.
        let mean = sorted_values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
        let variance = sorted_values
            .iter()
            .map(|&v| (f64::from(v) - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            count,
            min,
            max,
            mean: mean as f32,
            median: percentiles::compute_percentile(sorted_values, 50.0),
            variance: variance as f32,
            std_dev: variance.sqrt() as f32,
        })
    }
}
