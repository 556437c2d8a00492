use std::ops::Range;

/// A fixed-width histogram normalized to a density scale.
///
/// The data range `[min, max]` is split into equally wide bins. Each bin's
/// density is `count / (total * width)`, so the bar areas sum to 1 and the
/// histogram can be overlaid with a probability density curve.
#[derive(Debug, Clone)]
pub struct DensityHistogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
    /// Total number of values counted across all bins.
    pub total: u64,
}

/// A single bin in a histogram.
///
/// The range is half-open except for the last bin, which also holds values
/// equal to the histogram maximum.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// The range of values covered by this bin.
    pub range: Range<f32>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl HistogramBin {
    /// Width of the bin.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.range.end - self.range.start
    }
}

impl DensityHistogram {
    /// Creates a density histogram from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pairdist_stats::histogram::DensityHistogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = DensityHistogram::new(values, 5);
    /// assert_eq!(histogram.bins.len(), 5);
    /// assert_eq!(histogram.total, 10);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f32::total_cmp);
        Self::from_sorted(&sorted, num_bins)
    }

    /// Creates a density histogram from pre-sorted values.
    ///
    /// Returns a histogram without bins when `sorted_values` is empty or
    /// `num_bins` is zero. When every value is identical, a single unit-wide
    /// range centered on that value is split into `num_bins` bins.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f32], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self::empty();
        };
        if num_bins == 0 {
            return Self::empty();
        }

        let (lo, hi) = if max - min < f32::EPSILON * min.abs().max(1.0) {
            (min - 0.5, min + 0.5)
        } else {
            (min, max)
        };
        let range = hi - lo;

        // Recompute each edge from `lo` to avoid floating-point accumulation errors
        let edge = |idx: usize| lo + range * (idx as f32) / (num_bins as f32);
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                range: edge(idx)..edge(idx + 1),
                count: 0,
            })
            .collect::<Vec<_>>();
        if let Some(last) = bins.last_mut() {
            last.range.end = hi;
        }

        for &val in sorted_values {
            let position = (val - lo) / range * num_bins as f32;
            let idx = (position.max(0.0).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self {
            bins,
            total: sorted_values.len() as u64,
        }
    }

    fn empty() -> Self {
        Self {
            bins: vec![],
            total: 0,
        }
    }

    /// Density of a bin: `count / (total * width)`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn density(&self, bin: &HistogramBin) -> f64 {
        let width = f64::from(bin.width());
        if self.total == 0 || width <= 0.0 {
            return 0.0;
        }
        bin.count as f64 / (self.total as f64 * width)
    }

    /// Iterates over `(range, density)` for every bin.
    pub fn densities(&self) -> impl Iterator<Item = (Range<f32>, f64)> + '_ {
        self.bins
            .iter()
            .map(|bin| (bin.range.clone(), self.density(bin)))
    }

    /// Largest bin density, or `0.0` for an empty histogram.
    #[must_use]
    pub fn max_density(&self) -> f64 {
        self.densities().map(|(_, d)| d).fold(0.0, f64::max)
    }

    /// Range spanned by all bins, if any.
    #[must_use]
    pub fn span(&self) -> Option<Range<f32>> {
        let first = self.bins.first()?;
        let last = self.bins.last()?;
        Some(first.range.start..last.range.end)
    }
}
