//! Gaussian kernel density estimation.
//!
//! Produces the smoothed density curve drawn over a density histogram. The
//! bandwidth follows Scott's rule, `h = σ · n^(-1/5)`, with `σ` the sample
//! standard deviation (n - 1 denominator).
//!
//! # Examples
//!
//! ```
//! use pairdist_stats::kde::GaussianKde;
//!
//! let values = [1.0, 2.0, 2.5, 3.0, 4.0];
//! let kde = GaussianKde::new(values).unwrap();
//! let curve = kde.evaluate_grid(0.0, 5.0, 101);
//! assert_eq!(curve.len(), 101);
//! assert!(curve.iter().all(|&(_, density)| density >= 0.0));
//! ```

use std::f64::consts::PI;

/// Kernels further than this many bandwidths from the evaluation point are skipped.
const KERNEL_CUTOFF: f64 = 8.0;

/// A Gaussian kernel density estimate over one-dimensional samples.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    sorted_samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Builds an estimate with Scott's rule bandwidth.
    ///
    /// Returns `None` when fewer than two samples are given or when the
    /// samples have zero spread; no smooth curve exists in those cases.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut sorted_samples = values.into_iter().map(f64::from).collect::<Vec<_>>();
        sorted_samples.sort_by(f64::total_cmp);
        let bandwidth = scott_bandwidth(&sorted_samples)?;
        Some(Self {
            sorted_samples,
            bandwidth,
        })
    }

    /// Builds an estimate with an explicit bandwidth.
    ///
    /// Returns `None` for empty input or a non-positive bandwidth.
    #[cfg(test)]
    pub(crate) fn with_bandwidth<I>(values: I, bandwidth: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return None;
        }
        let mut sorted_samples = values.into_iter().map(f64::from).collect::<Vec<_>>();
        if sorted_samples.is_empty() {
            return None;
        }
        sorted_samples.sort_by(f64::total_cmp);
        Some(Self {
            sorted_samples,
            bandwidth,
        })
    }

    /// The kernel bandwidth in data units.
    #[cfg(test)]
    pub(crate) fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Evaluates the density at `x`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let start = self
            .sorted_samples
            .partition_point(|&s| s < x - KERNEL_CUTOFF * h);
        let end = self
            .sorted_samples
            .partition_point(|&s| s <= x + KERNEL_CUTOFF * h);
        let kernel_sum = self.sorted_samples[start..end]
            .iter()
            .map(|&s| {
                let u = (x - s) / h;
                (-0.5 * u * u).exp()
            })
            .sum::<f64>();
        kernel_sum / (self.sorted_samples.len() as f64 * h * (2.0 * PI).sqrt())
    }

    /// Evaluates the density at `points` evenly spaced positions over `[lo, hi]`.
    ///
    /// Returns `(x, density)` pairs; a single point evaluates at `lo`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate_grid(&self, lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
        let step = if points > 1 {
            (hi - lo) / (points - 1) as f64
        } else {
            0.0
        };
        (0..points)
            .map(|i| {
                let x = lo + step * i as f64;
                (x, self.evaluate(x))
            })
            .collect()
    }
}

#[expect(clippy::cast_precision_loss)]
fn scott_bandwidth(samples: &[f64]) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let mean = samples.iter().sum::<f64>() / n_f;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n_f - 1.0);
    let bandwidth = variance.sqrt() * n_f.powf(-0.2);
    (bandwidth.is_finite() && bandwidth > 0.0).then_some(bandwidth)
}
