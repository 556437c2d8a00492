//! Statistical utilities for pairwise distance analysis.
//!
//! This crate provides the numeric pieces needed to summarize and draw a
//! distance distribution:
//!
//! - **Descriptive statistics**: count, mean, median, variance, standard deviation, min, max
//! - **Percentiles**: linearly interpolated percentile values and serializable percentile points
//! - **Density histogram**: fixed-width bins normalized so the bar areas sum to 1
//! - **Kernel density estimation**: a Gaussian KDE for the smoothed density curve
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`histogram`]: Density-normalized histogram construction
//! - [`kde`]: Gaussian kernel density estimation with Scott's rule bandwidth
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use pairdist_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Creating a density histogram
//!
//! ```
//! use pairdist_stats::histogram::DensityHistogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = DensityHistogram::new(values, 5);
//! let area: f64 = histogram
//!     .bins
//!     .iter()
//!     .map(|bin| histogram.density(bin) * f64::from(bin.width()))
//!     .sum();
//! assert!((area - 1.0).abs() < 1e-6);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod kde;
pub mod percentiles;
