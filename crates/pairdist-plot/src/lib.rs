//! Rendering of pairwise distance distributions to PNG images.
//!
//! [`render_distance_distribution`] draws a density-normalized histogram of
//! the distances with a smoothed density curve on top, vertical markers for
//! the mean and the median, and a box summarizing the sample.

use std::path::PathBuf;

pub use self::{distribution::render_distance_distribution, style::PlotStyle};

mod distribution;
mod style;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum RenderError {
    #[display("no distances to plot")]
    EmptyDistances,
    #[display("distance {value} at index {index} is not finite")]
    NonFiniteDistance { index: usize, value: f32 },
    #[display("invalid plot style: {reason}")]
    InvalidStyle { reason: &'static str },
    #[display("failed to draw {}: {message}", path.display())]
    Drawing { path: PathBuf, message: String },
}
