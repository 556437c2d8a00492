use std::{error::Error, ops::Range, path::Path};

use pairdist_stats::{
    descriptive::DescriptiveStats, histogram::DensityHistogram, kde::GaussianKde,
};
use plotters::{coord::Shift, prelude::*};

use crate::{PlotStyle, RenderError};

/// Share of the data range left blank on each side of the x axis.
const X_MARGIN_RATIO: f64 = 0.02;
/// Headroom above the tallest bar or curve peak.
const Y_HEADROOM_RATIO: f64 = 1.08;
/// Number of segments a dashed marker is cut into; every other one is drawn.
const DASH_SEGMENTS: u32 = 40;

struct DistributionPlot<'a> {
    title: String,
    stats: &'a DescriptiveStats,
    histogram: &'a DensityHistogram,
    curve: &'a [(f64, f64)],
}

/// Renders the distribution of `distances` to a PNG file at `output_path`.
///
/// `dataset_name` appears in the title. Returns the statistics the plot was
/// annotated with.
///
/// Nothing is written when `distances` is empty, holds a NaN or infinite
/// value, or the style is invalid. A single distinct value produces a one-bar
/// histogram without a density curve.
pub fn render_distance_distribution<P>(
    distances: &[f32],
    output_path: P,
    dataset_name: &str,
    style: &PlotStyle,
) -> Result<DescriptiveStats, RenderError>
where
    P: AsRef<Path>,
{
    let output_path = output_path.as_ref();
    if let Some(reason) = style.validate() {
        return Err(RenderError::InvalidStyle { reason });
    }

    if let Some((index, &value)) = distances.iter().enumerate().find(|(_, d)| !d.is_finite()) {
        return Err(RenderError::NonFiniteDistance { index, value });
    }

    let mut sorted = distances.to_vec();
    sorted.sort_by(f32::total_cmp);
    let stats = DescriptiveStats::from_sorted(&sorted).ok_or(RenderError::EmptyDistances)?;
    let histogram = DensityHistogram::from_sorted(&sorted, style.bins);
    let curve = GaussianKde::new(sorted.iter().copied())
        .map(|kde| {
            kde.evaluate_grid(
                f64::from(stats.min),
                f64::from(stats.max),
                style.curve_points,
            )
        })
        .unwrap_or_default();

    let plot = DistributionPlot {
        title: format!("Distribution of Pairwise Distances in \"{dataset_name}\" Dataset"),
        stats: &stats,
        histogram: &histogram,
        curve: &curve,
    };
    draw(&plot, output_path, style).map_err(|err| RenderError::Drawing {
        path: output_path.to_owned(),
        message: err.to_string(),
    })?;
    Ok(stats)
}

fn draw(plot: &DistributionPlot<'_>, path: &Path, style: &PlotStyle) -> Result<(), Box<dyn Error>> {
    let font = style.font_family.as_str();
    let line_width = style.points_to_whole_pixels(style.line_width_pt);
    let legend_length = i32::try_from(style.points_to_whole_pixels(20.0))?;

    let root = BitMapBackend::new(path, style.pixel_size()).into_drawing_area();
    root.fill(&style.background)?;

    let (x_range, y_max) = axis_ranges(plot);
    let mut chart = ChartBuilder::on(&root)
        .caption(
            &plot.title,
            (font, style.points_to_pixels(style.title_font_pt)).into_font(),
        )
        .margin(style.points_to_whole_pixels(12.0))
        .x_label_area_size(style.points_to_whole_pixels(style.axis_font_pt * 3.5))
        .y_label_area_size(style.points_to_whole_pixels(style.axis_font_pt * 5.0))
        .build_cartesian_2d(x_range, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Euclidean Distance")
        .y_desc("Density")
        .axis_desc_style((font, style.points_to_pixels(style.axis_font_pt)).into_font())
        .label_style((font, style.points_to_pixels(style.annotation_font_pt)).into_font())
        .bold_line_style(style.grid.stroke_width(1))
        .light_line_style(TRANSPARENT)
        .draw()?;

    let bar_fill = style.bar_fill.mix(0.6).filled();
    let bar_edge = style.bar_edge.stroke_width(1);
    chart.draw_series(
        plot.histogram
            .densities()
            .map(|(range, density)| Rectangle::new(bar_corners(&range, density), bar_fill)),
    )?;
    chart.draw_series(
        plot.histogram
            .densities()
            .map(|(range, density)| Rectangle::new(bar_corners(&range, density), bar_edge)),
    )?;

    if !plot.curve.is_empty() {
        chart.draw_series(LineSeries::new(
            plot.curve.iter().copied(),
            style.curve.stroke_width(line_width),
        ))?;
    }

    let mean_style = style.mean_marker.stroke_width(line_width);
    chart
        .draw_series(dashed_vertical_line(f64::from(plot.stats.mean), y_max, mean_style))?
        .label(format!("Mean: {:.2}", plot.stats.mean))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_length, y)], mean_style));

    let median = f64::from(plot.stats.median);
    let median_style = style.median_marker.stroke_width(line_width);
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(median, 0.0), (median, y_max)],
            median_style,
        )))?
        .label(format!("Median: {:.2}", plot.stats.median))
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + legend_length, y)], median_style)
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .margin(style.points_to_whole_pixels(8.0))
        .legend_area_size(style.points_to_whole_pixels(24.0))
        .label_font((font, style.points_to_pixels(style.annotation_font_pt)).into_font())
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
    draw_stats_box(&root, plot.stats, (x_pixels.end, y_pixels.start), style)?;

    root.present()?;
    Ok(())
}

fn bar_corners(range: &Range<f32>, density: f64) -> [(f64, f64); 2] {
    [
        (f64::from(range.start), 0.0),
        (f64::from(range.end), density),
    ]
}

fn axis_ranges(plot: &DistributionPlot<'_>) -> (Range<f64>, f64) {
    let span = plot
        .histogram
        .span()
        .unwrap_or(plot.stats.min..plot.stats.max);
    let (lo, hi) = (f64::from(span.start), f64::from(span.end));
    let margin = (hi - lo) * X_MARGIN_RATIO;
    let peak = plot
        .curve
        .iter()
        .map(|&(_, density)| density)
        .fold(plot.histogram.max_density(), f64::max);
    let y_max = if peak > 0.0 {
        peak * Y_HEADROOM_RATIO
    } else {
        1.0
    };
    (lo - margin..hi + margin, y_max)
}

fn dashed_vertical_line(
    x: f64,
    y_max: f64,
    style: ShapeStyle,
) -> impl Iterator<Item = PathElement<(f64, f64)>> {
    let step = y_max / f64::from(DASH_SEGMENTS);
    (0..DASH_SEGMENTS).step_by(2).map(move |i| {
        let y = step * f64::from(i);
        PathElement::new(vec![(x, y), (x, y + step)], style)
    })
}

fn stats_lines(stats: &DescriptiveStats) -> Vec<String> {
    vec![
        format!("Samples: {}", stats.count),
        format!("Std Dev: {:.2}", stats.std_dev),
        format!("Min: {:.2}", stats.min),
        format!("Max: {:.2}", stats.max),
    ]
}

/// Draws the summary box with its top-right corner near `anchor`.
fn draw_stats_box(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    stats: &DescriptiveStats,
    anchor: (i32, i32),
    style: &PlotStyle,
) -> Result<(), Box<dyn Error>> {
    let lines = stats_lines(stats);
    let text_style = (
        style.font_family.as_str(),
        style.points_to_pixels(style.annotation_font_pt),
    )
        .into_font()
        .color(&BLACK);
    let padding = i32::try_from(style.points_to_whole_pixels(6.0))?;

    let mut text_width = 0;
    let mut line_height = 0;
    for line in &lines {
        let (w, h) = root.estimate_text_size(line, &text_style)?;
        text_width = text_width.max(w);
        line_height = line_height.max(h);
    }
    let text_width = i32::try_from(text_width)?;
    let line_height = i32::try_from(line_height)? + padding / 2;
    let num_lines = i32::try_from(lines.len())?;

    let (right, top) = anchor;
    let x1 = right - padding;
    let x0 = x1 - text_width - 2 * padding;
    let y0 = top + padding;
    let y1 = y0 + line_height * num_lines + 2 * padding;
    root.draw(&Rectangle::new(
        [(x0, y0), (x1, y1)],
        style.stats_box.mix(0.5).filled(),
    ))?;
    root.draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.mix(0.4).stroke_width(1)))?;

    let mut y = y0 + padding;
    for line in &lines {
        root.draw(&Text::new(line.as_str(), (x0 + padding, y), text_style.clone()))?;
        y += line_height;
    }
    Ok(())
}
