use plotters::style::RGBColor;

/// Points per inch, the unit font sizes and line widths are given in.
const POINTS_PER_INCH: f64 = 72.0;

/// Visual configuration for a distance distribution plot.
///
/// Every render call receives its style explicitly; nothing is configured
/// process-wide. Sizes follow print conventions: the figure is given in
/// inches, fonts and line widths in points, and `dpi` converts both to pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: u32,
    /// Number of histogram bins.
    pub bins: usize,
    /// Number of positions the density curve is evaluated at.
    pub curve_points: usize,
    pub font_family: String,
    pub title_font_pt: f64,
    pub axis_font_pt: f64,
    pub annotation_font_pt: f64,
    pub line_width_pt: f64,
    pub background: RGBColor,
    pub grid: RGBColor,
    pub bar_fill: RGBColor,
    pub bar_edge: RGBColor,
    pub curve: RGBColor,
    pub mean_marker: RGBColor,
    pub median_marker: RGBColor,
    pub stats_box: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width_inches: 12.0,
            height_inches: 7.0,
            dpi: 300,
            bins: 50,
            curve_points: 200,
            font_family: "sans-serif".to_owned(),
            title_font_pt: 16.0,
            axis_font_pt: 12.0,
            annotation_font_pt: 10.0,
            line_width_pt: 1.5,
            background: RGBColor(255, 255, 255),
            grid: RGBColor(221, 221, 221),
            bar_fill: RGBColor(135, 206, 235),
            bar_edge: RGBColor(70, 130, 180),
            curve: RGBColor(31, 119, 180),
            mean_marker: RGBColor(214, 39, 40),
            median_marker: RGBColor(44, 160, 44),
            stats_box: RGBColor(245, 222, 179),
        }
    }
}

impl PlotStyle {
    /// Image size in pixels.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_inches * dpi).round() as u32,
            (self.height_inches * dpi).round() as u32,
        )
    }

    /// Converts a size in points to pixels at this style's DPI.
    #[must_use]
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / POINTS_PER_INCH
    }

    /// Converts a size in points to whole pixels, never below one.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn points_to_whole_pixels(&self, points: f64) -> u32 {
        self.points_to_pixels(points).round().max(1.0) as u32
    }

    /// Returns a description of the first invalid setting, if any.
    #[must_use]
    pub fn validate(&self) -> Option<&'static str> {
        if self.bins == 0 {
            Some("bin count must be at least 1")
        } else if self.dpi == 0 {
            Some("dpi must be at least 1")
        } else if !(self.width_inches > 0.0 && self.height_inches > 0.0) {
            Some("figure size must be positive")
        } else if self.curve_points < 2 {
            Some("density curve needs at least 2 points")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pixel_size() {
        assert_eq!(PlotStyle::default().pixel_size(), (3600, 2100));
    }

    #[test]
    fn test_points_scale_with_dpi() {
        let style = PlotStyle {
            dpi: 72,
            ..PlotStyle::default()
        };
        assert_eq!(style.points_to_pixels(12.0), 12.0);
        assert_eq!(style.points_to_whole_pixels(0.1), 1);

        let style = PlotStyle::default();
        assert_eq!(style.points_to_whole_pixels(1.5), 6);
    }

    #[test]
    fn test_validate() {
        assert_eq!(PlotStyle::default().validate(), None);
        let style = PlotStyle {
            bins: 0,
            ..PlotStyle::default()
        };
        assert!(style.validate().is_some());
        let style = PlotStyle {
            height_inches: 0.0,
            ..PlotStyle::default()
        };
        assert!(style.validate().is_some());
    }
}
