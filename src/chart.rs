use std::{ops::Range, path::PathBuf};

use log::{debug, info};
use plotters::prelude::*;
use strum::{EnumIter, IntoEnumIterator};

use crate::{
    render_error::{RenderError, RenderStage},
    Curves,
};

/// Used by [`render_chart`] to determine where and how the chart is drawn.
#[derive(Clone, PartialEq, Debug)]
pub struct ChartOptions {
    /// the file to write the PNG image to. An existing file at this path is overwritten
    pub output_path: PathBuf,
    /// image width in pixels
    pub width: u32,
    /// image height in pixels
    pub height: u32,
    /// the caption drawn above the plot
    pub title: String,
    /// description of the x axis
    pub x_label: String,
    /// description of the y axis
    pub y_label: String,
}

impl Default for ChartOptions {
    /// Returns a ChartOptions struct with the following default values:
    /// * `output_path`: `overfitting.png`, relative to the working directory
    /// * `width`: 1000
    /// * `height`: 500
    /// * `title`: "Example of Overfitting in Training"
    /// * `x_label`: "Epochs"
    /// * `y_label`: "Loss"
    fn default() -> Self {
        ChartOptions {
            output_path: PathBuf::from("overfitting.png"),
            width: 1000,
            height: 500,
            title: "Example of Overfitting in Training".to_string(),
            x_label: "Epochs".to_string(),
            y_label: "Loss".to_string(),
        }
    }
}

/// The two loss curves drawn on the chart, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Series {
    /// drawn as a solid line
    Training,
    /// drawn as a dashed line
    Validation,
}

impl Series {
    /// The legend label of the series
    pub fn label(&self) -> &'static str {
        match self {
            Series::Training => "Training Loss",
            Series::Validation => "Validation Loss",
        }
    }

    /// The line colour of the series
    pub fn color(&self) -> RGBColor {
        match self {
            Series::Training => RGBColor(31, 119, 180),
            Series::Validation => RGBColor(255, 127, 14),
        }
    }

    /// Whether the series is drawn as a dashed line
    pub fn is_dashed(&self) -> bool {
        matches!(self, Series::Validation)
    }

    /// The loss values of this series within `curves`
    pub fn values<'a>(&self, curves: &'a Curves) -> &'a [f64] {
        match self {
            Series::Training => &curves.training_loss,
            Series::Validation => &curves.validation_loss,
        }
    }
}

const LINE_WIDTH: u32 = 2;
const DASH_LENGTH: i32 = 10;
const DASH_SPACING: i32 = 6;
/// fraction of the data span left empty on either side of each axis
const AXIS_MARGIN: f64 = 0.05;

/// Draw the training and validation curves on a single chart and write it to [`ChartOptions::output_path`] as a PNG.
///
/// The training curve is drawn as a solid line and the validation curve as a dashed line, over a background grid,
/// with the title, axis descriptions and a legend taken from `options`.
///
/// # Errors
/// Returns a [`RenderError`] if the drawing backend fails at any point, most commonly because the output path is not writable.
///
/// # Example
/// ```no_run
/// use overfit_plot::{chart::{render_chart, ChartOptions}, synthesize_curves, CurveOptions};
///
/// let curves = synthesize_curves(&CurveOptions::default());
/// render_chart(&curves, &ChartOptions::default())?;
/// # Ok::<(), overfit_plot::render_error::RenderError>(())
/// ```
pub fn render_chart(curves: &Curves, options: &ChartOptions) -> Result<(), RenderError> {
    let (x_range, y_range) = axis_ranges(curves);
    debug!("axis ranges: x {:?}, y {:?}", x_range, y_range);

    let root = BitMapBackend::new(&options.output_path, (options.width, options.height))
        .into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RenderError::new(RenderStage::Background, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| RenderError::new(RenderStage::Layout, e))?;

    chart
        .configure_mesh()
        .x_desc(options.x_label.as_str())
        .y_desc(options.y_label.as_str())
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .draw()
        .map_err(|e| RenderError::new(RenderStage::Mesh, e))?;

    for series in Series::iter() {
        let points: Vec<(f64, f64)> = curves
            .epochs
            .iter()
            .zip(series.values(curves))
            .map(|(&epoch, &loss)| (epoch as f64, loss))
            .collect();
        let color = series.color();
        let style = color.stroke_width(LINE_WIDTH);
        let drawn = if series.is_dashed() {
            chart.draw_series(DashedLineSeries::new(
                points,
                DASH_LENGTH,
                DASH_SPACING,
                style,
            ))
        } else {
            chart.draw_series(LineSeries::new(points, style))
        };
        let dashed = series.is_dashed();
        drawn
            .map_err(|e| RenderError::new(RenderStage::Series, e))?
            .label(series.label())
            .legend(move |(x, y)| {
                let style = color.stroke_width(LINE_WIDTH);
                let [a, b, c] = legend_segments(dashed);
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(a.0, 0), (a.1, 0)], style)
                    + PathElement::new(vec![(b.0, 0), (b.1, 0)], style)
                    + PathElement::new(vec![(c.0, 0), (c.1, 0)], style)
            });
        debug!("drew {} ({} points)", series.label(), curves.epochs.len());
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| RenderError::new(RenderStage::Legend, e))?;

    root.present()
        .map_err(|e| RenderError::new(RenderStage::Write, e))?;
    info!("chart written to {}", options.output_path.display());
    Ok(())
}

/// Segment endpoints of the short horizontal line sample drawn in the legend. Solid samples touch end to end, dashed samples leave gaps.
fn legend_segments(dashed: bool) -> [(i32, i32); 3] {
    if dashed {
        [(0, 5), (8, 13), (16, 20)]
    } else {
        [(0, 7), (7, 14), (14, 20)]
    }
}

/// Axis ranges covering every point of both curves, padded by [`AXIS_MARGIN`] of the span on each side.
pub(crate) fn axis_ranges(curves: &Curves) -> (Range<f64>, Range<f64>) {
    let x_values = curves.epochs.iter().map(|&epoch| epoch as f64);
    let y_values = curves
        .training_loss
        .iter()
        .chain(curves.validation_loss.iter())
        .copied();
    (padded_range(x_values), padded_range(y_values))
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        // nothing to plot
        return 0.0..1.0;
    }
    let span = if max > min { max - min } else { 1.0 };
    (min - span * AXIS_MARGIN)..(max + span * AXIS_MARGIN)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{synthesize_curves, CurveOptions};
    use statrs::assert_almost_eq;
    use test_log::test;

    #[test]
    fn series_order_and_styles() {
        let all: Vec<Series> = Series::iter().collect();
        assert_eq!(all, vec![Series::Training, Series::Validation]);
        assert!(!Series::Training.is_dashed());
        assert!(Series::Validation.is_dashed());
        assert_ne!(Series::Training.color().rgb(), Series::Validation.color().rgb());
        assert_eq!(Series::Training.label(), "Training Loss");
        assert_eq!(Series::Validation.label(), "Validation Loss");
    }

    #[test]
    fn series_values_point_at_curves() {
        let curves = synthesize_curves(&CurveOptions::default());
        assert_eq!(Series::Training.values(&curves), &curves.training_loss[..]);
        assert_eq!(
            Series::Validation.values(&curves),
            &curves.validation_loss[..]
        );
    }

    #[test]
    fn legend_segments_gap_only_when_dashed() {
        let solid = legend_segments(false);
        assert_eq!(solid[0].1, solid[1].0);
        assert_eq!(solid[1].1, solid[2].0);
        let dashed = legend_segments(true);
        assert!(dashed[0].1 < dashed[1].0);
        assert!(dashed[1].1 < dashed[2].0);
    }

    #[test]
    fn default_chart_options() {
        let options = ChartOptions::default();
        assert_eq!(options.output_path, PathBuf::from("overfitting.png"));
        assert_eq!((options.width, options.height), (1000, 500));
        assert_eq!(options.title, "Example of Overfitting in Training");
        assert_eq!(options.x_label, "Epochs");
        assert_eq!(options.y_label, "Loss");
    }

    #[test]
    fn axis_ranges_cover_both_curves() {
        let curves = synthesize_curves(&CurveOptions::default());
        let (x_range, y_range) = axis_ranges(&curves);
        // epochs 1..=50, 5% of 49 on either side
        assert_almost_eq!(x_range.start, 1.0 - 2.45, 1e-12);
        assert_almost_eq!(x_range.end, 50.0 + 2.45, 1e-12);
        for loss in curves.training_loss.iter().chain(&curves.validation_loss) {
            assert!(y_range.contains(loss), "{} outside {:?}", loss, y_range);
        }
    }

    #[test]
    fn padded_range_of_constant_values() {
        let range = padded_range([2.0, 2.0].into_iter());
        assert_almost_eq!(range.start, 1.95, 1e-12);
        assert_almost_eq!(range.end, 2.05, 1e-12);
    }

    #[test]
    fn padded_range_of_nothing() {
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }
}
