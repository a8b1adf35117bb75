use strum::Display;

/// The step of [`render_chart`](crate::chart::render_chart) at which an error was encountered
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum RenderStage {
    /// clearing the drawing area to the background colour
    #[strum(serialize = "filling background")]
    Background,
    /// laying out the caption, label areas and coordinate system
    #[strum(serialize = "building chart")]
    Layout,
    /// drawing the grid, axes and axis descriptions
    #[strum(serialize = "drawing mesh")]
    Mesh,
    /// drawing one of the loss series
    #[strum(serialize = "drawing series")]
    Series,
    /// drawing the legend box
    #[strum(serialize = "drawing legend")]
    Legend,
    /// encoding the image and writing it to disk
    #[strum(serialize = "writing image")]
    Write,
}

/// Indicates that an error was encountered while drawing or saving the chart
///
/// If displayed, this error will show the stage at which the error was encountered, followed by the message reported by the drawing backend.
#[derive(Clone, PartialEq, Debug)]
pub struct RenderError {
    /// The stage at which the error was encountered
    pub stage: RenderStage,
    /// The message reported by the drawing backend
    pub message: String,
}

impl RenderError {
    /// Wrap a backend error encountered at the given stage
    pub(crate) fn new(stage: RenderStage, source: impl std::fmt::Display) -> Self {
        RenderError {
            stage,
            message: source.to_string(),
        }
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "error {}: {}", self.stage, self.message)
    }
}

impl std::error::Error for RenderError {}
