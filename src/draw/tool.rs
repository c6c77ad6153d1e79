use crate::foundation::core::{Point, Rgba8};

/// Smallest brush width offered to the user.
pub const MIN_BRUSH_WIDTH: f64 = 1.0;
/// Largest brush width offered to the user.
pub const MAX_BRUSH_WIDTH: f64 = 50.0;
/// Brush width of a fresh session.
pub const DEFAULT_BRUSH_WIDTH: f64 = 5.0;

/// Drawing tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand ink.
    #[default]
    Pencil,
    /// Freehand erase back to transparent.
    Eraser,
    /// Axis-aligned rectangle outline.
    Rectangle,
    /// Circle outline centered on the press point.
    #[serde(alias = "circle")]
    Ellipse,
}

impl Tool {
    /// Pencil and eraser draw continuously while the pointer moves.
    pub fn is_freehand(self) -> bool {
        matches!(self, Self::Pencil | Self::Eraser)
    }

    /// Rectangle and ellipse preview on move and commit on release.
    pub fn is_shape(self) -> bool {
        !self.is_freehand()
    }
}

/// Session-scoped tool settings plus the in-flight gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolState {
    /// Selected tool.
    pub tool: Tool,
    /// Ink color for pencil and shapes.
    pub color: Rgba8,
    /// Stroke width in logical units.
    pub width: f64,
    /// Last recorded pointer position of a freehand gesture.
    pub last: Option<Point>,
    /// Press position of a shape gesture.
    pub anchor: Point,
    /// Whether a gesture is in progress.
    pub drawing: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: Rgba8::BLACK,
            width: DEFAULT_BRUSH_WIDTH,
            last: None,
            anchor: Point::ORIGIN,
            drawing: false,
        }
    }
}

impl ToolState {
    /// Set the stroke width, clamped to the supported range.
    pub fn set_width(&mut self, width: f64) {
        self.width = if width.is_finite() {
            width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH)
        } else {
            DEFAULT_BRUSH_WIDTH
        };
    }

    pub(crate) fn end_gesture(&mut self) {
        self.drawing = false;
        self.last = None;
    }
}
