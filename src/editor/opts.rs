use crate::foundation::core::{CanvasSize, Rgba8};
use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Editor configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorOpts {
    /// Surface size; one pixel per logical unit.
    pub canvas: CanvasSize,
    /// Show the previous frame dimmed under the current one.
    pub onion_skin: bool,
    /// Opacity of the onion-skin layer.
    pub ghost_opacity: f32,
    /// Release within this distance (per axis) of the last point counts as a tap.
    pub tap_threshold: f64,
    /// Opaque color under everything on the composite; also the eraser's on-screen color.
    pub background: Rgba8,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            onion_skin: true,
            ghost_opacity: 0.3,
            tap_threshold: 2.0,
            background: Rgba8::WHITE,
        }
    }
}

impl EditorOpts {
    /// Check ranges that `serde` cannot enforce.
    pub fn validate(&self) -> FlipbookResult<()> {
        CanvasSize::new(self.canvas.width, self.canvas.height)?;
        if !(0.0..=1.0).contains(&self.ghost_opacity) {
            return Err(FlipbookError::validation(format!(
                "ghost_opacity must be in [0, 1], got {}",
                self.ghost_opacity
            )));
        }
        if !self.tap_threshold.is_finite() || self.tap_threshold < 0.0 {
            return Err(FlipbookError::validation(format!(
                "tap_threshold must be finite and >= 0, got {}",
                self.tap_threshold
            )));
        }
        if self.background.a != 255 {
            return Err(FlipbookError::validation("background must be opaque"));
        }
        Ok(())
    }
}
