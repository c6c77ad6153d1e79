use crate::foundation::core::{CanvasSize, Point};

/// Pointer event in device (client) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Button pressed.
    Down {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer moved.
    Move {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Button released.
    Up {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer left the surface; handled exactly like [`PointerEvent::Up`].
    Leave {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
}

/// Gesture phase once leave has been folded into up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Down,
    Move,
    Up,
}

impl PointerEvent {
    pub(crate) fn phase(self) -> Phase {
        match self {
            Self::Down { .. } => Phase::Down,
            Self::Move { .. } => Phase::Move,
            Self::Up { .. } | Self::Leave { .. } => Phase::Up,
        }
    }

    /// Client position carried by the event.
    pub fn position(self) -> Point {
        match self {
            Self::Down { x, y }
            | Self::Move { x, y }
            | Self::Up { x, y }
            | Self::Leave { x, y } => Point::new(x, y),
        }
    }
}

/// Where and how large the composite surface is displayed.
///
/// The displayed size can differ from the logical size when the surface is scaled to fit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Client x of the displayed surface's left edge.
    pub left: f64,
    /// Client y of the displayed surface's top edge.
    pub top: f64,
    /// Displayed width in client units.
    pub rendered_width: f64,
    /// Displayed height in client units.
    pub rendered_height: f64,
}

impl Viewport {
    /// A viewport that displays the canvas unscaled at the origin.
    pub fn unscaled(size: CanvasSize) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            rendered_width: f64::from(size.width),
            rendered_height: f64::from(size.height),
        }
    }

    /// Map a client position into logical canvas coordinates.
    pub fn to_logical(&self, size: CanvasSize, client: Point) -> Point {
        fn ratio(logical: u32, rendered: f64) -> f64 {
            if rendered.is_finite() && rendered > 0.0 {
                f64::from(logical) / rendered
            } else {
                1.0
            }
        }

        let sx = ratio(size.width, self.rendered_width);
        let sy = ratio(size.height, self.rendered_height);
        Point::new((client.x - self.left) * sx, (client.y - self.top) * sy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/input.rs"]
mod tests;
