use crate::draw::input::Phase;
use crate::draw::tool::{Tool, ToolState};
use crate::foundation::core::Point;
use crate::foundation::error::FlipbookResult;
use crate::raster::pair::{ComposeOpts, SurfacePair};
use crate::raster::rasterize::{Mark, Rasterizer};

/// Turns pointer input into marks on the model and composite surfaces.
///
/// Events are applied in arrival order, one mark per event; nothing is batched.
#[derive(Debug)]
pub(crate) struct DrawingPipeline {
    pub(crate) tool: ToolState,
    raster: Rasterizer,
    tap_threshold: f64,
}

impl DrawingPipeline {
    pub(crate) fn new(tap_threshold: f64) -> Self {
        Self {
            tool: ToolState::default(),
            raster: Rasterizer::new(),
            tap_threshold,
        }
    }

    /// Handle one pointer event at logical position `p`.
    pub(crate) fn handle(
        &mut self,
        phase: Phase,
        p: Point,
        surfaces: &mut SurfacePair,
        compose: ComposeOpts,
    ) -> FlipbookResult<()> {
        if !surfaces.is_ready() {
            return Ok(());
        }
        match (phase, self.tool.tool.is_freehand()) {
            (Phase::Down, true) => {
                self.tool.drawing = true;
                self.tool.last = Some(p);
                Ok(())
            }
            (Phase::Down, false) => {
                self.tool.drawing = true;
                self.tool.anchor = p;
                Ok(())
            }
            (_, _) if !self.tool.drawing => Ok(()),
            (Phase::Move, true) => self.freehand_move(p, surfaces, compose),
            (Phase::Move, false) => self.shape_preview(p, surfaces, compose),
            (Phase::Up, true) => {
                let res = self.freehand_release(p, surfaces, compose);
                self.tool.end_gesture();
                res
            }
            (Phase::Up, false) => {
                let res = self.shape_commit(p, surfaces, compose);
                self.tool.end_gesture();
                res
            }
        }
    }

    /// Abandon the current gesture; a pending shape preview is wiped from the composite.
    pub(crate) fn cancel_gesture(&mut self, surfaces: &mut SurfacePair, compose: ComposeOpts) {
        if self.tool.drawing && self.tool.tool.is_shape() {
            surfaces.rebuild_composite(compose);
        }
        self.tool.end_gesture();
    }

    fn freehand_move(
        &mut self,
        p: Point,
        surfaces: &mut SurfacePair,
        compose: ComposeOpts,
    ) -> FlipbookResult<()> {
        let from = self.tool.last.unwrap_or(p);
        let mark = Mark::Segment {
            from,
            to: p,
            width: self.tool.width,
        };
        self.apply_freehand(&mark, surfaces, compose)?;
        self.tool.last = Some(p);
        Ok(())
    }

    fn freehand_release(
        &mut self,
        p: Point,
        surfaces: &mut SurfacePair,
        compose: ComposeOpts,
    ) -> FlipbookResult<()> {
        let Some(last) = self.tool.last else {
            return Ok(());
        };
        // A zero-length segment renders nothing, so a tap becomes a dot.
        let is_tap =
            (p.x - last.x).abs() < self.tap_threshold && (p.y - last.y).abs() < self.tap_threshold;
        if !is_tap {
            return Ok(());
        }
        let mark = Mark::Dot {
            center: p,
            radius: self.tool.width / 2.0,
        };
        self.apply_freehand(&mark, surfaces, compose)
    }

    fn apply_freehand(
        &mut self,
        mark: &Mark,
        surfaces: &mut SurfacePair,
        compose: ComposeOpts,
    ) -> FlipbookResult<()> {
        let (Some(model), Some(composite)) = (surfaces.model.as_mut(), surfaces.composite.as_mut())
        else {
            return Ok(());
        };
        let size = model.size();
        match self.tool.tool {
            Tool::Eraser => {
                // Erase to transparent on the model; on screen, paint the background back in.
                let layer = self.raster.rasterize(size, mark, compose.background);
                model.erase_with(layer)?;
                composite.draw_over(layer, 1.0)?;
            }
            _ => {
                let layer = self.raster.rasterize(size, mark, self.tool.color);
                model.draw_over(layer, 1.0)?;
                composite.draw_over(layer, 1.0)?;
            }
        }
        Ok(())
    }

    fn shape_preview(
        &mut self,
        p: Point,
        surfaces: &mut SurfacePair,
        compose: ComposeOpts,
    ) -> FlipbookResult<()> {
        if !surfaces.rebuild_composite(compose) {
            return Ok(());
        }
        let Some(mark) = self.shape_mark(p) else {
            return Ok(());
        };
        let Some(composite) = surfaces.composite.as_mut() else {
            return Ok(());
        };
        let layer = self.raster.rasterize(composite.size(), &mark, self.tool.color);
        composite.draw_over(layer, 1.0)
    }

    fn shape_commit(
        &mut self,
        p: Point,
        surfaces: &mut SurfacePair,
        compose: ComposeOpts,
    ) -> FlipbookResult<()> {
        let Some(mark) = self.shape_mark(p) else {
            return Ok(());
        };
        if let Some(model) = surfaces.model.as_mut() {
            let layer = self.raster.rasterize(model.size(), &mark, self.tool.color);
            model.draw_over(layer, 1.0)?;
        }
        surfaces.rebuild_composite(compose);
        Ok(())
    }

    fn shape_mark(&self, p: Point) -> Option<Mark> {
        let anchor = self.tool.anchor;
        let width = self.tool.width;
        match self.tool.tool {
            Tool::Rectangle => Some(Mark::RectOutline { a: anchor, b: p, width }),
            // Radius-based: always a circle, even when |dx| != |dy|.
            Tool::Ellipse => Some(Mark::CircleOutline {
                center: anchor,
                radius: anchor.distance(p),
                width,
            }),
            Tool::Pencil | Tool::Eraser => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/pipeline.rs"]
mod tests;
