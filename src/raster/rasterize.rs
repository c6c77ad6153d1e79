use kurbo::{BezPath, Circle, Point, Rect, Shape};

use crate::foundation::core::{CanvasSize, Rgba8};
use crate::raster::surface::Surface;

const PATH_TOLERANCE: f64 = 0.1;

/// One rasterizable drawing primitive in logical coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Mark {
    /// Straight stroke with round caps and joins.
    Segment { from: Point, to: Point, width: f64 },
    /// Filled disc.
    Dot { center: Point, radius: f64 },
    /// Unfilled axis-aligned rectangle with corners at `a` and `b`.
    RectOutline { a: Point, b: Point, width: f64 },
    /// Unfilled circle.
    CircleOutline {
        center: Point,
        radius: f64,
        width: f64,
    },
}

/// Rasterizes [`Mark`]s into a reusable coverage layer with `vello_cpu`.
///
/// The layer is painted on transparent and then composited onto the target surfaces by the
/// caller, so a mark can be applied as ink (source-over) or as an eraser (destination-out).
pub(crate) struct Rasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    layer: Option<Surface>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("has_ctx", &self.ctx.is_some())
            .field("layer", &self.layer)
            .finish()
    }
}

impl Rasterizer {
    pub(crate) fn new() -> Self {
        Self {
            ctx: None,
            layer: None,
        }
    }

    /// Rasterize `mark` painted with `paint` and return the resulting layer.
    pub(crate) fn rasterize(&mut self, size: CanvasSize, mark: &Mark, paint: Rgba8) -> &Surface {
        let mut layer = match self.layer.take() {
            Some(l) if l.size() == size => l,
            _ => Surface::new_transparent(size),
        };
        layer.clear();

        let (w, h) = size.as_u16();
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            paint.r, paint.g, paint.b, paint.a,
        ));

        match *mark {
            Mark::Segment { from, to, width } => {
                let mut path = BezPath::new();
                path.move_to(from);
                path.line_to(to);
                ctx.set_stroke(round_stroke(width));
                ctx.stroke_path(&bezpath_to_cpu(&path));
            }
            Mark::Dot { center, radius } => {
                let path = Circle::new(center, radius.max(0.0)).to_path(PATH_TOLERANCE);
                ctx.fill_path(&bezpath_to_cpu(&path));
            }
            Mark::RectOutline { a, b, width } => {
                let path = Rect::from_points(a, b).to_path(PATH_TOLERANCE);
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
                ctx.stroke_path(&bezpath_to_cpu(&path));
            }
            Mark::CircleOutline {
                center,
                radius,
                width,
            } => {
                let path = Circle::new(center, radius.max(0.0)).to_path(PATH_TOLERANCE);
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
                ctx.stroke_path(&bezpath_to_cpu(&path));
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(layer.pixmap_mut());
        self.ctx = Some(ctx);
        self.layer.insert(layer)
    }
}

fn round_stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_caps(vello_cpu::kurbo::Cap::Round)
        .with_join(vello_cpu::kurbo::Join::Round)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/rasterize.rs"]
mod tests;
