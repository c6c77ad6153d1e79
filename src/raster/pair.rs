use crate::foundation::core::Rgba8;
use crate::raster::surface::Surface;

/// Inputs of the compose step.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ComposeOpts {
    pub(crate) background: Rgba8,
    pub(crate) onion_skin: bool,
    pub(crate) ghost_opacity: f32,
}

/// The editing session's raster buffers.
///
/// `model` holds only the active frame's strokes on transparent; `composite` is what the user
/// sees. `ghost` is the decoded previous frame used for onion-skinning. All three are separate
/// allocations; data only ever flows model/ghost -> composite.
#[derive(Debug, Default)]
pub(crate) struct SurfacePair {
    pub(crate) model: Option<Surface>,
    pub(crate) composite: Option<Surface>,
    pub(crate) ghost: Option<Surface>,
}

impl SurfacePair {
    /// Rebuild the composite from scratch. Returns `false` when a surface is not ready.
    pub(crate) fn rebuild_composite(&mut self, opts: ComposeOpts) -> bool {
        let (Some(model), Some(composite)) = (self.model.as_ref(), self.composite.as_mut()) else {
            return false;
        };
        let ghost = if opts.onion_skin {
            self.ghost.as_ref()
        } else {
            None
        };
        compose(composite, ghost, model, opts);
        true
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.model.is_some() && self.composite.is_some()
    }
}

/// background, then ghost at reduced opacity, then model at full opacity.
pub(crate) fn compose(
    composite: &mut Surface,
    ghost: Option<&Surface>,
    model: &Surface,
    opts: ComposeOpts,
) {
    composite.fill(opts.background);
    if let Some(ghost) = ghost
        && let Err(e) = composite.draw_over(ghost, opts.ghost_opacity)
    {
        tracing::warn!(error = %e, "skipping onion-skin layer");
    }
    if let Err(e) = composite.draw_over(model, 1.0) {
        tracing::warn!(error = %e, "model surface does not match composite");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pair.rs"]
mod tests;
