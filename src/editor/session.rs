use crate::draw::input::{PointerEvent, Viewport};
use crate::draw::pipeline::DrawingPipeline;
use crate::draw::tool::{Tool, ToolState};
use crate::editor::loader::{LoadRequest, LoadResult, LoadSlot, LoadTicket};
use crate::editor::opts::EditorOpts;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::frames::codec::encode_surface;
use crate::frames::store::{Frame, FrameData, FrameStore};
use crate::raster::pair::{ComposeOpts, SurfacePair};
use crate::raster::surface::{Surface, is_blank};
use crate::storage::model::Animation;

/// Title used until the user names the animation.
pub const DEFAULT_TITLE: &str = "Untitled Animation";

/// What gets sent to storage on save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Frames with content, in order.
    pub frames: Vec<Frame>,
    /// Payload of the first frame.
    pub thumbnail: FrameData,
}

/// One editing session: frames, surfaces, tools and the image-load protocol.
///
/// Frame images are decoded asynchronously. Every activation bumps a generation counter and
/// queues [`LoadRequest`]s; the host decodes them wherever it likes and feeds the results back
/// through [`Editor::complete_load`]. Results from an older generation are dropped, so a slow
/// decode can never paint into a frame the user has already left.
#[derive(Debug)]
pub struct Editor {
    opts: EditorOpts,
    title: String,
    animation_id: Option<String>,
    frames: FrameStore,
    surfaces: SurfacePair,
    pipeline: DrawingPipeline,
    viewport: Viewport,
    generation: u64,
    awaiting_model: bool,
    awaiting_ghost: bool,
    pending: Vec<LoadRequest>,
    torn_down: bool,
}

impl Editor {
    /// A new session with one blank frame.
    pub fn new(opts: EditorOpts) -> FlipbookResult<Self> {
        Self::with_frames(opts, FrameStore::new(), DEFAULT_TITLE.to_string(), None)
    }

    /// Edit a stored animation. Frame 0 is activated and its image queued for loading.
    pub fn open(animation: &Animation, opts: EditorOpts) -> FlipbookResult<Self> {
        Self::with_frames(
            opts,
            FrameStore::from_frames(animation.frames.clone()),
            animation.title.clone(),
            Some(animation.id.clone()),
        )
    }

    fn with_frames(
        opts: EditorOpts,
        frames: FrameStore,
        title: String,
        animation_id: Option<String>,
    ) -> FlipbookResult<Self> {
        opts.validate()?;
        let mut editor = Self {
            opts,
            title,
            animation_id,
            frames,
            surfaces: SurfacePair {
                model: None,
                composite: Some(Surface::new_filled(opts.canvas, opts.background)),
                ghost: None,
            },
            pipeline: DrawingPipeline::new(opts.tap_threshold),
            viewport: Viewport::unscaled(opts.canvas),
            generation: 0,
            awaiting_model: false,
            awaiting_ghost: false,
            pending: Vec::new(),
            torn_down: false,
        };
        editor.reinitialize();
        Ok(editor)
    }

    /// Active configuration.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// Current title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rename the animation; validated on submission.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Id of the stored record this session edits, once saved.
    pub fn animation_id(&self) -> Option<&str> {
        self.animation_id.as_deref()
    }

    pub(crate) fn set_animation_id(&mut self, id: String) {
        self.animation_id = Some(id);
    }

    /// The frame sequence.
    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// Index of the frame being edited.
    pub fn active_index(&self) -> usize {
        self.frames.active_index()
    }

    /// Current tool settings.
    pub fn tool(&self) -> &ToolState {
        &self.pipeline.tool
    }

    /// What the user sees. `None` after teardown.
    pub fn composite(&self) -> Option<&Surface> {
        self.surfaces.composite.as_ref()
    }

    /// The active frame's strokes on transparent. `None` while its image is loading.
    pub fn model(&self) -> Option<&Surface> {
        self.surfaces.model.as_ref()
    }

    /// Whether drawing is possible right now.
    pub fn is_ready(&self) -> bool {
        self.surfaces.is_ready()
    }

    /// Current activation generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an issued load has not been completed yet.
    pub fn is_loading(&self) -> bool {
        self.awaiting_model || self.awaiting_ghost
    }

    fn compose_opts(&self) -> ComposeOpts {
        ComposeOpts {
            background: self.opts.background,
            onion_skin: self.opts.onion_skin,
            ghost_opacity: self.opts.ghost_opacity,
        }
    }

    /// Select a tool. Any gesture in progress ends without committing.
    pub fn set_tool(&mut self, tool: Tool) {
        self.cancel_gesture();
        self.pipeline.tool.tool = tool;
    }

    /// Select the ink color.
    pub fn set_color(&mut self, color: Rgba8) {
        self.cancel_gesture();
        self.pipeline.tool.color = color;
    }

    /// Select the brush width; clamped to the slider range.
    pub fn set_width(&mut self, width: f64) {
        self.cancel_gesture();
        self.pipeline.tool.set_width(width);
    }

    fn cancel_gesture(&mut self) {
        let compose = self.compose_opts();
        self.pipeline.cancel_gesture(&mut self.surfaces, compose);
    }

    /// Where the composite is displayed, for mapping pointer coordinates.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the displayed placement of the composite.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Handle a pointer event in client coordinates.
    pub fn pointer(&mut self, event: PointerEvent) -> FlipbookResult<()> {
        let p = self.viewport.to_logical(self.opts.canvas, event.position());
        self.dispatch(event, p)
    }

    /// Handle a pointer event whose position is already in logical units.
    pub fn pointer_logical(&mut self, event: PointerEvent) -> FlipbookResult<()> {
        self.dispatch(event, event.position())
    }

    fn dispatch(&mut self, event: PointerEvent, p: Point) -> FlipbookResult<()> {
        let compose = self.compose_opts();
        self.pipeline.handle(event.phase(), p, &mut self.surfaces, compose)
    }

    /// Whether the previous frame is shown under the current one.
    pub fn onion_skin(&self) -> bool {
        self.opts.onion_skin
    }

    /// Turn onion-skinning on or off. Turning it on may queue a load for the previous frame.
    pub fn set_onion_skin(&mut self, enabled: bool) {
        if self.torn_down || self.opts.onion_skin == enabled {
            return;
        }
        self.opts.onion_skin = enabled;
        if enabled && self.surfaces.ghost.is_none() && !self.awaiting_ghost {
            self.request_ghost();
        }
        self.surfaces.rebuild_composite(self.compose_opts());
    }

    /// Persist the model surface into the active frame. No-op while the model is not ready.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn save_current_frame(&mut self) -> FlipbookResult<()> {
        let Some(model) = self.surfaces.model.as_ref() else {
            return Ok(());
        };
        let data = if is_blank(model) {
            None
        } else {
            Some(encode_surface(model)?)
        };
        self.frames.commit(self.frames.active_index(), data)
    }

    /// Save, append a blank frame and make it active. Returns the new index.
    ///
    /// After [`Editor::teardown`] this and the other frame operations change nothing.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn add_new_frame(&mut self) -> FlipbookResult<usize> {
        if self.torn_down {
            return Ok(self.frames.active_index());
        }
        self.save_current_frame()?;
        let index = self.frames.append();
        self.reinitialize();
        Ok(index)
    }

    /// Discard the active frame without saving it. Returns `false` when it is the only one.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn delete_current_frame(&mut self) -> FlipbookResult<bool> {
        if self.torn_down {
            return Ok(false);
        }
        if !self.frames.remove(self.frames.active_index())? {
            return Ok(false);
        }
        self.reinitialize();
        Ok(true)
    }

    /// Save the active frame and activate `target`. Returns `false` when `target` is already
    /// active, in which case nothing is saved or reloaded.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn switch_frame(&mut self, target: usize) -> FlipbookResult<bool> {
        if target >= self.frames.len() {
            return Err(FlipbookError::validation(format!(
                "frame index {target} out of range (len {})",
                self.frames.len()
            )));
        }
        if self.torn_down || target == self.frames.active_index() {
            return Ok(false);
        }
        self.save_current_frame()?;
        self.frames.activate(target)?;
        self.reinitialize();
        Ok(true)
    }

    /// Wipe the active frame and mark it blank.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn clear_current_frame(&mut self) -> FlipbookResult<()> {
        if self.torn_down {
            return Ok(());
        }
        self.pipeline.tool.end_gesture();
        self.awaiting_model = false;
        self.pending.retain(|r| r.ticket.slot != LoadSlot::Model);
        match self.surfaces.model.as_mut() {
            Some(model) => model.clear(),
            None => self.surfaces.model = Some(Surface::new_transparent(self.opts.canvas)),
        }
        self.surfaces.rebuild_composite(self.compose_opts());
        self.frames.commit(self.frames.active_index(), None)
    }

    /// Save once more and collect what storage needs.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn prepare_submission(&mut self) -> FlipbookResult<Submission> {
        self.save_current_frame()?;
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FlipbookError::validation("title must not be empty"));
        }
        let frames = self.frames.submission_frames();
        let Some(thumbnail) = frames.first().and_then(|f| f.data.clone()) else {
            return Err(FlipbookError::validation(
                "add content to at least one frame before saving",
            ));
        };
        Ok(Submission {
            title: title.to_string(),
            frames,
            thumbnail,
        })
    }

    /// Payloads of the frames with content, after saving the active frame.
    pub fn preview_frames(&mut self) -> FlipbookResult<Vec<FrameData>> {
        self.save_current_frame()?;
        Ok(self
            .frames
            .frames()
            .iter()
            .filter_map(|f| f.data.clone())
            .collect())
    }

    /// Hand the queued decode requests to the host.
    pub fn take_pending_loads(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Apply a decoded image.
    ///
    /// Returns `Ok(false)` when the result is stale and was dropped. A failed model decode is
    /// returned as an error and leaves the model unready, so the frame's saved image is kept.
    pub fn complete_load(&mut self, result: LoadResult) -> FlipbookResult<bool> {
        let LoadResult { ticket, image } = result;
        if !self.accepts(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                slot = ?ticket.slot,
                "discarding stale image load"
            );
            return Ok(false);
        }

        match ticket.slot {
            LoadSlot::Model => {
                self.awaiting_model = false;
                let image = image?;
                let surface = Surface::from_premul_rgba8(
                    self.opts.canvas,
                    &image.rgba8_premul,
                    image.width,
                    image.height,
                )?;
                self.surfaces.model = Some(surface);
            }
            LoadSlot::Ghost => {
                self.awaiting_ghost = false;
                match image.and_then(|img| {
                    Surface::from_premul_rgba8(
                        self.opts.canvas,
                        &img.rgba8_premul,
                        img.width,
                        img.height,
                    )
                }) {
                    Ok(surface) => self.surfaces.ghost = Some(surface),
                    Err(e) => {
                        tracing::warn!(error = %e, "previous frame failed to decode");
                        return Ok(false);
                    }
                }
            }
        }
        self.surfaces.rebuild_composite(self.compose_opts());
        Ok(true)
    }

    /// Decode and apply every queued load on the calling thread.
    ///
    /// Every request is applied even when an earlier one fails; the first error is returned.
    pub fn run_pending_loads(&mut self) -> FlipbookResult<()> {
        let mut first_err = None;
        for request in self.take_pending_loads() {
            if let Err(e) = self.complete_load(request.decode()) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Release the surfaces and invalidate outstanding loads.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation = self.generation.wrapping_add(1);
        self.pending.clear();
        self.awaiting_model = false;
        self.awaiting_ghost = false;
        self.pipeline.tool.end_gesture();
        self.surfaces = SurfacePair::default();
    }

    fn accepts(&self, ticket: LoadTicket) -> bool {
        if self.torn_down || ticket.generation != self.generation {
            return false;
        }
        match ticket.slot {
            LoadSlot::Model => self.awaiting_model,
            LoadSlot::Ghost => self.awaiting_ghost,
        }
    }

    /// Point the surfaces at the active frame after an activation.
    fn reinitialize(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pipeline.tool.end_gesture();
        self.pending.clear();
        self.awaiting_model = false;
        self.awaiting_ghost = false;
        self.surfaces.ghost = None;

        let index = self.frames.active_index();
        match self.frames.get(index).and_then(|f| f.data.clone()) {
            Some(payload) => {
                self.surfaces.model = None;
                self.awaiting_model = true;
                self.pending.push(LoadRequest {
                    ticket: LoadTicket {
                        generation: self.generation,
                        slot: LoadSlot::Model,
                    },
                    payload,
                });
            }
            None => self.surfaces.model = Some(Surface::new_transparent(self.opts.canvas)),
        }
        self.request_ghost();

        if let Some(composite) = self.surfaces.composite.as_mut() {
            composite.fill(self.opts.background);
        }
        self.surfaces.rebuild_composite(self.compose_opts());
    }

    fn request_ghost(&mut self) {
        let index = self.frames.active_index();
        if !self.opts.onion_skin || index == 0 {
            return;
        }
        let Some(payload) = self.frames.get(index - 1).and_then(|f| f.data.clone()) else {
            return;
        };
        self.awaiting_ghost = true;
        self.pending.push(LoadRequest {
            ticket: LoadTicket {
                generation: self.generation,
                slot: LoadSlot::Ghost,
            },
            payload,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
