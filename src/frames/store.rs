use crate::foundation::error::{FlipbookError, FlipbookResult};

/// A still-image payload: a `data:image/png;base64,...` URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrameData(String);

impl FrameData {
    /// Wrap an already-encoded payload.
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    /// The payload as a string, suitable for direct assignment to an image element.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One frame of an animation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Opaque unique id.
    pub id: String,
    /// Saved image, absent for blank frames.
    #[serde(default)]
    pub data: Option<FrameData>,
}

impl Frame {
    /// A new frame with a fresh id and no data.
    pub fn blank() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            data: None,
        }
    }

    /// Return `true` when the frame has no saved image.
    pub fn is_blank(&self) -> bool {
        self.data.is_none()
    }
}

/// Ordered frame sequence with an active index.
///
/// Invariant: there is always at least one frame, and `active < len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStore {
    frames: Vec<Frame>,
    active: usize,
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStore {
    /// A store holding a single blank frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::blank()],
            active: 0,
        }
    }

    /// Rebuild a store from saved frames; an empty list yields one blank frame.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        if frames.is_empty() {
            return Self::new();
        }
        Self { frames, active: 0 }
    }

    /// Number of frames (always >= 1).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `index`.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Index of the frame being edited.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The frame being edited.
    pub fn active_frame(&self) -> &Frame {
        &self.frames[self.active]
    }

    /// Append a blank frame and make it active. Returns the new active index.
    pub fn append(&mut self) -> usize {
        self.frames.push(Frame::blank());
        self.active = self.frames.len() - 1;
        self.active
    }

    /// Delete the frame at `index` and clamp the active index.
    ///
    /// Returns `Ok(false)` without touching anything when only one frame remains.
    pub fn remove(&mut self, index: usize) -> FlipbookResult<bool> {
        if self.frames.len() <= 1 {
            return Ok(false);
        }
        self.check_index(index)?;
        self.frames.remove(index);
        self.active = self.active.min(self.frames.len() - 1);
        Ok(true)
    }

    /// Overwrite the saved image of frame `index`.
    pub(crate) fn commit(&mut self, index: usize, data: Option<FrameData>) -> FlipbookResult<()> {
        self.check_index(index)?;
        self.frames[index].data = data;
        Ok(())
    }

    /// Make `index` the active frame. Returns `Ok(false)` when it already is.
    pub fn activate(&mut self, index: usize) -> FlipbookResult<bool> {
        self.check_index(index)?;
        if index == self.active {
            return Ok(false);
        }
        self.active = index;
        Ok(true)
    }

    /// Frames with saved data, in their original relative order.
    pub fn submission_frames(&self) -> Vec<Frame> {
        self.frames
            .iter()
            .filter(|f| !f.is_blank())
            .cloned()
            .collect()
    }

    fn check_index(&self, index: usize) -> FlipbookResult<()> {
        if index >= self.frames.len() {
            return Err(FlipbookError::validation(format!(
                "frame index {index} out of range (len {})",
                self.frames.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/store.rs"]
mod tests;
