use crate::foundation::error::FlipbookResult;
use crate::frames::codec::{DecodedImage, decode_frame_data};
use crate::frames::store::FrameData;

/// Which surface a decoded image is destined for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadSlot {
    /// The active frame's saved image, seeding the model surface.
    Model,
    /// The previous frame's image, shown as the onion-skin layer.
    Ghost,
}

/// Identifies one load. Only tickets of the editor's current generation are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    /// Activation generation the load was issued in.
    pub generation: u64,
    /// Destination surface.
    pub slot: LoadSlot,
}

/// An image decode the host must perform.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    /// Ticket to hand back with the result.
    pub ticket: LoadTicket,
    /// Encoded image.
    pub payload: FrameData,
}

impl LoadRequest {
    /// Decode the payload. Safe to run on any thread.
    pub fn decode(self) -> LoadResult {
        LoadResult {
            ticket: self.ticket,
            image: decode_frame_data(&self.payload),
        }
    }
}

/// Outcome of a [`LoadRequest`], fed back through [`crate::Editor::complete_load`].
#[derive(Debug)]
pub struct LoadResult {
    /// Ticket of the originating request.
    pub ticket: LoadTicket,
    /// Decoded image, or why decoding failed.
    pub image: FlipbookResult<DecodedImage>,
}

#[cfg(test)]
#[path = "../../tests/unit/editor/loader.rs"]
mod tests;
