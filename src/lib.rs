//! flipbook is the core of a frame-by-frame raster animation editor.
//!
//! The public API is session-oriented:
//!
//! - Open an [`Editor`] and feed it [`PointerEvent`]s to draw with the pencil, eraser,
//!   rectangle or ellipse tool
//! - Add, delete, switch and clear frames; the previous frame is shown onion-skinned under the
//!   current one
//! - Drive frame-image decodes through [`LoadRequest`] / [`LoadResult`]
//! - [`publish`] the animation into an [`AnimationStore`] and browse it with a [`Library`] of
//!   [`PreviewPlayer`]s
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod draw;
pub(crate) mod editor;
pub(crate) mod frames;
pub(crate) mod playback;
pub(crate) mod raster;
pub(crate) mod storage;

pub use crate::foundation::core::{CanvasSize, LOGICAL_SIZE, Point, Rgba8};
pub use crate::foundation::error::{FlipbookError, FlipbookResult};

pub use crate::draw::input::{PointerEvent, Viewport};
pub use crate::draw::tool::{
    DEFAULT_BRUSH_WIDTH, MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH, Tool, ToolState,
};
pub use crate::editor::loader::{LoadRequest, LoadResult, LoadSlot, LoadTicket};
pub use crate::editor::opts::EditorOpts;
pub use crate::editor::session::{DEFAULT_TITLE, Editor, Submission};
pub use crate::frames::codec::{DecodedImage, decode_frame_data, encode_surface};
pub use crate::frames::store::{Frame, FrameData, FrameStore};
pub use crate::playback::player::PreviewPlayer;
pub use crate::playback::scheduler::{PlaybackOpts, PlaybackScheduler, TimerHandle};
pub use crate::raster::surface::{Surface, is_blank};
pub use crate::storage::auth::{Credential, IdentitySession, User};
pub use crate::storage::file::FileStore;
pub use crate::storage::library::{Library, LibraryEntry, can_delete};
pub use crate::storage::memory::{InMemoryStore, TOP_LIKED_LIMIT};
pub use crate::storage::model::{
    Animation, AnimationResponse, CreateAnimationRequest, DeleteAnimationResponse,
    ListAnimationsResponse, ReactRequest, ReactResponse, UpdateAnimationRequest,
};
pub use crate::storage::publish::publish;
pub use crate::storage::store::AnimationStore;
