use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::frames::store::{Frame, FrameData};
use crate::storage::auth::Credential;
use crate::storage::model::{
    Animation, AnimationResponse, CreateAnimationRequest, DeleteAnimationResponse,
    ListAnimationsResponse, ReactResponse, UpdateAnimationRequest,
};
use crate::storage::store::AnimationStore;

/// Maximum number of records returned by [`AnimationStore::list_top_liked`].
pub const TOP_LIKED_LIMIT: usize = 10;

/// Persistent part of a store: records plus who liked what.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreState {
    pub(crate) animations: Vec<Animation>,
    #[serde(default)]
    pub(crate) likes: BTreeMap<String, BTreeSet<String>>,
}

/// An [`AnimationStore`] that keeps everything in process memory.
///
/// Useful for tests and as the backing state of [`crate::FileStore`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    state: StoreState,
    fixed_now: Option<DateTime<Utc>>,
}

impl InMemoryStore {
    /// An empty store using the wall clock.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_state(state: StoreState) -> Self {
        Self {
            state,
            fixed_now: None,
        }
    }

    pub(crate) fn state(&self) -> &StoreState {
        &self.state
    }

    /// Pin the store's clock, used for timestamps and credential expiry.
    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.fixed_now = Some(now);
    }

    /// Number of stored animations.
    pub fn len(&self) -> usize {
        self.state.animations.len()
    }

    /// Return `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.state.animations.is_empty()
    }

    /// Look up a record without a credential, as seen by nobody in particular.
    pub fn get(&self, id: &str) -> Option<&Animation> {
        self.state.animations.iter().find(|a| a.id == id)
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    fn authorize<'a>(&self, auth: &'a Credential) -> FlipbookResult<&'a str> {
        if auth.token.is_empty() || auth.uid.is_empty() {
            return Err(FlipbookError::unauthorized("missing bearer token"));
        }
        if auth.is_expired(self.now()) {
            return Err(FlipbookError::unauthorized("token expired"));
        }
        Ok(&auth.uid)
    }

    fn position(&self, id: &str) -> FlipbookResult<usize> {
        self.state
            .animations
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| FlipbookError::remote(format!("animation '{id}' not found")))
    }

    fn owned_position(&self, uid: &str, id: &str) -> FlipbookResult<usize> {
        let idx = self.position(id)?;
        if self.state.animations[idx].user_id != uid {
            return Err(FlipbookError::unauthorized(format!(
                "animation '{id}' belongs to another user"
            )));
        }
        Ok(idx)
    }

    /// A copy of the record with the caller's like state filled in.
    fn view(&self, animation: &Animation, uid: &str) -> Animation {
        let likers = self.state.likes.get(&animation.id);
        let mut out = animation.clone();
        out.like_count = likers.map_or(0, |l| l.len() as u64);
        out.is_liked = Some(likers.is_some_and(|l| l.contains(uid)));
        out
    }

    fn list_response(&self, animations: Vec<Animation>) -> ListAnimationsResponse {
        ListAnimationsResponse {
            success: true,
            count: animations.len(),
            animations,
        }
    }
}

fn thumbnail_of(frames: &[Frame]) -> Option<FrameData> {
    frames.iter().find_map(|f| f.data.clone())
}

fn validate_title(title: &str) -> FlipbookResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(FlipbookError::remote("title is required"));
    }
    Ok(title.to_string())
}

impl AnimationStore for InMemoryStore {
    fn list_animations(&mut self, auth: &Credential) -> FlipbookResult<ListAnimationsResponse> {
        let uid = self.authorize(auth)?;
        let mut out: Vec<Animation> = self
            .state
            .animations
            .iter()
            .rev()
            .filter(|a| a.user_id == uid)
            .map(|a| self.view(a, uid))
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(self.list_response(out))
    }

    fn list_top_liked(&mut self, auth: &Credential) -> FlipbookResult<ListAnimationsResponse> {
        let uid = self.authorize(auth)?;
        let mut out: Vec<Animation> = self
            .state
            .animations
            .iter()
            .rev()
            .map(|a| self.view(a, uid))
            .collect();
        out.sort_by(|a, b| {
            b.like_count
                .cmp(&a.like_count)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        out.truncate(TOP_LIKED_LIMIT);
        Ok(self.list_response(out))
    }

    fn create_animation(
        &mut self,
        auth: &Credential,
        req: CreateAnimationRequest,
    ) -> FlipbookResult<AnimationResponse> {
        let uid = self.authorize(auth)?.to_string();
        let title = validate_title(&req.title)?;
        let frames: Vec<Frame> = req.frames.into_iter().filter(|f| !f.is_blank()).collect();
        let thumbnail = thumbnail_of(&frames)
            .ok_or_else(|| FlipbookError::remote("at least one frame with content is required"))?;

        let now = self.now();
        let animation = Animation {
            id: uuid::Uuid::new_v4().simple().to_string(),
            user_id: uid.clone(),
            title,
            frames,
            thumbnail,
            created_at: now,
            updated_at: now,
            is_liked: None,
            like_count: 0,
        };
        let view = self.view(&animation, &uid);
        self.state.animations.push(animation);
        tracing::debug!(id = %view.id, "animation created");
        Ok(AnimationResponse {
            success: true,
            animation: view,
        })
    }

    fn update_animation(
        &mut self,
        auth: &Credential,
        id: &str,
        req: UpdateAnimationRequest,
    ) -> FlipbookResult<AnimationResponse> {
        let uid = self.authorize(auth)?.to_string();
        let idx = self.owned_position(&uid, id)?;

        let title = req.title.as_deref().map(validate_title).transpose()?;
        let frames = match req.frames {
            Some(frames) => {
                let frames: Vec<Frame> = frames.into_iter().filter(|f| !f.is_blank()).collect();
                if frames.is_empty() {
                    return Err(FlipbookError::remote(
                        "at least one frame with content is required",
                    ));
                }
                Some(frames)
            }
            None => None,
        };

        let now = self.now();
        let record = &mut self.state.animations[idx];
        if let Some(title) = title {
            record.title = title;
        }
        if let Some(frames) = frames {
            if req.thumbnail.is_none()
                && let Some(thumb) = thumbnail_of(&frames)
            {
                record.thumbnail = thumb;
            }
            record.frames = frames;
        }
        if let Some(thumbnail) = req.thumbnail {
            record.thumbnail = thumbnail;
        }
        record.updated_at = now;

        let view = self.view(&self.state.animations[idx], &uid);
        Ok(AnimationResponse {
            success: true,
            animation: view,
        })
    }

    fn delete_animation(
        &mut self,
        auth: &Credential,
        id: &str,
    ) -> FlipbookResult<DeleteAnimationResponse> {
        let uid = self.authorize(auth)?.to_string();
        let idx = self.owned_position(&uid, id)?;
        self.state.animations.remove(idx);
        self.state.likes.remove(id);
        Ok(DeleteAnimationResponse {
            success: true,
            message: "Animation deleted successfully".to_string(),
        })
    }

    fn react(
        &mut self,
        auth: &Credential,
        id: &str,
        is_liked: bool,
    ) -> FlipbookResult<ReactResponse> {
        let uid = self.authorize(auth)?.to_string();
        self.position(id)?;
        let likers = self.state.likes.entry(id.to_string()).or_default();
        if is_liked {
            likers.insert(uid);
        } else {
            likers.remove(&uid);
        }
        let like_count = likers.len() as u64;
        if likers.is_empty() {
            self.state.likes.remove(id);
        }
        Ok(ReactResponse {
            success: true,
            message: if is_liked { "Liked" } else { "Unliked" }.to_string(),
            is_liked: Some(is_liked),
            like_count,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/memory.rs"]
mod tests;
