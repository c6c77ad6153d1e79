use chrono::{DateTime, Utc};

use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::playback::player::PreviewPlayer;
use crate::playback::scheduler::PlaybackOpts;
use crate::storage::auth::{IdentitySession, User};
use crate::storage::model::{Animation, ListAnimationsResponse, ReactResponse};
use crate::storage::store::AnimationStore;

/// One listed animation with its hover preview.
#[derive(Debug)]
pub struct LibraryEntry {
    /// The stored record as last fetched.
    pub animation: Animation,
    /// Preview player over the record's frames.
    pub player: PreviewPlayer,
}

/// Cached listing of stored animations.
///
/// Every remote call either succeeds and updates the cache, or fails and leaves it untouched.
#[derive(Debug, Default)]
pub struct Library {
    entries: Vec<LibraryEntry>,
    playback: PlaybackOpts,
}

impl Library {
    /// An empty library.
    pub fn new(playback: PlaybackOpts) -> Self {
        Self {
            entries: Vec::new(),
            playback,
        }
    }

    /// Cached entries in listing order.
    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    /// Cached entry by record id.
    pub fn get(&self, id: &str) -> Option<&LibraryEntry> {
        self.entries.iter().find(|e| e.animation.id == id)
    }

    /// Mutable cached entry by record id, e.g. to drive its preview.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut LibraryEntry> {
        self.entries.iter_mut().find(|e| e.animation.id == id)
    }

    /// Reload the caller's own animations.
    pub fn refresh<S: AnimationStore + ?Sized>(
        &mut self,
        store: &mut S,
        session: &IdentitySession,
        now: DateTime<Utc>,
    ) -> FlipbookResult<usize> {
        let auth = session.bearer(now)?;
        let res = store
            .list_animations(auth)
            .inspect_err(|e| tracing::warn!(error = %e, "listing animations failed"))?;
        self.replace(res)
    }

    /// Reload the most-liked animations across all users.
    pub fn refresh_top_liked<S: AnimationStore + ?Sized>(
        &mut self,
        store: &mut S,
        session: &IdentitySession,
        now: DateTime<Utc>,
    ) -> FlipbookResult<usize> {
        let auth = session.bearer(now)?;
        let res = store
            .list_top_liked(auth)
            .inspect_err(|e| tracing::warn!(error = %e, "listing top-liked animations failed"))?;
        self.replace(res)
    }

    fn replace(&mut self, res: ListAnimationsResponse) -> FlipbookResult<usize> {
        if !res.success {
            return Err(FlipbookError::remote("store reported an unsuccessful listing"));
        }
        let mut old = std::mem::take(&mut self.entries);
        for animation in res.animations {
            let entry = match old.iter().position(|e| e.animation.id == animation.id) {
                Some(i) => {
                    let mut entry = old.swap_remove(i);
                    entry.player.replace_animation(&animation);
                    entry.animation = animation;
                    entry
                }
                None => LibraryEntry {
                    player: PreviewPlayer::from_animation(&animation, self.playback),
                    animation,
                },
            };
            self.entries.push(entry);
        }
        for mut gone in old {
            gone.player.teardown();
        }
        Ok(self.entries.len())
    }

    /// Delete a record. The entry is only dropped once the store confirms.
    pub fn delete<S: AnimationStore + ?Sized>(
        &mut self,
        id: &str,
        store: &mut S,
        session: &IdentitySession,
        now: DateTime<Utc>,
    ) -> FlipbookResult<()> {
        let auth = session.bearer(now)?;
        let res = store
            .delete_animation(auth, id)
            .inspect_err(|e| tracing::warn!(error = %e, id, "deleting animation failed"))?;
        if !res.success {
            tracing::warn!(id, message = %res.message, "store refused delete");
            return Err(FlipbookError::remote(res.message));
        }
        if let Some(i) = self.entries.iter().position(|e| e.animation.id == id) {
            let mut entry = self.entries.remove(i);
            entry.player.teardown();
        }
        Ok(())
    }

    /// Like or unlike a record and update the cached like state from the response.
    pub fn react<S: AnimationStore + ?Sized>(
        &mut self,
        id: &str,
        is_liked: bool,
        store: &mut S,
        session: &IdentitySession,
        now: DateTime<Utc>,
    ) -> FlipbookResult<ReactResponse> {
        let auth = session.bearer(now)?;
        let res = store
            .react(auth, id, is_liked)
            .inspect_err(|e| tracing::warn!(error = %e, id, "reacting failed"))?;
        if !res.success {
            tracing::warn!(id, message = %res.message, "store refused reaction");
            return Err(FlipbookError::remote(res.message));
        }
        if let Some(entry) = self.get_mut(id) {
            entry.animation.is_liked = res.is_liked;
            entry.animation.like_count = res.like_count;
        }
        Ok(res)
    }

    /// Advance every playing preview. Returns how many changed their displayed frame.
    pub fn tick(&mut self, now: std::time::Duration) -> usize {
        self.entries
            .iter_mut()
            .map(|e| e.player.tick(now))
            .filter(|changed| *changed)
            .count()
    }
}

/// Only the owner of a record may delete it.
pub fn can_delete(entry: &LibraryEntry, user: Option<&User>) -> bool {
    user.is_some_and(|u| u.uid == entry.animation.user_id)
}

#[cfg(test)]
#[path = "../../tests/unit/storage/library.rs"]
mod tests;
