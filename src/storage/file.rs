use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::storage::auth::Credential;
use crate::storage::memory::{InMemoryStore, StoreState};
use crate::storage::model::{
    Animation, AnimationResponse, CreateAnimationRequest, DeleteAnimationResponse,
    ListAnimationsResponse, ReactResponse, UpdateAnimationRequest,
};
use crate::storage::store::AnimationStore;

/// An [`AnimationStore`] persisted as one pretty-printed JSON file.
///
/// Mutations are applied to a copy, written to a sibling `.tmp` file and renamed over the store,
/// and only then become visible; a failed write leaves both the file and the in-memory state as
/// they were.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; it is created on first write.
    pub fn open(path: impl AsRef<Path>) -> FlipbookResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let f = File::open(&path).map_err(|e| {
                FlipbookError::remote(format!("open store '{}': {e}", path.display()))
            })?;
            serde_json::from_reader(BufReader::new(f)).map_err(|e| {
                FlipbookError::serde(format!("parse store '{}': {e}", path.display()))
            })?
        } else {
            StoreState::default()
        };
        Ok(Self {
            path,
            inner: InMemoryStore::from_state(state),
        })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pin the clock, see [`InMemoryStore::set_now`].
    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.inner.set_now(now);
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Animation> {
        self.inner.get(id)
    }

    /// Number of stored animations.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Return `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn persist(&self, state: &StoreState) -> FlipbookResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| {
                FlipbookError::remote(format!("create store dir '{}': {e}", dir.display()))
            })?;
        }
        let bytes = serde_json::to_vec_pretty(state)?;
        // Readers only ever see the old or the new file, never a partial one.
        let tmp = self.tmp_path();
        std::fs::write(&tmp, bytes).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            FlipbookError::remote(format!("write store '{}': {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            FlipbookError::remote(format!("replace store '{}': {e}", self.path.display()))
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut InMemoryStore) -> FlipbookResult<T>,
    ) -> FlipbookResult<T> {
        let mut next = self.inner.clone();
        let out = f(&mut next)?;
        self.persist(next.state())?;
        self.inner = next;
        Ok(out)
    }
}

impl AnimationStore for FileStore {
    fn list_animations(&mut self, auth: &Credential) -> FlipbookResult<ListAnimationsResponse> {
        self.inner.list_animations(auth)
    }

    fn list_top_liked(&mut self, auth: &Credential) -> FlipbookResult<ListAnimationsResponse> {
        self.inner.list_top_liked(auth)
    }

    fn create_animation(
        &mut self,
        auth: &Credential,
        req: CreateAnimationRequest,
    ) -> FlipbookResult<AnimationResponse> {
        self.mutate(|s| s.create_animation(auth, req))
    }

    fn update_animation(
        &mut self,
        auth: &Credential,
        id: &str,
        req: UpdateAnimationRequest,
    ) -> FlipbookResult<AnimationResponse> {
        self.mutate(|s| s.update_animation(auth, id, req))
    }

    fn delete_animation(
        &mut self,
        auth: &Credential,
        id: &str,
    ) -> FlipbookResult<DeleteAnimationResponse> {
        self.mutate(|s| s.delete_animation(auth, id))
    }

    fn react(
        &mut self,
        auth: &Credential,
        id: &str,
        is_liked: bool,
    ) -> FlipbookResult<ReactResponse> {
        self.mutate(|s| s.react(auth, id, is_liked))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/file.rs"]
mod tests;
