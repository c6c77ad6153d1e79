use chrono::{DateTime, Utc};

use crate::editor::session::Editor;
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::storage::auth::IdentitySession;
use crate::storage::model::{Animation, CreateAnimationRequest, UpdateAnimationRequest};
use crate::storage::store::AnimationStore;

/// Save the editor's animation: create it on first save, update it afterwards.
///
/// Local validation runs first, so an animation without content never reaches the store.
/// Store failures are logged and returned; the editor keeps its state and no retry happens.
#[tracing::instrument(skip_all)]
pub fn publish<S: AnimationStore + ?Sized>(
    editor: &mut Editor,
    store: &mut S,
    session: &IdentitySession,
    now: DateTime<Utc>,
) -> FlipbookResult<Animation> {
    let submission = editor.prepare_submission()?;
    let auth = session.bearer(now)?;

    let result = match editor.animation_id() {
        Some(id) => store.update_animation(
            auth,
            id,
            UpdateAnimationRequest {
                title: Some(submission.title),
                frames: Some(submission.frames),
                thumbnail: Some(submission.thumbnail),
            },
        ),
        None => store.create_animation(
            auth,
            CreateAnimationRequest {
                title: submission.title,
                frames: submission.frames,
            },
        ),
    };

    let response = result
        .and_then(|res| {
            if res.success {
                Ok(res)
            } else {
                Err(FlipbookError::remote("store reported an unsuccessful save"))
            }
        })
        .inspect_err(|e| tracing::warn!(error = %e, "saving animation failed"))?;

    editor.set_animation_id(response.animation.id.clone());
    Ok(response.animation)
}
