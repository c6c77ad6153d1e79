use crate::foundation::error::FlipbookResult;
use crate::storage::auth::Credential;
use crate::storage::model::{
    AnimationResponse, CreateAnimationRequest, DeleteAnimationResponse, ListAnimationsResponse,
    ReactResponse, UpdateAnimationRequest,
};

/// The storage collaborator's contract.
///
/// Every call carries the bearer credential. Implementations report a missing, expired or
/// foreign credential as [`crate::FlipbookError::Unauthorized`] and any other failure as
/// [`crate::FlipbookError::Remote`].
pub trait AnimationStore {
    /// The caller's own animations, newest first.
    fn list_animations(&mut self, auth: &Credential) -> FlipbookResult<ListAnimationsResponse>;

    /// The most-liked animations across all users.
    fn list_top_liked(&mut self, auth: &Credential) -> FlipbookResult<ListAnimationsResponse>;

    /// Store a new animation owned by the caller.
    fn create_animation(
        &mut self,
        auth: &Credential,
        req: CreateAnimationRequest,
    ) -> FlipbookResult<AnimationResponse>;

    /// Update an animation owned by the caller.
    fn update_animation(
        &mut self,
        auth: &Credential,
        id: &str,
        req: UpdateAnimationRequest,
    ) -> FlipbookResult<AnimationResponse>;

    /// Delete an animation owned by the caller.
    fn delete_animation(
        &mut self,
        auth: &Credential,
        id: &str,
    ) -> FlipbookResult<DeleteAnimationResponse>;

    /// Like or unlike an animation.
    fn react(&mut self, auth: &Credential, id: &str, is_liked: bool)
    -> FlipbookResult<ReactResponse>;
}
