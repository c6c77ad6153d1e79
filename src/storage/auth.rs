use chrono::{DateTime, Utc};

use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Signed-in user profile.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user id.
    pub uid: String,
    /// Name shown next to the user's animations.
    pub display_name: String,
    /// Email, when the provider shares it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Bearer credential minted by the identity collaborator.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Opaque bearer token.
    pub token: String,
    /// Uid the token was issued to.
    pub uid: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Return `true` once `now` has reached the expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Current identity state as seen by the editor.
///
/// Credentials are never refreshed here; an expired one makes every storage call fail.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentitySession {
    current_user: Option<User>,
    credential: Option<Credential>,
}

impl IdentitySession {
    /// Nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in session.
    pub fn signed_in(user: User, credential: Credential) -> Self {
        Self {
            current_user: Some(user),
            credential: Some(credential),
        }
    }

    /// The signed-in user.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Forget the user and the credential.
    pub fn sign_out(&mut self) {
        self.current_user = None;
        self.credential = None;
    }

    /// A usable bearer credential at `now`.
    pub fn bearer(&self, now: DateTime<Utc>) -> FlipbookResult<&Credential> {
        let Some(credential) = self.credential.as_ref() else {
            return Err(FlipbookError::unauthorized("not signed in"));
        };
        if credential.is_expired(now) {
            return Err(FlipbookError::unauthorized("credential expired"));
        }
        Ok(credential)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/auth.rs"]
mod tests;
