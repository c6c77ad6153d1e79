//! Wire records exchanged with the storage collaborator.
//!
//! Field names follow the JSON contract: camelCase, with the record id under `_id`.

use chrono::{DateTime, Utc};

use crate::frames::store::{Frame, FrameData};

/// A stored animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owner uid.
    pub user_id: String,
    /// Non-empty title.
    pub title: String,
    /// Frames in playback order.
    pub frames: Vec<Frame>,
    /// Payload of the first non-empty frame.
    pub thumbnail: FrameData,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Whether the requesting user liked this animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    /// Number of likes.
    #[serde(default)]
    pub like_count: u64,
}

/// Body of a create call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnimationRequest {
    /// Title.
    pub title: String,
    /// Non-empty frames.
    pub frames: Vec<Frame>,
}

/// Body of an update call. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnimationRequest {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<Frame>>,
    /// New thumbnail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<FrameData>,
}

/// Response of the list calls.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAnimationsResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// Matching records.
    pub animations: Vec<Animation>,
    /// `animations.len()`.
    pub count: usize,
}

/// Response of create and update calls.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// The stored record.
    pub animation: Animation,
}

/// Response of a delete call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAnimationResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

/// Body of a react call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    /// Like (`true`) or unlike (`false`).
    pub is_liked: bool,
}

/// Response of a react call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Like state of the caller after the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    /// Like count after the call.
    pub like_count: u64,
}

#[cfg(test)]
#[path = "../../tests/unit/storage/model.rs"]
mod tests;
