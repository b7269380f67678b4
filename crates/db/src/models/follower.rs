//! Creator/audience follow relationships.

use fundify_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `creator_followers`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorFollower {
    pub id: DbId,
    pub creator_id: DbId,
    pub audience_id: DbId,
    pub followed_at: Timestamp,
}

/// Follower joined with the audience member's public details, for the
/// creator dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerSummary {
    pub audience_id: DbId,
    pub email: String,
    pub name: String,
    pub profile_image: String,
    #[serde(rename = "date")]
    pub followed_at: Timestamp,
}
