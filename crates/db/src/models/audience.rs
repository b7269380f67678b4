//! Audience (backer) account model and DTOs.

use fundify_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full audience row from the `audiences` table. Contains the password
/// hash, so it is not `Serialize`.
#[derive(Debug, Clone, FromRow)]
pub struct Audience {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub is_verified: bool,
    pub notify_email: bool,
    pub notify_campaign_updates: bool,
    pub notify_new_content: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe audience representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceResponse {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub created_at: Timestamp,
}

impl Audience {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&Audience> for AudienceResponse {
    fn from(a: &Audience) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            email: a.email.clone(),
            profile_image: a.profile_image.clone(),
            bio: a.bio.clone(),
            interests: a.interests.clone(),
            created_at: a.created_at,
        }
    }
}

/// DTO for registering an audience member. The email must already be
/// normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAudience {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}
