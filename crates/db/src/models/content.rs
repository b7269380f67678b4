//! Exclusive (subscriber-only) content model and DTOs.

use fundify_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `exclusive_content` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusiveContent {
    pub id: DbId,
    pub creator_id: DbId,
    pub page_name: String,
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub file_url: String,
    /// Key of the stored file under the upload root. Internal only.
    #[serde(skip_serializing)]
    pub storage_key: String,
    pub thumbnail_url: String,
    pub file_size: i64,
    pub published: bool,
    pub access_tier: String,
    pub tags: Vec<String>,
    pub views: i64,
    pub likes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing entry for subscribers. Omits the file URL, which is only handed
/// out by the single-item endpoint after an access check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPreview {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub creator_page_name: String,
    pub access_tier: String,
    pub thumbnail_url: String,
    pub created_at: Timestamp,
}

impl From<&ExclusiveContent> for ContentPreview {
    fn from(c: &ExclusiveContent) -> Self {
        Self {
            id: c.id,
            title: c.title.clone(),
            description: c.description.clone(),
            content_type: c.content_type.clone(),
            creator_page_name: c.page_name.clone(),
            access_tier: c.access_tier.clone(),
            thumbnail_url: c.thumbnail_url.clone(),
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContent {
    pub creator_id: DbId,
    pub page_name: String,
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub file_url: String,
    pub storage_key: String,
    pub file_size: i64,
    pub published: bool,
    pub access_tier: String,
    pub tags: Vec<String>,
}

/// Metadata patch; the stored file itself cannot be replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub access_tier: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// A row from `content_comments`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentComment {
    pub id: DbId,
    pub content_id: DbId,
    pub audience_id: DbId,
    pub audience_name: String,
    #[serde(rename = "text")]
    pub body: String,
    pub created_at: Timestamp,
}
