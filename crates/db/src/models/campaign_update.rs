//! Creator-posted campaign updates.

use fundify_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignUpdate {
    pub id: DbId,
    pub campaign_id: DbId,
    pub title: String,
    pub content: String,
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignUpdate {
    pub title: String,
    pub content: String,
}
