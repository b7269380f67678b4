//! Campaign and project model and DTOs.
//!
//! Campaigns and projects live in one table; `kind` separates them.

use fundify_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: DbId,
    pub kind: String,
    pub creator_id: DbId,
    pub page_name: String,
    pub title: String,
    pub description: String,
    /// Funding goal in whole currency units.
    pub amount: Amount,
    pub raised_amount: Amount,
    pub category: String,
    pub status: String,
    pub target_date: Option<Timestamp>,
    pub launch_date: Option<Timestamp>,
    pub image_url: String,
    pub video_url: Option<String>,
    pub project_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A campaign plus the number of distinct backers.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignWithBackers {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub campaign: Campaign,
    pub backer_count: i64,
}

/// A campaign the audience member has backed, with their running total.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackedCampaign {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub campaign: Campaign,
    pub contributed: Amount,
}

/// Aggregates shown on the creator dashboard.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorCampaignStats {
    pub total_raised: Amount,
    pub active_campaigns: i64,
    pub completed_campaigns: i64,
}

/// DTO for inserting a campaign or project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub kind: String,
    pub creator_id: DbId,
    pub page_name: String,
    pub title: String,
    pub description: String,
    pub amount: Amount,
    /// Defaults to `Other` if omitted.
    pub category: Option<String>,
    pub status: String,
    pub target_date: Option<Timestamp>,
    pub launch_date: Option<Timestamp>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub project_url: Option<String>,
    pub tags: Vec<String>,
}

/// Whitelisted fields a creator may change. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCampaign {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Amount>,
    pub category: Option<String>,
    pub target_date: Option<Timestamp>,
    pub video_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    /// Set by the caller when the status change launches a draft.
    pub launch_date: Option<Timestamp>,
}

/// What happened to a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// Ledger rows exist, so the campaign must be cancelled instead.
    HasContributions,
}

/// Optional filters for project listings.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    pub kind: Option<String>,
    pub creator_email: Option<String>,
    pub page_name: Option<String>,
    pub status: Option<String>,
}
