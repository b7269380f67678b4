//! Reward tiers offered to backers of a campaign.

use fundify_core::types::{Amount, DbId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignReward {
    pub id: DbId,
    pub campaign_id: DbId,
    pub title: String,
    pub description: String,
    pub amount: Amount,
    /// Maximum number of claims; `None` means unlimited.
    #[serde(rename = "limit")]
    pub reward_limit: Option<i32>,
    pub claimed: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignReward {
    pub title: String,
    pub description: Option<String>,
    pub amount: Amount,
    pub reward_limit: Option<i32>,
}
