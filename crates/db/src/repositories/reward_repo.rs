//! Repository for the `campaign_rewards` table.

use fundify_core::types::DbId;
use sqlx::PgPool;

use crate::models::reward::{CampaignReward, CreateCampaignReward};

const COLUMNS: &str = "id, campaign_id, title, description, amount, reward_limit, claimed";

pub struct RewardRepo;

impl RewardRepo {
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        input: &CreateCampaignReward,
    ) -> Result<CampaignReward, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_rewards (campaign_id, title, description, amount, reward_limit)
             VALUES ($1, $2, COALESCE($3, ''), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignReward>(&query)
            .bind(campaign_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.reward_limit)
            .fetch_one(pool)
            .await
    }

    /// Rewards for a campaign, cheapest first.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignReward>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_rewards
             WHERE campaign_id = $1
             ORDER BY amount ASC, id ASC"
        );
        sqlx::query_as::<_, CampaignReward>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }
}
