//! Repository for the `campaign_updates` table.

use fundify_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign_update::{CampaignUpdate, CreateCampaignUpdate};

const COLUMNS: &str = "id, campaign_id, title, content, created_at";

pub struct CampaignUpdateRepo;

impl CampaignUpdateRepo {
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        input: &CreateCampaignUpdate,
    ) -> Result<CampaignUpdate, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_updates (campaign_id, title, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignUpdate>(&query)
            .bind(campaign_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Updates for a campaign, newest first.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignUpdate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_updates
             WHERE campaign_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CampaignUpdate>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }
}
