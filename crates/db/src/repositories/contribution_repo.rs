//! Read-side queries over the `contributions` ledger.
//!
//! Rows are only ever written by [`CampaignRepo::record_pledge`](super::CampaignRepo::record_pledge).

use fundify_core::types::{Amount, DbId};
use sqlx::PgPool;

use crate::models::contribution::{ContributionWithBacker, FundingHistoryEntry};

pub struct ContributionRepo;

impl ContributionRepo {
    /// Every contribution to a campaign with the backer's name, newest first.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<ContributionWithBacker>, sqlx::Error> {
        sqlx::query_as::<_, ContributionWithBacker>(
            "SELECT co.id, co.audience_id,
                    a.first_name || ' ' || a.last_name AS backer_name,
                    a.email AS backer_email,
                    co.amount, co.status, co.created_at
             FROM contributions co
             JOIN audiences a ON a.id = co.audience_id
             WHERE co.campaign_id = $1
             ORDER BY co.created_at DESC, co.id DESC",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    /// An audience member's pledges across all campaigns, newest first.
    pub async fn history_for_audience(
        pool: &PgPool,
        audience_id: DbId,
    ) -> Result<Vec<FundingHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, FundingHistoryEntry>(
            "SELECT co.id, co.campaign_id, c.title AS campaign_title,
                    c.kind AS campaign_kind, c.page_name,
                    co.amount, co.status, co.created_at
             FROM contributions co
             JOIN campaigns c ON c.id = co.campaign_id
             WHERE co.audience_id = $1
             ORDER BY co.created_at DESC, co.id DESC",
        )
        .bind(audience_id)
        .fetch_all(pool)
        .await
    }

    /// Sum of an audience member's completed pledges to one campaign.
    pub async fn total_by_audience_for_campaign(
        pool: &PgPool,
        audience_id: DbId,
        campaign_id: DbId,
    ) -> Result<Amount, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM contributions
             WHERE audience_id = $1 AND campaign_id = $2 AND status = 'completed'",
        )
        .bind(audience_id)
        .bind(campaign_id)
        .fetch_one(pool)
        .await
    }

    /// Number of distinct audience members with a completed pledge.
    pub async fn backer_count(pool: &PgPool, campaign_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(DISTINCT audience_id) FROM contributions
             WHERE campaign_id = $1 AND status = 'completed'",
        )
        .bind(campaign_id)
        .fetch_one(pool)
        .await
    }
}
