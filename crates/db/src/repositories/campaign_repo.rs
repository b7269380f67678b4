//! Repository for the `campaigns` table (campaigns and projects).

use fundify_core::campaign_status::{
    accepts_pledges, status_after_pledge, CONTRIBUTION_COMPLETED, KIND_CAMPAIGN, STATUS_ACTIVE,
    STATUS_COMPLETED,
};
use fundify_core::types::{Amount, DbId};
use sqlx::PgPool;

use crate::models::campaign::{
    BackedCampaign, Campaign, CampaignFilter, CampaignWithBackers, CreateCampaign,
    CreatorCampaignStats, DeleteOutcome, UpdateCampaign,
};
use crate::models::contribution::{Contribution, PledgeOutcome};
use crate::repositories::FollowerRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, creator_id, page_name, title, description, amount, \
                       raised_amount, category, status, target_date, launch_date, image_url, \
                       video_url, project_url, tags, created_at, updated_at";

const CONTRIBUTION_COLUMNS: &str = "id, campaign_id, audience_id, amount, status, created_at";

/// Distinct completed backers of the outer `campaigns` row.
const BACKER_COUNT: &str = "(SELECT COUNT(DISTINCT audience_id) FROM contributions \
                            WHERE campaign_id = campaigns.id AND status = 'completed') \
                            AS backer_count";

/// Provides CRUD, pledge and reporting operations for campaigns and projects.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign or project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns
                (kind, creator_id, page_name, title, description, amount, category, status,
                 target_date, launch_date, image_url, video_url, project_url, tags)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'Other'), $8, $9, $10,
                     COALESCE($11, ''), $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.kind)
            .bind(input.creator_id)
            .bind(&input.page_name)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.amount)
            .bind(&input.category)
            .bind(&input.status)
            .bind(input.target_date)
            .bind(input.launch_date)
            .bind(&input.image_url)
            .bind(&input.video_url)
            .bind(&input.project_url)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign of the given kind by id.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: &str,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 AND kind = $2");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(kind)
            .fetch_optional(pool)
            .await
    }

    /// All campaigns of one kind owned by a creator, newest first.
    pub async fn list_by_creator(
        pool: &PgPool,
        kind: &str,
        creator_id: DbId,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE creator_id = $1 AND kind = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(creator_id)
            .bind(kind)
            .fetch_all(pool)
            .await
    }

    /// Active campaigns (not projects) for the public listing, newest first.
    pub async fn list_public_active(
        pool: &PgPool,
    ) -> Result<Vec<CampaignWithBackers>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {BACKER_COUNT} FROM campaigns
             WHERE kind = $1 AND status = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CampaignWithBackers>(&query)
            .bind(KIND_CAMPAIGN)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// A creator's active campaigns with backer counts, for their public page.
    pub async fn list_active_for_creator(
        pool: &PgPool,
        creator_id: DbId,
    ) -> Result<Vec<CampaignWithBackers>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {BACKER_COUNT} FROM campaigns
             WHERE creator_id = $1 AND kind = $2 AND status = $3
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CampaignWithBackers>(&query)
            .bind(creator_id)
            .bind(KIND_CAMPAIGN)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// List with optional filters. `None` filters match everything.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &CampaignFilter,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE ($1::TEXT IS NULL OR kind = $1)
               AND ($2::TEXT IS NULL OR creator_id = (SELECT id FROM creators WHERE email = $2))
               AND ($3::TEXT IS NULL OR page_name = $3)
               AND ($4::TEXT IS NULL OR status = $4)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&filter.kind)
            .bind(&filter.creator_email)
            .bind(&filter.page_name)
            .bind(&filter.status)
            .fetch_all(pool)
            .await
    }

    /// Apply a whitelisted patch. Images are only replaced through uploads.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                amount = COALESCE($4, amount),
                category = COALESCE($5, category),
                target_date = COALESCE($6, target_date),
                video_url = COALESCE($7, video_url),
                tags = COALESCE($8, tags),
                status = COALESCE($9, status),
                launch_date = COALESCE($10, launch_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.amount)
            .bind(&input.category)
            .bind(input.target_date)
            .bind(&input.video_url)
            .bind(&input.tags)
            .bind(&input.status)
            .bind(input.launch_date)
            .fetch_optional(pool)
            .await
    }

    /// Move a draft to active and stamp the launch date.
    ///
    /// Returns `None` if the campaign does not exist or is not a draft.
    pub async fn launch(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET status = 'active', launch_date = NOW()
             WHERE id = $1 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a campaign or project that has no contributions.
    ///
    /// The row is locked before the ledger is counted, so a pledge either
    /// commits first and blocks the delete or waits and then finds no row.
    pub async fn delete_unfunded(
        pool: &PgPool,
        kind: &str,
        id: DbId,
    ) -> Result<DeleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM campaigns WHERE id = $1 AND kind = $2 FOR UPDATE")
                .bind(id)
                .bind(kind)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let contributions: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contributions WHERE campaign_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if contributions > 0 {
            return Ok(DeleteOutcome::HasContributions);
        }

        sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Record a pledge atomically.
    ///
    /// Locks the campaign row, checks that its status takes pledges, bumps
    /// `raised_amount`, completes a funded campaign and appends the ledger
    /// row, all in one transaction. Concurrent pledges serialize on the row
    /// lock so no increment is lost.
    pub async fn record_pledge(
        pool: &PgPool,
        kind: &str,
        campaign_id: DbId,
        audience_id: DbId,
        amount: Amount,
    ) -> Result<PledgeOutcome, sqlx::Error> {
        let (outcome, _) =
            Self::pledge_tx(pool, kind, campaign_id, audience_id, amount, false).await?;
        Ok(outcome)
    }

    /// [`record_pledge`](Self::record_pledge) that also makes the backer
    /// follow the campaign's creator in the same transaction.
    ///
    /// The flag is `true` when a new follow row was written.
    pub async fn record_pledge_and_follow(
        pool: &PgPool,
        kind: &str,
        campaign_id: DbId,
        audience_id: DbId,
        amount: Amount,
    ) -> Result<(PledgeOutcome, bool), sqlx::Error> {
        Self::pledge_tx(pool, kind, campaign_id, audience_id, amount, true).await
    }

    async fn pledge_tx(
        pool: &PgPool,
        kind: &str,
        campaign_id: DbId,
        audience_id: DbId,
        amount: Amount,
        follow_creator: bool,
    ) -> Result<(PledgeOutcome, bool), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query =
            format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 AND kind = $2 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Campaign>(&query)
            .bind(campaign_id)
            .bind(kind)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok((PledgeOutcome::NotFound, false));
        };

        if !accepts_pledges(&current.kind, &current.status) {
            return Ok((PledgeOutcome::NotAccepting(current), false));
        }

        let Some(raised) = current.raised_amount.checked_add(amount) else {
            return Ok((PledgeOutcome::TotalOverflow(current), false));
        };
        let next_status =
            status_after_pledge(&current.kind, &current.status, raised, current.amount);

        let query = format!(
            "UPDATE campaigns SET raised_amount = $2, status = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&query)
            .bind(campaign_id)
            .bind(raised)
            .bind(next_status)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO contributions (campaign_id, audience_id, amount, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {CONTRIBUTION_COLUMNS}"
        );
        let contribution = sqlx::query_as::<_, Contribution>(&query)
            .bind(campaign_id)
            .bind(audience_id)
            .bind(amount)
            .bind(CONTRIBUTION_COMPLETED)
            .fetch_one(&mut *tx)
            .await?;

        let now_following = if follow_creator {
            FollowerRepo::follow_in_tx(&mut tx, campaign.creator_id, audience_id).await?
        } else {
            false
        };

        tx.commit().await?;

        if campaign.status == STATUS_COMPLETED && current.status != STATUS_COMPLETED {
            tracing::info!(campaign_id, raised = campaign.raised_amount, "Campaign fully funded");
        }

        Ok((
            PledgeOutcome::Recorded {
                campaign,
                contribution,
            },
            now_following,
        ))
    }

    /// Re-derive `raised_amount` from the completed contributions.
    ///
    /// Returns the new total, or `None` if the campaign does not exist.
    pub async fn recalculate_raised(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Amount>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE campaigns SET raised_amount = COALESCE(
                (SELECT SUM(amount) FROM contributions
                 WHERE campaign_id = $1 AND status = 'completed'), 0)::BIGINT
             WHERE id = $1
             RETURNING raised_amount",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Campaigns and projects the audience member has pledged to, with their
    /// own completed total per campaign.
    pub async fn backed_by_audience(
        pool: &PgPool,
        audience_id: DbId,
    ) -> Result<Vec<BackedCampaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, t.contributed FROM campaigns
             JOIN (
                SELECT campaign_id, SUM(amount)::BIGINT AS contributed
                FROM contributions
                WHERE audience_id = $1 AND status = 'completed'
                GROUP BY campaign_id
             ) t ON t.campaign_id = campaigns.id
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, BackedCampaign>(&query)
            .bind(audience_id)
            .fetch_all(pool)
            .await
    }

    /// Active campaigns from followed creators that the audience member has
    /// not backed yet.
    pub async fn active_from_followed(
        pool: &PgPool,
        audience_id: DbId,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE kind = $2 AND status = $3
               AND creator_id IN (SELECT creator_id FROM creator_followers WHERE audience_id = $1)
               AND id NOT IN (SELECT campaign_id FROM contributions WHERE audience_id = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(audience_id)
            .bind(KIND_CAMPAIGN)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Totals across all of a creator's campaigns.
    pub async fn stats_for_creator(
        pool: &PgPool,
        creator_id: DbId,
    ) -> Result<CreatorCampaignStats, sqlx::Error> {
        sqlx::query_as::<_, CreatorCampaignStats>(
            "SELECT COALESCE(SUM(raised_amount), 0)::BIGINT AS total_raised,
                    COUNT(*) FILTER (WHERE status = 'active') AS active_campaigns,
                    COUNT(*) FILTER (WHERE status = 'completed') AS completed_campaigns
             FROM campaigns
             WHERE creator_id = $1 AND kind = $2",
        )
        .bind(creator_id)
        .bind(KIND_CAMPAIGN)
        .fetch_one(pool)
        .await
    }

    pub async fn recent_for_creator(
        pool: &PgPool,
        creator_id: DbId,
        limit: i64,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE creator_id = $1 AND kind = $2
             ORDER BY created_at DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(creator_id)
            .bind(KIND_CAMPAIGN)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
