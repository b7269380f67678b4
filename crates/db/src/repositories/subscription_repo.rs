//! Repository for `subscriptions` and `subscription_history`.
//!
//! Every status change writes its history row in the same transaction.

use fundify_core::subscription::{
    period_note, ACTION_CANCELLED, ACTION_CREATED, ACTION_RENEWED, SUB_STATUS_ACTIVE,
    SUB_STATUS_CANCELLED,
};
use fundify_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::{
    CreateSubscription, RenewSubscription, Subscription, SubscriptionHistoryEntry,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, audience_id, audience_email, creator_id, creator_page_name, status, \
                       tier, start_date, end_date, payment_id, created_at, updated_at";

const HISTORY_COLUMNS: &str = "id, subscription_id, action, note, created_at";

const CANCEL_NOTE: &str = "Subscription cancelled by user";

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// The (audience, creator) subscription row in any status.
    pub async fn find_pair(
        pool: &PgPool,
        audience_id: DbId,
        creator_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions WHERE audience_id = $1 AND creator_id = $2"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(audience_id)
            .bind(creator_id)
            .fetch_optional(pool)
            .await
    }

    /// The pair's subscription only if it is active and not past its end date.
    pub async fn find_active_pair(
        pool: &PgPool,
        audience_id: DbId,
        creator_id: DbId,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE audience_id = $1 AND creator_id = $2
               AND status = $3 AND end_date >= NOW()"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(audience_id)
            .bind(creator_id)
            .bind(SUB_STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new subscription and its `created` history entry.
    ///
    /// A second row for the same pair fails with a
    /// `uq_subscriptions_audience_creator` unique violation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
        months: u32,
    ) -> Result<Subscription, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO subscriptions
                (audience_id, audience_email, creator_id, creator_page_name, status, tier,
                 start_date, end_date, payment_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(input.audience_id)
            .bind(&input.audience_email)
            .bind(input.creator_id)
            .bind(&input.creator_page_name)
            .bind(SUB_STATUS_ACTIVE)
            .bind(&input.tier)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.payment_id)
            .fetch_one(&mut *tx)
            .await?;

        Self::log(&mut tx, subscription.id, ACTION_CREATED, &period_note(ACTION_CREATED, months))
            .await?;

        tx.commit().await?;
        Ok(subscription)
    }

    /// Reactivate an existing subscription for a new period. A `None` tier
    /// keeps the current one.
    ///
    /// Returns `None` if no row with the given `id` exists or the row is
    /// still active, so two racing renewals cannot both succeed.
    pub async fn renew(
        pool: &PgPool,
        id: DbId,
        input: &RenewSubscription,
        months: u32,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE subscriptions SET
                status = $2,
                tier = COALESCE($3, tier),
                start_date = $4,
                end_date = $5,
                payment_id = COALESCE($6, payment_id)
             WHERE id = $1 AND NOT (status = $2 AND end_date >= NOW())
             RETURNING {COLUMNS}"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .bind(SUB_STATUS_ACTIVE)
            .bind(&input.tier)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.payment_id)
            .fetch_optional(&mut *tx)
            .await?;

        if subscription.is_some() {
            Self::log(&mut tx, id, ACTION_RENEWED, &period_note(ACTION_RENEWED, months)).await?;
        }

        tx.commit().await?;
        Ok(subscription)
    }

    /// Cancel a subscription that is not already cancelled.
    ///
    /// Returns `None` if the row does not exist or was already cancelled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Subscription>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE subscriptions SET status = $2
             WHERE id = $1 AND status <> $2
             RETURNING {COLUMNS}"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .bind(SUB_STATUS_CANCELLED)
            .fetch_optional(&mut *tx)
            .await?;

        if subscription.is_some() {
            Self::log(&mut tx, id, ACTION_CANCELLED, CANCEL_NOTE).await?;
        }

        tx.commit().await?;
        Ok(subscription)
    }

    /// All of an audience member's subscriptions, most recently started first.
    pub async fn list_for_audience(
        pool: &PgPool,
        audience_id: DbId,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE audience_id = $1
             ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(audience_id)
            .fetch_all(pool)
            .await
    }

    /// All subscribers of a creator, most recently started first.
    pub async fn list_for_creator(
        pool: &PgPool,
        creator_id: DbId,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE creator_id = $1
             ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(creator_id)
            .fetch_all(pool)
            .await
    }

    /// Subscriptions that currently grant access.
    pub async fn active_for_audience(
        pool: &PgPool,
        audience_id: DbId,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE audience_id = $1 AND status = $2 AND end_date >= NOW()
             ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(audience_id)
            .bind(SUB_STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// History log of one subscription, oldest first.
    pub async fn history(
        pool: &PgPool,
        subscription_id: DbId,
    ) -> Result<Vec<SubscriptionHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM subscription_history
             WHERE subscription_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, SubscriptionHistoryEntry>(&query)
            .bind(subscription_id)
            .fetch_all(pool)
            .await
    }

    async fn log(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        subscription_id: DbId,
        action: &str,
        note: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO subscription_history (subscription_id, action, note) VALUES ($1, $2, $3)",
        )
        .bind(subscription_id)
        .bind(action)
        .bind(note)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
