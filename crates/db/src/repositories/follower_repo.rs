//! Repository for the `creator_followers` join table.

use fundify_core::types::DbId;
use sqlx::PgPool;

use crate::models::follower::FollowerSummary;

const FOLLOW: &str = "INSERT INTO creator_followers (creator_id, audience_id)
                      VALUES ($1, $2)
                      ON CONFLICT ON CONSTRAINT uq_creator_followers_pair DO NOTHING";

pub struct FollowerRepo;

impl FollowerRepo {
    /// Follow a creator. Idempotent: returns `true` only when a new row was
    /// inserted.
    pub async fn follow(
        pool: &PgPool,
        creator_id: DbId,
        audience_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(FOLLOW)
            .bind(creator_id)
            .bind(audience_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// [`follow`](Self::follow) inside a caller's transaction.
    pub(crate) async fn follow_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        creator_id: DbId,
        audience_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(FOLLOW)
            .bind(creator_id)
            .bind(audience_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if a follow relationship was removed.
    pub async fn unfollow(
        pool: &PgPool,
        creator_id: DbId,
        audience_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM creator_followers WHERE creator_id = $1 AND audience_id = $2",
        )
        .bind(creator_id)
        .bind(audience_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_following(
        pool: &PgPool,
        creator_id: DbId,
        audience_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM creator_followers WHERE creator_id = $1 AND audience_id = $2
             )",
        )
        .bind(creator_id)
        .bind(audience_id)
        .fetch_one(pool)
        .await
    }

    pub async fn count_for_creator(pool: &PgPool, creator_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM creator_followers WHERE creator_id = $1")
            .bind(creator_id)
            .fetch_one(pool)
            .await
    }

    /// Most recent followers with their public details, newest first.
    pub async fn recent_for_creator(
        pool: &PgPool,
        creator_id: DbId,
        limit: i64,
    ) -> Result<Vec<FollowerSummary>, sqlx::Error> {
        sqlx::query_as::<_, FollowerSummary>(
            "SELECT a.id AS audience_id, a.email,
                    a.first_name || ' ' || a.last_name AS name,
                    a.profile_image, f.followed_at
             FROM creator_followers f
             JOIN audiences a ON a.id = f.audience_id
             WHERE f.creator_id = $1
             ORDER BY f.followed_at DESC
             LIMIT $2",
        )
        .bind(creator_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Page names of every creator the audience member follows.
    pub async fn followed_page_names(
        pool: &PgPool,
        audience_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT c.page_name
             FROM creator_followers f
             JOIN creators c ON c.id = f.creator_id
             WHERE f.audience_id = $1
             ORDER BY f.followed_at DESC",
        )
        .bind(audience_id)
        .fetch_all(pool)
        .await
    }
}
