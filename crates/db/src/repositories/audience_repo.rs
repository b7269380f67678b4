//! Repository for the `audiences` table.

use fundify_core::types::DbId;
use sqlx::PgPool;

use crate::models::audience::{Audience, CreateAudience};

const COLUMNS: &str = "id, first_name, last_name, email, password_hash, profile_image, bio, \
                       interests, is_verified, notify_email, notify_campaign_updates, \
                       notify_new_content, created_at, updated_at";

/// Provides account operations for audience members.
pub struct AudienceRepo;

impl AudienceRepo {
    /// Insert a new audience member. A taken email surfaces as a
    /// `uq_audiences_email` unique violation.
    pub async fn create(pool: &PgPool, input: &CreateAudience) -> Result<Audience, sqlx::Error> {
        let query = format!(
            "INSERT INTO audiences (first_name, last_name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Audience>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Audience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audiences WHERE id = $1");
        sqlx::query_as::<_, Audience>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Audience>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audiences WHERE email = $1");
        sqlx::query_as::<_, Audience>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update an audience member's password hash. Returns `true` if the row
    /// was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE audiences SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
