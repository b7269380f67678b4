//! Repository for the `creators` table.

use fundify_core::types::DbId;
use sqlx::PgPool;

use crate::models::creator::{CreateCreator, Creator, UpdateCreatorProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, password_hash, page_name, bio, \
                       profile_image, cover_image, category, website, twitter, instagram, \
                       facebook, youtube, bank_account_name, bank_account_number, bank_name, \
                       bank_routing_number, is_verified, notify_email, notify_new_follower, \
                       notify_new_contribution, created_at, updated_at";

/// Provides CRUD operations for creator accounts.
pub struct CreatorRepo;

impl CreatorRepo {
    /// Insert a new creator, returning the created row.
    ///
    /// Fails with a `uq_creators_email` or `uq_creators_page_name` unique
    /// violation when either is taken.
    pub async fn create(pool: &PgPool, input: &CreateCreator) -> Result<Creator, sqlx::Error> {
        let query = format!(
            "INSERT INTO creators
                (first_name, last_name, email, password_hash, page_name, category, bio)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'Other'), COALESCE($7, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Creator>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.page_name)
            .bind(&input.category)
            .bind(&input.bio)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Creator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM creators WHERE id = $1");
        sqlx::query_as::<_, Creator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a creator by email. Callers pass the normalized (lowercase) form.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Creator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM creators WHERE email = $1");
        sqlx::query_as::<_, Creator>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a creator by page name (case-sensitive).
    pub async fn find_by_page_name(
        pool: &PgPool,
        page_name: &str,
    ) -> Result<Option<Creator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM creators WHERE page_name = $1");
        sqlx::query_as::<_, Creator>(&query)
            .bind(page_name)
            .fetch_optional(pool)
            .await
    }

    /// List all creators ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Creator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM creators ORDER BY created_at DESC");
        sqlx::query_as::<_, Creator>(&query).fetch_all(pool).await
    }

    /// Apply a profile patch. Only non-`None` fields are written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCreatorProfile,
    ) -> Result<Option<Creator>, sqlx::Error> {
        let query = format!(
            "UPDATE creators SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                bio = COALESCE($4, bio),
                category = COALESCE($5, category),
                website = COALESCE($6, website),
                twitter = COALESCE($7, twitter),
                instagram = COALESCE($8, instagram),
                facebook = COALESCE($9, facebook),
                youtube = COALESCE($10, youtube),
                bank_account_name = COALESCE($11, bank_account_name),
                bank_account_number = COALESCE($12, bank_account_number),
                bank_name = COALESCE($13, bank_name),
                bank_routing_number = COALESCE($14, bank_routing_number),
                profile_image = COALESCE($15, profile_image),
                cover_image = COALESCE($16, cover_image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Creator>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.bio)
            .bind(&input.category)
            .bind(&input.website)
            .bind(&input.twitter)
            .bind(&input.instagram)
            .bind(&input.facebook)
            .bind(&input.youtube)
            .bind(&input.bank_account_name)
            .bind(&input.bank_account_number)
            .bind(&input.bank_name)
            .bind(&input.bank_routing_number)
            .bind(&input.profile_image)
            .bind(&input.cover_image)
            .fetch_optional(pool)
            .await
    }

    /// Update a creator's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE creators SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
