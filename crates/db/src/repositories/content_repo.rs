//! Repository for `exclusive_content` and its comments.

use fundify_core::types::DbId;
use sqlx::PgPool;

use crate::models::content::{ContentComment, CreateContent, ExclusiveContent, UpdateContent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, creator_id, page_name, title, description, content_type, file_url, \
                       storage_key, thumbnail_url, file_size, published, access_tier, tags, \
                       views, likes, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, content_id, audience_id, audience_name, body, created_at";

/// Provides CRUD and engagement operations for exclusive content.
pub struct ContentRepo;

impl ContentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateContent,
    ) -> Result<ExclusiveContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO exclusive_content
                (creator_id, page_name, title, description, content_type, file_url,
                 storage_key, file_size, published, access_tier, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExclusiveContent>(&query)
            .bind(input.creator_id)
            .bind(&input.page_name)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content_type)
            .bind(&input.file_url)
            .bind(&input.storage_key)
            .bind(input.file_size)
            .bind(input.published)
            .bind(&input.access_tier)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ExclusiveContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exclusive_content WHERE id = $1");
        sqlx::query_as::<_, ExclusiveContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Everything a creator has uploaded, published or not, newest first.
    pub async fn list_by_creator(
        pool: &PgPool,
        creator_id: DbId,
    ) -> Result<Vec<ExclusiveContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM exclusive_content
             WHERE creator_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ExclusiveContent>(&query)
            .bind(creator_id)
            .fetch_all(pool)
            .await
    }

    /// Published content from any of the given creators, newest first.
    pub async fn list_published_for_creators(
        pool: &PgPool,
        creator_ids: &[DbId],
    ) -> Result<Vec<ExclusiveContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM exclusive_content
             WHERE creator_id = ANY($1) AND published = true
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ExclusiveContent>(&query)
            .bind(creator_ids)
            .fetch_all(pool)
            .await
    }

    /// Apply a metadata patch. Only non-`None` fields are written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContent,
    ) -> Result<Option<ExclusiveContent>, sqlx::Error> {
        let query = format!(
            "UPDATE exclusive_content SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                access_tier = COALESCE($4, access_tier),
                published = COALESCE($5, published),
                tags = COALESCE($6, tags)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExclusiveContent>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.access_tier)
            .bind(input.published)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete a content row (comments cascade). Returns `true` if removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM exclusive_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the view counter, returning the updated row.
    pub async fn increment_views(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ExclusiveContent>, sqlx::Error> {
        let query = format!(
            "UPDATE exclusive_content SET views = views + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExclusiveContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bump the like counter, returning the new count.
    pub async fn add_like(pool: &PgPool, id: DbId) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE exclusive_content SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn add_comment(
        pool: &PgPool,
        content_id: DbId,
        audience_id: DbId,
        audience_name: &str,
        body: &str,
    ) -> Result<ContentComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_comments (content_id, audience_id, audience_name, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, ContentComment>(&query)
            .bind(content_id)
            .bind(audience_id)
            .bind(audience_name)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Comments on a content item, oldest first.
    pub async fn list_comments(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Vec<ContentComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM content_comments
             WHERE content_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ContentComment>(&query)
            .bind(content_id)
            .fetch_all(pool)
            .await
    }
}
