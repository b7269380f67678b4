//! Handlers for exclusive content: creator-side management and
//! subscriber-side browsing, likes and comments.
//!
//! Access to a single item is decided by
//! [`can_view_content`](fundify_core::access::can_view_content) using the
//! viewer's active subscription to the content's creator.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use fundify_core::access::{
    can_view_content, tier_grants_access, validate_tier, DEFAULT_TIER, TIER_FREE,
};
use fundify_core::error::CoreError;
use fundify_core::funding::parse_tags;
use fundify_core::roles::{ROLE_AUDIENCE, ROLE_CREATOR};
use fundify_core::types::DbId;
use fundify_core::uploads::{content_type_for_mime, CONTENT_MIME_TYPES, MAX_CONTENT_FILE_BYTES};
use fundify_core::validation::parse_form_bool;
use fundify_db::models::content::{
    ContentComment, ContentPreview, CreateContent, ExclusiveContent, UpdateContent,
};
use fundify_db::repositories::{ContentRepo, SubscriptionRepo};
use serde::{Deserialize, Serialize};

use super::ensure_creator_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAudience, RequireCreator};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;
use crate::upload::MultipartForm;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub message: String,
    pub content: ExclusiveContent,
}

/// JSON patch for content metadata. `tags` is the comma separated form
/// the upload form uses.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub access_tier: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscribedContent {
    pub content: Vec<ContentPreview>,
    pub subscribed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorContent {
    pub creator_page_name: String,
    pub content: Vec<ContentPreview>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: String,
    pub likes: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub message: String,
    pub comment: ContentComment,
}

// ---------------------------------------------------------------------------
// Creator handlers
// ---------------------------------------------------------------------------

/// POST /api/creator/content
///
/// Multipart form with a required `contentFile` part.
pub async fn create(
    State(state): State<AppState>,
    creator: RequireCreator,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ContentResponse>)> {
    let form = MultipartForm::collect(multipart).await?;
    let title = form.required("title", "Title")?;
    let description = form.required("description", "Description")?;

    let access_tier = form.text("accessTier").unwrap_or(DEFAULT_TIER).to_string();
    validate_tier(&access_tier).map_err(AppError::validation)?;

    let file = form
        .file("contentFile")
        .ok_or_else(|| AppError::validation("Content file is required"))?;
    file.validate(CONTENT_MIME_TYPES, MAX_CONTENT_FILE_BYTES)?;

    let page_name = creator.page_name().to_string();
    let destination = format!("creators/{page_name}/content");
    let (storage_key, file_url) = file.store(&state.storage, &destination).await?;

    let published = match form.text("published") {
        Some(raw) => parse_form_bool(Some(raw)),
        None => true,
    };
    let input = CreateContent {
        creator_id: creator.0.user_id,
        page_name,
        title,
        description,
        content_type: content_type_for_mime(&file.content_type).to_string(),
        file_url,
        storage_key: storage_key.clone(),
        file_size: file.data.len() as i64,
        published,
        access_tier,
        tags: form.text("tags").map(parse_tags).unwrap_or_default(),
    };

    let content = match ContentRepo::create(&state.pool, &input).await {
        Ok(content) => content,
        Err(e) => {
            if let Err(cleanup) = state.storage.delete(&storage_key).await {
                tracing::warn!(
                    error = %cleanup,
                    key = %storage_key,
                    "Failed to remove orphaned upload"
                );
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        content_id = content.id,
        creator_id = content.creator_id,
        access_tier = %content.access_tier,
        "Exclusive content created"
    );
    Ok((
        StatusCode::CREATED,
        Json(ContentResponse {
            message: "Exclusive content created successfully".into(),
            content,
        }),
    ))
}

/// GET /api/creator/content
pub async fn list_mine(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
) -> AppResult<Json<DataResponse<Vec<ExclusiveContent>>>> {
    let content = ContentRepo::list_by_creator(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: content }))
}

/// PUT /api/creator/content/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentRequest>,
) -> AppResult<Json<ContentResponse>> {
    let existing = find_content(&state, id).await?;
    ensure_content_owner(&existing, &user, "modify")?;

    if let Some(tier) = &input.access_tier {
        validate_tier(tier).map_err(AppError::validation)?;
    }
    let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let patch = UpdateContent {
        title: non_blank(input.title),
        description: non_blank(input.description),
        access_tier: input.access_tier,
        published: input.published,
        tags: input.tags.as_deref().map(parse_tags),
    };

    let content = ContentRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Content", id))?;

    Ok(Json(ContentResponse {
        message: "Content updated successfully".into(),
        content,
    }))
}

/// DELETE /api/creator/content/{id}
///
/// Removes the row and then the stored file.
pub async fn delete(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let content = find_content(&state, id).await?;
    ensure_content_owner(&content, &user, "delete")?;

    if !ContentRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Content", id));
    }
    if let Err(e) = state.storage.delete(&content.storage_key).await {
        tracing::warn!(error = %e, content_id = id, "Failed to remove content file");
    }

    tracing::info!(content_id = id, creator_id = user.user_id, "Exclusive content deleted");
    Ok(Json(MessageResponse::new("Content deleted successfully")))
}

// ---------------------------------------------------------------------------
// Audience handlers
// ---------------------------------------------------------------------------

/// GET /api/audience/content
///
/// Published content from every creator the caller actively subscribes
/// to, limited to what each subscription tier unlocks.
pub async fn list_subscribed(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
) -> AppResult<Json<SubscribedContent>> {
    let subscriptions = SubscriptionRepo::active_for_audience(&state.pool, user.user_id).await?;
    if subscriptions.is_empty() {
        return Ok(Json(SubscribedContent {
            content: Vec::new(),
            subscribed: false,
        }));
    }

    let tiers: HashMap<DbId, String> = subscriptions
        .into_iter()
        .map(|s| (s.creator_id, s.tier))
        .collect();
    let creator_ids: Vec<DbId> = tiers.keys().copied().collect();

    let content = ContentRepo::list_published_for_creators(&state.pool, &creator_ids)
        .await?
        .iter()
        .filter(|c| {
            tiers
                .get(&c.creator_id)
                .is_some_and(|tier| unlocked(tier, &c.access_tier))
        })
        .map(ContentPreview::from)
        .collect();

    Ok(Json(SubscribedContent {
        content,
        subscribed: true,
    }))
}

/// GET /api/audience/creator/{pageName}/content
pub async fn list_for_creator(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(page_name): Path<String>,
) -> AppResult<Json<CreatorContent>> {
    let creator = ensure_creator_exists(&state.pool, &page_name).await?;
    let subscription = SubscriptionRepo::find_active_pair(&state.pool, user.user_id, creator.id)
        .await?
        .ok_or_else(|| {
            CoreError::SubscriptionRequired(format!(
                "An active subscription to {} is required",
                creator.page_name
            ))
        })?;

    let content = ContentRepo::list_published_for_creators(&state.pool, &[creator.id])
        .await?
        .iter()
        .filter(|c| unlocked(&subscription.tier, &c.access_tier))
        .map(ContentPreview::from)
        .collect();

    Ok(Json(CreatorContent {
        creator_page_name: creator.page_name,
        content,
    }))
}

/// GET /api/audience/content/{id}
///
/// Returns the file URL and counts a view.
pub async fn get_for_viewer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ExclusiveContent>> {
    load_viewable(&state, &user, id).await?;
    let content = ContentRepo::increment_views(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Content", id))?;
    Ok(Json(content))
}

/// POST /api/audience/content/{id}/like
pub async fn like(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(id): Path<DbId>,
) -> AppResult<Json<LikeResponse>> {
    load_viewable(&state, &user, id).await?;
    let likes = ContentRepo::add_like(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Content", id))?;
    Ok(Json(LikeResponse {
        message: "Content liked".into(),
        likes,
    }))
}

/// POST /api/audience/content/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let text = input
        .text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("Comment text is required"))?;

    load_viewable(&state, &user, id).await?;
    let comment =
        ContentRepo::add_comment(&state.pool, id, user.user_id, &user.full_name(), &text).await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            message: "Comment added".into(),
            comment,
        }),
    ))
}

/// GET /api/audience/content/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ContentComment>>>> {
    load_viewable(&state, &user, id).await?;
    let comments = ContentRepo::list_comments(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comments }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unlocked(subscriber_tier: &str, content_tier: &str) -> bool {
    content_tier == TIER_FREE || tier_grants_access(subscriber_tier, content_tier)
}

async fn find_content(state: &AppState, id: DbId) -> AppResult<ExclusiveContent> {
    ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Content", id))
}

fn is_content_owner(content: &ExclusiveContent, user: &AuthUser) -> bool {
    user.role == ROLE_CREATOR && content.creator_id == user.user_id
}

fn ensure_content_owner(content: &ExclusiveContent, user: &AuthUser, verb: &str) -> AppResult<()> {
    if is_content_owner(content, user) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!("You can only {verb} your own content")))
    }
}

/// Load content the caller may open. Unpublished items are hidden from
/// everyone but their owner.
async fn load_viewable(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<ExclusiveContent> {
    let content = find_content(state, id).await?;
    let is_owner = is_content_owner(&content, user);
    if !content.published && !is_owner {
        return Err(AppError::not_found("Content", id));
    }

    let subscription = if user.role == ROLE_AUDIENCE {
        SubscriptionRepo::find_active_pair(&state.pool, user.user_id, content.creator_id).await?
    } else {
        None
    };

    let tier = subscription.as_ref().map(|s| s.tier.as_str());
    if !can_view_content(is_owner, &content.access_tier, tier) {
        let message = match tier {
            Some(tier) => format!(
                "Your {tier} subscription does not include {} content",
                content.access_tier
            ),
            None => format!("Subscribe to {} to view this content", content.page_name),
        };
        return Err(CoreError::SubscriptionRequired(message).into());
    }
    Ok(content)
}
