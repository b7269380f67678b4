//! Handlers for creator profiles, the creator dashboard, and public creator
//! pages.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::Utc;
use fundify_core::uploads::{IMAGE_MIME_TYPES, MAX_PROFILE_IMAGE_BYTES};
use fundify_db::models::campaign::{Campaign, CampaignWithBackers};
use fundify_db::models::creator::{Creator, CreatorProfile, PublicCreator, UpdateCreatorProfile};
use fundify_db::models::follower::FollowerSummary;
use fundify_db::repositories::{CampaignRepo, CreatorRepo, FollowerRepo};
use serde::Serialize;

use super::campaigns::FundedCampaign;
use super::ensure_creator_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCreator;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{MultipartForm, UploadedFile};

/// How many campaigns and followers the dashboard shows.
const DASHBOARD_RECENT_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: String,
    pub creator: CreatorProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_raised: i64,
    pub follower_count: i64,
    pub active_campaigns: i64,
    pub completed_campaigns: i64,
    pub recent_campaigns: Vec<FundedCampaign<Campaign>>,
    pub recent_followers: Vec<FollowerSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCreatorCard {
    #[serde(flatten)]
    pub creator: PublicCreator,
    pub name: String,
    pub follower_count: i64,
}

#[derive(Debug, Serialize)]
pub struct PublicCreatorPage {
    pub creator: PublicCreatorCard,
    pub campaigns: Vec<FundedCampaign<CampaignWithBackers>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/creators
///
/// Public list; no passwords or bank details.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PublicCreator>>>> {
    let creators = CreatorRepo::list(&state.pool)
        .await?
        .iter()
        .map(Creator::to_public)
        .collect();
    Ok(Json(DataResponse { data: creators }))
}

/// GET /api/creator/profile
pub async fn get_profile(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
) -> AppResult<Json<CreatorProfile>> {
    let creator = load_self(&state, user.user_id).await?;
    Ok(Json(creator.to_profile()))
}

/// PUT /api/creator/profile
///
/// Multipart form. Blank fields keep their current value; `profileImage`
/// and `coverImage` replace the stored images.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    multipart: Multipart,
) -> AppResult<Json<ProfileUpdatedResponse>> {
    let form = MultipartForm::collect(multipart).await?;
    let current = load_self(&state, user.user_id).await?;

    let profile_image = store_image(&state, &current, form.file("profileImage"), "profile").await?;
    let cover_image = store_image(&state, &current, form.file("coverImage"), "cover").await?;

    let text = |name: &str| form.text(name).map(str::to_string);
    let patch = UpdateCreatorProfile {
        first_name: text("firstName"),
        last_name: text("lastName"),
        bio: text("bio"),
        category: text("category"),
        website: text("website"),
        twitter: text("twitter"),
        instagram: text("instagram"),
        facebook: text("facebook"),
        youtube: text("youtube"),
        bank_account_name: text("accountName"),
        bank_account_number: text("accountNumber"),
        bank_name: text("bankName"),
        bank_routing_number: text("routingNumber"),
        profile_image: profile_image.clone(),
        cover_image: cover_image.clone(),
    };

    let updated = CreatorRepo::update_profile(&state.pool, user.user_id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Creator", user.user_id))?;

    // Old images are only dropped once the new URLs are saved.
    if profile_image.is_some() {
        remove_stored(&state, &current.profile_image).await;
    }
    if cover_image.is_some() {
        remove_stored(&state, &current.cover_image).await;
    }

    tracing::info!(creator_id = updated.id, "Creator profile updated");
    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully".into(),
        creator: updated.to_profile(),
    }))
}

/// GET /api/creator/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
) -> AppResult<Json<DashboardResponse>> {
    let pool = &state.pool;
    let stats = CampaignRepo::stats_for_creator(pool, user.user_id).await?;
    let follower_count = FollowerRepo::count_for_creator(pool, user.user_id).await?;

    let now = Utc::now();
    let recent_campaigns =
        CampaignRepo::recent_for_creator(pool, user.user_id, DASHBOARD_RECENT_LIMIT)
            .await?
            .into_iter()
            .map(|c| FundedCampaign::new(c, now))
            .collect();
    let recent_followers =
        FollowerRepo::recent_for_creator(pool, user.user_id, DASHBOARD_RECENT_LIMIT).await?;

    Ok(Json(DashboardResponse {
        total_raised: stats.total_raised,
        follower_count,
        active_campaigns: stats.active_campaigns,
        completed_campaigns: stats.completed_campaigns,
        recent_campaigns,
        recent_followers,
    }))
}

/// GET /api/creator/{pageName}
///
/// Public profile plus the creator's active campaigns.
pub async fn public_page(
    State(state): State<AppState>,
    Path(page_name): Path<String>,
) -> AppResult<Json<PublicCreatorPage>> {
    let creator = ensure_creator_exists(&state.pool, &page_name).await?;
    let follower_count = FollowerRepo::count_for_creator(&state.pool, creator.id).await?;

    let now = Utc::now();
    let campaigns = CampaignRepo::list_active_for_creator(&state.pool, creator.id)
        .await?
        .into_iter()
        .map(|c| FundedCampaign::new(c, now))
        .collect();

    Ok(Json(PublicCreatorPage {
        creator: PublicCreatorCard {
            name: creator.full_name(),
            creator: creator.to_public(),
            follower_count,
        },
        campaigns,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_self(state: &AppState, id: fundify_core::types::DbId) -> AppResult<Creator> {
    CreatorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Creator", id))
}

/// Validate and store a profile or cover image, returning its URL.
async fn store_image(
    state: &AppState,
    creator: &Creator,
    file: Option<&UploadedFile>,
    slot: &str,
) -> AppResult<Option<String>> {
    let Some(file) = file else {
        return Ok(None);
    };
    file.validate(IMAGE_MIME_TYPES, MAX_PROFILE_IMAGE_BYTES)?;
    let destination = format!("creators/{}/{slot}", creator.page_name);
    let (_, url) = file.store(&state.storage, &destination).await?;
    Ok(Some(url))
}

async fn remove_stored(state: &AppState, url: &str) {
    if let Some(key) = state.storage.key_for_url(url) {
        if let Err(e) = state.storage.delete(key).await {
            tracing::warn!(error = %e, key, "Failed to remove replaced image");
        }
    }
}
