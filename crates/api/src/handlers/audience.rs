//! Handlers for the audience dashboard: backed and followed campaigns,
//! backing, funding history, and following creators.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use fundify_core::campaign_status::{is_publicly_viewable, KIND_CAMPAIGN};
use fundify_core::types::{Amount, DbId};
use fundify_db::models::campaign::{BackedCampaign, Campaign};
use fundify_db::models::contribution::FundingHistoryEntry;
use fundify_db::repositories::{CampaignRepo, ContributionRepo, FollowerRepo};
use serde::{Deserialize, Serialize};

use super::campaigns::{
    load_detail, pledge_and_follow, CampaignDetail, FundedCampaign, PledgeSummary,
};
use super::{ensure_campaign_exists, ensure_creator_exists};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAudience;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceCampaigns {
    pub backed_campaigns: Vec<FundedCampaign<BackedCampaign>>,
    /// Active campaigns from followed creators that the caller has not backed.
    pub followed_campaigns: Vec<FundedCampaign<Campaign>>,
}

/// Campaign page as seen by a backer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceCampaignDetail {
    #[serde(flatten)]
    pub detail: CampaignDetail,
    pub has_backed: bool,
    /// The caller's total pledged to this campaign.
    pub contribution: Amount,
}

#[derive(Debug, Serialize)]
pub struct AudienceCampaignResponse {
    pub campaign: AudienceCampaignDetail,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackCampaignRequest {
    pub campaign_id: Option<DbId>,
    pub amount: Option<Amount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackCampaignResponse {
    pub message: String,
    pub campaign: PledgeSummary,
    /// Whether this pledge started a follow of the campaign's creator.
    pub now_following: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub message: String,
    pub page_name: String,
    pub following: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/audience/campaigns
pub async fn campaigns(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
) -> AppResult<Json<AudienceCampaigns>> {
    let now = Utc::now();
    let backed = CampaignRepo::backed_by_audience(&state.pool, user.user_id).await?;
    let followed = CampaignRepo::active_from_followed(&state.pool, user.user_id).await?;

    Ok(Json(AudienceCampaigns {
        backed_campaigns: backed
            .into_iter()
            .map(|c| FundedCampaign::new(c, now))
            .collect(),
        followed_campaigns: followed
            .into_iter()
            .map(|c| FundedCampaign::new(c, now))
            .collect(),
    }))
}

/// GET /api/audience/campaign/{id}
///
/// Backers keep access to a campaign after it leaves the public listing.
pub async fn campaign_detail(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(id): Path<DbId>,
) -> AppResult<Json<AudienceCampaignResponse>> {
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    let contribution =
        ContributionRepo::total_by_audience_for_campaign(&state.pool, user.user_id, id).await?;
    let has_backed = contribution > 0;

    if !has_backed && !is_publicly_viewable(&campaign.status) {
        return Err(AppError::forbidden("Campaign not available"));
    }

    let detail = load_detail(&state, campaign, false).await?;
    Ok(Json(AudienceCampaignResponse {
        campaign: AudienceCampaignDetail {
            detail,
            has_backed,
            contribution,
        },
    }))
}

/// POST /api/audience/back-campaign
///
/// Pledge to a campaign and follow its creator, in one transaction.
pub async fn back_campaign(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Json(input): Json<BackCampaignRequest>,
) -> AppResult<Json<BackCampaignResponse>> {
    let campaign_id = input
        .campaign_id
        .ok_or_else(|| AppError::validation("Campaign ID and a positive amount are required"))?;

    let (campaign, summary, now_following) =
        pledge_and_follow(&state, KIND_CAMPAIGN, campaign_id, user.user_id, input.amount).await?;
    if now_following {
        tracing::info!(
            audience_id = user.user_id,
            creator_id = campaign.creator_id,
            "Backer now follows creator"
        );
    }

    Ok(Json(BackCampaignResponse {
        message: "Successfully backed the campaign".into(),
        campaign: summary,
        now_following,
    }))
}

/// GET /api/audience/funding-history
///
/// Every pledge the caller made, newest first.
pub async fn funding_history(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
) -> AppResult<Json<DataResponse<Vec<FundingHistoryEntry>>>> {
    let history = ContributionRepo::history_for_audience(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// POST /api/audience/follow/{pageName}
///
/// Following twice is not an error.
pub async fn follow(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(page_name): Path<String>,
) -> AppResult<Json<FollowResponse>> {
    let creator = ensure_creator_exists(&state.pool, &page_name).await?;
    let created = FollowerRepo::follow(&state.pool, creator.id, user.user_id).await?;
    if created {
        tracing::info!(
            audience_id = user.user_id,
            page_name = %creator.page_name,
            "Followed creator"
        );
    }

    Ok(Json(FollowResponse {
        message: format!("You are now following {}", creator.page_name),
        page_name: creator.page_name,
        following: true,
    }))
}

/// DELETE /api/audience/follow/{pageName}
pub async fn unfollow(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(page_name): Path<String>,
) -> AppResult<Json<FollowResponse>> {
    let creator = ensure_creator_exists(&state.pool, &page_name).await?;
    if !FollowerRepo::unfollow(&state.pool, creator.id, user.user_id).await? {
        return Err(AppError::validation(format!(
            "You are not following {}",
            creator.page_name
        )));
    }

    Ok(Json(FollowResponse {
        message: format!("You have unfollowed {}", creator.page_name),
        page_name: creator.page_name,
        following: false,
    }))
}

/// GET /api/audience/following
///
/// Page names of every creator the caller follows.
pub async fn following(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let page_names = FollowerRepo::followed_page_names(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: page_names }))
}
