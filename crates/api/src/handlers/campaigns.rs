//! Handlers for creator campaigns, their updates and rewards, pledges, and
//! the public campaign pages.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use fundify_core::campaign_status::{
    can_edit, can_launch, initial_status, is_launch_transition, is_publicly_viewable,
    pledge_rejection_reason, validate_status, KIND_CAMPAIGN, STATUS_ACTIVE,
};
use fundify_core::funding::{
    days_left, funding_percentage, parse_tags, slugify, validate_goal, validate_pledge_amount,
};
use fundify_core::types::{Amount, DbId, Timestamp};
use fundify_core::uploads::{IMAGE_MIME_TYPES, MAX_CAMPAIGN_IMAGE_BYTES};
use fundify_core::validation::parse_form_bool;
use fundify_db::models::campaign::{
    BackedCampaign, Campaign, CampaignWithBackers, CreateCampaign, DeleteOutcome, UpdateCampaign,
};
use fundify_db::models::campaign_update::{CampaignUpdate, CreateCampaignUpdate};
use fundify_db::models::contribution::{ContributionWithBacker, PledgeOutcome};
use fundify_db::models::creator::Creator;
use fundify_db::models::reward::{CampaignReward, CreateCampaignReward};
use fundify_db::repositories::{
    CampaignRepo, CampaignUpdateRepo, ContributionRepo, CreatorRepo, RewardRepo,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    ensure_campaign_exists, ensure_campaign_owner, entity_name, is_campaign_owner, parse_amount,
    parse_date,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAudience, RequireCreator};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;
use crate::upload::MultipartForm;
use crate::validation::validate_request;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Patch body for `PUT /campaigns/{id}`. Unknown fields, `imageUrl`
/// included, are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Amount>,
    pub category: Option<String>,
    pub target_date: Option<String>,
    pub video_url: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Body for pledge endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PledgeRequest {
    pub amount: Option<Amount>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUpdateRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateRewardRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Reward amount must be positive"))]
    pub amount: Amount,
    #[validate(range(min = 1, message = "Reward limit must be at least 1"))]
    pub limit: Option<i32>,
}

/// Short form of a campaign returned by create and launch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub launch_date: Option<Timestamp>,
}

impl From<&Campaign> for CampaignSummary {
    fn from(c: &Campaign) -> Self {
        Self {
            id: c.id,
            title: c.title.clone(),
            status: c.status.clone(),
            launch_date: c.launch_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CampaignMutationResponse<T: Serialize> {
    pub message: String,
    pub campaign: T,
}

/// Anything that wraps a campaign row.
pub trait AsCampaign {
    fn base(&self) -> &Campaign;
}

impl AsCampaign for Campaign {
    fn base(&self) -> &Campaign {
        self
    }
}

impl AsCampaign for CampaignWithBackers {
    fn base(&self) -> &Campaign {
        &self.campaign
    }
}

impl AsCampaign for BackedCampaign {
    fn base(&self) -> &Campaign {
        &self.campaign
    }
}

/// A campaign with its derived funding figures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundedCampaign<T: Serialize> {
    #[serde(flatten)]
    pub campaign: T,
    pub funding_percentage: f64,
    pub days_left: Option<i64>,
}

impl<T: Serialize + AsCampaign> FundedCampaign<T> {
    pub fn new(campaign: T, now: Timestamp) -> Self {
        let base = campaign.base();
        let funding_percentage = funding_percentage(base.raised_amount, base.amount);
        let days_left = days_left(base.target_date, now);
        Self {
            campaign,
            funding_percentage,
            days_left,
        }
    }
}

/// Creator card embedded in campaign detail pages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSummary {
    pub name: String,
    pub profile_image: String,
    pub page_name: String,
    pub bio: String,
    pub is_verified: bool,
}

impl From<&Creator> for CreatorSummary {
    fn from(c: &Creator) -> Self {
        Self {
            name: c.full_name(),
            profile_image: c.profile_image.clone(),
            page_name: c.page_name.clone(),
            bio: c.bio.clone(),
            is_verified: c.is_verified,
        }
    }
}

/// Full campaign page. Contributions are only included for the owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetail {
    #[serde(flatten)]
    pub campaign: FundedCampaign<Campaign>,
    pub backer_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributions: Option<Vec<ContributionWithBacker>>,
    pub rewards: Vec<CampaignReward>,
    pub updates: Vec<CampaignUpdate>,
    pub creator: Option<CreatorSummary>,
}

/// Result of a successful pledge.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeSummary {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub raised_amount: Amount,
    pub funding_percentage: f64,
    pub contribution: Amount,
}

#[derive(Debug, Serialize)]
pub struct UpdateCreatedResponse {
    pub message: String,
    pub update: CampaignUpdate,
}

#[derive(Debug, Serialize)]
pub struct RewardCreatedResponse {
    pub message: String,
    pub reward: CampaignReward,
}

// ---------------------------------------------------------------------------
// Shared by campaigns and projects
// ---------------------------------------------------------------------------

/// Build and insert a campaign or project from a multipart form. The
/// optional image arrives in `image_field`.
pub(crate) async fn create_from_form(
    state: &AppState,
    creator: &RequireCreator,
    kind: &str,
    form: &MultipartForm,
    image_field: &str,
) -> AppResult<Campaign> {
    let title = form.required("title", "Title")?;
    let description = form.required("description", "Description")?;
    let amount = parse_amount("Amount", &form.required("amount", "Amount")?)?;
    validate_goal(amount).map_err(AppError::validation)?;

    let category = if kind == KIND_CAMPAIGN {
        Some(form.required("category", "Category")?)
    } else {
        form.text("category").map(str::to_string)
    };
    let target_date = form
        .text("targetDate")
        .map(|raw| parse_date("Target date", raw))
        .transpose()?;

    let status = initial_status(parse_form_bool(form.text("launchImmediately")));
    let launch_date = (status == STATUS_ACTIVE).then(Utc::now);

    let mut stored_key = None;
    let image_url = match form.file(image_field) {
        Some(image) => {
            image.validate(IMAGE_MIME_TYPES, MAX_CAMPAIGN_IMAGE_BYTES)?;
            let destination = format!(
                "creators/{}/{}s/{}",
                creator.page_name(),
                kind,
                slugify(&title)
            );
            let (key, url) = image.store(&state.storage, &destination).await?;
            stored_key = Some(key);
            Some(url)
        }
        None => None,
    };

    let input = CreateCampaign {
        kind: kind.to_string(),
        creator_id: creator.0.user_id,
        page_name: creator.page_name().to_string(),
        title,
        description,
        amount,
        category,
        status: status.to_string(),
        target_date,
        launch_date,
        image_url,
        video_url: form.text("videoUrl").map(str::to_string),
        project_url: form.text("projectUrl").map(str::to_string),
        tags: form.text("tags").map(parse_tags).unwrap_or_default(),
    };

    match CampaignRepo::create(&state.pool, &input).await {
        Ok(campaign) => {
            tracing::info!(
                campaign_id = campaign.id,
                kind,
                status = %campaign.status,
                page_name = %campaign.page_name,
                "Campaign created"
            );
            Ok(campaign)
        }
        Err(e) => {
            if let Some(key) = stored_key {
                if let Err(cleanup) = state.storage.delete(&key).await {
                    tracing::warn!(
                        key,
                        error = %cleanup,
                        "Failed to remove orphaned campaign image"
                    );
                }
            }
            Err(e.into())
        }
    }
}

/// Record a pledge of `amount` by `audience_id` against a campaign row.
pub(crate) async fn pledge(
    state: &AppState,
    kind: &str,
    campaign_id: DbId,
    audience_id: DbId,
    amount: Option<Amount>,
) -> AppResult<PledgeSummary> {
    let amount = checked_pledge_amount(amount)?;
    let outcome =
        CampaignRepo::record_pledge(&state.pool, kind, campaign_id, audience_id, amount).await?;
    let (_, summary) = pledge_result(kind, campaign_id, audience_id, outcome)?;
    Ok(summary)
}

/// [`pledge`] that also follows the creator in the pledge's transaction.
/// The flag is `true` when the backer was not following before.
pub(crate) async fn pledge_and_follow(
    state: &AppState,
    kind: &str,
    campaign_id: DbId,
    audience_id: DbId,
    amount: Option<Amount>,
) -> AppResult<(Campaign, PledgeSummary, bool)> {
    let amount = checked_pledge_amount(amount)?;
    let (outcome, now_following) = CampaignRepo::record_pledge_and_follow(
        &state.pool,
        kind,
        campaign_id,
        audience_id,
        amount,
    )
    .await?;
    let (campaign, summary) = pledge_result(kind, campaign_id, audience_id, outcome)?;
    Ok((campaign, summary, now_following))
}

fn checked_pledge_amount(amount: Option<Amount>) -> AppResult<Amount> {
    let amount = amount.ok_or_else(|| AppError::validation("Valid amount is required"))?;
    validate_pledge_amount(amount).map_err(AppError::validation)?;
    Ok(amount)
}

fn pledge_result(
    kind: &str,
    campaign_id: DbId,
    audience_id: DbId,
    outcome: PledgeOutcome,
) -> AppResult<(Campaign, PledgeSummary)> {
    match outcome {
        PledgeOutcome::Recorded {
            campaign,
            contribution,
        } => {
            tracing::info!(
                campaign_id,
                audience_id,
                amount = contribution.amount,
                raised = campaign.raised_amount,
                "Pledge recorded"
            );
            let summary = PledgeSummary {
                id: campaign.id,
                title: campaign.title.clone(),
                status: campaign.status.clone(),
                raised_amount: campaign.raised_amount,
                funding_percentage: funding_percentage(campaign.raised_amount, campaign.amount),
                contribution: contribution.amount,
            };
            Ok((campaign, summary))
        }
        PledgeOutcome::NotFound => Err(AppError::not_found(entity_name(kind), campaign_id)),
        PledgeOutcome::NotAccepting(campaign) => Err(AppError::validation(
            pledge_rejection_reason(kind, &campaign.status),
        )),
        PledgeOutcome::TotalOverflow(_) => Err(AppError::validation(
            "Pledge amount is too large for this campaign",
        )),
    }
}

/// Delete a campaign row that has no contributions, and its stored image.
pub(crate) async fn delete_without_contributions(
    state: &AppState,
    campaign: &Campaign,
) -> AppResult<()> {
    match CampaignRepo::delete_unfunded(&state.pool, &campaign.kind, campaign.id).await? {
        DeleteOutcome::Deleted => {}
        DeleteOutcome::NotFound => {
            return Err(AppError::not_found(entity_name(&campaign.kind), campaign.id));
        }
        DeleteOutcome::HasContributions => {
            let entity = entity_name(&campaign.kind).to_lowercase();
            return Err(AppError::validation(format!(
                "Cannot delete a {entity} that has received contributions. \
                 You can cancel it instead."
            )));
        }
    }

    if let Some(key) = state.storage.key_for_url(&campaign.image_url) {
        if let Err(e) = state.storage.delete(key).await {
            tracing::warn!(
                campaign_id = campaign.id,
                error = %e,
                "Failed to remove campaign image"
            );
        }
    }

    tracing::info!(campaign_id = campaign.id, kind = %campaign.kind, "Campaign deleted");
    Ok(())
}

/// Assemble a detail page. `include_contributions` is set for the owner.
pub(crate) async fn load_detail(
    state: &AppState,
    campaign: Campaign,
    include_contributions: bool,
) -> AppResult<CampaignDetail> {
    let pool = &state.pool;
    let backer_count = ContributionRepo::backer_count(pool, campaign.id).await?;
    let contributions = if include_contributions {
        Some(ContributionRepo::list_for_campaign(pool, campaign.id).await?)
    } else {
        None
    };
    let rewards = RewardRepo::list_for_campaign(pool, campaign.id).await?;
    let updates = CampaignUpdateRepo::list_for_campaign(pool, campaign.id).await?;
    let creator = CreatorRepo::find_by_id(pool, campaign.creator_id)
        .await?
        .map(|c| CreatorSummary::from(&c));

    Ok(CampaignDetail {
        campaign: FundedCampaign::new(campaign, Utc::now()),
        backer_count,
        contributions,
        rewards,
        updates,
        creator,
    })
}

/// Owners see their campaign in any status; everyone else only once it is
/// publicly viewable.
fn ensure_can_view(campaign: &Campaign, user: &AuthUser) -> AppResult<()> {
    if is_campaign_owner(campaign, user) || is_publicly_viewable(&campaign.status) {
        Ok(())
    } else {
        Err(AppError::forbidden("Campaign not available"))
    }
}

// ---------------------------------------------------------------------------
// Creator campaign management
// ---------------------------------------------------------------------------

/// POST /api/campaigns
///
/// Multipart form; `launchImmediately=true` creates the campaign active.
pub async fn create(
    State(state): State<AppState>,
    creator: RequireCreator,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<CampaignMutationResponse<CampaignSummary>>)> {
    let form = MultipartForm::collect(multipart).await?;
    let campaign = create_from_form(&state, &creator, KIND_CAMPAIGN, &form, "campaignImage").await?;

    let message = if campaign.status == STATUS_ACTIVE {
        "Campaign created and launched successfully"
    } else {
        "Campaign saved as draft"
    };
    Ok((
        StatusCode::CREATED,
        Json(CampaignMutationResponse {
            message: message.into(),
            campaign: CampaignSummary::from(&campaign),
        }),
    ))
}

/// GET /api/campaigns
///
/// The calling creator's campaigns, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
) -> AppResult<Json<DataResponse<Vec<FundedCampaign<Campaign>>>>> {
    let now = Utc::now();
    let campaigns = CampaignRepo::list_by_creator(&state.pool, KIND_CAMPAIGN, user.user_id)
        .await?
        .into_iter()
        .map(|c| FundedCampaign::new(c, now))
        .collect();
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/campaigns/{id}
///
/// The owner gets the full page including contributions. Other callers
/// only see active campaigns.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CampaignDetail>> {
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    let is_owner = is_campaign_owner(&campaign, &user);
    if !is_owner && campaign.status != STATUS_ACTIVE {
        return Err(AppError::forbidden("Campaign not available"));
    }

    let detail = load_detail(&state, campaign, is_owner).await?;
    Ok(Json(detail))
}

/// PUT /api/campaigns/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaignRequest>,
) -> AppResult<Json<CampaignMutationResponse<Campaign>>> {
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    ensure_campaign_owner(&campaign, &user)?;
    if !can_edit(&campaign.status) {
        return Err(AppError::validation(
            "Cannot edit a completed or cancelled campaign",
        ));
    }

    if let Some(status) = &input.status {
        validate_status(status).map_err(AppError::validation)?;
    }
    if let Some(amount) = input.amount {
        validate_goal(amount).map_err(AppError::validation)?;
    }
    let target_date = input
        .target_date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|raw| parse_date("Target date", raw))
        .transpose()?;

    let launch_date = input
        .status
        .as_deref()
        .filter(|to| is_launch_transition(&campaign.status, to))
        .map(|_| Utc::now());

    let patch = UpdateCampaign {
        title: input.title.filter(|t| !t.trim().is_empty()),
        description: input.description,
        amount: input.amount,
        category: input.category,
        target_date,
        video_url: input.video_url,
        tags: input.tags,
        status: input.status,
        launch_date,
    };

    let updated = CampaignRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign", id))?;

    tracing::info!(campaign_id = id, status = %updated.status, "Campaign updated");
    Ok(Json(CampaignMutationResponse {
        message: "Campaign updated successfully".into(),
        campaign: updated,
    }))
}

/// POST /api/campaigns/{id}/launch
pub async fn launch(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    Path(id): Path<DbId>,
) -> AppResult<Json<CampaignMutationResponse<CampaignSummary>>> {
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    ensure_campaign_owner(&campaign, &user)?;
    if !can_launch(&campaign.status) {
        return Err(AppError::validation(format!(
            "Campaign cannot be launched (current status: {})",
            campaign.status
        )));
    }

    // A concurrent launch can win between the check and the update.
    let launched = CampaignRepo::launch(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::validation("Campaign cannot be launched"))?;

    tracing::info!(campaign_id = id, page_name = %launched.page_name, "Campaign launched");
    Ok(Json(CampaignMutationResponse {
        message: "Campaign launched successfully".into(),
        campaign: CampaignSummary::from(&launched),
    }))
}

/// DELETE /api/campaigns/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    ensure_campaign_owner(&campaign, &user)?;
    delete_without_contributions(&state, &campaign).await?;
    Ok(Json(MessageResponse::new("Campaign deleted successfully")))
}

/// POST /api/campaigns/{id}/support
pub async fn support(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(id): Path<DbId>,
    Json(input): Json<PledgeRequest>,
) -> AppResult<Json<CampaignMutationResponse<PledgeSummary>>> {
    let summary = pledge(&state, KIND_CAMPAIGN, id, user.user_id, input.amount).await?;
    Ok(Json(CampaignMutationResponse {
        message: "Successfully supported the campaign".into(),
        campaign: summary,
    }))
}

// ---------------------------------------------------------------------------
// Updates and rewards
// ---------------------------------------------------------------------------

/// POST /api/campaigns/{id}/updates
pub async fn create_update(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    Path(id): Path<DbId>,
    Json(input): Json<CreateUpdateRequest>,
) -> AppResult<(StatusCode, Json<UpdateCreatedResponse>)> {
    validate_request(&input)?;
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    ensure_campaign_owner(&campaign, &user)?;

    let update = CampaignUpdateRepo::create(
        &state.pool,
        id,
        &CreateCampaignUpdate {
            title: input.title.trim().to_string(),
            content: input.content,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UpdateCreatedResponse {
            message: "Update posted successfully".into(),
            update,
        }),
    ))
}

/// GET /api/campaigns/{id}/updates
pub async fn list_updates(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CampaignUpdate>>>> {
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    ensure_can_view(&campaign, &user)?;
    let updates = CampaignUpdateRepo::list_for_campaign(&state.pool, id).await?;
    Ok(Json(DataResponse { data: updates }))
}

/// POST /api/campaigns/{id}/rewards
pub async fn create_reward(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    Path(id): Path<DbId>,
    Json(input): Json<CreateRewardRequest>,
) -> AppResult<(StatusCode, Json<RewardCreatedResponse>)> {
    validate_request(&input)?;
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    ensure_campaign_owner(&campaign, &user)?;
    if !can_edit(&campaign.status) {
        return Err(AppError::validation(
            "Cannot add rewards to a completed or cancelled campaign",
        ));
    }

    let reward = RewardRepo::create(
        &state.pool,
        id,
        &CreateCampaignReward {
            title: input.title.trim().to_string(),
            description: input.description,
            amount: input.amount,
            reward_limit: input.limit,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RewardCreatedResponse {
            message: "Reward added successfully".into(),
            reward,
        }),
    ))
}

/// GET /api/campaigns/{id}/rewards
pub async fn list_rewards(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CampaignReward>>>> {
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    ensure_can_view(&campaign, &user)?;
    let rewards = RewardRepo::list_for_campaign(&state.pool, id).await?;
    Ok(Json(DataResponse { data: rewards }))
}

// ---------------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------------

/// GET /api/public/campaigns
pub async fn list_public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<FundedCampaign<CampaignWithBackers>>>>> {
    let now = Utc::now();
    let campaigns = CampaignRepo::list_public_active(&state.pool)
        .await?
        .into_iter()
        .map(|c| FundedCampaign::new(c, now))
        .collect();
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/public/campaign/{id}
///
/// Drafts and cancelled campaigns answer 403.
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CampaignDetail>> {
    let campaign = ensure_campaign_exists(&state.pool, KIND_CAMPAIGN, id).await?;
    if !is_publicly_viewable(&campaign.status) {
        return Err(AppError::forbidden("This campaign is not publicly viewable"));
    }
    let detail = load_detail(&state, campaign, false).await?;
    Ok(Json(detail))
}
