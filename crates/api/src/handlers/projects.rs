//! Handlers for the `/projects` resource.
//!
//! Projects share the campaign table and the create/pledge/delete paths in
//! [`super::campaigns`]; they differ in having public listings and staying
//! open for pledges until completed or cancelled.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fundify_core::campaign_status::{validate_status, KIND_PROJECT, STATUS_ACTIVE};
use fundify_core::types::DbId;
use fundify_core::validation::normalize_email;
use fundify_db::models::campaign::{Campaign, CampaignFilter};
use fundify_db::repositories::CampaignRepo;
use serde::Serialize;

use super::campaigns::{
    create_from_form, delete_without_contributions, pledge, PledgeRequest, PledgeSummary,
};
use super::{ensure_campaign_exists, ensure_campaign_owner};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAudience, RequireCreator};
use crate::query::ProjectListParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;
use crate::upload::MultipartForm;

#[derive(Debug, Serialize)]
pub struct ProjectResponse<T: Serialize> {
    pub message: String,
    pub project: T,
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    creator: RequireCreator,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProjectResponse<Campaign>>)> {
    let form = MultipartForm::collect(multipart).await?;
    let project = create_from_form(&state, &creator, KIND_PROJECT, &form, "projectImage").await?;

    let message = if project.status == STATUS_ACTIVE {
        "Project created and launched successfully"
    } else {
        "Project saved as draft"
    };
    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            message: message.into(),
            project,
        }),
    ))
}

/// GET /api/projects?email=&pageName=&status=
///
/// Public listing, newest first. All filters are optional.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Campaign>>>> {
    if let Some(status) = &params.status {
        validate_status(status).map_err(AppError::validation)?;
    }
    let filter = CampaignFilter {
        kind: Some(KIND_PROJECT.to_string()),
        creator_email: params.email.as_deref().map(normalize_email),
        page_name: params.page_name,
        status: params.status,
    };
    let projects = CampaignRepo::list_filtered(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Campaign>> {
    let project = ensure_campaign_exists(&state.pool, KIND_PROJECT, id).await?;
    Ok(Json(project))
}

/// POST /api/projects/{id}/pledge
pub async fn pledge_to(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(id): Path<DbId>,
    Json(input): Json<PledgeRequest>,
) -> AppResult<Json<ProjectResponse<PledgeSummary>>> {
    let summary = pledge(&state, KIND_PROJECT, id, user.user_id, input.amount).await?;
    Ok(Json(ProjectResponse {
        message: "Successfully supported the project".into(),
        project: summary,
    }))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let project = ensure_campaign_exists(&state.pool, KIND_PROJECT, id).await?;
    ensure_campaign_owner(&project, &user)?;
    delete_without_contributions(&state, &project).await?;
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
