//! Handlers for the `/auth` resource (login, registration, token checks,
//! password changes).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fundify_core::roles::{ROLE_AUDIENCE, ROLE_CREATOR};
use fundify_core::types::DbId;
use fundify_core::validation::{normalize_email, require_non_blank};
use fundify_db::models::audience::{Audience, CreateAudience};
use fundify_db::models::creator::{CreateCreator, Creator};
use fundify_db::repositories::{AudienceRepo, CreatorRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, validate_token, TokenSubject};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::validation::validate_request;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// `"creator"` logs into a creator account; anything else is audience.
    pub user_type: Option<String>,
}

/// Request body for `POST /auth/register/audience`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterAudienceRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/register/creator`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterCreatorRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Page name is required"))]
    pub page_name: String,
    pub category: Option<String>,
    pub bio: Option<String>,
}

/// Request body for `POST /auth/verify-token`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyTokenRequest {
    pub token: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Public account info returned by every auth endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    pub profile_image: String,
}

impl From<&Creator> for UserInfo {
    fn from(c: &Creator) -> Self {
        Self {
            id: c.id,
            email: c.email.clone(),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            user_type: ROLE_CREATOR,
            page_name: Some(c.page_name.clone()),
            profile_image: c.profile_image.clone(),
        }
    }
}

impl From<&Audience> for UserInfo {
    fn from(a: &Audience) -> Self {
        Self {
            id: a.id,
            email: a.email.clone(),
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            user_type: ROLE_AUDIENCE,
            page_name: None,
            profile_image: a.profile_image.clone(),
        }
    }
}

/// Response for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Response for both registration endpoints.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

/// Response for `POST /auth/verify-token`.
#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub user: UserInfo,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate a creator or audience member by email and password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (
        input.email.as_deref().filter(|e| !e.trim().is_empty()),
        input.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation("Email and password are required"));
    };
    let email = normalize_email(email);

    let (password_hash, user) = if input.user_type.as_deref() == Some(ROLE_CREATOR) {
        let creator = CreatorRepo::find_by_email(&state.pool, &email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;
        (creator.password_hash.clone(), UserInfo::from(&creator))
    } else {
        let audience = AudienceRepo::find_by_email(&state.pool, &email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;
        (audience.password_hash.clone(), UserInfo::from(&audience))
    };

    if !check_password(password, &password_hash)? {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = user.id, role = user.user_type, "User logged in");

    Ok(Json(LoginResponse { token, user }))
}

/// POST /api/auth/register/audience
pub async fn register_audience(
    State(state): State<AppState>,
    Json(input): Json<RegisterAudienceRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    validate_request(&input)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;

    let audience = AudienceRepo::create(
        &state.pool,
        &CreateAudience {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash: hash(&input.password)?,
        },
    )
    .await?;

    let user = UserInfo::from(&audience);
    let token = issue_token(&state, &user)?;
    tracing::info!(audience_id = audience.id, "Audience member registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Audience registration successful".into(),
            token,
            user,
        }),
    ))
}

/// POST /api/auth/register/creator
///
/// Duplicate emails and page names surface as 409 through their unique
/// constraints.
pub async fn register_creator(
    State(state): State<AppState>,
    Json(input): Json<RegisterCreatorRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    validate_request(&input)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;
    let page_name = require_non_blank("Page name", Some(&input.page_name))
        .map_err(AppError::validation)?;
    if page_name.contains('/') {
        return Err(AppError::validation("Page name may not contain '/'"));
    }

    let creator = CreatorRepo::create(
        &state.pool,
        &CreateCreator {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash: hash(&input.password)?,
            page_name,
            category: input.category.filter(|c| !c.trim().is_empty()),
            bio: input.bio,
        },
    )
    .await?;

    let user = UserInfo::from(&creator);
    let token = issue_token(&state, &user)?;
    tracing::info!(creator_id = creator.id, page_name = %creator.page_name, "Creator registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Creator registration successful".into(),
            token,
            user,
        }),
    ))
}

/// POST /api/auth/verify-token
///
/// Check a token and confirm its account still exists.
pub async fn verify_token(
    State(state): State<AppState>,
    Json(input): Json<VerifyTokenRequest>,
) -> AppResult<Json<VerifyTokenResponse>> {
    let token = require_non_blank("Token", input.token.as_deref()).map_err(AppError::validation)?;

    let claims = validate_token(&token, &state.config.jwt)
        .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

    let user = if claims.role == ROLE_CREATOR {
        CreatorRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .map(|c| UserInfo::from(&c))
    } else {
        AudienceRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .map(|a| UserInfo::from(&a))
    };

    let user = user.ok_or_else(|| AppError::not_found("User", claims.sub))?;
    Ok(Json(VerifyTokenResponse { user }))
}

/// POST /api/auth/change-password
///
/// The account is taken from the bearer token.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (Some(current), Some(new_password)) = (
        input.current_password.as_deref().filter(|p| !p.is_empty()),
        input.new_password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation(
            "Current password and new password are required",
        ));
    };
    validate_password_strength(new_password, MIN_PASSWORD_LENGTH).map_err(AppError::validation)?;

    let stored_hash = if auth.role == ROLE_CREATOR {
        CreatorRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .map(|c| c.password_hash)
    } else {
        AudienceRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .map(|a| a.password_hash)
    }
    .ok_or_else(|| AppError::not_found("User", auth.user_id))?;

    if !check_password(current, &stored_hash)? {
        return Err(AppError::unauthorized("Current password is incorrect"));
    }

    let new_hash = hash(new_password)?;
    if auth.role == ROLE_CREATOR {
        CreatorRepo::update_password(&state.pool, auth.user_id, &new_hash).await?;
    } else {
        AudienceRepo::update_password(&state.pool, auth.user_id, &new_hash).await?;
    }

    tracing::info!(user_id = auth.user_id, role = %auth.role, "Password changed");
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

fn check_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    verify_password(password, stored_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

fn issue_token(state: &AppState, user: &UserInfo) -> AppResult<String> {
    let subject = TokenSubject {
        id: user.id,
        role: user.user_type,
        email: &user.email,
        first_name: &user.first_name,
        last_name: &user.last_name,
        page_name: user.page_name.as_deref(),
    };
    generate_access_token(&subject, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}
