//! JWT-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use fundify_core::roles::validate_role;
use fundify_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::query::TokenParam;
use crate::state::AppState;

/// Authenticated account extracted from a JWT.
///
/// The token is read from `Authorization: Bearer <token>`, falling back to
/// a `?token=` query parameter.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Id in the `creators` or `audiences` table, depending on `role`.
    pub user_id: DbId,
    pub role: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Only set for creators.
    pub page_name: Option<String>,
}

impl AuthUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Pull the raw token out of the request, header first.
fn extract_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(header) = parts.headers.get("authorization") {
        let value = header
            .to_str()
            .map_err(|_| AppError::unauthorized("Invalid Authorization header"))?;
        return value
            .strip_prefix("Bearer ")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
            });
    }

    Query::<TokenParam>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(p)| p.token)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Authentication token is required"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;
        validate_role(&claims.role).map_err(AppError::unauthorized)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            page_name: claims.page_name,
        })
    }
}
