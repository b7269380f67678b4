//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not match with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fundify_core::roles::{ROLE_AUDIENCE, ROLE_CREATOR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `creator` role and a page name in the token.
///
/// ```ignore
/// async fn creator_only(RequireCreator(user): RequireCreator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCreator(pub AuthUser);

impl RequireCreator {
    /// The creator's page name. Always present once extraction succeeded.
    pub fn page_name(&self) -> &str {
        self.0.page_name.as_deref().unwrap_or_default()
    }
}

impl FromRequestParts<AppState> for RequireCreator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_CREATOR || user.page_name.is_none() {
            return Err(AppError::forbidden("Access denied. Creator role required."));
        }
        Ok(RequireCreator(user))
    }
}

/// Requires the `audience` role.
pub struct RequireAudience(pub AuthUser);

impl FromRequestParts<AppState> for RequireAudience {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_AUDIENCE {
            return Err(AppError::forbidden("Access denied. Audience role required."));
        }
        Ok(RequireAudience(user))
    }
}
