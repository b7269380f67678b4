//! Route definitions for `/creators` and `/creator`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{content, creators, subscriptions};
use crate::state::AppState;

/// Routes mounted at `/creators`.
///
/// ```text
/// GET /    -> list
/// ```
pub fn list_router() -> Router<AppState> {
    Router::new().route("/", get(creators::list))
}

/// Routes mounted at `/creator`. Static segments win over `{pageName}`.
///
/// ```text
/// GET    /profile          -> creators::get_profile
/// PUT    /profile          -> creators::update_profile (multipart)
/// GET    /dashboard        -> creators::dashboard
/// GET    /subscriptions    -> subscriptions::list_for_creator
/// GET    /content          -> content::list_mine
/// POST   /content          -> content::create (multipart)
/// PUT    /content/{id}     -> content::update
/// DELETE /content/{id}     -> content::delete
/// GET    /{pageName}       -> creators::public_page (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(creators::get_profile).put(creators::update_profile),
        )
        .route("/dashboard", get(creators::dashboard))
        .route("/subscriptions", get(subscriptions::list_for_creator))
        .route("/content", get(content::list_mine).post(content::create))
        .route("/content/{id}", put(content::update).delete(content::delete))
        .route("/{page_name}", get(creators::public_page))
}
