//! Route definitions for the `/subscriptions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Routes mounted at `/subscriptions`. Audience only.
///
/// ```text
/// GET  /                     -> list_mine
/// POST /                     -> subscribe
/// GET  /{pageName}           -> status
/// POST /{pageName}/cancel    -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(subscriptions::list_mine).post(subscriptions::subscribe),
        )
        .route("/{page_name}", get(subscriptions::status))
        .route("/{page_name}/cancel", post(subscriptions::cancel))
}
