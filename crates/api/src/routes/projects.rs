//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /               -> list  (?email=&pageName=&status=)
/// POST   /               -> create (creator, multipart)
/// GET    /{id}           -> get_by_id
/// DELETE /{id}           -> delete (owner)
/// POST   /{id}/pledge    -> pledge_to (audience)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route("/{id}", get(projects::get_by_id).delete(projects::delete))
        .route("/{id}/pledge", post(projects::pledge_to))
}
