//! Route definitions for the `/campaigns` resource and the public campaign
//! pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::campaigns;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /                 -> list_mine (creator)
/// POST   /                 -> create (creator, multipart)
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update (owner)
/// DELETE /{id}             -> delete (owner)
/// POST   /{id}/launch      -> launch (owner)
/// POST   /{id}/support     -> support (audience)
/// GET    /{id}/updates     -> list_updates
/// POST   /{id}/updates     -> create_update (owner)
/// GET    /{id}/rewards     -> list_rewards
/// POST   /{id}/rewards     -> create_reward (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaigns::list_mine).post(campaigns::create))
        .route(
            "/{id}",
            get(campaigns::get_by_id)
                .put(campaigns::update)
                .delete(campaigns::delete),
        )
        .route("/{id}/launch", post(campaigns::launch))
        .route("/{id}/support", post(campaigns::support))
        .route(
            "/{id}/updates",
            get(campaigns::list_updates).post(campaigns::create_update),
        )
        .route(
            "/{id}/rewards",
            get(campaigns::list_rewards).post(campaigns::create_reward),
        )
}

/// Routes mounted at `/public`. No authentication.
///
/// ```text
/// GET /campaigns        -> list_public
/// GET /campaign/{id}    -> get_public
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/campaigns", get(campaigns::list_public))
        .route("/campaign/{id}", get(campaigns::get_public))
}
