//! Route definitions for `/audience`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{audience, content};
use crate::state::AppState;

/// Routes mounted at `/audience`.
///
/// ```text
/// GET    /campaigns                        -> audience::campaigns
/// GET    /campaign/{id}                    -> audience::campaign_detail
/// POST   /back-campaign                    -> audience::back_campaign
/// GET    /funding-history                  -> audience::funding_history
/// GET    /following                        -> audience::following
/// POST   /follow/{pageName}                -> audience::follow
/// DELETE /follow/{pageName}                -> audience::unfollow
///
/// GET    /content                          -> content::list_subscribed
/// GET    /content/{id}                     -> content::get_for_viewer
/// POST   /content/{id}/like                -> content::like
/// GET    /content/{id}/comments            -> content::list_comments
/// POST   /content/{id}/comments            -> content::add_comment
/// GET    /creator/{pageName}/content       -> content::list_for_creator
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/campaigns", get(audience::campaigns))
        .route("/campaign/{id}", get(audience::campaign_detail))
        .route("/back-campaign", post(audience::back_campaign))
        .route("/funding-history", get(audience::funding_history))
        .route("/following", get(audience::following))
        .route(
            "/follow/{page_name}",
            post(audience::follow).delete(audience::unfollow),
        )
        .route("/content", get(content::list_subscribed))
        .route("/content/{id}", get(content::get_for_viewer))
        .route("/content/{id}/like", post(content::like))
        .route(
            "/content/{id}/comments",
            get(content::list_comments).post(content::add_comment),
        )
        .route(
            "/creator/{page_name}/content",
            get(content::list_for_creator),
        )
}
