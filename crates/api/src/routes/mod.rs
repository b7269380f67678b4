pub mod audience;
pub mod auth;
pub mod campaigns;
pub mod creators;
pub mod health;
pub mod payments;
pub mod projects;
pub mod subscriptions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                 login (public)
/// /auth/register/audience                     register audience (public)
/// /auth/register/creator                      register creator (public)
/// /auth/verify-token                          verify token (public)
/// /auth/change-password                       change password (auth)
///
/// /campaigns                                  list own, create (creator)
/// /campaigns/{id}                             get, update, delete
/// /campaigns/{id}/launch                      launch draft (owner)
/// /campaigns/{id}/support                     pledge (audience)
/// /campaigns/{id}/updates                     list, post updates
/// /campaigns/{id}/rewards                     list, add rewards
///
/// /public/campaigns                           active campaigns (public)
/// /public/campaign/{id}                       campaign page (public)
///
/// /projects                                   list (public), create (creator)
/// /projects/{id}                              get, delete
/// /projects/{id}/pledge                       pledge (audience)
///
/// /audience/campaigns                         backed + followed campaigns
/// /audience/campaign/{id}                     campaign as seen by a backer
/// /audience/back-campaign                     pledge + follow
/// /audience/funding-history                   own pledges
/// /audience/following                         followed page names
/// /audience/follow/{pageName}                 follow, unfollow
/// /audience/content                           subscribed content previews
/// /audience/content/{id}                      open content (tier-gated)
/// /audience/content/{id}/like                 like
/// /audience/content/{id}/comments             list, add comments
/// /audience/creator/{pageName}/content        one creator's content
///
/// /creators                                   public creator list
/// /creator/profile                            get, update own profile
/// /creator/dashboard                          creator dashboard
/// /creator/subscriptions                      own subscribers
/// /creator/content                            list, upload content
/// /creator/content/{id}                       update, delete content
/// /creator/{pageName}                         public creator page
///
/// /subscriptions                              list, subscribe (audience)
/// /subscriptions/{pageName}                   status
/// /subscriptions/{pageName}/cancel            cancel
///
/// /payments/orders                            gateway order (minor units)
/// /payments/create-order                      gateway order (whole units)
/// /payments/verify                            verify checkout signature
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/campaigns", campaigns::router())
        .nest("/public", campaigns::public_router())
        .nest("/projects", projects::router())
        .nest("/audience", audience::router())
        .nest("/creators", creators::list_router())
        .nest("/creator", creators::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/payments", payments::router())
}
