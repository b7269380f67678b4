//! Route definitions for `/auth`.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login               -> login
/// POST /register/audience   -> register_audience
/// POST /register/creator    -> register_creator
/// POST /verify-token        -> verify_token
/// POST /change-password     -> change_password (auth required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register/audience", post(auth::register_audience))
        .route("/register/creator", post(auth::register_creator))
        .route("/verify-token", post(auth::verify_token))
        .route("/change-password", post(auth::change_password))
}
