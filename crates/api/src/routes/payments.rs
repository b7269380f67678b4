//! Route definitions for `/payments`.

use axum::routing::post;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST /orders          -> create_minor_order  (amount in minor units)
/// POST /create-order    -> create_order        (amount in whole units)
/// POST /verify          -> verify
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(payments::create_minor_order))
        .route("/create-order", post(payments::create_order))
        .route("/verify", post(payments::verify))
}
