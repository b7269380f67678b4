//! Handlers for audience subscriptions to creators.
//!
//! There is one subscription row per (audience, creator) pair. Subscribing
//! again after expiry or cancellation renews that row.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use fundify_core::access::{validate_tier, DEFAULT_TIER};
use fundify_core::subscription::{
    is_currently_active, is_expired, subscription_end, validate_duration_months,
    DEFAULT_DURATION_MONTHS, SUB_STATUS_CANCELLED,
};
use fundify_core::types::DbId;
use fundify_db::models::subscription::{
    CreateSubscription, RenewSubscription, Subscription, SubscriptionHistoryEntry,
};
use fundify_db::repositories::SubscriptionRepo;
use serde::{Deserialize, Serialize};

use super::ensure_creator_exists;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAudience, RequireCreator};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub creator_page_name: Option<String>,
    pub duration_months: Option<u32>,
    pub tier: Option<String>,
    /// Gateway payment id, when the subscription was paid through checkout.
    pub payment_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub message: String,
    pub subscription: Subscription,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionList {
    pub subscriptions: Vec<Subscription>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub subscription: Subscription,
    pub is_subscribed: bool,
    /// Still flagged active but past its end date.
    pub is_expired: bool,
    pub history: Vec<SubscriptionHistoryEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSubscriptions {
    pub subscriptions: Vec<Subscription>,
    pub total_count: usize,
    pub active_count: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/subscriptions
///
/// 201 for a new subscription, 200 for a renewal, 409 while one is active.
pub async fn subscribe(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<SubscriptionResponse>)> {
    let page_name = input
        .creator_page_name
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Creator page name is required"))?;

    let months = input.duration_months.unwrap_or(DEFAULT_DURATION_MONTHS);
    validate_duration_months(months).map_err(AppError::validation)?;
    if let Some(tier) = &input.tier {
        validate_tier(tier).map_err(AppError::validation)?;
    }

    let creator = ensure_creator_exists(&state.pool, page_name).await?;
    let now = Utc::now();
    let end_date = subscription_end(now, months);

    let already_active = || {
        AppError::conflict(format!(
            "You already have an active subscription to {}",
            creator.page_name
        ))
    };

    let existing = SubscriptionRepo::find_pair(&state.pool, user.user_id, creator.id).await?;
    if let Some(existing) = existing {
        if is_currently_active(&existing.status, existing.end_date, now) {
            return Err(already_active());
        }

        let renewal = RenewSubscription {
            tier: input.tier,
            start_date: now,
            end_date,
            payment_id: input.payment_id,
        };
        // A concurrent renewal that won the race leaves the row active.
        let subscription = SubscriptionRepo::renew(&state.pool, existing.id, &renewal, months)
            .await?
            .ok_or_else(already_active)?;

        tracing::info!(
            subscription_id = subscription.id,
            audience_id = user.user_id,
            page_name = %creator.page_name,
            months,
            "Subscription renewed"
        );
        return Ok((
            StatusCode::OK,
            Json(SubscriptionResponse {
                message: "Subscription renewed successfully".into(),
                subscription,
            }),
        ));
    }

    let create = CreateSubscription {
        audience_id: user.user_id,
        audience_email: user.email.clone(),
        creator_id: creator.id,
        creator_page_name: creator.page_name.clone(),
        tier: input.tier.unwrap_or_else(|| DEFAULT_TIER.to_string()),
        start_date: now,
        end_date,
        payment_id: input.payment_id,
    };
    let subscription = SubscriptionRepo::create(&state.pool, &create, months).await?;

    tracing::info!(
        subscription_id = subscription.id,
        audience_id = user.user_id,
        page_name = %creator.page_name,
        tier = %subscription.tier,
        months,
        "Subscription created"
    );
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse {
            message: "Subscription created successfully".into(),
            subscription,
        }),
    ))
}

/// GET /api/subscriptions
pub async fn list_mine(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
) -> AppResult<Json<SubscriptionList>> {
    let subscriptions = SubscriptionRepo::list_for_audience(&state.pool, user.user_id).await?;
    Ok(Json(SubscriptionList {
        count: subscriptions.len(),
        subscriptions,
    }))
}

/// GET /api/subscriptions/{pageName}
pub async fn status(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(page_name): Path<String>,
) -> AppResult<Json<SubscriptionStatus>> {
    let subscription = find_own(&state, user.user_id, &page_name).await?;
    let history = SubscriptionRepo::history(&state.pool, subscription.id).await?;

    let now = Utc::now();
    Ok(Json(SubscriptionStatus {
        is_subscribed: is_currently_active(&subscription.status, subscription.end_date, now),
        is_expired: is_expired(&subscription.status, subscription.end_date, now),
        subscription,
        history,
    }))
}

/// POST /api/subscriptions/{pageName}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    RequireAudience(user): RequireAudience,
    Path(page_name): Path<String>,
) -> AppResult<Json<SubscriptionResponse>> {
    let existing = find_own(&state, user.user_id, &page_name).await?;
    if existing.status == SUB_STATUS_CANCELLED {
        return Err(AppError::validation("Subscription is already cancelled"));
    }

    // A concurrent cancel leaves nothing to update.
    let subscription = SubscriptionRepo::cancel(&state.pool, existing.id)
        .await?
        .ok_or_else(|| AppError::validation("Subscription is already cancelled"))?;

    tracing::info!(
        subscription_id = subscription.id,
        audience_id = user.user_id,
        "Subscription cancelled"
    );
    Ok(Json(SubscriptionResponse {
        message: "Subscription cancelled successfully".into(),
        subscription,
    }))
}

/// GET /api/creator/subscriptions
pub async fn list_for_creator(
    State(state): State<AppState>,
    RequireCreator(user): RequireCreator,
) -> AppResult<Json<CreatorSubscriptions>> {
    let subscriptions = SubscriptionRepo::list_for_creator(&state.pool, user.user_id).await?;
    let now = Utc::now();
    let active_count = subscriptions
        .iter()
        .filter(|s| is_currently_active(&s.status, s.end_date, now))
        .count();

    Ok(Json(CreatorSubscriptions {
        total_count: subscriptions.len(),
        active_count,
        subscriptions,
    }))
}

async fn find_own(state: &AppState, audience_id: DbId, page_name: &str) -> AppResult<Subscription> {
    let creator = ensure_creator_exists(&state.pool, page_name).await?;
    SubscriptionRepo::find_pair(&state.pool, audience_id, creator.id)
        .await?
        .ok_or_else(|| AppError::not_found_key("Subscription", page_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_request_defaults_to_empty() {
        let req: SubscribeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.creator_page_name.is_none());
        assert!(req.duration_months.is_none());

        let body = r#"{"creatorPageName":"jane","durationMonths":3,"tier":"premium"}"#;
        let req: SubscribeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.creator_page_name.as_deref(), Some("jane"));
        assert_eq!(req.duration_months, Some(3));
    }
}
