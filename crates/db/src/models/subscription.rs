//! Creator subscriptions and their history log.

use fundify_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscriptions` table. One row per (audience, creator)
/// pair; renewals reuse the row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: DbId,
    pub audience_id: DbId,
    pub audience_email: String,
    pub creator_id: DbId,
    pub creator_page_name: String,
    pub status: String,
    pub tier: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub payment_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `subscription_history`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionHistoryEntry {
    pub id: DbId,
    pub subscription_id: DbId,
    pub action: String,
    pub note: String,
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscription {
    pub audience_id: DbId,
    pub audience_email: String,
    pub creator_id: DbId,
    pub creator_page_name: String,
    pub tier: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub payment_id: Option<String>,
}

/// Fields applied when an expired or cancelled subscription is renewed.
#[derive(Debug, Clone, Deserialize)]
pub struct RenewSubscription {
    pub tier: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub payment_id: Option<String>,
}
