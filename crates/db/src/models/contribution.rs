//! Pledge ledger model.

use fundify_core::types::{Amount, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::campaign::Campaign;

/// A row from the `contributions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: DbId,
    pub campaign_id: DbId,
    pub audience_id: DbId,
    pub amount: Amount,
    pub status: String,
    pub created_at: Timestamp,
}

/// Contribution joined with the backer's name, shown to the campaign owner.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWithBacker {
    pub id: DbId,
    pub audience_id: DbId,
    pub backer_name: String,
    pub backer_email: String,
    pub amount: Amount,
    pub status: String,
    pub created_at: Timestamp,
}

/// One line of an audience member's funding history.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingHistoryEntry {
    pub id: DbId,
    pub campaign_id: DbId,
    pub campaign_title: String,
    pub campaign_kind: String,
    pub page_name: String,
    pub amount: Amount,
    pub status: String,
    pub created_at: Timestamp,
}

/// What happened to a pledge attempt.
#[derive(Debug, Clone)]
pub enum PledgeOutcome {
    /// The ledger row was written and the campaign total bumped.
    Recorded {
        campaign: Campaign,
        contribution: Contribution,
    },
    /// No campaign of the requested kind with that id.
    NotFound,
    /// The campaign exists but its status does not take pledges.
    NotAccepting(Campaign),
    /// The new total would not fit in an `Amount`.
    TotalOverflow(Campaign),
}
