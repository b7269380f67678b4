//! Request handlers.
//!
//! Each submodule provides the async handler functions for one area of the
//! API. Handlers delegate to the repositories in `fundify_db`, apply the
//! domain rules from `fundify_core`, and map errors via [`AppError`].

pub mod audience;
pub mod auth;
pub mod campaigns;
pub mod content;
pub mod creators;
pub mod payments;
pub mod projects;
pub mod subscriptions;

use chrono::{DateTime, NaiveDate, Utc};
use fundify_core::campaign_status::KIND_PROJECT;
use fundify_core::types::{Amount, DbId, Timestamp};
use fundify_db::models::campaign::Campaign;
use fundify_db::models::creator::Creator;
use fundify_db::repositories::{CampaignRepo, CreatorRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Entity label used in 404 messages for a campaign row of `kind`.
pub(crate) fn entity_name(kind: &str) -> &'static str {
    if kind == KIND_PROJECT {
        "Project"
    } else {
        "Campaign"
    }
}

/// Load a campaign or project by id, 404 if missing or of another kind.
pub(crate) async fn ensure_campaign_exists(
    pool: &sqlx::PgPool,
    kind: &str,
    id: DbId,
) -> AppResult<Campaign> {
    CampaignRepo::find_by_id(pool, kind, id)
        .await?
        .ok_or_else(|| AppError::not_found(entity_name(kind), id))
}

/// Load a creator by page name, 404 if unknown.
pub(crate) async fn ensure_creator_exists(
    pool: &sqlx::PgPool,
    page_name: &str,
) -> AppResult<Creator> {
    CreatorRepo::find_by_page_name(pool, page_name)
        .await?
        .ok_or_else(|| AppError::not_found_key("Creator", page_name))
}

/// Reject anyone but the creator who owns `campaign`.
pub(crate) fn ensure_campaign_owner(campaign: &Campaign, user: &AuthUser) -> AppResult<()> {
    if is_campaign_owner(campaign, user) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "You can only modify your own {}s",
            entity_name(&campaign.kind).to_lowercase()
        )))
    }
}

pub(crate) fn is_campaign_owner(campaign: &Campaign, user: &AuthUser) -> bool {
    user.role == fundify_core::roles::ROLE_CREATOR && campaign.creator_id == user.user_id
}

/// Parse a client-supplied date: RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC).
pub(crate) fn parse_date(field: &str, raw: &str) -> AppResult<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::validation(format!("{field} must be a valid date")))
}

/// Parse a whole-unit amount sent as a form string.
pub(crate) fn parse_amount(field: &str, raw: &str) -> AppResult<Amount> {
    raw.trim()
        .parse::<Amount>()
        .map_err(|_| AppError::validation(format!("{field} must be a positive number")))
}
