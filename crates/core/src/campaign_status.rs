//! Campaign lifecycle: kinds, statuses and the transitions between them.
//!
//! Campaigns and projects share one table and one status set; they differ
//! only in when pledges are accepted and whether funding completes them.

use crate::funding::is_fully_funded;
use crate::types::Amount;

pub const KIND_CAMPAIGN: &str = "campaign";
pub const KIND_PROJECT: &str = "project";

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_ACTIVE,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// State of a recorded pledge in the ledger.
pub const CONTRIBUTION_COMPLETED: &str = "completed";

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

/// Status assigned on creation.
pub fn initial_status(launch_immediately: bool) -> &'static str {
    if launch_immediately {
        STATUS_ACTIVE
    } else {
        STATUS_DRAFT
    }
}

/// Completed and cancelled campaigns are frozen.
pub fn can_edit(status: &str) -> bool {
    status != STATUS_COMPLETED && status != STATUS_CANCELLED
}

/// Only drafts can be launched.
pub fn can_launch(status: &str) -> bool {
    status == STATUS_DRAFT
}

/// Whether a pledge may be recorded against a campaign of this kind/status.
///
/// Campaigns take pledges only while active. Projects have no launch step,
/// so they take pledges until they are completed or cancelled.
pub fn accepts_pledges(kind: &str, status: &str) -> bool {
    if kind == KIND_PROJECT {
        can_edit(status)
    } else {
        status == STATUS_ACTIVE
    }
}

/// Human-readable reason a pledge was refused.
pub fn pledge_rejection_reason(kind: &str, status: &str) -> String {
    if kind == KIND_PROJECT {
        format!("Cannot pledge to a project with status \"{status}\"")
    } else {
        format!(
            "Cannot back a campaign with status \"{status}\". Only active campaigns can be backed."
        )
    }
}

/// Only active and completed campaigns are visible to the public.
pub fn is_publicly_viewable(status: &str) -> bool {
    status == STATUS_ACTIVE || status == STATUS_COMPLETED
}

/// Status a campaign moves to after a pledge brings its total to `raised`.
pub fn status_after_pledge(kind: &str, status: &str, raised: Amount, goal: Amount) -> &'static str {
    let current = VALID_STATUSES
        .iter()
        .copied()
        .find(|s| *s == status)
        .unwrap_or(STATUS_DRAFT);

    if kind == KIND_CAMPAIGN && current == STATUS_ACTIVE && is_fully_funded(raised, goal) {
        STATUS_COMPLETED
    } else {
        current
    }
}

/// Whether a status change requested through an update should stamp the
/// launch date.
pub fn is_launch_transition(from: &str, to: &str) -> bool {
    from == STATUS_DRAFT && to == STATUS_ACTIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_validate() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok());
        }
        assert!(validate_status("paused").is_err());
    }

    #[test]
    fn launch_immediately_activates() {
        assert_eq!(initial_status(true), STATUS_ACTIVE);
        assert_eq!(initial_status(false), STATUS_DRAFT);
    }

    #[test]
    fn only_drafts_launch() {
        assert!(can_launch(STATUS_DRAFT));
        assert!(!can_launch(STATUS_ACTIVE));
        assert!(!can_launch(STATUS_COMPLETED));
    }

    #[test]
    fn frozen_statuses_cannot_be_edited() {
        assert!(can_edit(STATUS_DRAFT));
        assert!(can_edit(STATUS_ACTIVE));
        assert!(!can_edit(STATUS_COMPLETED));
        assert!(!can_edit(STATUS_CANCELLED));
    }

    #[test]
    fn campaigns_take_pledges_only_when_active() {
        assert!(accepts_pledges(KIND_CAMPAIGN, STATUS_ACTIVE));
        assert!(!accepts_pledges(KIND_CAMPAIGN, STATUS_DRAFT));
        assert!(!accepts_pledges(KIND_CAMPAIGN, STATUS_COMPLETED));
    }

    #[test]
    fn projects_take_pledges_until_closed() {
        assert!(accepts_pledges(KIND_PROJECT, STATUS_DRAFT));
        assert!(accepts_pledges(KIND_PROJECT, STATUS_ACTIVE));
        assert!(!accepts_pledges(KIND_PROJECT, STATUS_CANCELLED));
    }

    #[test]
    fn draft_is_not_public() {
        assert!(!is_publicly_viewable(STATUS_DRAFT));
        assert!(!is_publicly_viewable(STATUS_CANCELLED));
        assert!(is_publicly_viewable(STATUS_ACTIVE));
        assert!(is_publicly_viewable(STATUS_COMPLETED));
    }

    #[test]
    fn funded_campaign_completes() {
        assert_eq!(
            status_after_pledge(KIND_CAMPAIGN, STATUS_ACTIVE, 100, 100),
            STATUS_COMPLETED
        );
        assert_eq!(
            status_after_pledge(KIND_CAMPAIGN, STATUS_ACTIVE, 99, 100),
            STATUS_ACTIVE
        );
    }

    #[test]
    fn funded_project_stays_open() {
        assert_eq!(
            status_after_pledge(KIND_PROJECT, STATUS_ACTIVE, 500, 100),
            STATUS_ACTIVE
        );
    }

    #[test]
    fn launch_transition_detected() {
        assert!(is_launch_transition(STATUS_DRAFT, STATUS_ACTIVE));
        assert!(!is_launch_transition(STATUS_ACTIVE, STATUS_ACTIVE));
    }
}
