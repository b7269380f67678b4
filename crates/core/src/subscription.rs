//! Subscription periods and status rules.

use chrono::Months;

use crate::types::Timestamp;

pub const SUB_STATUS_ACTIVE: &str = "active";
pub const SUB_STATUS_CANCELLED: &str = "cancelled";

/// History log actions.
pub const ACTION_CREATED: &str = "created";
pub const ACTION_RENEWED: &str = "renewed";
pub const ACTION_CANCELLED: &str = "cancelled";

/// Duration used when the client does not specify one.
pub const DEFAULT_DURATION_MONTHS: u32 = 1;
/// Longest period a single purchase may cover.
pub const MAX_DURATION_MONTHS: u32 = 24;

/// Validate a requested subscription length in months.
pub fn validate_duration_months(months: u32) -> Result<(), String> {
    if (1..=MAX_DURATION_MONTHS).contains(&months) {
        Ok(())
    } else {
        Err(format!(
            "Subscription duration must be between 1 and {MAX_DURATION_MONTHS} months"
        ))
    }
}

/// End of a subscription starting at `start` and lasting `months`
/// calendar months. Month-end dates clamp (Jan 31 + 1 month = Feb 28/29).
pub fn subscription_end(start: Timestamp, months: u32) -> Timestamp {
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(start)
}

/// Active status and an end date that has not passed yet.
pub fn is_currently_active(status: &str, end_date: Timestamp, now: Timestamp) -> bool {
    status == SUB_STATUS_ACTIVE && end_date >= now
}

/// Still flagged active but past its end date.
pub fn is_expired(status: &str, end_date: Timestamp, now: Timestamp) -> bool {
    status == SUB_STATUS_ACTIVE && end_date < now
}

/// History note for a new or renewed subscription.
pub fn period_note(action: &str, months: u32) -> String {
    if action == ACTION_RENEWED {
        format!("Subscription renewed for {months} month(s)")
    } else {
        format!("Initial subscription for {months} month(s)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn end_date_adds_calendar_months() {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let end = subscription_end(start, 3);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 4, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_end_clamps() {
        let start = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        let end = subscription_end(start, 1);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 2, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn duration_bounds() {
        assert!(validate_duration_months(1).is_ok());
        assert!(validate_duration_months(24).is_ok());
        assert!(validate_duration_months(0).is_err());
        assert!(validate_duration_months(25).is_err());
    }

    #[test]
    fn active_until_end_date() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();

        assert!(is_currently_active(SUB_STATUS_ACTIVE, later, now));
        assert!(!is_currently_active(SUB_STATUS_ACTIVE, earlier, now));
        assert!(!is_currently_active(SUB_STATUS_CANCELLED, later, now));
        assert!(is_expired(SUB_STATUS_ACTIVE, earlier, now));
        assert!(!is_expired(SUB_STATUS_CANCELLED, earlier, now));
    }

    #[test]
    fn notes_mention_duration() {
        assert_eq!(period_note(ACTION_CREATED, 2), "Initial subscription for 2 month(s)");
        assert_eq!(period_note(ACTION_RENEWED, 1), "Subscription renewed for 1 month(s)");
    }
}
