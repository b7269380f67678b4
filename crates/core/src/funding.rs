//! Funding arithmetic for campaigns and projects.
//!
//! Every place that reports progress towards a goal goes through
//! [`funding_percentage`] so the number is computed the same way on the
//! public listing, the dashboards and the pledge response.

use crate::types::{Amount, Timestamp};

/// Seconds in one day, used for the "days left" countdown.
const SECS_PER_DAY: i64 = 86_400;

/// Percentage of `goal` covered by `raised`, capped at 100 and rounded to
/// two decimal places. A non-positive goal yields 0.
pub fn funding_percentage(raised: Amount, goal: Amount) -> f64 {
    if goal <= 0 {
        return 0.0;
    }
    let pct = (raised as f64 / goal as f64) * 100.0;
    let rounded = (pct * 100.0).round() / 100.0;
    rounded.clamp(0.0, 100.0)
}

/// Whether the raised total has reached the goal.
pub fn is_fully_funded(raised: Amount, goal: Amount) -> bool {
    goal > 0 && raised >= goal
}

/// Whole days remaining until `target_date`, rounded up and floored at 0.
///
/// Returns `None` when there is no target date.
pub fn days_left(target_date: Option<Timestamp>, now: Timestamp) -> Option<i64> {
    let target = target_date?;
    let remaining = (target - now).num_seconds();
    if remaining <= 0 {
        return Some(0);
    }
    Some((remaining + SECS_PER_DAY - 1) / SECS_PER_DAY)
}

/// Validate a pledge amount. Pledges must be strictly positive.
pub fn validate_pledge_amount(amount: Amount) -> Result<(), String> {
    if amount <= 0 {
        return Err("Valid amount is required (must be a positive number)".to_string());
    }
    Ok(())
}

/// Validate a funding goal.
pub fn validate_goal(amount: Amount) -> Result<(), String> {
    if amount <= 0 {
        return Err("Amount must be a positive number".to_string());
    }
    Ok(())
}

/// Split a comma-separated tag list, trimming whitespace and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase a title and collapse whitespace runs into single dashes.
///
/// Used to build storage paths such as `creators/{page}/campaigns/{slug}`.
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn at(day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(funding_percentage(1, 3), 33.33);
        assert_eq!(funding_percentage(2, 3), 66.67);
    }

    #[test]
    fn percentage_caps_at_one_hundred() {
        assert_eq!(funding_percentage(250, 100), 100.0);
    }

    #[test]
    fn percentage_of_zero_goal_is_zero() {
        assert_eq!(funding_percentage(50, 0), 0.0);
    }

    #[test]
    fn fully_funded_at_goal() {
        assert!(is_fully_funded(100, 100));
        assert!(!is_fully_funded(99, 100));
    }

    #[test]
    fn days_left_rounds_up() {
        let now = at(1);
        let target = now + Duration::hours(25);
        assert_eq!(days_left(Some(target), now), Some(2));
    }

    #[test]
    fn days_left_floors_at_zero() {
        assert_eq!(days_left(Some(at(1)), at(5)), Some(0));
        assert_eq!(days_left(None, at(5)), None);
    }

    #[test]
    fn pledge_amount_must_be_positive() {
        assert!(validate_pledge_amount(1).is_ok());
        assert!(validate_pledge_amount(0).is_err());
        assert!(validate_pledge_amount(-5).is_err());
    }

    #[test]
    fn tags_are_trimmed_and_empties_dropped() {
        assert_eq!(parse_tags(" art, music ,,film "), vec!["art", "music", "film"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn slug_collapses_whitespace() {
        assert_eq!(slugify("My  New\tAlbum"), "my-new-album");
    }
}
