//! Tier-based gating of exclusive content.
//!
//! Tiers are ordered `free < basic < premium < elite`. A subscriber sees
//! content whose tier is at or below their own subscription tier.

pub const TIER_FREE: &str = "free";
pub const TIER_BASIC: &str = "basic";
pub const TIER_PREMIUM: &str = "premium";
pub const TIER_ELITE: &str = "elite";

/// All valid tiers, lowest first.
pub const VALID_TIERS: &[&str] = &[TIER_FREE, TIER_BASIC, TIER_PREMIUM, TIER_ELITE];

/// Tier applied when a client does not specify one.
pub const DEFAULT_TIER: &str = TIER_BASIC;

/// Numeric level of a tier, or `None` for an unknown tier name.
pub fn tier_level(tier: &str) -> Option<u8> {
    VALID_TIERS.iter().position(|t| *t == tier).map(|i| i as u8)
}

/// Validate that a tier string is one of the accepted values.
pub fn validate_tier(tier: &str) -> Result<(), String> {
    if tier_level(tier).is_some() {
        Ok(())
    } else {
        Err(format!(
            "Invalid tier '{tier}'. Must be one of: {}",
            VALID_TIERS.join(", ")
        ))
    }
}

/// Whether a subscription at `subscriber_tier` unlocks content at
/// `content_tier`. Unknown tiers never grant access.
pub fn tier_grants_access(subscriber_tier: &str, content_tier: &str) -> bool {
    match (tier_level(subscriber_tier), tier_level(content_tier)) {
        (Some(have), Some(need)) => have >= need,
        _ => false,
    }
}

/// Decide whether a viewer may open a piece of content.
///
/// `active_subscription_tier` is the tier of the viewer's currently active
/// subscription to the content's creator, if any.
pub fn can_view_content(
    is_owner: bool,
    content_tier: &str,
    active_subscription_tier: Option<&str>,
) -> bool {
    if is_owner || content_tier == TIER_FREE {
        return true;
    }
    active_subscription_tier.is_some_and(|tier| tier_grants_access(tier, content_tier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert_eq!(tier_level(TIER_FREE), Some(0));
        assert_eq!(tier_level(TIER_ELITE), Some(3));
        assert_eq!(tier_level("platinum"), None);
    }

    #[test]
    fn higher_tier_unlocks_lower_content() {
        assert!(tier_grants_access(TIER_PREMIUM, TIER_BASIC));
        assert!(tier_grants_access(TIER_BASIC, TIER_BASIC));
        assert!(!tier_grants_access(TIER_BASIC, TIER_ELITE));
    }

    #[test]
    fn unknown_tier_never_grants() {
        assert!(!tier_grants_access("gold", TIER_FREE));
    }

    #[test]
    fn owner_and_free_content_always_visible() {
        assert!(can_view_content(true, TIER_ELITE, None));
        assert!(can_view_content(false, TIER_FREE, None));
    }

    #[test]
    fn gated_content_needs_subscription() {
        assert!(!can_view_content(false, TIER_BASIC, None));
        assert!(can_view_content(false, TIER_BASIC, Some(TIER_BASIC)));
        assert!(!can_view_content(false, TIER_PREMIUM, Some(TIER_BASIC)));
    }
}
