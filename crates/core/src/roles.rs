//! Well-known role name constants carried in the JWT `role` claim.

pub const ROLE_CREATOR: &str = "creator";
pub const ROLE_AUDIENCE: &str = "audience";

/// Validate a user type string supplied by a client (e.g. on login).
pub fn validate_role(role: &str) -> Result<(), String> {
    match role {
        ROLE_CREATOR | ROLE_AUDIENCE => Ok(()),
        other => Err(format!(
            "Invalid user type '{other}'. Must be one of: {ROLE_CREATOR}, {ROLE_AUDIENCE}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_accepted() {
        assert!(validate_role("creator").is_ok());
        assert!(validate_role("audience").is_ok());
    }

    #[test]
    fn unknown_role_rejected() {
        let err = validate_role("admin").unwrap_err();
        assert!(err.contains("Invalid user type"));
    }
}
