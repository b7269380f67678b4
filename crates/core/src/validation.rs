//! Small input normalisation helpers shared by registration and lookups.

/// Trim and lowercase an email address. Emails are stored this way so
/// lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Reject a missing or whitespace-only field.
pub fn require_non_blank(field: &str, value: Option<&str>) -> Result<String, String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(format!("{field} is required")),
    }
}

/// Parse a form boolean (`"true"`, `"1"`, `"on"`), as sent by HTML forms.
pub fn parse_form_bool(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "on" | "yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[test]
    fn blank_fields_rejected() {
        assert_eq!(require_non_blank("title", Some(" x ")).unwrap(), "x");
        assert_eq!(
            require_non_blank("title", Some("   ")).unwrap_err(),
            "title is required"
        );
        assert!(require_non_blank("title", None).is_err());
    }

    #[test]
    fn form_bools() {
        assert!(parse_form_bool(Some("true")));
        assert!(parse_form_bool(Some("ON")));
        assert!(!parse_form_bool(Some("false")));
        assert!(!parse_form_bool(None));
    }
}
