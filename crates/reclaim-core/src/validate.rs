//! Input validation executed at construction time.
//!
//! Validation failures return [`ReclaimError::Validation`] with the
//! offending field so the boundary layer can produce field-level 4xx
//! responses instead of throwing.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ReclaimError, ReclaimResult};

pub const MAX_NAME_LENGTH: usize = 100;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap()
});

/// US phone: 10 digits with optional parens/dot/dash/space separators.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$").unwrap()
});

/// Trim and lowercase an email for storage and lookup. Uniqueness is
/// case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_name(name: &str) -> ReclaimResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ReclaimError::validation("name", "Name is required"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ReclaimError::validation(
            "name",
            format!("Name cannot exceed {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> ReclaimResult<()> {
    if email.trim().is_empty() {
        return Err(ReclaimError::validation("email", "Email is required"));
    }
    if !EMAIL_RE.is_match(&normalize_email(email)) {
        return Err(ReclaimError::validation(
            "email",
            "Please enter a valid email",
        ));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> ReclaimResult<()> {
    if phone.trim().is_empty() {
        return Err(ReclaimError::validation("phone", "Phone is required"));
    }
    if !PHONE_RE.is_match(phone.trim()) {
        return Err(ReclaimError::validation(
            "phone",
            "Please enter a valid phone number",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str, min_length: usize) -> ReclaimResult<()> {
    if password.is_empty() {
        return Err(ReclaimError::validation("password", "Password is required"));
    }
    if password.chars().count() < min_length {
        return Err(ReclaimError::validation(
            "password",
            format!("Password must be at least {min_length} characters"),
        ));
    }
    Ok(())
}

pub fn validate_service_name(service_name: &str) -> ReclaimResult<()> {
    if service_name.trim().is_empty() {
        return Err(ReclaimError::validation(
            "service_name",
            "Service name is required",
        ));
    }
    Ok(())
}

/// Prices and recovery amounts must be finite and non-negative.
pub fn validate_amount(field: &str, amount: f64) -> ReclaimResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ReclaimError::validation(
            field,
            "Amount must be a non-negative number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_emails() {
        for email in [
            "alice@example.com",
            "bob.smith@mail.example.org",
            "carol-d@sub.example.co",
        ] {
            assert!(validate_email(email).is_ok(), "{email}");
        }
    }

    #[test]
    fn rejects_invalid_emails() {
        for email in ["", "plainaddress", "@example.com", "a@b", "a b@example.com"] {
            assert!(validate_email(email).is_err(), "{email}");
        }
    }

    #[test]
    fn email_validation_is_case_insensitive() {
        assert!(validate_email("Alice@Example.COM").is_ok());
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn accepts_valid_phones() {
        for phone in ["5551234567", "555-123-4567", "(555) 123-4567", "555.123.4567"] {
            assert!(validate_phone(phone).is_ok(), "{phone}");
        }
    }

    #[test]
    fn rejects_invalid_phones() {
        for phone in ["", "123", "555-123-456", "phone-number", "555 1234 567"] {
            assert!(validate_phone(phone).is_err(), "{phone}");
        }
    }

    #[test]
    fn name_limits() {
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn password_length() {
        assert!(validate_password("secret", 6).is_ok());
        assert!(validate_password("short", 6).is_err());
        assert!(validate_password("", 6).is_err());
    }

    #[test]
    fn amounts_must_be_non_negative_and_finite() {
        assert!(validate_amount("price", 0.0).is_ok());
        assert!(validate_amount("price", 299.99).is_ok());
        assert!(validate_amount("price", -1.0).is_err());
        assert!(validate_amount("price", f64::NAN).is_err());
        assert!(validate_amount("price", f64::INFINITY).is_err());
    }

    #[test]
    fn validation_errors_carry_the_field() {
        match validate_phone("nope") {
            Err(ReclaimError::Validation { field, .. }) => assert_eq!(field, "phone"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
