//! Format checks shared by the contact, subscription and survey forms.
//!
//! Presence is checked by each form before these run; every check here
//! assumes the value was supplied.
use std::sync::OnceLock;

use regex::Regex;

use crate::error::AppError;

pub const INVALID_NAME: &str = "Invalid name format. Only letters, spaces, and periods are allowed.";
pub const INVALID_EMAIL: &str = "Invalid email format.";
pub const INVALID_MOBILE: &str = "Invalid mobile number format. Must be 10 digits.";

fn name_regex() -> &'static Regex {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    NAME_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z\s.]+$").unwrap())
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap())
}

fn mobile_regex() -> &'static Regex {
    static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
    MOBILE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{10}$").unwrap())
}

pub fn validate_name(name: &str) -> Result<(), AppError> {
    check(name_regex(), name, INVALID_NAME)
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    check(email_regex(), email, INVALID_EMAIL)
}

pub fn validate_mobile(mobile: &str) -> Result<(), AppError> {
    check(mobile_regex(), mobile, INVALID_MOBILE)
}

/// Name, then email, then mobile; the first failure is reported.
pub fn validate_identity(name: &str, email: &str, mobile: &str) -> Result<(), AppError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_mobile(mobile)
}

fn check(regex: &Regex, value: &str, message: &str) -> Result<(), AppError> {
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(AppError::bad_input(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert!(validate_name("John Q.").is_ok());
        assert!(validate_name("Dr. A. Rao").is_ok());
        assert!(validate_name("John123").is_err());
        assert!(validate_name("O'Brien").is_err());
    }

    #[test]
    fn test_emails() {
        assert!(validate_email("x@y.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.in").is_ok());
        assert!(validate_email("x@y").is_err());
        assert!(validate_email("x@y.c").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_mobiles() {
        assert!(validate_mobile("1234567890").is_ok());
        assert!(validate_mobile("12345").is_err());
        assert!(validate_mobile("12345678901").is_err());
        assert!(validate_mobile("12345abcde").is_err());
    }

    #[test]
    fn test_identity_reports_first_failure() {
        let error = validate_identity("John123", "x@y", "12345").unwrap_err();
        assert_eq!(error.to_string(), INVALID_NAME);

        let error = validate_identity("John", "x@y", "12345").unwrap_err();
        assert_eq!(error.to_string(), INVALID_EMAIL);

        let error = validate_identity("John", "x@y.com", "12345").unwrap_err();
        assert_eq!(error.to_string(), INVALID_MOBILE);
    }
}
