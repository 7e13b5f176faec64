//! Sign-in and registration form validation.
//!
//! Each check returns the first failing rule as a [`ValidationError`] whose
//! `Display` text is the message shown next to the form field.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::MIN_PASSWORD_LEN;
use crate::error::ValidationError;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Validate an email address: required, and shaped like `a@b.c`.
pub fn validate_email(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !email_pattern().is_match(input) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// Validate a password: required, at least [`MIN_PASSWORD_LEN`] characters.
///
/// Length is counted in UTF-16 code units, the way browser form fields count
/// it, so a character outside the Basic Multilingual Plane counts as two.
pub fn validate_password(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if input.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub fn validate_password_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Run every registration check and collect all failures, in field order.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm: &str,
) -> Vec<ValidationError> {
    [
        validate_email(email),
        validate_password(password),
        validate_password_match(password, confirm),
    ]
    .into_iter()
    .filter_map(|r| r.err())
    .collect()
}
