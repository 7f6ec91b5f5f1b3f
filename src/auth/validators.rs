// src/auth/validators.rs

use crate::common::{ValidationResult, Validator};
use crate::users::ProfileUpdate;

// ============================================================================
// Credential Rules
// ============================================================================

pub const PHONE_NUMBER_PREFIX: &str = "+62";
pub const PHONE_NUMBER_MIN_LEN: usize = 10;
pub const PHONE_NUMBER_MAX_LEN: usize = 13;
pub const FULL_NAME_MIN_LEN: usize = 3;
pub const FULL_NAME_MAX_LEN: usize = 60;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 64;
pub const PASSWORD_SPECIAL_CHARACTERS: [char; 6] = ['!', '@', '#', '$', '%', '&'];

pub const PHONE_NUMBER_LENGTH_MESSAGE: &str = "Phone number must be between 10 and 13 characters";
pub const PHONE_NUMBER_PREFIX_MESSAGE: &str =
    "Phone number must start with the Indonesia country code '+62'";
pub const FULL_NAME_LENGTH_MESSAGE: &str = "Full name must be between 3 and 60 characters";
pub const PASSWORD_LENGTH_MESSAGE: &str = "Password must be between 6 and 64 characters";
pub const PASSWORD_STRENGTH_MESSAGE: &str =
    "Password must contain at least 1 uppercase letter, 1 number, and 1 special character";

/// Length counts the digits after the leading `+`, so `+6281234567890` is 13.
pub fn validate_phone_number(phone_number: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    let len = phone_number
        .strip_prefix('+')
        .unwrap_or(phone_number)
        .chars()
        .count();

    if !(PHONE_NUMBER_MIN_LEN..=PHONE_NUMBER_MAX_LEN).contains(&len) {
        result.add_error("phone_number", PHONE_NUMBER_LENGTH_MESSAGE);
    }
    if !phone_number.starts_with(PHONE_NUMBER_PREFIX) {
        result.add_error("phone_number", PHONE_NUMBER_PREFIX_MESSAGE);
    }

    result
}

pub fn validate_full_name(full_name: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    let len = full_name.chars().count();

    if !(FULL_NAME_MIN_LEN..=FULL_NAME_MAX_LEN).contains(&len) {
        result.add_error("full_name", FULL_NAME_LENGTH_MESSAGE);
    }

    result
}

/// Length is checked first; the character-class rule only applies to a
/// password of acceptable length and is reported as one combined violation.
pub fn validate_password(password: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    let len = password.chars().count();

    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        result.add_error("password", PASSWORD_LENGTH_MESSAGE);
        return result;
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(&c));

    if !(has_uppercase && has_digit && has_special) {
        result.add_error("password", PASSWORD_STRENGTH_MESSAGE);
    }

    result
}

/// Checks every registration rule and returns all violation messages.
/// An empty list means the credentials are acceptable.
pub fn validate_credentials(phone_number: &str, full_name: &str, password: &str) -> Vec<String> {
    let mut result = validate_phone_number(phone_number);
    result.merge(validate_full_name(full_name));
    result.merge(validate_password(password));
    result.messages()
}

// ============================================================================
// Request Validators
// ============================================================================

/// Applies the registration format rules to whichever fields an update carries
pub struct ProfileUpdateValidator;

impl Validator<ProfileUpdate> for ProfileUpdateValidator {
    fn validate(&self, data: &ProfileUpdate) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(phone_number) = data.phone_number() {
            result.merge(validate_phone_number(phone_number));
        }
        if let Some(full_name) = data.full_name() {
            result.merge(validate_full_name(full_name));
        }

        result
    }
}
