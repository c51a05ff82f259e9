//! Password section - acceptance rules for the primary password.

use secrecy::ExposeSecret;

use crate::ui::{FieldId, FieldValidation, UiState};

const MIN_LENGTH: usize = 8;

/// Special characters a password must draw at least one of.
pub const SPECIAL_CHARS: &str = "!@#$%^&*";

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || SPECIAL_CHARS.contains(c)
}

/// Returns `true` if the password is acceptable.
///
/// At least 8 characters, one ASCII uppercase letter, one digit and one of
/// `!@#$%^&*`, and nothing outside letters, digits and that set.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_LENGTH
        && password.chars().all(is_allowed)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

/// Validates the primary password field of `state`.
pub fn validate_password(state: &UiState) -> FieldValidation {
    FieldValidation::new(
        FieldId::Password,
        is_valid_password(state.password().expose_secret()),
    )
}
