//! Field validators
//!
//! Each validator reads one field (or the password pair) from a [`UiState`]
//! and returns a [`FieldValidation`]: the boolean verdict and the palette the
//! field must be painted with. Applying the style is left to the controller.

mod email;
mod matching;
mod password;

pub use email::{is_valid_email, validate_email};
pub use matching::{check_passwords_match, passwords_match};
pub use password::{SPECIAL_CHARS, is_valid_password, validate_password};

use crate::ui::{FieldValidation, UiState};

/// Runs all three validators in submit priority order: email, password, match.
///
/// Every validator runs regardless of earlier failures.
pub fn validate_all(state: &UiState) -> [FieldValidation; 3] {
    [
        validate_email(state),
        validate_password(state),
        check_passwords_match(state),
    ]
}

/// First failing validation in priority order, if any.
pub fn first_failure(results: &[FieldValidation]) -> Option<&FieldValidation> {
    results.iter().find(|v| !v.valid)
}
