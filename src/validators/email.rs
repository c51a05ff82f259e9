//! Email section - basic `local@domain.tld` shape check.

use crate::ui::{FieldId, FieldValidation, UiState};

/// Returns `true` if `email` has the shape `local@domain.tld`.
///
/// No whitespace (U+FEFF included) anywhere, exactly one `@`, a non-empty
/// local part, and a domain containing a `.` with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace() || c == '\u{FEFF}') {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validates the email field of `state`.
pub fn validate_email(state: &UiState) -> FieldValidation {
    FieldValidation::new(FieldId::Email, is_valid_email(state.email()))
}
