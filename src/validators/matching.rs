//! Match section - confirmation must repeat the password.

use secrecy::{ExposeSecret, SecretString};

use crate::ui::{FieldId, FieldValidation, UiState};

/// Returns `true` if both values are equal and the password is non-empty.
pub fn passwords_match(password: &SecretString, confirmation: &SecretString) -> bool {
    let password = password.expose_secret();
    !password.is_empty() && password == confirmation.expose_secret()
}

/// Validates the confirmation field of `state` against the password.
pub fn check_passwords_match(state: &UiState) -> FieldValidation {
    FieldValidation::new(
        FieldId::Confirmation,
        passwords_match(state.password(), state.confirmation()),
    )
}
