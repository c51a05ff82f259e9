//! Form model - the explicit UI state the validators read from.
//!
//! Holds the current field contents plus the presentation values the
//! controller pushes to the host: field palettes, tooltip, toggle icons,
//! submit button and success view.

use secrecy::{ExposeSecret, SecretString};

/// The three validated inputs of the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Email,
    Password,
    Confirmation,
}

impl FieldId {
    /// Message shown in the submit tooltip when this field is the first failure.
    pub fn failure_message(self) -> &'static str {
        match self {
            FieldId::Email => "Please enter a valid email address",
            FieldId::Password => {
                "Password must be at least 8 characters with at least one uppercase letter, one number, and one special character"
            }
            FieldId::Confirmation => "Passwords do not match",
        }
    }
}

/// The two password inputs, each with its own visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordField {
    Primary,
    Confirmation,
}

impl PasswordField {
    pub const ALL: [PasswordField; 2] = [PasswordField::Primary, PasswordField::Confirmation];

    pub fn field_id(self) -> FieldId {
        match self {
            PasswordField::Primary => FieldId::Password,
            PasswordField::Confirmation => FieldId::Confirmation,
        }
    }

    fn index(self) -> usize {
        match self {
            PasswordField::Primary => 0,
            PasswordField::Confirmation => 1,
        }
    }
}

/// Inline border/background palette written on an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldStyle {
    pub border_color: &'static str,
    pub background_color: &'static str,
}

impl FieldStyle {
    pub const VALID: FieldStyle = FieldStyle {
        border_color: "#84c7a8",
        background_color: "rgba(158, 224, 192, 0.1)",
    };

    pub const INVALID: FieldStyle = FieldStyle {
        border_color: "#FF6B6B",
        background_color: "rgba(255, 107, 107, 0.1)",
    };

    pub fn for_verdict(valid: bool) -> FieldStyle {
        if valid { Self::VALID } else { Self::INVALID }
    }
}

/// Result of validating one field: verdict plus the style it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValidation {
    pub field: FieldId,
    pub valid: bool,
    pub style: FieldStyle,
}

impl FieldValidation {
    pub fn new(field: FieldId, valid: bool) -> Self {
        Self {
            field,
            valid,
            style: FieldStyle::for_verdict(valid),
        }
    }
}

/// How a password input renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Masked,
    Plain,
}

impl InputKind {
    pub fn toggled(self) -> InputKind {
        match self {
            InputKind::Masked => InputKind::Plain,
            InputKind::Plain => InputKind::Masked,
        }
    }

    /// Value of the input's `type` attribute.
    pub fn input_type(self) -> &'static str {
        match self {
            InputKind::Masked => "password",
            InputKind::Plain => "text",
        }
    }

    /// Icon matching this rendering.
    pub fn icon(self) -> ToggleIcon {
        match self {
            InputKind::Masked => ToggleIcon::EyeSlash,
            InputKind::Plain => ToggleIcon::Eye,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    EyeSlash,
    Eye,
}

impl ToggleIcon {
    pub fn class_name(self) -> &'static str {
        match self {
            ToggleIcon::EyeSlash => "fa-solid fa-eye-slash",
            ToggleIcon::Eye => "fa-solid fa-eye",
        }
    }
}

/// Inline CSS declarations, in the order they are written.
pub type InlineStyle = &'static [(&'static str, &'static str)];

/// Inline style of the injected toggle icon.
pub const TOGGLE_ICON_STYLE: InlineStyle = &[
    ("position", "absolute"),
    ("right", "-80%"),
    ("top", "50%"),
    ("transform", "translateY(-50%)"),
    ("color", "#666"),
    ("cursor", "pointer"),
];

/// Inline style of every tooltip.
pub const TOOLTIP_STYLE: InlineStyle = &[
    ("background-color", "#FF6B6B"),
    ("color", "white"),
    ("padding", "8px 12px"),
    ("border-radius", "4px"),
    ("font-size", "12px"),
    ("width", "100%"),
    ("text-align", "center"),
    ("margin-top", "5px"),
    ("position", "static"),
    ("z-index", "100"),
];

pub const TOOLTIP_CLASS: &str = "tooltip";

/// Transient error message anchored after a field group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub message: String,
    pub anchor: FieldId,
    pub class: &'static str,
    pub style: InlineStyle,
}

impl Tooltip {
    pub fn new(message: impl Into<String>, anchor: FieldId) -> Self {
        Self {
            message: message.into(),
            anchor,
            class: TOOLTIP_CLASS,
            style: TOOLTIP_STYLE,
        }
    }
}

/// Label and enabled state of the submit trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

impl SubmitButton {
    pub fn working(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: true,
        }
    }
}

/// Static layout that replaces the form container once the account exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessView {
    pub icon_class: &'static str,
    pub heading: &'static str,
    pub message: &'static str,
    pub button_label: &'static str,
    pub login_href: String,
}

impl SuccessView {
    pub fn new(login_href: impl Into<String>) -> Self {
        Self {
            icon_class: "fa-solid fa-check-circle",
            heading: "Account Created Successfully!",
            message: "Welcome aboard! Your account has been created.",
            button_label: "Go to Login",
            login_href: login_href.into(),
        }
    }
}

/// Current contents of the form.
///
/// Password values are kept as [`SecretString`] so they never end up in
/// `Debug` output or logs.
#[derive(Debug)]
pub struct UiState {
    email: String,
    password: SecretString,
    confirmation: SecretString,
    visibility: [InputKind; 2],
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: SecretString::new(String::new().into()),
            confirmation: SecretString::new(String::new().into()),
            visibility: [InputKind::Masked; 2],
        }
    }

    /// Builds a state with all three fields already filled in.
    pub fn with_values(email: &str, password: &str, confirmation: &str) -> Self {
        let mut state = Self::new();
        state.set_value(FieldId::Email, email);
        state.set_value(FieldId::Password, password);
        state.set_value(FieldId::Confirmation, confirmation);
        state
    }

    pub fn set_value(&mut self, field: FieldId, value: &str) {
        match field {
            FieldId::Email => self.email = value.to_string(),
            FieldId::Password => self.password = SecretString::new(value.to_string().into()),
            FieldId::Confirmation => {
                self.confirmation = SecretString::new(value.to_string().into())
            }
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn confirmation(&self) -> &SecretString {
        &self.confirmation
    }

    pub fn has_confirmation(&self) -> bool {
        !self.confirmation.expose_secret().is_empty()
    }

    pub fn visibility(&self, field: PasswordField) -> InputKind {
        self.visibility[field.index()]
    }

    /// Flips masked/plain rendering of one password field and returns the new kind.
    pub fn toggle_visibility(&mut self, field: PasswordField) -> InputKind {
        let slot = &mut self.visibility[field.index()];
        *slot = slot.toggled();
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_for_verdict() {
        assert_eq!(FieldStyle::for_verdict(true).border_color, "#84c7a8");
        assert_eq!(FieldStyle::for_verdict(false).border_color, "#FF6B6B");
    }

    #[test]
    fn test_toggle_visibility_is_per_field() {
        let mut state = UiState::new();
        assert_eq!(state.toggle_visibility(PasswordField::Primary), InputKind::Plain);
        assert_eq!(state.visibility(PasswordField::Confirmation), InputKind::Masked);
        assert_eq!(state.toggle_visibility(PasswordField::Primary), InputKind::Masked);
    }

    #[test]
    fn test_input_kind_icons() {
        assert_eq!(InputKind::Masked.icon().class_name(), "fa-solid fa-eye-slash");
        assert_eq!(InputKind::Plain.icon().class_name(), "fa-solid fa-eye");
        assert_eq!(InputKind::Plain.input_type(), "text");
    }

    #[test]
    fn test_debug_hides_passwords() {
        let state = UiState::with_values("a@b.com", "Secret1!x", "Secret1!x");
        let rendered = format!("{:?}", state);
        assert!(rendered.contains("a@b.com"));
        assert!(!rendered.contains("Secret1!x"));
    }

    #[test]
    fn test_has_confirmation() {
        let mut state = UiState::new();
        assert!(!state.has_confirmation());
        state.set_value(FieldId::Confirmation, "x");
        assert!(state.has_confirmation());
    }
}
