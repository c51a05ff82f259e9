//! Account-creation form validation library
//!
//! This library drives the client side of a signup form: live validation of
//! an email and a password pair, inline field styling, a single dismissible
//! error tooltip on submit, password visibility toggles, a four-segment
//! strength meter and a simulated account creation.
//!
//! Rendering is delegated to a [`Host`] implementation. [`MemoryHost`] keeps
//! the form in memory and is what the tests run against.
//!
//! # Features
//!
//! - `async` (default): Enables [`FormController`] and its timers
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `SIGNUP_TOOLTIP_DISMISS_MS`: tooltip lifetime (default: 3000)
//! - `SIGNUP_SUBMIT_DELAY_MS`: simulated submit time (default: 1500)
//! - `SIGNUP_LOGIN_HREF`: login destination of the success view (default: `#`)
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use signup_form::{FieldId, FormConfig, FormController, MemoryHost, SubmitOutcome};
//!
//! let form = FormController::bind(MemoryHost::new(), FormConfig::from_env()?)?;
//!
//! form.handle_input(FieldId::Email, "user@example.com");
//! form.handle_input(FieldId::Password, "Abcdefg1!");
//! form.handle_input(FieldId::Confirmation, "Abcdefg1!");
//!
//! assert_eq!(form.submit(), SubmitOutcome::Accepted);
//! # Ok(())
//! # }
//! ```

// Internal modules
mod config;
mod host;
mod strength;
mod ui;
mod validators;

#[cfg(feature = "async")]
mod controller;
#[cfg(feature = "async")]
mod timer;

// Public API
pub use config::{ConfigError, FormConfig};
pub use host::{BindError, Host, MemoryHost, Node, Selector, check_required};
pub use strength::{
    METER_CLASS, METER_STYLE, MeterLayout, SEGMENT_COUNT, SEGMENT_STYLE, SegmentColor,
    StrengthCriteria, StrengthMeter, StrengthScore, strength_score,
};
pub use ui::{
    FieldId, FieldStyle, FieldValidation, InlineStyle, InputKind, PasswordField, SubmitButton, SuccessView,
    TOGGLE_ICON_STYLE, TOOLTIP_CLASS, TOOLTIP_STYLE, ToggleIcon, Tooltip, UiState,
};
pub use validators::{
    SPECIAL_CHARS, check_passwords_match, first_failure, is_valid_email, is_valid_password,
    passwords_match, validate_all, validate_email, validate_password,
};

#[cfg(feature = "async")]
pub use controller::{FormController, SubmissionState, SubmitOutcome};

#[cfg(feature = "async")]
pub use timer::DelayedTask;
