//! Form validation controller - binds the validators, tooltip, toggles and
//! strength meter to a [`Host`] and runs the submission state machine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;

use crate::config::FormConfig;
use crate::host::{BindError, Host, check_required};
use crate::strength::{MeterLayout, StrengthMeter, StrengthScore, strength_score};
use crate::timer::DelayedTask;
use crate::ui::{
    FieldId, FieldValidation, InputKind, PasswordField, SubmitButton, SuccessView,
    TOGGLE_ICON_STYLE, Tooltip, UiState,
};
use crate::validators::{
    check_passwords_match, first_failure, validate_all, validate_email, validate_password,
};

/// Lifecycle of the simulated account creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    /// Terminal: the form has been replaced by the success view.
    Succeeded,
}

/// What a submit click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field failed; a tooltip was shown for it and the form stays idle.
    Rejected(FieldId),
    /// All fields passed; the success view follows after the submit delay.
    Accepted,
    /// The form was not idle.
    Ignored,
}

struct Inner<H> {
    host: H,
    ui: UiState,
    submission: SubmissionState,
    tooltip_timer: Option<DelayedTask>,
    tooltip_generation: u64,
    success_timer: Option<DelayedTask>,
}

impl<H: Host> Inner<H> {
    /// Whether the form is still on screen. Once the success view is shown
    /// nothing else is written to the host.
    fn is_live(&self) -> bool {
        self.submission != SubmissionState::Succeeded
    }

    fn apply(&mut self, validation: FieldValidation) -> bool {
        if self.is_live() {
            self.host.set_field_style(validation.field, validation.style);
        }
        validation.valid
    }

    fn clear_tooltip(&mut self) {
        if let Some(timer) = self.tooltip_timer.take() {
            timer.cancel();
        }
        if self.host.remove_tooltip() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Tooltip removed");
        }
    }

    fn complete_submission(&mut self, view: &SuccessView) {
        if self.submission != SubmissionState::Submitting {
            return;
        }
        self.clear_tooltip();
        self.host.show_success(view);
        self.submission = SubmissionState::Succeeded;

        #[cfg(feature = "tracing")]
        tracing::info!("Account creation simulated, success view shown");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Controller for the account-creation form.
///
/// Event handlers take `&self`; the form state sits behind one mutex shared
/// with the two timers (tooltip dismissal and simulated submission).
pub struct FormController<H: Host> {
    inner: Arc<Mutex<Inner<H>>>,
    config: FormConfig,
    runtime: Handle,
}

impl<H: Host + Send + 'static> FormController<H> {
    /// Binds to `host`, injecting the visibility toggles and the strength meter.
    ///
    /// # Errors
    ///
    /// - [`BindError::MissingElement`] if the markup lacks a required element
    /// - [`BindError::NoRuntime`] if called outside a Tokio runtime
    ///
    /// Nothing is written to the host when binding fails.
    pub fn bind(mut host: H, config: FormConfig) -> Result<Self, BindError> {
        if let Err(e) = check_required(&host) {
            #[cfg(feature = "tracing")]
            tracing::error!("Form binding FAILED: {}", e);
            return Err(e);
        }
        let runtime = Handle::try_current().map_err(|_| BindError::NoRuntime)?;

        for field in PasswordField::ALL {
            host.install_toggle(field, InputKind::Masked.icon(), TOGGLE_ICON_STYLE);
        }
        host.install_strength_meter(&StrengthMeter::neutral(), &MeterLayout::DEFAULT);

        #[cfg(feature = "tracing")]
        tracing::info!("Form controller bound");

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                host,
                ui: UiState::new(),
                submission: SubmissionState::Idle,
                tooltip_timer: None,
                tooltip_generation: 0,
                success_timer: None,
            })),
            config,
            runtime,
        })
    }

    /// Handles an input event on `field` carrying its new `value`.
    ///
    /// Returns the verdict of the edited field. Editing the password also
    /// repaints the strength meter and, if the confirmation is filled in,
    /// revalidates the match.
    pub fn handle_input(&self, field: FieldId, value: &str) -> bool {
        let mut inner = lock(&self.inner);
        inner.ui.set_value(field, value);

        match field {
            FieldId::Email => {
                let validation = validate_email(&inner.ui);
                inner.apply(validation)
            }
            FieldId::Password => {
                let validation = validate_password(&inner.ui);
                let valid = inner.apply(validation);
                if inner.is_live() {
                    let meter = StrengthMeter::for_score(strength_score(inner.ui.password()));
                    inner.host.paint_strength_meter(&meter);
                }
                if inner.ui.has_confirmation() {
                    let validation = check_passwords_match(&inner.ui);
                    inner.apply(validation);
                }
                valid
            }
            FieldId::Confirmation => {
                let validation = check_passwords_match(&inner.ui);
                inner.apply(validation)
            }
        }
    }

    /// Revalidates the email field and restyles it.
    pub fn validate_email(&self) -> bool {
        let mut inner = lock(&self.inner);
        let validation = validate_email(&inner.ui);
        inner.apply(validation)
    }

    /// Revalidates the password field and restyles it.
    pub fn validate_password(&self) -> bool {
        let mut inner = lock(&self.inner);
        let validation = validate_password(&inner.ui);
        inner.apply(validation)
    }

    /// Revalidates the confirmation against the password and restyles it.
    pub fn check_passwords_match(&self) -> bool {
        let mut inner = lock(&self.inner);
        let validation = check_passwords_match(&inner.ui);
        inner.apply(validation)
    }

    /// Current strength score of the password field.
    pub fn password_strength(&self) -> StrengthScore {
        strength_score(lock(&self.inner).ui.password())
    }

    /// Handles a click on a password field's toggle icon.
    ///
    /// Returns the field's rendering after the click; unchanged once the
    /// success view has replaced the form.
    pub fn toggle_visibility(&self, field: PasswordField) -> InputKind {
        let mut inner = lock(&self.inner);
        if !inner.is_live() {
            return inner.ui.visibility(field);
        }
        let kind = inner.ui.toggle_visibility(field);
        inner.host.set_visibility(field, kind, kind.icon());
        kind
    }

    /// Shows `message` after the group of `anchor`, replacing any current tooltip.
    ///
    /// The tooltip removes itself after the configured dismissal delay unless
    /// a newer tooltip or [`remove_tooltip`](Self::remove_tooltip) gets there first.
    pub fn show_tooltip(&self, message: impl Into<String>, anchor: FieldId) {
        let mut inner = lock(&self.inner);
        self.show_tooltip_locked(&mut inner, Tooltip::new(message, anchor));
    }

    /// Removes the current tooltip, if any.
    pub fn remove_tooltip(&self) {
        lock(&self.inner).clear_tooltip();
    }

    fn show_tooltip_locked(&self, inner: &mut Inner<H>, tooltip: Tooltip) {
        if !inner.is_live() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Tooltip dropped, form already replaced: {}", tooltip.message);
            return;
        }
        inner.clear_tooltip();
        inner.host.insert_tooltip(&tooltip);

        #[cfg(feature = "tracing")]
        tracing::debug!("Tooltip shown on {:?}: {}", tooltip.anchor, tooltip.message);

        inner.tooltip_generation += 1;
        let generation = inner.tooltip_generation;
        let shared = Arc::downgrade(&self.inner);

        inner.tooltip_timer = Some(DelayedTask::schedule(
            &self.runtime,
            self.config.tooltip_dismiss,
            move || {
                if let Some(shared) = shared.upgrade() {
                    let mut inner = lock(&shared);
                    if inner.tooltip_generation == generation {
                        inner.clear_tooltip();
                    }
                }
            },
        ));
    }

    /// Handles a click on the submit button.
    ///
    /// All three validators run and restyle their fields. The first failure
    /// in the order email, password, match gets the only tooltip. When every
    /// field passes, the button switches to its working state and the success
    /// view replaces the form after the submit delay.
    pub fn submit(&self) -> SubmitOutcome {
        let mut inner = lock(&self.inner);
        if inner.submission != SubmissionState::Idle {
            #[cfg(feature = "tracing")]
            tracing::debug!("Submit ignored in state {:?}", inner.submission);
            return SubmitOutcome::Ignored;
        }

        inner.clear_tooltip();

        let results = validate_all(&inner.ui);
        for result in results {
            inner.apply(result);
        }

        if let Some(failed) = first_failure(&results) {
            let field = failed.field;
            #[cfg(feature = "tracing")]
            tracing::info!("Submit rejected: {:?} is invalid", field);
            self.show_tooltip_locked(&mut inner, Tooltip::new(field.failure_message(), field));
            return SubmitOutcome::Rejected(field);
        }

        inner
            .host
            .set_submit_button(&SubmitButton::working(self.config.working_label.as_str()));
        inner.submission = SubmissionState::Submitting;

        #[cfg(feature = "tracing")]
        tracing::info!("Submit accepted, creating account");

        let view = SuccessView::new(self.config.login_href.as_str());
        let shared = Arc::downgrade(&self.inner);
        inner.success_timer = Some(DelayedTask::schedule(
            &self.runtime,
            self.config.submit_delay,
            move || {
                if let Some(shared) = shared.upgrade() {
                    lock(&shared).complete_submission(&view);
                }
            },
        ));

        SubmitOutcome::Accepted
    }

    pub fn submission_state(&self) -> SubmissionState {
        lock(&self.inner).submission
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Runs `f` against the bound host.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&lock(&self.inner).host)
    }
}

impl<H: Host> Drop for FormController<H> {
    fn drop(&mut self) {
        let mut inner = lock(&self.inner);
        for timer in [inner.tooltip_timer.take(), inner.success_timer.take()]
            .into_iter()
            .flatten()
        {
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryHost, Selector};
    use crate::strength::SegmentColor;
    use crate::ui::{FieldStyle, ToggleIcon};
    use std::time::Duration;

    const VALID_EMAIL: &str = "a@b.com";
    const VALID_PASSWORD: &str = "Abcdefg1!";

    fn bind() -> FormController<MemoryHost> {
        FormController::bind(MemoryHost::new(), FormConfig::default()).expect("bind should succeed")
    }

    fn fill(form: &FormController<MemoryHost>, email: &str, password: &str, confirmation: &str) {
        form.handle_input(FieldId::Email, email);
        form.handle_input(FieldId::Password, password);
        form.handle_input(FieldId::Confirmation, confirmation);
    }

    async fn advance_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_bind_installs_toggles_and_meter() {
        let form = bind();
        form.with_host(|host| {
            for field in PasswordField::ALL {
                assert_eq!(host.toggle(field), Some((InputKind::Masked, ToggleIcon::EyeSlash)));
            }
            assert_eq!(host.strength_meter(), Some(&StrengthMeter::neutral()));
            assert_eq!(host.meter_layout(), Some(&MeterLayout::DEFAULT));
            assert_eq!(host.toggle_style(PasswordField::Confirmation), Some(TOGGLE_ICON_STYLE));
        });
        assert_eq!(form.submission_state(), SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bind_missing_element_fails() {
        let result = FormController::bind(
            MemoryHost::without(Selector::PasswordInput),
            FormConfig::default(),
        );
        assert_eq!(
            result.err(),
            Some(BindError::MissingElement(Selector::PasswordInput))
        );
    }

    #[test]
    fn test_bind_outside_runtime_fails() {
        let result = FormController::bind(MemoryHost::new(), FormConfig::default());
        assert_eq!(result.err(), Some(BindError::NoRuntime));
    }

    #[tokio::test(start_paused = true)]
    async fn test_email_input_styles_field() {
        let form = bind();
        assert!(!form.handle_input(FieldId::Email, "a@b"));
        assert_eq!(form.with_host(|h| h.style(FieldId::Email)), Some(FieldStyle::INVALID));

        assert!(form.handle_input(FieldId::Email, VALID_EMAIL));
        assert_eq!(form.with_host(|h| h.style(FieldId::Email)), Some(FieldStyle::VALID));
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_input_paints_meter() {
        let form = bind();
        form.handle_input(FieldId::Password, "aaaaaaaa");
        let meter = form.with_host(|h| h.strength_meter().copied());
        assert_eq!(meter.map(|m| m.filled()), Some(1));
        assert_eq!(meter.map(|m| m.segments()[0]), Some(SegmentColor::Weak));

        form.handle_input(FieldId::Password, "Aaaaaaa1!");
        let meter = form.with_host(|h| h.strength_meter().copied());
        assert_eq!(meter.map(|m| m.filled()), Some(4));
        assert_eq!(form.password_strength(), StrengthScore::MAX);

        form.handle_input(FieldId::Password, "");
        let meter = form.with_host(|h| h.strength_meter().copied());
        assert_eq!(meter, Some(StrengthMeter::neutral()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_edit_rechecks_filled_confirmation() {
        let form = bind();
        form.handle_input(FieldId::Password, VALID_PASSWORD);
        assert_eq!(form.with_host(|h| h.style(FieldId::Confirmation)), None);

        form.handle_input(FieldId::Confirmation, VALID_PASSWORD);
        assert_eq!(
            form.with_host(|h| h.style(FieldId::Confirmation)),
            Some(FieldStyle::VALID)
        );

        form.handle_input(FieldId::Password, "Abcdefg1!x");
        assert_eq!(
            form.with_host(|h| h.style(FieldId::Confirmation)),
            Some(FieldStyle::INVALID)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggles_are_independent() {
        let form = bind();
        assert_eq!(form.toggle_visibility(PasswordField::Primary), InputKind::Plain);
        form.with_host(|h| {
            assert_eq!(
                h.toggle(PasswordField::Primary),
                Some((InputKind::Plain, ToggleIcon::Eye))
            );
            assert_eq!(
                h.toggle(PasswordField::Confirmation),
                Some((InputKind::Masked, ToggleIcon::EyeSlash))
            );
        });
        assert_eq!(form.toggle_visibility(PasswordField::Primary), InputKind::Masked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tooltip_singleton() {
        let form = bind();
        form.show_tooltip("first", FieldId::Email);
        form.show_tooltip("second", FieldId::Confirmation);

        form.with_host(|h| {
            let tooltips = h.tooltips();
            assert_eq!(tooltips.len(), 1);
            assert_eq!(tooltips[0].message, "second");
            assert_eq!(tooltips[0].anchor, FieldId::Confirmation);
            assert_eq!(tooltips[0].class, "tooltip");
            assert!(tooltips[0].style.contains(&("background-color", "#FF6B6B")));
            assert!(tooltips[0].style.contains(&("z-index", "100")));
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_tooltip_auto_dismiss() {
        let form = bind();
        form.show_tooltip("gone soon", FieldId::Email);

        advance_ms(2999).await;
        assert!(form.with_host(|h| h.tooltip().is_some()));

        advance_ms(2).await;
        assert!(form.with_host(|h| h.tooltip().is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replaced_tooltip_timer_does_not_remove_newer() {
        let form = bind();
        form.show_tooltip("old", FieldId::Email);
        advance_ms(2000).await;
        form.show_tooltip("new", FieldId::Password);

        advance_ms(1500).await;
        let message = form.with_host(|h| h.tooltip().map(|t| t.message.clone()));
        assert_eq!(message.as_deref(), Some("new"));

        advance_ms(1501).await;
        assert!(form.with_host(|h| h.tooltip().is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_tooltip_idempotent() {
        let form = bind();
        form.remove_tooltip();
        form.show_tooltip("msg", FieldId::Email);
        form.remove_tooltip();
        form.remove_tooltip();
        assert!(form.with_host(|h| h.tooltips().is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_invalid_email_styles_all_fields() {
        let form = bind();
        let outcome = form.submit();
        assert_eq!(outcome, SubmitOutcome::Rejected(FieldId::Email));

        form.with_host(|h| {
            for field in [FieldId::Email, FieldId::Password, FieldId::Confirmation] {
                assert_eq!(h.style(field), Some(FieldStyle::INVALID));
            }
            let tooltips = h.tooltips();
            assert_eq!(tooltips.len(), 1);
            assert_eq!(tooltips[0].message, "Please enter a valid email address");
            assert_eq!(tooltips[0].anchor, FieldId::Email);
        });
        assert_eq!(form.submission_state(), SubmissionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_priority_order() {
        let form = bind();
        fill(&form, VALID_EMAIL, "weak", "weak");
        assert_eq!(form.submit(), SubmitOutcome::Rejected(FieldId::Password));
        assert_eq!(
            form.with_host(|h| h.tooltip().map(|t| t.anchor)),
            Some(FieldId::Password)
        );

        fill(&form, VALID_EMAIL, VALID_PASSWORD, "Abcdefg1@");
        assert_eq!(form.submit(), SubmitOutcome::Rejected(FieldId::Confirmation));
        form.with_host(|h| {
            assert_eq!(h.tooltips().len(), 1);
            assert_eq!(
                h.tooltip().map(|t| t.message.as_str()),
                Some("Passwords do not match")
            );
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_success_end_to_end() {
        let form = bind();
        fill(&form, VALID_EMAIL, VALID_PASSWORD, VALID_PASSWORD);
        form.show_tooltip("stale", FieldId::Email);

        assert_eq!(form.submit(), SubmitOutcome::Accepted);
        assert_eq!(form.submission_state(), SubmissionState::Submitting);
        form.with_host(|h| {
            assert!(h.tooltips().is_empty());
            assert_eq!(
                h.submit_button(),
                Some(&SubmitButton {
                    label: "Creating account...".to_string(),
                    disabled: true,
                })
            );
            assert!(h.success_view().is_none());
        });

        advance_ms(1499).await;
        assert!(form.with_host(|h| h.success_view().is_none()));

        advance_ms(2).await;
        assert_eq!(form.submission_state(), SubmissionState::Succeeded);
        form.with_host(|h| {
            assert_eq!(h.success_renders(), 1);
            let view = h.success_view().expect("success view shown");
            assert_eq!(view.heading, "Account Created Successfully!");
            assert_eq!(view.button_label, "Go to Login");
            assert_eq!(view.login_href, "#");
        });

        advance_ms(5000).await;
        assert_eq!(form.with_host(|h| h.success_renders()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_view_is_final() {
        let form = bind();
        fill(&form, VALID_EMAIL, VALID_PASSWORD, VALID_PASSWORD);
        assert_eq!(form.submit(), SubmitOutcome::Accepted);
        advance_ms(1600).await;
        assert_eq!(form.submission_state(), SubmissionState::Succeeded);

        form.show_tooltip("late", FieldId::Email);
        assert_eq!(form.toggle_visibility(PasswordField::Primary), InputKind::Masked);
        form.handle_input(FieldId::Password, "Aaaaaaa1!");
        form.handle_input(FieldId::Email, "nope");

        form.with_host(|h| {
            assert_eq!(h.nodes().len(), 1);
            assert!(h.success_view().is_some());
            assert!(h.tooltips().is_empty());
            assert_eq!(h.toggle(PasswordField::Primary), None);
            assert!(h.strength_meter().is_none());
            assert_eq!(h.style(FieldId::Email), None);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_ignored_once_accepted() {
        let form = bind();
        fill(&form, VALID_EMAIL, VALID_PASSWORD, VALID_PASSWORD);
        assert_eq!(form.submit(), SubmitOutcome::Accepted);
        assert_eq!(form.submit(), SubmitOutcome::Ignored);

        advance_ms(1600).await;
        assert_eq!(form.submit(), SubmitOutcome::Ignored);
        assert_eq!(form.with_host(|h| h.success_renders()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_submit_can_be_retried() {
        let form = bind();
        fill(&form, "bad", VALID_PASSWORD, VALID_PASSWORD);
        assert_eq!(form.submit(), SubmitOutcome::Rejected(FieldId::Email));

        form.handle_input(FieldId::Email, VALID_EMAIL);
        assert_eq!(form.submit(), SubmitOutcome::Accepted);
        assert!(form.with_host(|h| h.tooltips().is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_config_timings() {
        let config = FormConfig {
            tooltip_dismiss: Duration::from_millis(100),
            submit_delay: Duration::from_millis(10),
            login_href: "/login".to_string(),
            ..FormConfig::default()
        };
        let form = FormController::bind(MemoryHost::new(), config).expect("bind should succeed");

        form.show_tooltip("short", FieldId::Email);
        advance_ms(101).await;
        assert!(form.with_host(|h| h.tooltip().is_none()));

        fill(&form, VALID_EMAIL, VALID_PASSWORD, VALID_PASSWORD);
        form.submit();
        advance_ms(11).await;
        let href = form.with_host(|h| h.success_view().map(|v| v.login_href.clone()));
        assert_eq!(href.as_deref(), Some("/login"));
    }
}
