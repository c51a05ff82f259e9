//! Controller configuration
//!
//! Timings and labels, with optional overrides from the environment.

use std::time::Duration;
use thiserror::Error;

pub const TOOLTIP_DISMISS_ENV: &str = "SIGNUP_TOOLTIP_DISMISS_MS";
pub const SUBMIT_DELAY_ENV: &str = "SIGNUP_SUBMIT_DELAY_MS";
pub const LOGIN_HREF_ENV: &str = "SIGNUP_LOGIN_HREF";

const DEFAULT_TOOLTIP_DISMISS: Duration = Duration::from_millis(3000);
const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);
const DEFAULT_WORKING_LABEL: &str = "Creating account...";
const DEFAULT_LOGIN_HREF: &str = "#";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} (expected milliseconds)")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Lifetime of a tooltip before it removes itself.
    pub tooltip_dismiss: Duration,
    /// Simulated account-creation time before the success view appears.
    pub submit_delay: Duration,
    /// Submit button label while submitting.
    pub working_label: String,
    /// Destination of the success view's login button.
    pub login_href: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            tooltip_dismiss: DEFAULT_TOOLTIP_DISMISS,
            submit_delay: DEFAULT_SUBMIT_DELAY,
            working_label: DEFAULT_WORKING_LABEL.to_string(),
            login_href: DEFAULT_LOGIN_HREF.to_string(),
        }
    }
}

impl FormConfig {
    /// Builds the configuration from defaults plus environment overrides.
    ///
    /// # Environment Variables
    ///
    /// - `SIGNUP_TOOLTIP_DISMISS_MS`: tooltip lifetime (default 3000)
    /// - `SIGNUP_SUBMIT_DELAY_MS`: simulated submit time (default 1500)
    /// - `SIGNUP_LOGIN_HREF`: login destination (default `#`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a duration is not a whole
    /// number of milliseconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(delay) = duration_from_env(TOOLTIP_DISMISS_ENV)? {
            config.tooltip_dismiss = delay;
        }
        if let Some(delay) = duration_from_env(SUBMIT_DELAY_ENV)? {
            config.submit_delay = delay;
        }
        if let Ok(href) = std::env::var(LOGIN_HREF_ENV) {
            config.login_href = href;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Form config loaded: {:?}", config);

        Ok(config)
    }
}

fn duration_from_env(var: &'static str) -> Result<Option<Duration>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(None),
    }
}
