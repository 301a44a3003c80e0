//! Environment-driven settings for the CLI and TUI.
//!
//! Every knob is optional; unset or blank variables fall back to defaults.
//! Values that are present but malformed are reported as [`ConfigError`]
//! naming the offending variable rather than being silently ignored.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use jitpages_types::PageSize;
use thiserror::Error;

/// Initial table page size (`5`, `20`, `all`, or any positive number).
pub const PAGE_SIZE_ENV: &str = "JITPAGES_PAGE_SIZE";
/// Connect timeout in seconds for page source requests.
pub const CONNECT_TIMEOUT_ENV: &str = "JITPAGES_CONNECT_TIMEOUT_SECS";
/// User-Agent sent with page source requests.
pub const USER_AGENT_ENV: &str = "JITPAGES_USER_AGENT";
/// When truthy, start with an empty page list.
pub const NO_SEED_ENV: &str = "JITPAGES_NO_SEED";
/// File receiving logs while the TUI owns the terminal.
pub const LOG_FILE_ENV: &str = "JITPAGES_LOG_FILE";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILE_NAME: &str = "jitpages.log";

/// Error surfaced when an environment variable holds an unusable value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Transport settings for [`crate::http::JsonHttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub http: HttpSettings,
    pub initial_page_size: PageSize,
    pub seed_pages: bool,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http: HttpSettings::default(),
            initial_page_size: PageSize::default(),
            seed_pages: true,
            log_file: env::temp_dir().join(DEFAULT_LOG_FILE_NAME),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());
        let mut settings = Settings::default();

        if let Some(raw) = read(PAGE_SIZE_ENV) {
            settings.initial_page_size = raw.parse().map_err(|error: jitpages_types::ParsePageSizeError| ConfigError::Invalid {
                var: PAGE_SIZE_ENV,
                message: error.to_string(),
            })?;
        }

        if let Some(raw) = read(CONNECT_TIMEOUT_ENV) {
            let seconds = raw.parse::<u64>().map_err(|error| ConfigError::Invalid {
                var: CONNECT_TIMEOUT_ENV,
                message: format!("'{raw}' is not a number of seconds ({error})"),
            })?;
            settings.http.connect_timeout = Duration::from_secs(seconds);
        }

        if let Some(user_agent) = read(USER_AGENT_ENV) {
            settings.http.user_agent = user_agent;
        }

        if let Some(raw) = read(NO_SEED_ENV) {
            settings.seed_pages = !is_truthy(&raw);
        }

        if let Some(path) = read(LOG_FILE_ENV) {
            settings.log_file = PathBuf::from(path);
        }

        Ok(settings)
    }
}

fn default_user_agent() -> String {
    format!("jitpages/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS)
}

/// Flag semantics shared by boolean environment variables.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}
