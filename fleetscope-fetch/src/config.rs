//! API configuration read from the environment.

use std::fmt;
use std::time::Duration;

use fleetscope_core::CoreError;
use tracing::debug;
use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// Environment variable holding the service username.
pub const USERNAME_ENV: &str = "GPS_USERNAME";

/// Environment variable holding the service password.
pub const PASSWORD_ENV: &str = "GPS_PASSWORD";

/// Optional override of the API base URL.
pub const BASE_URL_ENV: &str = "GPS_API_BASE_URL";

/// Optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "GPS_TIMEOUT_SECS";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://portal.gps.id/backend/seen/public";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Credentials
// ============================================================================

/// The shared service account used for every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Login password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// API Config
// ============================================================================

/// Everything needed to talk to the upstream API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: Url,
    /// Service account.
    pub credentials: Credentials,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a config for the default base URL.
    ///
    /// # Panics
    ///
    /// Never in practice: [`DEFAULT_BASE_URL`] is a constant valid URL.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the credentials are missing or
    /// an optional setting cannot be parsed.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| CoreError::InvalidConfig(format!("{key} is not set")))
        };

        let mut config = Self::new(Credentials::new(
            required(USERNAME_ENV)?,
            required(PASSWORD_ENV)?,
        ));

        if let Some(raw) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = Url::parse(raw.trim())
                .map_err(|e| CoreError::InvalidConfig(format!("{BASE_URL_ENV}: {e}")))?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    CoreError::InvalidConfig(format!(
                        "{TIMEOUT_ENV} must be a positive number of seconds, got '{raw}'"
                    ))
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        debug!(base_url = %config.base_url, timeout = ?config.timeout, "Loaded API config");
        Ok(config)
    }

    /// Host name of the API, used for the HTTP domain allowlist.
    pub fn host(&self) -> Option<&str> {
        self.base_url.host_str()
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
