//! Bearer token cache.
//!
//! The provider owns one cached [`CredentialToken`]. A caller gets the cached
//! token while it is valid; once it has expired (or was never fetched) the
//! next caller logs in again. The lock is held across the login, so callers
//! racing on an expired token trigger a single login between them.

use std::sync::Arc;

use fleetscope_core::CredentialToken;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::api::FleetApi;
use crate::config::Credentials;
use crate::error::FetchError;
use crate::host::clock::{Clock, SystemClock};

/// Hands out a valid bearer token, logging in only when needed.
pub struct TokenProvider {
    api: Arc<dyn FleetApi>,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
    cache: Mutex<Option<CredentialToken>>,
}

impl TokenProvider {
    /// Creates a provider using the system clock.
    pub fn new(api: Arc<dyn FleetApi>, credentials: Credentials) -> Self {
        Self {
            api,
            credentials,
            clock: Arc::new(SystemClock),
            cache: Mutex::new(None),
        }
    }

    /// Replaces the clock used to judge expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns a valid token, logging in if the cached one is missing or
    /// expired.
    ///
    /// On failure the cache is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the login error: transport failure, rejected credentials, or a
    /// response without a token.
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> Result<CredentialToken, FetchError> {
        let mut cache = self.cache.lock().await;
        let now = self.clock.now();

        if let Some(token) = cache.as_ref().filter(|token| token.is_valid_at(now)) {
            debug!(expires_at = %token.expires_at, "Using cached token");
            return Ok(token.clone());
        }

        debug!("No valid token cached, logging in");
        let value = self
            .api
            .login(&self.credentials)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to obtain token"))?;

        let token = CredentialToken::issued_at(value, now);
        debug!(expires_at = %token.expires_at, "Cached new token");
        *cache = Some(token.clone());
        Ok(token)
    }

    /// Returns the cached token if it is still valid, without logging in.
    pub async fn cached_token(&self) -> Option<CredentialToken> {
        let now = self.clock.now();
        self.cache
            .lock()
            .await
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .cloned()
    }

    /// Drops the cached token so the next call logs in again.
    pub async fn clear(&self) {
        *self.cache.lock().await = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
