//! Bearer token issued by the upstream login endpoint.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// How long a freshly issued token is trusted.
///
/// The upstream API honours tokens for 60 minutes; we stop using them five
/// minutes earlier to absorb clock skew and requests already in flight.
pub const TOKEN_LIFETIME_MINUTES: i64 = 55;

// ============================================================================
// Credential Token
// ============================================================================

/// A bearer token together with the instant it stops being valid.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialToken {
    /// The opaque token string.
    pub value: String,
    /// The token is valid strictly before this instant.
    pub expires_at: DateTime<Utc>,
}

impl CredentialToken {
    /// Creates a token with an explicit expiry.
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Creates a token issued at `issued_at` with the standard lifetime.
    pub fn issued_at(value: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self::new(value, issued_at + Duration::minutes(TOKEN_LIFETIME_MINUTES))
    }

    /// Returns true if the token may still be used at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Time left before expiry, or `None` once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.is_valid_at(now).then(|| self.expires_at - now)
    }
}

impl fmt::Debug for CredentialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
