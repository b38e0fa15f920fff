//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use fleetscope_core::CredentialToken;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// Login status. The token itself is never printed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenOutput {
    pub valid: bool,
    pub expires_at: String,
    pub valid_for_seconds: i64,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the login status.
    pub fn format_token(&self, token: &CredentialToken, now: DateTime<Utc>) -> Result<String> {
        let remaining = token.remaining(now);
        self.format(&TokenOutput {
            valid: remaining.is_some(),
            expires_at: token.expires_at.to_rfc3339(),
            valid_for_seconds: remaining.map_or(0, |d| d.num_seconds()),
        })
    }
}
