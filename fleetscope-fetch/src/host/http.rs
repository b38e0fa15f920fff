//! HTTP client with tracing and domain allowlist.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - Domain allowlist so credentials only go to the configured API host
//! - Bearer-authenticated GET and JSON POST helpers

use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for FleetScope.
const USER_AGENT: &str = concat!("FleetScope/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialised.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains and their subdomains.
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request with a bearer token.
    #[instrument(skip(self, token), fields(url = %url))]
    pub async fn get_with_bearer(&self, url: &str, token: &str) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("GET request with bearer auth");

        let response = self.inner.get(url).bearer_auth(token).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with JSON body.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("POST request with JSON");

        let response = self.inner.post(url).json(body).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with JSON body and a bearer token.
    #[instrument(skip(self, body, token), fields(url = %url))]
    pub async fn post_json_with_bearer<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        token: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("POST request with JSON and bearer auth");

        let response = self
            .inner
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_allowlist() {
        let client = HttpClient::new()
            .unwrap()
            .with_allowed_domains(vec!["portal.gps.id".to_string()]);

        assert!(client
            .is_domain_allowed("https://portal.gps.id/backend/seen/public/login")
            .is_ok());
        assert!(client.is_domain_allowed("https://api.portal.gps.id/x").is_ok());
        assert!(client.is_domain_allowed("https://evil.com/steal").is_err());
        assert!(client.is_domain_allowed("https://notportal.gps.id.evil.com").is_err());
    }

    #[test]
    fn test_no_domain_restrictions() {
        let client = HttpClient::new().unwrap();
        assert!(client.is_domain_allowed("https://any.domain.com").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::new()
            .unwrap()
            .with_allowed_domains(vec!["portal.gps.id".to_string()]);

        assert!(matches!(
            client.is_domain_allowed("not-a-valid-url"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_disallowed_domain_never_sends() {
        let client = HttpClient::new()
            .unwrap()
            .with_allowed_domains(vec!["portal.gps.id".to_string()]);

        let result = client.get_with_bearer("https://evil.com/vehicle", "tok").await;
        assert!(matches!(result, Err(HttpError::DomainNotAllowed(host)) if host == "evil.com"));
    }
}
