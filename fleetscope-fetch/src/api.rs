//! Upstream GPS API client.
//!
//! [`FleetApi`] covers the four endpoints this client uses. Each call is a
//! single attempt; failures come back as [`FetchError`]s.

use async_trait::async_trait;
use fleetscope_core::{CoreError, DateWindow, MileageRecord, Vehicle, VehicleDetail};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::{ApiConfig, Credentials};
use crate::error::FetchError;
use crate::host::http::HttpClient;
use crate::parser;

// ============================================================================
// Constants
// ============================================================================

/// Login endpoint.
const LOGIN_ENDPOINT: &str = "/login";

/// Vehicle list endpoint.
const VEHICLE_ENDPOINT: &str = "/vehicle";

/// Vehicle detail endpoint, followed by `/{imei}`.
const VEHICLE_DETAIL_ENDPOINT: &str = "/vehicle/detail";

/// Mileage endpoint. Accepts at most seven days per request.
const MILEAGE_ENDPOINT: &str = "/data/mileage";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct MileageRequest<'a> {
    imei: &'a str,
    start_date: String,
    end_date: String,
}

// ============================================================================
// Fleet API Trait
// ============================================================================

/// The upstream endpoints used by FleetScope.
#[async_trait]
pub trait FleetApi: Send + Sync {
    /// Logs in and returns a fresh token string.
    async fn login(&self, credentials: &Credentials) -> Result<String, FetchError>;

    /// Lists all vehicles visible to the service account.
    async fn vehicles(&self, token: &str) -> Result<Vec<Vehicle>, FetchError>;

    /// Fetches the detail object for one vehicle.
    async fn vehicle_detail(
        &self,
        token: &str,
        imei: &str,
    ) -> Result<Option<VehicleDetail>, FetchError>;

    /// Fetches mileage records for a single window of at most seven days.
    async fn mileage(
        &self,
        token: &str,
        imei: &str,
        window: &DateWindow,
    ) -> Result<Vec<MileageRecord>, FetchError>;
}

// ============================================================================
// API Client
// ============================================================================

/// [`FleetApi`] implementation talking to the real service.
#[derive(Debug, Clone)]
pub struct GpsApiClient {
    http: HttpClient,
    config: ApiConfig,
}

impl GpsApiClient {
    /// Creates a client restricted to the configured API host.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let mut http = HttpClient::with_timeout(config.timeout)?;
        if let Some(host) = config.host() {
            http = http.with_allowed_domains(vec![host.to_string()]);
        }
        Ok(Self { http, config })
    }

    fn url(&self, endpoint: &str) -> String {
        self.config.endpoint_url(endpoint)
    }

    fn detail_url(&self, imei: &str) -> Result<String, FetchError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CoreError::InvalidConfig(format!(
                    "base URL cannot take a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(VEHICLE_DETAIL_ENDPOINT.trim_start_matches('/').split('/'))
            .push(imei);
        Ok(url.into())
    }

    /// Sends an authenticated GET and reads the body.
    async fn get_body(&self, endpoint: &str, url: &str, token: &str) -> Result<String, FetchError> {
        let response = self.http.get_with_bearer(url, token).await?;
        Self::read_body(endpoint, response).await
    }

    /// Checks the status and reads the body.
    async fn read_body(endpoint: &str, response: Response) -> Result<String, FetchError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(endpoint, "Request rejected as unauthorized");
            return Err(FetchError::AuthenticationFailed(format!(
                "{endpoint} rejected the credentials"
            )));
        }

        if !status.is_success() {
            warn!(endpoint, status = %status, "Unexpected status");
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl FleetApi for GpsApiClient {
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn login(&self, credentials: &Credentials) -> Result<String, FetchError> {
        debug!("Logging in");

        let body = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        };
        let response = self.http.post_json(&self.url(LOGIN_ENDPOINT), &body).await?;
        let body = Self::read_body(LOGIN_ENDPOINT, response).await?;

        parser::parse_login(&body).inspect_err(|e| warn!(error = %e, "Login response unusable"))
    }

    #[instrument(skip(self, token))]
    async fn vehicles(&self, token: &str) -> Result<Vec<Vehicle>, FetchError> {
        debug!("Fetching vehicle list");

        let vehicles = self
            .get_body(VEHICLE_ENDPOINT, &self.url(VEHICLE_ENDPOINT), token)
            .await
            .and_then(|body| parser::parse_vehicles(&body))
            .inspect_err(|e| warn!(error = %e, "Vehicle list request failed"))?;

        debug!(count = vehicles.len(), "Vehicle list received");
        Ok(vehicles)
    }

    #[instrument(skip(self, token))]
    async fn vehicle_detail(
        &self,
        token: &str,
        imei: &str,
    ) -> Result<Option<VehicleDetail>, FetchError> {
        debug!("Fetching vehicle detail");

        let url = self
            .detail_url(imei)
            .inspect_err(|e| warn!(error = %e, "Vehicle detail request failed"))?;

        self.get_body(VEHICLE_DETAIL_ENDPOINT, &url, token)
            .await
            .and_then(|body| parser::parse_detail(&body))
            .inspect_err(|e| warn!(error = %e, "Vehicle detail request failed"))
    }

    #[instrument(skip(self, token, window), fields(window = %window))]
    async fn mileage(
        &self,
        token: &str,
        imei: &str,
        window: &DateWindow,
    ) -> Result<Vec<MileageRecord>, FetchError> {
        debug!("Fetching mileage window");

        let body = MileageRequest {
            imei,
            start_date: window.start_param(),
            end_date: window.end_param(),
        };
        let response = self
            .http
            .post_json_with_bearer(&self.url(MILEAGE_ENDPOINT), token, &body)
            .await?;
        let body = Self::read_body(MILEAGE_ENDPOINT, response).await?;

        parser::parse_mileage(&body)
    }
}

// ============================================================================
// Tests
// ============================================================================
