//! Token-aware facade over the upstream API.
//!
//! Front ends call [`FleetService`] with plain parameters. Each operation
//! obtains a valid token from the [`TokenProvider`] first, so callers never
//! handle tokens themselves.

use std::sync::Arc;

use fleetscope_core::{CredentialToken, MileageReport, Vehicle, VehicleDetail};
use tracing::{debug, instrument};

use crate::api::{FleetApi, GpsApiClient};
use crate::auth::TokenProvider;
use crate::config::{ApiConfig, Credentials};
use crate::error::FetchError;
use crate::host::clock::Clock;
use crate::mileage::MileageRangeFetcher;

/// Entry point for front ends.
pub struct FleetService {
    api: Arc<dyn FleetApi>,
    tokens: TokenProvider,
    mileage: MileageRangeFetcher,
}

impl FleetService {
    /// Creates a service over any [`FleetApi`] implementation.
    pub fn new(api: Arc<dyn FleetApi>, credentials: Credentials) -> Self {
        Self {
            tokens: TokenProvider::new(api.clone(), credentials),
            mileage: MileageRangeFetcher::new(api.clone()),
            api,
        }
    }

    /// Creates a service talking to the real API.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn from_config(config: ApiConfig) -> Result<Self, FetchError> {
        let credentials = config.credentials.clone();
        let api = GpsApiClient::new(config)?;
        Ok(Self::new(Arc::new(api), credentials))
    }

    /// Replaces the clock used for token expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.tokens = self.tokens.with_clock(clock);
        self
    }

    /// Returns a valid token, logging in if needed.
    ///
    /// # Errors
    ///
    /// See [`TokenProvider::get_token`].
    pub async fn token(&self) -> Result<CredentialToken, FetchError> {
        self.tokens.get_token().await
    }

    /// Lists all vehicles.
    ///
    /// # Errors
    ///
    /// Fails if no token can be obtained or the request fails.
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        let token = self.token().await?;
        self.api.vehicles(&token.value).await
    }

    /// Fetches the detail object for `imei`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Fails if no token can be obtained or the request fails.
    pub async fn vehicle_detail(&self, imei: &str) -> Result<Option<VehicleDetail>, FetchError> {
        let token = self.token().await?;
        self.api.vehicle_detail(&token.value, imei).await
    }

    /// Finds the vehicle with the given plate, ignoring case.
    ///
    /// # Errors
    ///
    /// Fails if the vehicle list cannot be fetched.
    pub async fn find_vehicle_by_plate(&self, plate: &str) -> Result<Option<Vehicle>, FetchError> {
        let vehicles = self.vehicles().await?;
        Ok(vehicles.into_iter().find(|v| v.matches_plate(plate)))
    }

    /// Looks a vehicle up by plate and returns its detail, stamped with the
    /// requested plate in upper case.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::PlateNotFound`] or [`FetchError::DetailNotFound`]
    /// when the lookup yields nothing, or the underlying request error.
    #[instrument(skip(self))]
    pub async fn detail_by_plate(&self, plate: &str) -> Result<VehicleDetail, FetchError> {
        let plate = plate.trim().to_uppercase();

        let vehicle = self
            .find_vehicle_by_plate(&plate)
            .await?
            .ok_or_else(|| FetchError::PlateNotFound(plate.clone()))?;
        let imei = vehicle
            .imei()
            .ok_or_else(|| FetchError::InvalidResponse(format!("vehicle {plate} has no IMEI")))?;
        debug!(imei = %imei, "Resolved plate");

        let detail = self
            .vehicle_detail(&imei)
            .await?
            .ok_or(FetchError::DetailNotFound(imei))?;
        Ok(detail.with_plate(plate))
    }

    /// Fetches mileage for `imei` between two `YYYY-MM-DD` dates, inclusive.
    ///
    /// # Errors
    ///
    /// Fails on malformed dates or if no token can be obtained. Failures of
    /// individual windows are recorded in the report.
    pub async fn full_mileage(
        &self,
        imei: &str,
        start: &str,
        end: &str,
    ) -> Result<MileageReport, FetchError> {
        let token = self.token().await?;
        self.mileage.fetch(&token.value, imei, start, end).await
    }
}

// ============================================================================
// Tests
// ============================================================================
