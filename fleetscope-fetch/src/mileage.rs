//! Mileage retrieval over arbitrary date ranges.
//!
//! The mileage endpoint only answers for spans of up to seven days. The
//! fetcher walks the range window by window, left to right, and concatenates
//! whatever each window returns. A window that fails or comes back empty is
//! noted in the report and skipped; it never stops the remaining windows.

use std::sync::Arc;

use fleetscope_core::{DateRange, MileageReport};
use tracing::{debug, info, instrument, warn};

use crate::api::FleetApi;
use crate::error::FetchError;

/// Fetches mileage for ranges longer than a single request allows.
#[derive(Clone)]
pub struct MileageRangeFetcher {
    api: Arc<dyn FleetApi>,
}

impl MileageRangeFetcher {
    /// Creates a fetcher on top of `api`.
    pub fn new(api: Arc<dyn FleetApi>) -> Self {
        Self { api }
    }

    /// Parses `start` and `end` as `YYYY-MM-DD` and fetches the range.
    ///
    /// An inverted range (`start > end`) yields an empty report.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Core`] if either date is malformed. Failures of
    /// individual windows are recorded in the report instead.
    pub async fn fetch(
        &self,
        token: &str,
        imei: &str,
        start: &str,
        end: &str,
    ) -> Result<MileageReport, FetchError> {
        let range = DateRange::parse(start, end)
            .inspect_err(|e| warn!(error = %e, "Rejected mileage range"))?;
        Ok(self.fetch_range(token, imei, &range).await)
    }

    /// Fetches every window of `range` in chronological order.
    #[instrument(skip(self, token, range), fields(range = %range))]
    pub async fn fetch_range(&self, token: &str, imei: &str, range: &DateRange) -> MileageReport {
        let mut report = MileageReport::new(imei, *range);

        for window in range.windows() {
            let result = self.api.mileage(token, imei, &window).await;

            match &result {
                Ok(records) if records.is_empty() => {
                    warn!(window = %window, "No mileage data for window");
                }
                Ok(records) => {
                    debug!(window = %window, count = records.len(), "Mileage window fetched");
                }
                Err(e) => {
                    warn!(window = %window, error = %e, "Mileage window failed, continuing");
                }
            }

            report.push_window(window, result.map_err(|e| e.to_string()));
        }

        info!(
            windows = report.windows.len(),
            records = report.records.len(),
            failed = report.failed_windows().count(),
            "Mileage range fetched"
        );
        report
    }
}

// ============================================================================
// Tests
// ============================================================================
