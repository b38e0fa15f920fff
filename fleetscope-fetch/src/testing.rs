//! In-memory fakes shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fleetscope_core::{DateWindow, MileageRecord, Vehicle, VehicleDetail};
use serde_json::Value;

use crate::api::FleetApi;
use crate::config::Credentials;
use crate::error::FetchError;
use crate::host::clock::Clock;

// ============================================================================
// Log Capture
// ============================================================================

/// Collects formatted log output for assertions.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Installs a WARN-level subscriber on the current thread.
    pub(crate) fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// Clock that only moves when told to.
#[derive(Debug)]
pub(crate) struct FakeClock {
    start: DateTime<Utc>,
    now: Mutex<DateTime<Utc>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        Self {
            start,
            now: Mutex::new(start),
        }
    }
}

impl FakeClock {
    pub(crate) fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub(crate) fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ============================================================================
// Fake API
// ============================================================================

/// Scriptable [`FleetApi`] that records what it was asked.
#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    logins: AtomicUsize,
    fail_logins: AtomicUsize,
    vehicles: Vec<Vehicle>,
    details: HashMap<String, Value>,
    mileage: HashMap<NaiveDate, Vec<Value>>,
    failing_windows: HashSet<NaiveDate>,
    mileage_calls: Mutex<Vec<DateWindow>>,
    tokens_seen: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(crate) fn with_vehicles(mut self, vehicles: Vec<Value>) -> Self {
        self.vehicles = vehicles
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect();
        self
    }

    pub(crate) fn with_detail(mut self, imei: &str, detail: Value) -> Self {
        self.details.insert(imei.to_string(), detail);
        self
    }

    /// Records returned for the window starting on `start`.
    pub(crate) fn with_mileage(mut self, start: &str, records: Vec<Value>) -> Self {
        self.mileage.insert(date(start), records);
        self
    }

    /// Makes the window starting on `start` fail with HTTP 500.
    pub(crate) fn with_failing_window(mut self, start: &str) -> Self {
        self.failing_windows.insert(date(start));
        self
    }

    pub(crate) fn fail_next_login(&self) {
        self.fail_logins.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub(crate) fn mileage_calls(&self) -> Vec<DateWindow> {
        self.mileage_calls.lock().unwrap().clone()
    }

    pub(crate) fn tokens_seen(&self) -> Vec<String> {
        self.tokens_seen.lock().unwrap().clone()
    }

    fn see(&self, token: &str) {
        self.tokens_seen.lock().unwrap().push(token.to_string());
    }
}

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[async_trait]
impl FleetApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<String, FetchError> {
        let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
        let failing = self
            .fail_logins
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(FetchError::MissingToken);
        }
        Ok(format!("{}-token-{n}", credentials.username))
    }

    async fn vehicles(&self, token: &str) -> Result<Vec<Vehicle>, FetchError> {
        self.see(token);
        Ok(self.vehicles.clone())
    }

    async fn vehicle_detail(
        &self,
        token: &str,
        imei: &str,
    ) -> Result<Option<VehicleDetail>, FetchError> {
        self.see(token);
        Ok(self
            .details
            .get(imei)
            .cloned()
            .and_then(VehicleDetail::from_value))
    }

    async fn mileage(
        &self,
        token: &str,
        _imei: &str,
        window: &DateWindow,
    ) -> Result<Vec<MileageRecord>, FetchError> {
        self.see(token);
        self.mileage_calls.lock().unwrap().push(*window);

        if self.failing_windows.contains(&window.start) {
            return Err(FetchError::Status {
                endpoint: "/data/mileage".to_string(),
                status: 500,
            });
        }

        Ok(self
            .mileage
            .get(&window.start)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(MileageRecord::from)
            .collect())
    }
}
