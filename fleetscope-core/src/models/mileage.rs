//! Mileage records and the report produced by a range fetch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dates::{DateRange, DateWindow};

// ============================================================================
// Mileage Record
// ============================================================================

/// A single mileage entry. The contents are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MileageRecord(pub Value);

impl MileageRecord {
    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for MileageRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// ============================================================================
// Window Report
// ============================================================================

/// What happened when a single window was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WindowOutcome {
    /// The window returned this many records.
    Fetched {
        /// Number of records appended to the report.
        records: usize,
    },
    /// The request succeeded but returned no records.
    Empty,
    /// The request failed; later windows were still attempted.
    Failed {
        /// Error description.
        error: String,
    },
}

/// Outcome of one window of a range fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowReport {
    /// The window that was requested.
    pub window: DateWindow,
    /// What the request produced.
    #[serde(flatten)]
    pub outcome: WindowOutcome,
}

// ============================================================================
// Mileage Report
// ============================================================================

/// Mileage records for one vehicle across a date range.
///
/// Records appear in window order, and within a window in the order the
/// API returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageReport {
    /// Vehicle the records belong to.
    pub imei: String,
    /// Requested range.
    pub range: DateRange,
    /// Records concatenated across all windows.
    pub records: Vec<MileageRecord>,
    /// One entry per window, in chronological order.
    pub windows: Vec<WindowReport>,
}

impl MileageReport {
    /// Creates an empty report for `range`.
    pub fn new(imei: impl Into<String>, range: DateRange) -> Self {
        Self {
            imei: imei.into(),
            range,
            records: Vec::new(),
            windows: Vec::new(),
        }
    }

    /// Records the outcome of a window, appending any records it returned.
    pub fn push_window(&mut self, window: DateWindow, records: Result<Vec<MileageRecord>, String>) {
        let outcome = match records {
            Ok(records) if records.is_empty() => WindowOutcome::Empty,
            Ok(records) => {
                let count = records.len();
                self.records.extend(records);
                WindowOutcome::Fetched { records: count }
            }
            Err(error) => WindowOutcome::Failed { error },
        };
        self.windows.push(WindowReport { window, outcome });
    }

    /// Returns true if no window produced any records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Windows whose request failed.
    pub fn failed_windows(&self) -> impl Iterator<Item = &WindowReport> {
        self.windows
            .iter()
            .filter(|w| matches!(w.outcome, WindowOutcome::Failed { .. }))
    }
}

// ============================================================================
// Tests
// ============================================================================
