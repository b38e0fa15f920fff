//! Text output formatting with optional colors.

use chrono::{DateTime, Local, Utc};
use fleetscope_core::{
    CredentialToken, MileageRecord, MileageReport, Vehicle, VehicleDetail, WindowOutcome,
};
use serde_json::Value;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Placeholder for missing values.
const MISSING: &str = "-";

/// Renders a JSON value for display: strings unquoted, null as `-`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => MISSING.to_string(),
        Value::String(s) if s.is_empty() => MISSING.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// One plate per line, in the order the API listed the vehicles.
    pub fn format_plates(&self, vehicles: &[Vehicle]) -> String {
        let plates: Vec<&str> = vehicles.iter().filter_map(Vehicle::plate).collect();

        let mut lines = vec![self.bold(&format!("Plates ({})", plates.len()))];
        lines.extend(plates.iter().map(|p| format!("  {p}")));
        lines.join("\n")
    }

    /// Table of IMEI and plate, then every other field as `key=value`.
    pub fn format_vehicles(&self, vehicles: &[Vehicle]) -> String {
        let imeis: Vec<String> = vehicles
            .iter()
            .map(|v| v.imei().unwrap_or_else(|| MISSING.to_string()))
            .collect();
        let imei_width = imeis.iter().map(String::len).max().unwrap_or(0).max(4);
        let plate_width = vehicles
            .iter()
            .filter_map(Vehicle::plate)
            .map(str::len)
            .max()
            .unwrap_or(0)
            .max(5);

        let mut lines = vec![self.bold(&format!(
            "{:<imei_width$}  {:<plate_width$}  FIELDS",
            "IMEI", "PLATE"
        ))];

        for (vehicle, imei) in vehicles.iter().zip(&imeis) {
            let others: Vec<String> = vehicle
                .fields
                .iter()
                .filter(|(key, _)| key.as_str() != "imei" && key.as_str() != "plate")
                .map(|(key, value)| format!("{key}={}", display_value(value)))
                .collect();

            lines.push(format!(
                "{:<imei_width$}  {:<plate_width$}  {}",
                imei,
                vehicle.plate().unwrap_or(MISSING),
                self.dim(&others.join(" "))
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} vehicles", vehicles.len()));
        lines.join("\n")
    }

    /// Key/value listing of a vehicle detail, plate first.
    pub fn format_detail(&self, detail: &VehicleDetail) -> String {
        let title = detail
            .get("plate")
            .map_or_else(|| "Vehicle".to_string(), display_value);

        let width = detail.fields.keys().map(String::len).max().unwrap_or(0);

        let mut lines = vec![self.bold(&title)];
        for (key, value) in &detail.fields {
            if key == "plate" {
                continue;
            }
            lines.push(format!("  {:<width$}  {}", key, display_value(value)));
        }
        lines.join("\n")
    }

    /// Mileage records, one per line, with an optional window summary.
    pub fn format_mileage(&self, report: &MileageReport, show_windows: bool) -> String {
        let mut lines = vec![self.bold(&format!(
            "Mileage for {} ({})",
            report.imei, report.range
        ))];

        if show_windows {
            lines.push(self.format_windows(report));
        }

        lines.extend(report.records.iter().map(|r| format!("  {}", format_record(r))));

        let failed = report.failed_windows().count();
        let mut footer = format!(
            "Total: {} records across {} windows",
            report.records.len(),
            report.windows.len()
        );
        if failed > 0 {
            footer.push_str(&format!(", {}", self.yellow(&format!("{failed} failed"))));
        }
        lines.push(String::new());
        lines.push(footer);
        lines.join("\n")
    }

    /// One line per fetched window.
    pub fn format_windows(&self, report: &MileageReport) -> String {
        report
            .windows
            .iter()
            .map(|w| match &w.outcome {
                WindowOutcome::Fetched { records } => {
                    format!("  {} {}  {records} records", self.green("✓"), w.window)
                }
                WindowOutcome::Empty => format!("  {} {}  no data", self.dim("·"), w.window),
                WindowOutcome::Failed { error } => {
                    format!("  {} {}  {}", self.red("✗"), w.window, self.red(error))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Login status without revealing the token.
    pub fn format_token(&self, token: &CredentialToken, now: DateTime<Utc>) -> String {
        let expires = token.expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
        match token.remaining(now) {
            Some(left) => format!(
                "{} Logged in, token valid until {} ({} min left)",
                self.green("✓"),
                self.cyan(&expires.to_string()),
                left.num_minutes()
            ),
            None => format!("{} Token expired at {}", self.red("✗"), expires),
        }
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Objects as `key=value` pairs, anything else as its display value.
fn format_record(record: &MileageRecord) -> String {
    match record.as_value() {
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| format!("{key}={}", display_value(value)))
            .collect::<Vec<_>>()
            .join("  "),
        other => display_value(other),
    }
}
