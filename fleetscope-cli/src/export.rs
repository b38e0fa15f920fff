//! Spreadsheet export of the vehicle list.
//!
//! One worksheet, a bold header row holding every key seen in any vehicle
//! (first-seen order), then one row per vehicle.

use std::path::Path;

use anyhow::{Context, Result, bail};
use fleetscope_core::Vehicle;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::Value;

/// Name of the exported worksheet.
pub const SHEET_NAME: &str = "Vehicles";

/// Every key present in any vehicle, in order of first appearance.
pub fn columns(vehicles: &[Vehicle]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for key in vehicles.iter().flat_map(|v| v.fields.keys()) {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }
    columns
}

/// Writes one cell, choosing the native cell type for the value.
fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                sheet.write_number(row, col, f)?;
            }
            None => {
                sheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::String(s) => {
            sheet.write_string(row, col, s.as_str())?;
        }
        nested @ (Value::Array(_) | Value::Object(_)) => {
            sheet.write_string(row, col, nested.to_string())?;
        }
    }
    Ok(())
}

/// Builds the workbook in memory.
pub fn build_workbook(vehicles: &[Vehicle]) -> Result<Workbook> {
    if vehicles.is_empty() {
        bail!("Refusing to export an empty vehicle list");
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    let columns = columns(vehicles);

    for (col, name) in columns.iter().enumerate() {
        let col = u16::try_from(col).context("Too many columns for a worksheet")?;
        sheet.write_string_with_format(0, col, *name, &header)?;
    }

    for (index, vehicle) in vehicles.iter().enumerate() {
        let row = u32::try_from(index + 1).context("Too many rows for a worksheet")?;
        for (col, name) in columns.iter().enumerate() {
            if let Some(value) = vehicle.get(name) {
                let col = u16::try_from(col).context("Too many columns for a worksheet")?;
                write_cell(sheet, row, col, value)?;
            }
        }
    }

    sheet.autofit();
    Ok(workbook)
}

/// Writes the vehicle list to an xlsx file at `path`.
pub fn write_xlsx(vehicles: &[Vehicle], path: &Path) -> Result<()> {
    let mut workbook = build_workbook(vehicles)?;
    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
