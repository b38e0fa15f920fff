//! Response parsing for the upstream API.
//!
//! Every endpoint wraps its payload as `{"message": {"data": ...}}`. A
//! missing `message` or `data` means "no data"; a `message` that is not an
//! object is a malformed response.

use fleetscope_core::{MileageRecord, Vehicle, VehicleDetail};
use serde_json::Value;
use tracing::warn;

use crate::error::FetchError;

/// Short name of a JSON value's type, for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extracts `message.data` from a response body.
///
/// # Errors
///
/// Fails if the body is not JSON or the envelope has the wrong shape.
pub fn envelope_data(body: &str) -> Result<Option<Value>, FetchError> {
    let mut root = match serde_json::from_str::<Value>(body)? {
        Value::Object(root) => root,
        other => {
            return Err(FetchError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )));
        }
    };

    match root.remove("message") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(mut message)) => {
            Ok(message.remove("data").filter(|data| !data.is_null()))
        }
        Some(other) => Err(FetchError::InvalidResponse(format!(
            "'message' is a {}, expected an object",
            json_kind(&other)
        ))),
    }
}

/// Parses the login response into the token string.
///
/// # Errors
///
/// Returns [`FetchError::MissingToken`] if the token is absent or empty.
pub fn parse_login(body: &str) -> Result<String, FetchError> {
    envelope_data(body)?
        .as_ref()
        .and_then(|data| data.get("token"))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(FetchError::MissingToken)
}

/// Parses the vehicle list. Entries that are not objects are skipped.
///
/// # Errors
///
/// Fails if `data` is present but is not an array.
pub fn parse_vehicles(body: &str) -> Result<Vec<Vehicle>, FetchError> {
    match envelope_data(body)? {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(Vehicle::new(fields)),
                other => {
                    warn!(kind = json_kind(&other), "Skipping non-object vehicle entry");
                    None
                }
            })
            .collect()),
        Some(other) => Err(FetchError::InvalidResponse(format!(
            "vehicle list is a {}, expected an array",
            json_kind(&other)
        ))),
    }
}

/// Parses a vehicle detail. Non-object or empty payloads yield `None`.
///
/// # Errors
///
/// Fails only on a malformed envelope.
pub fn parse_detail(body: &str) -> Result<Option<VehicleDetail>, FetchError> {
    Ok(envelope_data(body)?
        .and_then(VehicleDetail::from_value)
        .filter(|detail| !detail.is_empty()))
}

/// Parses one window of mileage data.
///
/// A list yields its elements in order; a single value is taken as one
/// record unless it is blank (`null`, `false`, `0`, `""` or `{}`).
///
/// # Errors
///
/// Fails only on a malformed envelope.
pub fn parse_mileage(body: &str) -> Result<Vec<MileageRecord>, FetchError> {
    let records = match envelope_data(body)? {
        None => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().map(MileageRecord::from).collect(),
        Some(value) if is_blank(&value) => Vec::new(),
        Some(value) => vec![MileageRecord::from(value)],
    };
    Ok(records)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(true) => false,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_token() {
        let body = r#"{"message": {"data": {"token": "abc.def"}}}"#;
        assert_eq!(parse_login(body).unwrap(), "abc.def");
    }

    #[test]
    fn test_login_missing_token() {
        for body in [
            r#"{"message": {"data": {}}}"#,
            r#"{"message": {"data": {"token": ""}}}"#,
            r#"{"message": {"data": {"token": null}}}"#,
            r#"{"message": {}}"#,
            r"{}",
        ] {
            assert!(
                matches!(parse_login(body), Err(FetchError::MissingToken)),
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_malformed_envelope() {
        assert!(matches!(
            envelope_data(r#"{"message": "Unauthorized"}"#),
            Err(FetchError::InvalidResponse(_))
        ));
        assert!(matches!(envelope_data("[1, 2]"), Err(FetchError::InvalidResponse(_))));
        assert!(matches!(envelope_data("<html>"), Err(FetchError::Json(_))));
    }

    #[test]
    fn test_vehicles() {
        let body = r#"{"message": {"data": [
            {"imei": "1", "plate": "B 1 A"},
            "junk",
            {"imei": 2}
        ]}}"#;
        let vehicles = parse_vehicles(body).unwrap();

        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].plate(), Some("B 1 A"));
        assert_eq!(vehicles[1].imei().as_deref(), Some("2"));
    }

    #[test]
    fn test_vehicles_missing_data_is_empty() {
        assert!(parse_vehicles(r#"{"message": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_vehicles_wrong_shape() {
        assert!(parse_vehicles(r#"{"message": {"data": {"imei": "1"}}}"#).is_err());
    }

    #[test]
    fn test_detail() {
        let detail = parse_detail(r#"{"message": {"data": {"speed": 12}}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(detail.get("speed"), Some(&json!(12)));
    }

    #[test]
    fn test_detail_non_object_or_empty() {
        assert!(parse_detail(r#"{"message": {"data": [1]}}"#).unwrap().is_none());
        assert!(parse_detail(r#"{"message": {"data": {}}}"#).unwrap().is_none());
        assert!(parse_detail(r#"{"message": {}}"#).unwrap().is_none());
    }

    #[test]
    fn test_mileage_list_keeps_order() {
        let body = r#"{"message": {"data": [{"d": "A"}, {"d": "B"}]}}"#;
        let records = parse_mileage(body).unwrap();
        assert_eq!(
            records,
            vec![
                MileageRecord(json!({"d": "A"})),
                MileageRecord(json!({"d": "B"}))
            ]
        );
    }

    #[test]
    fn test_mileage_single_object_is_one_record() {
        let records = parse_mileage(r#"{"message": {"data": {"d": "A"}}}"#).unwrap();
        assert_eq!(records, vec![MileageRecord(json!({"d": "A"}))]);
    }

    #[test]
    fn test_mileage_empty() {
        assert!(parse_mileage(r#"{"message": {"data": []}}"#).unwrap().is_empty());
        assert!(parse_mileage(r#"{"message": {"data": {}}}"#).unwrap().is_empty());
        assert!(parse_mileage(r#"{"message": {"data": null}}"#).unwrap().is_empty());
        assert!(parse_mileage(r#"{"message": {"data": ""}}"#).unwrap().is_empty());
        assert!(parse_mileage(r#"{"message": {"data": 0}}"#).unwrap().is_empty());
        assert!(parse_mileage(r#"{"message": {"data": 0.0}}"#).unwrap().is_empty());
        assert!(parse_mileage(r#"{"message": {"data": false}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_mileage_scalar_is_one_record() {
        assert_eq!(
            parse_mileage(r#"{"message": {"data": 12.5}}"#).unwrap(),
            vec![MileageRecord(json!(12.5))]
        );
        assert_eq!(
            parse_mileage(r#"{"message": {"data": "ok"}}"#).unwrap(),
            vec![MileageRecord(json!("ok"))]
        );
    }
}
