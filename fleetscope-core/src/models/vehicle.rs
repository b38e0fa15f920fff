//! Vehicle list entries and detail objects.
//!
//! The upstream API returns loosely typed JSON objects. Both types keep the
//! full object so that every field can be displayed or exported, and expose
//! typed accessors for the few keys this client relies on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Renders a JSON scalar as a plain string (`"abc"` -> `abc`, `42` -> `42`).
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Vehicle
// ============================================================================

/// A vehicle entry from the vehicle list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vehicle {
    /// All fields as returned by the API, in response order.
    pub fields: Map<String, Value>,
}

impl Vehicle {
    /// Wraps a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The device IMEI, accepting either a string or a numeric value.
    pub fn imei(&self) -> Option<String> {
        self.fields.get("imei").and_then(scalar_to_string)
    }

    /// The plate number, if present and non-empty.
    pub fn plate(&self) -> Option<&str> {
        self.fields
            .get("plate")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
    }

    /// Returns true if the plate matches `plate`, ignoring case.
    pub fn matches_plate(&self, plate: &str) -> bool {
        self.plate()
            .is_some_and(|own| own.to_uppercase() == plate.to_uppercase())
    }

    /// Looks up any field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

// ============================================================================
// Vehicle Detail
// ============================================================================

/// Detail object for a single vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleDetail {
    /// All fields as returned by the API, in response order.
    pub fields: Map<String, Value>,
}

impl VehicleDetail {
    /// Wraps a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builds a detail from an arbitrary JSON value.
    ///
    /// Anything other than an object is treated as "no detail".
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    /// Records the plate the detail was looked up by.
    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.fields
            .insert("plate".to_string(), Value::String(plate.into()));
        self
    }

    /// Looks up any field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns true if the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vehicle(value: Value) -> Vehicle {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_imei_string_or_number() {
        assert_eq!(
            vehicle(json!({"imei": "86001"})).imei().as_deref(),
            Some("86001")
        );
        assert_eq!(
            vehicle(json!({"imei": 86001})).imei().as_deref(),
            Some("86001")
        );
        assert_eq!(vehicle(json!({"imei": null})).imei(), None);
        assert_eq!(vehicle(json!({})).imei(), None);
    }

    #[test]
    fn test_empty_plate_is_absent() {
        assert_eq!(vehicle(json!({"plate": ""})).plate(), None);
        assert_eq!(vehicle(json!({"plate": "B 1234 XY"})).plate(), Some("B 1234 XY"));
    }

    #[test]
    fn test_matches_plate_ignores_case() {
        let v = vehicle(json!({"imei": "1", "plate": "B 1234 xy"}));
        assert!(v.matches_plate("b 1234 XY"));
        assert!(!v.matches_plate("B 9999 XY"));
        assert!(!vehicle(json!({"imei": "1"})).matches_plate(""));
    }

    #[test]
    fn test_field_order_is_preserved() {
        let v = vehicle(json!({"zeta": 1, "alpha": 2, "imei": "3"}));
        let keys: Vec<_> = v.fields.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "imei"]);
    }

    #[test]
    fn test_detail_from_non_object_is_none() {
        assert!(VehicleDetail::from_value(json!([1, 2])).is_none());
        assert!(VehicleDetail::from_value(json!("nope")).is_none());
        assert!(VehicleDetail::from_value(Value::Null).is_none());
        assert!(VehicleDetail::from_value(json!({"speed": 40})).is_some());
    }

    #[test]
    fn test_detail_with_plate() {
        let detail = VehicleDetail::from_value(json!({"speed": 40}))
            .unwrap()
            .with_plate("B 1234 XY");
        assert_eq!(detail.get("plate"), Some(&json!("B 1234 XY")));
        assert_eq!(detail.get("speed"), Some(&json!(40)));
    }
}
