//! Result Hydration
//!
//! Reading raw API payloads into record lists and typed attributes.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::QueryConfig;
use crate::error::{ModelError, ModelResult};

/// Records and pagination metadata of one bulk fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCollection {
    pub records: Vec<Value>,
    pub meta: Map<String, Value>,
}

impl RawCollection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Split a bulk payload into records and metadata
    ///
    /// Accepts a bare array of records, an object holding the records under
    /// the configured data key next to its metadata. Falsy payloads (`null`,
    /// `false`, `0`, `""`, `{}`) count as no data.
    pub fn from_payload(payload: Value, config: &QueryConfig) -> ModelResult<Self> {
        if is_falsy(&payload) {
            return Ok(Self::empty());
        }

        match payload {
            Value::Array(records) => Ok(Self {
                records,
                meta: Map::new(),
            }),
            Value::Object(mut object) => {
                let records = match object.remove(&config.data_key) {
                    Some(Value::Array(records)) => records,
                    Some(Value::Null) => Vec::new(),
                    Some(other) => {
                        return Err(ModelError::Serialization(format!(
                            "expected '{}' to hold a list of records, got {}",
                            config.data_key,
                            kind(&other)
                        )))
                    }
                    None => {
                        return Err(ModelError::Serialization(format!(
                            "bulk payload object has no '{}' key",
                            config.data_key
                        )))
                    }
                };
                Ok(Self {
                    records,
                    meta: object,
                })
            }
            other => Err(ModelError::Serialization(format!(
                "unexpected bulk payload: {}",
                kind(&other)
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Numeric metadata value, accepting numbers and numeric strings
    pub fn meta_u64(&self, key: &str) -> Option<u64> {
        match self.meta.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Deserialize a raw record into typed attributes
pub fn from_attributes<T: DeserializeOwned>(attributes: Value) -> ModelResult<T> {
    Ok(serde_json::from_value(attributes)?)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(object) => object.is_empty(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_payload() {
        let raw = RawCollection::from_payload(json!([{"id": 1}, {"id": 2}]), &QueryConfig::default()).unwrap();
        assert_eq!(raw.len(), 2);
        assert!(raw.meta.is_empty());
        assert_eq!(raw.meta_u64("total"), None);
    }

    #[test]
    fn test_enveloped_payload() {
        let raw = RawCollection::from_payload(
            json!({"data": [{"id": 1}], "total": 31, "per_page": "10", "current_page": 4}),
            &QueryConfig::default(),
        )
        .unwrap();

        assert_eq!(raw.records, vec![json!({"id": 1})]);
        assert_eq!(raw.meta_u64("total"), Some(31));
        assert_eq!(raw.meta_u64("per_page"), Some(10));
        assert_eq!(raw.meta_u64("current_page"), Some(4));
    }

    #[test]
    fn test_null_and_invalid_payloads() {
        let config = QueryConfig::default();
        assert!(RawCollection::from_payload(Value::Null, &config).unwrap().is_empty());
        assert!(RawCollection::from_payload(json!({"data": null, "total": 0}), &config).unwrap().is_empty());

        assert!(matches!(
            RawCollection::from_payload(json!("nope"), &config),
            Err(ModelError::Serialization(_))
        ));
        assert!(matches!(
            RawCollection::from_payload(json!({"items": []}), &config),
            Err(ModelError::Serialization(_))
        ));
    }

    #[test]
    fn test_falsy_payloads_are_empty() {
        let config = QueryConfig::default();
        for payload in [json!({}), json!(false), json!(0), json!(0.0), json!(""), json!([])] {
            let raw = RawCollection::from_payload(payload.clone(), &config).unwrap();
            assert!(raw.is_empty(), "{} should hold no records", payload);
            assert!(raw.meta.is_empty());
        }

        assert!(matches!(
            RawCollection::from_payload(json!(true), &config),
            Err(ModelError::Serialization(_))
        ));
        assert!(matches!(
            RawCollection::from_payload(json!(3), &config),
            Err(ModelError::Serialization(_))
        ));
    }

    #[test]
    fn test_from_attributes() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Row {
            id: u32,
        }

        assert_eq!(from_attributes::<Row>(json!({"id": 7})).unwrap(), Row { id: 7 });
        assert!(matches!(
            from_attributes::<Row>(json!({"id": "seven"})),
            Err(ModelError::Serialization(_))
        ));
    }
}
