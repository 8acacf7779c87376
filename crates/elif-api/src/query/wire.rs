//! Query-string rendering of an effective query
//!
//! Lists become repeated `key[]` pairs, booleans `1`/`0`, and null values are
//! left out so an unset limit never reaches the remote resource.

use serde_json::Value;

use super::encoding::render_value;
use super::state::QueryParameters;

/// Flatten parameters into ordered key/value pairs
pub fn to_pairs(parameters: &QueryParameters) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(parameters.len());
    for (key, value) in parameters {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let list_key = format!("{}[]", key);
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push((list_key.clone(), scalar(item)));
                }
            }
            other => pairs.push((key.clone(), scalar(other))),
        }
    }
    pairs
}

/// `application/x-www-form-urlencoded` query string
pub fn to_query_string(parameters: &QueryParameters) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(to_pairs(parameters))
        .finish()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Bool(false) => "0".to_string(),
        other => render_value(other),
    }
}
