//! Predicate encoding
//!
//! Pure functions producing the parameter strings the remote resource
//! understands:
//!
//! | predicate | encoded value |
//! |---|---|
//! | comparison | `eq:5` |
//! | column comparison | `column:lt:updated_at` |
//! | between | `between:1,10` / `notbetween:1,10` |
//! | membership | `in:a,b,c` / `notin:a,b,c` |
//! | null check | `null:` / `notnull:` |
//! | date part | `year:ge:2020` |

use std::fmt::Display;

use serde_json::Value;

use super::types::{DatePart, PredicateOperator};

pub fn comparison(operator: PredicateOperator, value: impl Display) -> String {
    format!("{}:{}", operator.token(), value)
}

pub fn column(operator: PredicateOperator, other: &str) -> String {
    format!("column:{}:{}", operator.token(), other)
}

pub fn between<I>(values: I, negated: bool) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    format!("{}between:{}", negation(negated), join(values))
}

pub fn membership<I>(values: I, negated: bool) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    format!("{}in:{}", negation(negated), join(values))
}

pub fn null_check(negated: bool) -> String {
    format!("{}null:", negation(negated))
}

pub fn date_part(part: DatePart, operator: PredicateOperator, value: impl Display) -> String {
    format!("{}:{}:{}", part.prefix(), operator.token(), value)
}

/// Render a JSON value the way it reads inside a predicate string
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => join(items.iter().map(render_value)),
        Value::Object(_) => value.to_string(),
    }
}

fn negation(negated: bool) -> &'static str {
    if negated {
        "not"
    } else {
        ""
    }
}

fn join<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_uses_token() {
        assert_eq!(comparison(PredicateOperator::Equal, 5), "eq:5");
        assert_eq!(comparison(PredicateOperator::Like, "%smith%"), "like:%smith%");
        assert_eq!(comparison(PredicateOperator::GreaterThan, 2.5), "gt:2.5");
    }

    #[test]
    fn test_composite_predicates() {
        assert_eq!(column(PredicateOperator::LessThan, "updated_at"), "column:lt:updated_at");
        assert_eq!(between([1, 10], false), "between:1,10");
        assert_eq!(between(["a", "b"], true), "notbetween:a,b");
        assert_eq!(membership(["x", "y", "z"], false), "in:x,y,z");
        assert_eq!(membership(Vec::<i32>::new(), true), "notin:");
        assert_eq!(null_check(false), "null:");
        assert_eq!(null_check(true), "notnull:");
        assert_eq!(date_part(DatePart::Year, PredicateOperator::GreaterThanOrEqual, 2020), "year:ge:2020");
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("abc")), "abc");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!(true)), "1");
        assert_eq!(render_value(&json!(false)), "");
        assert_eq!(render_value(&Value::Null), "");
        assert_eq!(render_value(&json!([1, "b", 3])), "1,b,3");
    }
}
