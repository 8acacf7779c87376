//! Forwarding of chained calls that match no model scope
//!
//! `QueryBuilder::call` hands unknown method names to the binding's
//! [`QueryDelegate`]. Whatever the delegate reports is re-raised as a
//! `ModelError` carrying the delegate's message.

use anyhow::{anyhow, bail};
use serde_json::Value;

use crate::config::QueryConfig;

use super::encoding::{self, render_value};
use super::state::QueryState;
use super::types::PredicateOperator;

#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    #[error("Call to undefined method {0}()")]
    UndefinedMethod(String),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Handler for calls that are not model scopes
pub trait QueryDelegate: Send + Sync {
    fn forward(
        &self,
        method: &str,
        args: &[Value],
        state: &mut QueryState,
        config: &QueryConfig,
    ) -> Result<(), DelegateError>;
}

/// Delegate that knows no methods at all
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingDelegate;

impl QueryDelegate for RejectingDelegate {
    fn forward(
        &self,
        method: &str,
        _args: &[Value],
        _state: &mut QueryState,
        _config: &QueryConfig,
    ) -> Result<(), DelegateError> {
        Err(DelegateError::UndefinedMethod(method.to_string()))
    }
}

/// Delegate exposing the predicate vocabulary by name
///
/// Lets bridge code drive a query from method names and JSON arguments:
/// `where`, `where_in`, `where_not_in`, `where_null`, `where_not_null`,
/// `where_between`, `where_not_between`, `limit`/`take`, `with_trashed`,
/// `only_trashed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterDelegate;

impl QueryDelegate for ParameterDelegate {
    fn forward(
        &self,
        method: &str,
        args: &[Value],
        state: &mut QueryState,
        config: &QueryConfig,
    ) -> Result<(), DelegateError> {
        match method {
            "where" => {
                let field = string_arg(method, args, 0)?;
                if config.is_reserved(&field) {
                    return Ok(());
                }
                let (operator, value) = match args.len() {
                    2 => (PredicateOperator::Equal, &args[1]),
                    3 => {
                        let symbol = string_arg(method, args, 1)?;
                        let operator = PredicateOperator::from_symbol(&symbol)
                            .ok_or_else(|| anyhow!("Unknown operator '{}'", symbol))?;
                        (operator, &args[2])
                    }
                    n => return Err(anyhow!("where() expects 2 or 3 arguments, {} given", n).into()),
                };
                state.set(field, encoding::comparison(operator, render_value(value)));
            }
            "where_in" | "where_not_in" => {
                let column = string_arg(method, args, 0)?;
                let values = list_arg(method, args, 1)?;
                state.set(column, encoding::membership(values, method == "where_not_in"));
            }
            "where_between" | "where_not_between" => {
                let column = string_arg(method, args, 0)?;
                let values = list_arg(method, args, 1)?;
                state.set(column, encoding::between(values, method == "where_not_between"));
            }
            "where_null" | "where_not_null" => {
                let column = string_arg(method, args, 0)?;
                state.set(column, encoding::null_check(method == "where_not_null"));
            }
            "limit" | "take" => {
                let count = args
                    .first()
                    .and_then(Value::as_u64)
                    .ok_or_else(|| anyhow!("{}() expects a non-negative integer", method))?;
                state.set(config.limit_key.clone(), count);
            }
            "with_trashed" => state.set(config.trashed_key.clone(), "with"),
            "only_trashed" => state.set(config.trashed_key.clone(), "only"),
            _ => return Err(DelegateError::UndefinedMethod(method.to_string())),
        }
        Ok(())
    }
}

fn string_arg(method: &str, args: &[Value], index: usize) -> anyhow::Result<String> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => bail!("{}() argument {} must be a string, got {}", method, index + 1, other),
        None => bail!("{}() is missing argument {}", method, index + 1),
    }
}

fn list_arg(method: &str, args: &[Value], index: usize) -> anyhow::Result<Vec<String>> {
    match args.get(index) {
        Some(Value::Array(items)) => Ok(items.iter().map(render_value).collect()),
        Some(other) => bail!("{}() argument {} must be a list, got {}", method, index + 1, other),
        None => bail!("{}() is missing argument {}", method, index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forward(method: &str, args: &[Value]) -> (QueryState, Result<(), DelegateError>) {
        let mut state = QueryState::new();
        let result = ParameterDelegate.forward(method, args, &mut state, &QueryConfig::default());
        (state, result)
    }

    #[test]
    fn test_parameter_delegate_vocabulary() {
        let (state, result) = forward("where", &[json!("age"), json!(">="), json!(18)]);
        assert!(result.is_ok());
        assert_eq!(state.get("age"), Some(&json!("ge:18")));

        let (state, _) = forward("where", &[json!("active"), json!(true)]);
        assert_eq!(state.get("active"), Some(&json!("eq:1")));

        let (state, _) = forward("where_not_in", &[json!("id"), json!([1, 2])]);
        assert_eq!(state.get("id"), Some(&json!("notin:1,2")));

        let (state, _) = forward("take", &[json!(5)]);
        assert_eq!(state.get("limit"), Some(&json!(5)));

        let (state, _) = forward("only_trashed", &[]);
        assert_eq!(state.get("trashed"), Some(&json!("only")));
    }

    #[test]
    fn test_parameter_delegate_ignores_reserved_keys() {
        let (state, result) = forward("where", &[json!("page"), json!(3)]);
        assert!(result.is_ok());
        assert!(!state.has_parameters());
    }

    #[test]
    fn test_parameter_delegate_failures() {
        let (_, result) = forward("order_by", &[json!("name")]);
        assert!(matches!(result, Err(DelegateError::UndefinedMethod(ref m)) if m == "order_by"));

        let (_, result) = forward("where_in", &[json!("id"), json!(7)]);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "where_in() argument 2 must be a list, got 7");

        let (_, result) = forward("where", &[json!("age"), json!("=>"), json!(1)]);
        assert_eq!(result.unwrap_err().to_string(), "Unknown operator '=>'");
    }

    #[test]
    fn test_rejecting_delegate() {
        let mut state = QueryState::new();
        let result = RejectingDelegate.forward("active", &[], &mut state, &QueryConfig::default());
        assert_eq!(result.unwrap_err().to_string(), "Call to undefined method active()");
    }
}
