//! Error types for the API query layer
//!
//! Not-found is the only recoverable condition: it is translated by `find`
//! (into `None`) and by bulk fetches (into an empty collection). Every other
//! variant propagates to the caller unchanged.

use crate::client::ApiError;
use crate::config::ConfigError;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for query building, execution and hydration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// The remote resource has no matching record
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// The API client failed for a reason other than not-found
    #[error("API error: {0}")]
    Api(String),

    /// An operator symbol outside the operator table
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    /// A chained call matched neither a registered scope nor the delegate
    #[error("Call to undefined scope or method '{0}'")]
    UnknownScopeOrMethod(String),

    /// The delegate failed while handling a forwarded call
    #[error("{0}")]
    Forwarding(String),

    /// A scope callback rejected its arguments
    #[error("Scope error: {0}")]
    Scope(String),

    /// Raw payload could not be read or hydrated
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Query configuration failed to load or validate
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<ApiError> for ModelError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::EntityNotFound { operation } => ModelError::NotFound(operation),
            other => ModelError::Api(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

impl From<ConfigError> for ModelError {
    fn from(err: ConfigError) -> Self {
        ModelError::Configuration(err.to_string())
    }
}

impl From<anyhow::Error> for ModelError {
    fn from(err: anyhow::Error) -> Self {
        ModelError::Forwarding(err.to_string())
    }
}

impl ModelError {
    /// Whether this error is the recoverable not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_not_found_maps_to_not_found() {
        let err: ModelError = ApiError::EntityNotFound {
            operation: "getUser".to_string(),
        }
        .into();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: getUser");
    }

    #[test]
    fn test_transport_error_maps_to_api() {
        let err: ModelError = ApiError::Transport("connection reset".to_string()).into();

        assert!(!err.is_not_found());
        assert_eq!(err, ModelError::Api("Transport error: connection reset".to_string()));
    }

    #[test]
    fn test_forwarding_keeps_original_message() {
        let err: ModelError = anyhow::anyhow!("limit expects a number").into();
        assert_eq!(err.to_string(), "limit expects a number");
    }
}
