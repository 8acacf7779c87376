//! API Client - the remote side of every terminal query operation
//!
//! Remote operations are addressed by name: `get<Entity>` fetches a single
//! record by identifier, `get<Entities>` fetches a collection. The transport
//! behind an [`ApiClient`] (HTTP, authentication, retries, timeouts) is the
//! implementor's concern.

use async_trait::async_trait;
use serde_json::Value;

use crate::query::state::QueryParameters;
use crate::query::wire;

/// Result type alias for API client calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised by an [`ApiClient`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Entity not found for operation '{operation}'")]
    EntityNotFound { operation: String },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// One outbound call to the remote resource
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Operation name, e.g. `getUser` or `getUsers`
    pub operation: String,
    /// Identifier for single-record fetches
    pub identifier: Option<Value>,
    /// Effective query parameters
    pub query: QueryParameters,
}

impl ApiRequest {
    /// Single-record fetch for `entity` by identifier
    pub fn single(entity: &str, identifier: Value, query: QueryParameters) -> Self {
        Self {
            operation: operation_name(entity),
            identifier: Some(identifier),
            query,
        }
    }

    /// Bulk fetch for `entities`
    pub fn collection(entities: &str, query: QueryParameters) -> Self {
        Self {
            operation: operation_name(entities),
            identifier: None,
            query,
        }
    }

    pub fn is_single(&self) -> bool {
        self.identifier.is_some()
    }

    /// Query string rendering of the parameters, for HTTP transports
    pub fn query_string(&self) -> String {
        wire::to_query_string(&self.query)
    }
}

/// Client for the remote resource
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Execute one request and return the raw payload
    ///
    /// Must fail with [`ApiError::EntityNotFound`] when the remote resource
    /// reports no matching record or collection.
    async fn call(&self, request: ApiRequest) -> ApiResult<Value>;
}

/// Build the conventional operation name for an entity: `user` -> `getUser`
pub fn operation_name(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_name() {
        assert_eq!(operation_name("user"), "getUser");
        assert_eq!(operation_name("users"), "getUsers");
        assert_eq!(operation_name("Invoice"), "getInvoice");
        assert_eq!(operation_name("éclair"), "getÉclair");
        assert_eq!(operation_name(""), "get");
    }

    #[test]
    fn test_request_constructors() {
        let mut query = QueryParameters::new();
        query.insert("active".to_string(), json!("eq:1"));

        let single = ApiRequest::single("user", json!(42), query.clone());
        assert_eq!(single.operation, "getUser");
        assert!(single.is_single());
        assert_eq!(single.query_string(), "active=eq%3A1");

        let collection = ApiRequest::collection("users", query);
        assert_eq!(collection.operation, "getUsers");
        assert!(!collection.is_single());
    }
}
