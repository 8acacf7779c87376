//! Testing utilities
//!
//! [`FakeApiClient`] answers requests from canned payloads keyed by operation
//! name and records every request it receives. Operations without a canned
//! answer fail with `EntityNotFound`, like a remote resource without records.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::client::{ApiClient, ApiError, ApiRequest, ApiResult};

#[derive(Debug, Default)]
pub struct FakeApiClient {
    responses: Mutex<HashMap<String, ApiResult<Value>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `operation` with `payload`
    pub fn respond(self, operation: &str, payload: Value) -> Self {
        self.responses.lock().insert(operation.to_string(), Ok(payload));
        self
    }

    /// Answer `operation` with `error`
    pub fn fail(self, operation: &str, error: ApiError) -> Self {
        self.responses.lock().insert(operation.to_string(), Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ApiClient for FakeApiClient {
    async fn call(&self, request: ApiRequest) -> ApiResult<Value> {
        let response = self.responses.lock().get(&request.operation).cloned();
        let operation = request.operation.clone();
        self.requests.lock().push(request);

        response.unwrap_or(Err(ApiError::EntityNotFound { operation }))
    }
}
