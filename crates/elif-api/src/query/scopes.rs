//! Query Builder scope operations
//!
//! Global scopes are named parameter sets merged into every effective query
//! until removed. Model scopes are named callbacks registered at model
//! definition time and reached through [`QueryBuilder::call`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::model::ApiModel;

use super::builder::QueryBuilder;
use super::delegate::DelegateError;
use super::state::QueryParameters;

/// Model scope callback: receives the builder and the call's arguments
pub type ScopeFn<M> =
    Arc<dyn Fn(QueryBuilder<M>, &[Value]) -> ModelResult<QueryBuilder<M>> + Send + Sync>;

/// Named model scopes, looked up by exact call name
pub struct ScopeRegistry<M> {
    scopes: HashMap<String, ScopeFn<M>>,
}

impl<M> Default for ScopeRegistry<M> {
    fn default() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }
}

impl<M> fmt::Debug for ScopeRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.scopes.keys().collect();
        names.sort();
        f.debug_struct("ScopeRegistry").field("scopes", &names).finish()
    }
}

impl<M> ScopeRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scope` under `name`, replacing any earlier registration
    pub fn register<F>(&mut self, name: impl Into<String>, scope: F) -> &mut Self
    where
        F: Fn(QueryBuilder<M>, &[Value]) -> ModelResult<QueryBuilder<M>> + Send + Sync + 'static,
    {
        self.scopes.insert(name.into(), Arc::new(scope));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ScopeFn<M>> {
        self.scopes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<M> QueryBuilder<M> {
    /// Register a global scope for this query, replacing one with the same identifier
    pub fn with_global_scope(mut self, identifier: &str, parameters: QueryParameters) -> Self {
        self.state.add_scope(identifier, parameters);
        self
    }

    /// Remove a global scope from this query
    pub fn without_global_scope(mut self, identifier: &str) -> Self {
        self.state.remove_scope(identifier);
        self
    }

    pub fn without_global_scopes<'a>(mut self, identifiers: impl IntoIterator<Item = &'a str>) -> Self {
        for identifier in identifiers {
            self.state.remove_scope(identifier);
        }
        self
    }

    pub fn removed_scopes(&self) -> &[String] {
        self.state.removed_scopes()
    }
}

impl<M: ApiModel> QueryBuilder<M> {
    /// Apply a model scope or forward the call to the delegate
    ///
    /// A scope registered under `method` wins. Otherwise the delegate handles
    /// the call, and any failure it reports comes back as a `ModelError`
    /// carrying the delegate's message.
    pub fn call(self, method: &str, args: &[Value]) -> ModelResult<Self> {
        if let Some(scope) = self.scopes.get(method).cloned() {
            debug!(model = M::entity(), scope = method, "Applying model scope");
            return scope(self, args);
        }

        let mut builder = self;
        let delegate = Arc::clone(&builder.delegate);
        match delegate.forward(method, args, &mut builder.state, &builder.config) {
            Ok(()) => Ok(builder),
            Err(DelegateError::UndefinedMethod(name)) => Err(ModelError::UnknownScopeOrMethod(name)),
            Err(DelegateError::Failed(err)) => Err(ModelError::Forwarding(err.to_string())),
        }
    }

    pub fn has_scope(&self, name: &str) -> bool {
        self.scopes.contains(name)
    }
}
