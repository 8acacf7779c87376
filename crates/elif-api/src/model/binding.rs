//! Model Binding - a model type bound to its API client
//!
//! Holds everything a fresh query needs: the client, the configuration, the
//! model's named scopes and the global scopes registered so far. Global
//! scopes may be registered while queries run; every `query()` starts from a
//! snapshot taken under the read lock.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::client::ApiClient;
use crate::config::QueryConfig;
use crate::error::ModelResult;
use crate::query::delegate::{QueryDelegate, RejectingDelegate};
use crate::query::scopes::ScopeRegistry;
use crate::query::state::{QueryParameters, QueryState, ScopeSet};
use crate::query::QueryBuilder;

use super::core_trait::ApiModel;

pub struct ModelBinding<M: ApiModel> {
    api: Arc<dyn ApiClient>,
    config: Arc<QueryConfig>,
    global_scopes: RwLock<ScopeSet>,
    scopes: Arc<ScopeRegistry<M>>,
    delegate: Arc<dyn QueryDelegate>,
}

impl<M: ApiModel> fmt::Debug for ModelBinding<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBinding")
            .field("entity", &M::entity())
            .field("config", &self.config)
            .field("global_scopes", &*self.global_scopes.read())
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl<M: ApiModel> ModelBinding<M> {
    /// Bind `M` to `api` with default configuration
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        let mut scopes = ScopeRegistry::new();
        M::register_scopes(&mut scopes);

        let mut global_scopes = ScopeSet::new();
        M::register_global_scopes(&mut global_scopes);

        Self {
            api,
            config: Arc::new(QueryConfig::default()),
            global_scopes: RwLock::new(global_scopes),
            scopes: Arc::new(scopes),
            delegate: Arc::new(RejectingDelegate),
        }
    }

    /// Bind `M` to `api` with configuration read from the environment
    pub fn from_env(api: Arc<dyn ApiClient>) -> ModelResult<Self> {
        Self::new(api).with_config(QueryConfig::from_env()?)
    }

    /// Replace the configuration after validating it
    pub fn with_config(mut self, config: QueryConfig) -> ModelResult<Self> {
        config.validate()?;
        self.config = Arc::new(config);
        Ok(self)
    }

    /// Replace the delegate that handles calls matching no model scope
    pub fn with_delegate(mut self, delegate: impl QueryDelegate + 'static) -> Self {
        self.delegate = Arc::new(delegate);
        self
    }

    /// Start a fresh query with the currently registered global scopes
    pub fn query(&self) -> QueryBuilder<M> {
        let scopes = self.global_scopes.read().clone();
        QueryBuilder::from_parts(
            QueryState::with_scopes(scopes),
            Arc::clone(&self.api),
            Arc::clone(&self.config),
            Arc::clone(&self.scopes),
            Arc::clone(&self.delegate),
        )
    }

    /// Register a global scope applied to every query started afterwards
    pub fn add_global_scope(&self, identifier: &str, parameters: QueryParameters) {
        self.global_scopes.write().insert(identifier, parameters);
    }

    /// Unregister a global scope; returns whether it was registered
    pub fn remove_global_scope(&self, identifier: &str) -> bool {
        self.global_scopes.write().remove(identifier).is_some()
    }

    /// Snapshot of the registered global scopes
    pub fn global_scopes(&self) -> ScopeSet {
        self.global_scopes.read().clone()
    }

    pub fn scopes(&self) -> &ScopeRegistry<M> {
        &self.scopes
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn api(&self) -> &Arc<dyn ApiClient> {
        &self.api
    }

    pub async fn all(&self) -> ModelResult<Vec<M>> {
        self.query().all().await
    }

    pub async fn find(&self, id: impl Into<Value>) -> ModelResult<Option<M>> {
        self.query().find(id).await
    }

    pub async fn find_or_fail(&self, id: impl Into<Value>) -> ModelResult<M> {
        self.query().find_or_fail(id).await
    }
}
