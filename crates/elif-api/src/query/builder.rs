//! Query Builder - Core builder implementation

use std::fmt;
use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::QueryConfig;

use super::delegate::QueryDelegate;
use super::scopes::ScopeRegistry;
use super::state::{QueryParameters, QueryState};

/// Fluent query builder for one remote entity
///
/// Predicate methods take and return the builder by value; terminal
/// operations (`get`, `first`, `find`, `paginate`, `all`) consume it.
pub struct QueryBuilder<M> {
    pub(crate) state: QueryState,
    pub(crate) api: Arc<dyn ApiClient>,
    pub(crate) config: Arc<QueryConfig>,
    pub(crate) scopes: Arc<ScopeRegistry<M>>,
    pub(crate) delegate: Arc<dyn QueryDelegate>,
}

impl<M> Clone for QueryBuilder<M> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            api: Arc::clone(&self.api),
            config: Arc::clone(&self.config),
            scopes: Arc::clone(&self.scopes),
            delegate: Arc::clone(&self.delegate),
        }
    }
}

impl<M> fmt::Debug for QueryBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl<M> QueryBuilder<M> {
    pub(crate) fn from_parts(
        state: QueryState,
        api: Arc<dyn ApiClient>,
        config: Arc<QueryConfig>,
        scopes: Arc<ScopeRegistry<M>>,
        delegate: Arc<dyn QueryDelegate>,
    ) -> Self {
        Self {
            state,
            api,
            config,
            scopes,
            delegate,
        }
    }

    /// The effective query: global scopes overlaid by direct parameters
    pub fn query(&self) -> QueryParameters {
        self.state.effective_query()
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }
}
