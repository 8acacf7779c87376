//! Core Model Trait - contract between a model type and the query builder

use std::fmt::Debug;

use serde_json::Value;

use crate::error::ModelResult;
use crate::query::scopes::ScopeRegistry;
use crate::query::state::ScopeSet;

/// A model whose records live behind a remote API
pub trait ApiModel: Send + Sync + Debug + Sized + 'static {
    /// Singular entity name, used for `get<Entity>`
    fn entity() -> &'static str;

    /// Plural entity name, used for `get<Entities>`
    fn entities() -> String {
        format!("{}s", Self::entity())
    }

    /// Primary key field name, used when finding by a list of identifiers
    fn primary_key_name() -> &'static str {
        "id"
    }

    /// Create a model instance from a raw record
    ///
    /// `exists` is true when the record came back from the remote resource.
    fn new_instance(attributes: Value, exists: bool) -> ModelResult<Self>;

    /// Register the model's named scopes, reachable through `QueryBuilder::call`
    fn register_scopes(_scopes: &mut ScopeRegistry<Self>) {}

    /// Register the model's global scopes, applied to every fresh query
    fn register_global_scopes(_scopes: &mut ScopeSet) {}
}
