//! Query State - parameter accumulation and global scopes
//!
//! A `QueryState` belongs to exactly one builder for one query construction.
//! The effective query is built by an explicit ordered merge: every active
//! scope in registration order, then the direct parameters on top.

use serde_json::{Map, Value};

/// Insertion-ordered parameter map; writing an existing key keeps its position
pub type QueryParameters = Map<String, Value>;

/// Ordered set of named scopes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeSet {
    entries: Vec<(String, QueryParameters)>,
}

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `parameters` under `identifier`, replacing an earlier registration in place
    pub fn insert(&mut self, identifier: impl Into<String>, parameters: QueryParameters) {
        let identifier = identifier.into();
        match self.entries.iter_mut().find(|(id, _)| *id == identifier) {
            Some(entry) => entry.1 = parameters,
            None => self.entries.push((identifier, parameters)),
        }
    }

    /// Unregister `identifier`, returning its parameters if it was registered
    pub fn remove(&mut self, identifier: &str) -> Option<QueryParameters> {
        let position = self.entries.iter().position(|(id, _)| id == identifier)?;
        Some(self.entries.remove(position).1)
    }

    pub fn get(&self, identifier: &str) -> Option<&QueryParameters> {
        self.entries
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, parameters)| parameters)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All scope parameters merged in registration order
    pub fn merged(&self) -> QueryParameters {
        let mut merged = QueryParameters::new();
        for (_, parameters) in &self.entries {
            for (key, value) in parameters {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// Mutable accumulator behind one fluent query chain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    parameters: QueryParameters,
    scopes: ScopeSet,
    removed_scopes: Vec<String>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state starting from a snapshot of registered global scopes
    pub fn with_scopes(scopes: ScopeSet) -> Self {
        Self {
            scopes,
            ..Self::default()
        }
    }

    /// Direct parameters, without scope contributions
    pub fn parameters(&self) -> &QueryParameters {
        &self.parameters
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    /// Write one parameter; the last write to a key wins
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(key.into(), value.into());
    }

    pub fn merge<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn add_scope(&mut self, identifier: impl Into<String>, parameters: QueryParameters) {
        self.scopes.insert(identifier, parameters);
    }

    /// Deactivate a scope and remember that it was removed
    ///
    /// Removing an identifier that was never registered is not an error.
    pub fn remove_scope(&mut self, identifier: &str) {
        self.scopes.remove(identifier);
        if !self.removed_scopes.iter().any(|id| id == identifier) {
            self.removed_scopes.push(identifier.to_string());
        }
    }

    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    pub fn removed_scopes(&self) -> &[String] {
        &self.removed_scopes
    }

    /// Scopes merged in registration order, overlaid by direct parameters
    pub fn effective_query(&self) -> QueryParameters {
        let mut query = self.scopes.merged();
        for (key, value) in &self.parameters {
            query.insert(key.clone(), value.clone());
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> QueryParameters {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut state = QueryState::new();
        state.set("a", "eq:1");
        state.set("b", "eq:2");
        state.set("a", "eq:3");

        let keys: Vec<_> = state.parameters().keys().cloned().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(state.get("a"), Some(&json!("eq:3")));
    }

    #[test]
    fn test_effective_query_direct_wins() {
        let mut state = QueryState::new();
        state.add_scope("active", params(json!({"active": "eq:1", "team": "eq:4"})));
        state.add_scope("recent", params(json!({"created_at": "date:ge:2024-01-01"})));
        state.set("team", "eq:9");

        let query = state.effective_query();
        assert_eq!(query.get("active"), Some(&json!("eq:1")));
        assert_eq!(query.get("created_at"), Some(&json!("date:ge:2024-01-01")));
        assert_eq!(query.get("team"), Some(&json!("eq:9")));
    }

    #[test]
    fn test_later_scope_overrides_earlier_scope() {
        let mut state = QueryState::new();
        state.add_scope("first", params(json!({"status": "eq:draft"})));
        state.add_scope("second", params(json!({"status": "eq:published"})));

        assert_eq!(state.effective_query().get("status"), Some(&json!("eq:published")));

        // Re-registering keeps the original position
        state.add_scope("first", params(json!({"status": "eq:archived"})));
        assert_eq!(state.effective_query().get("status"), Some(&json!("eq:published")));
        assert_eq!(state.scopes().identifiers().collect::<Vec<_>>(), ["first", "second"]);
    }

    #[test]
    fn test_remove_scope_records_identifier() {
        let mut state = QueryState::new();
        state.add_scope("active", params(json!({"active": "eq:1"})));
        assert!(state.effective_query().contains_key("active"));

        state.remove_scope("active");
        state.remove_scope("never_registered");
        state.remove_scope("active");

        assert!(state.effective_query().is_empty());
        assert_eq!(state.removed_scopes(), ["active", "never_registered"]);
    }
}
