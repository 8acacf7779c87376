//! Query Builder Module - fluent predicates encoded as API query parameters

pub mod builder;
pub mod delegate;
pub mod encoding;
pub mod execution;
pub mod pagination;
pub mod scopes;
pub mod state;
pub mod types;
pub mod where_clause;
pub mod wire;

pub use builder::QueryBuilder;
pub use delegate::{DelegateError, ParameterDelegate, QueryDelegate, RejectingDelegate};
pub use execution::{FindKey, Found};
pub use pagination::PaginationEnvelope;
pub use scopes::{ScopeFn, ScopeRegistry};
pub use state::{QueryParameters, QueryState, ScopeSet};
pub use types::{Boolean, DatePart, PredicateOperator};
