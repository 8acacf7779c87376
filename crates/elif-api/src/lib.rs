//! # elif-api: Query Builder for REST entity endpoints
//!
//! Provides a fluent query builder that encodes chained predicates into
//! query parameters, executes them against a remote API through an injected
//! [`ApiClient`], and hydrates the returned records into typed models.
//!
//! ```ignore
//! let users = ModelBinding::<User>::new(api);
//!
//! let page = users
//!     .query()
//!     .where_eq("role", "admin")
//!     .where_in("team", [1, 2, 3])
//!     .where_not_null("email")
//!     .paginate(Some(25), 2)
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod hydration;
pub mod model;
pub mod query;
pub mod testing;


// Re-export core traits and types
pub use client::*;
pub use config::*;
pub use error::*;
pub use hydration::*;
pub use model::*;
pub use query::*;
