//! Model System - entities served by a remote API
//!
//! - `core_trait`: the `ApiModel` contract (naming, hydration, scopes)
//! - `binding`: a model bound to its API client, config and global scopes

pub mod binding;
pub mod core_trait;

pub use binding::ModelBinding;
pub use core_trait::ApiModel;
