//! Query expressions over index columns and their compilation to clauses.
//!
//! This module provides:
//! - Expression types (`All`, exact match, path subtree, AND, OR, NOT)
//! - Compilation into a parameterized clause plus positional arguments
//! - A fallback matcher evaluating expressions against decoded rows
//! - Tree rewriting (flattening nested AND/OR)

mod collection;
mod compile;
mod evaluate;
mod expression;
mod leaf;
mod optimizer;

pub use collection::CollectionQuery;
pub use compile::Clause;
pub use evaluate::Row;
pub use expression::{DeferredQuery, Query};
pub use leaf::{MatchQuery, PathTreeQuery};
pub use optimizer::optimize_query;
