//! Query expressions for a local file index.
//!
//! This crate compiles predicates over index rows into parameterized clauses:
//! - Column descriptors with storage conversions
//! - Leaf queries (match everything, exact match, path subtree)
//! - AND / OR / NOT combinators
//! - A fallback matcher for predicates the storage engine cannot evaluate
//! - Platform directory lookup for index and state files
//!
//! ```
//! use index_query::{Column, ColumnType, Query};
//!
//! let path = Column::new("path", ColumnType::Path);
//! let size = Column::new("size", ColumnType::Integer);
//!
//! let query = Query::and([
//!     Query::path_tree(&path, "/sync/docs")?,
//!     Query::negate(Query::matching(&size, 0_i64)),
//! ]);
//! let clause = query.compile();
//!
//! assert_eq!(clause.args().len(), clause.placeholder_count());
//! # Ok::<(), index_query::IndexQueryError>(())
//! ```

pub mod column;
pub mod dirs;
pub mod error;
pub mod path;
pub mod query;

// Re-export main types
pub use column::{Column, ColumnType, SqlValue, StorageKind, Value};
pub use dirs::{AppDirs, Platform};
pub use error::{IndexQueryError, Result};
pub use query::{
    optimize_query, Clause, CollectionQuery, DeferredQuery, MatchQuery, PathTreeQuery, Query, Row,
};
