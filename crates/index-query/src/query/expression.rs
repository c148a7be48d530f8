//! Query expression types.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::collection::CollectionQuery;
use super::evaluate::Row;
use super::leaf::{MatchQuery, PathTreeQuery};
use crate::column::{Column, Value};
use crate::error::Result;

/// A query expression over index columns.
///
/// Columns are borrowed for the lifetime `'c`. Expressions are immutable once
/// built: combinators own their children and expose them read-only.
#[derive(Debug, Clone, PartialEq)]
pub enum Query<'c> {
    /// Matches every row.
    All,
    Match(MatchQuery<'c>),
    PathTree(PathTreeQuery<'c>),
    And(CollectionQuery<'c>),
    Or(CollectionQuery<'c>),
    Not(Box<Query<'c>>),
    /// Evaluated only by [`Query::matches`]; compiles to an empty clause.
    Deferred(DeferredQuery),
}

impl<'c> Query<'c> {
    pub fn all() -> Self {
        Self::All
    }

    /// Exact match of `column` against `value`.
    pub fn matching(column: &'c Column, value: impl Into<Value>) -> Self {
        Self::Match(MatchQuery::new(column, value))
    }

    /// The subtree rooted at `path`, including `path` itself.
    ///
    /// Fails if `column` is not a path column.
    pub fn path_tree(column: &'c Column, path: impl AsRef<Path>) -> Result<Self> {
        PathTreeQuery::new(column, path).map(Self::PathTree)
    }

    pub fn and<I>(subqueries: I) -> Self
    where
        I: IntoIterator<Item = Query<'c>>,
    {
        Self::And(subqueries.into_iter().collect())
    }

    pub fn or<I>(subqueries: I) -> Self
    where
        I: IntoIterator<Item = Query<'c>>,
    {
        Self::Or(subqueries.into_iter().collect())
    }

    pub fn negate(subquery: Query<'c>) -> Self {
        Self::Not(Box::new(subquery))
    }

    /// A predicate the storage engine cannot express.
    pub fn deferred<F>(name: impl Into<String>, matcher: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        Self::Deferred(DeferredQuery::new(name, matcher))
    }

    /// Children of an AND or OR expression.
    pub fn subqueries(&self) -> Option<&CollectionQuery<'c>> {
        match self {
            Self::And(collection) | Self::Or(collection) => Some(collection),
            _ => None,
        }
    }

    /// Checks whether rows returned for the compiled clause still have to be
    /// filtered with [`Query::matches`].
    pub fn needs_fallback(&self) -> bool {
        match self {
            Self::All | Self::Match(_) | Self::PathTree(_) => false,
            Self::Deferred(_) => true,
            Self::Not(inner) => inner.needs_fallback(),
            Self::And(parts) => parts.iter().any(Query::needs_fallback),
            // An empty OR matches nothing but compiles to no clause at all.
            Self::Or(parts) => parts.is_empty() || parts.iter().any(Query::needs_fallback),
        }
    }
}

type RowMatcher = dyn Fn(&Row) -> bool + Send + Sync;

/// A named row predicate evaluated outside the storage engine.
#[derive(Clone)]
pub struct DeferredQuery {
    name: String,
    matcher: Arc<RowMatcher>,
}

impl DeferredQuery {
    pub fn new<F>(name: impl Into<String>, matcher: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            matcher: Arc::new(matcher),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, row: &Row) -> bool {
        (self.matcher)(row)
    }
}

impl fmt::Debug for DeferredQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQuery")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Two deferred queries are equal when they share the same matcher.
impl PartialEq for DeferredQuery {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.matcher, &other.matcher)
    }
}
