//! Query rewriting.
//!
//! Applies deterministic rewrites that produce shorter clauses:
//! - Flattens nested AND/OR expressions
//! - Unwraps single-item AND/OR expressions
//!
//! Rewrites never change which rows an expression matches. Empty AND/OR
//! expressions are kept as they are.

use super::collection::CollectionQuery;
use super::expression::Query;

/// Rewrites a query into an equivalent, flatter one.
///
/// The function consumes its input and returns a new tree.
pub fn optimize_query(query: Query<'_>) -> Query<'_> {
    match query {
        Query::And(parts) => optimize_and(parts),
        Query::Or(parts) => optimize_or(parts),
        Query::Not(inner) => Query::Not(Box::new(optimize_query(*inner))),
        leaf => leaf,
    }
}

fn optimize_and(parts: CollectionQuery<'_>) -> Query<'_> {
    let mut flattened = Vec::with_capacity(parts.len());

    for query in parts.into_subqueries().into_iter().map(optimize_query) {
        match query {
            // Flatten nested ANDs
            Query::And(nested) => flattened.extend(nested.into_subqueries()),
            other => flattened.push(other),
        }
    }

    unwrap_single(flattened).unwrap_or_else(|parts| Query::And(CollectionQuery::new(parts)))
}

fn optimize_or(parts: CollectionQuery<'_>) -> Query<'_> {
    let mut flattened = Vec::with_capacity(parts.len());

    for query in parts.into_subqueries().into_iter().map(optimize_query) {
        match query {
            // Flatten nested ORs
            Query::Or(nested) => flattened.extend(nested.into_subqueries()),
            other => flattened.push(other),
        }
    }

    unwrap_single(flattened).unwrap_or_else(|parts| Query::Or(CollectionQuery::new(parts)))
}

/// Returns the only element of `parts`, or all of them back.
fn unwrap_single(mut parts: Vec<Query<'_>>) -> Result<Query<'_>, Vec<Query<'_>>> {
    if parts.len() == 1 {
        if let Some(only) = parts.pop() {
            return Ok(only);
        }
    }
    Err(parts)
}
