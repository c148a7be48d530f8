//! Fallback matching of query expressions against decoded rows.
//!
//! Used for expressions the storage engine cannot evaluate on its own (see
//! [`Query::needs_fallback`]): run the compiled clause, then filter the
//! returned rows here.

use std::collections::HashMap;

use super::expression::Query;
use crate::column::{Column, SqlValue, Value};
use crate::error::Result;

/// A row read from an index table, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: SqlValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: SqlValue) {
        self.values.insert(column.into(), value);
    }

    /// Stored value of a column, if the row carries it.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values.get(column)
    }

    /// Decodes the value of `column`; a missing column decodes as null.
    pub fn value(&self, column: &Column) -> Result<Value> {
        match self.get(column.name()) {
            Some(stored) => column.from_storage(stored),
            None => Ok(Value::Null),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, SqlValue)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value))
                .collect(),
        }
    }
}

impl<'c> Query<'c> {
    /// Evaluates the expression against a row without the storage engine.
    ///
    /// A row matches only when the expression is true for it. Comparisons
    /// involving NULL are unknown, as in the storage engine, so negating
    /// them does not select the row either.
    pub fn matches(&self, row: &Row) -> bool {
        self.evaluate(row) == Some(true)
    }

    /// Three-valued evaluation; `None` is unknown.
    pub(crate) fn evaluate(&self, row: &Row) -> Option<bool> {
        match self {
            Self::All => Some(true),
            Self::Match(query) => query.evaluate(row),
            Self::PathTree(query) => query.evaluate(row),
            Self::And(parts) => {
                let mut result = Some(true);
                for part in parts {
                    match part.evaluate(row) {
                        Some(false) => return Some(false),
                        None => result = None,
                        Some(true) => {}
                    }
                }
                result
            }
            Self::Or(parts) => {
                let mut result = Some(false);
                for part in parts {
                    match part.evaluate(row) {
                        Some(true) => return Some(true),
                        None => result = None,
                        Some(false) => {}
                    }
                }
                result
            }
            Self::Not(inner) => inner.evaluate(row).map(|value| !value),
            Self::Deferred(query) => Some(query.matches(row)),
        }
    }
}
