//! Compilation of query expressions into parameterized clauses.
//!
//! Every expression compiles to clause text using `?` placeholders and the
//! arguments to bind, in placeholder order. Argument values never appear in
//! the clause text.

use serde::{Deserialize, Serialize};

use super::collection::CollectionQuery;
use super::expression::Query;
use crate::column::SqlValue;

/// A compiled clause and its positional arguments.
///
/// Owns its data, so it can outlive the expression and columns it was
/// compiled from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    text: String,
    args: Vec<SqlValue>,
    placeholders: usize,
}

impl Clause {
    /// Leaf clause whose text holds one placeholder per argument.
    pub(crate) fn new(text: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            text: text.into(),
            placeholders: args.len(),
            args,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    /// True when the expression declined to produce clause text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of placeholders emitted into the clause text.
    ///
    /// Tracked during compilation, so a `?` inside a column name is not
    /// counted.
    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.text, self.args)
    }
}

impl<'c> Query<'c> {
    /// Compiles the expression into a clause.
    ///
    /// Never fails: everything that can go wrong is rejected when the
    /// expression is built. Compiling the same expression twice yields
    /// identical output.
    pub fn compile(&self) -> Clause {
        let clause = self.clause();
        if log::log_enabled!(log::Level::Trace) {
            let args: Vec<_> = clause.args.iter().map(SqlValue::to_string).collect();
            log::trace!(
                "compiled query clause {:?} with arguments [{}]",
                clause.text,
                args.join(", ")
            );
        }
        clause
    }

    fn clause(&self) -> Clause {
        match self {
            Self::All => Clause::new("TRUE", Vec::new()),
            Self::Match(query) => query.clause(),
            Self::PathTree(query) => query.clause(),
            Self::And(parts) => parts.clause_with_joiner("AND"),
            Self::Or(parts) => parts.clause_with_joiner("OR"),
            Self::Not(inner) => negate_clause(inner.clause()),
            Self::Deferred(query) => {
                log::trace!("query {:?} deferred to the fallback matcher", query.name());
                Clause::default()
            }
        }
    }
}

fn negate_clause(inner: Clause) -> Clause {
    if inner.is_empty() {
        // Nothing to negate; the fallback matcher applies the negation.
        log::debug!("negation of an empty clause left to the fallback matcher");
        return inner;
    }
    Clause {
        text: format!("not ({})", inner.text),
        ..inner
    }
}

impl<'c> CollectionQuery<'c> {
    /// Joins the parenthesized clauses of all subqueries with `joiner`.
    ///
    /// With no subqueries the result is the empty clause.
    fn clause_with_joiner(&self, joiner: &str) -> Clause {
        let mut parts = Vec::with_capacity(self.len());
        let mut args = Vec::new();
        let mut placeholders = 0;

        for subquery in self {
            let Clause {
                text,
                args: sub_args,
                placeholders: sub_placeholders,
            } = subquery.clause();
            parts.push(format!("({text})"));
            args.extend(sub_args);
            placeholders += sub_placeholders;
        }

        Clause {
            text: parts.join(format!(" {joiner} ").as_str()),
            args,
            placeholders,
        }
    }
}
