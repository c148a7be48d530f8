//! Read-only sequence of subqueries held by AND and OR expressions.

use std::ops::Index;
use std::slice;

use super::expression::Query;

/// Ordered, fixed children of a combinator.
///
/// Behaves like an immutable list: length, indexed access, membership and
/// restartable iteration. There is no way to mutate the children in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionQuery<'c> {
    subqueries: Vec<Query<'c>>,
}

impl<'c> CollectionQuery<'c> {
    pub fn new(subqueries: Vec<Query<'c>>) -> Self {
        Self { subqueries }
    }

    pub fn len(&self) -> usize {
        self.subqueries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subqueries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Query<'c>> {
        self.subqueries.get(index)
    }

    /// Checks whether a structurally equal subquery is present.
    pub fn contains(&self, query: &Query<'c>) -> bool {
        self.subqueries.contains(query)
    }

    pub fn iter(&self) -> slice::Iter<'_, Query<'c>> {
        self.subqueries.iter()
    }

    pub fn as_slice(&self) -> &[Query<'c>] {
        &self.subqueries
    }

    pub(crate) fn into_subqueries(self) -> Vec<Query<'c>> {
        self.subqueries
    }
}

impl<'c> Index<usize> for CollectionQuery<'c> {
    type Output = Query<'c>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.subqueries[index]
    }
}

impl<'a, 'c> IntoIterator for &'a CollectionQuery<'c> {
    type Item = &'a Query<'c>;
    type IntoIter = slice::Iter<'a, Query<'c>>;

    fn into_iter(self) -> Self::IntoIter {
        self.subqueries.iter()
    }
}

impl<'c> FromIterator<Query<'c>> for CollectionQuery<'c> {
    fn from_iter<I: IntoIterator<Item = Query<'c>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
