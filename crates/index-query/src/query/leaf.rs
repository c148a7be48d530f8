//! Leaf predicates: exact match and path subtree.

use std::path::Path;

use super::compile::Clause;
use super::evaluate::Row;
use crate::column::{Column, SqlValue, StorageKind, Value};
use crate::error::{IndexQueryError, Result};
use crate::path::{directory_prefix, encode_path, is_in_subtree};

/// Matches rows whose column equals a value.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery<'c> {
    column: &'c Column,
    value: Value,
}

impl<'c> MatchQuery<'c> {
    pub fn new(column: &'c Column, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    pub fn column(&self) -> &'c Column {
        self.column
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn clause(&self) -> Clause {
        Clause::new(
            format!("{} = ?", self.column.name()),
            vec![self.column.to_storage(&self.value)],
        )
    }

    /// `None` when either side of the comparison is NULL.
    pub(crate) fn evaluate(&self, row: &Row) -> Option<bool> {
        let stored = row.get(self.column.name()).filter(|stored| !stored.is_null())?;
        let target = self.column.to_storage(&self.value);
        if target.is_null() {
            return None;
        }
        Some(*stored == target)
    }
}

/// Matches a path and every path below it.
///
/// Descendants are found by byte prefix against the path followed by a
/// separator, so `/a/bc` is not part of the subtree at `/a/b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTreeQuery<'c> {
    column: &'c Column,
    file_bytes: Vec<u8>,
    dir_bytes: Vec<u8>,
}

impl<'c> PathTreeQuery<'c> {
    pub fn new(column: &'c Column, path: impl AsRef<Path>) -> Result<Self> {
        let found = column.storage_kind();
        if found != StorageKind::Path {
            return Err(IndexQueryError::ColumnType {
                column: column.name().to_string(),
                expected: StorageKind::Path,
                found,
            });
        }

        let file_bytes = encode_path(path.as_ref());
        let dir_bytes = directory_prefix(&file_bytes);
        Ok(Self {
            column,
            file_bytes,
            dir_bytes,
        })
    }

    pub fn column(&self) -> &'c Column {
        self.column
    }

    /// Encoded root path.
    pub fn file_bytes(&self) -> &[u8] {
        &self.file_bytes
    }

    /// Byte prefix shared by all descendants.
    pub fn dir_bytes(&self) -> &[u8] {
        &self.dir_bytes
    }

    pub(crate) fn clause(&self) -> Clause {
        let name = self.column.name();
        Clause::new(
            format!("({name} = ? OR substr({name}, 1, ?) = ?)"),
            vec![
                SqlValue::Blob(self.file_bytes.clone()),
                SqlValue::Integer(self.dir_bytes.len() as i64),
                SqlValue::Blob(self.dir_bytes.clone()),
            ],
        )
    }

    /// `None` for a NULL path; non-blob values never match.
    pub(crate) fn evaluate(&self, row: &Row) -> Option<bool> {
        let stored = row.get(self.column.name()).filter(|stored| !stored.is_null())?;
        Some(
            stored
                .as_blob()
                .is_some_and(|stored| is_in_subtree(stored, &self.file_bytes, &self.dir_bytes)),
        )
    }
}
