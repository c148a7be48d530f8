//! Column descriptors for the local index tables.
//!
//! A [`Column`] names a field and carries its [`ColumnType`], which owns the
//! conversion between domain values ([`Value`]) and the representation the
//! storage engine binds ([`SqlValue`]). Queries only ever reach stored bytes
//! through these conversions.

mod types;
mod value;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use types::ColumnType;
pub use value::{SqlValue, Value};

/// Storage kind declared by a column type.
///
/// Path columns store OS-native path bytes and are the only columns that
/// support subtree queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Path,
    Scalar,
}

impl StorageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Scalar => "scalar",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named column of an index table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.column_type.storage_kind()
    }

    /// Converts a domain value into the value bound for this column.
    pub fn to_storage(&self, value: &Value) -> SqlValue {
        self.column_type.to_storage(value)
    }

    /// Decodes a stored value read back from this column.
    pub fn from_storage(&self, value: &SqlValue) -> Result<Value> {
        self.column_type.from_storage(value)
    }
}
