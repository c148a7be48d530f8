//! Column types and their storage conversions.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value::{timestamp_seconds, SqlValue, Value};
use super::StorageKind;
use crate::error::{IndexQueryError, Result};
use crate::path::{decode_path, encode_path};

/// Type of an index column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    /// Unsigned 64-bit integer, stored as decimal text so it cannot overflow.
    LargeInt,
    /// Filesystem path, stored as OS-native bytes.
    Path,
    /// One of a fixed set of names, stored as the name.
    Enum(Vec<String>),
    /// UTC time, stored as fractional seconds since the Unix epoch.
    Timestamp,
}

impl ColumnType {
    /// Creates an enum column type from its variant names.
    pub fn enumeration<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(variants.into_iter().map(Into::into).collect())
    }

    /// Column affinity used in table definitions.
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Text | Self::LargeInt | Self::Enum(_) => "TEXT",
            Self::Integer => "INTEGER",
            Self::Real | Self::Timestamp => "REAL",
            Self::Path => "BLOB",
        }
    }

    pub fn storage_kind(&self) -> StorageKind {
        match self {
            Self::Path => StorageKind::Path,
            _ => StorageKind::Scalar,
        }
    }

    /// Converts a domain value into its stored form.
    ///
    /// Never fails: a value that does not belong to this type is bound in
    /// its natural storage form and left for the engine to compare.
    pub fn to_storage(&self, value: &Value) -> SqlValue {
        match (self, value) {
            (_, Value::Null) => SqlValue::Null,
            (Self::Path, Value::Text(path)) => SqlValue::Blob(encode_path(Path::new(path))),
            (Self::LargeInt, Value::Integer(number)) => SqlValue::Text(number.to_string()),
            (Self::Real | Self::Timestamp, Value::Integer(number)) => {
                SqlValue::Real(*number as f64)
            }
            (Self::Timestamp, Value::Timestamp(time)) => SqlValue::Real(timestamp_seconds(time)),
            (Self::Text | Self::Enum(_), Value::Path(path)) => {
                SqlValue::Text(path.to_string_lossy().into_owned())
            }
            (_, other) => other.natural_storage(),
        }
    }

    /// Decodes a stored value read back from a column of this type.
    pub fn from_storage(&self, value: &SqlValue) -> Result<Value> {
        match (self, value) {
            (_, SqlValue::Null) => Ok(Value::Null),
            (Self::Text, SqlValue::Text(text)) => Ok(Value::Text(text.clone())),
            (Self::Integer, SqlValue::Integer(number)) => Ok(Value::Integer(*number)),
            (Self::Real, SqlValue::Real(number)) => Ok(Value::Real(*number)),
            (Self::Real, SqlValue::Integer(number)) => Ok(Value::Real(*number as f64)),
            (Self::LargeInt, SqlValue::Text(text)) => text
                .parse::<u64>()
                .map(Value::LargeInt)
                .map_err(|error| {
                    IndexQueryError::Conversion(format!(
                        "invalid large integer {text:?}: {error}"
                    ))
                }),
            (Self::Path, SqlValue::Blob(bytes)) => Ok(Value::Path(decode_path(bytes))),
            (Self::Path, SqlValue::Text(text)) => Ok(Value::Path(PathBuf::from(text))),
            (Self::Enum(variants), SqlValue::Text(name)) => {
                if variants.iter().any(|variant| variant == name) {
                    Ok(Value::Text(name.clone()))
                } else {
                    Err(IndexQueryError::Conversion(format!(
                        "{name:?} is not one of {variants:?}"
                    )))
                }
            }
            (Self::Timestamp, SqlValue::Real(seconds)) => timestamp_from_seconds(*seconds),
            (Self::Timestamp, SqlValue::Integer(seconds)) => {
                timestamp_from_seconds(*seconds as f64)
            }
            (column_type, other) => Err(IndexQueryError::Conversion(format!(
                "cannot decode {} value as {column_type}",
                other.type_name()
            ))),
        }
    }
}

fn timestamp_from_seconds(seconds: f64) -> Result<Value> {
    let micros = (seconds * 1_000_000.0).round() as i64;
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos)
        .map(Value::Timestamp)
        .ok_or_else(|| IndexQueryError::Conversion(format!("timestamp out of range: {seconds}")))
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::LargeInt => "large integer",
            Self::Path => "path",
            Self::Enum(_) => "enum",
            Self::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}
