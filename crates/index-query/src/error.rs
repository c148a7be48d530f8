use std::path::PathBuf;

use crate::column::StorageKind;

#[derive(Debug, thiserror::Error)]
pub enum IndexQueryError {
    #[error("Column {column} has storage kind {found}, expected {expected}")]
    ColumnType {
        column: String,
        expected: StorageKind,
        found: StorageKind,
    },

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Could not determine a home directory, set HOME to your user directory")]
    HomeNotFound,

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, IndexQueryError>;
