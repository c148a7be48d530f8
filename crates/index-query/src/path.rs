//! Path byte encoding for path columns and subtree prefixes.

use std::path::{is_separator, Path, PathBuf, MAIN_SEPARATOR};

/// Encodes a path into the bytes stored in path columns.
///
/// On Unix these are the raw OS bytes, so paths that are not valid UTF-8
/// survive unchanged. Elsewhere paths are stored as UTF-8.
pub fn encode_path(path: &Path) -> Vec<u8> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    }
    #[cfg(not(unix))]
    {
        path.to_string_lossy().into_owned().into_bytes()
    }
}

/// Decodes bytes read from a path column.
pub fn decode_path(bytes: &[u8]) -> PathBuf {
    #[cfg(unix)]
    {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        PathBuf::from(OsStr::from_bytes(bytes))
    }
    #[cfg(not(unix))]
    {
        PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Returns the byte prefix shared by every descendant of `file_bytes`.
///
/// A separator is appended unless the path already ends with one, so `/`
/// stays `/`. An empty path has an empty prefix.
pub fn directory_prefix(file_bytes: &[u8]) -> Vec<u8> {
    let mut prefix = file_bytes.to_vec();
    match file_bytes.last() {
        None => {}
        Some(&last) if is_separator(char::from(last)) => {}
        Some(_) => prefix.push(MAIN_SEPARATOR as u8),
    }
    prefix
}

/// Checks whether `candidate` is the subtree root or one of its descendants.
pub fn is_in_subtree(candidate: &[u8], file_bytes: &[u8], dir_bytes: &[u8]) -> bool {
    candidate == file_bytes || candidate.starts_with(dir_bytes)
}
