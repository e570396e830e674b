//! Line ending normalization functions
//!
//! Version 1 files were written on several platforms; free-text fields are
//! normalized to LF while migrating.

/// Normalize line endings in a string to LF (\n)
pub fn normalize_string_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}
