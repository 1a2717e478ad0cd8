//! Utility functions for string sanitization and log formatting.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());

/// Turn an arbitrary figure name into a safe filename stem.
///
/// Every maximal run of non-alphanumeric characters collapses into a single
/// underscore, so `"A photo of: traders!"` becomes `"A_photo_of_traders_"`.
/// Two names may sanitize to the same stem; the caller's overwrite semantics
/// apply.
pub fn sanitize_file_name(name: &str) -> String {
    NON_ALPHANUMERIC_RUN.replace_all(name, "_").into_owned()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte count
/// indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}
