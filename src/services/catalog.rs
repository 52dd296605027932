//! Catalog name handling.

/// Split a comma-separated list of names, trimming and dropping blanks.
pub fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
