// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage naming for uploaded media.

use uuid::Uuid;

/// Longest file extension kept on stored objects.
const MAX_EXTENSION_LEN: usize = 10;

/// Random object name keeping the original file's extension.
///
/// `cover.PNG` becomes `<uuid>.png`; names without a usable extension get a
/// bare uuid.
pub fn object_name(original_filename: &str) -> String {
    let id = Uuid::new_v4();
    match extension(original_filename) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    let valid = !stem.is_empty()
        && !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

/// True for content types accepted by the image upload endpoint.
pub fn is_image(content_type: &str) -> bool {
    content_type.trim().to_ascii_lowercase().starts_with("image/")
}
