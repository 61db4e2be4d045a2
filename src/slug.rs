//! Post and author id derivation from content paths.
//!
//! Ids appear in URLs (`/posts/<id>`, `/authors/<id>`) and in `author = "..."`
//! references, so they are normalized to lowercase ASCII:
//!
//! - `posts/Alice/Première Lumière.md` → `alice/premiere-lumiere`
//! - `posts/2024_sketch--dump.mdx` → `2024-sketch-dump`
//! - `authors/Alice.md` → `alice`

use std::path::{Component, Path};

/// Content file extensions recognized as posts and author profiles.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Slugify a single path segment.
///
/// Non-ASCII text is transliterated, everything that isn't alphanumeric
/// collapses into a single `-`, and leading/trailing dashes are trimmed.
pub fn slugify(segment: &str) -> String {
    let ascii = deunicode::deunicode(segment);
    let mut out = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Whether `path` has one of the [`CONTENT_EXTENSIONS`].
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .map(|e| {
            let ext = e.to_string_lossy();
            CONTENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Derive an id from a content file path relative to its collection root.
///
/// Directory segments are kept and joined with `/`; the extension is dropped.
/// Returns `None` when nothing slug-worthy is left (e.g. `posts/---.md`).
pub fn content_id(relative: &Path) -> Option<String> {
    let stem = relative.with_extension("");
    let segments: Vec<String> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(slugify(&s.to_string_lossy())),
            _ => None,
        })
        .collect();

    if segments.is_empty() || segments.iter().any(String::is_empty) {
        return None;
    }
    Some(segments.join("/"))
}
