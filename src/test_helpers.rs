//! Shared test utilities.
//!
//! Provides fixture setup, manifest lookups and a terse [`Post`] builder for
//! projection tests.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! let fox = find_post(&manifest, "alice/fox-at-dusk");
//! assert_eq!(fox.author_id, "alice");
//! ```

use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::{Author, Post};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Builders
// =========================================================================

/// A post with the given id, title, `YYYY-MM-DD` date and tags.
///
/// Author is `alice`; description and body are empty.
pub fn post(id: &str, title: &str, date: &str, tags: &[&str]) -> Post {
    let publish_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("bad test date '{date}': {e}"))
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    Post {
        id: id.to_string(),
        author_id: "alice".to_string(),
        title: title.to_string(),
        description: String::new(),
        publish_date,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image: None,
        alt: None,
        files: Vec::new(),
        body: String::new(),
        source_path: format!("posts/{id}.md"),
    }
}

// =========================================================================
// Manifest lookups (panic with the available ids on a miss)
// =========================================================================

/// Find a post by id. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, id: &str) -> &'a Post {
    manifest.post(id).unwrap_or_else(|| {
        let ids: Vec<&str> = manifest.posts.iter().map(|p| p.id.as_str()).collect();
        panic!("post '{id}' not found. Available: {ids:?}")
    })
}

/// Find an author by id. Panics if not found.
pub fn find_author<'a>(manifest: &'a Manifest, id: &str) -> &'a Author {
    manifest.author(id).unwrap_or_else(|| {
        let ids: Vec<&str> = manifest.authors.iter().map(|a| a.id.as_str()).collect();
        panic!("author '{id}' not found. Available: {ids:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Titles in order.
pub fn titles<'a>(posts: &[&'a Post]) -> Vec<&'a str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

/// Ids of every post by `author_id`, in manifest order.
pub fn post_ids<'a>(manifest: &'a Manifest, author_id: &str) -> Vec<&'a str> {
    manifest
        .posts_by(author_id)
        .map(|p| p.id.as_str())
        .collect()
}
