//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (author, post) is its semantic identity, a positional
//! index and a title, with filesystem paths shown as secondary context via
//! indented `Source:` lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Authors
//! 001 Alice Marsh (4 posts)
//!     Source: authors/alice.md
//!     Patreon: https://www.patreon.com/alicemarsh
//!     001 Fox at Dusk
//!         Source: posts/alice/fox-at-dusk.md
//!         Tags: art, animals
//!
//! Config
//!     config.toml
//! ```
//!
//! ## List
//!
//! ```text
//! Alice Marsh (Patreon)
//! Tag: art · Sort: Title A-Z
//! Showing 1–2 of 2
//! 001 2024-03-02 Fox at Dusk
//!     A red fox crossing the field behind the studio.
//! 002 2024-01-15 Owl Sketches
//!     Three pages of barn owls drawn from life.
//! Pages: [1]
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::projection::{Neighbors, PageLink, Projection, TagIndex};
use crate::query::QueryState;
use crate::scan::Manifest;
use crate::types::{Author, Post};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn post_date(post: &Post) -> String {
    post.publish_date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan output: every author with their posts, then config files.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Authors".to_string()];

    for (i, author) in manifest.authors.iter().enumerate() {
        let posts: Vec<&Post> = manifest.posts_by(&author.id).collect();
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            author.name,
            plural(posts.len(), "post")
        ));
        lines.push(format!("{}Source: {}", indent(1), author.source_path));
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            author.platform,
            author.platform_url
        ));

        for (j, post) in posts.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), post.title));
            lines.push(format!("{}Source: {}", indent(2), post.source_path));
            if !post.tags.is_empty() {
                lines.push(format!("{}Tags: {}", indent(2), post.tags.join(", ")));
            }
            if !post.files.is_empty() {
                lines.push(format!("{}Files: {}", indent(2), post.files.len()));
            }
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(defaults)", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Listing output
// ============================================================================

/// Format one listing page with its filter line, summary and page links.
pub fn format_listing(
    author: &Author,
    query: &QueryState,
    projection: &Projection<'_>,
    links: &[PageLink],
) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", author.name, author.platform)];

    let mut filters = Vec::new();
    if !query.search.is_empty() {
        filters.push(format!("Search: \"{}\"", query.search));
    }
    if !query.tag.is_empty() {
        filters.push(format!("Tag: {}", query.tag));
    }
    filters.push(format!("Sort: {}", query.sort.label()));
    lines.push(filters.join(" · "));

    let summary = projection.summary();
    if projection.total_filtered() == 0 {
        lines.push("No posts match".to_string());
    } else {
        lines.push(summary.to_string());
        if projection.page_items().is_empty() {
            lines.push(format!(
                "Page {} is out of range (1-{})",
                projection.page(),
                projection.total_pages()
            ));
        }
    }

    for (i, post) in projection.page_items().iter().enumerate() {
        lines.push(format!(
            "{} {} {}",
            format_index(summary.first + i),
            post_date(post),
            post.title
        ));
        if !post.description.is_empty() {
            lines.push(format!("{}{}", indent(1), truncate_desc(&post.description, 72)));
        }
    }

    if !links.is_empty() {
        lines.push(format!("Pages: {}", format_page_links(links)));
    }

    lines
}

/// `1 2 [3] 4 … 9`, with the current page bracketed.
pub fn format_page_links(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page {
                number,
                current: true,
            } => format!("[{number}]"),
            PageLink::Page { number, .. } => number.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print a listing page to stdout.
pub fn print_listing(
    author: &Author,
    query: &QueryState,
    projection: &Projection<'_>,
    links: &[PageLink],
) {
    for line in format_listing(author, query, projection, links) {
        println!("{}", line);
    }
}

// ============================================================================
// Tags output
// ============================================================================

/// Format an author's tag index, one tag per line with its post count.
pub fn format_tags(author: &Author, tags: &TagIndex) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", author.name, plural(tags.len(), "tag"))];
    for (tag, count) in tags.iter() {
        lines.push(format!("{}{} ({})", indent(1), tag, count));
    }
    lines
}

/// Print an author's tag index to stdout.
pub fn print_tags(author: &Author, tags: &TagIndex) {
    for line in format_tags(author, tags) {
        println!("{}", line);
    }
}

// ============================================================================
// Post detail output
// ============================================================================

/// Format a single post with attachments and its previous/next neighbors.
pub fn format_post_detail(post: &Post, author: &Author, neighbors: &Neighbors<'_>) -> Vec<String> {
    let mut lines = vec![
        post.title.clone(),
        format!("{}By: {} ({})", indent(1), author.name, author.platform),
        format!("{}Date: {}", indent(1), post_date(post)),
        format!("{}Source: {}", indent(1), post.source_path),
    ];
    if !post.tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), post.tags.join(", ")));
    }
    if let Some(image) = &post.image {
        match &post.alt {
            Some(alt) => lines.push(format!("{}Image: {} ({})", indent(1), image, alt)),
            None => lines.push(format!("{}Image: {}", indent(1), image)),
        }
    }
    if !post.description.is_empty() {
        lines.push(format!("{}{}", indent(1), post.description));
    }

    if !post.files.is_empty() {
        lines.push(String::new());
        lines.push("Files".to_string());
        for (i, file) in post.files.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), file.name));
            lines.push(format!("{}{}", indent(2), file.url));
        }
    }

    if neighbors.prev.is_some() || neighbors.next.is_some() {
        lines.push(String::new());
        if let Some(prev) = neighbors.prev {
            lines.push(format!("Prev: {} ({})", prev.title, prev.id));
        }
        if let Some(next) = neighbors.next {
            lines.push(format!("Next: {} ({})", next.title, next.id));
        }
    }

    lines
}

/// Print a single post to stdout.
pub fn print_post_detail(post: &Post, author: &Author, neighbors: &Neighbors<'_>) {
    for line in format_post_detail(post, author, neighbors) {
        println!("{}", line);
    }
}
