//! # Author Shelf
//!
//! Browse a creator's posts the way a fan page does: filter by tag, search
//! titles and descriptions, sort, and page through the results twelve at a
//! time. Your content directory is the data source: author profiles and
//! posts are markdown files with TOML front matter.
//!
//! # Architecture: Scan Once, Project Many
//!
//! ```text
//! 1. Scan      content/  →  Manifest         (filesystem → structured data)
//! 2. Project   Manifest + QueryState  →  Projection   (pure, per request)
//! ```
//!
//! Scanning is the only stage that touches the filesystem. A listing is a
//! pure function of the author's posts and the current [`query::QueryState`],
//! so every change to the search box, tag, sort selector or page number is
//! handled by recomputing from scratch. There is no cache to invalidate and
//! no stale result to race against.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Reads author profiles and posts into a [`scan::Manifest`] |
//! | [`projection`] | Filter, sort and paginate; tag index, page links, neighbors |
//! | [`query`] | Listing parameters: parsing, defaults, query strings, transitions |
//! | [`config`] | `config.toml` loading, merging with stock defaults, validation |
//! | [`frontmatter`] | `+++` TOML front matter, dates, description fallback |
//! | [`slug`] | Ids from file paths |
//! | [`types`] | Shared content types (`Post`, `Author`, `Platform`) |
//! | [`output`] | CLI output formatting |
//!
//! # Listing Semantics
//!
//! - Tag filter is a single exact, case-sensitive match; empty means all.
//! - Search is a case-insensitive substring of title or description.
//! - Sorting is stable: ties keep manifest order.
//! - Page size is 12 unless configured. Pages past the end are empty rather
//!   than an error; `listing.out_of_range = "clamp"` snaps to a valid page.

pub mod config;
pub mod frontmatter;
pub mod output;
pub mod projection;
pub mod query;
pub mod scan;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
