//! Content directory scanning and manifest generation.
//!
//! Reads author profiles and posts from a content directory into a
//! [`Manifest`]. The manifest is the read-only content source everything
//! else works from: listings borrow its posts, the CLI prints it, and the
//! `scan` command writes it to `manifest.json` for a rendering layer.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                    # Site configuration (optional)
//! ├── authors/
//! │   ├── alice.md                   # id "alice"
//! │   └── bruno.md
//! └── posts/
//!     ├── alice/
//!     │   ├── fox-at-dusk.md         # id "alice/fox-at-dusk"
//!     │   └── winter-zine.mdx
//!     └── bruno/
//!         └── Première Lumière.md    # id "bruno/premiere-lumiere"
//! ```
//!
//! Post directories are free-form; which author a post belongs to comes from
//! its `author` key, not its location. Hidden files and directories (leading
//! `.`) and files that aren't `.md`/`.mdx` are ignored.
//!
//! ## Front Matter
//!
//! Authors:
//!
//! ```toml
//! name = "Alice"
//! platform = "Patreon"           # Patreon | Fanbox | Gumroad
//! platform_url = "https://patreon.com/alice"
//! avatar = "/img/alice.png"
//! banner = "/img/alice-banner.png"
//! platform_icon = "/img/patreon.svg"
//! ```
//!
//! Posts:
//!
//! ```toml
//! title = "Fox at Dusk"
//! date = 2024-03-02               # or datetime, or a quoted string
//! author = "alice"
//! description = "..."             # optional, else the first paragraph
//! tags = ["art"]                  # optional
//! image = "/img/fox.png"          # optional cover
//! alt = "A fox"                   # optional
//!
//! [[files]]                       # optional attachments
//! name = "fox.psd"
//! url = "https://files.example/fox.psd"
//! ```
//!
//! ## Validation
//!
//! The scanner rejects:
//! - files without a `+++` front matter block, malformed TOML, unknown keys
//! - unparsable dates, empty titles, unknown platforms, non-http platform URLs
//! - two files that map to the same id
//! - posts whose `author` has no profile

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontMatterError};
use crate::slug;
use crate::types::{Attachment, Author, Platform, Post};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Could not start parse workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("{}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("{}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("No usable id can be derived from {}", .0.display())]
    NoId(PathBuf),
    #[error("Duplicate id `{id}`: {} and {}", first.display(), second.display())]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{}: unknown author `{author}`", path.display())]
    UnknownAuthor { path: PathBuf, author: String },
    #[error("{}: unknown platform `{value}` (expected Patreon, Fanbox or Gumroad)", path.display())]
    UnknownPlatform { path: PathBuf, value: String },
}

/// Everything read from a content directory.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Sorted by id.
    pub authors: Vec<Author>,
    /// Sorted by id.
    pub posts: Vec<Post>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Posts by one author, in manifest order.
    pub fn posts_by<'a>(&'a self, author_id: &str) -> impl Iterator<Item = &'a Post> {
        self.posts.iter().filter(move |p| p.author_id == author_id)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthorFrontMatter {
    name: String,
    platform: String,
    platform_url: String,
    avatar: String,
    banner: String,
    platform_icon: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PostFrontMatter {
    title: String,
    date: toml::Value,
    author: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    files: Vec<Attachment>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    let authors = scan_authors(root)?;
    let posts = scan_posts(root, config::effective_threads(&config.processing))?;

    let known: BTreeSet<&str> = authors.iter().map(|a| a.id.as_str()).collect();
    if let Some(orphan) = posts.iter().find(|p| !known.contains(p.author_id.as_str())) {
        return Err(ScanError::UnknownAuthor {
            path: PathBuf::from(&orphan.source_path),
            author: orphan.author_id.clone(),
        });
    }

    tracing::info!(
        authors = authors.len(),
        posts = posts.len(),
        "scanned {}",
        root.display()
    );

    Ok(Manifest {
        authors,
        posts,
        config,
    })
}

/// Parse every `authors/*.md` profile. A missing `authors/` means no authors.
fn scan_authors(root: &Path) -> Result<Vec<Author>, ScanError> {
    let dir = root.join("authors");
    if !dir.is_dir() {
        tracing::debug!("no authors directory in {}", root.display());
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && !is_hidden(p) && slug::is_content_file(p))
        .collect();
    files.sort();

    let mut authors = files
        .iter()
        .map(|path| parse_author(root, path))
        .collect::<Result<Vec<_>, _>>()?;
    authors.sort_by(|a, b| a.id.cmp(&b.id));
    check_unique_ids(authors.iter().map(|a| (a.id.as_str(), a.source_path.as_str())))?;
    Ok(authors)
}

fn parse_author(root: &Path, path: &Path) -> Result<Author, ScanError> {
    let rel = relative(root, path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let id = slug::slugify(&stem);
    if id.is_empty() {
        return Err(ScanError::NoId(rel));
    }

    let content = fs::read_to_string(path)?;
    let (meta, body) = frontmatter::parse::<AuthorFrontMatter>(&content).map_err(|source| {
        ScanError::FrontMatter {
            path: rel.clone(),
            source,
        }
    })?;

    let platform: Platform = meta
        .platform
        .parse()
        .map_err(|value| ScanError::UnknownPlatform {
            path: rel.clone(),
            value,
        })?;
    if !is_http_url(&meta.platform_url) {
        return Err(ScanError::Invalid {
            path: rel,
            reason: format!("platform_url `{}` is not an http(s) URL", meta.platform_url),
        });
    }

    tracing::debug!(id, "parsed author");
    Ok(Author {
        id,
        name: meta.name,
        platform,
        platform_url: meta.platform_url,
        avatar: meta.avatar,
        banner: meta.banner,
        platform_icon: meta.platform_icon,
        bio: body.trim().to_string(),
        source_path: rel.to_string_lossy().to_string(),
    })
}

/// Walk `posts/` and parse every post on a pool of `threads` workers.
fn scan_posts(root: &Path, threads: usize) -> Result<Vec<Post>, ScanError> {
    let dir = root.join("posts");
    if !dir.is_dir() {
        tracing::debug!("no posts directory in {}", root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = entry?;
        if entry.file_type().is_file() && slug::is_content_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let mut posts = pool.install(|| {
        files
            .par_iter()
            .map(|path| parse_post(root, &dir, path))
            .collect::<Result<Vec<_>, _>>()
    })?;

    posts.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.source_path.cmp(&b.source_path)));
    check_unique_ids(posts.iter().map(|p| (p.id.as_str(), p.source_path.as_str())))?;
    Ok(posts)
}

fn parse_post(root: &Path, posts_dir: &Path, path: &Path) -> Result<Post, ScanError> {
    let rel = relative(root, path);
    let id = path
        .strip_prefix(posts_dir)
        .ok()
        .and_then(slug::content_id)
        .ok_or_else(|| ScanError::NoId(rel.clone()))?;

    let content = fs::read_to_string(path)?;
    let front_matter_err = |source| ScanError::FrontMatter {
        path: rel.clone(),
        source,
    };
    let (meta, body) =
        frontmatter::parse::<PostFrontMatter>(&content).map_err(front_matter_err)?;
    let publish_date = frontmatter::parse_date(&meta.date).map_err(front_matter_err)?;

    let title = meta.title.trim().to_string();
    if title.is_empty() {
        return Err(ScanError::Invalid {
            path: rel,
            reason: "title must not be empty".into(),
        });
    }

    let description = meta
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .or_else(|| frontmatter::first_paragraph(body))
        .unwrap_or_default();

    tracing::debug!(id, "parsed post");
    Ok(Post {
        id,
        author_id: meta.author.trim().to_string(),
        title,
        description,
        publish_date,
        tags: dedup_tags(meta.tags),
        image: meta.image,
        alt: meta.alt,
        files: meta.files,
        body: body.to_string(),
        source_path: rel.to_string_lossy().to_string(),
    })
}

/// Drop empty and repeated tags, keeping first-seen order.
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tags.into_iter()
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

/// Fails on the first id seen twice, naming both source files.
fn check_unique_ids<'a>(ids: impl Iterator<Item = (&'a str, &'a str)>) -> Result<(), ScanError> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for (id, source) in ids {
        if let Some(first) = seen.insert(id, source) {
            return Err(ScanError::DuplicateId {
                id: id.to_string(),
                first: PathBuf::from(first),
                second: PathBuf::from(source),
            });
        }
    }
    Ok(())
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
