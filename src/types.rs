//! Shared content types.
//!
//! These are produced by the scan stage, serialized into `manifest.json` for
//! an external rendering layer, and borrowed by the listing projection. Nothing
//! downstream of [`crate::scan`] mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single authored post.
///
/// `id` is derived from the file path under `posts/` and is stable across
/// scans as long as the file isn't moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub title: String,
    /// Front matter `description`, or the first paragraph of the body.
    pub description: String,
    pub publish_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<Attachment>,
    /// Raw markdown body.
    #[serde(default)]
    pub body: String,
    /// Path of the source file relative to the content root.
    pub source_path: String,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A downloadable file attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

/// The publisher of a set of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// File stem of `authors/<id>.md`; posts refer to it in `author = "..."`.
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub platform_url: String,
    pub avatar: String,
    pub banner: String,
    pub platform_icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bio: String,
    pub source_path: String,
}

/// Where an author publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Patreon,
    Fanbox,
    Gumroad,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Patreon, Platform::Fanbox, Platform::Gumroad];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Patreon => "Patreon",
            Platform::Fanbox => "Fanbox",
            Platform::Gumroad => "Gumroad",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
