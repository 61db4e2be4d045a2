//! TOML front matter for content files.
//!
//! Every author profile and post starts with a `+++` fenced TOML block:
//!
//! ```text
//! +++
//! title = "First Light"
//! date = 2024-03-02
//! author = "alice"
//! tags = ["art", "sketch"]
//! +++
//!
//! Markdown body…
//! ```
//!
//! This module only splits and decodes; what keys a post or author needs is
//! decided by [`crate::scan`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::de::DeserializeOwned;
use thiserror::Error;

const DELIMITER: &str = "+++";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing `+++` front matter block")]
    Missing,
    #[error("front matter block is not closed with `+++`")]
    Unterminated,
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// A content file split into its front matter and markdown body.
#[derive(Debug, PartialEq)]
pub struct Document<'a> {
    pub front_matter: &'a str,
    pub body: &'a str,
}

/// Split `content` at the `+++` fences.
///
/// The opening fence must be the first line (a UTF-8 BOM is tolerated).
/// Fence lines may carry trailing whitespace or `\r`.
pub fn split(content: &str) -> Result<Document<'_>, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next().ok_or(FrontMatterError::Missing)?;
    if first.trim_end() != DELIMITER {
        return Err(FrontMatterError::Missing);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Ok(Document {
                front_matter: &content[start..offset],
                body: &content[offset + line.len()..],
            });
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

/// Split and deserialize in one go.
pub fn parse<T: DeserializeOwned>(content: &str) -> Result<(T, &str), FrontMatterError> {
    let doc = split(content)?;
    let meta: T = toml::from_str(doc.front_matter)?;
    Ok((meta, doc.body))
}

/// Interpret a front matter `date` value as a UTC timestamp.
///
/// Accepts native TOML dates and datetimes as well as strings in RFC 3339,
/// `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD` form. Values without an offset are
/// taken as UTC; bare dates are midnight.
pub fn parse_date(value: &toml::Value) -> Result<DateTime<Utc>, FrontMatterError> {
    match value {
        toml::Value::Datetime(dt) => parse_date_str(&dt.to_string()),
        toml::Value::String(s) => parse_date_str(s),
        other => Err(FrontMatterError::InvalidDate(other.to_string())),
    }
}

fn parse_date_str(s: &str) -> Result<DateTime<Utc>, FrontMatterError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FrontMatterError::InvalidDate(s.to_string()))
}

/// Plain text of the first non-empty paragraph of a markdown body.
///
/// Inline markup is flattened, line breaks become spaces and image alt text
/// is skipped. Headings, lists and code blocks are not paragraphs.
pub fn first_paragraph(markdown: &str) -> Option<String> {
    let mut text = String::new();
    let mut in_paragraph = false;
    let mut image_depth = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Text(t) | Event::Code(t) if in_paragraph && image_depth == 0 => {
                text.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }
    None
}
