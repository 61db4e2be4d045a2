//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a user
//! file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml    # optional
//! ├── authors/
//! └── posts/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "Author Shelf"
//! base_url = "/"
//!
//! [listing]
//! page_size = 12            # Posts per listing page (> 0)
//! default_sort = "newest"   # newest | oldest | title-asc | title-desc
//! out_of_range = "empty"    # empty | clamp
//!
//! [pagination]
//! boundaries = 2            # Page links always shown at each end
//! siblings = 1              # Page links shown around the current page
//!
//! [processing]
//! # max_processes = 4       # Parallel parse workers (default: CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::projection::OutOfRange;
use crate::query::SortOption;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used when building links.
    pub site: SiteSection,
    /// Listing defaults (page size, sort, out-of-range policy).
    pub listing: ListingConfig,
    /// Page-link window shape.
    pub pagination: PaginationConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    /// Prefix for generated listing links, e.g. `/` or `https://example.org/`.
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Author Shelf".to_string(),
            base_url: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    pub page_size: usize,
    pub default_sort: SortOption,
    pub out_of_range: OutOfRange,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: crate::query::DEFAULT_PAGE_SIZE,
            default_sort: SortOption::Newest,
            out_of_range: OutOfRange::Empty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    pub boundaries: usize,
    pub siblings: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            boundaries: 2,
            siblings: 1,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel parse workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing.page_size == 0 {
            return Err(ConfigError::Validation(
                "listing.page_size must be greater than 0".into(),
            ));
        }
        if self.site.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// The base layer that user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(
        root = %root.display(),
        page_size = config.listing.page_size,
        "loaded site config"
    );
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Author Shelf Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

[site]
# Site name shown in listings.
title = "Author Shelf"
# Prefix for listing links (pagination, tag and search links).
base_url = "/"

[listing]
# Posts per listing page. Must be greater than 0.
page_size = 12
# Sort used when a request has no (or an unknown) `sort` parameter.
# One of: newest, oldest, title-asc, title-desc
default_sort = "newest"
# What to show for a page number outside 1..=total_pages.
#   empty - an empty page (counts and total pages are still reported)
#   clamp - the nearest valid page
out_of_range = "empty"

[pagination]
# Page links always shown at the start and end of the page list.
boundaries = 2
# Page links shown on each side of the current page.
siblings = 1

[processing]
# Maximum parallel workers used to parse content files.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
