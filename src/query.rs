//! Listing query state and request parameters.
//!
//! A [`QueryState`] is rebuilt for every request from the recognized
//! parameters and never persisted:
//!
//! | Key    | Meaning                       | Default            |
//! |--------|-------------------------------|--------------------|
//! | `q`    | case-insensitive text search  | empty (no filter)  |
//! | `tag`  | single exact-match tag        | empty (no filter)  |
//! | `sort` | `newest`, `oldest`, `title-asc`, `title-desc` | configured sort |
//! | `page` | 1-based page number           | `1`                |
//!
//! Unknown keys are ignored; unknown sort values and unparsable page numbers
//! fall back to their defaults. Page numbers are *not* range-checked here,
//! that is the projection's job.
//!
//! User interactions (submitting a search, picking a tag, paging) are pure
//! transitions from one `QueryState` to the next. Turning the result into a
//! URL, a CLI invocation or an API response is up to the caller.

use crate::config::ListingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::form_urlencoded::{self, Serializer};

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// The four listing orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    TitleAsc,
    TitleDesc,
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown sort option `{0}` (expected newest, oldest, title-asc or title-desc)")]
pub struct ParseSortError(pub String);

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::TitleAsc,
        SortOption::TitleDesc,
    ];

    /// Parameter value, e.g. `title-asc`.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::TitleAsc => "title-asc",
            SortOption::TitleDesc => "title-desc",
        }
    }

    /// Human-readable label for a sort selector.
    pub fn label(self) -> &'static str {
        match self {
            SortOption::Newest => "Newest First",
            SortOption::Oldest => "Oldest First",
            SortOption::TitleAsc => "Title A-Z",
            SortOption::TitleDesc => "Title Z-A",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| ParseSortError(s.to_string()))
    }
}

/// Values a request falls back to when a parameter is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    pub sort: SortOption,
    pub page_size: usize,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            sort: SortOption::Newest,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<&ListingConfig> for QueryDefaults {
    fn from(listing: &ListingConfig) -> Self {
        Self {
            sort: listing.default_sort,
            page_size: listing.page_size,
        }
    }
}

/// Parameters controlling one listing computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    /// Free-text search; empty means no text filter.
    pub search: String,
    /// Single tag filter; empty means no tag filter.
    pub tag: String,
    pub sort: SortOption,
    /// 1-based; may be zero, negative or past the last page.
    pub page: i64,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::from_defaults(&QueryDefaults::default())
    }
}

impl QueryState {
    pub fn from_defaults(defaults: &QueryDefaults) -> Self {
        Self {
            search: String::new(),
            tag: String::new(),
            sort: defaults.sort,
            page: 1,
            page_size: defaults.page_size,
        }
    }

    /// Build a state from already-decoded `(key, value)` pairs.
    ///
    /// The first occurrence of a key wins.
    pub fn from_params<I, K, V>(params: I, defaults: &QueryDefaults) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut search = None;
        let mut tag = None;
        let mut sort = None;
        let mut page = None;

        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                "q" if search.is_none() => search = Some(value.to_string()),
                "tag" if tag.is_none() => tag = Some(value.to_string()),
                "sort" if sort.is_none() => {
                    sort = Some(value.parse::<SortOption>().unwrap_or_else(|e| {
                        tracing::debug!("{e}; using {}", defaults.sort);
                        defaults.sort
                    }))
                }
                "page" if page.is_none() => {
                    page = Some(value.trim().parse::<i64>().unwrap_or_else(|_| {
                        tracing::debug!(value, "unparsable page number; using 1");
                        1
                    }))
                }
                _ => {}
            }
        }

        Self {
            search: search.unwrap_or_default(),
            tag: tag.unwrap_or_default(),
            sort: sort.unwrap_or(defaults.sort),
            page: page.unwrap_or(1),
            page_size: defaults.page_size,
        }
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is optional; `+` decodes to a space and escapes that
    /// aren't valid UTF-8 become U+FFFD.
    pub fn from_query_string(query: &str, defaults: &QueryDefaults) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_params(form_urlencoded::parse(query.as_bytes()), defaults)
    }

    /// Serialize back to a query string, leaving out defaulted parameters.
    ///
    /// Keys come out in the order `q`, `tag`, `sort`, `page`. Returns an empty
    /// string when everything is at its default.
    pub fn to_query_string(&self, defaults: &QueryDefaults) -> String {
        let mut query = Serializer::new(String::new());
        if !self.search.is_empty() {
            query.append_pair("q", &self.search);
        }
        if !self.tag.is_empty() {
            query.append_pair("tag", &self.tag);
        }
        if self.sort != defaults.sort {
            query.append_pair("sort", self.sort.as_str());
        }
        if self.page != 1 {
            query.append_pair("page", &self.page.to_string());
        }
        query.finish()
    }

    /// `base_url` with this state's query string appended, if any.
    pub fn href(&self, base_url: &str, defaults: &QueryDefaults) -> String {
        let query = self.to_query_string(defaults);
        if query.is_empty() {
            base_url.to_string()
        } else {
            format!("{base_url}?{query}")
        }
    }

    /// Submit a search. Returns to page 1 and keeps the tag filter.
    pub fn with_search(&self, search: &str) -> Self {
        Self {
            search: search.to_string(),
            page: 1,
            ..self.clone()
        }
    }

    /// Select a tag, replacing any current one. Returns to page 1.
    pub fn with_tag(&self, tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            page: 1,
            ..self.clone()
        }
    }

    pub fn without_tag(&self) -> Self {
        self.with_tag("")
    }

    /// Change the order. Returns to page 1.
    pub fn with_sort(&self, sort: SortOption) -> Self {
        Self {
            sort,
            page: 1,
            ..self.clone()
        }
    }

    /// Move to `page`, or `None` if it's outside `1..=total_pages`.
    pub fn go_to_page(&self, page: i64, total_pages: usize) -> Option<Self> {
        let in_range = page >= 1 && usize::try_from(page).is_ok_and(|p| p <= total_pages);
        in_range.then(|| Self {
            page,
            ..self.clone()
        })
    }

    /// Drop every filter, back to the defaults. Page size is kept.
    pub fn cleared(&self, defaults: &QueryDefaults) -> Self {
        Self {
            page_size: self.page_size,
            ..Self::from_defaults(defaults)
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || !self.tag.is_empty()
    }
}
