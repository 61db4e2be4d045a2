//! Post listing projection: filter, sort, paginate.
//!
//! [`project`] maps a post collection and a [`QueryState`] to one page of
//! results plus the counts a listing needs. It is a pure function: no I/O, no
//! caching, no hidden state. Calling it twice with the same inputs yields
//! equal results, and every parameter change is handled by recomputing from
//! scratch.
//!
//! ```text
//! posts ──▶ tag filter ──▶ text filter ──▶ stable sort ──▶ page slice
//! ```
//!
//! Malformed input never fails. A page number outside `1..=total_pages`
//! resolves according to [`OutOfRange`], an unknown tag or a search that
//! matches nothing gives an empty listing.

use crate::query::{QueryState, SortOption};
use crate::types::Post;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Range;

/// How to treat a requested page outside `1..=total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutOfRange {
    /// Return an empty page; totals are still reported.
    #[default]
    Empty,
    /// Snap to the first or last page.
    Clamp,
}

/// One computed listing.
///
/// `page_items()` is always a contiguous run of `filtered()`, in the same
/// order, and never longer than the page size.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a> {
    filtered: Vec<&'a Post>,
    range: Range<usize>,
    page: i64,
    page_size: usize,
    total_pages: usize,
}

impl<'a> Projection<'a> {
    /// All posts passing the filters, in sorted order.
    pub fn filtered(&self) -> &[&'a Post] {
        &self.filtered
    }

    pub fn total_filtered(&self) -> usize {
        self.filtered.len()
    }

    /// `ceil(total_filtered / page_size)`; 0 for an empty listing.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// The page this listing shows, after the out-of-range policy.
    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_items(&self) -> &[&'a Post] {
        &self.filtered[self.range.clone()]
    }

    pub fn summary(&self) -> PageSummary {
        if self.range.is_empty() {
            PageSummary {
                first: 0,
                last: 0,
                total: self.total_filtered(),
            }
        } else {
            PageSummary {
                first: self.range.start + 1,
                last: self.range.end,
                total: self.total_filtered(),
            }
        }
    }

    pub fn has_prev(&self) -> bool {
        self.is_valid_page(self.page.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.is_valid_page(self.page.saturating_add(1))
    }

    fn is_valid_page(&self, page: i64) -> bool {
        page >= 1 && usize::try_from(page).is_ok_and(|p| p <= self.total_pages)
    }
}

impl Serialize for Projection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Projection", 6)?;
        s.serialize_field("page", &self.page)?;
        s.serialize_field("page_size", &self.page_size)?;
        s.serialize_field("total_filtered", &self.total_filtered())?;
        s.serialize_field("total_pages", &self.total_pages)?;
        s.serialize_field("summary", &self.summary())?;
        s.serialize_field("items", self.page_items())?;
        s.end()
    }
}

/// "Showing `first`–`last` of `total`", 1-based and inclusive.
///
/// An empty page is `0–0 of total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {}–{} of {}", self.first, self.last, self.total)
    }
}

/// Project with the default [`OutOfRange::Empty`] policy.
pub fn project<'a, I>(posts: I, query: &QueryState) -> Projection<'a>
where
    I: IntoIterator<Item = &'a Post>,
{
    project_with(posts, query, OutOfRange::Empty)
}

pub fn project_with<'a, I>(posts: I, query: &QueryState, policy: OutOfRange) -> Projection<'a>
where
    I: IntoIterator<Item = &'a Post>,
{
    let search = query.search.to_lowercase();
    let mut filtered: Vec<&Post> = posts
        .into_iter()
        .filter(|post| query.tag.is_empty() || post.has_tag(&query.tag))
        .filter(|post| search.is_empty() || matches_search(post, &search))
        .collect();
    sort_posts(&mut filtered, query.sort);

    let page_size = query.page_size.max(1);
    let total = filtered.len();
    let total_pages = total.div_ceil(page_size);

    let page = match policy {
        OutOfRange::Empty => query.page,
        OutOfRange::Clamp if total_pages == 0 => 1,
        OutOfRange::Clamp => query
            .page
            .clamp(1, i64::try_from(total_pages).unwrap_or(i64::MAX)),
    };

    Projection {
        range: page_range(total, page_size, page),
        filtered,
        page,
        page_size,
        total_pages,
    }
}

/// `needle` must already be lowercased.
fn matches_search(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle) || post.description.to_lowercase().contains(needle)
}

fn page_range(total: usize, page_size: usize, page: i64) -> Range<usize> {
    if page < 1 {
        return 0..0;
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size));
    match start {
        Some(start) if start < total => start..start.saturating_add(page_size).min(total),
        _ => 0..0,
    }
}

/// Stable sort in place; equal keys keep their input order.
pub fn sort_posts(posts: &mut [&Post], sort: SortOption) {
    match sort {
        SortOption::Newest => posts.sort_by(|a, b| b.publish_date.cmp(&a.publish_date)),
        SortOption::Oldest => posts.sort_by(|a, b| a.publish_date.cmp(&b.publish_date)),
        SortOption::TitleAsc => posts.sort_by_cached_key(|p| title_key(&p.title)),
        SortOption::TitleDesc => posts.sort_by_cached_key(|p| Reverse(title_key(&p.title))),
    }
}

/// Collation key approximating a locale-aware compare: accents and case
/// only matter when the transliterated, case-folded forms are equal, and then
/// lowercase sorts before uppercase.
fn title_key(title: &str) -> (String, String, Vec<(bool, char)>) {
    (
        deunicode::deunicode(title).to_lowercase(),
        title.to_lowercase(),
        title.chars().map(|c| (c.is_uppercase(), c)).collect(),
    )
}

/// Distinct tags across a collection, in lexicographic order, with how many
/// posts carry each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    counts: BTreeMap<String, usize>,
}

impl TagIndex {
    pub fn build<'a, I>(posts: I) -> Self
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut counts = BTreeMap::new();
        for post in posts {
            // A tag listed twice on one post still counts once.
            let unique: BTreeSet<&str> = post.tags.iter().map(String::as_str).collect();
            for tag in unique {
                *counts.entry(tag.to_string()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(t, n)| (t.as_str(), *n))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl Serialize for TagIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}

/// An entry in a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageLink {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Page links for a pagination control.
///
/// The first and last `boundaries` pages and `siblings` pages either side of
/// `current` are always listed; other runs collapse into an ellipsis, except
/// a run of one page, which is listed instead. `current` is clamped into
/// range for the window, but only marked when it is actually a valid page.
pub fn page_links(
    current: i64,
    total_pages: usize,
    boundaries: usize,
    siblings: usize,
) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }
    let anchor = usize::try_from(current.max(1))
        .unwrap_or(usize::MAX)
        .min(total_pages);
    let marked = usize::try_from(current)
        .ok()
        .filter(|c| (1..=total_pages).contains(c));

    let mut shown = BTreeSet::new();
    shown.extend(1..=boundaries.min(total_pages));
    shown.extend(total_pages.saturating_sub(boundaries) + 1..=total_pages);
    shown.extend(
        anchor.saturating_sub(siblings).max(1)..=anchor.saturating_add(siblings).min(total_pages),
    );

    let mut links = Vec::with_capacity(shown.len() + 2);
    let mut previous: Option<usize> = None;
    for number in shown {
        if let Some(prev) = previous {
            match number - prev {
                1 => {}
                2 => links.push(page_link(prev + 1, marked)),
                _ => links.push(PageLink::Ellipsis),
            }
        }
        links.push(page_link(number, marked));
        previous = Some(number);
    }
    links
}

fn page_link(number: usize, marked: Option<usize>) -> PageLink {
    PageLink::Page {
        number,
        current: marked == Some(number),
    }
}

/// Adjacent posts for a detail view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Neighbors<'a> {
    /// Listed just before the post.
    pub prev: Option<&'a Post>,
    /// Listed just after the post.
    pub next: Option<&'a Post>,
}

/// Previous/next of post `id` among `posts` in `sort` order, unfiltered.
pub fn neighbors<'a, I>(posts: I, id: &str, sort: SortOption) -> Neighbors<'a>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut ordered: Vec<&Post> = posts.into_iter().collect();
    sort_posts(&mut ordered, sort);
    let Some(idx) = ordered.iter().position(|p| p.id == id) else {
        return Neighbors::default();
    };
    Neighbors {
        prev: idx.checked_sub(1).map(|i| ordered[i]),
        next: ordered.get(idx + 1).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{post, titles};

    fn query(tag: &str, search: &str, sort: SortOption, page: i64) -> QueryState {
        QueryState {
            search: search.into(),
            tag: tag.into(),
            sort,
            page,
            ..QueryState::default()
        }
    }

    /// `n` untagged posts, one day apart, oldest first.
    fn numbered(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                let date = format!("2024-01-{:02}", (i % 28) + 1);
                post(&format!("p{i:02}"), &format!("Post {i:02}"), &date, &[])
            })
            .collect()
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    #[test]
    fn no_filters_keeps_every_post() {
        let posts = numbered(7);
        let result = project(&posts, &QueryState::default());
        assert_eq!(result.total_filtered(), 7);
        let mut ids: Vec<&str> = result.filtered().iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        let mut expected: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn tag_filter_keeps_only_tagged_posts() {
        let posts = vec![
            post("a", "A", "2024-01-01", &["art", "sketch"]),
            post("b", "B", "2024-01-02", &[]),
            post("c", "C", "2024-01-03", &["Art"]),
            post("d", "D", "2024-01-04", &["art"]),
        ];
        let result = project(&posts, &query("art", "", SortOption::Oldest, 1));
        assert!(result.filtered().iter().all(|p| p.has_tag("art")));
        assert_eq!(titles(result.filtered()), ["A", "D"]);
    }

    #[test]
    fn unknown_tag_gives_empty_listing() {
        let posts = numbered(3);
        let result = project(&posts, &query("nope", "", SortOption::Newest, 1));
        assert_eq!(result.total_filtered(), 0);
        assert_eq!(result.total_pages(), 0);
        assert!(result.page_items().is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let posts = vec![
            post("a", "hello world", "2024-01-01", &[]),
            post("b", "Goodbye", "2024-01-02", &[]),
        ];
        let result = project(&posts, &query("", "Hello", SortOption::Newest, 1));
        assert_eq!(titles(result.filtered()), ["hello world"]);
    }

    #[test]
    fn search_matches_description() {
        let mut with_desc = post("a", "Untitled", "2024-01-01", &[]);
        with_desc.description = "A study of FOXES at dusk".into();
        let posts = vec![with_desc, post("b", "Other", "2024-01-02", &[])];
        let result = project(&posts, &query("", "foxes", SortOption::Newest, 1));
        assert_eq!(titles(result.filtered()), ["Untitled"]);
    }

    #[test]
    fn search_handles_non_ascii_case() {
        let posts = vec![post("a", "ÉTUDE in blue", "2024-01-01", &[])];
        let result = project(&posts, &query("", "étude", SortOption::Newest, 1));
        assert_eq!(result.total_filtered(), 1);
    }

    #[test]
    fn tag_and_search_combine_with_and() {
        let posts = vec![
            post("a", "Fox sketch", "2024-01-01", &["art"]),
            post("b", "Fox photo", "2024-01-02", &["photo"]),
            post("c", "Owl sketch", "2024-01-03", &["art"]),
        ];
        let result = project(&posts, &query("art", "fox", SortOption::Newest, 1));
        assert_eq!(titles(result.filtered()), ["Fox sketch"]);
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    #[test]
    fn newest_is_descending_by_date() {
        let posts = vec![
            post("a", "A", "2024-02-01", &[]),
            post("b", "B", "2024-03-01", &[]),
            post("c", "C", "2024-01-01", &[]),
        ];
        let result = project(&posts, &query("", "", SortOption::Newest, 1));
        for pair in result.filtered().windows(2) {
            assert!(pair[0].publish_date >= pair[1].publish_date);
        }
        assert_eq!(titles(result.filtered()), ["B", "A", "C"]);
    }

    #[test]
    fn oldest_is_ascending_by_date() {
        let posts = vec![
            post("a", "A", "2024-02-01", &[]),
            post("b", "B", "2024-03-01", &[]),
            post("c", "C", "2024-01-01", &[]),
        ];
        let result = project(&posts, &query("", "", SortOption::Oldest, 1));
        assert_eq!(titles(result.filtered()), ["C", "A", "B"]);
    }

    #[test]
    fn date_ties_keep_input_order() {
        let posts = vec![
            post("a", "First", "2024-01-01", &[]),
            post("b", "Second", "2024-01-01", &[]),
            post("c", "Third", "2024-01-01", &[]),
        ];
        for sort in [SortOption::Newest, SortOption::Oldest] {
            let result = project(&posts, &query("", "", sort, 1));
            assert_eq!(titles(result.filtered()), ["First", "Second", "Third"]);
        }
    }

    #[test]
    fn title_sorts_ignore_case_and_accents() {
        let posts = vec![
            post("a", "banana", "2024-01-01", &[]),
            post("b", "Éclair", "2024-01-02", &[]),
            post("c", "apple", "2024-01-03", &[]),
            post("d", "Cherry", "2024-01-04", &[]),
        ];
        let asc = project(&posts, &query("", "", SortOption::TitleAsc, 1));
        assert_eq!(titles(asc.filtered()), ["apple", "banana", "Cherry", "Éclair"]);
        let desc = project(&posts, &query("", "", SortOption::TitleDesc, 1));
        assert_eq!(titles(desc.filtered()), ["Éclair", "Cherry", "banana", "apple"]);
    }

    #[test]
    fn lowercase_title_sorts_before_capitalized_twin() {
        let posts = vec![
            post("a", "Hello", "2024-01-01", &[]),
            post("b", "hello", "2024-01-02", &[]),
            post("c", "HeLLo", "2024-01-03", &[]),
        ];
        let asc = project(&posts, &query("", "", SortOption::TitleAsc, 1));
        assert_eq!(titles(asc.filtered()), ["hello", "Hello", "HeLLo"]);
        let desc = project(&posts, &query("", "", SortOption::TitleDesc, 1));
        assert_eq!(titles(desc.filtered()), ["HeLLo", "Hello", "hello"]);
    }

    #[test]
    fn equal_titles_keep_input_order_both_directions() {
        let posts = vec![
            post("x1", "Same", "2024-01-01", &[]),
            post("x2", "Same", "2024-01-02", &[]),
        ];
        for sort in [SortOption::TitleAsc, SortOption::TitleDesc] {
            let result = project(&posts, &query("", "", sort, 1));
            let ids: Vec<&str> = result.filtered().iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, ["x1", "x2"]);
        }
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    #[test]
    fn twenty_five_posts_make_three_pages() {
        let posts = numbered(25);
        let last = project(&posts, &query("", "", SortOption::Oldest, 3));
        assert_eq!(last.total_pages(), 3);
        assert_eq!(last.page_items().len(), 1);
        assert_eq!(last.page_items()[0].title, "Post 24");
        assert_eq!(last.summary(), PageSummary { first: 25, last: 25, total: 25 });

        let beyond = project(&posts, &query("", "", SortOption::Oldest, 4));
        assert_eq!(beyond.total_pages(), 3);
        assert!(beyond.page_items().is_empty());
        assert_eq!(beyond.summary(), PageSummary { first: 0, last: 0, total: 25 });
    }

    #[test]
    fn page_items_are_contiguous_slice_of_filtered() {
        let posts = numbered(30);
        for page in 1..=3 {
            let result = project(&posts, &query("", "", SortOption::Newest, page));
            let start = (page as usize - 1) * 12;
            let items = result.page_items();
            assert!(items.len() <= 12);
            assert!(items.len() <= result.total_filtered());
            assert_eq!(items, &result.filtered()[start..start + items.len()]);
        }
    }

    #[test]
    fn zero_and_negative_pages_are_empty() {
        let posts = numbered(5);
        for page in [0, -1, i64::MIN] {
            let result = project(&posts, &query("", "", SortOption::Newest, page));
            assert!(result.page_items().is_empty());
            assert_eq!(result.total_filtered(), 5);
            assert_eq!(result.total_pages(), 1);
        }
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let posts = numbered(5);
        let mut q = query("", "", SortOption::Newest, i64::MAX);
        q.page_size = usize::MAX;
        let result = project(&posts, &q);
        assert!(result.page_items().is_empty());
    }

    #[test]
    fn clamp_policy_snaps_into_range() {
        let posts = numbered(25);
        let high = project_with(&posts, &query("", "", SortOption::Oldest, 9), OutOfRange::Clamp);
        assert_eq!(high.page(), 3);
        assert_eq!(high.page_items().len(), 1);

        let low = project_with(&posts, &query("", "", SortOption::Oldest, -2), OutOfRange::Clamp);
        assert_eq!(low.page(), 1);
        assert_eq!(low.page_items().len(), 12);
    }

    #[test]
    fn clamp_policy_on_empty_listing_stays_empty() {
        let posts: Vec<Post> = Vec::new();
        let result = project_with(&posts, &query("", "", SortOption::Newest, 5), OutOfRange::Clamp);
        assert_eq!(result.total_pages(), 0);
        assert!(result.page_items().is_empty());
    }

    #[test]
    fn zero_page_size_degrades_to_one() {
        let posts = numbered(3);
        let mut q = QueryState::default();
        q.page_size = 0;
        let result = project(&posts, &q);
        assert_eq!(result.page_size(), 1);
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.page_items().len(), 1);
    }

    #[test]
    fn prev_next_flags() {
        let posts = numbered(25);
        let first = project(&posts, &query("", "", SortOption::Newest, 1));
        assert!(!first.has_prev());
        assert!(first.has_next());
        let last = project(&posts, &query("", "", SortOption::Newest, 3));
        assert!(last.has_prev());
        assert!(!last.has_next());
        let beyond = project(&posts, &query("", "", SortOption::Newest, 4));
        assert!(beyond.has_prev());
        assert!(!beyond.has_next());
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[test]
    fn art_tag_scenario() {
        let mut posts = numbered(11);
        posts.push(post("art-3", "Zebra study", "2024-02-01", &["art"]));
        posts.push(post("art-1", "Antelope", "2024-02-02", &["art"]));
        posts.push(post("art-2", "Meerkat", "2024-02-03", &["art"]));
        assert_eq!(posts.len(), 14);

        let result = project(&posts, &query("art", "", SortOption::TitleAsc, 1));
        assert_eq!(result.total_filtered(), 3);
        assert_eq!(result.total_pages(), 1);
        assert_eq!(titles(result.page_items()), ["Antelope", "Meerkat", "Zebra study"]);
    }

    #[test]
    fn empty_collection_scenario() {
        let posts: Vec<Post> = Vec::new();
        for page in [-1, 0, 1, 2] {
            let result = project(&posts, &query("x", "y", SortOption::TitleDesc, page));
            assert_eq!(result.total_filtered(), 0);
            assert_eq!(result.total_pages(), 0);
            assert!(result.page_items().is_empty());
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let posts = numbered(20);
        let q = query("", "post 1", SortOption::TitleDesc, 1);
        assert_eq!(project(&posts, &q), project(&posts, &q));
    }

    #[test]
    fn serializes_page_items_and_counts() {
        let posts = numbered(13);
        let result = project(&posts, &query("", "", SortOption::Oldest, 2));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_filtered"], 13);
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["summary"]["first"], 13);
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
        assert_eq!(json["items"][0]["id"], "p12");
    }

    // =========================================================================
    // TagIndex
    // =========================================================================

    #[test]
    fn tag_index_is_sorted_and_distinct() {
        let posts = vec![
            post("a", "A", "2024-01-01", &["sketch", "art"]),
            post("b", "B", "2024-01-02", &[]),
            post("c", "C", "2024-01-03", &["art", "art", "Zine"]),
        ];
        let index = TagIndex::build(&posts);
        assert_eq!(index.tags().collect::<Vec<_>>(), ["Zine", "art", "sketch"]);
        assert_eq!(index.count("art"), 2);
        assert_eq!(index.count("missing"), 0);
        assert!(index.contains("sketch"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn tag_index_of_untagged_posts_is_empty() {
        let posts = numbered(4);
        assert!(TagIndex::build(&posts).is_empty());
    }

    // =========================================================================
    // Page links
    // =========================================================================

    fn render(links: &[PageLink]) -> String {
        links
            .iter()
            .map(|l| match l {
                PageLink::Page { number, current: true } => format!("[{number}]"),
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Ellipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn page_links_small_total_lists_everything() {
        assert_eq!(render(&page_links(2, 4, 2, 1)), "1 [2] 3 4");
    }

    #[test]
    fn page_links_collapse_long_runs() {
        assert_eq!(render(&page_links(10, 20, 2, 1)), "1 2 … 9 [10] 11 … 19 20");
    }

    #[test]
    fn page_links_fill_single_gaps() {
        assert_eq!(render(&page_links(5, 10, 2, 1)), "1 2 3 4 [5] 6 … 9 10");
    }

    #[test]
    fn page_links_out_of_range_current_marks_nothing() {
        assert_eq!(render(&page_links(0, 3, 2, 1)), "1 2 3");
        assert_eq!(render(&page_links(50, 8, 1, 1)), "1 … 7 8");
    }

    #[test]
    fn page_links_empty_without_pages() {
        assert!(page_links(1, 0, 2, 1).is_empty());
    }

    // =========================================================================
    // Neighbors
    // =========================================================================

    #[test]
    fn neighbors_follow_listing_order() {
        let posts = vec![
            post("old", "Old", "2024-01-01", &[]),
            post("mid", "Mid", "2024-02-01", &[]),
            post("new", "New", "2024-03-01", &[]),
        ];
        let n = neighbors(&posts, "mid", SortOption::Newest);
        assert_eq!(n.prev.map(|p| p.id.as_str()), Some("new"));
        assert_eq!(n.next.map(|p| p.id.as_str()), Some("old"));

        let first = neighbors(&posts, "new", SortOption::Newest);
        assert!(first.prev.is_none());
        assert_eq!(first.next.map(|p| p.id.as_str()), Some("mid"));
    }

    #[test]
    fn neighbors_of_unknown_post_are_empty() {
        let posts = numbered(3);
        assert_eq!(neighbors(&posts, "missing", SortOption::Newest), Neighbors::default());
    }
}
