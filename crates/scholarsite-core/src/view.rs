//! Publication view logic: category filter, year grouping, counts and
//! author-name emphasis.
//!
//! Everything here operates on an already normalized publication list and
//! preserves its order.

use std::{cmp::Ordering, collections::HashMap, fmt};

use crate::record::{PublicationRecord, PublicationType};

/// Active category selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// Every publication.
    #[default]
    All,
    /// Publications of a single category.
    Type(PublicationType),
}

impl FilterKey {
    /// Stable key used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Type(kind) => kind.as_str(),
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Publications",
            Self::Type(kind) => kind.label(),
        }
    }

    /// Parse a key such as `all` or `lightly-reviewed`.
    pub fn from_key(key: &str) -> Option<Self> {
        if key == "all" {
            Some(Self::All)
        } else {
            PublicationType::from_key(key).map(Self::Type)
        }
    }

    /// Whether a publication passes this filter.
    pub fn matches(&self, publication: &PublicationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Type(kind) => publication.publication_type == *kind,
        }
    }

    /// `all` followed by the declared categories, without duplicates.
    pub fn declared(categories: &[PublicationType]) -> Vec<Self> {
        let mut keys = vec![Self::All];
        for kind in categories {
            let key = Self::Type(*kind);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a filter, preserving order.
pub fn filter_publications(
    publications: &[PublicationRecord],
    key: FilterKey,
) -> Vec<&PublicationRecord> {
    publications.iter().filter(|p| key.matches(p)).collect()
}

/// Publications sharing one `year` value.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup<'a> {
    /// Year as written in the first record of the group, trimmed.
    pub year: &'a str,

    /// Records in their prior order.
    pub records: Vec<&'a PublicationRecord>,
}

/// Partition records by year; groups are returned newest year first.
///
/// Years that parse as the same number share one group, labelled with the
/// first spelling seen. Years that do not parse are grouped by their trimmed
/// text and listed last, in lexical order.
pub fn group_by_year<'a>(publications: &[&'a PublicationRecord]) -> Vec<YearGroup<'a>> {
    let mut by_year: HashMap<YearKey<'a>, YearGroup<'a>> = HashMap::new();
    for &publication in publications {
        let year = publication.year.trim();
        by_year
            .entry(YearKey::of(year))
            .or_insert_with(|| YearGroup {
                year,
                records: Vec::new(),
            })
            .records
            .push(publication);
    }

    let mut groups: Vec<_> = by_year.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    groups.into_iter().map(|(_, group)| group).collect()
}

/// Grouping key; numeric years first, newest first, then unparseable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum YearKey<'a> {
    Numeric(i32),
    Text(&'a str),
}

impl<'a> YearKey<'a> {
    fn of(year: &'a str) -> Self {
        year.parse().map_or(Self::Text(year), Self::Numeric)
    }
}

impl Ord for YearKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => b.cmp(a),
            (Self::Numeric(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Numeric(_)) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for YearKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Label and number of matching records for one filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCount {
    pub key: FilterKey,
    pub label: &'static str,
    pub count: usize,
}

/// Count matches for every key over the full normalized list.
pub fn filter_counts(publications: &[PublicationRecord], keys: &[FilterKey]) -> Vec<FilterCount> {
    keys.iter()
        .map(|key| FilterCount {
            key: *key,
            label: key.label(),
            count: publications.iter().filter(|p| key.matches(p)).count(),
        })
        .collect()
}

/// A run of text inside an author list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorSegment<'a> {
    /// Rendered unchanged.
    Plain(&'a str),
    /// An occurrence of the highlighted name.
    Emphasized(&'a str),
}

impl<'a> AuthorSegment<'a> {
    /// The segment text.
    pub fn text(&self) -> &'a str {
        match self {
            Self::Plain(text) | Self::Emphasized(text) => text,
        }
    }
}

/// Split an author list on every literal occurrence of `name`.
///
/// Matching is a plain substring search, so a longer name that contains
/// `name` is emphasized too.
pub fn emphasize_author<'a>(authors: &'a str, name: &str) -> Vec<AuthorSegment<'a>> {
    if name.is_empty() {
        return vec![AuthorSegment::Plain(authors)];
    }

    let mut segments = Vec::new();
    let mut last = 0;
    for (start, matched) in authors.match_indices(name) {
        if start > last {
            segments.push(AuthorSegment::Plain(&authors[last..start]));
        }
        segments.push(AuthorSegment::Emphasized(matched));
        last = start + matched.len();
    }
    if last < authors.len() || segments.is_empty() {
        segments.push(AuthorSegment::Plain(&authors[last..]));
    }
    segments
}

/// User-triggered filter transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    /// A filter button was selected.
    Select(FilterKey),
}

/// Filter state owned by a publications view. Starts at `all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterState {
    active: FilterKey,
}

impl FilterState {
    /// Initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected key.
    #[must_use]
    pub fn active(&self) -> FilterKey {
        self.active
    }

    /// Compute the next state.
    #[must_use]
    pub fn reduce(self, action: FilterAction) -> Self {
        match action {
            FilterAction::Select(key) => Self { active: key },
        }
    }

    /// Records visible in this state.
    pub fn apply<'a>(&self, publications: &'a [PublicationRecord]) -> Vec<&'a PublicationRecord> {
        filter_publications(publications, self.active)
    }
}

/// Everything a publications page needs for one filter state.
#[derive(Debug, Clone)]
pub struct PublicationView<'a> {
    pub state: FilterState,
    pub counts: Vec<FilterCount>,
    pub groups: Vec<YearGroup<'a>>,
}

impl<'a> PublicationView<'a> {
    /// Build the view for `state` over a normalized list.
    pub fn new(
        publications: &'a [PublicationRecord],
        keys: &[FilterKey],
        state: FilterState,
    ) -> Self {
        let visible = state.apply(publications);
        Self {
            state,
            counts: filter_counts(publications, keys),
            groups: group_by_year(&visible),
        }
    }

    /// Whether the active filter matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
