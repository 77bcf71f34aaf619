//! Record normalization: draft exclusion and deterministic ordering.

use std::cmp::Ordering;

use crate::{
    date::sort_key,
    record::{NewsRecord, ProjectRecord, PublicationRecord, Record},
};

/// How projects are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectOrder {
    /// Newest first.
    #[default]
    ByDate,
    /// Featured projects first, then newest first.
    FeaturedFirst,
}

impl ProjectOrder {
    /// Pick the order from the `featured_first` setting.
    pub fn from_featured_first(featured_first: bool) -> Self {
        if featured_first {
            Self::FeaturedFirst
        } else {
            Self::ByDate
        }
    }
}

/// Drop every record flagged as a draft, keeping the rest in order.
pub fn exclude_drafts<R: Record>(records: impl IntoIterator<Item = R>) -> Vec<R> {
    records.into_iter().filter(|r| !r.is_draft()).collect()
}

/// Publication order: `sortOrder` descending, records with a `sortOrder`
/// before those without, then year descending, then title ascending.
pub fn compare_publications(a: &PublicationRecord, b: &PublicationRecord) -> Ordering {
    match (a.sort_order, b.sort_order) {
        (Some(a_order), Some(b_order)) => b_order.cmp(&a_order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b.year_value().cmp(&a.year_value()))
    .then_with(|| a.title.cmp(&b.title))
}

/// Project order: optional featured promotion, then date descending.
pub fn compare_projects(a: &ProjectRecord, b: &ProjectRecord, order: ProjectOrder) -> Ordering {
    let featured = match order {
        ProjectOrder::FeaturedFirst => b.featured.cmp(&a.featured),
        ProjectOrder::ByDate => Ordering::Equal,
    };
    featured.then_with(|| sort_key(b.date.as_ref()).cmp(&sort_key(a.date.as_ref())))
}

/// News order: date descending.
pub fn compare_news(a: &NewsRecord, b: &NewsRecord) -> Ordering {
    b.date.sort_key().cmp(&a.date.sort_key())
}

/// Published publications in display order.
pub fn normalize_publications(
    records: impl IntoIterator<Item = PublicationRecord>,
) -> Vec<PublicationRecord> {
    let mut records = exclude_drafts(records);
    records.sort_by(compare_publications);
    records
}

/// Published projects in display order.
pub fn normalize_projects(
    records: impl IntoIterator<Item = ProjectRecord>,
    order: ProjectOrder,
) -> Vec<ProjectRecord> {
    let mut records = exclude_drafts(records);
    records.sort_by(|a, b| compare_projects(a, b, order));
    records
}

/// Published news items, newest first.
pub fn normalize_news(records: impl IntoIterator<Item = NewsRecord>) -> Vec<NewsRecord> {
    let mut records = exclude_drafts(records);
    records.sort_by(compare_news);
    records
}
