//! Property-based tests for record ordering and publication views.
//!
//! ```bash
//! cargo test -p scholarsite-core --test properties
//! PROPTEST_CASES=5000 cargo test -p scholarsite-core --test properties
//! ```

use std::cmp::Ordering;

use proptest::prelude::*;
use scholarsite_core::{
    ContentDate, ContentPath, FilterKey, NewsRecord, ProjectOrder, ProjectRecord,
    PublicationRecord, PublicationType, normalize_news, normalize_projects,
    normalize_publications,
    normalize::compare_publications,
    view::{emphasize_author, filter_publications, group_by_year},
};

fn publication_type() -> impl Strategy<Value = PublicationType> {
    prop::sample::select(PublicationType::ALL.to_vec())
}

/// Numeric year, or the trimmed text when it does not parse.
fn year_key(year: &str) -> Result<i32, String> {
    year.trim().parse().map_err(|_| year.trim().to_string())
}

fn year() -> impl Strategy<Value = String> {
    prop_oneof![
        (2018i32..2027).prop_map(|y| y.to_string()),
        (2018i32..2027).prop_map(|y| format!(" {y}")),
        (2018i32..2027).prop_map(|y| format!("0{y}")),
        Just("forthcoming".to_string()),
    ]
}

prop_compose! {
    fn publication()(
        title in "[A-Za-z]{1,6}",
        year in year(),
        sort_order in prop::option::of(-3i64..4),
        publication_type in publication_type(),
        draft in any::<bool>(),
    ) -> PublicationRecord {
        PublicationRecord {
            title,
            authors: "Sunggyeol Oh".to_string(),
            conference: "Proceedings".to_string(),
            conference_short: String::new(),
            year,
            date: None,
            publication_type,
            sort_order,
            links: vec![],
            draft,
            source: ContentPath::default(),
        }
    }
}

prop_compose! {
    fn project()(
        title in "[a-z]{1,6}",
        date in prop::option::of((1950u32..2027, 1u32..13).prop_map(|(y, m)| format!("{y}-{m:02}-01"))),
        featured in any::<bool>(),
        draft in any::<bool>(),
    ) -> ProjectRecord {
        ProjectRecord {
            title,
            description: String::new(),
            href: None,
            img_src: None,
            date: date.as_deref().map(ContentDate::from),
            technologies: vec![],
            category: None,
            featured,
            draft,
            source: ContentPath::default(),
        }
    }
}

prop_compose! {
    fn news()(
        date in (1950u32..2027, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y}-{m:02}-{d:02}")),
        draft in any::<bool>(),
    ) -> NewsRecord {
        NewsRecord {
            date: ContentDate::new(date),
            content: "News.".to_string(),
            draft,
            source: ContentPath::default(),
        }
    }
}

fn filter_key() -> impl Strategy<Value = FilterKey> {
    prop_oneof![
        Just(FilterKey::All),
        publication_type().prop_map(FilterKey::Type),
    ]
}

// == Normalizer ================================================================

proptest! {
    #[test]
    fn prop_drafts_never_survive(
        publications in prop::collection::vec(publication(), 0..20),
        projects in prop::collection::vec(project(), 0..20),
        items in prop::collection::vec(news(), 0..20),
    ) {
        let published = publications.iter().filter(|p| !p.draft).count();
        let sorted = normalize_publications(publications);
        prop_assert_eq!(sorted.len(), published);
        prop_assert!(sorted.iter().all(|p| !p.draft));

        prop_assert!(normalize_projects(projects, ProjectOrder::FeaturedFirst).iter().all(|p| !p.draft));
        prop_assert!(normalize_news(items).iter().all(|n| !n.draft));
    }

    #[test]
    fn prop_publication_order_is_idempotent(
        publications in prop::collection::vec(publication(), 0..20),
    ) {
        let once = normalize_publications(publications);
        let twice = normalize_publications(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_publication_order_is_sorted(
        publications in prop::collection::vec(publication(), 0..20),
    ) {
        let sorted = normalize_publications(publications);
        for pair in sorted.windows(2) {
            prop_assert_ne!(compare_publications(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn prop_undated_projects_sort_last(
        projects in prop::collection::vec(project(), 0..20),
    ) {
        let sorted = normalize_projects(projects, ProjectOrder::ByDate);
        if let Some(first_undated) = sorted.iter().position(|p| p.date.is_none()) {
            prop_assert!(sorted[first_undated..].iter().all(|p| p.date.is_none()));
        }
    }

    #[test]
    fn prop_news_newest_first(items in prop::collection::vec(news(), 0..20)) {
        let sorted = normalize_news(items);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].date.sort_key() >= pair[1].date.sort_key());
        }
    }
}

// == View ======================================================================

proptest! {
    #[test]
    fn prop_filter_is_exact_subset(
        publications in prop::collection::vec(publication(), 0..20),
        key in filter_key(),
    ) {
        let list = normalize_publications(publications);
        let filtered = filter_publications(&list, key);

        let expected: Vec<&PublicationRecord> = list.iter().filter(|p| key.matches(p)).collect();
        prop_assert_eq!(&filtered, &expected);

        if key == FilterKey::All {
            prop_assert_eq!(filtered.len(), list.len());
        }
    }

    #[test]
    fn prop_grouping_is_exact_partition(
        publications in prop::collection::vec(publication(), 0..20),
    ) {
        let list = normalize_publications(publications);
        let refs: Vec<&PublicationRecord> = list.iter().collect();
        let groups = group_by_year(&refs);

        let total: usize = groups.iter().map(|g| g.records.len()).sum();
        prop_assert_eq!(total, list.len());

        for group in &groups {
            prop_assert!(!group.records.is_empty());
            let key = year_key(group.year);
            prop_assert!(group.records.iter().all(|p| year_key(&p.year) == key));

            // Prior order is kept inside a group
            let expected: Vec<&PublicationRecord> =
                list.iter().filter(|p| year_key(&p.year) == key).collect();
            prop_assert_eq!(&group.records, &expected);
        }

        for pair in groups.windows(2) {
            match (year_key(pair[0].year), year_key(pair[1].year)) {
                (Ok(newer), Ok(older)) => prop_assert!(newer > older),
                (Ok(_), Err(_)) => {}
                (Err(a), Err(b)) => prop_assert!(a < b),
                (Err(_), Ok(_)) => prop_assert!(false, "unparseable year listed first"),
            }
        }
    }

    #[test]
    fn prop_emphasis_preserves_text(
        before in "[a-z ,]{0,10}",
        after in "[a-z ,]{0,10}",
    ) {
        let authors = format!("{before}Sunggyeol Oh{after}");
        let segments = emphasize_author(&authors, "Sunggyeol Oh");

        let joined: String = segments.iter().map(|s| s.text()).collect();
        prop_assert_eq!(joined.as_str(), authors.as_str());
        prop_assert!(segments.iter().all(|s| !s.text().is_empty()));
    }
}
