//! Typed content records.
//!
//! Field names follow the frontmatter keys used in content files
//! (`conferenceShort`, `publicationType`, `sortOrder`, `imgSrc`).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{content::ContentPath, date::ContentDate};

/// Behaviour shared by every record kind.
pub trait Record {
    /// Whether the record is excluded from public listings.
    fn is_draft(&self) -> bool;

    /// Mark the record as published or draft.
    fn set_draft(&mut self, draft: bool);

    /// Computed source location.
    fn source(&self) -> &ContentPath;

    /// Attach the computed source location.
    fn set_source(&mut self, source: ContentPath);
}

macro_rules! impl_record {
    ($ty:ty) => {
        impl Record for $ty {
            fn is_draft(&self) -> bool {
                self.draft
            }

            fn set_draft(&mut self, draft: bool) {
                self.draft = draft;
            }

            fn source(&self) -> &ContentPath {
                &self.source
            }

            fn set_source(&mut self, source: ContentPath) {
                self.source = source;
            }
        }
    };
}

/// Publication category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationType {
    /// Full conference proceedings.
    Conference,
    /// Extended abstracts, posters, companion publications.
    LightlyReviewed,
    /// Anything else.
    #[serde(other)]
    Other,
}

impl PublicationType {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Conference, Self::LightlyReviewed, Self::Other];

    /// Frontmatter key for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conference => "conference",
            Self::LightlyReviewed => "lightly-reviewed",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Conference => "Conference Proceedings",
            Self::LightlyReviewed => "Lightly Reviewed",
            Self::Other => "Other",
        }
    }

    /// Look up a category by its frontmatter key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == key)
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accept `year: 2025` as well as `year: "2025"`.
fn string_or_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Integer(n) => n.to_string(),
    })
}

/// An external link attached to a publication (PDF, DOI, slides...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Badge text, e.g. "PDF" or "DOI".
    #[serde(rename = "type")]
    pub kind: String,

    /// Target URL.
    pub url: String,
}

/// A paper, poster or abstract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    pub title: String,
    pub authors: String,
    pub conference: String,
    #[serde(default)]
    pub conference_short: String,
    #[serde(deserialize_with = "string_or_integer")]
    pub year: String,
    #[serde(default)]
    pub date: Option<ContentDate>,
    pub publication_type: PublicationType,
    /// Manual priority; higher values are listed first.
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub draft: bool,
    #[serde(skip)]
    pub source: ContentPath,
}

impl PublicationRecord {
    /// Numeric year; malformed years become the smallest sortable value.
    #[must_use]
    pub fn year_value(&self) -> i32 {
        self.year.trim().parse().unwrap_or(i32::MIN)
    }

    /// Explicit date, or January 1st of the publication year.
    #[must_use]
    pub fn computed_date(&self) -> ContentDate {
        self.date
            .clone()
            .unwrap_or_else(|| ContentDate::new(format!("{}-01-01", self.year.trim())))
    }

    /// Display identity: title and year together.
    #[must_use]
    pub fn identity(&self) -> (&str, &str) {
        (&self.title, &self.year)
    }
}

impl_record!(PublicationRecord);

/// A personal or research project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub img_src: Option<String>,
    #[serde(default)]
    pub date: Option<ContentDate>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub draft: bool,
    #[serde(skip)]
    pub source: ContentPath,
}

impl_record!(ProjectRecord);

/// A one-sentence news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub date: ContentDate,
    pub content: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(skip)]
    pub source: ContentPath,
}

impl_record!(NewsRecord);

/// An author biography.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub scholar: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub draft: bool,
    /// Rendered Markdown body.
    #[serde(skip)]
    pub body_html: String,
    #[serde(skip)]
    pub source: ContentPath,
}

impl_record!(AuthorRecord);
