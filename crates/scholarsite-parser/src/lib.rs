//! Scholarsite Parser Library
//!
//! Turns content files into typed records: frontmatter is deserialized into
//! the record for the file's directory and author bodies are rendered to
//! HTML.

pub mod markdown;

use std::path::{Path, PathBuf};

pub use markdown::MarkdownParser;
use scholarsite_core::{
    AuthorRecord, ContentKind, ContentPath, NewsRecord, ProjectRecord, PublicationRecord, Record,
    error::CoreError, frontmatter::parse_frontmatter,
};
use thiserror::Error;

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Frontmatter could not be read into a record.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The file is not under a known content directory or has an
    /// unsupported extension.
    #[error("not a content file: {0}")]
    UnknownLayout(PathBuf),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// A record parsed from one content file.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRecord {
    Author(AuthorRecord),
    Publication(PublicationRecord),
    Project(ProjectRecord),
    News(NewsRecord),
}

impl ParsedRecord {
    /// Kind of the record.
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Author(_) => ContentKind::Authors,
            Self::Publication(_) => ContentKind::Publications,
            Self::Project(_) => ContentKind::Projects,
            Self::News(_) => ContentKind::News,
        }
    }

    /// Computed source location.
    pub fn source(&self) -> &ContentPath {
        match self {
            Self::Author(r) => r.source(),
            Self::Publication(r) => r.source(),
            Self::Project(r) => r.source(),
            Self::News(r) => r.source(),
        }
    }

    /// Whether the record is a draft.
    pub fn is_draft(&self) -> bool {
        match self {
            Self::Author(r) => r.is_draft(),
            Self::Publication(r) => r.is_draft(),
            Self::Project(r) => r.is_draft(),
            Self::News(r) => r.is_draft(),
        }
    }

    /// Clear the draft flag so the record is published.
    pub fn publish(&mut self) {
        match self {
            Self::Author(r) => r.set_draft(false),
            Self::Publication(r) => r.set_draft(false),
            Self::Project(r) => r.set_draft(false),
            Self::News(r) => r.set_draft(false),
        }
    }
}

/// Parses content files by their location in the content directory.
#[derive(Debug, Default)]
pub struct ParserRegistry {
    markdown: MarkdownParser,
}

impl ParserRegistry {
    /// Create a registry with the default Markdown renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a content file.
    ///
    /// `relative` is the path below the content directory; its first
    /// component picks the record kind.
    pub fn parse(&self, content: &str, relative: &Path) -> Result<ParsedRecord> {
        let (kind, source) = ContentPath::from_path(relative)
            .ok_or_else(|| ParserError::UnknownLayout(relative.to_path_buf()))?;

        let record = match kind {
            ContentKind::Authors => {
                let (mut author, body): (AuthorRecord, String) =
                    parse_frontmatter(content, relative)?;
                author.body_html = self.markdown.render(&body);
                author.set_source(source);
                ParsedRecord::Author(author)
            }
            ContentKind::Publications => {
                ParsedRecord::Publication(parse_record(content, relative, source)?)
            }
            ContentKind::Projects => ParsedRecord::Project(parse_record(content, relative, source)?),
            ContentKind::News => ParsedRecord::News(parse_record(content, relative, source)?),
        };

        Ok(record)
    }

    /// Get the markdown renderer.
    pub fn markdown(&self) -> &MarkdownParser {
        &self.markdown
    }
}

fn parse_record<R>(content: &str, relative: &Path, source: ContentPath) -> Result<R>
where
    R: Record + serde::de::DeserializeOwned,
{
    let (mut record, _body): (R, String) = parse_frontmatter(content, relative)?;
    record.set_source(source);
    Ok(record)
}
