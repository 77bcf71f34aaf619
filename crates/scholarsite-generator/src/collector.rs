//! Content collection and normalization.
//!
//! Walks the content directory, parses every record file and returns the
//! published records of each kind in display order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use scholarsite_core::{
    AuthorRecord, Config, NewsRecord, ProjectOrder, ProjectRecord, PublicationRecord, Resume,
    SourceFormat, normalize::exclude_drafts, normalize_news, normalize_projects,
    normalize_publications,
};
use scholarsite_parser::{ParsedRecord, ParserRegistry};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parser error.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Published site content, normalized and ready to render.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// Authors ordered by slug.
    pub authors: Vec<AuthorRecord>,

    /// Publications in display order.
    pub publications: Vec<PublicationRecord>,

    /// Projects in display order.
    pub projects: Vec<ProjectRecord>,

    /// News items, newest first.
    pub news: Vec<NewsRecord>,

    /// Education and experience.
    pub resume: Resume,
}

impl SiteContent {
    /// Normalize parsed records into site content.
    pub fn from_records(
        records: impl IntoIterator<Item = ParsedRecord>,
        resume: Resume,
        project_order: ProjectOrder,
    ) -> Self {
        let mut authors = Vec::new();
        let mut publications = Vec::new();
        let mut projects = Vec::new();
        let mut news = Vec::new();

        for record in records {
            match record {
                ParsedRecord::Author(r) => authors.push(r),
                ParsedRecord::Publication(r) => publications.push(r),
                ParsedRecord::Project(r) => projects.push(r),
                ParsedRecord::News(r) => news.push(r),
            }
        }

        let mut authors = exclude_drafts(authors);
        authors.sort_by(|a, b| a.source.slug.cmp(&b.source.slug));

        Self {
            authors,
            publications: normalize_publications(publications),
            projects: normalize_projects(projects, project_order),
            news: normalize_news(news),
            resume,
        }
    }

    /// Look up an author by slug (`default`, `main-intro`).
    #[must_use]
    pub fn author(&self, slug: &str) -> Option<&AuthorRecord> {
        self.authors.iter().find(|a| a.source.slug == slug)
    }

    /// Number of published records across all kinds.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.authors.len() + self.publications.len() + self.projects.len() + self.news.len()
    }
}

/// Content collector that walks directories and parses files.
#[derive(Debug)]
pub struct ContentCollector {
    config: Config,
    parser: ParserRegistry,
    content_dir: PathBuf,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(config: Config, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            parser: ParserRegistry::new(),
            content_dir: content_dir.into(),
        }
    }

    /// Collect all content from the content directory.
    ///
    /// Files that fail to parse are logged and skipped.
    pub fn collect(&self) -> Result<SiteContent> {
        info!(dir = %self.content_dir.display(), "collecting content");

        let files = self.find_content_files()?;
        info!(count = files.len(), "found content files");

        let publish_drafts = self.config.build.drafts;
        let records: Vec<ParsedRecord> = files
            .par_iter()
            .filter_map(|path| match self.parse_file(path) {
                Ok(mut record) => {
                    if publish_drafts && record.is_draft() {
                        debug!(path = %path.display(), "publishing draft");
                        record.publish();
                    }
                    Some(record)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse file");
                    None
                }
            })
            .collect();

        let resume = Resume::load(&self.content_dir).unwrap_or_else(|e| {
            warn!(error = %e, "failed to load resume");
            Resume::default()
        });

        let order = ProjectOrder::from_featured_first(self.config.projects.featured_first);
        let content = SiteContent::from_records(records, resume, order);

        info!(
            authors = content.authors.len(),
            publications = content.publications.len(),
            projects = content.projects.len(),
            news = content.news.len(),
            "content collection complete"
        );

        Ok(content)
    }

    /// Parse every content file, keeping failures alongside successes.
    pub fn parse_all(&self) -> Result<Vec<(PathBuf, Result<ParsedRecord>)>> {
        let files = self.find_content_files()?;
        Ok(files
            .into_par_iter()
            .map(|path| {
                let parsed = self.parse_file(&path);
                (path, parsed)
            })
            .collect())
    }

    /// Find all content files recursively, sorted by path.
    pub fn find_content_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        walk_dir(&self.content_dir, &mut files)?;
        files.sort();
        Ok(files)
    }

    /// Parse a single content file.
    fn parse_file(&self, path: &Path) -> Result<ParsedRecord> {
        debug!(path = %path.display(), "parsing file");

        let content = fs::read_to_string(path)?;
        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);

        self.parser
            .parse(&content, relative)
            .map_err(|e| CollectorError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

/// Recursively walk a directory for content files.
fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            // Skip hidden directories
            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }
            walk_dir(&path, files)?;
        } else if path.is_file()
            && let Some(ext) = path.extension()
            && SourceFormat::from_extension(&ext.to_string_lossy()).is_some()
        {
            files.push(path);
        }
    }

    Ok(())
}
