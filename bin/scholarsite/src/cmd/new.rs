//! New command - scaffold a content record

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use chrono::{Datelike, NaiveDate, Utc};
use color_eyre::eyre::{Result, WrapErr, bail};
use scholarsite_core::{Config, ContentKind};

use super::SitePaths;

/// Kind of record the `new` command can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NewKind {
    /// A paper under `publications/`.
    Publication,
    /// A project card under `projects/`.
    Project,
    /// A news item under `news/`.
    News,
}

impl NewKind {
    fn content_kind(self) -> ContentKind {
        match self {
            Self::Publication => ContentKind::Publications,
            Self::Project => ContentKind::Projects,
            Self::News => ContentKind::News,
        }
    }
}

/// Run the new command.
///
/// Writes `<content_dir>/<kind>/<slug>.mdx` with draft frontmatter and
/// returns its path. Existing files are never overwritten.
pub fn run(config_path: &Path, kind: NewKind, slug: &str) -> Result<PathBuf> {
    tracing::info!(?config_path, ?kind, slug, "Creating new content");

    validate_slug(slug)?;

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let paths = SitePaths::resolve(config_path, &config);

    let file_path = paths
        .content_dir
        .join(kind.content_kind().dir_name())
        .join(format!("{slug}.mdx"));

    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }

    let today = Utc::now().date_naive();
    let frontmatter = generate_frontmatter(kind, slug, today, config.highlight_name())?;
    fs::write(&file_path, frontmatter).wrap_err("Failed to write file")?;

    tracing::info!(?file_path, "Created new content file");
    println!("Created: {}", file_path.display());

    Ok(file_path)
}

/// Slugs are relative paths of plain segments.
fn validate_slug(slug: &str) -> Result<()> {
    let path = Path::new(slug);
    if slug.is_empty()
        || path.extension().is_some()
        || !path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        bail!("invalid slug {slug:?}: use a relative path like chi-2026 or 2025/chi");
    }
    Ok(())
}

fn title_from_slug(slug: &str) -> String {
    slug.rsplit('/').next().unwrap_or(slug).replace(['-', '_'], " ")
}

/// A YAML scalar for `value`, quoted and escaped as needed.
fn yaml_scalar(value: &str) -> Result<String> {
    let rendered = serde_yaml::to_string(value).wrap_err("Failed to encode frontmatter value")?;
    Ok(rendered.trim_end().to_string())
}

fn generate_frontmatter(
    kind: NewKind,
    slug: &str,
    today: NaiveDate,
    author: Option<&str>,
) -> Result<String> {
    let title = yaml_scalar(&title_from_slug(slug))?;
    let date = today.format("%Y-%m-%d");

    let frontmatter = match kind {
        NewKind::Publication => {
            let year = today.year();
            let authors = yaml_scalar(author.unwrap_or_default())?;
            format!(
                r#"---
title: {title}
authors: {authors}
conference: ""
conferenceShort: ""
year: "{year}"
date: {date}
publicationType: conference
links: []
draft: true
---
"#
            )
        }
        NewKind::Project => format!(
            r#"---
title: {title}
description: ""
date: {date}
technologies: []
featured: false
draft: true
---
"#
        ),
        NewKind::News => format!(
            r#"---
date: {date}
content: {title}
draft: true
---
"#
        ),
    };

    Ok(frontmatter)
}
