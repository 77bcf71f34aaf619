//! Content kinds and computed source paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Kind of record, decided by the top-level directory of a content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// `authors/**`
    Authors,
    /// `publications/**`
    Publications,
    /// `projects/**`
    Projects,
    /// `news/**`
    News,
}

impl ContentKind {
    /// Every kind, in the order pages consume them.
    pub const ALL: [Self; 4] = [Self::Authors, Self::Publications, Self::Projects, Self::News];

    /// Determine the kind from a directory name.
    pub fn from_dir(name: &str) -> Option<Self> {
        match name {
            "authors" => Some(Self::Authors),
            "publications" => Some(Self::Publications),
            "projects" => Some(Self::Projects),
            "news" => Some(Self::News),
            _ => None,
        }
    }

    /// Directory holding records of this kind.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Authors => "authors",
            Self::Publications => "publications",
            Self::Projects => "projects",
            Self::News => "news",
        }
    }
}

/// Source file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Markdown content (.md files).
    Markdown,
    /// MDX content (.mdx files), rendered as Markdown with inline HTML.
    Mdx,
}

impl SourceFormat {
    /// Determine source format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "mdx" => Some(Self::Mdx),
            _ => None,
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Mdx => "mdx",
        }
    }
}

/// Computed location fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPath {
    /// Source file relative to the content directory.
    pub file_path: PathBuf,

    /// Flattened path including the kind directory (`publications/fie-2025`).
    pub path: String,

    /// Path within the kind directory (`fie-2025`).
    pub slug: String,
}

impl ContentPath {
    /// Parse a path relative to the content directory.
    ///
    /// - `publications/fie-2025.mdx` → kind: Publications, path: "publications/fie-2025", slug: "fie-2025"
    /// - `authors/default/index.md` → kind: Authors, path: "authors/default", slug: "default"
    /// - `news/2025/kearney.md` → kind: News, slug: "2025/kearney"
    pub fn from_path(relative: &Path) -> Option<(ContentKind, Self)> {
        let extension = relative.extension()?.to_str()?;
        SourceFormat::from_extension(extension)?;

        let kind_dir = relative.components().next()?.as_os_str().to_str()?;
        let kind = ContentKind::from_dir(kind_dir)?;

        let stem = relative.file_stem()?.to_str()?;
        let parent = relative.parent().unwrap_or(Path::new(""));
        let flattened = if stem == "index" {
            parent.to_string_lossy().to_string()
        } else {
            parent.join(stem).to_string_lossy().to_string()
        };
        let path = flattened.replace('\\', "/").trim_matches('/').to_string();

        let slug = match path.split_once('/') {
            Some((_, rest)) => rest.to_string(),
            None => return None,
        };

        Some((
            kind,
            Self {
                file_path: relative.to_path_buf(),
                path,
                slug,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_format_from_extension() {
        assert_eq!(
            SourceFormat::from_extension("md"),
            Some(SourceFormat::Markdown)
        );
        assert_eq!(SourceFormat::from_extension("MDX"), Some(SourceFormat::Mdx));
        assert_eq!(SourceFormat::from_extension("typ"), None);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in ContentKind::ALL {
            assert_eq!(ContentKind::from_dir(kind.dir_name()), Some(kind));
        }
        assert_eq!(ContentKind::from_dir("posts"), None);
    }

    #[test]
    fn test_content_path_simple() {
        let (kind, cp) =
            ContentPath::from_path(Path::new("publications/fie-2025.mdx")).expect("parse");

        assert_eq!(kind, ContentKind::Publications);
        assert_eq!(cp.path, "publications/fie-2025");
        assert_eq!(cp.slug, "fie-2025");
        assert_eq!(cp.file_path, PathBuf::from("publications/fie-2025.mdx"));
    }

    #[test]
    fn test_content_path_index_file() {
        let (kind, cp) =
            ContentPath::from_path(Path::new("authors/main-intro/index.md")).expect("parse");

        assert_eq!(kind, ContentKind::Authors);
        assert_eq!(cp.path, "authors/main-intro");
        assert_eq!(cp.slug, "main-intro");
    }

    #[test]
    fn test_content_path_nested() {
        let (kind, cp) = ContentPath::from_path(Path::new("news/2025/kearney.md")).expect("parse");

        assert_eq!(kind, ContentKind::News);
        assert_eq!(cp.slug, "2025/kearney");
    }

    #[test]
    fn test_content_path_rejects_unknown_layout() {
        assert!(ContentPath::from_path(Path::new("posts/hello.md")).is_none());
        assert!(ContentPath::from_path(Path::new("publications/notes.txt")).is_none());
        assert!(ContentPath::from_path(Path::new("news.md")).is_none());
        assert!(ContentPath::from_path(Path::new("authors/index.md")).is_none());
    }
}
