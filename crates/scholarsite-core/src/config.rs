//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    record::PublicationType,
};

/// Main configuration structure for scholarsite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Publication listing settings.
    #[serde(default)]
    pub publications: PublicationsConfig,

    /// Project listing settings.
    #[serde(default)]
    pub projects: ProjectsConfig,

    /// News listing settings.
    #[serde(default)]
    pub news: NewsConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Name emphasized inside publication author lists. Falls back to `author`.
    #[serde(default)]
    pub highlight_name: Option<String>,

    /// Language code for the `<html lang>` attribute.
    #[serde(default = "default_language")]
    pub language: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory holding `authors/`, `publications/`, `projects/` and `news/`.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Directory copied verbatim into the output.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Whether to publish drafts.
    #[serde(default)]
    pub drafts: bool,
}

/// Publication listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationsConfig {
    /// Categories offered as filters next to "all".
    #[serde(default = "default_filters")]
    pub filters: Vec<PublicationType>,

    /// Number of publications shown on the home page.
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

/// Project listing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Show featured projects before the rest.
    #[serde(default)]
    pub featured_first: bool,
}

/// News listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Item count at which the news list becomes a scrolling container.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: usize,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_content_dir() -> String {
    "data".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_filters() -> Vec<PublicationType> {
    vec![PublicationType::Conference, PublicationType::LightlyReviewed]
}

fn default_preview_limit() -> usize {
    3
}

fn default_scroll_threshold() -> usize {
    4
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            content_dir: default_content_dir(),
            static_dir: default_static_dir(),
            drafts: false,
        }
    }
}

impl Default for PublicationsConfig {
    fn default() -> Self {
        Self {
            filters: default_filters(),
            preview_limit: default_preview_limit(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: default_scroll_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `SCHOLARSITE__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("SCHOLARSITE").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        if self.publications.preview_limit == 0 {
            tracing::warn!("publications.preview_limit is 0, the home page will list nothing");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Name to emphasize in author lists, if any.
    pub fn highlight_name(&self) -> Option<&str> {
        self.site
            .highlight_name
            .as_deref()
            .or(self.site.author.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Sung Oh"
base_url = "https://example.com"
author = "Sung Oh"
highlight_name = "Sunggyeol Oh"

[build]
output_dir = "dist"
content_dir = "content"
drafts = true

[publications]
filters = ["conference", "lightly-reviewed", "other"]
preview_limit = 5

[projects]
featured_first = true

[news]
scroll_threshold = 6
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Sung Oh");
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.highlight_name(), Some("Sunggyeol Oh"));
        assert_eq!(config.build.output_dir, "dist");
        assert_eq!(config.build.content_dir, "content");
        assert_eq!(config.build.static_dir, "static");
        assert!(config.build.drafts);
        assert_eq!(
            config.publications.filters,
            vec![
                PublicationType::Conference,
                PublicationType::LightlyReviewed,
                PublicationType::Other
            ]
        );
        assert_eq!(config.publications.preview_limit, 5);
        assert!(config.projects.featured_first);
        assert_eq!(config.news.scroll_threshold, 6);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.language, "en");
        assert_eq!(config.build.output_dir, "public");
        assert_eq!(config.build.content_dir, "data");
        assert!(!config.build.drafts);
        assert_eq!(config.publications.filters.len(), 2);
        assert_eq!(config.publications.preview_limit, 3);
        assert!(!config.projects.featured_first);
        assert_eq!(config.news.scroll_threshold, 4);
        assert_eq!(config.highlight_name(), None);
    }

    #[test]
    fn test_highlight_name_falls_back_to_author() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let config_content = r#"
[site]
title = "Test"
base_url = "https://example.com"
author = "Sunggyeol Oh"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let config = Config::load(&config_path).expect("load config");
        assert_eq!(config.highlight_name(), Some("Sunggyeol Oh"));
    }

    #[test]
    fn test_url_for() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let config_content = r#"
[site]
title = "Test"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(
            config.url_for("/publications/conference"),
            "https://example.com/publications/conference"
        );
        assert_eq!(config.url_for("about"), "https://example.com/about");
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let config_content = r#"
[site]
title = ""
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "Sung Oh");
        assert_eq!(config.publications.preview_limit, 5);
    }
}
