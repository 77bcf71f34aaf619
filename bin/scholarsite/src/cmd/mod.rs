//! CLI command implementations.

pub mod build;
pub mod check;
pub mod new;
pub mod watch;

use std::path::{Path, PathBuf};

use scholarsite_core::Config;

/// Directories a command works with.
///
/// Relative paths in the configuration resolve against the directory that
/// holds the configuration file, so `-c site/config.toml` works from anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    /// Directory containing the configuration file.
    pub root: PathBuf,
    /// Content directory (`build.content_dir`).
    pub content_dir: PathBuf,
    /// Static asset directory (`build.static_dir`).
    pub static_dir: PathBuf,
    /// Output directory (`build.output_dir`).
    pub output_dir: PathBuf,
}

impl SitePaths {
    /// Resolve the configured directories for a configuration file.
    pub fn resolve(config_path: &Path, config: &Config) -> Self {
        let root = site_root(config_path);
        Self {
            content_dir: root.join(&config.build.content_dir),
            static_dir: root.join(&config.build.static_dir),
            output_dir: root.join(&config.build.output_dir),
            root,
        }
    }
}

/// Directory holding the configuration file.
pub fn site_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use scholarsite_core::config::{BuildConfig, SiteConfig};

    use super::*;

    fn test_config() -> Config {
        Config {
            site: SiteConfig {
                title: "Test".to_string(),
                base_url: "https://example.com".to_string(),
                description: None,
                author: None,
                highlight_name: None,
                language: "en".to_string(),
            },
            build: BuildConfig::default(),
            publications: Default::default(),
            projects: Default::default(),
            news: Default::default(),
        }
    }

    #[test]
    fn test_site_root_bare_file() {
        assert_eq!(site_root(Path::new("config.toml")), PathBuf::from("."));
    }

    #[test]
    fn test_paths_relative_to_config() {
        let paths = SitePaths::resolve(Path::new("site/config.toml"), &test_config());

        assert_eq!(paths.root, PathBuf::from("site"));
        assert_eq!(paths.content_dir, PathBuf::from("site/data"));
        assert_eq!(paths.static_dir, PathBuf::from("site/static"));
        assert_eq!(paths.output_dir, PathBuf::from("site/public"));
    }
}
