//! Build orchestration.
//!
//! Coordinates the full site build process.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use rayon::prelude::*;
use scholarsite_core::{Config, FilterAction, FilterState};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assets::{AssetError, AssetProcessor},
    collector::{CollectorError, ContentCollector, SiteContent},
    html::{HtmlError, HtmlGenerator, publications_url},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of pages generated.
    pub pages: usize,

    /// Number of published records rendered.
    pub records: usize,

    /// Number of assets copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    content_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    live_reload: Option<String>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: Config,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            static_dir: None,
            live_reload: None,
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Inject a live reload script into every page.
    #[must_use]
    pub fn with_live_reload(mut self, script: impl Into<String>) -> Self {
        self.live_reload = Some(script.into());
        self
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Clean output directory
        self.clean_output()?;

        // 2. Collect content
        let collector = ContentCollector::new(self.config.clone(), &self.content_dir);
        let content = collector.collect()?;
        stats.records = content.record_count();

        // 3. Generate HTML pages
        stats.pages = self.generate_pages(&content)?;

        // 4. Copy static assets
        if let Some(ref static_dir) = self.static_dir {
            stats.assets = self.process_assets(static_dir)?;
        }

        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            pages = stats.pages,
            records = stats.records,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Render every page and write it to the output directory.
    fn generate_pages(&self, content: &SiteContent) -> Result<usize> {
        let mut generator = HtmlGenerator::new(self.config.clone());
        if let Some(ref script) = self.live_reload {
            generator = generator.with_live_reload(script.clone());
        }

        let mut pages = vec![
            ("/".to_string(), generator.generate_home(content)?),
            ("/projects/".to_string(), generator.generate_projects(content)?),
            ("/about/".to_string(), generator.generate_about(content)?),
            ("/404.html".to_string(), generator.generate_not_found()?),
        ];

        // One page per filter state; selecting a filter navigates between them
        for key in generator.filter_keys() {
            let state = FilterState::new().reduce(FilterAction::Select(key));
            pages.push((
                publications_url(key),
                generator.generate_publications(content, state)?,
            ));
        }

        info!(count = pages.len(), "writing HTML pages");

        pages
            .par_iter()
            .map(|(url_path, html)| {
                let output_path = HtmlGenerator::output_path(url_path, &self.output_dir);
                if let Some(parent) = output_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output_path, html)?;

                debug!(path = %output_path.display(), "wrote page");
                Ok::<_, BuildError>(())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(pages.len())
    }

    /// Copy static assets.
    fn process_assets(&self, static_dir: &Path) -> Result<usize> {
        let copied = AssetProcessor::new().process(static_dir, &self.output_dir)?;
        Ok(copied.len())
    }
}
