//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr, bail};
use scholarsite_core::Config;
use scholarsite_generator::{BuildStats, Builder};

use super::{SitePaths, check::quick_validate};

/// Run the build command.
///
/// Builds the site into `output`, or into `build.output_dir` when no output
/// is given. Relative configured paths resolve against the config file.
pub fn run(
    config_path: &Path,
    output: Option<&Path>,
    drafts: bool,
    base_url: Option<&str>,
) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, drafts, ?base_url, "Starting build");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if drafts {
        config.build.drafts = true;
    }

    if let Some(url) = base_url {
        let url = url.trim_end_matches('/');
        if url.is_empty() {
            bail!("--base-url cannot be empty");
        }
        tracing::info!(base_url = url, "Overriding site base URL from CLI");
        config.site.base_url = url.to_string();
    }

    tracing::debug!(?config, "Loaded configuration");

    let mut paths = SitePaths::resolve(config_path, &config);
    if let Some(output) = output {
        paths.output_dir = output.to_path_buf();
    }

    print_warnings(&quick_validate(&paths));

    let mut builder = Builder::new(config, &paths.content_dir, &paths.output_dir);
    if paths.static_dir.is_dir() {
        tracing::info!(dir = %paths.static_dir.display(), "Found static directory, will copy to output");
        builder = builder.with_static_dir(&paths.static_dir);
    }

    let stats = builder.build().wrap_err("Build failed")?;
    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:    {}", stats.pages);
    println!("  Records:  {}", stats.records);
    println!("  Assets:   {}", stats.assets);
    println!();
    println!("  Duration: {:.2}s", duration.as_secs_f64());
    println!("  Output:   {}", paths.output_dir.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}

/// Print non-fatal warnings before a build.
pub(crate) fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    println!();
    println!("  Warnings:");
    for warn in warnings {
        println!("  ⚠ {warn}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_site(dir: &Path) {
        fs::write(
            dir.join("config.toml"),
            r#"
[site]
title = "Test Scholar"
base_url = "https://example.com"
author = "Test Scholar"
"#,
        )
        .unwrap();

        fs::create_dir_all(dir.join("data/news")).unwrap();
        fs::write(
            dir.join("data/news/launch.md"),
            "---\ndate: 2025-03-01\ncontent: \"Site launched.\"\ndraft: true\n---\n",
        )
        .unwrap();

        fs::create_dir_all(dir.join("static")).unwrap();
        fs::write(dir.join("static/cv.pdf"), b"pdf").unwrap();
    }

    #[test]
    fn test_build_into_configured_output() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());

        let stats = run(&dir.path().join("config.toml"), None, false, None).unwrap();

        assert_eq!(stats.records, 0);
        assert_eq!(stats.assets, 1);
        assert!(dir.path().join("public/index.html").exists());
        assert!(dir.path().join("public/cv.pdf").exists());
    }

    #[test]
    fn test_build_with_drafts_and_output() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_site(dir.path());

        let stats = run(
            &dir.path().join("config.toml"),
            Some(out.path()),
            true,
            Some("https://scholar.example/"),
        )
        .unwrap();

        assert_eq!(stats.records, 1);
        let home = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(home.contains("Site launched."));
    }

    #[test]
    fn test_build_rejects_empty_base_url() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());

        let result = run(&dir.path().join("config.toml"), None, false, Some("/"));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_missing_config() {
        let dir = TempDir::new().unwrap();
        assert!(run(&dir.path().join("config.toml"), None, false, None).is_err());
    }
}
