//! End-to-end tests for scholarsite.
//!
//! These tests build the demo site and check the rendered pages.

use std::{
    fs,
    path::{Path, PathBuf},
};

use scholarsite_core::{Config, PublicationType};
use scholarsite_generator::{Builder, ContentCollector};
use tempfile::TempDir;

fn demo_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demo")
}

fn demo_config() -> Config {
    Config::load(&demo_dir().join("config.toml")).expect("Config should load")
}

fn build_demo() -> TempDir {
    let output = TempDir::new().unwrap();
    let config = demo_config();
    let demo = demo_dir();

    Builder::new(config.clone(), demo.join(&config.build.content_dir), output.path())
        .with_static_dir(demo.join(&config.build.static_dir))
        .build()
        .expect("Build should succeed");

    output
}

fn read(output: &TempDir, relative: &str) -> String {
    fs::read_to_string(output.path().join(relative))
        .unwrap_or_else(|e| panic!("{relative} should exist: {e}"))
}

#[test]
fn test_demo_config_loads() {
    let config = demo_config();

    assert_eq!(config.site.title, "Sunggyeol Oh");
    assert_eq!(config.highlight_name(), Some("Sunggyeol Oh"));
    assert_eq!(
        config.publications.filters,
        vec![PublicationType::Conference, PublicationType::LightlyReviewed]
    );
    assert!(config.projects.featured_first);
}

#[test]
fn test_demo_content_normalized() {
    let config = demo_config();
    let collector = ContentCollector::new(config, demo_dir().join("data"));
    let content = collector.collect().expect("Collect should succeed");

    let titles: Vec<_> = content
        .publications
        .iter()
        .map(|p| p.source.slug.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["fie-2025", "chi-ea-2025", "cscw-2025", "sigcse-2024"]
    );

    let projects: Vec<_> = content.projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(projects, vec!["Diary Bot", "Folio", "Theme Explorer"]);

    assert_eq!(content.news.len(), 4);
    assert!(content.news[0].content.contains("Kearney"));
    assert_eq!(content.resume.education.len(), 1);
    assert!(content.author("main-intro").is_some());
}

#[test]
fn test_demo_home_page() {
    let output = build_demo();
    let home = read(&output, "index.html");

    assert!(home.contains("<strong>Sung</strong>"));
    assert!(home.contains("news-list scrolling"));
    assert!(home.contains("January 2026"));
    assert!(home.contains(r#"<a href="https://doi.org/10.0000/fie.2025.0001""#));
    assert!(home.contains("View all 4 publications"));
    assert!(!home.contains("Themes in Student Use of Generative AI"));
    assert!(!home.contains("Work in Progress"));
}

#[test]
fn test_demo_publication_pages() {
    let output = build_demo();

    let all = read(&output, "publications/index.html");
    assert!(all.contains("All Publications<span class=\"filter-count\">(4)</span>"));
    assert!(all.contains("Conference Proceedings<span class=\"filter-count\">(2)</span>"));
    assert!(all.contains("Lightly Reviewed<span class=\"filter-count\">(2)</span>"));
    assert!(all.contains("<strong>Sunggyeol Oh</strong>"));
    assert!(all.find("<h2>2025</h2>").unwrap() < all.find("<h2>2024</h2>").unwrap());

    let lightly = read(&output, "publications/lightly-reviewed/index.html");
    assert!(lightly.contains("Structuring Collaborative Reflection"));
    assert!(!lightly.contains("Themes in Student Use of Generative AI"));
    assert!(lightly.contains(r#"class="filter-button active" href="/publications/lightly-reviewed/""#));
}

#[test]
fn test_demo_about_and_assets() {
    let output = build_demo();

    let about = read(&output, "about/index.html");
    assert!(about.contains("mailto:sung@example.com"));
    assert!(about.contains("Summa Cum Laude"));
    assert!(about.contains("Undergraduate Teaching Assistant"));

    assert!(output.path().join("images/avatar.svg").exists());
    assert!(output.path().join("404.html").exists());
    assert!(read(&output, "projects/index.html").contains("Diary Bot"));
}
