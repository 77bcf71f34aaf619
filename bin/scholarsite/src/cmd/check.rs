//! Check command - validate configuration and content

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use color_eyre::eyre::{Result, bail};
use scholarsite_core::{Config, ContentKind, PublicationType, Resume, resume::RESUME_FILE};
use scholarsite_generator::ContentCollector;
use scholarsite_parser::ParsedRecord;

use super::SitePaths;

/// Author shown on the About page.
const ABOUT_AUTHOR: &str = "default";

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and all content files.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();
    check_site(config_path, &mut result);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Quick validation for build/watch commands.
///
/// Returns non-fatal warnings about the site layout.
pub fn quick_validate(paths: &SitePaths) -> Vec<String> {
    let mut warnings = Vec::new();

    if !paths.content_dir.is_dir() {
        warnings.push(format!(
            "Content directory {} does not exist, the site will be empty",
            paths.content_dir.display()
        ));
        return warnings;
    }

    if !has_author_file(&paths.content_dir, ABOUT_AUTHOR) {
        warnings.push(format!(
            "Missing authors/{ABOUT_AUTHOR}.mdx - the About page will show no profile"
        ));
    }

    warnings
}

fn check_site(config_path: &Path, result: &mut ValidationResult) {
    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            return;
        }
    };

    let paths = SitePaths::resolve(config_path, &config);

    println!("\nChecking configuration values...");
    check_config_values(&config, &paths, result);

    if !paths.content_dir.is_dir() {
        result.add_error(format!(
            "Content directory missing: {}",
            paths.content_dir.display()
        ));
        return;
    }

    println!("\nChecking content files...");
    let records = validate_content_files(&config, &paths, result);

    println!("\nChecking records...");
    validate_records(&records, &config, result);

    if paths.static_dir.is_dir() {
        println!("\nChecking static references...");
        let assets = static_files(&paths.static_dir);
        check_static_references(&records, &assets, result);
    }
}

/// Parse every content file, recording failures as errors.
fn validate_content_files(
    config: &Config,
    paths: &SitePaths,
    result: &mut ValidationResult,
) -> Vec<ParsedRecord> {
    let collector = ContentCollector::new(config.clone(), &paths.content_dir);
    let parsed = match collector.parse_all() {
        Ok(parsed) => parsed,
        Err(e) => {
            result.add_error(format!("Failed to read content directory: {e}"));
            return Vec::new();
        }
    };

    let checked = parsed.len();
    let mut records = Vec::with_capacity(checked);
    let mut failed = 0;

    for (path, outcome) in parsed {
        match outcome {
            Ok(record) => records.push(record),
            Err(e) => {
                result.add_error(format!("{}: {e}", path.display()));
                failed += 1;
            }
        }
    }

    if failed == 0 {
        println!("  ✓ All {checked} content files valid");
    } else {
        println!("  ✗ {failed}/{checked} content files have errors");
    }

    let resume = paths.content_dir.join(RESUME_FILE);
    if resume.exists() {
        match Resume::load(&paths.content_dir) {
            Ok(_) => println!("  ✓ {RESUME_FILE} valid"),
            Err(e) => result.add_error(format!("{}: {e}", resume.display())),
        }
    }

    records
}

/// Cross-record checks on successfully parsed content.
fn validate_records(records: &[ParsedRecord], config: &Config, result: &mut ValidationResult) {
    let before = result.warnings.len();

    let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
    for record in records {
        let ParsedRecord::Publication(publication) = record else {
            continue;
        };

        let path = publication.source.path.as_str();
        if let Some(first) = seen.insert(publication.identity(), path) {
            result.add_warning(format!(
                "Duplicate publication \"{}\" ({}) in {first} and {path}",
                publication.title, publication.year
            ));
        }

        if publication.publication_type == PublicationType::Other
            && !config.publications.filters.contains(&PublicationType::Other)
        {
            result.add_warning(format!(
                "{path}: unknown publication type, only listed under All Publications"
            ));
        }

        if publication.year.parse::<i32>().is_err() {
            result.add_warning(format!(
                "{path}: year \"{}\" is not a number and sorts last",
                publication.year
            ));
        }
    }

    let has_about = records.iter().any(|record| {
        record.kind() == ContentKind::Authors && record.source().slug == ABOUT_AUTHOR
    });
    if !has_about {
        result.add_warning(format!(
            "Missing authors/{ABOUT_AUTHOR} - the About page will show no profile"
        ));
    }

    if result.warnings.len() == before {
        println!("  ✓ {} records consistent", records.len());
    } else {
        println!(
            "  ⚠ {} record warning(s)",
            result.warnings.len() - before
        );
    }
}

/// Warn about site-relative image paths with no matching static file.
fn check_static_references(
    records: &[ParsedRecord],
    assets: &HashSet<String>,
    result: &mut ValidationResult,
) {
    let references = records.iter().filter_map(|record| match record {
        ParsedRecord::Author(author) => author.avatar.as_deref().map(|p| (&author.source, p)),
        ParsedRecord::Project(project) => project.img_src.as_deref().map(|p| (&project.source, p)),
        _ => None,
    });

    let mut missing = 0;
    for (source, reference) in references {
        if reference.starts_with('/') && !assets.contains(reference) {
            result.add_warning(format!("{}: {reference} not found in static files", source.path));
            missing += 1;
        }
    }

    if missing == 0 {
        println!("  ✓ All {} static files resolvable", assets.len());
    }
}

/// Site-relative URL paths of every file under the static directory.
fn static_files(static_dir: &Path) -> HashSet<String> {
    walkdir::WalkDir::new(static_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let relative = e.path().strip_prefix(static_dir).ok()?;
            Some(format!("/{}", relative.to_string_lossy().replace('\\', "/")))
        })
        .collect()
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, paths: &SitePaths, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.highlight_name().is_none() {
        result.add_warning("Neither site.highlight_name nor site.author is set, no author is emphasized");
    }

    if config.publications.filters.is_empty() {
        result.add_warning("publications.filters is empty, only All Publications is shown");
    }

    if paths.output_dir.exists() && !paths.output_dir.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            paths.output_dir.display()
        ));
    }

    println!("  ✓ Configuration values checked");
}

/// Whether `authors/<slug>.md` or `authors/<slug>.mdx` exists.
fn has_author_file(content_dir: &Path, slug: &str) -> bool {
    let dir = content_dir.join(ContentKind::Authors.dir_name());
    ["md", "mdx"]
        .iter()
        .any(|ext| dir.join(format!("{slug}.{ext}")).is_file())
}
