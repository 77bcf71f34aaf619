//! HTML generation for site pages.
//!
//! Each page renders its inner template and is then wrapped in `base`.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use scholarsite_core::{
    AuthorRecord, AuthorSegment, Config, FilterCount, FilterKey, FilterState, Link, NewsRecord,
    ProjectRecord, PublicationRecord, PublicationView, Resume, YearGroup,
    format::{badge_width, doi_url, email_href, format_month_year},
    view::emphasize_author,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    collector::SiteContent,
    template::{Template, TemplateContext, TemplateError, TemplateRegistry},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Author slug shown on the About page.
pub const ABOUT_AUTHOR: &str = "default";

/// Author slug whose body introduces the home page.
pub const INTRO_AUTHOR: &str = "main-intro";

/// Message shown when a filter matches nothing.
pub const EMPTY_FILTER_MESSAGE: &str = "No publications found for the selected filter.";

/// URL path of the publications page for a filter.
pub fn publications_url(key: FilterKey) -> String {
    match key {
        FilterKey::All => "/publications/".to_string(),
        FilterKey::Type(kind) => format!("/publications/{}/", kind.as_str()),
    }
}

/// HTML page generator.
#[derive(Debug)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    config: Config,
    live_reload: Option<String>,
}

impl HtmlGenerator {
    /// Create a new HTML generator with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            config,
            live_reload: None,
        }
    }

    /// Inject a script into every page, used by the development server.
    #[must_use]
    pub fn with_live_reload(mut self, script: impl Into<String>) -> Self {
        self.live_reload = Some(script.into());
        self
    }

    /// Register a custom template.
    pub fn register_template(&mut self, template: Template) {
        self.templates.register(template);
    }

    /// Filter keys offered on the publications page.
    #[must_use]
    pub fn filter_keys(&self) -> Vec<FilterKey> {
        FilterKey::declared(&self.config.publications.filters)
    }

    /// Home page.
    pub fn generate_home(&self, content: &SiteContent) -> Result<String> {
        debug!("generating home page");

        let intro = content
            .author(INTRO_AUTHOR)
            .map(|a| a.body_html.clone())
            .unwrap_or_default();

        let limit = self.config.publications.preview_limit;
        let highlight = self.config.highlight_name();
        let preview: String = content
            .publications
            .iter()
            .take(limit)
            .map(|p| publication_item_html(p, highlight, true))
            .collect();

        let total = content.publications.len();
        let view_all = (total > limit).then(|| {
            format!(r#"<p class="view-all"><a href="/publications/">View all {total} publications &rarr;</a></p>"#)
        });

        let ctx = TemplateContext::new()
            .with_var("intro", intro)
            .with_opt(
                "news",
                news_list_html(&content.news, self.config.news.scroll_threshold),
            )
            .with_var("publications", preview)
            .with_opt("view_all", view_all);

        let inner = self.templates.render("home", &ctx)?;
        self.wrap("Home", "/", &inner)
    }

    /// Publications page for one filter state.
    pub fn generate_publications(&self, content: &SiteContent, state: FilterState) -> Result<String> {
        debug!(filter = %state.active(), "generating publications page");

        let keys = self.filter_keys();
        let view = PublicationView::new(&content.publications, &keys, state);
        let highlight = self.config.highlight_name();

        let groups = if view.is_empty() {
            format!(r#"<p class="empty">{EMPTY_FILTER_MESSAGE}</p>"#)
        } else {
            view.groups
                .iter()
                .map(|group| year_group_html(group, highlight))
                .collect()
        };

        let ctx = TemplateContext::new()
            .with_var("filters", filter_buttons_html(&view.counts, state.active()))
            .with_var("groups", groups);

        let inner = self.templates.render("publications", &ctx)?;
        let title = match state.active() {
            FilterKey::All => "Publications".to_string(),
            key => format!("Publications: {}", key.label()),
        };
        self.wrap(&title, &publications_url(state.active()), &inner)
    }

    /// Projects page.
    pub fn generate_projects(&self, content: &SiteContent) -> Result<String> {
        debug!(count = content.projects.len(), "generating projects page");

        let cards: String = content.projects.iter().map(project_card_html).collect();
        let ctx = TemplateContext::new().with_var("cards", cards);

        let inner = self.templates.render("projects", &ctx)?;
        self.wrap("Projects", "/projects/", &inner)
    }

    /// About page.
    pub fn generate_about(&self, content: &SiteContent) -> Result<String> {
        debug!("generating about page");

        let fallback = AuthorRecord {
            name: self.config.site.author.clone().unwrap_or_default(),
            ..Default::default()
        };
        let author = content.author(ABOUT_AUTHOR).unwrap_or(&fallback);

        let ctx = TemplateContext::new()
            .with_var("author_card", author_card_html(author))
            .with_var("body", author.body_html.as_str())
            .with_opt("education", education_html(&content.resume))
            .with_opt("experience", experience_html(&content.resume));

        let inner = self.templates.render("about", &ctx)?;
        self.wrap("About", "/about/", &inner)
    }

    /// 404 page.
    pub fn generate_not_found(&self) -> Result<String> {
        let inner = self
            .templates
            .render("not_found", &TemplateContext::new())?;
        self.wrap("Page Not Found", "/404.html", &inner)
    }

    /// Wrap inner HTML in the base template.
    fn wrap(&self, title: &str, url_path: &str, inner: &str) -> Result<String> {
        let site = &self.config.site;
        let ctx = TemplateContext::new()
            .with_var("lang", site.language.as_str())
            .with_var("title", html_escape(title))
            .with_var("site_title_suffix", format!(" | {}", html_escape(&site.title)))
            .with_var("canonical_url", self.config.url_for(url_path))
            .with_var("content", inner)
            .with_var("site_title", html_escape(&site.title))
            .with_var("year", Utc::now().year().to_string())
            .with_opt("description", site.description.as_deref().map(html_escape))
            .with_opt("author", site.author.as_deref().map(html_escape))
            .with_opt("live_reload", self.live_reload.clone());

        Ok(self.templates.render("base", &ctx)?)
    }

    /// Output file for a URL path: `/a/` becomes `a/index.html`.
    #[must_use]
    pub fn output_path(url_path: &str, output_dir: &Path) -> PathBuf {
        let relative = url_path.trim_matches('/');

        if relative.is_empty() {
            output_dir.join("index.html")
        } else if relative.ends_with(".html") {
            output_dir.join(relative)
        } else {
            output_dir.join(relative).join("index.html")
        }
    }
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Author list with the highlighted name in `<strong>`.
pub fn authors_html(authors: &str, highlight: Option<&str>) -> String {
    emphasize_author(authors, highlight.unwrap_or_default())
        .into_iter()
        .map(|segment| match segment {
            AuthorSegment::Plain(text) => html_escape(text),
            AuthorSegment::Emphasized(text) => format!("<strong>{}</strong>", html_escape(text)),
        })
        .collect()
}

/// Link badges sized to their labels.
pub fn link_badges_html(links: &[Link]) -> String {
    if links.is_empty() {
        return String::new();
    }

    let badges: String = links
        .iter()
        .map(|link| {
            format!(
                r#"<a class="link-badge" href="{}" style="width: {}px" target="_blank" rel="noopener noreferrer">{}</a>"#,
                html_escape(&link.url),
                badge_width(&link.kind),
                html_escape(&link.kind)
            )
        })
        .collect();

    format!(r#"<div class="link-badges">{badges}</div>"#)
}

/// One publication entry.
///
/// With `link_title`, the title links to the DOI when there is one and the
/// year follows the conference name.
pub fn publication_item_html(
    publication: &PublicationRecord,
    highlight: Option<&str>,
    link_title: bool,
) -> String {
    let title = html_escape(&publication.title);
    let title_html = match doi_url(&publication.links).filter(|_| link_title) {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{title}</a>"#,
            html_escape(url)
        ),
        None => title,
    };

    // Previews have no year heading above them
    let conference = if link_title {
        format!(
            "{} &middot; {}",
            html_escape(&publication.conference),
            html_escape(publication.year.trim())
        )
    } else {
        html_escape(&publication.conference)
    };

    let venue = if publication.conference_short.is_empty() {
        String::new()
    } else {
        format!(
            r#"<span class="publication-venue" style="width: {}px">{}</span>"#,
            badge_width(&publication.conference_short),
            html_escape(&publication.conference_short)
        )
    };

    format!(
        r#"<li class="publication" data-type="{kind}">
    {venue}
    <div class="publication-body">
        <span class="publication-type">{label}</span>
        <h3 class="publication-title">{title_html}</h3>
        <p class="publication-authors">{authors}</p>
        <p class="publication-conference">{conference}</p>
        {links}
    </div>
</li>
"#,
        kind = publication.publication_type.as_str(),
        label = publication.publication_type.label(),
        authors = authors_html(&publication.authors, highlight),
        links = link_badges_html(&publication.links),
    )
}

/// A year heading followed by its publications.
pub fn year_group_html(group: &YearGroup<'_>, highlight: Option<&str>) -> String {
    let items: String = group
        .records
        .iter()
        .map(|p| publication_item_html(p, highlight, false))
        .collect();

    format!(
        r#"<section class="year-group">
    <h2>{}</h2>
    <ul class="publication-list">
        {items}
    </ul>
</section>
"#,
        html_escape(group.year)
    )
}

/// Filter buttons with counts; the active one is marked.
pub fn filter_buttons_html(counts: &[FilterCount], active: FilterKey) -> String {
    counts
        .iter()
        .map(|count| {
            let (class, current) = if count.key == active {
                ("filter-button active", r#" aria-current="page""#)
            } else {
                ("filter-button", "")
            };
            format!(
                r#"<a class="{class}" href="{}"{current}>{}<span class="filter-count">({})</span></a>"#,
                publications_url(count.key),
                count.label,
                count.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

/// News section, newest first; `None` when there is no news.
///
/// The list becomes a scrolling container at `scroll_threshold` items.
pub fn news_list_html(news: &[NewsRecord], scroll_threshold: usize) -> Option<String> {
    if news.is_empty() {
        return None;
    }

    let class = if news.len() >= scroll_threshold {
        "news-list scrolling"
    } else {
        "news-list"
    };

    let items: String = news
        .iter()
        .map(|item| {
            format!(
                r#"<li><time datetime="{}">{}</time><span>{}</span></li>"#,
                html_escape(item.date.as_str()),
                html_escape(&format_month_year(&item.date)),
                html_escape(&item.content)
            )
        })
        .collect();

    Some(format!(
        r#"<section class="news">
    <h2>News</h2>
    <ul class="{class}">{items}</ul>
</section>"#
    ))
}

/// A project card with optional image and link.
pub fn project_card_html(project: &ProjectRecord) -> String {
    let title = html_escape(&project.title);
    let title_html = match &project.href {
        Some(href) => format!(r#"<a href="{}">{title}</a>"#, html_escape(href)),
        None => title.clone(),
    };

    let image = project
        .img_src
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{title}">"#, html_escape(src)))
        .unwrap_or_default();

    let technologies = if project.technologies.is_empty() {
        String::new()
    } else {
        let items: String = project
            .technologies
            .iter()
            .map(|t| format!("<li>{}</li>", html_escape(t)))
            .collect();
        format!(r#"<ul class="project-tech">{items}</ul>"#)
    };

    let featured = if project.featured { " featured" } else { "" };

    format!(
        r#"<article class="project-card{featured}">
    {image}
    <div class="project-body">
        <h3>{title_html}</h3>
        <p>{}</p>
        {technologies}
    </div>
</article>
"#,
        html_escape(&project.description)
    )
}

/// Sidebar for the About page.
pub fn author_card_html(author: &AuthorRecord) -> String {
    let name = html_escape(&author.name);

    let avatar = author
        .avatar
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{name}">"#, html_escape(src)))
        .unwrap_or_default();

    let occupation = author
        .occupation
        .as_deref()
        .map(|o| format!(r#"<p class="occupation">{}</p>"#, html_escape(o)))
        .unwrap_or_default();

    let company = author
        .company
        .as_deref()
        .map(|c| format!(r#"<p class="company">{}</p>"#, html_escape(c)))
        .unwrap_or_default();

    let socials: Vec<(&str, String)> = [
        ("Email", author.email.as_deref().map(email_href)),
        ("GitHub", author.github.clone()),
        ("LinkedIn", author.linkedin.clone()),
        ("Google Scholar", author.scholar.clone()),
        ("Twitter", author.twitter.clone()),
    ]
    .into_iter()
    .filter_map(|(label, href)| href.filter(|h| !h.is_empty()).map(|h| (label, h)))
    .collect();

    let social_html = if socials.is_empty() {
        String::new()
    } else {
        let items: String = socials
            .iter()
            .map(|(label, href)| {
                format!(
                    r#"<li><a href="{}" aria-label="{label}">{label}</a></li>"#,
                    html_escape(href)
                )
            })
            .collect();
        format!(r#"<ul class="social-links">{items}</ul>"#)
    };

    format!("{avatar}\n<h2>{name}</h2>\n{occupation}{company}{social_html}")
}

/// Education section, or `None` when empty.
pub fn education_html(resume: &Resume) -> Option<String> {
    if resume.education.is_empty() {
        return None;
    }

    let entries: String = resume
        .education
        .iter()
        .map(|e| {
            let details: String = e
                .details
                .iter()
                .map(|d| format!("<li>{}</li>", html_escape(d)))
                .collect();
            let details = if details.is_empty() {
                String::new()
            } else {
                format!("<ul>{details}</ul>")
            };
            format!(
                r#"<div class="resume-entry"><h3>{}</h3><p>{}</p><p class="period">{}</p>{details}</div>"#,
                html_escape(&e.school),
                html_escape(&e.degree),
                html_escape(&e.date)
            )
        })
        .collect();

    Some(format!(r#"<section class="education"><h2>Education</h2>{entries}</section>"#))
}

/// Experience section, or `None` when empty.
pub fn experience_html(resume: &Resume) -> Option<String> {
    if resume.experience.is_empty() {
        return None;
    }

    let entries: String = resume
        .experience
        .iter()
        .map(|e| {
            let organization = e
                .organization
                .as_deref()
                .map(|o| format!(", {}", html_escape(o)))
                .unwrap_or_default();
            let description = if e.description.is_empty() {
                String::new()
            } else {
                format!("<p>{}</p>", html_escape(&e.description))
            };
            format!(
                r#"<div class="resume-entry"><h3>{}</h3><p>{}{organization}</p><p class="period">{} &ndash; {}</p>{description}</div>"#,
                html_escape(&e.role),
                html_escape(&e.company),
                html_escape(&e.start),
                html_escape(&e.end)
            )
        })
        .collect();

    Some(format!(r#"<section class="experience"><h2>Experience</h2>{entries}</section>"#))
}
