//! HTML template system for page generation.
//!
//! Provides a lightweight template system using string interpolation rather than
//! heavy template engines like Tera or Handlebars.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a variable only when a value is present.
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A simple template that supports variable interpolation.
///
/// Variables are specified as `{{ variable_name }}` in the template string;
/// `{{ variable_name? }}` renders as empty when the variable is missing.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Substituted values are not scanned again for placeholders.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();

            let (var_name, optional) = if let Some(stripped) = var_name.strip_suffix('?') {
                (stripped, true)
            } else {
                (var_name, false)
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with default templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        self.register(Template::new("home", DEFAULT_HOME_TEMPLATE));
        self.register(Template::new("publications", DEFAULT_PUBLICATIONS_TEMPLATE));
        self.register(Template::new("projects", DEFAULT_PROJECTS_TEMPLATE));
        self.register(Template::new("about", DEFAULT_ABOUT_TEMPLATE));
        self.register(Template::new("not_found", DEFAULT_NOT_FOUND_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Default base HTML template.
pub const DEFAULT_BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}{{ site_title_suffix? }}</title>
    <meta name="description" content="{{ description? }}">
    <meta name="author" content="{{ author? }}">
    <link rel="canonical" href="{{ canonical_url }}">
    <style>
        :root {
            --color-primary: #0F766E;
            --color-primary-hover: #115E59;
            --color-bg: #FFFFFF;
            --color-bg-muted: #F8FAFC;
            --color-text: #111827;
            --color-text-muted: #6B7280;
            --color-border: #E5E7EB;
            --color-badge: #CCFBF1;
            color-scheme: light;
        }

        @media (prefers-color-scheme: dark) {
            :root {
                --color-primary: #5EEAD4;
                --color-primary-hover: #99F6E4;
                --color-bg: #030712;
                --color-bg-muted: #111827;
                --color-text: #F3F4F6;
                --color-text-muted: #9CA3AF;
                --color-border: #1F2937;
                --color-badge: #134E4A;
                color-scheme: dark;
            }
        }

        *, *::before, *::after { box-sizing: border-box; }
        * { margin: 0; padding: 0; }

        body {
            font-family: system-ui, -apple-system, sans-serif;
            line-height: 1.6;
            color: var(--color-text);
            background-color: var(--color-bg);
            min-height: 100vh;
            display: flex;
            flex-direction: column;
        }

        .container { width: 100%; max-width: 960px; margin: 0 auto; padding: 0 1.5rem; }

        header { border-bottom: 1px solid var(--color-border); }
        header nav { display: flex; align-items: center; justify-content: space-between; padding: 1rem 0; }
        .site-title { font-weight: 600; color: var(--color-text); text-decoration: none; }
        .nav-links { display: flex; gap: 1.5rem; }
        .nav-links a { color: var(--color-text-muted); text-decoration: none; font-weight: 500; }
        .nav-links a:hover { color: var(--color-primary); }

        main { flex: 1; padding: 3rem 0; }
        h1 { font-size: 2rem; margin-bottom: 1rem; }
        h2 { font-size: 1.5rem; margin: 2rem 0 1rem; }
        h3 { font-size: 1.125rem; margin-bottom: 0.25rem; }
        p { margin-bottom: 1rem; }
        a { color: var(--color-primary); text-decoration: none; }
        a:hover { color: var(--color-primary-hover); text-decoration: underline; }
        ul { padding-left: 1.5rem; margin-bottom: 1rem; }

        .news-list { list-style: none; padding: 0; }
        .news-list li { display: flex; gap: 1rem; padding: 0.5rem 0; border-bottom: 1px solid var(--color-border); }
        .news-list time { flex-shrink: 0; width: 8rem; color: var(--color-text-muted); }
        .news-list.scrolling { max-height: 14rem; overflow-y: auto; }

        .filters { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-bottom: 2rem; }
        .filter-button {
            padding: 0.375rem 0.875rem; border-radius: 9999px; border: 1px solid var(--color-border);
            color: var(--color-text); font-size: 0.875rem;
        }
        .filter-button.active { background-color: var(--color-primary); border-color: var(--color-primary); color: var(--color-bg); }
        .filter-count { opacity: 0.7; margin-left: 0.25rem; }

        .year-group h2 { border-bottom: 1px solid var(--color-border); padding-bottom: 0.25rem; }
        .publication-list { list-style: none; padding: 0; }
        .publication { display: flex; gap: 1rem; padding: 1rem 0; }
        .publication-venue {
            flex-shrink: 0; height: 1.75rem; display: inline-flex; align-items: center; justify-content: center;
            border-radius: 0.25rem; background-color: var(--color-badge); font-size: 0.75rem; font-weight: 600;
        }
        .publication-authors { color: var(--color-text-muted); }
        .publication-authors strong { color: var(--color-text); }
        .publication-conference { font-style: italic; color: var(--color-text-muted); margin-bottom: 0.5rem; }
        .publication-type { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em; color: var(--color-text-muted); }
        .link-badges { display: flex; gap: 0.5rem; }
        .link-badge {
            display: inline-block; text-align: center; padding: 0.125rem 0; border: 1px solid var(--color-primary);
            border-radius: 0.25rem; font-size: 0.75rem;
        }
        .empty { color: var(--color-text-muted); font-style: italic; }

        .project-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1.5rem; }
        .project-card { border: 1px solid var(--color-border); border-radius: 0.5rem; overflow: hidden; }
        .project-card img { width: 100%; aspect-ratio: 16 / 9; object-fit: cover; }
        .project-body { padding: 1rem; }
        .project-tech { display: flex; flex-wrap: wrap; gap: 0.375rem; list-style: none; padding: 0; }
        .project-tech li { font-size: 0.75rem; padding: 0.125rem 0.5rem; border-radius: 9999px; background-color: var(--color-bg-muted); }

        .about { display: grid; grid-template-columns: 240px 1fr; gap: 3rem; }
        .author-card { text-align: center; }
        .author-card img { width: 192px; height: 192px; border-radius: 50%; object-fit: cover; }
        .author-card .occupation, .author-card .company { color: var(--color-text-muted); }
        .social-links { display: flex; justify-content: center; gap: 1rem; list-style: none; padding: 0; margin-top: 1rem; }
        .resume-entry { margin-bottom: 1.5rem; }
        .resume-entry .period { color: var(--color-text-muted); font-size: 0.875rem; }

        footer { border-top: 1px solid var(--color-border); padding: 2rem 0; }
        footer p { font-size: 0.875rem; color: var(--color-text-muted); text-align: center; margin: 0; }

        @media (max-width: 640px) {
            .about { grid-template-columns: 1fr; }
            .publication { flex-direction: column; gap: 0.5rem; }
        }
    </style>
</head>
<body>
    <header>
        <div class="container">
            <nav>
                <a href="/" class="site-title">{{ site_title }}</a>
                <div class="nav-links">
                    <a href="/publications/">Publications</a>
                    <a href="/projects/">Projects</a>
                    <a href="/about/">About</a>
                </div>
            </nav>
        </div>
    </header>
    <main>
        <div class="container">
            {{ content }}
        </div>
    </main>
    <footer>
        <div class="container">
            <p>&copy; {{ year }} {{ site_title }}</p>
        </div>
    </footer>
    {{ live_reload? }}
</body>
</html>"##;

/// Home page: introduction, news and latest publications.
pub const DEFAULT_HOME_TEMPLATE: &str = r#"<section class="intro">
    {{ intro }}
</section>
{{ news? }}
<section class="latest-publications">
    <h2>Latest Publications</h2>
    <ul class="publication-list">
        {{ publications }}
    </ul>
    {{ view_all? }}
</section>"#;

/// Publications page with filter buttons and year groups.
pub const DEFAULT_PUBLICATIONS_TEMPLATE: &str = r#"<section class="publications">
    <h1>Publications</h1>
    <nav class="filters" aria-label="Publication filters">
        {{ filters }}
    </nav>
    {{ groups }}
</section>"#;

/// Projects page.
pub const DEFAULT_PROJECTS_TEMPLATE: &str = r#"<section class="projects">
    <h1>Projects</h1>
    <div class="project-grid">
        {{ cards }}
    </div>
</section>"#;

/// About page with author sidebar and resume.
pub const DEFAULT_ABOUT_TEMPLATE: &str = r#"<section class="about">
    <aside class="author-card">
        {{ author_card }}
    </aside>
    <div class="about-body">
        {{ body }}
        {{ education? }}
        {{ experience? }}
    </div>
</section>"#;

/// Not found page.
pub const DEFAULT_NOT_FOUND_TEMPLATE: &str = r#"<section class="not-found">
    <h1>404</h1>
    <p>Sorry, this page could not be found.</p>
    <p><a href="/">Back to the homepage</a></p>
</section>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let mut ctx = TemplateContext::new();
        ctx.insert("name", "World");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");
        let ctx = TemplateContext::new();

        assert_eq!(template.render(&ctx).unwrap(), "Hello!");

        let ctx = TemplateContext::new().with_opt("suffix", Some(", World"));
        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");

        let ctx = TemplateContext::new().with_opt("suffix", None::<String>);
        assert_eq!(template.render(&ctx).unwrap(), "Hello!");
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let result = template.render(&TemplateContext::new());

        assert!(matches!(result, Err(TemplateError::MissingVariable(_))));
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("test", "Hello, {{ name");
        let result = template.render(&TemplateContext::new());

        assert!(matches!(result, Err(TemplateError::InvalidSyntax(_))));
    }

    #[test]
    fn test_substituted_values_not_rescanned() {
        let template = Template::new("test", "{{ a }}");
        let ctx = TemplateContext::new().with_var("a", "{{ b }}");

        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}");
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        for name in ["base", "home", "publications", "projects", "about", "not_found"] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
        assert!(matches!(
            registry.render("nonexistent", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_render_base_template() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new()
            .with_var("lang", "en")
            .with_var("title", "Publications")
            .with_var("canonical_url", "https://example.com/publications/")
            .with_var("content", "<p>Hello!</p>")
            .with_var("site_title", "Sung Oh")
            .with_var("year", "2026");

        let result = registry.render("base", &ctx).unwrap();
        assert!(result.contains("<!DOCTYPE html>"));
        assert!(result.contains("<title>Publications</title>"));
        assert!(result.contains("<p>Hello!</p>"));
        assert!(result.contains(r#"<a href="/projects/">Projects</a>"#));
    }
}
