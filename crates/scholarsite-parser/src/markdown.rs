//! Markdown rendering using pulldown-cmark.
//!
//! Author bodies are Markdown or MDX. MDX component tags pass through as
//! inline HTML.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// Markdown renderer.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a renderer with tables, footnotes, strikethrough, task lists
    /// and heading attributes enabled.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Render a Markdown body to HTML.
    ///
    /// Headings without an explicit `{#id}` get one derived from their text.
    pub fn render(&self, body: &str) -> String {
        let mut events: Vec<Event<'_>> = Parser::new_ext(body, self.options).collect();
        assign_heading_ids(&mut events);

        let mut out = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    for start in 0..events.len() {
        let Event::Start(Tag::Heading { id: None, .. }) = &events[start] else {
            continue;
        };

        let mut text = String::new();
        for event in &events[start + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        let base = slugify(&text);
        if base.is_empty() {
            continue;
        }
        let count = seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
            *id = Some(CowStr::from(slug));
        }
    }
}

/// Convert text to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraph_and_heading() {
        let parser = MarkdownParser::new();
        let html = parser.render("## Research Interests\n\nI build **tools** for diary studies.");

        assert!(html.contains(r#"<h2 id="research-interests">Research Interests</h2>"#));
        assert!(html.contains("<strong>tools</strong>"));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let parser = MarkdownParser::new();
        let html = parser.render("# Hello {#custom}");

        assert!(html.contains(r#"id="custom""#));
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let parser = MarkdownParser::new();
        let html = parser.render("## Notes\n\n## Notes");

        assert!(html.contains(r#"id="notes""#));
        assert!(html.contains(r#"id="notes-1""#));
    }

    #[test]
    fn test_inline_html_passes_through() {
        let parser = MarkdownParser::new();
        let html = parser.render("Contact <a href=\"/about/\">me</a>.");

        assert!(html.contains("<a href=\"/about/\">me</a>"));
    }

    #[test]
    fn test_table_rendering() {
        let parser = MarkdownParser::new();
        let html = parser.render(
            r#"| Year | Venue |
|------|-------|
| 2025 | CHI   |"#,
        );

        assert!(html.contains("<table>"));
        assert!(html.contains("<thead>"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Special!@#Chars"), "specialchars");
        assert_eq!(slugify("!!!"), "");
    }
}
