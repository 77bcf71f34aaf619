//! Small display helpers shared by page renderers.

use crate::{date::ContentDate, record::Link};

/// Minimum badge width in pixels.
pub const MIN_BADGE_WIDTH: u32 = 40;

const BADGE_PADDING: u32 = 20;
const BADGE_CHAR_WIDTH: u32 = 8;

/// Format a date as `Month YYYY` in UTC, e.g. `June 2025`.
///
/// Unparseable dates are returned as written.
pub fn format_month_year(date: &ContentDate) -> String {
    match date.parse() {
        Some(dt) => dt.format("%B %Y").to_string(),
        None => date.as_str().to_string(),
    }
}

/// Width of a link badge for the given label.
pub fn badge_width(label: &str) -> u32 {
    let chars = u32::try_from(label.chars().count()).unwrap_or(u32::MAX);
    BADGE_PADDING
        .saturating_add(chars.saturating_mul(BADGE_CHAR_WIDTH))
        .max(MIN_BADGE_WIDTH)
}

/// URL of the first link whose type is exactly `DOI`.
pub fn doi_url(links: &[Link]) -> Option<&str> {
    links
        .iter()
        .find(|link| link.kind == "DOI")
        .map(|link| link.url.as_str())
}

/// `mailto:` target for an obfuscated address such as `name[at]host`.
pub fn email_href(email: &str) -> String {
    format!("mailto:{}", email.replace("[at]", "@"))
}
