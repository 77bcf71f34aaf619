//! Frontmatter dates.
//!
//! Dates are kept exactly as written and parsed on demand, so a malformed
//! value never rejects the record that carries it.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
};

/// A date as it appears in content frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDate(String);

impl ContentDate {
    /// Wrap a raw date string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The date exactly as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the date as UTC.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD`.
    #[must_use]
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// Sortable instant; unparseable dates collapse to the earliest instant.
    #[must_use]
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.parse().unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Sort key for an optional date. Missing dates sort before every real date.
#[must_use]
pub fn sort_key(date: Option<&ContentDate>) -> DateTime<Utc> {
    date.map_or(DateTime::<Utc>::MIN_UTC, ContentDate::sort_key)
}

impl fmt::Display for ContentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Serialize for ContentDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContentDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ContentDateVisitor)
    }
}

struct ContentDateVisitor;

impl<'de> Visitor<'de> for ContentDateVisitor {
    type Value = ContentDate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a date string or TOML datetime")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(ContentDate::new(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(ContentDate(value))
    }

    // YAML `date: 2024` arrives as a number
    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(ContentDate(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(ContentDate(value.to_string()))
    }

    // TOML datetimes arrive as a single-entry table holding the text form
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let (_, value): (String, String) = map
            .next_entry()?
            .ok_or_else(|| de::Error::custom("empty datetime table"))?;
        Ok(ContentDate(value))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let date = ContentDate::new("2025-03-14");
        let parsed = date.parse().expect("parse");
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.month(), 3);
        assert_eq!(parsed.day(), 14);
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let date = ContentDate::new("2025-01-01T02:00:00+05:00");
        let parsed = date.parse().expect("parse");
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 12);
    }

    #[test]
    fn test_parse_naive_datetime() {
        let date = ContentDate::new("2024-08-20T10:30:00");
        assert!(date.parse().is_some());
    }

    #[test]
    fn test_malformed_date_sorts_earliest() {
        let date = ContentDate::new("sometime in spring");
        assert!(date.parse().is_none());
        assert_eq!(date.sort_key(), DateTime::<Utc>::MIN_UTC);
        assert_eq!(sort_key(None), DateTime::<Utc>::MIN_UTC);

        let old = ContentDate::new("1965-05-01");
        assert!(sort_key(None) < old.sort_key());
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let date: ContentDate = serde_yaml::from_str("2024-05-01").expect("yaml");
        assert_eq!(date.as_str(), "2024-05-01");
    }

    #[test]
    fn test_deserialize_from_toml_datetime() {
        #[derive(Deserialize)]
        struct Holder {
            date: ContentDate,
        }

        let holder: Holder = toml::from_str("date = 2024-05-01").expect("toml");
        assert_eq!(holder.date.as_str(), "2024-05-01");
        assert!(holder.date.parse().is_some());
    }
}
