//! Front matter parsing.
//!
//! A source document is a plain-text file that opens with a key:value header
//! block (a restricted YAML subset: strings, numbers, booleans, dates, lists),
//! followed by a blank line, followed by free-form body text:
//!
//! ```text
//! title: "Hello, world"
//! date: 2021-01-01
//! published: true
//!
//! Body text starts here.
//! ```
//!
//! The parser splits at the first blank line and deserializes the header into
//! a [`FrontMatter`] record. The body is returned verbatim; rendering it to
//! HTML is the renderer's job, not this module's.

use crate::error::CatalogError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Parsed header fields of a source document.
///
/// Recognized keys get typed fields; anything else lands in `extra` so
/// templates can still reach custom header keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,

    /// Publication date, the catalog's ordering key.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,

    /// Last update date.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub update: Option<NaiveDate>,

    pub author: Option<String>,

    pub summary: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Visibility flag. Absent means draft.
    #[serde(default)]
    pub published: bool,

    /// Unrecognized header keys, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml_ng::Value>,
}

/// Read and parse a source document.
///
/// The file handle is scoped to this call; I/O failures map to
/// [`CatalogError::SourceUnreadable`].
pub fn parse_file(path: &Path) -> Result<(FrontMatter, String), CatalogError> {
    let raw = fs::read_to_string(path)
        .map_err(|err| CatalogError::SourceUnreadable(path.to_path_buf(), err))?;
    parse_str(&raw, path)
}

/// Split a raw document into front matter and body.
///
/// The header ends at the first blank line (two consecutive newlines);
/// CRLF line endings are normalized to LF first. A document without that
/// separator is [`CatalogError::MalformedDocument`]; a header that does not
/// deserialize is [`CatalogError::InvalidMetadata`].
pub fn parse_str(raw: &str, path: &Path) -> Result<(FrontMatter, String), CatalogError> {
    let raw = if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(raw)
    };
    let Some((header, body)) = raw.split_once("\n\n") else {
        return Err(CatalogError::MalformedDocument(path.to_path_buf()));
    };

    let matter: FrontMatter = serde_yaml_ng::from_str(header)
        .map_err(|err| CatalogError::InvalidMetadata(path.to_path_buf(), err.to_string()))?;

    Ok((matter, body.to_owned()))
}

/// Deserialize a date field: accepts `YYYY-MM-DD` or an RFC 3339 datetime
/// (truncated to its date part).
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        Some(s) => parse_date(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date `{s}`, expected YYYY-MM-DD"))),
        None => Ok(None),
    }
}

/// Parse `YYYY-MM-DD`, falling back to RFC 3339.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(raw: &str) -> Result<(FrontMatter, String), CatalogError> {
        parse_str(raw, &PathBuf::from("test.md"))
    }

    #[test]
    fn test_parse_round_trip() {
        let raw = "title: \"A\"\ndate: 2021-01-01\npublished: true\n\nHello";
        let (matter, body) = parse(raw).unwrap();
        assert_eq!(matter.title, Some("A".to_string()));
        assert_eq!(matter.date, NaiveDate::from_ymd_opt(2021, 1, 1));
        assert!(matter.published);
        assert_eq!(body, "Hello");
    }

    #[test]
    fn test_parse_missing_separator() {
        let raw = "title: \"A\"\ndate: 2021-01-01\n";
        let err = parse(raw).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedDocument(_)));
    }

    #[test]
    fn test_parse_bad_header() {
        let raw = "title: [unclosed\n\nBody";
        let err = parse(raw).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidMetadata(_, _)));
    }

    #[test]
    fn test_parse_bad_date() {
        let raw = "date: not-a-date\n\nBody";
        let err = parse(raw).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidMetadata(_, _)));
        assert!(format!("{err}").contains("not-a-date"));
    }

    #[test]
    fn test_published_defaults_to_false() {
        let raw = "title: Draft\ndate: 2021-01-01\n\nBody";
        let (matter, _) = parse(raw).unwrap();
        assert!(!matter.published);
    }

    #[test]
    fn test_tags_list() {
        let raw = "date: 2021-01-01\ntags:\n  - rust\n  - web\n\nBody";
        let (matter, _) = parse(raw).unwrap();
        assert_eq!(matter.tags, vec!["rust".to_string(), "web".to_string()]);
    }

    #[test]
    fn test_extra_keys_preserved() {
        let raw = "date: 2021-01-01\nseries: numbers\nrevision: 3\n\nBody";
        let (matter, _) = parse(raw).unwrap();
        assert_eq!(
            matter.extra.get("series").and_then(|v| v.as_str()),
            Some("numbers")
        );
        assert_eq!(matter.extra.get("revision").and_then(|v| v.as_i64()), Some(3));
    }

    #[test]
    fn test_body_kept_verbatim() {
        let raw = "date: 2021-01-01\n\nFirst paragraph.\n\nSecond paragraph.\n";
        let (_, body) = parse(raw).unwrap();
        assert_eq!(body, "First paragraph.\n\nSecond paragraph.\n");
    }

    #[test]
    fn test_parse_crlf_document() {
        let raw = "title: \"A\"\r\ndate: 2021-01-01\r\npublished: true\r\n\r\nHello\r\nworld";
        let (matter, body) = parse(raw).unwrap();
        assert_eq!(matter.title, Some("A".to_string()));
        assert_eq!(matter.date, NaiveDate::from_ymd_opt(2021, 1, 1));
        assert!(matter.published);
        assert_eq!(body, "Hello\nworld");
    }

    #[test]
    fn test_parse_rfc3339_date() {
        let raw = "date: 2021-06-15T10:30:00Z\n\nBody";
        let (matter, _) = parse(raw).unwrap();
        assert_eq!(matter.date, NaiveDate::from_ymd_opt(2021, 6, 15));
    }

    #[test]
    fn test_parse_date_helper() {
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date(""), None);
    }
}
