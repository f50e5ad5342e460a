//! Body rendering seam.
//!
//! The catalog treats rendering as an external collaborator: any function
//! from raw body text to HTML. A Markdown engine can be plugged in here; the
//! built-in [`paragraph_renderer`] only escapes the text and wraps
//! blank-line-separated blocks in `<p>` tags, which is enough for the CLI
//! and for tests.

use anyhow::Result;
use std::borrow::Cow;

/// Collaborator contract: raw body text in, HTML out.
///
/// Failures surface as [`crate::CatalogError::RenderFailed`] at the document
/// level and are safe to retry.
pub type RenderFn = dyn Fn(&str) -> Result<String> + Send + Sync;

/// Minimal built-in renderer: escape, then wrap paragraphs.
pub fn paragraph_renderer(raw: &str) -> Result<String> {
    let mut html = String::with_capacity(raw.len() + 16);
    for block in raw.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        html.push_str("<p>");
        html.push_str(&html_escape(block));
        html.push_str("</p>\n");
    }
    Ok(html)
}

/// Escape HTML special characters.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
fn html_escape(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
