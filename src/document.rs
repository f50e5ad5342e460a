//! Document entity.
//!
//! A [`Document`] pairs a stable identifier (derived from the file path) with
//! its parsed front matter and raw body. The rendered body is computed lazily
//! on first access and cached for the document's lifetime; the source file is
//! immutable during a run, so the cache never needs invalidation.

use crate::error::CatalogError;
use crate::metadata::FrontMatter;
use crate::render::RenderFn;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// A single content document loaded from disk.
pub struct Document {
    id: String,
    source: PathBuf,
    matter: FrontMatter,
    body: String,
    renderer: Arc<RenderFn>,
    rendered: OnceLock<String>,
}

/// Serializable projection of a document for machine-readable listings.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    /// Stable identifier (e.g. "posts/hello-world")
    pub id: String,

    pub title: String,

    /// Publication date as ISO 8601 string (e.g. "2024-01-15")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub published: bool,
}

impl Document {
    pub fn new(
        id: String,
        source: PathBuf,
        matter: FrontMatter,
        body: String,
        renderer: Arc<RenderFn>,
    ) -> Self {
        Self {
            id,
            source,
            matter,
            body,
            renderer,
            rendered: OnceLock::new(),
        }
    }

    /// Stable identifier: root-relative path, extension stripped,
    /// separators normalized to `/`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Backing file path. Used only for (re)loading, never for identity.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn matter(&self) -> &FrontMatter {
        &self.matter
    }

    /// Raw, unrendered body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Title, falling back to the id when the header has none.
    pub fn title(&self) -> &str {
        self.matter.title.as_deref().unwrap_or(&self.id)
    }

    /// Comparison key for index ordering.
    pub fn sort_date(&self) -> Option<NaiveDate> {
        self.matter.date
    }

    /// Visibility flag; absent in the header means draft.
    pub fn is_published(&self) -> bool {
        self.matter.published
    }

    /// Rendered body, computed on first call and cached.
    ///
    /// Failures are not cached: a failed render leaves the cache empty and
    /// the next call retries.
    pub fn render(&self) -> Result<&str, CatalogError> {
        if let Some(html) = self.rendered.get() {
            return Ok(html);
        }
        let html = (self.renderer)(&self.body)
            .map_err(|err| CatalogError::RenderFailed(err.to_string()))?;
        Ok(self.rendered.get_or_init(|| html))
    }

    pub fn summary_data(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.clone(),
            title: self.title().to_owned(),
            date: self.matter.date.map(|d| d.to_string()),
            author: self.matter.author.clone(),
            summary: self.matter.summary.clone(),
            tags: self.matter.tags.clone(),
            published: self.matter.published,
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("date", &self.matter.date)
            .field("published", &self.matter.published)
            .field("rendered", &self.rendered.get().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::paragraph_renderer;
    use anyhow::bail;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_doc(matter: FrontMatter, body: &str, renderer: Arc<RenderFn>) -> Document {
        Document::new(
            "posts/test".to_string(),
            PathBuf::from("posts/test.md"),
            matter,
            body.to_string(),
            renderer,
        )
    }

    #[test]
    fn test_render_caches_result() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let renderer: Arc<RenderFn> = Arc::new(move |raw| {
            counter.fetch_add(1, Ordering::SeqCst);
            paragraph_renderer(raw)
        });

        let doc = make_doc(FrontMatter::default(), "Hello", renderer);
        assert_eq!(doc.render().unwrap(), "<p>Hello</p>\n");
        assert_eq!(doc.render().unwrap(), "<p>Hello</p>\n");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_render_failure_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let renderer: Arc<RenderFn> = Arc::new(move |raw| {
            // Fail on the first call, succeed afterwards
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                bail!("renderer exploded");
            }
            paragraph_renderer(raw)
        });

        let doc = make_doc(FrontMatter::default(), "Hello", renderer);
        let err = doc.render().unwrap_err();
        assert!(matches!(err, CatalogError::RenderFailed(_)));

        // Retry succeeds and caches
        assert_eq!(doc.render().unwrap(), "<p>Hello</p>\n");
        assert_eq!(doc.render().unwrap(), "<p>Hello</p>\n");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_title_falls_back_to_id() {
        let doc = make_doc(FrontMatter::default(), "", Arc::new(paragraph_renderer));
        assert_eq!(doc.title(), "posts/test");

        let matter = FrontMatter {
            title: Some("Named".to_string()),
            ..Default::default()
        };
        let doc = make_doc(matter, "", Arc::new(paragraph_renderer));
        assert_eq!(doc.title(), "Named");
    }

    #[test]
    fn test_is_published_default_false() {
        let doc = make_doc(FrontMatter::default(), "", Arc::new(paragraph_renderer));
        assert!(!doc.is_published());
    }

    #[test]
    fn test_summary_data() {
        let matter = FrontMatter {
            title: Some("A".to_string()),
            date: NaiveDate::from_ymd_opt(2021, 1, 1),
            published: true,
            tags: vec!["rust".to_string()],
            ..Default::default()
        };
        let doc = make_doc(matter, "Hello", Arc::new(paragraph_renderer));
        let data = doc.summary_data();
        assert_eq!(data.id, "posts/test");
        assert_eq!(data.title, "A");
        assert_eq!(data.date.as_deref(), Some("2021-01-01"));
        assert!(data.published);

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"date\":\"2021-01-01\""));
        assert!(!json.contains("author"));
    }
}
