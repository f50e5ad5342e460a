//! Content catalog: directory walking, document loading, ordered reads.
//!
//! [`Catalog`] owns one [`OrderedIndex`] of [`Document`]s keyed by id and
//! sorted by publication date, newest first. `load()` does a full rescan:
//! it builds a fresh index and only swaps it in once the walk completes, so
//! readers never observe a partially-populated catalog. Per-document parse
//! failures are logged and skipped; one bad file never aborts the load.

use crate::config::ContentConfig;
use crate::document::Document;
use crate::error::CatalogError;
use crate::index::OrderedIndex;
use crate::log;
use crate::metadata;
use crate::render::{RenderFn, paragraph_renderer};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Which documents a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every document in the index.
    All,
    /// Only documents with `published: true` (or everything in preview mode).
    Published,
}

/// Outcome of a [`Catalog::load`] rescan.
#[derive(Debug, Default)]
pub struct LoadSummary {
    /// Documents in the index after the rescan.
    pub loaded: usize,
    /// Files that failed to parse, with the reason each was skipped.
    pub skipped: Vec<(PathBuf, CatalogError)>,
}

type DocumentIndex = OrderedIndex<String, Document, Option<NaiveDate>>;

/// The top-level owner of the document index and the load/query API.
pub struct Catalog {
    root: PathBuf,
    extension: String,
    preview: bool,
    renderer: Arc<RenderFn>,
    index: DocumentIndex,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("root", &self.root)
            .field("extension", &self.extension)
            .field("preview", &self.preview)
            .field("documents", &self.index.len())
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Create an empty catalog rooted at `root`, indexing files whose
    /// extension equals `extension` (without the leading dot).
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            preview: false,
            renderer: Arc::new(paragraph_renderer),
            index: new_index(),
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.root.clone(), config.extension.clone()).preview(config.preview)
    }

    /// Preview mode: `Published` reads show drafts too.
    pub fn preview(mut self, enabled: bool) -> Self {
        self.preview = enabled;
        self
    }

    /// Replace the body renderer (any `raw text -> HTML` function).
    pub fn with_renderer(mut self, renderer: Arc<RenderFn>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Full rescan: walk the root, parse every matching file, rebuild the
    /// index, swap it in.
    ///
    /// The walk is in sorted file-name order, so duplicate-id collisions
    /// resolve last-writer-wins deterministically. Files that fail to parse
    /// are logged, skipped and reported in the summary. A failed walk
    /// (e.g. missing root) returns an error and leaves the previous index
    /// queryable.
    pub fn load(&mut self) -> Result<LoadSummary> {
        let mut index = new_index();
        let mut skipped = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("failed to walk `{}`", self.root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            let Some(id) = derive_id(&self.root, path) else {
                continue;
            };

            match self.build_document(path, id) {
                Ok(doc) => {
                    if let Some(replaced) = index.insert(doc.id().to_owned(), doc) {
                        log!(
                            "catalog";
                            "duplicate id `{}`: `{}` overwritten by `{}`",
                            replaced.id(),
                            replaced.source().display(),
                            path.display()
                        );
                    }
                }
                Err(err) => {
                    log!("catalog"; "skipping `{}`: {err}", path.display());
                    skipped.push((path.to_path_buf(), err));
                }
            }
        }

        self.index = index;
        Ok(LoadSummary {
            loaded: self.index.len(),
            skipped,
        })
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Result<&Document, CatalogError> {
        self.index
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_owned()))
    }

    /// Ordered view of the index, newest first, optionally filtered to
    /// published documents.
    pub fn list(&self, visibility: Visibility) -> impl Iterator<Item = &Document> {
        let preview = self.preview;
        self.index.values().filter(move |doc| match visibility {
            Visibility::All => true,
            Visibility::Published => preview || doc.is_published(),
        })
    }

    /// First `n` of the filtered ordered view. `n` beyond the available
    /// size returns everything available.
    pub fn top(&self, n: usize, visibility: Visibility) -> Vec<&Document> {
        self.list(visibility).take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Parse one file into a [`Document`].
    ///
    /// A document without a date cannot be ordered and is refused here,
    /// before it ever reaches the index.
    fn build_document(&self, path: &Path, id: String) -> Result<Document, CatalogError> {
        let (matter, body) = metadata::parse_file(path)?;
        if matter.date.is_none() {
            return Err(CatalogError::UnsortableEntry(id));
        }
        Ok(Document::new(
            id,
            path.to_path_buf(),
            matter,
            body,
            Arc::clone(&self.renderer),
        ))
    }
}

/// Documents sorted by publication date, newest first.
fn new_index() -> DocumentIndex {
    OrderedIndex::new(true, Document::sort_date)
}

/// Derive a document id from its path: root-relative, extension stripped,
/// separators normalized to `/`.
///
/// This mapping is bit-exact and reversible: append the configured extension
/// and join onto the root to get the source path back.
fn derive_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    Some(relative.to_str()?.replace('\\', "/"))
}
