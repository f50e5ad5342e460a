//! Catalog error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying the content catalog.
///
/// Per-document variants (`SourceUnreadable`, `MalformedDocument`,
/// `InvalidMetadata`, `UnsortableEntry`) are caught and skipped during
/// `Catalog::load`; `NotFound` is ordinary control flow on lookups;
/// `RenderFailed` is surfaced to the caller of `Document::render`.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error when reading `{0}`")]
    SourceUnreadable(PathBuf, #[source] std::io::Error),

    #[error("no blank line separating header from body in `{0}`")]
    MalformedDocument(PathBuf),

    #[error("invalid metadata header in `{0}`: {1}")]
    InvalidMetadata(PathBuf, String),

    #[error("document `{0}` has no date to order by")]
    UnsortableEntry(String),

    #[error("no document with id `{0}`")]
    NotFound(String),

    #[error("rendering failed: {0}")]
    RenderFailed(String),
}
