//! Folio - a file-backed content index for small publishing tools.
//!
//! Folio scans a directory of text documents, parses a key:value metadata
//! header from each, and keeps them in a date-ordered, queryable catalog:
//!
//! ```ignore
//! let mut catalog = Catalog::new("posts", "md");
//! catalog.load()?;
//! for doc in catalog.top(5, Visibility::Published) {
//!     println!("{} - {}", doc.title(), doc.render()?);
//! }
//! ```
//!
//! The rendering layer (HTTP, templates, feeds) lives outside this crate and
//! consumes the read API: [`Catalog::list`], [`Catalog::top`],
//! [`Catalog::get`], and per-document [`Document::render`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod logger;
pub mod metadata;
pub mod render;

pub use catalog::{Catalog, LoadSummary, Visibility};
pub use document::{Document, DocumentSummary};
pub use error::CatalogError;
pub use index::OrderedIndex;
pub use metadata::FrontMatter;
