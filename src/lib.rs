//! # PDF Viewer Search
//!
//! Keyword search and page navigation state for in-browser PDF viewers.
//!
//! The document engine parses and renders; this crate pulls page text from
//! it, finds keyword matches, and drives the viewer to them.
//!
//! ## Core Features
//!
//! - **Keyword Normalization**: literal, flagged or pre-compiled keywords with
//!   case-sensitive and whole-word modes
//! - **Text Extraction**: concurrent per-page text requests, reassembled in
//!   page order and cached per document
//! - **Match Scanning**: deterministic page, keyword, position ordering
//! - **Match Navigation**: 1-based current-match cursor with clamped
//!   next/previous/jump, published to the viewer store
//! - **Page Navigation**: first/previous/next/last page and the current page
//!   label
//!
//! ## Architecture
//! - **Injected Collaborators**: the document engine sits behind
//!   [`document::DocumentSource`], viewer state behind [`store::ViewerStore`]
//! - **Overlapping Searches**: a generation counter makes the last requested
//!   search win
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use futures::executor::block_on;
//! use pdf_viewer_search::document::InMemoryDocument;
//! use pdf_viewer_search::search::SearchController;
//! use pdf_viewer_search::store::{MemoryStore, StoreValue, ViewerStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! store.update(StoreValue::Document(Arc::new(InMemoryDocument::from_pages(&[
//!     "The quick brown fox",
//!     "jumps over the lazy dog",
//! ]))));
//! store.update(StoreValue::JumpToPage(Arc::new(|page: usize| {
//!     println!("scroll to page {}", page + 1);
//! })));
//!
//! let search = SearchController::new(store);
//! let matches = block_on(search.search_for(vec!["the".into()], Some(false), Some(true)))?;
//! assert_eq!(matches.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Document access
pub mod document;

// Shared viewer state
pub mod store;

// Keyword search
pub mod search;

// Page navigation
pub mod navigation;

// Re-exports
pub use config::SearchConfig;
pub use document::{DocumentSource, InMemoryDocument, TextItem};
pub use error::{Error, Result};
pub use navigation::{CurrentPageLabel, PageNavigator};
pub use search::{CompiledPattern, FlagKeyword, Keyword, Match, MatchPosition, SearchController};
pub use store::{MemoryStore, StoreKey, StoreValue, ViewerStore, ViewerStoreExt};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
