//! Keyword search for PDF viewers.
//!
//! This module finds keyword occurrences in the text of a loaded document and
//! tracks which one the viewer is showing. Supports:
//! - Literal keywords and caller-compiled regular expressions
//! - Case-sensitive and whole-word matching, per search or per keyword
//! - Several keywords at once
//! - Next/previous match navigation that scrolls the viewer
//!
//! ## Example
//!
//! ```ignore
//! use pdf_viewer_search::search::{FlagKeyword, Keyword, SearchController};
//!
//! let search = SearchController::new(store.clone());
//!
//! // Simple keyword search
//! let matches = search.search_for(vec![Keyword::from("invoice")], None, None).await?;
//! for m in &matches {
//!     println!("Found '{}' on page {} at {}", m.text(), m.page_index, m.start_index);
//! }
//!
//! // Whole words with a case-sensitive keyword
//! let keywords = vec![
//!     Keyword::from("total"),
//!     Keyword::from(FlagKeyword::new("VAT").with_match_case(true)),
//! ];
//! search.search_for(keywords, None, Some(true)).await?;
//!
//! // Step through matches
//! search.jump_to_next_match();
//! search.jump_to_previous_match();
//! ```

mod controller;
mod extractor;
mod keyword;
mod text_search;

pub use controller::SearchController;
pub use extractor::{extract_all_page_text, PageTextCache};
pub use keyword::{normalize_keyword, normalize_keywords, CompiledPattern, FlagKeyword, Keyword};
pub use text_search::{scan, Match, MatchPosition};
