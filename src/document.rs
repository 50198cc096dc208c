//! Document access for text search.
//!
//! The viewer's document engine owns parsing and rendering. Search only needs
//! the page count and the text content of each page, which the engine exposes
//! through [`DocumentSource`].

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One text fragment reported by the document engine for a page.
///
/// Engines may report fragments without text (marked content, empty runs);
/// those contribute nothing to the page text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    /// Fragment text, if any
    pub text: Option<String>,
}

impl TextItem {
    /// Create a fragment carrying text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Create a fragment without text.
    pub fn empty() -> Self {
        Self { text: None }
    }

    /// Fragment text, or "" when absent.
    pub fn as_str(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// A loaded document whose page text can be fetched asynchronously.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Fetch the text fragments of a page.
    ///
    /// `page_number` is 1-based, matching the document engines this trait
    /// fronts.
    async fn text_content(&self, page_number: usize) -> Result<Vec<TextItem>>;
}

/// A document held in memory as text fragments per page.
///
/// Used by the demo binary and tests, and by hosts that already have page
/// text available (for example from a server-side extraction).
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    pages: Vec<Vec<TextItem>>,
}

impl InMemoryDocument {
    /// Create a document from fragments per page.
    pub fn new(pages: Vec<Vec<TextItem>>) -> Self {
        Self { pages }
    }

    /// Create a document with one text fragment per page.
    pub fn from_pages<S: AsRef<str>>(pages: &[S]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|page| vec![TextItem::new(page.as_ref())])
                .collect(),
        }
    }

    /// Split plain text into pages on form feed characters.
    ///
    /// This is the layout `pdftotext` produces. A trailing form feed does not
    /// start an extra page.
    pub fn from_form_feed_text(text: &str) -> Self {
        let text = text.strip_suffix('\u{c}').unwrap_or(text);
        let pages: Vec<&str> = text.split('\u{c}').collect();
        Self::from_pages(&pages)
    }
}

#[async_trait]
impl DocumentSource for InMemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn text_content(&self, page_number: usize) -> Result<Vec<TextItem>> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .cloned()
            .ok_or(Error::PageOutOfRange {
                page: page_number,
                page_count: self.pages.len(),
            })
    }
}
