//! Page navigation.
//!
//! Backs the viewer's first/previous/next/last page buttons and the current
//! page label. The viewer reports its current page and page count through the
//! store; navigation calls the viewer's jump callback and records the new
//! current page.

use crate::store::{StoreValue, ViewerStore, ViewerStoreExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Current page and page count, as shown next to the navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPageLabel {
    /// Current page (0-indexed)
    pub current_page: usize,
    /// Number of pages in the document
    pub number_of_pages: usize,
}

impl fmt::Display for CurrentPageLabel {
    /// Renders as "3 of 10", with a 1-based page number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number_of_pages == 0 {
            return write!(f, "0 of 0");
        }
        write!(f, "{} of {}", self.current_page + 1, self.number_of_pages)
    }
}

/// Page navigation over the viewer store.
pub struct PageNavigator {
    store: Arc<dyn ViewerStore>,
}

impl PageNavigator {
    /// Create a navigator over a viewer store.
    pub fn new(store: Arc<dyn ViewerStore>) -> Self {
        Self { store }
    }

    /// Current page (0-indexed).
    pub fn current_page(&self) -> usize {
        self.store.current_page()
    }

    /// Number of pages reported by the viewer, falling back to the loaded
    /// document's page count.
    pub fn number_of_pages(&self) -> usize {
        self.store
            .number_of_pages()
            .or_else(|| self.store.document().map(|doc| doc.page_count()))
            .unwrap_or(0)
    }

    /// Label for the current page.
    pub fn current_page_label(&self) -> CurrentPageLabel {
        CurrentPageLabel {
            current_page: self.current_page(),
            number_of_pages: self.number_of_pages(),
        }
    }

    /// Whether a next page exists.
    pub fn can_jump_to_next_page(&self) -> bool {
        self.current_page() + 1 < self.number_of_pages()
    }

    /// Whether a previous page exists.
    pub fn can_jump_to_previous_page(&self) -> bool {
        self.current_page() > 0
    }

    /// Jump to a page (0-indexed), clamped to the last page.
    ///
    /// Returns the page jumped to, or `None` when the document has no pages.
    pub fn jump_to_page(&self, page_index: usize) -> Option<usize> {
        let number_of_pages = self.number_of_pages();
        if number_of_pages == 0 {
            return None;
        }
        let target = page_index.min(number_of_pages - 1);

        match self.store.jump_to_page_callback() {
            Some(jump_to_page) => jump_to_page(target),
            None => log::debug!("No jump-to-page callback registered"),
        }
        self.store.update(StoreValue::CurrentPage(target));
        Some(target)
    }

    /// Jump to the first page.
    pub fn jump_to_first_page(&self) -> Option<usize> {
        self.jump_to_page(0)
    }

    /// Jump to the last page.
    pub fn jump_to_last_page(&self) -> Option<usize> {
        self.jump_to_page(self.number_of_pages().saturating_sub(1))
    }

    /// Jump to the next page. Does nothing on the last page.
    pub fn jump_to_next_page(&self) -> Option<usize> {
        if !self.can_jump_to_next_page() {
            return None;
        }
        self.jump_to_page(self.current_page() + 1)
    }

    /// Jump to the previous page. Does nothing on the first page.
    pub fn jump_to_previous_page(&self) -> Option<usize> {
        if !self.can_jump_to_previous_page() {
            return None;
        }
        self.jump_to_page(self.current_page() - 1)
    }
}

impl fmt::Debug for PageNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageNavigator")
            .field("label", &self.current_page_label())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InMemoryDocument;
    use crate::store::MemoryStore;
    use parking_lot::Mutex;

    fn navigator(pages: usize) -> (Arc<MemoryStore>, PageNavigator, Arc<Mutex<Vec<usize>>>) {
        let store = Arc::new(MemoryStore::new());
        store.update(StoreValue::NumberOfPages(pages));
        let jumps = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&jumps);
        store.update(StoreValue::JumpToPage(Arc::new(move |page: usize| {
            recorded.lock().push(page)
        })));
        let nav = PageNavigator::new(store.clone());
        (store, nav, jumps)
    }

    #[test]
    fn test_label_display() {
        let label = CurrentPageLabel {
            current_page: 2,
            number_of_pages: 10,
        };
        assert_eq!(label.to_string(), "3 of 10");
        let empty = CurrentPageLabel {
            current_page: 0,
            number_of_pages: 0,
        };
        assert_eq!(empty.to_string(), "0 of 0");
    }

    #[test]
    fn test_next_and_previous() {
        let (store, nav, jumps) = navigator(3);
        assert!(!nav.can_jump_to_previous_page());
        assert_eq!(nav.jump_to_previous_page(), None);

        assert_eq!(nav.jump_to_next_page(), Some(1));
        assert_eq!(nav.jump_to_next_page(), Some(2));
        assert_eq!(nav.jump_to_next_page(), None);
        assert_eq!(store.current_page(), 2);

        assert_eq!(nav.jump_to_previous_page(), Some(1));
        assert_eq!(*jumps.lock(), vec![1, 2, 1]);
    }

    #[test]
    fn test_first_and_last() {
        let (_, nav, jumps) = navigator(5);
        assert_eq!(nav.jump_to_last_page(), Some(4));
        assert_eq!(nav.current_page_label().to_string(), "5 of 5");
        assert_eq!(nav.jump_to_first_page(), Some(0));
        assert_eq!(*jumps.lock(), vec![4, 0]);
    }

    #[test]
    fn test_jump_to_page_clamps() {
        let (_, nav, _) = navigator(4);
        assert_eq!(nav.jump_to_page(99), Some(3));
        assert_eq!(nav.current_page(), 3);
    }

    #[test]
    fn test_empty_document() {
        let (_, nav, jumps) = navigator(0);
        assert_eq!(nav.jump_to_first_page(), None);
        assert_eq!(nav.jump_to_last_page(), None);
        assert_eq!(nav.jump_to_next_page(), None);
        assert!(jumps.lock().is_empty());
    }

    #[test]
    fn test_page_count_falls_back_to_document() {
        let store = Arc::new(MemoryStore::new());
        store.update(StoreValue::Document(Arc::new(InMemoryDocument::from_pages(&["a", "b"]))));
        let nav = PageNavigator::new(store);
        assert_eq!(nav.number_of_pages(), 2);
        assert_eq!(nav.jump_to_last_page(), Some(1));
    }
}
