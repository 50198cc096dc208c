//! Tests for page navigation alongside search.

use pdf_viewer_search::document::InMemoryDocument;
use pdf_viewer_search::navigation::{CurrentPageLabel, PageNavigator};
use pdf_viewer_search::search::SearchController;
use pdf_viewer_search::store::{MemoryStore, StoreKey, StoreValue, ViewerStore, ViewerStoreExt};
use std::sync::Arc;

/// A store wired like a viewer: the jump callback writes the current page
/// back into the store, as the rendering layer does after scrolling.
fn viewer(pages: &[&str]) -> Arc<MemoryStore> {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = Arc::new(MemoryStore::new());
    store.update(StoreValue::Document(Arc::new(InMemoryDocument::from_pages(pages))));
    store.update(StoreValue::NumberOfPages(pages.len()));

    let weak = Arc::downgrade(&store);
    store.update(StoreValue::JumpToPage(Arc::new(move |page: usize| {
        if let Some(store) = weak.upgrade() {
            store.update(StoreValue::CurrentPage(page));
        }
    })));
    store
}

mod page_buttons {
    use super::*;

    #[test]
    fn test_walk_through_document() {
        let store = viewer(&["one", "two", "three"]);
        let nav = PageNavigator::new(store);

        assert_eq!(nav.current_page_label().to_string(), "1 of 3");
        nav.jump_to_next_page();
        nav.jump_to_next_page();
        assert_eq!(nav.current_page_label().to_string(), "3 of 3");
        assert!(!nav.can_jump_to_next_page());

        nav.jump_to_first_page();
        assert_eq!(
            nav.current_page_label(),
            CurrentPageLabel {
                current_page: 0,
                number_of_pages: 3
            }
        );
    }

    #[test]
    fn test_page_changes_are_observable() {
        let store = viewer(&["a", "b"]);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let recorded = Arc::clone(&seen);
        store.subscribe(
            StoreKey::CurrentPage,
            Arc::new(move |value: &StoreValue| {
                if let StoreValue::CurrentPage(page) = value {
                    recorded.lock().push(*page);
                }
            }),
        );

        let nav = PageNavigator::new(store);
        nav.jump_to_last_page();
        nav.jump_to_previous_page();

        // once from the viewer callback, once from the navigator
        assert_eq!(*seen.lock(), vec![1, 1, 0, 0]);
    }
}

mod search_and_pages {
    use super::*;

    #[tokio::test]
    async fn test_match_navigation_moves_current_page() {
        let store = viewer(&["intro", "the result", "more", "result again"]);
        let search = SearchController::new(store.clone());
        let nav = PageNavigator::new(store.clone());

        search.search_for(vec!["result".into()], None, None).await.unwrap();
        assert_eq!(nav.current_page(), 1);

        search.jump_to_next_match();
        assert_eq!(nav.current_page(), 3);
        assert_eq!(store.match_position().map(|p| p.page_index), Some(3));

        nav.jump_to_first_page();
        assert_eq!(nav.current_page(), 0);
        // page navigation leaves the match cursor alone
        assert_eq!(search.current_match(), 2);
    }
}
