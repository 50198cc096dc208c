//! Shared viewer state.
//!
//! The viewer's rendering layer and the search and navigation controllers talk
//! through a small reactive key-value store. Controllers read what the host
//! provides (the loaded document, the `jump_to_page` callback) and publish
//! what the rendering layer needs to highlight and scroll (compiled keywords,
//! the current match position).
//!
//! The store is injected as `Arc<dyn ViewerStore>`; [`MemoryStore`] is the
//! in-process implementation.

use crate::document::DocumentSource;
use crate::search::{CompiledPattern, MatchPosition};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback that scrolls the viewer to a 0-based page index.
pub type JumpToPage = Arc<dyn Fn(usize) + Send + Sync>;

/// Subscriber notified with the new value after every update of its key.
pub type StoreHandler = Arc<dyn Fn(&StoreValue) + Send + Sync>;

/// Keys understood by the viewer store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// The loaded document
    Document,
    /// Callback scrolling the viewer to a page
    JumpToPage,
    /// Compiled keywords to highlight
    Keyword,
    /// Position of the current match
    MatchPosition,
    /// Current page (0-based)
    CurrentPage,
    /// Number of pages of the loaded document
    NumberOfPages,
}

/// A value stored under one of the [`StoreKey`]s.
///
/// Each variant belongs to exactly one key, so updates carry their key with
/// them.
#[derive(Clone)]
pub enum StoreValue {
    /// The loaded document
    Document(Arc<dyn DocumentSource>),
    /// Callback scrolling the viewer to a page
    JumpToPage(JumpToPage),
    /// Compiled keywords to highlight
    Keyword(Vec<CompiledPattern>),
    /// Position of the current match
    MatchPosition(MatchPosition),
    /// Current page (0-based)
    CurrentPage(usize),
    /// Number of pages of the loaded document
    NumberOfPages(usize),
}

impl StoreValue {
    /// The key this value is stored under.
    pub fn key(&self) -> StoreKey {
        match self {
            StoreValue::Document(_) => StoreKey::Document,
            StoreValue::JumpToPage(_) => StoreKey::JumpToPage,
            StoreValue::Keyword(_) => StoreKey::Keyword,
            StoreValue::MatchPosition(_) => StoreKey::MatchPosition,
            StoreValue::CurrentPage(_) => StoreKey::CurrentPage,
            StoreValue::NumberOfPages(_) => StoreKey::NumberOfPages,
        }
    }
}

impl fmt::Debug for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreValue::Document(doc) => f
                .debug_struct("Document")
                .field("page_count", &doc.page_count())
                .finish(),
            StoreValue::JumpToPage(_) => f.write_str("JumpToPage(<callback>)"),
            StoreValue::Keyword(patterns) => f.debug_tuple("Keyword").field(patterns).finish(),
            StoreValue::MatchPosition(pos) => f.debug_tuple("MatchPosition").field(pos).finish(),
            StoreValue::CurrentPage(page) => f.debug_tuple("CurrentPage").field(page).finish(),
            StoreValue::NumberOfPages(n) => f.debug_tuple("NumberOfPages").field(n).finish(),
        }
    }
}

/// Identifies a subscription so it can be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Reactive key-value store shared between the viewer and its controllers.
pub trait ViewerStore: Send + Sync {
    /// Current value for a key.
    fn get(&self, key: StoreKey) -> Option<StoreValue>;

    /// Replace the value under the value's key and notify subscribers.
    fn update(&self, value: StoreValue);

    /// Register a handler called after every update of `key`.
    fn subscribe(&self, key: StoreKey, handler: StoreHandler) -> SubscriptionId;

    /// Remove a handler. Unknown ids are ignored.
    fn unsubscribe(&self, key: StoreKey, id: SubscriptionId);
}

/// Convenience accessors over the raw key-value interface.
pub trait ViewerStoreExt: ViewerStore {
    /// The loaded document, if any.
    fn document(&self) -> Option<Arc<dyn DocumentSource>> {
        match self.get(StoreKey::Document) {
            Some(StoreValue::Document(doc)) => Some(doc),
            _ => None,
        }
    }

    /// The viewer's jump-to-page callback, if the viewer registered one.
    fn jump_to_page_callback(&self) -> Option<JumpToPage> {
        match self.get(StoreKey::JumpToPage) {
            Some(StoreValue::JumpToPage(callback)) => Some(callback),
            _ => None,
        }
    }

    /// Compiled keywords currently published for highlighting.
    fn keywords(&self) -> Vec<CompiledPattern> {
        match self.get(StoreKey::Keyword) {
            Some(StoreValue::Keyword(patterns)) => patterns,
            _ => Vec::new(),
        }
    }

    /// Position of the current match, if one was published.
    fn match_position(&self) -> Option<MatchPosition> {
        match self.get(StoreKey::MatchPosition) {
            Some(StoreValue::MatchPosition(pos)) => Some(pos),
            _ => None,
        }
    }

    /// Current page, or 0 when the viewer has not reported one.
    fn current_page(&self) -> usize {
        match self.get(StoreKey::CurrentPage) {
            Some(StoreValue::CurrentPage(page)) => page,
            _ => 0,
        }
    }

    /// Number of pages reported by the viewer.
    fn number_of_pages(&self) -> Option<usize> {
        match self.get(StoreKey::NumberOfPages) {
            Some(StoreValue::NumberOfPages(n)) => Some(n),
            _ => None,
        }
    }
}

impl<T: ViewerStore + ?Sized> ViewerStoreExt for T {}

/// In-process [`ViewerStore`].
///
/// Handlers run on the updating thread after the value has been stored and
/// without any lock held, so a handler may read or update the store itself.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, StoreValue>>,
    subscribers: Mutex<HashMap<StoreKey, Vec<(SubscriptionId, StoreHandler)>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("values", &*self.values.lock())
            .finish_non_exhaustive()
    }
}

impl ViewerStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Option<StoreValue> {
        self.values.lock().get(&key).cloned()
    }

    fn update(&self, value: StoreValue) {
        let key = value.key();
        self.values.lock().insert(key, value.clone());

        let handlers: Vec<StoreHandler> = self
            .subscribers
            .lock()
            .get(&key)
            .map(|subs| subs.iter().map(|(_, handler)| Arc::clone(handler)).collect())
            .unwrap_or_default();

        for handler in handlers {
            handler(&value);
        }
    }

    fn subscribe(&self, key: StoreKey, handler: StoreHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .entry(key)
            .or_default()
            .push((id, handler));
        id
    }

    fn unsubscribe(&self, key: StoreKey, id: SubscriptionId) {
        if let Some(subs) = self.subscribers.lock().get_mut(&key) {
            subs.retain(|(sub_id, _)| *sub_id != id);
        }
    }
}
