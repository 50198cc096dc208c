//! Search state and match navigation.
//!
//! [`SearchController`] owns the keyword list, the ordered matches and the
//! current-match cursor of one viewer. It reads the loaded document and the
//! viewer's jump callback from the [`ViewerStore`], and publishes compiled
//! keywords and the current match position back to it so the rendering layer
//! can highlight and scroll.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use futures::executor::block_on;
//! use pdf_viewer_search::document::InMemoryDocument;
//! use pdf_viewer_search::search::{Keyword, SearchController};
//! use pdf_viewer_search::store::{MemoryStore, StoreValue, ViewerStore};
//!
//! let store = Arc::new(MemoryStore::new());
//! store.update(StoreValue::Document(Arc::new(InMemoryDocument::from_pages(&[
//!     "Total due: 42",
//!     "Subtotal and total",
//! ]))));
//!
//! let search = SearchController::new(store);
//! let matches = block_on(search.search_for(vec![Keyword::from("total")], None, None))?;
//! assert_eq!(matches.len(), 3);
//! assert_eq!(search.current_match(), 1);
//!
//! search.jump_to_next_match();
//! assert_eq!(search.current_match(), 2);
//! # Ok::<(), pdf_viewer_search::Error>(())
//! ```

use crate::config::SearchConfig;
use crate::error::Result;
use crate::search::extractor::{extract_all_page_text, PageTextCache};
use crate::search::keyword::{normalize_keywords, CompiledPattern, Keyword};
use crate::search::text_search::{scan, Match};
use crate::store::{StoreValue, ViewerStore, ViewerStoreExt};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct SearchState {
    keywords: Vec<Keyword>,
    match_case: bool,
    whole_words: bool,
    matches: Vec<Match>,
    /// 1-based, 0 when no match is selected
    current_match: usize,
}

impl SearchState {
    fn from_config(config: &SearchConfig) -> Self {
        Self {
            match_case: config.match_case,
            whole_words: config.whole_words,
            ..Default::default()
        }
    }
}

/// Keyword search over the loaded document with a current-match cursor.
///
/// All operations take `&self`. Searches may overlap; each call to
/// [`search_for`](Self::search_for) or [`clear_keyword`](Self::clear_keyword)
/// starts a new generation, and a search that finishes after a newer one was
/// started returns its matches without touching the controller's state.
pub struct SearchController {
    store: Arc<dyn ViewerStore>,
    config: SearchConfig,
    state: Mutex<SearchState>,
    cache: Mutex<PageTextCache>,
    generation: AtomicU64,
}

impl SearchController {
    /// Create a controller with default configuration.
    pub fn new(store: Arc<dyn ViewerStore>) -> Self {
        Self::with_config(store, SearchConfig::default())
    }

    /// Create a controller with custom configuration.
    pub fn with_config(store: Arc<dyn ViewerStore>, config: SearchConfig) -> Self {
        Self {
            store,
            state: Mutex::new(SearchState::from_config(&config)),
            config,
            cache: Mutex::new(PageTextCache::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// The controller's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Keywords of the last search.
    pub fn keywords(&self) -> Vec<Keyword> {
        self.state.lock().keywords.clone()
    }

    /// Whether the last search matched case.
    pub fn match_case(&self) -> bool {
        self.state.lock().match_case
    }

    /// Whether the last search matched whole words only.
    pub fn whole_words(&self) -> bool {
        self.state.lock().whole_words
    }

    /// 1-based index of the current match, 0 when none is selected.
    pub fn current_match(&self) -> usize {
        self.state.lock().current_match
    }

    /// Number of matches found by the last search.
    pub fn number_of_matches(&self) -> usize {
        self.state.lock().matches.len()
    }

    /// Matches of the last search, in navigation order.
    pub fn matches(&self) -> Vec<Match> {
        self.state.lock().matches.clone()
    }

    /// The currently selected match.
    pub fn current(&self) -> Option<Match> {
        let state = self.state.lock();
        state
            .current_match
            .checked_sub(1)
            .and_then(|index| state.matches.get(index))
            .cloned()
    }

    /// Source text of the first keyword, or "" when there is none.
    pub fn keyword(&self) -> String {
        self.state
            .lock()
            .keywords
            .first()
            .map(|keyword| keyword.source().to_string())
            .unwrap_or_default()
    }

    /// Search for a single keyword. An empty keyword clears the search.
    pub async fn set_keyword(&self, keyword: &str) -> Result<Vec<Match>> {
        if keyword.is_empty() {
            self.clear_keyword();
            return Ok(Vec::new());
        }
        self.search_for(vec![Keyword::from(keyword)], None, None).await
    }

    /// Select the match at a 1-based index and scroll the viewer to it.
    ///
    /// The index is clamped into `1..=number_of_matches()`. Returns `None`,
    /// leaving the state untouched, when there are no matches.
    pub fn jump_to_match(&self, index: usize) -> Option<Match> {
        let target = {
            let mut state = self.state.lock();
            if state.matches.is_empty() {
                return None;
            }
            let index = index.clamp(1, state.matches.len());
            state.current_match = index;
            state.matches[index - 1].clone()
        };

        self.scroll_to(&target);
        Some(target)
    }

    /// Select the next match. Stops at the last match.
    pub fn jump_to_next_match(&self) -> Option<Match> {
        let current = self.current_match();
        self.jump_to_match(current.saturating_add(1))
    }

    /// Select the previous match. Stops at the first match.
    pub fn jump_to_previous_match(&self) -> Option<Match> {
        let current = self.current_match();
        self.jump_to_match(current.saturating_sub(1))
    }

    /// Clear keywords, matches and flags, and remove highlights.
    ///
    /// Does nothing when there are no keywords.
    pub fn clear_keyword(&self) {
        {
            let mut state = self.state.lock();
            if state.keywords.is_empty() {
                return;
            }
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = SearchState::from_config(&self.config);
        }

        log::debug!("Cleared search keywords");
        self.store.update(StoreValue::Keyword(vec![CompiledPattern::empty()]));
    }

    /// Run the last search again with the current flags.
    pub async fn search(&self) -> Result<Vec<Match>> {
        let (keywords, match_case, whole_words) = {
            let state = self.state.lock();
            (state.keywords.clone(), state.match_case, state.whole_words)
        };
        self.search_for(keywords, Some(match_case), Some(whole_words)).await
    }

    /// Search the loaded document for `keywords`.
    ///
    /// Flags left as `None` keep their current value. Resolves with every
    /// match in navigation order. When anything was found the first match
    /// becomes current and the viewer scrolls to it.
    ///
    /// Fails when a keyword pattern is invalid or the document fails to
    /// produce page text.
    pub async fn search_for(
        &self,
        keywords: Vec<Keyword>,
        match_case: Option<bool>,
        whole_words: Option<bool>,
    ) -> Result<Vec<Match>> {
        let (match_case, whole_words) = {
            let state = self.state.lock();
            (
                match_case.unwrap_or(state.match_case),
                whole_words.unwrap_or(state.whole_words),
            )
        };

        let patterns = normalize_keywords(&keywords, match_case, whole_words)?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let published = if patterns.is_empty() {
            vec![CompiledPattern::empty()]
        } else {
            patterns.clone()
        };
        self.store.update(StoreValue::Keyword(published));

        {
            let mut state = self.state.lock();
            state.keywords = keywords;
            state.match_case = match_case;
            state.whole_words = whole_words;
            state.current_match = 0;
            state.matches.clear();
        }

        if patterns.iter().all(CompiledPattern::is_empty) {
            return Ok(Vec::new());
        }

        let page_texts = match self.page_texts().await {
            Ok(page_texts) => page_texts,
            Err(e) => {
                log::warn!("Search failed: {}", e);
                return Err(e);
            },
        };
        let matches = scan(&page_texts, &patterns);

        let first = {
            let mut state = self.state.lock();
            if self.generation.load(Ordering::SeqCst) != generation {
                log::debug!(
                    "Discarding results of superseded search (generation {})",
                    generation
                );
                return Ok(matches);
            }
            state.matches = matches.clone();
            state.current_match = usize::from(!matches.is_empty());
            matches.first().cloned()
        };

        if let Some(first) = first {
            self.scroll_to(&first);
        }

        Ok(matches)
    }

    /// Run the configured initial keywords against a freshly loaded document.
    pub async fn on_document_load(&self) -> Result<Vec<Match>> {
        if self.config.keywords.is_empty() {
            return Ok(Vec::new());
        }
        let keywords = self
            .config
            .keywords
            .iter()
            .cloned()
            .map(Keyword::Flagged)
            .collect();
        self.search_for(keywords, None, None).await
    }

    /// Page text of the loaded document, from the cache when the document is
    /// the one it was filled from.
    async fn page_texts(&self) -> Result<Vec<Arc<str>>> {
        let Some(document) = self.store.document() else {
            self.cache.lock().invalidate();
            return Ok(Vec::new());
        };

        let cached = self.cache.lock().get(&document);
        if let Some(pages) = cached {
            log::debug!("Using cached text for {} pages", pages.len());
            return Ok(pages);
        }

        let pages = extract_all_page_text(Some(document.as_ref())).await?;

        // another document may have been loaded while extracting
        let still_loaded = self
            .store
            .document()
            .is_some_and(|current| Arc::ptr_eq(&current, &document));
        if still_loaded {
            self.cache.lock().insert(&document, pages.clone());
        } else {
            log::debug!("Document replaced during extraction, not caching its text");
        }
        Ok(pages)
    }

    fn scroll_to(&self, target: &Match) {
        match self.store.jump_to_page_callback() {
            Some(jump_to_page) => jump_to_page(target.page_index),
            None => log::debug!("No jump-to-page callback registered"),
        }
        self.store.update(StoreValue::MatchPosition(target.position()));
    }
}

impl fmt::Debug for SearchController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchController")
            .field("config", &self.config)
            .field("state", &*self.state.lock())
            .field("cache", &*self.cache.lock())
            .finish_non_exhaustive()
    }
}
