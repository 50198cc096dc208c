//! Page text extraction for search.
//!
//! Fetches the text of every page from a [`DocumentSource`] and keeps it
//! cached for as long as the same document stays loaded.

use crate::document::DocumentSource;
use crate::error::{Error, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use std::fmt;
use std::sync::{Arc, Weak};

/// Extract the text of every page of a document, in page order.
///
/// All page requests are issued at once and may complete in any order; the
/// result is sorted back by page index. A page's text is its fragments joined
/// without separators. Returns an empty list when there is no document, and
/// fails as a whole if any page fails.
pub async fn extract_all_page_text(
    document: Option<&dyn DocumentSource>,
) -> Result<Vec<Arc<str>>> {
    let Some(document) = document else {
        return Ok(Vec::new());
    };

    let page_count = document.page_count();
    log::debug!("Extracting text from {} pages", page_count);

    let mut pending: FuturesUnordered<_> = (0..page_count)
        .map(|page_index| async move {
            let items = document.text_content(page_index + 1).await?;
            let text: String = items.iter().map(|item| item.as_str()).collect();
            Ok::<_, Error>((page_index, text))
        })
        .collect();

    let mut pages = Vec::with_capacity(page_count);
    while let Some(page) = pending.next().await {
        pages.push(page?);
    }
    pages.sort_by_key(|(page_index, _)| *page_index);

    Ok(pages.into_iter().map(|(_, text)| Arc::from(text)).collect())
}

/// Page text of the most recently searched document.
///
/// Entries are tied to the document they were extracted from and are only
/// handed out for that same document. The cache does not keep the document
/// alive.
#[derive(Default)]
pub struct PageTextCache {
    document: Option<Weak<dyn DocumentSource>>,
    pages: Vec<Arc<str>>,
}

impl PageTextCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached page text for `document`, if it was extracted from it.
    pub fn get(&self, document: &Arc<dyn DocumentSource>) -> Option<Vec<Arc<str>>> {
        match &self.document {
            Some(cached) if Weak::ptr_eq(cached, &Arc::downgrade(document)) => {
                Some(self.pages.clone())
            },
            _ => None,
        }
    }

    /// Store page text extracted from `document`, replacing any other entry.
    pub fn insert(&mut self, document: &Arc<dyn DocumentSource>, pages: Vec<Arc<str>>) {
        self.document = Some(Arc::downgrade(document));
        self.pages = pages;
    }

    /// Drop the cached text.
    pub fn invalidate(&mut self) {
        self.document = None;
        self.pages.clear();
    }

    /// Whether text is cached for any document.
    pub fn is_empty(&self) -> bool {
        self.document.is_none()
    }
}

impl fmt::Debug for PageTextCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageTextCache")
            .field("cached", &self.document.is_some())
            .field("pages", &self.pages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{InMemoryDocument, TextItem};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use futures::future;

    /// Resolves later pages first so completion order is reversed.
    struct ReversedDocument {
        pages: Vec<String>,
    }

    #[async_trait]
    impl DocumentSource for ReversedDocument {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        async fn text_content(&self, page_number: usize) -> Result<Vec<TextItem>> {
            // earlier pages yield more often before resolving
            for _ in 0..(self.pages.len() - page_number) * 2 {
                yield_now().await;
            }
            Ok(vec![TextItem::new(self.pages[page_number - 1].clone())])
        }
    }

    async fn yield_now() {
        let mut yielded = false;
        future::poll_fn(|cx| {
            if yielded {
                std::task::Poll::Ready(())
            } else {
                yielded = true;
                cx.waker().wake_by_ref();
                std::task::Poll::Pending
            }
        })
        .await
    }

    struct FailingDocument;

    #[async_trait]
    impl DocumentSource for FailingDocument {
        fn page_count(&self) -> usize {
            3
        }

        async fn text_content(&self, page_number: usize) -> Result<Vec<TextItem>> {
            if page_number == 2 {
                Err(Error::TextExtraction {
                    page: page_number,
                    reason: "corrupt content stream".to_string(),
                })
            } else {
                Ok(vec![TextItem::new("ok")])
            }
        }
    }

    #[test]
    fn test_no_document_yields_empty() {
        let pages = block_on(extract_all_page_text(None)).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_fragments_are_concatenated() {
        let doc = InMemoryDocument::new(vec![
            vec![TextItem::new("Hello "), TextItem::empty(), TextItem::new("World")],
            vec![],
        ]);
        let pages = block_on(extract_all_page_text(Some(&doc as &dyn DocumentSource))).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(&*pages[0], "Hello World");
        assert_eq!(&*pages[1], "");
    }

    #[test]
    fn test_out_of_order_completion_is_resorted() {
        let doc = ReversedDocument {
            pages: vec!["one".into(), "two".into(), "three".into(), "four".into()],
        };
        let pages = block_on(extract_all_page_text(Some(&doc as &dyn DocumentSource))).unwrap();
        let texts: Vec<&str> = pages.iter().map(|p| &**p).collect();
        assert_eq!(texts, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn test_page_failure_fails_extraction() {
        let doc = FailingDocument;
        let err = block_on(extract_all_page_text(Some(&doc as &dyn DocumentSource))).unwrap_err();
        assert!(matches!(err, Error::TextExtraction { page: 2, .. }));
    }

    #[test]
    fn test_cache_hit_for_same_document() {
        let doc: Arc<dyn DocumentSource> = Arc::new(InMemoryDocument::from_pages(&["a"]));
        let mut cache = PageTextCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(&doc).is_none());

        cache.insert(&doc, vec![Arc::from("a")]);
        assert_eq!(cache.get(&doc), Some(vec![Arc::from("a")]));
    }

    #[test]
    fn test_cache_miss_for_other_document() {
        let first: Arc<dyn DocumentSource> = Arc::new(InMemoryDocument::from_pages(&["a"]));
        let second: Arc<dyn DocumentSource> = Arc::new(InMemoryDocument::from_pages(&["a"]));
        let mut cache = PageTextCache::new();
        cache.insert(&first, vec![Arc::from("a")]);

        assert!(cache.get(&second).is_none());
    }

    #[test]
    fn test_cache_invalidate() {
        let doc: Arc<dyn DocumentSource> = Arc::new(InMemoryDocument::from_pages(&["a"]));
        let mut cache = PageTextCache::new();
        cache.insert(&doc, vec![Arc::from("a")]);
        cache.invalidate();

        assert!(cache.is_empty());
        assert!(cache.get(&doc).is_none());
    }

    #[test]
    fn test_cache_does_not_keep_document_alive() {
        let doc: Arc<dyn DocumentSource> = Arc::new(InMemoryDocument::from_pages(&["a"]));
        let released = Arc::downgrade(&doc);
        let mut cache = PageTextCache::new();
        cache.insert(&doc, vec![Arc::from("a")]);

        drop(doc);
        assert!(released.upgrade().is_none());

        let other: Arc<dyn DocumentSource> = Arc::new(InMemoryDocument::from_pages(&["a"]));
        assert!(cache.get(&other).is_none());
    }
}
