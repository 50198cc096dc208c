//! Match scanning over extracted page text.
//!
//! Runs every compiled keyword over every page and records each occurrence
//! with its page and byte offsets, so the viewer can highlight matches and
//! scroll to them.

use crate::search::keyword::CompiledPattern;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One occurrence of a keyword in a page's text.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Pattern that produced this match
    pub keyword: CompiledPattern,
    /// Occurrence number of this keyword on this page (0-indexed)
    pub match_index: usize,
    /// Page where the match was found (0-indexed)
    pub page_index: usize,
    /// Full extracted text of the page
    pub page_text: Arc<str>,
    /// Start byte index in the page text
    pub start_index: usize,
    /// End byte index in the page text (exclusive)
    pub end_index: usize,
}

impl Match {
    /// The matched text.
    pub fn text(&self) -> &str {
        &self.page_text[self.start_index..self.end_index]
    }

    /// Where this match sits, as published to the viewer store.
    pub fn position(&self) -> MatchPosition {
        MatchPosition {
            match_index: self.match_index,
            page_index: self.page_index,
        }
    }
}

/// Location of the current match, used by the rendering layer to scroll to
/// and emphasize the right highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPosition {
    /// Occurrence number of the keyword on the page (0-indexed)
    pub match_index: usize,
    /// Page index (0-indexed)
    pub page_index: usize,
}

/// Scan page texts for all occurrences of the given patterns.
///
/// Matches come out grouped by page (ascending), then by pattern in the order
/// given, then by position. With several keywords the order within a page is
/// therefore keyword by keyword, not strictly top to bottom.
///
/// The patterns passed in are not advanced; each page scan works on its own
/// copy with a rewound cursor.
pub fn scan(page_texts: &[Arc<str>], patterns: &[CompiledPattern]) -> Vec<Match> {
    let mut matches = Vec::new();

    for (page_index, page_text) in page_texts.iter().enumerate() {
        for pattern in patterns {
            let mut cursor = pattern.clone();
            cursor.reset();

            let mut match_index = 0;
            while let Some(range) = cursor.find_next(page_text) {
                matches.push(Match {
                    keyword: pattern.clone(),
                    match_index,
                    page_index,
                    page_text: Arc::clone(page_text),
                    start_index: range.start,
                    end_index: range.end,
                });
                match_index += 1;
            }
        }
    }

    log::debug!(
        "Scanned {} pages for {} keywords: {} matches",
        page_texts.len(),
        patterns.len(),
        matches.len()
    );

    matches
}
