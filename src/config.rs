//! Configuration for the search controller.

use crate::search::FlagKeyword;
use serde::{Deserialize, Serialize};

/// Search controller configuration.
///
/// Hosts usually build this in code, but it also deserializes from JSON so a
/// viewer can ship its defaults alongside other settings.
///
/// ```
/// use pdf_viewer_search::config::SearchConfig;
///
/// let config: SearchConfig = serde_json::from_str(r#"{"match_case": true}"#).unwrap();
/// assert!(config.match_case);
/// assert!(!config.whole_words);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Match case by default.
    pub match_case: bool,

    /// Match whole words by default.
    pub whole_words: bool,

    /// Keywords searched as soon as a document finishes loading.
    pub keywords: Vec<FlagKeyword>,
}

impl SearchConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default case sensitivity.
    pub fn with_match_case(mut self, enable: bool) -> Self {
        self.match_case = enable;
        self
    }

    /// Set the default whole-word mode.
    pub fn with_whole_words(mut self, enable: bool) -> Self {
        self.whole_words = enable;
        self
    }

    /// Add a keyword to search for when a document loads.
    pub fn with_keyword(mut self, keyword: impl Into<FlagKeyword>) -> Self {
        self.keywords.push(keyword.into());
        self
    }
}
