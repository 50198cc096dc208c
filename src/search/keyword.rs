//! Keyword normalization.
//!
//! Turns user keywords into [`CompiledPattern`]s that the scanner can step
//! through one occurrence at a time.

use crate::error::Result;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A keyword with its own case and whole-word settings.
///
/// Settings left as `None` fall back to the flags of the search call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagKeyword {
    /// Literal text to search for
    pub keyword: String,
    /// Per-keyword case sensitivity
    #[serde(default)]
    pub match_case: Option<bool>,
    /// Per-keyword whole-word mode
    #[serde(default)]
    pub whole_words: Option<bool>,
}

impl FlagKeyword {
    /// Create a keyword without overrides.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            match_case: None,
            whole_words: None,
        }
    }

    /// Override case sensitivity for this keyword.
    pub fn with_match_case(mut self, value: bool) -> Self {
        self.match_case = Some(value);
        self
    }

    /// Override whole-word mode for this keyword.
    pub fn with_whole_words(mut self, value: bool) -> Self {
        self.whole_words = Some(value);
        self
    }
}

impl From<&str> for FlagKeyword {
    fn from(keyword: &str) -> Self {
        Self::new(keyword)
    }
}

impl From<String> for FlagKeyword {
    fn from(keyword: String) -> Self {
        Self::new(keyword)
    }
}

/// A search keyword as supplied by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Keyword {
    /// Literal text, compiled with the flags of the search call
    Text(String),
    /// A pattern compiled by the caller, used as-is
    Pattern(CompiledPattern),
    /// Literal text with its own flag overrides
    Flagged(FlagKeyword),
}

impl Keyword {
    /// The text the user searched for.
    pub fn source(&self) -> &str {
        match self {
            Keyword::Text(text) => text,
            Keyword::Pattern(pattern) => pattern.source(),
            Keyword::Flagged(flagged) => &flagged.keyword,
        }
    }
}

impl From<&str> for Keyword {
    fn from(text: &str) -> Self {
        Keyword::Text(text.to_string())
    }
}

impl From<String> for Keyword {
    fn from(text: String) -> Self {
        Keyword::Text(text)
    }
}

impl From<FlagKeyword> for Keyword {
    fn from(flagged: FlagKeyword) -> Self {
        Keyword::Flagged(flagged)
    }
}

impl From<CompiledPattern> for Keyword {
    fn from(pattern: CompiledPattern) -> Self {
        Keyword::Pattern(pattern)
    }
}

/// The matchable form of a keyword.
///
/// A pattern keeps a scan cursor so occurrences can be enumerated with
/// repeated [`find_next`](Self::find_next) calls over the same text. The
/// pattern built from an empty keyword matches nothing.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Option<Regex>,
    source: String,
    match_case: bool,
    whole_words: bool,
    last_index: usize,
}

impl CompiledPattern {
    /// The pattern for an empty keyword. It never matches.
    pub fn empty() -> Self {
        Self {
            regex: None,
            source: String::new(),
            match_case: false,
            whole_words: false,
            last_index: 0,
        }
    }

    /// Compile literal text. Regex metacharacters are matched literally.
    pub fn literal(text: &str, match_case: bool, whole_words: bool) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::empty());
        }
        Self::build(&regex::escape(text), text, match_case, whole_words)
    }

    /// Compile a regular expression.
    ///
    /// Fails with [`Error::InvalidPattern`](crate::Error::InvalidPattern) when
    /// the expression does not compile.
    pub fn regex(source: &str, match_case: bool, whole_words: bool) -> Result<Self> {
        if source.is_empty() {
            return Ok(Self::empty());
        }
        Self::build(source, source, match_case, whole_words)
    }

    fn build(pattern: &str, source: &str, match_case: bool, whole_words: bool) -> Result<Self> {
        let pattern = if whole_words {
            format!(r"\b(?:{})\b", pattern)
        } else {
            pattern.to_string()
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!match_case)
            .build()?;

        Ok(Self {
            regex: Some(regex),
            source: source.to_string(),
            match_case,
            whole_words,
            last_index: 0,
        })
    }

    /// The keyword text this pattern was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether this is the empty-keyword pattern.
    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Whether matching is case sensitive.
    pub fn match_case(&self) -> bool {
        self.match_case
    }

    /// Whether only whole words match.
    pub fn whole_words(&self) -> bool {
        self.whole_words
    }

    /// Byte offset where the next [`find_next`](Self::find_next) starts.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Rewind the scan cursor to the start of the text.
    pub fn reset(&mut self) {
        self.last_index = 0;
    }

    /// Test whether the pattern occurs anywhere in `text`.
    ///
    /// Does not touch the scan cursor.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(text))
    }

    /// Find the next occurrence at or after the scan cursor.
    ///
    /// Returns the byte range of the occurrence and moves the cursor past it.
    /// When nothing more is found the cursor rewinds to 0 and `None` is
    /// returned, so the next call starts over. An empty occurrence moves the
    /// cursor one character forward.
    pub fn find_next(&mut self, text: &str) -> Option<Range<usize>> {
        let regex = self.regex.as_ref()?;
        if self.last_index > text.len() {
            self.last_index = 0;
            return None;
        }

        match regex.find_at(text, self.last_index) {
            Some(found) => {
                self.last_index = if found.is_empty() {
                    next_char_boundary(text, found.end())
                } else {
                    found.end()
                };
                Some(found.range())
            },
            None => {
                self.last_index = 0;
                None
            },
        }
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_ref().map(Regex::as_str) == other.regex.as_ref().map(Regex::as_str)
            && self.source == other.source
            && self.match_case == other.match_case
            && self.whole_words == other.whole_words
    }
}

fn next_char_boundary(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map_or(offset + 1, |c| offset + c.len_utf8())
}

/// Normalize a keyword into a compiled pattern.
///
/// `match_case` and `whole_words` apply unless the keyword carries its own
/// overrides. Patterns compiled by the caller are returned with a rewound
/// cursor and their own flags.
pub fn normalize_keyword(
    keyword: &Keyword,
    match_case: bool,
    whole_words: bool,
) -> Result<CompiledPattern> {
    match keyword {
        Keyword::Text(text) => CompiledPattern::literal(text, match_case, whole_words),
        Keyword::Pattern(pattern) => {
            let mut pattern = pattern.clone();
            pattern.reset();
            Ok(pattern)
        },
        Keyword::Flagged(flagged) => CompiledPattern::literal(
            &flagged.keyword,
            flagged.match_case.unwrap_or(match_case),
            flagged.whole_words.unwrap_or(whole_words),
        ),
    }
}

/// Normalize a list of keywords, keeping their order.
pub fn normalize_keywords(
    keywords: &[Keyword],
    match_case: bool,
    whole_words: bool,
) -> Result<Vec<CompiledPattern>> {
    keywords
        .iter()
        .map(|keyword| normalize_keyword(keyword, match_case, whole_words))
        .collect()
}
