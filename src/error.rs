//! Error types for the search library.
//!
//! This module defines all error types that can occur while compiling keywords
//! and extracting page text.

/// Result type alias for search library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during keyword search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A user-supplied regular expression could not be compiled
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    /// The document source failed to produce text for a page
    #[error("Failed to extract text from page {page}: {reason}")]
    TextExtraction {
        /// 1-based page number
        page: usize,
        /// Reason reported by the document source
        reason: String,
    },

    /// Requested page does not exist in the document
    #[error("Page {page} out of range (document has {page_count} pages)")]
    PageOutOfRange {
        /// 1-based page number that was requested
        page: usize,
        /// Number of pages in the document
        page_count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_error() {
        let err = Error::InvalidPattern("unclosed group".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid search pattern"));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn test_text_extraction_error() {
        let err = Error::TextExtraction {
            page: 3,
            reason: "worker terminated".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("page 3"));
        assert!(msg.contains("worker terminated"));
    }

    #[test]
    fn test_page_out_of_range_error() {
        let err = Error::PageOutOfRange {
            page: 12,
            page_count: 10,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("12"));
        assert!(msg.contains("10 pages"));
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(abc").unwrap_err();
        let err: Error = regex_err.into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
