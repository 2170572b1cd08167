//! Query pattern matching.

use regex::{Regex, RegexBuilder};

use crate::error::SearchError;
use crate::twitter::Post;

/// A case-insensitive regular expression applied to post text.
#[derive(Debug, Clone)]
pub struct QueryPattern {
    regex: Regex,
}

impl QueryPattern {
    /// Compile a query.
    ///
    /// # Errors
    /// Returns `SearchError::InvalidQuery` if the query is not a valid pattern.
    pub fn new(query: &str) -> Result<Self, SearchError> {
        let regex = RegexBuilder::new(query).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    /// Whether the post text matches.
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        self.regex.is_match(&post.text)
    }

    /// The source query.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
