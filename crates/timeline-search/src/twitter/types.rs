//! Twitter data types.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::config::{MAX_NUM_RESULTS, MAX_PAGES};
use crate::error::SearchError;

/// A single post returned by a timeline or search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Author handle (without @).
    pub author_handle: String,
    /// Post text content.
    pub text: String,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    #[must_use]
    pub fn new(
        author_handle: impl Into<String>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author_handle: author_handle.into(),
            text: text.into(),
            created_at,
        }
    }
}

/// A validated screen name, stored without the leading @.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreenName(String);

impl ScreenName {
    /// Normalize a user-supplied screen name.
    ///
    /// Length is not checked here; the name is sent to the service as
    /// given and only padded for display.
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        let name = trimmed.strip_prefix('@').unwrap_or(trimmed);

        if name.is_empty() {
            return Err(SearchError::InvalidScreenName(raw.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    /// Screen name without @.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which timeline a paginated search walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timeline {
    /// The authenticated user's home timeline.
    Home,
    /// A specific user's timeline.
    User(ScreenName),
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::User(name) => write!(f, "user:{name}"),
        }
    }
}

/// One page of a timeline to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request, checking page bounds.
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, SearchError> {
        if !(1..=MAX_PAGES).contains(&page_number) || !(1..=MAX_NUM_RESULTS).contains(&page_size)
        {
            return Err(SearchError::InvalidPage {
                page: page_number,
                size: page_size,
            });
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    /// 1-based page number.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Number of posts requested.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}
