//! Timeline search for Twitter/X.
//!
//! This crate provides:
//! - Global search through the service's search endpoint
//! - Home and user timeline search: up to 16 pages fetched concurrently,
//!   each retried on transient server errors and filtered locally with a
//!   case-insensitive regular expression
//! - Page-ordered merging of the filtered results
//! - Line rendering with relative ages, streamed through a pager

pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod twitter;

// Re-export main types
pub use auth::{Credentials, RcFile};
pub use config::ClientConfig;
pub use error::{ErrorKind, SearchError};
pub use output::{OutputSink, Presenter};
pub use pipeline::{
    assemble, AssembledTimeline, ConcurrentPaginator, PageResult, PageRetrier, QueryPattern,
};
pub use twitter::{HttpTimelineClient, PageRequest, Post, ScreenName, Timeline, TimelineClient};
