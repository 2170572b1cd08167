//! Twitter/X timeline access.
//!
//! Provides the post types and the client used to fetch timeline pages
//! and search results.

mod client;
mod models;
mod types;

pub use client::{HttpTimelineClient, TimelineClient};
pub use types::{PageRequest, Post, ScreenName, Timeline};
