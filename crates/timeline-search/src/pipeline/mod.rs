//! Concurrent paginated fetch-filter-merge pipeline.
//!
//! A paginated search fans out one fetch per page number, retries each
//! page on transient server errors, filters every page against the
//! query, and reassembles the surviving posts in page order:
//!
//! ```text
//! pages 1..=16 ──► PageRetrier ──► TimelineClient
//!        │              (per page, concurrently)
//!        ▼
//! PageResult slots (indexed by page) ──► assemble() ──► AssembledTimeline
//! ```

mod assemble;
mod paginator;
mod query;
mod retry;

pub use assemble::{assemble, AssembledTimeline};
pub use paginator::{ConcurrentPaginator, PageResult};
pub use query::QueryPattern;
pub use retry::PageRetrier;
