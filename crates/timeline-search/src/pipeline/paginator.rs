//! Concurrent page fan-out with per-page filtering.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use super::query::QueryPattern;
use super::retry::PageRetrier;
use crate::config::{MAX_NUM_RESULTS, MAX_PAGES};
use crate::error::SearchError;
use crate::twitter::{PageRequest, Post};

/// Filtered result of one page fetch.
///
/// Holds one slot per post the page returned, in the order returned.
/// Posts that did not match the query leave an empty slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    page_number: u32,
    slots: Vec<Option<Post>>,
}

impl PageResult {
    /// Apply `query` to a raw page.
    #[must_use]
    pub fn filter(page_number: u32, posts: Vec<Post>, query: &QueryPattern) -> Self {
        let slots = posts
            .into_iter()
            .map(|post| query.matches(&post).then_some(post))
            .collect();
        Self { page_number, slots }
    }

    /// Page this result came from.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// All slots, matched or not.
    #[must_use]
    pub fn slots(&self) -> &[Option<Post>] {
        &self.slots
    }

    /// Number of matching posts.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Consume into slots.
    #[must_use]
    pub fn into_slots(self) -> Vec<Option<Post>> {
        self.slots
    }
}

/// Fetches a fixed range of pages concurrently.
///
/// Every page runs in its own future with its own retry loop. Results
/// are tagged with their page number and written into a slot indexed by
/// that number, so completion order never leaks into the output.
///
/// If any page fails for good, the remaining pages are still awaited and
/// discarded, then the error of the lowest failing page is returned.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentPaginator {
    max_pages: u32,
    page_size: u32,
    retrier: PageRetrier,
}

impl Default for ConcurrentPaginator {
    fn default() -> Self {
        Self {
            max_pages: MAX_PAGES,
            page_size: MAX_NUM_RESULTS,
            retrier: PageRetrier::default(),
        }
    }
}

impl ConcurrentPaginator {
    /// Create a paginator with the default page range, page size and retry policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different retry policy.
    #[must_use]
    pub fn with_retrier(mut self, retrier: PageRetrier) -> Self {
        self.retrier = retrier;
        self
    }

    /// Fetch pages `1..=max_pages`.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Request `page_size` posts per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch and filter every page.
    ///
    /// Returns one `PageResult` per page, in ascending page order.
    ///
    /// # Errors
    /// Returns `SearchError::InvalidPage` if the configured range is out of
    /// bounds, or the first (by page number) fatal error any page hit.
    pub async fn collect<F, Fut>(
        &self,
        query: &QueryPattern,
        fetch: F,
    ) -> Result<Vec<PageResult>, SearchError>
    where
        F: Fn(PageRequest) -> Fut,
        Fut: Future<Output = Result<Vec<Post>, SearchError>>,
    {
        let requests = (1..=self.max_pages)
            .map(|page| PageRequest::new(page, self.page_size))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            pages = requests.len(),
            page_size = self.page_size,
            query = query.as_str(),
            "Fetching timeline pages"
        );

        let fetch = &fetch;
        let mut in_flight: FuturesUnordered<_> = requests
            .into_iter()
            .map(|request| async move {
                let page = request.page_number();
                let outcome = self
                    .retrier
                    .run(page, || fetch(request))
                    .await
                    .map(|posts| PageResult::filter(page, posts, query));
                (page, outcome)
            })
            .collect();

        let mut slots: Vec<Option<PageResult>> = (0..self.max_pages).map(|_| None).collect();
        let mut failures: Vec<(u32, SearchError)> = Vec::new();

        while let Some((page, outcome)) = in_flight.next().await {
            match outcome {
                Ok(result) => {
                    debug!(
                        page,
                        fetched = result.slots().len(),
                        matched = result.matched(),
                        "Page complete"
                    );
                    slots[(page - 1) as usize] = Some(result);
                }
                Err(e) => {
                    warn!(page, error = %e, "Page failed");
                    failures.push((page, e));
                }
            }
        }

        if let Some((page, error)) = failures.into_iter().min_by_key(|(page, _)| *page) {
            warn!(page, "Aborting search, discarding completed pages");
            return Err(error);
        }

        // Each page reports exactly once, so with no failures every slot is filled.
        Ok(slots.into_iter().flatten().collect())
    }
}
