//! Merging filtered pages into a single timeline.

use super::paginator::PageResult;
use crate::twitter::Post;

/// Matching posts in page order, then in-page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledTimeline {
    posts: Vec<Post>,
}

impl AssembledTimeline {
    /// Posts in display order.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    #[must_use]
    pub fn into_posts(self) -> Vec<Post> {
        self.posts
    }
}

impl IntoIterator for AssembledTimeline {
    type Item = Post;
    type IntoIter = std::vec::IntoIter<Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.into_iter()
    }
}

/// Concatenate pages in ascending page order, dropping empty slots.
///
/// `pages` must already be sorted by page number, as returned by
/// [`ConcurrentPaginator::collect`](super::ConcurrentPaginator::collect).
#[must_use]
pub fn assemble(pages: Vec<PageResult>) -> AssembledTimeline {
    debug_assert!(
        pages
            .windows(2)
            .all(|w| w[0].page_number() < w[1].page_number()),
        "pages must be in ascending page order"
    );

    let posts = pages
        .into_iter()
        .flat_map(PageResult::into_slots)
        .flatten()
        .collect();

    AssembledTimeline { posts }
}
