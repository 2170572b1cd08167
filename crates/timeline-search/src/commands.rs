//! Search operations behind each subcommand.

use tracing::info;

use crate::config::DEFAULT_NUM_RESULTS;
use crate::error::SearchError;
use crate::pipeline::{assemble, AssembledTimeline, ConcurrentPaginator, QueryPattern};
use crate::twitter::{Post, ScreenName, Timeline, TimelineClient};

/// Global search, filtered by the service.
///
/// One request, no retry and no local filtering. `number` defaults to
/// `DEFAULT_NUM_RESULTS`; `reverse` returns oldest first.
pub async fn search_all<C>(
    client: &C,
    query: &str,
    number: Option<u32>,
    reverse: bool,
) -> Result<Vec<Post>, SearchError>
where
    C: TimelineClient + ?Sized,
{
    let count = number.unwrap_or(DEFAULT_NUM_RESULTS);
    info!(query, count, reverse, "Searching all posts");

    let mut posts = client.search(query, count).await?;
    if reverse {
        posts.reverse();
    }
    Ok(posts)
}

/// Search a timeline by fetching every page and filtering locally.
///
/// The query is compiled before anything is fetched, so a bad pattern
/// never reaches the network.
pub async fn search_timeline<C>(
    client: &C,
    timeline: &Timeline,
    query: &str,
    paginator: &ConcurrentPaginator,
) -> Result<AssembledTimeline, SearchError>
where
    C: TimelineClient + ?Sized,
{
    let pattern = QueryPattern::new(query)?;
    info!(%timeline, query, "Searching timeline");

    let pages = paginator
        .collect(&pattern, |request| client.fetch_page(timeline, request))
        .await?;
    let assembled = assemble(pages);

    info!(%timeline, matched = assembled.len(), "Timeline search complete");
    Ok(assembled)
}

/// Search the authenticated user's home timeline.
pub async fn search_home<C>(client: &C, query: &str) -> Result<AssembledTimeline, SearchError>
where
    C: TimelineClient + ?Sized,
{
    search_timeline(client, &Timeline::Home, query, &ConcurrentPaginator::new()).await
}

/// Search one user's timeline. A leading `@` on `screen_name` is ignored.
pub async fn search_user<C>(
    client: &C,
    screen_name: &str,
    query: &str,
) -> Result<AssembledTimeline, SearchError>
where
    C: TimelineClient + ?Sized,
{
    let screen_name = ScreenName::parse(screen_name)?;
    search_timeline(
        client,
        &Timeline::User(screen_name),
        query,
        &ConcurrentPaginator::new(),
    )
    .await
}
