//! Timeline API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::models::{SearchResponse, StatusResource};
use super::types::{PageRequest, Post, Timeline};
use crate::error::SearchError;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of timeline pages and search results.
#[async_trait]
pub trait TimelineClient: Send + Sync {
    /// Fetch one page of a timeline, in the order the service returns it.
    async fn fetch_page(
        &self,
        timeline: &Timeline,
        request: PageRequest,
    ) -> Result<Vec<Post>, SearchError>;

    /// Run a global search for up to `count` posts.
    async fn search(&self, query: &str, count: u32) -> Result<Vec<Post>, SearchError>;
}

/// HTTP implementation of [`TimelineClient`].
#[derive(Clone)]
pub struct HttpTimelineClient {
    /// HTTP client.
    client: Client,
    /// Scheme and host, e.g. `https://api.twitter.com`.
    base_url: String,
    /// Bearer token for authentication.
    token: String,
}

impl HttpTimelineClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns error if HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Make an authenticated GET request.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SearchError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, ?query, "GET request");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .query(query)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle API response, parsing JSON or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SearchError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, "Failed to parse response");
                SearchError::Serialization(e)
            })
        } else if status.is_server_error() {
            Err(SearchError::Server {
                status: status.as_u16(),
                message: text,
            })
        } else {
            if status == StatusCode::UNAUTHORIZED {
                warn!("Credentials were rejected");
            }
            Err(SearchError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait]
impl TimelineClient for HttpTimelineClient {
    async fn fetch_page(
        &self,
        timeline: &Timeline,
        request: PageRequest,
    ) -> Result<Vec<Post>, SearchError> {
        let mut query = vec![
            ("page", request.page_number().to_string()),
            ("count", request.page_size().to_string()),
        ];
        let path = match timeline {
            Timeline::Home => "/1/statuses/home_timeline.json",
            Timeline::User(name) => {
                query.insert(0, ("screen_name", name.to_string()));
                "/1/statuses/user_timeline.json"
            }
        };

        let statuses: Vec<StatusResource> = self.get(path, &query).await?;
        statuses.into_iter().map(Post::try_from).collect()
    }

    async fn search(&self, query: &str, count: u32) -> Result<Vec<Post>, SearchError> {
        let params = [
            ("q", query.to_string()),
            ("rpp", count.to_string()),
            ("include_entities", "false".to_string()),
        ];

        let response: SearchResponse = self.get("/search.json", &params).await?;
        response.results.into_iter().map(Post::try_from).collect()
    }
}
