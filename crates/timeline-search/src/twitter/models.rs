//! Wire models for the v1 REST API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::Post;
use crate::error::SearchError;

/// `created_at` format used by timeline statuses.
const TIMELINE_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Status object from the timeline endpoints.
#[derive(Debug, Deserialize)]
pub struct StatusResource {
    pub text: String,
    pub created_at: String,
    pub user: UserResource,
}

/// Embedded user object.
#[derive(Debug, Deserialize)]
pub struct UserResource {
    pub screen_name: String,
}

/// Search endpoint envelope.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResultResource>,
}

/// Search result entry.
#[derive(Debug, Deserialize)]
pub struct SearchResultResource {
    pub from_user: String,
    pub text: String,
    pub created_at: String,
}

impl TryFrom<StatusResource> for Post {
    type Error = SearchError;

    fn try_from(status: StatusResource) -> Result<Self, Self::Error> {
        let created_at = parse_timeline_date(&status.created_at)?;
        Ok(Post::new(status.user.screen_name, status.text, created_at))
    }
}

impl TryFrom<SearchResultResource> for Post {
    type Error = SearchError;

    fn try_from(result: SearchResultResource) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc2822(&result.created_at)
            .map_err(|source| SearchError::Timestamp {
                value: result.created_at.clone(),
                source,
            })?
            .with_timezone(&Utc);
        Ok(Post::new(result.from_user, result.text, created_at))
    }
}

fn parse_timeline_date(value: &str) -> Result<DateTime<Utc>, SearchError> {
    DateTime::parse_from_str(value, TIMELINE_DATE_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| SearchError::Timestamp {
            value: value.to_string(),
            source,
        })
}
