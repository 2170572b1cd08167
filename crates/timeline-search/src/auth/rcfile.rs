//! Credential profile file.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SearchError;

/// One set of API credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Account the credentials belong to.
    pub username: String,
    /// Application consumer key.
    pub consumer_key: String,
    /// Application consumer secret.
    pub consumer_secret: String,
    /// Access token, sent as the bearer token.
    pub token: String,
    /// Access token secret.
    pub secret: String,
}

/// Settings section of the profile file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Configuration {
    /// `[username, consumer_key]` of the profile to use.
    #[serde(default)]
    pub default_profile: Option<Vec<String>>,
}

/// Parsed profile file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RcFile {
    #[serde(default)]
    pub configuration: Configuration,
    /// username -> consumer key -> credentials
    #[serde(default)]
    pub profiles: BTreeMap<String, BTreeMap<String, Credentials>>,
}

impl RcFile {
    /// Load a profile file from disk.
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Profile(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
            .map_err(|e| SearchError::Profile(format!("{}: {e}", path.display())))
    }

    /// Parse profile file contents.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Credentials of the default profile.
    pub fn default_credentials(&self) -> Result<&Credentials, SearchError> {
        let (username, consumer_key) = match self.configuration.default_profile.as_deref() {
            Some([username, consumer_key]) => (username, consumer_key),
            Some(_) => {
                return Err(SearchError::Profile(
                    "default_profile must be [username, consumer_key]".to_string(),
                ))
            }
            None => return Err(SearchError::Profile("no default profile set".to_string())),
        };

        self.profiles
            .get(username)
            .and_then(|keys| keys.get(consumer_key))
            .ok_or_else(|| {
                SearchError::Profile(format!(
                    "default profile {username}/{consumer_key} not found"
                ))
            })
    }
}
