//! Configuration and limits for timeline search.

use std::path::PathBuf;

/// Default API host.
pub const DEFAULT_HOST: &str = "api.twitter.com";

/// Default protocol when SSL is enabled.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Default number of results for a direct search.
pub const DEFAULT_NUM_RESULTS: u32 = 20;

/// Number of timeline pages fetched per paginated search.
pub const MAX_PAGES: u32 = 16;

/// Largest page size the timeline endpoints accept.
pub const MAX_NUM_RESULTS: u32 = 200;

/// Width of the screen-name column in output.
pub const MAX_SCREEN_NAME_SIZE: usize = 20;

/// Attempts per page before a transient error becomes fatal.
pub const NUM_RETRIES: u32 = 3;

/// Environment variable that marks a test run.
pub const TEST_ENV_VAR: &str = "T_ENV";

/// Name of the credential profile file in the home directory.
pub const DEFAULT_PROFILE_FILE: &str = ".trc";

/// Connection settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host name.
    pub host: String,
    /// Use plain `http` instead of `https`.
    pub no_ssl: bool,
    /// Credential profile file, if overridden.
    pub profile: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            no_ssl: false,
            profile: None,
        }
    }
}

impl ClientConfig {
    /// Protocol derived from the SSL setting.
    #[must_use]
    pub fn protocol(&self) -> &'static str {
        if self.no_ssl {
            "http"
        } else {
            DEFAULT_PROTOCOL
        }
    }

    /// Base URL for all API requests.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol(), self.host)
    }

    /// Path of the credential profile to load.
    ///
    /// Falls back to `~/.trc` when no profile was given.
    #[must_use]
    pub fn profile_path(&self) -> Option<PathBuf> {
        self.profile
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(DEFAULT_PROFILE_FILE)))
    }
}

/// Whether the process runs under the test environment marker.
#[must_use]
pub fn is_test_env() -> bool {
    std::env::var(TEST_ENV_VAR).is_ok_and(|v| v == "test")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_base_url_defaults_to_https() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "https://api.twitter.com");
    }

    #[test]
    fn test_base_url_without_ssl() {
        let config = ClientConfig {
            host: "localhost:8080".to_string(),
            no_ssl: true,
            profile: None,
        };
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_explicit_profile_wins() {
        let config = ClientConfig {
            profile: Some(PathBuf::from("/tmp/alt.trc")),
            ..Default::default()
        };
        assert_eq!(config.profile_path(), Some(PathBuf::from("/tmp/alt.trc")));
    }

    #[test]
    #[serial]
    fn test_is_test_env() {
        std::env::set_var(TEST_ENV_VAR, "test");
        assert!(is_test_env());
        std::env::set_var(TEST_ENV_VAR, "production");
        assert!(!is_test_env());
        std::env::remove_var(TEST_ENV_VAR);
        assert!(!is_test_env());
    }
}
