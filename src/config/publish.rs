use secrecy::SecretString;
use serde::Deserialize;

use crate::config::server::{deserialize_secret, empty_secret};

/// Wiki space and page that release notes are prepended to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Path of the wiki on the server
    pub path: String,
    pub space_key: String,
    pub release_page: String,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            path: "/wiki".into(),
            space_key: String::new(),
            release_page: String::new(),
        }
    }
}

/// Incoming webhook that release announcements are posted to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    #[serde(deserialize_with = "deserialize_secret")]
    pub endpoint: SecretString,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            endpoint: empty_secret(),
        }
    }
}
