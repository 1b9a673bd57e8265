use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

use crate::Result;

/// Read a plain string from the config file into a secret.
pub fn deserialize_secret<'de, D>(
    deserializer: D,
) -> std::result::Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(SecretString::from(value))
}

pub fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

pub fn is_empty_secret(secret: &SecretString) -> bool {
    secret.expose_secret().is_empty()
}

/// Atlassian server hosting both the issue tracker and the wiki.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: "https".into(),
            host: String::new(),
            port: None,
            user: String::new(),
            password: empty_secret(),
        }
    }
}

impl ServerConfig {
    /// `scheme://host[:port]` without a trailing slash.
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }

    /// Base URL that issue keys are appended to for browsing.
    pub fn browse_base(&self) -> String {
        format!("{}/browse", self.origin())
    }

    /// Parse the origin joined with `path`, always ending in a slash so
    /// relative endpoint paths can be joined onto it.
    pub fn base_url(&self, path: &str) -> Result<url::Url> {
        let path = path.trim_matches('/');
        let raw = if path.is_empty() {
            format!("{}/", self.origin())
        } else {
            format!("{}/{}/", self.origin(), path)
        };
        Ok(url::Url::parse(&raw)?)
    }
}
