//! Configuration loading and parsing for `devflow.toml` files.
//!
//! Every section is optional and falls back to defaults. Secrets left empty
//! in the file are read from the environment instead.
use log::*;
use secrecy::SecretString;
use serde::Deserialize;
use std::{env, fs, path::Path};

use crate::{
    Result,
    commit_tag::{CommitTagRule, default_rules},
    config::{
        jira::JiraConfig,
        project::{CommandsConfig, ProjectConfig},
        publish::{ConfluenceConfig, SlackConfig},
        server::{ServerConfig, is_empty_secret},
    },
    error::DevflowError,
};

/// Issue tracker project, issue types and workflow transitions.
pub mod jira;

/// Project identity and local commands.
pub mod project;

/// Wiki page and chat webhook that releases are published to.
pub mod publish;

/// Server address and credentials.
pub mod server;

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "devflow.toml";

/// Environment variable read when the server password is not configured.
pub const PASSWORD_ENV_VAR: &str = "DEVFLOW_JIRA_PASSWORD";

/// Environment variable read when the chat webhook is not configured.
pub const SLACK_ENDPOINT_ENV_VAR: &str = "DEVFLOW_SLACK_ENDPOINT";

/// Root configuration structure for `devflow.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub server: ServerConfig,
    pub jira: JiraConfig,
    pub confluence: ConfluenceConfig,
    pub slack: SlackConfig,
    pub commands: CommandsConfig,
    /// Path prefix rules for commit area tags, in label order
    pub commit_tags: Vec<CommitTagRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            server: ServerConfig::default(),
            jira: JiraConfig::default(),
            confluence: ConfluenceConfig::default(),
            slack: SlackConfig::default(),
            commands: CommandsConfig::default(),
            commit_tags: default_rules(),
        }
    }
}

impl Config {
    /// Read, complete and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        info!("loading config from {}", path.display());

        let content = fs::read_to_string(path).map_err(|err| {
            DevflowError::invalid_config(format!(
                "failed to read {}: {err}",
                path.display()
            ))
        })?;

        let config = Self::from_toml(&content)?
            .with_env_overrides(|name| env::var(name).ok());

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Fill secrets missing from the file using the given variable lookup.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if is_empty_secret(&self.server.password)
            && let Some(password) = lookup(PASSWORD_ENV_VAR)
        {
            debug!("using server password from {PASSWORD_ENV_VAR}");
            self.server.password = SecretString::from(password);
        }

        if is_empty_secret(&self.slack.endpoint)
            && let Some(endpoint) = lookup(SLACK_ENDPOINT_ENV_VAR)
        {
            debug!("using chat endpoint from {SLACK_ENDPOINT_ENV_VAR}");
            self.slack.endpoint = SecretString::from(endpoint);
        }

        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.project.code.trim().is_empty() {
            return Err(DevflowError::invalid_config(
                "project.code must name the issue key prefix",
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(DevflowError::invalid_config(
                "server.host must name the tracker host",
            ));
        }

        if self.commit_tags.iter().any(|rule| rule.prefix.is_empty()) {
            return Err(DevflowError::invalid_config(
                "commit_tags rules need a non-empty prefix",
            ));
        }

        Ok(())
    }
}
