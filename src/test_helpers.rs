//! Common test helper functions shared across test modules.
use secrecy::SecretString;

use crate::config::{
    Config,
    jira::{IssueTypeIds, JiraConfig},
    project::ProjectConfig,
    publish::{ConfluenceConfig, SlackConfig},
    server::ServerConfig,
};

/// `Authorization` header sent for the test server credentials.
pub const TEST_BASIC_AUTH: &str = "Basic ZGV2OnNlY3JldA==";

/// Creates a test Config for project `SE` with every section filled in.
pub fn create_test_config() -> Config {
    Config {
        project: ProjectConfig {
            code: "SE".into(),
            notes_title: "Apps Release Notes".into(),
            ..ProjectConfig::default()
        },
        server: ServerConfig {
            host: "jira.example.com".into(),
            user: "dev".into(),
            password: SecretString::from("secret".to_string()),
            ..ServerConfig::default()
        },
        jira: JiraConfig {
            project_id: "10000".into(),
            priority_id: "3".into(),
            component_id: "10100".into(),
            assignee: "dev".into(),
            board: "SE board".into(),
            issue_types: IssueTypeIds {
                task: "10001".into(),
                bug: "10002".into(),
                change: "10003".into(),
                other: String::new(),
            },
            sprint_field: "customfield_10007".into(),
            story_point_field: "customfield_10002".into(),
            ..JiraConfig::default()
        },
        confluence: ConfluenceConfig {
            space_key: "ENG".into(),
            release_page: "Release notes".into(),
            ..ConfluenceConfig::default()
        },
        slack: SlackConfig {
            endpoint: SecretString::from(
                "https://hooks.example.com/T000/B000".to_string(),
            ),
        },
        ..Config::default()
    }
}

/// Server settings pointing at a local mock server uri such as
/// `http://127.0.0.1:4242`.
pub fn server_config_for(uri: &str) -> ServerConfig {
    let url = url::Url::parse(uri).unwrap();
    ServerConfig {
        scheme: url.scheme().to_string(),
        host: url.host_str().unwrap().to_string(),
        port: url.port(),
        user: "dev".into(),
        password: SecretString::from("secret".to_string()),
    }
}

/// Test config whose server is the mock server at `uri`.
pub fn create_test_config_for(uri: &str) -> Config {
    Config {
        server: server_config_for(uri),
        ..create_test_config()
    }
}
