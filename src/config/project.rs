use serde::Deserialize;

/// Default tera template for the title of a deployed release note.
pub const DEFAULT_RELEASE_TITLE: &str = "Release **{{ tag }}** ({{ date }}):";

/// Default top level heading of the release history notes.
pub const DEFAULT_NOTES_TITLE: &str = "Release Notes";

/// Project and repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Issue key prefix of the project, e.g. `SE`
    pub code: String,
    /// Path of the git repository
    pub repo_path: String,
    /// Remote that branches and tags are pushed to
    pub remote: String,
    /// Branch releases are deployed from
    pub main_branch: String,
    /// Tera template for release note titles, with `tag` and `date` in
    /// context
    pub release_title: String,
    /// Heading of the release history notes
    pub notes_title: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            code: String::new(),
            repo_path: ".".into(),
            remote: "origin".into(),
            main_branch: "master".into(),
            release_title: DEFAULT_RELEASE_TITLE.into(),
            notes_title: DEFAULT_NOTES_TITLE.into(),
        }
    }
}

/// Commands run for tests and deploys, as argv lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub test: Vec<String>,
    pub deploy: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            test: vec!["yarn".into(), "test".into()],
            deploy: vec!["yarn".into(), "run".into(), "deploy".into()],
        }
    }
}
