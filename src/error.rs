//! Error types for devflow operations.

use thiserror::Error;

/// Main error type for devflow operations.
#[derive(Error, Debug)]
pub enum DevflowError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Issue tracker errors
    #[error("Issue tracker request failed: {0}")]
    TrackerError(String),

    #[error("Issue type '{0}' has no configured issue type id")]
    UnsupportedIssueType(String),

    // Wiki errors
    #[error("No wiki page found for title '{0}'")]
    PageNotFound(String),

    // Chat errors
    #[error("Chat notification rejected with status {status}: {body}")]
    NotificationRejected { status: u16, body: String },

    // Subprocess errors
    #[error("Command '{command}' exited with code {code}")]
    CommandFailed { command: String, code: i32 },

    // Terminal prompt errors
    #[error("Prompt failed: {0}")]
    PromptError(#[from] inquire::InquireError),

    // Git errors
    #[error("No release tag found in repository")]
    MissingReleaseTag,

    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    // Parsing and rendering errors - automatic conversions via #[from]
    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using DevflowError
pub type Result<T> = std::result::Result<T, DevflowError>;

impl DevflowError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an issue tracker error
    pub fn tracker(msg: impl Into<String>) -> Self {
        Self::TrackerError(msg.into())
    }

    /// Create a failed command error
    pub fn command_failed(command: impl Into<String>, code: i32) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
        }
    }
}

// Wraps generic I/O errors in the Other variant
impl From<std::io::Error> for DevflowError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

impl From<reqwest::Error> for DevflowError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status()
            && let Some(status) = err.status()
            && (status.as_u16() == 401 || status.as_u16() == 403)
        {
            return Self::AuthenticationError(err.to_string());
        }
        Self::NetworkError(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for DevflowError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::AuthenticationError(format!("Invalid header value: {}", err))
    }
}
