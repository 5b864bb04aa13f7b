//! Error types for sync-branches.

use thiserror::Error;

/// Main error type for sync-branches operations.
#[derive(Error, Debug)]
pub enum SyncError {
    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("Branch \"{branch}\" does not exist in {repository}")]
    TargetBranchNotFound { branch: String, repository: String },

    // Forge errors
    #[error("Failed to create pull request: {0}")]
    CreatePullRequest(String),

    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a missing target branch error
    pub fn target_branch_not_found(
        branch: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self::TargetBranchNotFound {
            branch: branch.into(),
            repository: repository.into(),
        }
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for SyncError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            octocrab::Error::GitHub { source, .. }
                if source.status_code.as_u16() == 401 =>
            {
                Self::AuthenticationError(source.message.clone())
            }
            octocrab::Error::Hyper { .. } | octocrab::Error::Service { .. } => {
                Self::NetworkError(err.to_string())
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
