//! Configuration for the repository host connection.
use secrecy::SecretString;

/// Default REST API base url for github.com.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Page size used for paginated list endpoints.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Remote repository connection configuration for authenticating and
/// interacting with the repository host.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// REST API base url (e.g. "https://api.github.com").
    pub api_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Log mutating calls instead of sending them.
    pub dry_run: bool,
}

impl RemoteConfig {
    /// "owner/repo" form of the repository.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}
