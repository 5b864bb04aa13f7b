//! Interface to the repository host (GitHub).
//!
//! Provides token-based authentication and the branch and pull request
//! operations the sync orchestrator needs, through a common trait.

/// Configuration and authentication for the repository host.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Dry-run aware wrapper around a forge implementation.
pub mod manager;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common traits for forge platform abstraction.
pub mod traits;
