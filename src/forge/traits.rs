//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{
            CompareRequest, CreatePrRequest, MergePrRequest, PrLabelsRequest,
            PullRequest, ReviewersRequest,
        },
    },
};

/// Repository host operations needed to keep two branches in sync.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;
    async fn list_branches(&self) -> Result<Vec<String>>;
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>>;
    /// Files changed between base and head. Implementations only need to
    /// return the first page; callers check for emptiness.
    async fn changed_files(&self, req: CompareRequest) -> Result<Vec<String>>;
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;
    async fn request_reviewers(&self, req: ReviewersRequest) -> Result<()>;
    async fn add_labels(&self, req: PrLabelsRequest) -> Result<()>;
    async fn merge_pr(&self, req: MergePrRequest) -> Result<()>;
}
