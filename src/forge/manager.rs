//! Manager that wraps forge implementations
use log::*;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{
            CompareRequest, CreatePrRequest, MergePrRequest, PrLabelsRequest,
            PullRequest, ReviewersRequest,
        },
        traits::Forge,
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    /// Wrap a forge implementation, honoring its dry_run setting for every
    /// mutating call.
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    /// Whether mutating calls are only logged.
    pub fn dry_run(&self) -> bool {
        self.remote_config.dry_run
    }

    /// "owner/repo" of the managed repository.
    pub fn repo_path(&self) -> String {
        self.remote_config.path()
    }

    pub async fn list_branches(&self) -> Result<Vec<String>> {
        self.forge.list_branches().await
    }

    pub async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        self.forge.list_open_prs().await
    }

    pub async fn changed_files(
        &self,
        req: CompareRequest,
    ) -> Result<Vec<String>> {
        debug!(
            "comparing base [{}] with head [{}]",
            req.base_branch, req.head_branch
        );
        self.forge.changed_files(req).await
    }

    pub async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create PR: req: {:#?}", req);
            return Ok(PullRequest {
                number: 0,
                html_url: "".into(),
                head_branch: req.head_branch,
                base_branch: req.base_branch,
            });
        }

        self.forge.create_pr(req).await
    }

    pub async fn request_reviewers(&self, req: ReviewersRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would request reviewers: req: {:#?}", req);
            return Ok(());
        }
        self.forge.request_reviewers(req).await
    }

    pub async fn add_labels(&self, req: PrLabelsRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would add PR labels: req: {:#?}", req);
            return Ok(());
        }
        self.forge.add_labels(req).await
    }

    pub async fn merge_pr(&self, req: MergePrRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would merge PR: req: {:#?}", req);
            return Ok(());
        }
        self.forge.merge_pr(req).await
    }
}
