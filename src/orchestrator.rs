//! Decides whether a sync pull request must exist, makes sure it does, and
//! applies the optional reviewer, label and auto-merge steps to a newly
//! created one.
use log::*;

use crate::{
    config::RunConfig,
    error::{Result, SyncError},
    forge::{
        manager::ForgeManager,
        request::{
            CompareRequest, CreatePrRequest, MergePrRequest, PrLabelsRequest,
            PullRequest, ReviewersRequest,
        },
    },
    outputs::{Annotation, annotate},
};

/// Result of a best-effort step run after the pull request was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Nothing was configured for this step
    Skipped,
    Applied,
    /// The call failed; the reason is kept for logging only
    Failed(String),
}

impl StepStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, StepStatus::Applied)
    }
}

/// A pull request created by this run plus the outcome of each follow-up step.
#[derive(Debug, Clone)]
pub struct CreatedPullRequest {
    pub pull_request: PullRequest,
    pub reviewers: StepStatus,
    pub labels: StepStatus,
    pub merge: StepStatus,
    /// Created in dry-run mode: the pull request is a placeholder
    pub dry_run: bool,
}

impl CreatedPullRequest {
    pub fn merged(&self) -> bool {
        self.merge.is_applied()
    }
}

/// Terminal state of a sync run.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// An open pull request from source to target already existed
    Existing(PullRequest),
    /// Content comparison found no changed files
    NoContentDifference,
    Created(CreatedPullRequest),
}

impl SyncOutcome {
    /// The pull request to report, if the run ended with one.
    pub fn pull_request(&self) -> Option<&PullRequest> {
        match self {
            SyncOutcome::Existing(pr) => Some(pr),
            SyncOutcome::Created(created) if !created.dry_run => {
                Some(&created.pull_request)
            }
            SyncOutcome::Created(_) => None,
            SyncOutcome::NoContentDifference => None,
        }
    }
}

pub struct SyncOrchestrator {
    forge: ForgeManager,
}

impl SyncOrchestrator {
    pub fn new(forge: ForgeManager) -> Self {
        Self { forge }
    }

    pub async fn run(&self, config: &RunConfig) -> Result<SyncOutcome> {
        info!(
            "Should a pull request to {} from {} be created?",
            config.to_branch, config.from_branch
        );

        self.validate_target(config).await?;

        if let Some(pr) = self.find_existing_pr(config).await? {
            info!(
                "There is already a pull request ({}) to {} from {}. You can view it here: {}",
                pr.number, config.to_branch, config.from_branch, pr.html_url
            );
            return Ok(SyncOutcome::Existing(pr));
        }

        if config.content_comparison
            && !self.has_content_difference(config).await?
        {
            info!(
                "There is no content difference between {} and {}.",
                config.from_branch, config.to_branch
            );
            return Ok(SyncOutcome::NoContentDifference);
        }

        let pull_request = self.create_pr(config).await?;

        let reviewers = self.request_reviewers(config, &pull_request).await;
        let labels = self.add_labels(config, &pull_request).await;
        let merge = self.auto_merge(config, &pull_request).await;

        let created = CreatedPullRequest {
            pull_request,
            reviewers,
            labels,
            merge,
            dry_run: self.forge.dry_run(),
        };

        if created.dry_run {
            info!(
                "dry_run: pull request to {} from {} was not created",
                config.to_branch, config.from_branch
            );
        } else {
            info!(
                "Pull request ({}) successfully created{}! You can view it here: {}",
                created.pull_request.number,
                if created.merged() { " and merged" } else { "" },
                created.pull_request.html_url
            );
        }

        Ok(SyncOutcome::Created(created))
    }

    /// Status for a step whose call returned Ok. Dry-run calls never reach
    /// the forge, so nothing was applied.
    fn succeeded(&self) -> StepStatus {
        if self.forge.dry_run() {
            StepStatus::Skipped
        } else {
            StepStatus::Applied
        }
    }

    async fn validate_target(&self, config: &RunConfig) -> Result<()> {
        let branches = self.forge.list_branches().await?;

        info!("Available branches: {}", branches.join(", "));

        if !branches.iter().any(|b| *b == config.to_branch) {
            return Err(SyncError::target_branch_not_found(
                &config.to_branch,
                self.forge.repo_path(),
            ));
        }

        info!(
            "Branch \"{}\" exists. Proceeding with the action...",
            config.to_branch
        );

        Ok(())
    }

    async fn find_existing_pr(
        &self,
        config: &RunConfig,
    ) -> Result<Option<PullRequest>> {
        let prs = self.forge.list_open_prs().await?;

        debug!("found {} open pull request(s)", prs.len());

        Ok(prs.into_iter().find(|pr| {
            pr.head_branch == config.from_branch
                && pr.base_branch == config.to_branch
        }))
    }

    async fn has_content_difference(&self, config: &RunConfig) -> Result<bool> {
        let files = self
            .forge
            .changed_files(CompareRequest {
                base_branch: config.to_branch.clone(),
                head_branch: config.from_branch.clone(),
            })
            .await?;

        Ok(!files.is_empty())
    }

    async fn create_pr(&self, config: &RunConfig) -> Result<PullRequest> {
        let req = CreatePrRequest {
            head_branch: config.from_branch.clone(),
            base_branch: config.to_branch.clone(),
            title: config.pr_title(),
            body: config.pr_body(),
            draft: config.draft,
        };

        debug!("creating pull request: {:#?}", req);

        self.forge
            .create_pr(req)
            .await
            .map_err(|err| SyncError::CreatePullRequest(err.to_string()))
    }

    async fn request_reviewers(
        &self,
        config: &RunConfig,
        pr: &PullRequest,
    ) -> StepStatus {
        if !config.wants_reviewers() {
            return StepStatus::Skipped;
        }

        let result = self
            .forge
            .request_reviewers(ReviewersRequest {
                pr_number: pr.number,
                reviewers: config.reviewers.clone(),
                team_reviewers: config.team_reviewers.clone(),
            })
            .await;

        match result {
            Ok(()) => {
                info!("requested reviewers on pull request {}", pr.number);
                self.succeeded()
            }
            Err(err) => {
                let msg = format!(
                    "Reviews may only be requested from collaborators of the {} repository. Update the reviewers to include only collaborators.",
                    self.forge.repo_path()
                );
                warn!("{msg} ({err})");
                annotate(Annotation::Warning, &msg);
                StepStatus::Failed(err.to_string())
            }
        }
    }

    async fn add_labels(
        &self,
        config: &RunConfig,
        pr: &PullRequest,
    ) -> StepStatus {
        if config.labels.is_empty() {
            return StepStatus::Skipped;
        }

        let result = self
            .forge
            .add_labels(PrLabelsRequest {
                pr_number: pr.number,
                labels: config.labels.clone(),
            })
            .await;

        match result {
            Ok(()) => {
                info!(
                    "added labels [{}] to pull request {}",
                    config.labels.join(", "),
                    pr.number
                );
                self.succeeded()
            }
            Err(err) => {
                let msg = format!(
                    "failed to add labels to pull request {}: {err}",
                    pr.number
                );
                warn!("{msg}");
                annotate(Annotation::Warning, &msg);
                StepStatus::Failed(err.to_string())
            }
        }
    }

    async fn auto_merge(
        &self,
        config: &RunConfig,
        pr: &PullRequest,
    ) -> StepStatus {
        let Some(method) = config.auto_merge_method else {
            return StepStatus::Skipped;
        };

        let result = self
            .forge
            .merge_pr(MergePrRequest {
                pr_number: pr.number,
                method,
            })
            .await;

        match result {
            Ok(()) => self.succeeded(),
            Err(err) => {
                warn!(
                    "auto-merge ({method}) of pull request {} failed, leaving it open: {err}",
                    pr.number
                );
                StepStatus::Failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests;
