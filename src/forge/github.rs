//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, params};
use url::Url;

use crate::{
    config::MergeMethod,
    error::{Result, SyncError},
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{
            CompareQuery, CompareRequest, CompareResponse, CreatePrRequest,
            MergePrRequest, PrLabelsRequest, PullRequest, ReviewersRequest,
        },
        traits::Forge,
    },
};

impl From<MergeMethod> for params::pulls::MergeMethod {
    fn from(method: MergeMethod) -> Self {
        match method {
            MergeMethod::Merge => params::pulls::MergeMethod::Merge,
            MergeMethod::Squash => params::pulls::MergeMethod::Squash,
            MergeMethod::Rebase => params::pulls::MergeMethod::Rebase,
        }
    }
}

/// GitHub forge implementation using Octocrab for API interactions with
/// branches and pull requests.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())?
            .build()?;

        Ok(Self { config, instance })
    }

    /// Repository scoped route with every segment percent-encoded. Branch
    /// names may contain `#`, `%` or `/`, none of which may reach the path
    /// unescaped.
    fn route(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse("http://localhost/")?;

        url.path_segments_mut()
            .map_err(|_| SyncError::forge("failed to build api route"))?
            .clear()
            .extend([
                "repos",
                self.config.owner.as_str(),
                self.config.repo.as_str(),
            ])
            .extend(segments);

        Ok(url.path().to_string())
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn list_branches(&self) -> Result<Vec<String>> {
        let page = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .list_branches()
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        let branches = self.instance.all_pages(page).await?;

        Ok(branches.into_iter().map(|b| b.name).collect())
    }

    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        let page = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Open)
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        let prs = self.instance.all_pages(page).await?;

        Ok(prs
            .into_iter()
            .map(|pr| PullRequest {
                number: pr.number,
                html_url: pr
                    .html_url
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
                head_branch: pr.head.ref_field,
                base_branch: pr.base.ref_field,
            })
            .collect())
    }

    async fn changed_files(&self, req: CompareRequest) -> Result<Vec<String>> {
        let basehead = format!("{}...{}", req.base_branch, req.head_branch);
        let route = self.route(&["compare", &basehead])?;

        // a single file is enough to prove the branches differ
        let query = CompareQuery {
            page: 1,
            per_page: 1,
        };

        let response: CompareResponse =
            self.instance.get(route, Some(&query)).await?;

        let files = response
            .files
            .unwrap_or_default()
            .into_iter()
            .map(|f| f.filename)
            .collect::<Vec<String>>();

        debug!(
            "compare {}...{} returned {} file(s)",
            req.base_branch,
            req.head_branch,
            files.len()
        );

        Ok(files)
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .create(req.title, req.head_branch, req.base_branch)
            .body(req.body)
            .draft(req.draft)
            .send()
            .await?;

        Ok(PullRequest {
            number: pr.number,
            html_url: pr.html_url.map(|u| u.to_string()).unwrap_or_default(),
            head_branch: pr.head.ref_field,
            base_branch: pr.base.ref_field,
        })
    }

    async fn request_reviewers(&self, req: ReviewersRequest) -> Result<()> {
        let pr_number = req.pr_number.to_string();
        let route =
            self.route(&["pulls", &pr_number, "requested_reviewers"])?;

        let body = serde_json::json!({
          "reviewers": req.reviewers,
          "team_reviewers": req.team_reviewers,
        });

        let _: serde_json::Value =
            self.instance.post(route, Some(&body)).await?;

        Ok(())
    }

    async fn add_labels(&self, req: PrLabelsRequest) -> Result<()> {
        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(req.pr_number, &req.labels)
            .await?;

        Ok(())
    }

    async fn merge_pr(&self, req: MergePrRequest) -> Result<()> {
        let merge = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .merge(req.pr_number)
            .method(params::pulls::MergeMethod::from(req.method))
            .send()
            .await?;

        if !merge.merged {
            return Err(SyncError::forge(format!(
                "pull request {} was not merged: {}",
                req.pr_number,
                merge.message.unwrap_or_default()
            )));
        }

        Ok(())
    }
}
