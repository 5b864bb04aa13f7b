use serde::{Deserialize, Serialize};

use crate::config::MergeMethod;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Pull request as reported by the forge.
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
    pub head_branch: String,
    pub base_branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to compare two branches.
pub struct CompareRequest {
    pub base_branch: String,
    pub head_branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a new pull request.
pub struct CreatePrRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub body: String,
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to add reviewers to a pull request.
pub struct ReviewersRequest {
    pub pr_number: u64,
    pub reviewers: Vec<String>,
    pub team_reviewers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to add labels to a pull request.
pub struct PrLabelsRequest {
    pub pr_number: u64,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to merge a pull request.
pub struct MergePrRequest {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Query parameters for the compare endpoint.
#[derive(Debug, Serialize)]
pub struct CompareQuery {
    pub page: u32,
    pub per_page: u8,
}

/// Subset of the compare endpoint response we care about.
#[derive(Debug, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub files: Option<Vec<CompareFile>>,
}

#[derive(Debug, Deserialize)]
pub struct CompareFile {
    pub filename: String,
}
