//! Per-run configuration resolved from action inputs.
//!
//! Inputs arrive as raw strings (GitHub Actions passes everything through
//! `INPUT_*` environment variables), so this module owns the conversion
//! from those strings into typed values:
//!
//! - booleans are true only for a case-insensitive `"true"`
//! - reviewer, team reviewer and label lists are JSON arrays of strings
//! - the auto-merge method is one of `merge`, `squash` or `rebase`
use derive_builder::Builder;
use log::*;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::error::{Result, SyncError};

/// Strategy used when auto-merging the sync pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MergeMethod {
    /// Create a merge commit
    Merge,
    /// Squash all commits into one
    Squash,
    /// Rebase commits onto the base branch
    Rebase,
}

/// Immutable configuration for a single sync run.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct RunConfig {
    /// Source (head) branch.
    pub from_branch: String,
    /// Target (base) branch.
    pub to_branch: String,
    #[builder(setter(into, strip_option), default)]
    pub title: Option<String>,
    #[builder(setter(into, strip_option), default)]
    pub body: Option<String>,
    #[builder(setter(strip_option), default)]
    pub auto_merge_method: Option<MergeMethod>,
    #[builder(default)]
    pub draft: bool,
    #[builder(default)]
    pub content_comparison: bool,
    #[builder(default)]
    pub reviewers: Vec<String>,
    #[builder(default)]
    pub team_reviewers: Vec<String>,
    #[builder(default)]
    pub labels: Vec<String>,
}

impl RunConfigBuilder {
    pub fn build(&self) -> Result<RunConfig> {
        let config = self._build().map_err(|e| {
            SyncError::invalid_input(format!(
                "Failed to build run configuration: {}",
                e
            ))
        })?;

        if config.from_branch.trim().is_empty() {
            return Err(SyncError::invalid_input("FROM_BRANCH must be set"));
        }

        if config.to_branch.trim().is_empty() {
            return Err(SyncError::invalid_input("TO_BRANCH must be set"));
        }

        Ok(config)
    }
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Configured title, or "sync: <from> to <to>".
    pub fn pr_title(&self) -> String {
        non_empty(&self.title).unwrap_or_else(|| {
            format!("sync: {} to {}", self.from_branch, self.to_branch)
        })
    }

    /// Configured body, or a sentence naming both branches.
    pub fn pr_body(&self) -> String {
        non_empty(&self.body).unwrap_or_else(|| {
            format!(
                "sync-branches: New code has just landed in {}, so let's bring {} up to speed!",
                self.from_branch, self.to_branch
            )
        })
    }

    pub fn wants_reviewers(&self) -> bool {
        !self.reviewers.is_empty() || !self.team_reviewers.is_empty()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Interpret an action boolean input. Only "true" (any case) is true.
pub fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// Parse a JSON array of strings. Empty input yields an empty list, and so
/// does malformed input (after a warning) so a typo in an optional input
/// never blocks the sync itself.
pub fn parse_list(name: &str, raw: &str) -> Vec<String> {
    let raw = raw.trim();

    if raw.is_empty() {
        return vec![];
    }

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => items
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect(),
        Err(err) => {
            warn!(
                "ignoring {name}: expected a JSON array of strings, got {raw:?}: {err}"
            );
            vec![]
        }
    }
}

/// Parse the auto-merge input. Empty disables auto-merge.
pub fn parse_merge_method(raw: &str) -> Result<Option<MergeMethod>> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(None);
    }

    MergeMethod::from_str(raw).map(Some).map_err(|_| {
        SyncError::invalid_input(format!(
            "unsupported PULL_REQUEST_AUTO_MERGE_METHOD \"{raw}\": expected one of merge, squash, rebase"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> RunConfig {
        RunConfig::builder()
            .from_branch("feature-x")
            .to_branch("main")
            .build()
            .unwrap()
    }

    #[test]
    fn builder_applies_defaults() {
        let config = base_config();

        assert!(config.title.is_none());
        assert!(config.body.is_none());
        assert!(config.auto_merge_method.is_none());
        assert!(!config.draft);
        assert!(!config.content_comparison);
        assert!(config.reviewers.is_empty());
        assert!(config.team_reviewers.is_empty());
        assert!(config.labels.is_empty());
    }

    #[test]
    fn builder_requires_branches() {
        let result = RunConfig::builder().from_branch("feature-x").build();
        assert!(matches!(result, Err(SyncError::InvalidInput(_))));

        let result =
            RunConfig::builder().from_branch("").to_branch("main").build();
        assert!(matches!(result, Err(SyncError::InvalidInput(_))));
    }

    #[test]
    fn default_title_and_body_name_both_branches() {
        let config = base_config();

        assert_eq!(config.pr_title(), "sync: feature-x to main");
        assert_eq!(
            config.pr_body(),
            "sync-branches: New code has just landed in feature-x, so let's bring main up to speed!"
        );
    }

    #[test]
    fn configured_title_and_body_win_unless_empty() {
        let config = RunConfig::builder()
            .from_branch("develop")
            .to_branch("main")
            .title("Nightly sync")
            .body("")
            .build()
            .unwrap();

        assert_eq!(config.pr_title(), "Nightly sync");
        assert!(config.pr_body().contains("develop"));
    }

    #[test]
    fn parses_flags_case_insensitively() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" True "));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn parses_lists() {
        assert_eq!(
            parse_list("REVIEWERS", r#"["octocat", " hubot ", ""]"#),
            vec!["octocat", "hubot"]
        );
        assert!(parse_list("LABELS", "").is_empty());
        assert!(parse_list("LABELS", "[]").is_empty());
    }

    #[test]
    fn malformed_lists_default_to_empty() {
        assert!(parse_list("LABELS", "sync, automated").is_empty());
        assert!(parse_list("LABELS", r#"{"a": 1}"#).is_empty());
        assert!(parse_list("LABELS", "[1, 2]").is_empty());
    }

    #[test]
    fn parses_merge_methods() {
        assert_eq!(parse_merge_method("").unwrap(), None);
        assert_eq!(
            parse_merge_method("squash").unwrap(),
            Some(MergeMethod::Squash)
        );
        assert_eq!(
            parse_merge_method("Rebase").unwrap(),
            Some(MergeMethod::Rebase)
        );
        assert_eq!(
            parse_merge_method("MERGE").unwrap(),
            Some(MergeMethod::Merge)
        );
        assert!(matches!(
            parse_merge_method("fast-forward"),
            Err(SyncError::InvalidInput(_))
        ));
    }

    #[test]
    fn merge_method_displays_lowercase() {
        assert_eq!(MergeMethod::Squash.to_string(), "squash");
    }

    #[test]
    fn wants_reviewers_checks_both_lists() {
        let mut config = base_config();
        assert!(!config.wants_reviewers());

        config.team_reviewers = vec!["core".into()];
        assert!(config.wants_reviewers());
    }
}
