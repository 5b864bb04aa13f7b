//! CLI argument parsing and remote repository configuration.
//!
//! Every argument falls back to the environment variable the GitHub Actions
//! runner sets for the matching action input (`INPUT_<NAME>`), so the binary
//! works both as an action entrypoint and from a terminal.
use clap::Parser;
use secrecy::SecretString;
use std::env;
use url::Url;

use crate::{
    config::{RunConfig, parse_flag, parse_list, parse_merge_method},
    error::{Result, SyncError},
    forge::config::{DEFAULT_API_URL, RemoteConfig},
};

/// Open a pull request that syncs one branch into another.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "INPUT_FROM_BRANCH")]
    /// Source (head) branch to sync from.
    pub from_branch: String,

    #[arg(long, env = "INPUT_TO_BRANCH")]
    /// Target (base) branch to sync into. Must already exist.
    pub to_branch: String,

    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    /// GitHub token. Falls back to GITHUB_TOKEN env var.
    pub github_token: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY")]
    /// Repository in owner/repo form.
    pub repository: String,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    /// REST API base url, for GitHub Enterprise Server.
    pub api_url: String,

    #[arg(long, env = "INPUT_PULL_REQUEST_TITLE", default_value = "")]
    /// Pull request title. Defaults to "sync: <from> to <to>".
    pub pull_request_title: String,

    #[arg(long, env = "INPUT_PULL_REQUEST_BODY", default_value = "")]
    /// Pull request body.
    pub pull_request_body: String,

    #[arg(
        long,
        env = "INPUT_PULL_REQUEST_AUTO_MERGE_METHOD",
        default_value = ""
    )]
    /// Merge the new pull request with merge, squash or rebase.
    pub pull_request_auto_merge_method: String,

    #[arg(long, env = "INPUT_PULL_REQUEST_IS_DRAFT", default_value = "false")]
    /// Open the pull request as a draft ("true" to enable).
    pub pull_request_is_draft: String,

    #[arg(long, env = "INPUT_CONTENT_COMPARISON", default_value = "false")]
    /// Skip the pull request when both branches have the same content.
    pub content_comparison: String,

    #[arg(long, env = "INPUT_REVIEWERS", default_value = "[]")]
    /// JSON array of usernames to request reviews from.
    pub reviewers: String,

    #[arg(long, env = "INPUT_TEAM_REVIEWERS", default_value = "[]")]
    /// JSON array of team slugs to request reviews from.
    pub team_reviewers: String,

    #[arg(long, env = "INPUT_LABELS", default_value = "[]")]
    /// JSON array of labels to add to the pull request.
    pub labels: String,

    #[arg(long, env = "INPUT_DRY_RUN", default_value = "false")]
    /// Log mutating API calls instead of sending them.
    pub dry_run: String,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging. Also enabled by RUNNER_DEBUG=1.
    pub debug: bool,
}

impl Args {
    /// Whether debug logging was requested on the command line or by a
    /// re-run with debug logging enabled.
    pub fn debug_enabled(&self) -> bool {
        self.debug || env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1")
    }

    /// Configure remote repository connection from CLI arguments.
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        let (owner, repo) = parse_repository(&self.repository)?;
        let api_url = validate_api_url(&self.api_url)?;
        let token = resolve_token(
            self.github_token.as_deref(),
            env::var("GITHUB_TOKEN").ok(),
        )?;

        Ok(RemoteConfig {
            api_url,
            owner,
            repo,
            token,
            dry_run: parse_flag(&self.dry_run),
        })
    }

    /// Resolve the per-run sync configuration.
    pub fn run_config(&self) -> Result<RunConfig> {
        let mut builder = RunConfig::builder();

        builder
            .from_branch(self.from_branch.trim())
            .to_branch(self.to_branch.trim())
            .draft(parse_flag(&self.pull_request_is_draft))
            .content_comparison(parse_flag(&self.content_comparison))
            .reviewers(parse_list("REVIEWERS", &self.reviewers))
            .team_reviewers(parse_list("TEAM_REVIEWERS", &self.team_reviewers))
            .labels(parse_list("LABELS", &self.labels));

        if !self.pull_request_title.is_empty() {
            builder.title(self.pull_request_title.clone());
        }

        if !self.pull_request_body.is_empty() {
            builder.body(self.pull_request_body.clone());
        }

        if let Some(method) =
            parse_merge_method(&self.pull_request_auto_merge_method)?
        {
            builder.auto_merge_method(method);
        }

        builder.build()
    }
}

/// Split "owner/repo" into its parts.
fn parse_repository(repository: &str) -> Result<(String, String)> {
    let err = || {
        SyncError::invalid_input(format!(
            "repository must be in owner/repo form, got \"{repository}\""
        ))
    };

    let (owner, repo) = repository.trim().split_once('/').ok_or_else(err)?;

    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(err());
    }

    Ok((owner.to_string(), repo.to_string()))
}

/// Validate the API url uses HTTP or HTTPS and strip any trailing slash.
fn validate_api_url(api_url: &str) -> Result<String> {
    let parsed = Url::parse(api_url)?;

    match parsed.scheme() {
        "http" | "https" => Ok(api_url.trim_end_matches('/').to_string()),
        _ => Err(SyncError::invalid_input(
            "only http and https schemes are supported for the api url",
        )),
    }
}

fn resolve_token(
    flag_token: Option<&str>,
    env_token: Option<String>,
) -> Result<SecretString> {
    let token = flag_token
        .map(str::to_string)
        .filter(|t| !t.is_empty())
        .or(env_token.filter(|t| !t.is_empty()))
        .ok_or_else(|| SyncError::invalid_input("must set github token"))?;

    Ok(SecretString::from(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeMethod;
    use secrecy::ExposeSecret;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec![
            "sync-branches",
            "--from-branch",
            "develop",
            "--to-branch",
            "main",
            "--repository",
            "acme/widgets",
            "--github-token",
            "test-token",
            "--api-url",
            "https://api.github.com",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn builds_remote_config() {
        let remote = args(&["--dry-run", "TRUE"]).remote_config().unwrap();

        assert_eq!(remote.owner, "acme");
        assert_eq!(remote.repo, "widgets");
        assert_eq!(remote.api_url, "https://api.github.com");
        assert_eq!(remote.token.expose_secret(), "test-token");
        assert!(remote.dry_run);
    }

    #[test]
    fn builds_run_config_from_inputs() {
        let config = args(&[
            "--pull-request-title",
            "Sync develop",
            "--pull-request-auto-merge-method",
            "squash",
            "--pull-request-is-draft",
            "True",
            "--content-comparison",
            "true",
            "--reviewers",
            r#"["octocat"]"#,
            "--team-reviewers",
            r#"["core", "docs"]"#,
            "--labels",
            r#"["sync"]"#,
        ])
        .run_config()
        .unwrap();

        assert_eq!(config.from_branch, "develop");
        assert_eq!(config.to_branch, "main");
        assert_eq!(config.title.as_deref(), Some("Sync develop"));
        assert!(config.body.is_none());
        assert_eq!(config.auto_merge_method, Some(MergeMethod::Squash));
        assert!(config.draft);
        assert!(config.content_comparison);
        assert_eq!(config.reviewers, vec!["octocat"]);
        assert_eq!(config.team_reviewers, vec!["core", "docs"]);
        assert_eq!(config.labels, vec!["sync"]);
    }

    #[test]
    fn optional_inputs_default_to_disabled() {
        let config = args(&[]).run_config().unwrap();

        assert!(config.title.is_none());
        assert!(config.auto_merge_method.is_none());
        assert!(!config.draft);
        assert!(!config.content_comparison);
        assert!(config.labels.is_empty());
    }

    #[test]
    fn rejects_unknown_merge_method() {
        let result = args(&["--pull-request-auto-merge-method", "octopus"])
            .run_config();

        assert!(matches!(result, Err(SyncError::InvalidInput(_))));
    }

    #[test]
    fn parses_repository() {
        assert_eq!(
            parse_repository("acme/widgets").unwrap(),
            ("acme".to_string(), "widgets".to_string())
        );
        assert!(parse_repository("widgets").is_err());
        assert!(parse_repository("/widgets").is_err());
        assert!(parse_repository("acme/").is_err());
        assert!(parse_repository("acme/widgets/extra").is_err());
    }

    #[test]
    fn validates_api_url() {
        assert_eq!(
            validate_api_url("https://ghe.example.com/api/v3/").unwrap(),
            "https://ghe.example.com/api/v3"
        );
        assert!(validate_api_url("ssh://github.com").is_err());
        assert!(validate_api_url("not a url").is_err());
    }

    #[test]
    fn resolves_token_with_env_fallback() {
        let token = resolve_token(Some("flag"), Some("env".into())).unwrap();
        assert_eq!(token.expose_secret(), "flag");

        let token = resolve_token(Some(""), Some("env".into())).unwrap();
        assert_eq!(token.expose_secret(), "env");

        let token = resolve_token(None, Some("env".into())).unwrap();
        assert_eq!(token.expose_secret(), "env");

        assert!(resolve_token(None, None).is_err());
        assert!(resolve_token(Some(""), Some("".into())).is_err());
    }
}
