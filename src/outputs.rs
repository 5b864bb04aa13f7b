//! GitHub Actions step outputs and workflow annotations.
use log::*;
use std::{env, path::PathBuf};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{error::Result, forge::request::PullRequest};

/// Environment variable naming the runner's step output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";
pub const PULL_REQUEST_URL: &str = "PULL_REQUEST_URL";
pub const PULL_REQUEST_NUMBER: &str = "PULL_REQUEST_NUMBER";

/// Severity of a workflow annotation.
#[derive(Debug, Clone, Copy, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Annotation {
    Warning,
    Error,
}

/// Writes step outputs to the file the runner collects them from.
#[derive(Debug, Clone)]
pub struct ActionOutputs {
    path: Option<PathBuf>,
}

impl ActionOutputs {
    /// Outputs file taken from `GITHUB_OUTPUT`, if the runner provided one.
    pub fn from_env() -> Self {
        Self {
            path: env::var_os(GITHUB_OUTPUT_ENV)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Expose the pull request's url and number to later workflow steps.
    pub async fn set_pull_request(&self, pr: &PullRequest) -> Result<()> {
        self.set(PULL_REQUEST_URL, &pr.html_url).await?;
        self.set(PULL_REQUEST_NUMBER, &pr.number.to_string()).await
    }

    pub async fn set(&self, name: &str, value: &str) -> Result<()> {
        let Some(path) = &self.path else {
            info!("output {name}={value}");
            return Ok(());
        };

        debug!("writing output {name} to {}", path.display());

        let mut file =
            OpenOptions::new().create(true).append(true).open(path).await?;

        file.write_all(format_output(name, value).as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

/// Multi-line values use the heredoc form the runner expects.
fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        let delimiter = "ghadelimiter_sync_branches";
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Emit a workflow command so the message shows up as an annotation on the
/// run summary.
pub fn annotate(level: Annotation, message: &str) {
    println!("::{level}::{}", escape_data(message));
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
