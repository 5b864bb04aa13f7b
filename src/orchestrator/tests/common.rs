//! Common test utilities for orchestrator tests.

use crate::{
    config::{RunConfig, RunConfigBuilder},
    forge::{
        config::RemoteConfig, manager::ForgeManager, request::PullRequest,
        traits::MockForge,
    },
    orchestrator::SyncOrchestrator,
};

pub const FROM_BRANCH: &str = "feature-x";
pub const TO_BRANCH: &str = "main";

/// Creates a MockForge that already answers `remote_config`, the one call
/// every ForgeManager makes on construction.
///
/// # Example
/// ```ignore
/// let mut mock_forge = mock_forge();
/// mock_forge.expect_list_branches().returning(|| Ok(vec![]));
/// let orchestrator = create_test_orchestrator(mock_forge);
/// ```
pub fn mock_forge() -> MockForge {
    let mut mock_forge = MockForge::new();
    mock_forge.expect_remote_config().returning(|| RemoteConfig {
        owner: "acme".into(),
        repo: "widgets".into(),
        ..Default::default()
    });
    mock_forge
}

pub fn create_test_orchestrator(mock_forge: MockForge) -> SyncOrchestrator {
    SyncOrchestrator::new(ForgeManager::new(Box::new(mock_forge)))
}

/// Builder pre-populated with FROM_BRANCH and TO_BRANCH.
pub fn config_builder() -> RunConfigBuilder {
    let mut builder = RunConfig::builder();
    builder.from_branch(FROM_BRANCH).to_branch(TO_BRANCH);
    builder
}

pub fn test_config() -> RunConfig {
    config_builder().build().unwrap()
}

pub fn test_pr(number: u64, head: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/acme/widgets/pull/{number}"),
        head_branch: head.to_string(),
        base_branch: base.to_string(),
    }
}

/// Forge whose target branch exists and has no open pull requests.
pub fn mock_forge_ready_to_create() -> MockForge {
    let mut mock_forge = mock_forge();
    mock_forge
        .expect_list_branches()
        .returning(|| Ok(vec![TO_BRANCH.into(), FROM_BRANCH.into()]));
    mock_forge.expect_list_open_prs().returning(|| Ok(vec![]));
    mock_forge
}

/// Adds a successful `create_pr` expectation returning PR #101.
pub fn expect_create(mock_forge: &mut MockForge) {
    mock_forge
        .expect_create_pr()
        .times(1)
        .returning(|req| Ok(test_pr(101, &req.head_branch, &req.base_branch)));
}
