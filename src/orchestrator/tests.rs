//! Tests for the orchestrator module.
//!
//! Test organization:
//! - `common`: Shared test utilities and helper functions
//! - `guards`: Target validation, duplicate detection and the content gate
//! - `pr_workflow`: Pull request creation and default title/body
//! - `post_actions`: Reviewer, label and auto-merge steps

mod common;
