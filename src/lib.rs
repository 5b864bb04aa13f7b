pub mod cli;
pub mod config;
pub mod error;
pub mod forge;
pub mod orchestrator;
pub mod outputs;

pub use error::{Result, SyncError};
pub use orchestrator::{StepStatus, SyncOrchestrator, SyncOutcome};
