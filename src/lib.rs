pub mod change_detector;
pub mod changesets;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod github;
pub mod release_plan;
pub mod telemetry;
pub mod ui;
pub mod workspace;

pub use error::{ChangesetCheckError, Result};
