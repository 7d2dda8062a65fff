//! Command-line workflow

pub mod orchestration;

pub use orchestration::{compute_results, run_check, Collaborators};
