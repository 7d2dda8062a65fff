//! Domain types - packages, releases and the per-run result record

pub mod package;
pub mod release;
pub mod results;

pub use package::{Package, Packages};
pub use release::{BumpType, Changeset, ChangesetRelease, PreMode, PreState, Release, ReleasePlan};
pub use results::{CheckOptions, CheckResults, VersionMap};
