//! Package enumeration
//!
//! The [PackageEnumerator] trait lists every package of a repository,
//! whether or not it changed. Implementations:
//!
//! - [node::NodeWorkspace]: reads `package.json` / `pnpm-workspace.yaml` workspaces
//! - [mock::StaticWorkspace]: a fixed package list for testing

pub mod mock;
pub mod node;

pub use mock::StaticWorkspace;
pub use node::NodeWorkspace;

use crate::domain::Packages;
use crate::error::Result;
use std::path::Path;

/// Lists all packages of a repository
pub trait PackageEnumerator {
    /// Enumerate the packages under `repository_root`
    ///
    /// # Returns
    /// * `Ok(Packages)` - The root package and every workspace package
    /// * `Err` - If a manifest is missing or cannot be parsed
    fn get_packages(&self, repository_root: &Path) -> Result<Packages>;
}
