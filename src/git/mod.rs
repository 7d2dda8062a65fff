//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the few Git
//! operations changeset-check needs, plus the changed-package detector
//! built on top of them.
//!
//! # Overview
//!
//! - [Repository]: lists files changed since a base reference
//!   - [repository::Git2Repository]: real implementation using the `git2` crate
//!   - [mock::MockRepository]: fixed file list for testing
//! - [ChangedPackageDetector]: maps changed files to workspace packages
//!   - [detector::GitChangeDetector]: opens a git repository at the given directory
//!   - [mock::StaticChangeDetector]: fixed package list for testing
//!
//! ```rust
//! # use changeset_check::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! for file in repo.changed_files_since("main")? {
//!     println!("changed: {}", file.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod detector;
pub mod mock;
pub mod repository;

pub use detector::{packages_for_files, GitChangeDetector};
pub use mock::{MockRepository, StaticChangeDetector};
pub use repository::Git2Repository;

use crate::domain::Package;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Common git operation trait for abstraction
///
/// All methods return [crate::error::Result<T>]; implementations map
/// underlying errors (like `git2::Error`) to
/// [crate::error::ChangesetCheckError] variants.
pub trait Repository {
    /// Absolute path of the working directory
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - The working directory
    /// * `Err` - If the repository is bare
    fn workdir(&self) -> Result<PathBuf>;

    /// Files that differ between the working tree and the point where `HEAD`
    /// diverged from `base_ref`
    ///
    /// Includes staged, unstaged and untracked files. Paths are relative to
    /// [Repository::workdir], sorted and free of duplicates.
    ///
    /// # Arguments
    /// * `base_ref` - Branch, tag or revision to compare against (e.g., "main")
    ///
    /// # Returns
    /// * `Ok(Vec<PathBuf>)` - Changed file paths
    /// * `Err` - If the reference cannot be resolved or there's a Git error
    fn changed_files_since(&self, base_ref: &str) -> Result<Vec<PathBuf>>;
}

/// Finds the packages whose tracked files differ from a reference
pub trait ChangedPackageDetector {
    /// Packages changed in the repository at `cwd` relative to `base_ref`
    ///
    /// # Returns
    /// * `Ok(Vec<Package>)` - Changed packages, in order of first changed file
    /// * `Err` - If git or package enumeration fails
    fn get_changed_packages_since_ref(&self, cwd: &Path, base_ref: &str) -> Result<Vec<Package>>;
}
