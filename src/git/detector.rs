use crate::domain::{Package, Packages};
use crate::error::Result;
use crate::git::{ChangedPackageDetector, Git2Repository, Repository};
use crate::workspace::{NodeWorkspace, PackageEnumerator};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Detects changed packages by diffing a git working tree against a base reference
pub struct GitChangeDetector<E = NodeWorkspace> {
    enumerator: E,
}

impl GitChangeDetector<NodeWorkspace> {
    pub fn new() -> Self {
        GitChangeDetector {
            enumerator: NodeWorkspace::new(),
        }
    }
}

impl Default for GitChangeDetector<NodeWorkspace> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PackageEnumerator> GitChangeDetector<E> {
    /// Use a custom package enumerator
    pub fn with_enumerator(enumerator: E) -> Self {
        GitChangeDetector { enumerator }
    }
}

impl<E: PackageEnumerator> ChangedPackageDetector for GitChangeDetector<E> {
    fn get_changed_packages_since_ref(&self, cwd: &Path, base_ref: &str) -> Result<Vec<Package>> {
        let cwd = cwd.canonicalize()?;
        let repo = Git2Repository::open(&cwd)?;
        let workdir = repo.workdir()?.canonicalize()?;
        let files = repo.changed_files_since(base_ref)?;
        let packages = self.enumerator.get_packages(&cwd)?;

        let changed = packages_for_files(&workdir, &files, &packages);
        debug!(
            "{} of {} packages changed since '{}'",
            changed.len(),
            packages.packages.len(),
            base_ref
        );
        Ok(changed)
    }
}

/// Map changed files to the packages owning them
///
/// Each file belongs to the package with the deepest directory containing it;
/// files outside every package are ignored. Packages appear once, in order of
/// their first changed file.
///
/// # Arguments
/// * `workdir` - Directory the `files` paths are relative to
/// * `files` - Changed file paths
/// * `packages` - Candidate packages, with directories comparable to `workdir`
pub fn packages_for_files(workdir: &Path, files: &[PathBuf], packages: &Packages) -> Vec<Package> {
    let mut changed: Vec<Package> = Vec::new();

    for file in files {
        let full_path = workdir.join(file);
        let owner = packages
            .packages
            .iter()
            .filter(|package| package.contains(&full_path))
            .max_by_key(|package| package.dir.components().count());

        if let Some(package) = owner {
            if !changed.iter().any(|seen| seen.name == package.name) {
                changed.push(package.clone());
            }
        }
    }

    changed
}
