use crate::domain::Package;
use crate::error::{ChangesetCheckError, Result};
use crate::git::{ChangedPackageDetector, Repository};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    workdir: PathBuf,
    changed_files: HashMap<String, Vec<PathBuf>>,
}

impl MockRepository {
    /// Create a new mock repository rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        MockRepository {
            workdir: workdir.into(),
            changed_files: HashMap::new(),
        }
    }

    /// Register the files reported as changed since `base_ref`
    pub fn set_changed_files(&mut self, base_ref: impl Into<String>, files: Vec<PathBuf>) {
        self.changed_files.insert(base_ref.into(), files);
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }

    fn changed_files_since(&self, base_ref: &str) -> Result<Vec<PathBuf>> {
        self.changed_files.get(base_ref).cloned().ok_or_else(|| {
            ChangesetCheckError::reference(format!("Cannot resolve '{}'", base_ref))
        })
    }
}

/// Change detector returning a fixed package list for any directory and reference
pub struct StaticChangeDetector {
    packages: Vec<Package>,
}

impl StaticChangeDetector {
    pub fn new(packages: Vec<Package>) -> Self {
        StaticChangeDetector { packages }
    }
}

impl ChangedPackageDetector for StaticChangeDetector {
    fn get_changed_packages_since_ref(&self, _cwd: &Path, _base_ref: &str) -> Result<Vec<Package>> {
        Ok(self.packages.clone())
    }
}
