use crate::domain::{Package, Packages};
use crate::error::Result;
use crate::workspace::PackageEnumerator;
use std::path::Path;

/// Package enumerator returning a fixed list, ignoring the repository root
pub struct StaticWorkspace {
    packages: Packages,
}

impl StaticWorkspace {
    /// Create a workspace with the given packages and a placeholder root package
    pub fn new(packages: Vec<Package>) -> Self {
        StaticWorkspace {
            packages: Packages {
                root: Package::new("root", "0.0.0", "."),
                packages,
            },
        }
    }
}

impl PackageEnumerator for StaticWorkspace {
    fn get_packages(&self, _repository_root: &Path) -> Result<Packages> {
        Ok(self.packages.clone())
    }
}
