use std::path::{Path, PathBuf};

/// A workspace package as reported by a package enumerator or change detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
    /// Package directory, absolute or relative to the repository root
    pub dir: PathBuf,
}

impl Package {
    /// Create a new package
    pub fn new(name: impl Into<String>, version: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Package {
            name: name.into(),
            version: version.into(),
            dir: dir.into(),
        }
    }

    /// Check whether `path` lies inside this package's directory
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.dir) && path != self.dir
    }
}

/// Every package of a repository, plus the root package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packages {
    pub root: Package,
    pub packages: Vec<Package>,
}

impl Packages {
    /// Find a package by name
    pub fn find(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|package| package.name == name)
    }

    /// Whether the root package is the only package (no workspaces configured)
    pub fn is_single_package(&self) -> bool {
        self.packages.len() == 1 && self.packages[0] == self.root
    }
}
