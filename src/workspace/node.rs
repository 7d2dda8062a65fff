use crate::domain::{Package, Packages};
use crate::error::{ChangesetCheckError, Result};
use crate::workspace::PackageEnumerator;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MANIFEST_FILE: &str = "package.json";
const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";
const DEFAULT_VERSION: &str = "0.0.0";
const INSTALLED_DEPENDENCIES_DIR: &str = "node_modules";

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    workspaces: Option<Workspaces>,
}

/// `workspaces` is either a plain list or yarn's `{ "packages": [...] }` form
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Workspaces {
    List(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
struct PnpmWorkspace {
    #[serde(default)]
    packages: Vec<String>,
}

/// Enumerates npm, yarn and pnpm workspace packages
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeWorkspace;

impl NodeWorkspace {
    pub fn new() -> Self {
        NodeWorkspace
    }

    fn read_manifest(dir: &Path) -> Result<PackageJson> {
        let path = dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            ChangesetCheckError::manifest(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn workspace_patterns(root: &Path, manifest: &PackageJson) -> Result<Vec<String>> {
        match &manifest.workspaces {
            Some(Workspaces::List(patterns)) => return Ok(patterns.clone()),
            Some(Workspaces::Object { packages }) => return Ok(packages.clone()),
            None => {}
        }

        let pnpm_path = root.join(PNPM_WORKSPACE_FILE);
        if pnpm_path.exists() {
            let content = fs::read_to_string(&pnpm_path)?;
            let workspace: PnpmWorkspace = serde_yaml::from_str(&content)?;
            return Ok(workspace.packages);
        }

        Ok(Vec::new())
    }

    /// Whether `dir` lies inside an installed dependency tree below `root`
    fn is_installed_dependency(root: &Path, dir: &Path) -> bool {
        dir.strip_prefix(root)
            .unwrap_or(dir)
            .components()
            .any(|component| component.as_os_str() == INSTALLED_DEPENDENCIES_DIR)
    }

    fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let mut excludes = Vec::new();
        let mut dirs = Vec::new();

        for pattern in patterns {
            if let Some(negated) = pattern.strip_prefix('!') {
                let full = root.join(negated.trim_end_matches('/'));
                excludes.push(glob::Pattern::new(&full.to_string_lossy())?);
                continue;
            }

            let full = root.join(pattern.trim_end_matches('/'));
            for entry in glob::glob(&full.to_string_lossy())? {
                let dir = entry.map_err(|e| e.into_error())?;
                if Self::is_installed_dependency(root, &dir) {
                    continue;
                }
                if dir.is_dir() && dir.join(MANIFEST_FILE).is_file() {
                    dirs.push(dir);
                }
            }
        }

        dirs.retain(|dir| !excludes.iter().any(|exclude| exclude.matches_path(dir)));
        dirs.sort();
        dirs.dedup();
        Ok(dirs)
    }

    fn to_package(dir: PathBuf, manifest: PackageJson) -> Result<Package> {
        let name = manifest.name.ok_or_else(|| {
            ChangesetCheckError::manifest(format!(
                "Package at {} has no name",
                dir.display()
            ))
        })?;
        let version = manifest
            .version
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        Ok(Package { name, version, dir })
    }
}

impl PackageEnumerator for NodeWorkspace {
    fn get_packages(&self, repository_root: &Path) -> Result<Packages> {
        let root_manifest = Self::read_manifest(repository_root)?;
        let patterns = Self::workspace_patterns(repository_root, &root_manifest)?;

        let root_name = root_manifest.name.clone().unwrap_or_else(|| {
            repository_root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "root".to_string())
        });
        let root = Package {
            name: root_name,
            version: root_manifest
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            dir: repository_root.to_path_buf(),
        };

        if patterns.is_empty() {
            debug!("No workspaces configured, treating root as the only package");
            return Ok(Packages {
                packages: vec![root.clone()],
                root,
            });
        }

        let mut packages = Vec::new();
        for dir in Self::expand_patterns(repository_root, &patterns)? {
            if dir == repository_root {
                continue;
            }
            let manifest = Self::read_manifest(&dir)?;
            packages.push(Self::to_package(dir, manifest)?);
        }

        debug!(
            "Found {} workspace packages in {}",
            packages.len(),
            repository_root.display()
        );
        Ok(Packages { root, packages })
    }
}
