//! Release plan resolution from changeset files
//!
//! A changeset is a markdown file in the changeset directory (`.changeset`
//! by default) whose frontmatter names the packages to bump. The
//! [ReleasePlanResolver] trait turns the pending changesets of a branch into
//! a [ReleasePlan]:
//!
//! - [ChangesetResolver]: reads changesets added since the base reference
//! - [mock::StaticReleasePlan]: fixed plan for testing

pub mod mock;
pub mod parse;
pub mod plan;

pub use mock::StaticReleasePlan;
pub use parse::parse_changeset;
pub use plan::assemble_release_plan;

use crate::domain::{Changeset, PreState, ReleasePlan};
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::workspace::{NodeWorkspace, PackageEnumerator};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of changeset files, relative to the repository root
pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";

const PRE_STATE_FILE: &str = "pre.json";
const README_FILE: &str = "README.md";

/// Resolves the release plan of a repository
pub trait ReleasePlanResolver {
    /// Compute the release plan for `repository_root` relative to `base_ref`
    ///
    /// New versions are plain semver bumps. A pre-release state is carried in
    /// [ReleasePlan::pre_state] but does not add pre-release suffixes, so a
    /// repository in pre mode gets `1.1.0` rather than `1.1.0-next.0`.
    ///
    /// # Returns
    /// * `Ok(ReleasePlan)` - Releases in plan order
    /// * `Err` - If changesets, manifests or git cannot be read
    fn get_release_plan(&self, repository_root: &Path, base_ref: &str) -> Result<ReleasePlan>;
}

/// Resolves release plans from the changesets a branch added since its base
pub struct ChangesetResolver<E = NodeWorkspace> {
    changeset_dir: PathBuf,
    enumerator: E,
}

impl ChangesetResolver<NodeWorkspace> {
    /// Create a resolver reading changesets from `changeset_dir`
    ///
    /// A relative `changeset_dir` is resolved against the repository root.
    pub fn new(changeset_dir: impl Into<PathBuf>) -> Self {
        ChangesetResolver {
            changeset_dir: changeset_dir.into(),
            enumerator: NodeWorkspace::new(),
        }
    }
}

impl Default for ChangesetResolver<NodeWorkspace> {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGESET_DIR)
    }
}

impl<E: PackageEnumerator> ChangesetResolver<E> {
    /// Use a custom package enumerator
    pub fn with_enumerator(changeset_dir: impl Into<PathBuf>, enumerator: E) -> Self {
        ChangesetResolver {
            changeset_dir: changeset_dir.into(),
            enumerator,
        }
    }
}

impl<E: PackageEnumerator> ReleasePlanResolver for ChangesetResolver<E> {
    fn get_release_plan(&self, repository_root: &Path, base_ref: &str) -> Result<ReleasePlan> {
        let root = repository_root.canonicalize()?;
        let changeset_dir = root.join(&self.changeset_dir);

        let repo = Git2Repository::open(&root)?;
        let pending = changeset_ids_since(&repo, &changeset_dir, base_ref)?;
        let changesets = read_changesets(&changeset_dir, Some(&pending))?;
        debug!(
            "Read {} changesets added since '{}'",
            changesets.len(),
            base_ref
        );

        let packages = self.enumerator.get_packages(&root)?;
        let pre_state = read_pre_state(&changeset_dir)?;

        assemble_release_plan(changesets, &packages, pre_state)
    }
}

fn is_changeset_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
        && path.file_name().is_some_and(|name| name != README_FILE)
}

/// Ids of changeset files that changed since `base_ref`
///
/// # Arguments
/// * `repo` - Repository to diff
/// * `changeset_dir` - Absolute changeset directory, comparable to the repository workdir
/// * `base_ref` - Reference to compare against
pub fn changeset_ids_since<R: Repository>(
    repo: &R,
    changeset_dir: &Path,
    base_ref: &str,
) -> Result<HashSet<String>> {
    let workdir = repo.workdir()?;
    let workdir = workdir.canonicalize().unwrap_or(workdir);

    let ids = repo
        .changed_files_since(base_ref)?
        .into_iter()
        .map(|file| workdir.join(file))
        .filter(|path| path.parent() == Some(changeset_dir) && is_changeset_file(path))
        .filter_map(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .collect();

    Ok(ids)
}

/// Read and parse the changesets in `changeset_dir`
///
/// A missing directory yields no changesets. When `only` is given, files whose
/// id is not in the set are skipped, as are ids whose file was deleted.
/// Changesets are returned sorted by id.
pub fn read_changesets(changeset_dir: &Path, only: Option<&HashSet<String>>) -> Result<Vec<Changeset>> {
    if !changeset_dir.is_dir() {
        debug!("No changeset directory at {}", changeset_dir.display());
        return Ok(Vec::new());
    }

    let mut changesets = Vec::new();
    for entry in fs::read_dir(changeset_dir)? {
        let path = entry?.path();
        if !path.is_file() || !is_changeset_file(&path) {
            continue;
        }
        let Some(id) = path.file_stem().map(|stem| stem.to_string_lossy().into_owned()) else {
            continue;
        };
        if only.is_some_and(|ids| !ids.contains(&id)) {
            continue;
        }

        let content = fs::read_to_string(&path)?;
        changesets.push(parse_changeset(&id, &content)?);
    }

    changesets.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(changesets)
}

/// Read `pre.json` from the changeset directory, if present
pub fn read_pre_state(changeset_dir: &Path) -> Result<Option<PreState>> {
    let path = changeset_dir.join(PRE_STATE_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
