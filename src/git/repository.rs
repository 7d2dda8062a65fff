use crate::error::{ChangesetCheckError, Result};
use git2::{DiffOptions, ErrorCode, Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Resolve a reference to a commit, falling back to `origin/<name>`
    ///
    /// CI checkouts usually only carry the remote-tracking branch for the base.
    fn resolve_commit(&self, base_ref: &str) -> Result<Oid> {
        match self.repo.revparse_single(base_ref) {
            Ok(object) => Ok(object.peel_to_commit()?.id()),
            Err(e) if e.code() == ErrorCode::NotFound => {
                let remote_ref = format!("origin/{}", base_ref);
                debug!("'{}' not found locally, trying '{}'", base_ref, remote_ref);
                let object = self.repo.revparse_single(&remote_ref).map_err(|_| {
                    ChangesetCheckError::reference(format!(
                        "Cannot resolve '{}' or '{}'",
                        base_ref, remote_ref
                    ))
                })?;
                Ok(object.peel_to_commit()?.id())
            }
            Err(e) => Err(ChangesetCheckError::reference(format!(
                "Cannot resolve '{}': {}",
                base_ref, e
            ))),
        }
    }
}

impl super::Repository for Git2Repository {
    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ChangesetCheckError::reference("Repository has no working directory"))
    }

    fn changed_files_since(&self, base_ref: &str) -> Result<Vec<PathBuf>> {
        let base_oid = self.resolve_commit(base_ref)?;
        let head_oid = self.repo.head()?.peel_to_commit()?.id();
        let merge_base = self.repo.merge_base(base_oid, head_oid).map_err(|e| {
            ChangesetCheckError::reference(format!(
                "No common ancestor between '{}' and HEAD: {}",
                base_ref, e
            ))
        })?;
        debug!("Diverged from '{}' at {}", base_ref, merge_base);

        let base_tree = self.repo.find_commit(merge_base)?.tree()?;

        let mut options = DiffOptions::new();
        options.include_untracked(true).recurse_untracked_dirs(true);

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&base_tree), Some(&mut options))?;

        let mut files: Vec<PathBuf> = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(Path::to_path_buf)
            })
            .collect();

        files.sort();
        files.dedup();

        debug!("Found {} changed files since '{}'", files.len(), base_ref);
        Ok(files)
    }
}
