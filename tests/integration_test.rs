// tests/integration_test.rs
use changeset_check::changesets::{ChangesetResolver, ReleasePlanResolver};
use changeset_check::cli::{run_check, Collaborators};
use changeset_check::config::SummaryConfig;
use changeset_check::git::{ChangedPackageDetector, Git2Repository, GitChangeDetector, Repository};
use changeset_check::github::{RecordingPlatform, INPUT_BASE_BRANCH, INPUT_REPOSITORY_PATH};
use changeset_check::workspace::NodeWorkspace;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const BASE_BRANCH: &str = "base-branch";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn commit_all(repo: &git2::Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = git2::Signature::now("Test", "test@example.com").unwrap();
    let parents: Vec<git2::Commit> = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => vec![],
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parent_refs)
        .unwrap()
}

/// Monorepo with packages a, b and c, a base branch at the initial commit,
/// and a feature commit changing `a` with a changeset plus an uncommitted
/// change to `c`.
fn monorepo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let repo = git2::Repository::init(root).unwrap();

    write(root, "package.json", r#"{ "name": "monorepo", "private": true, "workspaces": ["packages/*"] }"#);
    write(root, "packages/a/package.json", r#"{ "name": "a", "version": "0.0.1" }"#);
    write(root, "packages/a/index.js", "export const a = 1;\n");
    write(root, "packages/b/package.json", r#"{ "name": "b", "version": "1.0.0" }"#);
    write(root, "packages/b/index.js", "export const b = 1;\n");
    write(root, "packages/c/package.json", r#"{ "name": "c", "version": "2.0.0" }"#);
    write(root, "packages/c/index.js", "export const c = 1;\n");
    write(root, ".changeset/README.md", "# Changesets\n");
    write(root, ".changeset/already-released.md", "---\nb: major\n---\n\nOld news\n");
    let initial = commit_all(&repo, "initial");
    repo.branch(BASE_BRANCH, &repo.find_commit(initial).unwrap(), false)
        .unwrap();

    write(root, "packages/a/index.js", "export const a = 2;\n");
    write(root, ".changeset/brave-dogs-run.md", "---\n\"a\": minor\n---\n\nBump a\n");
    commit_all(&repo, "feature");

    write(root, "packages/c/index.js", "export const c = 2;\n");

    temp
}

#[test]
fn test_changed_files_since_base_branch() {
    let temp = monorepo();
    let repo = Git2Repository::open(temp.path()).unwrap();

    let files = repo.changed_files_since(BASE_BRANCH).unwrap();
    assert_eq!(
        files,
        vec![
            PathBuf::from(".changeset/brave-dogs-run.md"),
            PathBuf::from("packages/a/index.js"),
            PathBuf::from("packages/c/index.js"),
        ]
    );
}

#[test]
fn test_untracked_files_count_as_changes() {
    let temp = monorepo();
    write(temp.path(), "packages/b/new-file.js", "new\n");

    let changed = GitChangeDetector::new()
        .get_changed_packages_since_ref(temp.path(), BASE_BRANCH)
        .unwrap();
    let names: Vec<&str> = changed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_remote_tracking_branch_fallback() {
    let temp = monorepo();
    let repo = git2::Repository::open(temp.path()).unwrap();
    let base = repo
        .find_branch(BASE_BRANCH, git2::BranchType::Local)
        .unwrap()
        .get()
        .target()
        .unwrap();
    repo.reference("refs/remotes/origin/develop", base, false, "test")
        .unwrap();

    let files = Git2Repository::open(temp.path())
        .unwrap()
        .changed_files_since("develop")
        .unwrap();
    assert_eq!(files.len(), 3);
}

#[test]
fn test_unknown_base_branch_is_an_error() {
    let temp = monorepo();
    let result = Git2Repository::open(temp.path())
        .unwrap()
        .changed_files_since("no-such-branch");
    assert!(result.is_err());
}

#[test]
fn test_release_plan_only_uses_new_changesets() {
    let temp = monorepo();

    let plan = ChangesetResolver::default()
        .get_release_plan(temp.path(), BASE_BRANCH)
        .unwrap();

    assert_eq!(plan.changesets.len(), 1);
    assert_eq!(plan.changesets[0].id, "brave-dogs-run");
    assert_eq!(plan.releases.len(), 1);
    assert_eq!(plan.releases[0].name, "a");
    assert_eq!(plan.releases[0].old_version, "0.0.1");
    assert_eq!(plan.releases[0].new_version, "0.1.0");
    assert!(plan.pre_state.is_none());
}

#[test]
fn test_full_check_against_git_repository() {
    let temp = monorepo();
    let collaborators = Collaborators {
        resolver: ChangesetResolver::default(),
        enumerator: NodeWorkspace::new(),
        detector: GitChangeDetector::new(),
    };
    let root = temp.path().canonicalize().unwrap();
    let mut platform = RecordingPlatform::new()
        .with_input(INPUT_REPOSITORY_PATH, root.to_string_lossy())
        .with_input(INPUT_BASE_BRANCH, BASE_BRANCH);

    let results = run_check(&mut platform, &collaborators, &SummaryConfig::default()).unwrap();

    assert_eq!(results.packages_affected_by_release_plan, vec!["a"]);
    assert_eq!(results.changed_packages, vec!["a", "c"]);
    assert_eq!(results.changed_packages_without_changeset, vec!["c"]);
    assert_eq!(
        results.packages_versions_after_applying_release_plan.get("a"),
        Some("0.1.0")
    );
    assert_eq!(
        platform.warnings(),
        vec!["There are changed packages without changeset"]
    );
}

#[test]
fn test_changeset_check_help() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "changeset-check", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("changeset-check"));
    assert!(stdout.contains("--base-branch"));
}
