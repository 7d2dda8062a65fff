//! Main check workflow orchestration
//!
//! Reads the options from the CI platform, queries the release plan and the
//! changed packages, and publishes the results back to the platform. Kept
//! apart from `main.rs` so the workflow runs against any collaborators.

use tracing::{info, warn};

use crate::change_detector::{get_changed_packages, get_changed_packages_without_release_plan};
use crate::changesets::ReleasePlanResolver;
use crate::config::SummaryConfig;
use crate::domain::{CheckOptions, CheckResults, Package};
use crate::error::Result;
use crate::git::ChangedPackageDetector;
use crate::github::{get_options_from_input, set_output_from_results, ActionsPlatform};
use crate::release_plan::{get_changeset_version_by_package_name, get_packages_with_release_plan};
use crate::workspace::PackageEnumerator;

/// The external services a check run queries
pub struct Collaborators<R, E, D> {
    pub resolver: R,
    pub enumerator: E,
    pub detector: D,
}

fn package_names(packages: Vec<Package>) -> Vec<String> {
    packages.into_iter().map(|package| package.name).collect()
}

/// Compute the results of a check run without publishing them
///
/// Steps run strictly in order: plan-affected packages, changed packages,
/// changed packages without changeset, versions after the plan.
pub fn compute_results<R, E, D>(
    collaborators: &Collaborators<R, E, D>,
    options: &CheckOptions,
) -> Result<CheckResults>
where
    R: ReleasePlanResolver,
    E: PackageEnumerator,
    D: ChangedPackageDetector,
{
    let Collaborators {
        resolver,
        enumerator,
        detector,
    } = collaborators;

    let packages_with_release_plan = get_packages_with_release_plan(resolver, enumerator, options)?;
    let missing = packages_with_release_plan
        .iter()
        .filter(|package| package.is_none())
        .count();
    if missing > 0 {
        warn!("{} releases name packages outside the workspace", missing);
    }
    let packages_affected_by_release_plan =
        package_names(packages_with_release_plan.into_iter().flatten().collect());

    let changed_packages = package_names(get_changed_packages(detector, options)?);

    let changed_packages_without_changeset = package_names(
        get_changed_packages_without_release_plan(detector, resolver, enumerator, options)?,
    );

    let packages_versions_after_applying_release_plan =
        get_changeset_version_by_package_name(resolver, options)?;

    Ok(CheckResults {
        packages_affected_by_release_plan,
        changed_packages,
        changed_packages_without_changeset,
        packages_versions_after_applying_release_plan,
    })
}

/// Run the whole check against a CI platform
///
/// # Returns
///
/// The published results, or the first error raised by any step
pub fn run_check<P, R, E, D>(
    platform: &mut P,
    collaborators: &Collaborators<R, E, D>,
    summary_config: &SummaryConfig,
) -> Result<CheckResults>
where
    P: ActionsPlatform + ?Sized,
    R: ReleasePlanResolver,
    E: PackageEnumerator,
    D: ChangedPackageDetector,
{
    let options = get_options_from_input(platform)?;
    info!(
        "Checking {} against '{}'",
        options.repository_root_path.display(),
        options.repository_base_branch
    );

    let results = compute_results(collaborators, &options)?;
    set_output_from_results(platform, &results, summary_config)?;

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changesets::StaticReleasePlan;
    use crate::domain::{BumpType, Release, ReleasePlan};
    use crate::error::ChangesetCheckError;
    use crate::git::StaticChangeDetector;
    use crate::github::{RecordingPlatform, INPUT_BASE_BRANCH, INPUT_REPOSITORY_PATH};
    use crate::workspace::StaticWorkspace;
    use std::path::Path;

    struct FailingDetector;

    impl ChangedPackageDetector for FailingDetector {
        fn get_changed_packages_since_ref(&self, _cwd: &Path, base_ref: &str) -> Result<Vec<Package>> {
            Err(ChangesetCheckError::reference(format!("Cannot resolve '{}'", base_ref)))
        }
    }

    fn platform() -> RecordingPlatform {
        RecordingPlatform::new()
            .with_input(INPUT_REPOSITORY_PATH, "fake-repo-path")
            .with_input(INPUT_BASE_BRANCH, "fake-base-branch")
    }

    #[test]
    fn test_release_for_unknown_package_is_skipped() {
        let collaborators = Collaborators {
            resolver: StaticReleasePlan::new(ReleasePlan::from_releases(vec![
                Release::new("ghost", BumpType::Patch, "0.0.0", "0.0.1"),
                Release::new("a", BumpType::Patch, "1.0.0", "1.0.1"),
            ])),
            enumerator: StaticWorkspace::new(vec![Package::new("a", "1.0.0", "packages/a")]),
            detector: StaticChangeDetector::new(vec![]),
        };

        let results = run_check(&mut platform(), &collaborators, &SummaryConfig::default()).unwrap();
        assert_eq!(results.packages_affected_by_release_plan, vec!["a"]);
        assert_eq!(
            results.packages_versions_after_applying_release_plan.get("ghost"),
            Some("0.0.1")
        );
    }

    #[test]
    fn test_detector_failure_aborts_before_any_output() {
        let collaborators = Collaborators {
            resolver: StaticReleasePlan::new(ReleasePlan::default()),
            enumerator: StaticWorkspace::new(vec![]),
            detector: FailingDetector,
        };

        let mut platform = platform();
        let err = run_check(&mut platform, &collaborators, &SummaryConfig::default()).unwrap_err();
        assert!(err.to_string().contains("fake-base-branch"));
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_missing_base_branch_input_aborts() {
        let collaborators = Collaborators {
            resolver: StaticReleasePlan::new(ReleasePlan::default()),
            enumerator: StaticWorkspace::new(vec![]),
            detector: StaticChangeDetector::new(vec![]),
        };

        let mut platform = RecordingPlatform::new();
        assert!(matches!(
            run_check(&mut platform, &collaborators, &SummaryConfig::default()),
            Err(ChangesetCheckError::Input(_))
        ));
    }
}
