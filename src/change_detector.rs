//! Changed-package queries relative to the base branch

use crate::changesets::ReleasePlanResolver;
use crate::domain::{CheckOptions, Package};
use crate::error::Result;
use crate::git::ChangedPackageDetector;
use crate::release_plan::get_packages_with_release_plan;
use crate::workspace::PackageEnumerator;
use std::collections::HashSet;

/// Packages whose files differ from the base branch, as the detector reports them
pub fn get_changed_packages<D: ChangedPackageDetector>(
    detector: &D,
    options: &CheckOptions,
) -> Result<Vec<Package>> {
    detector.get_changed_packages_since_ref(
        &options.repository_root_path,
        &options.repository_base_branch,
    )
}

/// Changed packages not covered by the release plan, in detector order
pub fn get_changed_packages_without_release_plan<D, R, E>(
    detector: &D,
    resolver: &R,
    enumerator: &E,
    options: &CheckOptions,
) -> Result<Vec<Package>>
where
    D: ChangedPackageDetector,
    R: ReleasePlanResolver,
    E: PackageEnumerator,
{
    let changed_packages = get_changed_packages(detector, options)?;
    let packages_with_release_plan = get_packages_with_release_plan(resolver, enumerator, options)?;

    let release_plan_names: HashSet<String> = packages_with_release_plan
        .into_iter()
        .flatten()
        .map(|package| package.name)
        .collect();

    Ok(changed_packages
        .into_iter()
        .filter(|package| !release_plan_names.contains(&package.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changesets::StaticReleasePlan;
    use crate::domain::{BumpType, Release, ReleasePlan};
    use crate::git::StaticChangeDetector;
    use crate::workspace::StaticWorkspace;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn options() -> CheckOptions {
        CheckOptions {
            repository_root_path: PathBuf::from("fake-repo-path"),
            repository_base_branch: "fake-base-branch".to_string(),
        }
    }

    fn package(name: &str) -> Package {
        Package::new(name, "1.0.0", format!("./{}", name))
    }

    fn plan_for(names: &[&str]) -> StaticReleasePlan {
        StaticReleasePlan::new(ReleasePlan::from_releases(
            names
                .iter()
                .map(|name| Release::new(*name, BumpType::Patch, "1.0.0", "1.0.1"))
                .collect(),
        ))
    }

    #[test]
    fn test_changed_packages_are_returned_unmodified() {
        let detector = StaticChangeDetector::new(vec![package("b"), package("a")]);
        let changed = get_changed_packages(&detector, &options()).unwrap();
        assert_eq!(changed, vec![package("b"), package("a")]);
    }

    #[test]
    fn test_changed_packages_without_release_plan() {
        let detector = StaticChangeDetector::new(vec![
            package("package-with-release-plan"),
            package("package-without-release-plan"),
        ]);
        let resolver = plan_for(&["package-with-release-plan", "unchanged-package-with-release-plan"]);
        let workspace = StaticWorkspace::new(vec![
            package("package-with-release-plan"),
            package("package-without-release-plan"),
            package("unchanged-package-with-release-plan"),
            package("unchanged-package-without-release-plan"),
        ]);

        let without =
            get_changed_packages_without_release_plan(&detector, &resolver, &workspace, &options())
                .unwrap();
        assert_eq!(without, vec![package("package-without-release-plan")]);
    }

    #[test]
    fn test_release_for_unknown_package_does_not_cover_anything() {
        let detector = StaticChangeDetector::new(vec![package("ghost")]);
        let resolver = plan_for(&["ghost"]);
        let workspace = StaticWorkspace::new(vec![]);

        let without =
            get_changed_packages_without_release_plan(&detector, &resolver, &workspace, &options())
                .unwrap();
        assert_eq!(without, vec![package("ghost")]);
    }

    proptest! {
        #[test]
        fn prop_without_plan_is_ordered_set_difference(
            changed in proptest::collection::vec("[a-f]", 0..8),
            planned in proptest::collection::vec("[a-f]", 0..8),
        ) {
            let detector = StaticChangeDetector::new(changed.iter().map(|n| package(n)).collect());
            let planned_refs: Vec<&str> = planned.iter().map(String::as_str).collect();
            let resolver = plan_for(&planned_refs);
            let mut all: Vec<Package> = changed.iter().chain(planned.iter()).map(|n| package(n)).collect();
            all.dedup_by(|a, b| a.name == b.name);
            let workspace = StaticWorkspace::new(all);

            let without = get_changed_packages_without_release_plan(
                &detector, &resolver, &workspace, &options(),
            ).unwrap();

            let expected: Vec<Package> = changed
                .iter()
                .filter(|name| !planned.contains(name))
                .map(|n| package(n))
                .collect();
            prop_assert_eq!(without, expected);
        }
    }
}
