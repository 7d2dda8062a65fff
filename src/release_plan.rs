//! Release-plan accessors: which packages the pending changesets release,
//! and at which version.

use crate::changesets::ReleasePlanResolver;
use crate::domain::{CheckOptions, Package, VersionMap};
use crate::error::Result;
use crate::workspace::PackageEnumerator;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Packages affected by the release plan, in plan order
///
/// Returns one entry per release. A release naming a package that the
/// enumerator does not know yields `None` at that position.
///
/// # Arguments
/// * `resolver` - Source of the release plan
/// * `enumerator` - Source of all repository packages
/// * `options` - Repository root and base branch
pub fn get_packages_with_release_plan<R, E>(
    resolver: &R,
    enumerator: &E,
    options: &CheckOptions,
) -> Result<Vec<Option<Package>>>
where
    R: ReleasePlanResolver,
    E: PackageEnumerator,
{
    let release_plan = resolver.get_release_plan(
        &options.repository_root_path,
        &options.repository_base_branch,
    )?;
    let all_packages = enumerator.get_packages(&options.repository_root_path)?;

    // Later duplicates overwrite earlier ones
    let mut packages_by_name: HashMap<String, Package> = HashMap::new();
    for package in all_packages.packages {
        packages_by_name.insert(package.name.clone(), package);
    }

    let packages = release_plan
        .releases
        .iter()
        .map(|release| {
            let package = packages_by_name.get(&release.name).cloned();
            if package.is_none() {
                warn!("Release plan names unknown package '{}'", release.name);
            }
            package
        })
        .collect::<Vec<_>>();

    debug!("{} packages affected by release plan", packages.len());
    Ok(packages)
}

/// New version of every package in the release plan
///
/// When the plan holds several releases for one package, the last one wins.
pub fn get_changeset_version_by_package_name<R: ReleasePlanResolver>(
    resolver: &R,
    options: &CheckOptions,
) -> Result<VersionMap> {
    let release_plan = resolver.get_release_plan(
        &options.repository_root_path,
        &options.repository_base_branch,
    )?;

    Ok(release_plan
        .releases
        .into_iter()
        .map(|release| (release.name, release.new_version))
        .collect())
}
