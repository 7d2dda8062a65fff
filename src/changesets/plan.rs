use crate::domain::{BumpType, Changeset, Packages, PreState, Release, ReleasePlan};
use crate::error::Result;
use std::collections::BTreeMap;
use tracing::warn;

const UNKNOWN_PACKAGE_VERSION: &str = "0.0.0";

/// Combine changesets into a release plan
///
/// Each package mentioned by at least one changeset gets one release whose
/// bump is the strongest requested. Releases are ordered by package name.
/// Dependents of bumped packages are not released.
///
/// # Arguments
/// * `changesets` - Pending changesets
/// * `packages` - All packages, used for current versions
/// * `pre_state` - Pre-release state, carried into the plan unchanged
pub fn assemble_release_plan(
    changesets: Vec<Changeset>,
    packages: &Packages,
    pre_state: Option<PreState>,
) -> Result<ReleasePlan> {
    let mut requested: BTreeMap<&str, (BumpType, Vec<String>)> = BTreeMap::new();

    for changeset in &changesets {
        for release in &changeset.releases {
            let entry = requested
                .entry(release.name.as_str())
                .or_insert((BumpType::None, Vec::new()));
            entry.0 = entry.0.max(release.bump_type);
            if !entry.1.contains(&changeset.id) {
                entry.1.push(changeset.id.clone());
            }
        }
    }

    let mut releases = Vec::with_capacity(requested.len());
    for (name, (bump_type, ids)) in requested {
        let old_version = match packages.find(name) {
            Some(package) => package.version.clone(),
            None => {
                warn!("Changeset references unknown package '{}'", name);
                UNKNOWN_PACKAGE_VERSION.to_string()
            }
        };
        let new_version = bump_type
            .apply(&semver::Version::parse(&old_version)?)
            .to_string();

        releases.push(Release {
            name: name.to_string(),
            bump_type,
            old_version,
            new_version,
            changesets: ids,
        });
    }

    Ok(ReleasePlan {
        changesets,
        releases,
        pre_state,
    })
}
