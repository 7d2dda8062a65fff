use crate::error::{ChangesetCheckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of version increment requested for a package
///
/// Variants are declared in ascending order of significance so that the
/// derived `Ord` picks the strongest bump with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    None,
    Patch,
    Minor,
    Major,
}

impl BumpType {
    /// Apply this bump to a semantic version
    ///
    /// Any bump other than `None` clears pre-release and build metadata.
    pub fn apply(&self, version: &semver::Version) -> semver::Version {
        let mut next = version.clone();
        match self {
            BumpType::None => return next,
            BumpType::Major => {
                next.major += 1;
                next.minor = 0;
                next.patch = 0;
            }
            BumpType::Minor => {
                next.minor += 1;
                next.patch = 0;
            }
            BumpType::Patch => {
                next.patch += 1;
            }
        }
        next.pre = semver::Prerelease::EMPTY;
        next.build = semver::BuildMetadata::EMPTY;
        next
    }
}

impl FromStr for BumpType {
    type Err = ChangesetCheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpType::Major),
            "minor" => Ok(BumpType::Minor),
            "patch" => Ok(BumpType::Patch),
            "none" => Ok(BumpType::None),
            other => Err(ChangesetCheckError::changeset(format!(
                "Unknown bump type: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BumpType::None => "none",
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        };
        f.write_str(s)
    }
}

/// One package entry in a changeset's frontmatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetRelease {
    pub name: String,
    pub bump_type: BumpType,
}

/// A single recorded intent to bump one or more packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    /// File stem of the changeset markdown file
    pub id: String,
    pub summary: String,
    pub releases: Vec<ChangesetRelease>,
}

/// A proposed version increment for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub bump_type: BumpType,
    pub old_version: String,
    pub new_version: String,
    /// Ids of the changesets contributing to this release
    pub changesets: Vec<String>,
}

impl Release {
    /// Create a release with no contributing changesets
    pub fn new(
        name: impl Into<String>,
        bump_type: BumpType,
        old_version: impl Into<String>,
        new_version: impl Into<String>,
    ) -> Self {
        Release {
            name: name.into(),
            bump_type,
            old_version: old_version.into(),
            new_version: new_version.into(),
            changesets: Vec::new(),
        }
    }
}

/// Whether the repository is in or leaving pre-release mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreMode {
    Pre,
    Exit,
}

/// Contents of `pre.json` in the changeset directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreState {
    pub mode: PreMode,
    pub tag: String,
    #[serde(default)]
    pub initial_versions: BTreeMap<String, String>,
    #[serde(default)]
    pub changesets: Vec<String>,
}

/// Ordered releases derived from pending changesets
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleasePlan {
    pub changesets: Vec<Changeset>,
    pub releases: Vec<Release>,
    pub pre_state: Option<PreState>,
}

impl ReleasePlan {
    /// Build a plan from releases alone
    pub fn from_releases(releases: Vec<Release>) -> Self {
        ReleasePlan {
            changesets: Vec::new(),
            releases,
            pre_state: None,
        }
    }
}
