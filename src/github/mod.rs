//! CI platform adapter
//!
//! The [ActionsPlatform] trait is the only way the check talks to its CI
//! environment: reading inputs, writing log lines, publishing step outputs
//! and the run summary. Implementations:
//!
//! - [actions::GithubActions]: GitHub Actions workflow commands and file commands
//! - [terminal::TerminalPlatform]: coloured output for local runs
//! - [mock::RecordingPlatform]: records every call for testing

pub mod actions;
pub mod mock;
pub mod summary;
pub mod terminal;

pub use actions::GithubActions;
pub use mock::RecordingPlatform;
pub use summary::Summary;
pub use terminal::TerminalPlatform;

use crate::config::SummaryConfig;
use crate::domain::{CheckOptions, CheckResults, VersionMap};
use crate::error::{ChangesetCheckError, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

pub const INPUT_REPOSITORY_PATH: &str = "repository_path";
pub const INPUT_BASE_BRANCH: &str = "base_branch";

pub const OUTPUT_PACKAGES_AFFECTED: &str = "packages_affected_by_release_plan";
pub const OUTPUT_CHANGED_PACKAGES: &str = "changed_packages";
pub const OUTPUT_CHANGED_WITHOUT_CHANGESET: &str = "changed_packages_without_changeset";
pub const OUTPUT_ALL_HAVE_CHANGESET: &str = "all_changed_packages_have_changeset";
pub const OUTPUT_VERSIONS: &str = "packages_versions_after_applying_release_plan";

const DEFAULT_REPOSITORY_PATH: &str = ".";

/// A value published as a step output
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    List(Vec<String>),
    Flag(bool),
    Map(VersionMap),
}

impl OutputValue {
    /// Render the value the way step outputs carry it
    ///
    /// Every value is JSON encoded.
    pub fn to_command_value(&self) -> Result<String> {
        let value = match self {
            OutputValue::List(items) => serde_json::to_string(items)?,
            OutputValue::Flag(flag) => serde_json::to_string(flag)?,
            OutputValue::Map(map) => serde_json::to_string(map)?,
        };
        Ok(value)
    }
}

/// Operations the check needs from its CI platform
pub trait ActionsPlatform {
    /// Value of a named input, or an empty string if it is not set
    fn get_input(&self, name: &str) -> Result<String>;

    /// Write an informational log line
    fn info(&mut self, message: &str) -> Result<()>;

    /// Write a warning annotation
    fn warning(&mut self, message: &str) -> Result<()>;

    /// Publish a step output
    fn set_output(&mut self, name: &str, value: &OutputValue) -> Result<()>;

    /// Append to the run summary
    fn write_summary(&mut self, summary: &Summary) -> Result<()>;
}

/// Read a GitHub-style input from the environment
///
/// `base branch` is looked up as `INPUT_BASE_BRANCH`; the value is trimmed.
pub(crate) fn input_from_env(overrides: &HashMap<String, String>, name: &str) -> String {
    if let Some(value) = overrides.get(name) {
        return value.trim().to_string();
    }
    let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    std::env::var(key)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Read the run options from the platform inputs
///
/// An empty `repository_path` means the current directory; `base_branch`
/// is required.
pub fn get_options_from_input<P: ActionsPlatform + ?Sized>(platform: &P) -> Result<CheckOptions> {
    let repository_path = platform.get_input(INPUT_REPOSITORY_PATH)?;
    let base_branch = platform.get_input(INPUT_BASE_BRANCH)?;

    if base_branch.is_empty() {
        return Err(ChangesetCheckError::input(format!(
            "Input required and not supplied: {}",
            INPUT_BASE_BRANCH
        )));
    }

    let repository_path = if repository_path.is_empty() {
        DEFAULT_REPOSITORY_PATH.to_string()
    } else {
        repository_path
    };

    Ok(CheckOptions {
        repository_root_path: PathBuf::from(repository_path),
        repository_base_branch: base_branch,
    })
}

/// Build the "changed packages" summary table
///
/// Rows are the union of affected and changed package names, sorted, with
/// the planned version or the missing-changeset label.
pub fn changed_packages_summary(results: &CheckResults, config: &SummaryConfig) -> Summary {
    let all_packages: BTreeSet<&str> = results
        .packages_affected_by_release_plan
        .iter()
        .chain(results.changed_packages.iter())
        .map(String::as_str)
        .collect();

    let rows = all_packages
        .into_iter()
        .map(|name| {
            let version = results
                .packages_versions_after_applying_release_plan
                .get(name)
                .filter(|version| !version.is_empty())
                .unwrap_or(config.missing_changeset_label.as_str());
            vec![name.to_string(), version.to_string()]
        })
        .collect();

    Summary::new(&config.heading, vec!["Package".to_string(), "New version".to_string()], rows)
}

/// Publish the results as log lines, step outputs and the run summary
pub fn set_output_from_results<P: ActionsPlatform + ?Sized>(
    platform: &mut P,
    results: &CheckResults,
    summary_config: &SummaryConfig,
) -> Result<()> {
    platform.info(&format!(
        "Packages affected by release plan: {}",
        results.packages_affected_by_release_plan.join(",")
    ))?;
    platform.set_output(
        OUTPUT_PACKAGES_AFFECTED,
        &OutputValue::List(results.packages_affected_by_release_plan.clone()),
    )?;

    platform.info(&format!(
        "Changed packages: {}",
        results.changed_packages.join(",")
    ))?;
    platform.set_output(
        OUTPUT_CHANGED_PACKAGES,
        &OutputValue::List(results.changed_packages.clone()),
    )?;

    platform.info(&format!(
        "Changed packages without changeset: {}",
        results.changed_packages_without_changeset.join(",")
    ))?;
    platform.set_output(
        OUTPUT_CHANGED_WITHOUT_CHANGESET,
        &OutputValue::List(results.changed_packages_without_changeset.clone()),
    )?;

    let all_changed_packages_have_changeset = results.all_changed_packages_have_changeset();
    if !all_changed_packages_have_changeset {
        platform.warning("There are changed packages without changeset")?;
    }
    platform.set_output(
        OUTPUT_ALL_HAVE_CHANGESET,
        &OutputValue::Flag(all_changed_packages_have_changeset),
    )?;

    let versions = &results.packages_versions_after_applying_release_plan;
    platform.set_output(OUTPUT_VERSIONS, &OutputValue::Map(versions.clone()))?;

    let version_list: Vec<String> = versions
        .iter()
        .map(|(name, version)| format!("{}@{}", name, version))
        .collect();
    platform.info(&format!(
        "Packages versions after applying release plan: {}",
        version_list.join(",")
    ))?;

    if summary_config.enabled {
        platform.write_summary(&changed_packages_summary(results, summary_config))?;
    }

    Ok(())
}
