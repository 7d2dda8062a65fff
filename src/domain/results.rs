use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::PathBuf;

/// Options read from the CI platform at the start of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub repository_root_path: PathBuf,
    pub repository_base_branch: String,
}

/// Package name to new version, in first-insertion order
///
/// Inserting a name that is already present replaces its version in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionMap {
    entries: Vec<(String, String)>,
}

impl VersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the version for `name`
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        let name = name.into();
        let version = version.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = version,
            None => self.entries.push((name, version)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, version)| version.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, version)| (name.as_str(), version.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for VersionMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = VersionMap::new();
        for (name, version) in iter {
            map.insert(name, version);
        }
        map
    }
}

impl Serialize for VersionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, version) in &self.entries {
            map.serialize_entry(name, version)?;
        }
        map.end()
    }
}

/// Everything a run computes, handed to the CI output adapter in one piece
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckResults {
    pub packages_affected_by_release_plan: Vec<String>,
    pub changed_packages: Vec<String>,
    pub changed_packages_without_changeset: Vec<String>,
    pub packages_versions_after_applying_release_plan: VersionMap,
}

impl CheckResults {
    /// True when no changed package is missing a changeset
    pub fn all_changed_packages_have_changeset(&self) -> bool {
        self.changed_packages_without_changeset.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_map_last_write_wins_keeps_position() {
        let mut map = VersionMap::new();
        map.insert("a", "1.0.0");
        map.insert("b", "2.0.0");
        map.insert("a", "1.1.0");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some("1.1.0"));
        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_version_map_serializes_as_object() {
        let map: VersionMap = vec![("z", "1.0.0"), ("a", "0.1.0")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"z":"1.0.0","a":"0.1.0"}"#);
    }

    #[test]
    fn test_all_changed_packages_have_changeset() {
        let mut results = CheckResults::default();
        assert!(results.all_changed_packages_have_changeset());

        results.changed_packages_without_changeset.push("c".to_string());
        assert!(!results.all_changed_packages_have_changeset());
    }
}
