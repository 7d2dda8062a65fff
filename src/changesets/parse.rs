use crate::domain::{BumpType, Changeset, ChangesetRelease};
use crate::error::{ChangesetCheckError, Result};
use std::collections::BTreeMap;

const FRONTMATTER_FENCE: &str = "---";

/// Parse a changeset markdown file
///
/// The file starts with a `---` fenced YAML frontmatter mapping package
/// names to bump types, followed by a free-form summary.
///
/// # Arguments
/// * `id` - Changeset id (the file stem)
/// * `content` - Raw file content
///
/// # Returns
/// * `Ok(Changeset)` - Parsed changeset, releases ordered by package name;
///   an empty frontmatter yields no releases
/// * `Err` - If the frontmatter is missing, unterminated or not a mapping of
///   package names to bump types
pub fn parse_changeset(id: &str, content: &str) -> Result<Changeset> {
    let content = content.replace("\r\n", "\n");
    let body = content
        .trim_start()
        .strip_prefix(FRONTMATTER_FENCE)
        .ok_or_else(|| {
            ChangesetCheckError::changeset(format!("'{}' does not start with frontmatter", id))
        })?;

    let closing = format!("\n{}", FRONTMATTER_FENCE);
    let end = body.find(&closing).ok_or_else(|| {
        ChangesetCheckError::changeset(format!("'{}' has unterminated frontmatter", id))
    })?;

    let frontmatter = &body[..end];
    let summary = body[end + closing.len()..].trim().to_string();

    let invalid = |e: serde_yaml::Error| {
        ChangesetCheckError::changeset(format!("'{}' has invalid frontmatter: {}", id, e))
    };
    // Blank or comment-only frontmatter is a null document.
    let document: serde_yaml::Value = serde_yaml::from_str(frontmatter).map_err(invalid)?;
    let entries: BTreeMap<String, BumpType> = if document.is_null() {
        BTreeMap::new()
    } else {
        serde_yaml::from_value(document).map_err(invalid)?
    };

    let releases = entries
        .into_iter()
        .map(|(name, bump_type)| ChangesetRelease { name, bump_type })
        .collect();

    Ok(Changeset {
        id: id.to_string(),
        summary,
        releases,
    })
}
