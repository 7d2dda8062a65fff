use thiserror::Error;

/// Unified error type for changeset-check operations
#[derive(Error, Debug)]
pub enum ChangesetCheckError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid semantic version: {0}")]
    Semver(#[from] semver::Error),

    #[error("Invalid workspace pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Changeset error: {0}")]
    Changeset(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Reference error: {0}")]
    Reference(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Output error: {0}")]
    Output(String),
}

/// Convenience type alias for Results in changeset-check
pub type Result<T> = std::result::Result<T, ChangesetCheckError>;

impl ChangesetCheckError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangesetCheckError::Config(msg.into())
    }

    /// Create a changeset parsing error with context
    pub fn changeset(msg: impl Into<String>) -> Self {
        ChangesetCheckError::Changeset(msg.into())
    }

    /// Create a package manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ChangesetCheckError::Manifest(msg.into())
    }

    /// Create a git reference error with context
    pub fn reference(msg: impl Into<String>) -> Self {
        ChangesetCheckError::Reference(msg.into())
    }

    /// Create a CI input error with context
    pub fn input(msg: impl Into<String>) -> Self {
        ChangesetCheckError::Input(msg.into())
    }

    /// Create a CI output error with context
    pub fn output(msg: impl Into<String>) -> Self {
        ChangesetCheckError::Output(msg.into())
    }
}
