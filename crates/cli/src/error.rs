//! CLI error types.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI errors.
///
/// Denials are not errors; `check` reports them as its result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The database file does not exist.
    #[error("database not found at {path}. Run 'eventos-authz init' first")]
    DatabaseNotFound { path: PathBuf },

    #[error("no user named '{0}'")]
    UserNotFound(String),

    /// A `--target` argument that does not follow `kind:path`.
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("target not found: {0}")]
    TargetNotFound(String),

    /// A seed fixture refers to a record it does not define.
    #[error("fixture error: {0}")]
    Fixture(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The authorization configuration is invalid.
    #[error(transparent)]
    Conference(#[from] conference::Error),

    #[error(transparent)]
    Storage(#[from] storage::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
