//! Policy error types.

use thiserror::Error;

/// Policy errors.
///
/// These are configuration errors. A denied request is never an error inside
/// the engine; it is a [`Decision::Deny`](crate::Decision::Deny) value.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A capability name was looked up but never registered.
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    /// The same capability name was registered twice.
    #[error("capability registered twice: {0}")]
    DuplicateCapability(String),

    /// A resource implements an action its action map does not declare.
    #[error("resource '{resource}' declares no capabilities for action '{action}'")]
    UndeclaredAction {
        resource: String,
        action: &'static str,
    },

    /// The policy configuration is invalid.
    #[error("invalid policy: {0}")]
    Invalid(String),

    /// Failed to parse a policy file.
    #[error("failed to parse policy: {0}")]
    Parse(String),

    /// An I/O error occurred while reading policy.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
