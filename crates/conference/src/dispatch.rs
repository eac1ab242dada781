//! Turning denials into caller-visible outcomes.

use crate::user::User;
use policy::{Decision, Subject};
use thiserror::Error;

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The caller is anonymous; logging in may help.
    #[error("authentication required")]
    Unauthenticated,

    /// The caller is known but lacks permission.
    #[error("forbidden: {resource}.{action}: {reason}")]
    Forbidden {
        resource: String,
        action: String,
        reason: String,
    },
}

impl AccessError {
    /// The matching HTTP status code.
    pub fn status(&self) -> u16 {
        match self {
            AccessError::Unauthenticated => 401,
            AccessError::Forbidden { .. } => 403,
        }
    }
}

/// Pass an allowed decision through; map a denial to 401 or 403 depending on
/// whether `user` is authenticated.
pub fn enforce(
    decision: Decision,
    user: &User,
    resource: &str,
    action: &str,
) -> Result<(), AccessError> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::Deny { .. } if !user.is_authenticated() => Err(AccessError::Unauthenticated),
        Decision::Deny { reason } => Err(AccessError::Forbidden {
            resource: resource.to_string(),
            action: action.to_string(),
            reason,
        }),
    }
}
