//! Authorization rules for the conference backend.
//!
//! Builds on the [`policy`] engine:
//!
//! - [`predicates`]: relationship tests such as event ownership or
//!   registration, navigating through a [`Directory`] where needed.
//! - [`capabilities`]: the capability table binding names to predicates.
//! - [`resources`]: the action enums and default action maps of every
//!   protected resource.
//! - [`Authorizer`]: one gate per resource, validated at construction.
//! - [`dispatch`]: mapping denials to 401 or 403 outcomes.
//!
//! Persistence is a collaborator: anything implementing [`Directory`] can
//! back the relationship lookups.

pub mod authorizer;
pub mod capabilities;
pub mod directory;
pub mod dispatch;
mod error;
mod ids;
pub mod model;
pub mod predicates;
pub mod resources;
mod target;
mod user;

#[cfg(test)]
mod fixtures;

pub use authorizer::{Authorizer, Declaration, Overrides};
pub use directory::{Directory, DirectoryError, DirectoryResult};
pub use dispatch::AccessError;
pub use error::{Error, Result};
pub use ids::*;
pub use resources::ResourceKind;
pub use target::{Object, Target};
pub use user::User;
