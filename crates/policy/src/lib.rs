//! Object-level authorization engine.
//!
//! Core principle: **every action names the capabilities it needs, and every
//! capability is a predicate over the acting subject and the target object.**
//!
//! # Overview
//!
//! - [`Predicate`]: a named, pure `(subject, target) -> bool` test, either
//!   [`Scope::Global`] or [`Scope::Object`]. Compose with [`and`], [`or`] and
//!   [`not`].
//! - [`Registry`]: the capability name → predicate table, built once at
//!   startup through [`RegistryBuilder`] and read-only afterwards.
//! - [`Resolver`]: checks one capability for a subject, against a target
//!   when one is known and against the subject's coarse grants otherwise.
//! - [`ActionMap`]: per-resource declaration of what each [`Action`]
//!   requires ([`CapabilitySpec`]).
//! - [`Gate`]: the enforcement point combining an action map with a resolver.
//!
//! # Example
//!
//! ```
//! use policy::{Action, ActionMap, CapabilitySpec, Gate, Predicate, Registry, Subject};
//! use std::sync::Arc;
//!
//! struct Member { id: u32 }
//! impl Subject for Member {
//!     fn is_authenticated(&self) -> bool { true }
//! }
//!
//! struct Board { owner: u32 }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum BoardAction { Update }
//! impl Action for BoardAction {
//!     const ALL: &'static [Self] = &[Self::Update];
//!     fn name(self) -> &'static str { "update" }
//! }
//!
//! let registry = Registry::builder()
//!     .register(
//!         "change_board",
//!         Some(Predicate::object("is_owner", |m: &Member, b: &Board| m.id == b.owner)),
//!     )?
//!     .build();
//!
//! let actions = ActionMap::new()
//!     .with(BoardAction::Update, CapabilitySpec::require(["change_board"]));
//! let gate = Gate::new("board", actions, Arc::new(registry))?;
//!
//! let board = Board { owner: 1 };
//! assert!(gate.check_object(BoardAction::Update, &Member { id: 1 }, &board));
//! assert!(!gate.check_object(BoardAction::Update, &Member { id: 2 }, &board));
//! # Ok::<(), policy::Error>(())
//! ```

mod action;
mod combinator;
mod error;
mod gate;
mod predicate;
mod registry;
mod resolver;
mod subject;

pub use action::{Action, ActionMap, CapabilitySpec, METADATA, Operation};
pub use combinator::{and, not, or};
pub use error::{Error, Result};
pub use gate::{Decision, Gate};
pub use predicate::{Predicate, Scope, granted, is_authenticated};
pub use registry::{Registry, RegistryBuilder};
pub use resolver::Resolver;
pub use subject::Subject;
