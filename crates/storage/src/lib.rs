//! SQLite-backed storage for conference records.
//!
//! [`ConferenceStore`] persists users and their coarse capability grants,
//! events, activities, tracks, submissions, reviews and registrations. It
//! implements [`conference::Directory`], so a store behind an `Arc` can back
//! the relationship lookups of the authorization predicates.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use conference::resources::EventAction;
//! use conference::{Authorizer, Target};
//! use std::sync::Arc;
//! use storage::ConferenceStore;
//!
//! let store = Arc::new(ConferenceStore::open("eventos.db")?);
//! let alice = store.add_user("alice")?;
//! let day = NaiveDate::from_ymd_opt(2020, 10, 1).unwrap();
//! let event = store.add_event("sbes", "SBES", day, day)?;
//! store.add_event_owner(event.id, alice)?;
//!
//! let authz = Authorizer::new()?;
//! let target = Target::new(event, store.clone());
//! assert!(authz.event().check_object(EventAction::Update, &store.load_user("alice")?, &target));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod directory;
mod error;
mod store;

pub use error::{Error, Result};
pub use store::ConferenceStore;
