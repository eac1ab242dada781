//! Read-only view of the data store the predicates navigate.

use crate::ids::{ActivityId, EventId, EventRegistrationId, SubmissionId, TrackId, UserId};
use crate::model::{Activity, EventRegistration, Submission, Track};
use std::error::Error as StdError;
use thiserror::Error;

/// A lookup against the backing store failed.
#[derive(Debug, Error)]
#[error("directory lookup failed: {0}")]
pub struct DirectoryError(#[source] Box<dyn StdError + Send + Sync>);

impl DirectoryError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

/// Relationship lookups for the conference domain.
///
/// This is the boundary between authorization and persistence.
/// Implementations may block on I/O; the authorization engine never writes
/// through it. A directory is shared by every [`Target`](crate::Target) that
/// points into it, possibly across threads.
pub trait Directory: Send + Sync {
    fn is_event_owner(&self, event: EventId, user: UserId) -> DirectoryResult<bool>;

    fn is_activity_owner(&self, activity: ActivityId, user: UserId) -> DirectoryResult<bool>;

    fn is_submission_author(&self, submission: SubmissionId, user: UserId)
    -> DirectoryResult<bool>;

    /// Whether `user` holds a registration to `event`.
    fn is_registered(&self, event: EventId, user: UserId) -> DirectoryResult<bool>;

    fn activity(&self, id: ActivityId) -> DirectoryResult<Option<Activity>>;

    fn track(&self, id: TrackId) -> DirectoryResult<Option<Track>>;

    fn submission(&self, id: SubmissionId) -> DirectoryResult<Option<Submission>>;

    fn event_registration(
        &self,
        id: EventRegistrationId,
    ) -> DirectoryResult<Option<EventRegistration>>;
}
