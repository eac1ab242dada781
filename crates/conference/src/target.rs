//! Objects under authorization, and how to walk from them to related records.

use crate::directory::{Directory, DirectoryResult};
use crate::ids::{ActivityId, EventId, SubmissionId, UserId};
use crate::model::{
    Activity, ActivityRegistration, Event, EventRegistration, Review, Submission, Track,
};
use std::fmt;
use std::sync::Arc;

/// A fetched domain object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Event(Event),
    Activity(Activity),
    Track(Track),
    Submission(Submission),
    Review(Review),
    EventRegistration(EventRegistration),
    ActivityRegistration(ActivityRegistration),
    /// Another user account, for self-service actions.
    User(UserId),
}

impl Object {
    pub fn kind(&self) -> &'static str {
        match self {
            Object::Event(_) => "event",
            Object::Activity(_) => "activity",
            Object::Track(_) => "track",
            Object::Submission(_) => "submission",
            Object::Review(_) => "review",
            Object::EventRegistration(_) => "event_registration",
            Object::ActivityRegistration(_) => "activity_registration",
            Object::User(_) => "user",
        }
    }
}

macro_rules! impl_from_record {
    ($($record:ident),+) => {
        $(
            impl From<$record> for Object {
                fn from(record: $record) -> Self {
                    Object::$record(record)
                }
            }
        )+
    };
}

impl_from_record!(
    Event,
    Activity,
    Track,
    Submission,
    Review,
    EventRegistration,
    ActivityRegistration
);

impl From<UserId> for Object {
    fn from(id: UserId) -> Self {
        Object::User(id)
    }
}

/// An object together with the directory used to resolve its relationships.
///
/// Predicates receive a `Target` so they can navigate from the object to the
/// record they actually test (for example from a registration to its event)
/// without holding a store of their own.
#[derive(Clone)]
pub struct Target {
    object: Object,
    directory: Arc<dyn Directory>,
}

impl Target {
    pub fn new(object: impl Into<Object>, directory: Arc<dyn Directory>) -> Self {
        Self {
            object: object.into(),
            directory,
        }
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn directory(&self) -> &dyn Directory {
        self.directory.as_ref()
    }

    /// The event the object belongs to.
    ///
    /// - event: itself
    /// - activity, track, event registration: their `event_id`
    /// - submission: through its track
    /// - review: through its submission, then the submission's track
    /// - activity registration: through its activity
    /// - user: none
    ///
    /// A dangling reference on the way resolves to `None`.
    pub fn event_id(&self) -> DirectoryResult<Option<EventId>> {
        match &self.object {
            Object::Event(event) => Ok(Some(event.id)),
            Object::Activity(activity) => Ok(Some(activity.event_id)),
            Object::Track(track) => Ok(Some(track.event_id)),
            Object::EventRegistration(registration) => Ok(Some(registration.event_id)),
            Object::Submission(submission) => self.event_of_submission(submission.id),
            Object::Review(review) => self.event_of_submission(review.submission_id),
            Object::ActivityRegistration(registration) => Ok(self
                .directory
                .activity(registration.activity_id)?
                .map(|activity| activity.event_id)),
            Object::User(_) => Ok(None),
        }
    }

    /// The activity the object is, or is a registration to.
    pub fn activity_id(&self) -> Option<ActivityId> {
        match &self.object {
            Object::Activity(activity) => Some(activity.id),
            Object::ActivityRegistration(registration) => Some(registration.activity_id),
            _ => None,
        }
    }

    /// The submission itself. Other objects do not resolve to a submission.
    pub fn submission_id(&self) -> Option<SubmissionId> {
        match &self.object {
            Object::Submission(submission) => Some(submission.id),
            _ => None,
        }
    }

    /// The user a registration belongs to.
    ///
    /// - event registration: its `user_id`
    /// - activity registration: through its event registration
    /// - anything else: none
    pub fn registrant(&self) -> DirectoryResult<Option<UserId>> {
        match &self.object {
            Object::EventRegistration(registration) => Ok(Some(registration.user_id)),
            Object::ActivityRegistration(registration) => Ok(self
                .directory
                .event_registration(registration.event_registration_id)?
                .map(|registration| registration.user_id)),
            _ => Ok(None),
        }
    }

    fn event_of_submission(&self, id: SubmissionId) -> DirectoryResult<Option<EventId>> {
        let Some(submission) = self.directory.submission(id)? else {
            return Ok(None);
        };
        Ok(self
            .directory
            .track(submission.track_id)?
            .map(|track| track.event_id))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target").field(&self.object).finish()
    }
}
