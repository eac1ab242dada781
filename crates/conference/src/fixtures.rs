//! In-memory directory and a small populated conference for tests.

use crate::directory::{Directory, DirectoryError, DirectoryResult};
use crate::ids::*;
use crate::model::*;
use crate::target::{Object, Target};
use crate::user::User;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Default)]
pub struct MemoryDirectory {
    pub event_owners: HashSet<(EventId, UserId)>,
    pub activity_owners: HashSet<(ActivityId, UserId)>,
    pub submission_authors: HashSet<(SubmissionId, UserId)>,
    pub registrations: HashMap<EventRegistrationId, EventRegistration>,
    pub activities: HashMap<ActivityId, Activity>,
    pub tracks: HashMap<TrackId, Track>,
    pub submissions: HashMap<SubmissionId, Submission>,
}

impl Directory for MemoryDirectory {
    fn is_event_owner(&self, event: EventId, user: UserId) -> DirectoryResult<bool> {
        Ok(self.event_owners.contains(&(event, user)))
    }

    fn is_activity_owner(&self, activity: ActivityId, user: UserId) -> DirectoryResult<bool> {
        Ok(self.activity_owners.contains(&(activity, user)))
    }

    fn is_submission_author(
        &self,
        submission: SubmissionId,
        user: UserId,
    ) -> DirectoryResult<bool> {
        Ok(self.submission_authors.contains(&(submission, user)))
    }

    fn is_registered(&self, event: EventId, user: UserId) -> DirectoryResult<bool> {
        Ok(self
            .registrations
            .values()
            .any(|r| r.event_id == event && r.user_id == user))
    }

    fn activity(&self, id: ActivityId) -> DirectoryResult<Option<Activity>> {
        Ok(self.activities.get(&id).cloned())
    }

    fn track(&self, id: TrackId) -> DirectoryResult<Option<Track>> {
        Ok(self.tracks.get(&id).cloned())
    }

    fn submission(&self, id: SubmissionId) -> DirectoryResult<Option<Submission>> {
        Ok(self.submissions.get(&id).cloned())
    }

    fn event_registration(
        &self,
        id: EventRegistrationId,
    ) -> DirectoryResult<Option<EventRegistration>> {
        Ok(self.registrations.get(&id).cloned())
    }
}

/// A directory whose every lookup fails.
pub struct BrokenDirectory;

impl BrokenDirectory {
    fn fail<T>() -> DirectoryResult<T> {
        Err(DirectoryError::new("connection reset"))
    }
}

impl Directory for BrokenDirectory {
    fn is_event_owner(&self, _: EventId, _: UserId) -> DirectoryResult<bool> {
        Self::fail()
    }

    fn is_activity_owner(&self, _: ActivityId, _: UserId) -> DirectoryResult<bool> {
        Self::fail()
    }

    fn is_submission_author(&self, _: SubmissionId, _: UserId) -> DirectoryResult<bool> {
        Self::fail()
    }

    fn is_registered(&self, _: EventId, _: UserId) -> DirectoryResult<bool> {
        Self::fail()
    }

    fn activity(&self, _: ActivityId) -> DirectoryResult<Option<Activity>> {
        Self::fail()
    }

    fn track(&self, _: TrackId) -> DirectoryResult<Option<Track>> {
        Self::fail()
    }

    fn submission(&self, _: SubmissionId) -> DirectoryResult<Option<Submission>> {
        Self::fail()
    }

    fn event_registration(
        &self,
        _: EventRegistrationId,
    ) -> DirectoryResult<Option<EventRegistration>> {
        Self::fail()
    }
}

/// Two events. The first has one activity, one track with one reviewed
/// submission, and one attendee registered to the activity.
pub struct World {
    pub directory: Arc<MemoryDirectory>,
    pub owner: UserId,
    pub activity_owner: UserId,
    pub author: UserId,
    pub reviewer: UserId,
    pub attendee: UserId,
    pub outsider: UserId,
    pub event: Event,
    pub other_event: Event,
    pub activity: Activity,
    pub track: Track,
    pub submission: Submission,
    pub review: Review,
    pub event_registration: EventRegistration,
    pub other_registration: EventRegistration,
    pub activity_registration: ActivityRegistration,
}

fn sample_event(slug: &str) -> Event {
    Event {
        id: EventId::new(),
        slug: slug.to_string(),
        name: slug.to_uppercase(),
        starts_on: NaiveDate::from_ymd_opt(2020, 10, 1).unwrap(),
        ends_on: NaiveDate::from_ymd_opt(2020, 10, 3).unwrap(),
    }
}

impl World {
    pub fn new() -> Self {
        let owner = UserId::new();
        let activity_owner = UserId::new();
        let author = UserId::new();
        let reviewer = UserId::new();
        let attendee = UserId::new();
        let outsider = UserId::new();

        let event = sample_event("sbes");
        let other_event = sample_event("cbsoft");
        let activity = Activity {
            id: ActivityId::new(),
            event_id: event.id,
            slug: "keynote".into(),
            name: "Keynote".into(),
        };
        let track = Track {
            id: TrackId::new(),
            event_id: event.id,
            slug: "research".into(),
            name: "Research".into(),
        };
        let submission = Submission {
            id: SubmissionId::new(),
            track_id: track.id,
            title: "On Predicates".into(),
        };
        let review = Review {
            id: ReviewId::new(),
            submission_id: submission.id,
            author_id: reviewer,
        };
        let event_registration = EventRegistration {
            id: EventRegistrationId::new(),
            event_id: event.id,
            user_id: attendee,
        };
        let other_registration = EventRegistration {
            id: EventRegistrationId::new(),
            event_id: other_event.id,
            user_id: outsider,
        };
        let activity_registration = ActivityRegistration {
            id: ActivityRegistrationId::new(),
            activity_id: activity.id,
            event_registration_id: event_registration.id,
        };

        let mut directory = MemoryDirectory::default();
        directory.event_owners.insert((event.id, owner));
        directory.activity_owners.insert((activity.id, activity_owner));
        directory.submission_authors.insert((submission.id, author));
        directory
            .registrations
            .insert(event_registration.id, event_registration.clone());
        directory
            .registrations
            .insert(other_registration.id, other_registration.clone());
        directory.activities.insert(activity.id, activity.clone());
        directory.tracks.insert(track.id, track.clone());
        directory.submissions.insert(submission.id, submission.clone());

        Self {
            directory: Arc::new(directory),
            owner,
            activity_owner,
            author,
            reviewer,
            attendee,
            outsider,
            event,
            other_event,
            activity,
            track,
            submission,
            review,
            event_registration,
            other_registration,
            activity_registration,
        }
    }

    pub fn target(&self, object: impl Into<Object>) -> Target {
        Target::new(object, self.directory.clone())
    }

    pub fn user(&self, id: UserId) -> User {
        User::authenticated(id, id.to_string())
    }
}

pub fn broken(object: impl Into<Object>) -> Target {
    Target::new(object, Arc::new(BrokenDirectory))
}
