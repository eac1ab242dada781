//! Conference records, as the directory hands them out.

use crate::ids::{
    ActivityId, ActivityRegistrationId, EventId, EventRegistrationId, ReviewId, SubmissionId,
    TrackId, UserId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub slug: String,
    pub name: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

/// A session inside an event. Activities may have their own owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub event_id: EventId,
    pub slug: String,
    pub name: String,
}

/// A call for submissions inside an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub event_id: EventId,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub track_id: TrackId,
    pub title: String,
}

/// A review of a submission, requested from `author_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub submission_id: SubmissionId,
    pub author_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub id: EventRegistrationId,
    pub event_id: EventId,
    pub user_id: UserId,
}

/// Registration to an activity, hanging off the user's event registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRegistration {
    pub id: ActivityRegistrationId,
    pub activity_id: ActivityId,
    pub event_registration_id: EventRegistrationId,
}
