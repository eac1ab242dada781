//! Loading a TOML fixture of conference records into the store.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use conference::{EventId, ReviewId, SubmissionId, UserId};
use serde::Deserialize;
use std::path::Path;
use storage::ConferenceStore;
use tracing::info;

/// A conference fixture.
///
/// ```toml
/// [[users]]
/// username = "alice"
/// capabilities = ["add_event"]
///
/// [[events]]
/// slug = "sbes"
/// name = "SBES 2020"
/// starts_on = "2020-10-19"
/// ends_on = "2020-10-23"
/// owners = ["alice"]
///
/// [[registrations]]
/// event = "sbes"
/// user = "alice"
/// activities = ["keynote"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<UserFixture>,
    #[serde(default)]
    pub events: Vec<EventFixture>,
    #[serde(default)]
    pub activities: Vec<ActivityFixture>,
    #[serde(default)]
    pub tracks: Vec<TrackFixture>,
    #[serde(default)]
    pub submissions: Vec<SubmissionFixture>,
    #[serde(default)]
    pub registrations: Vec<RegistrationFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserFixture {
    pub username: String,
    /// Coarse capability grants.
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventFixture {
    pub slug: String,
    pub name: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    #[serde(default)]
    pub owners: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityFixture {
    pub event: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub owners: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackFixture {
    pub event: String,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmissionFixture {
    pub event: String,
    pub track: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    /// Users asked to review the submission.
    #[serde(default)]
    pub reviewers: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationFixture {
    pub event: String,
    pub user: String,
    /// Activity slugs within the event to register into as well.
    #[serde(default)]
    pub activities: Vec<String>,
}

/// What a seed run created, for records addressed by id.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub users: usize,
    pub events: usize,
    pub registrations: usize,
    pub submissions: Vec<(String, SubmissionId)>,
    pub reviews: Vec<(String, String, ReviewId)>,
}

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Fixture(e.to_string()))
    }

    /// Insert every record. Stops at the first failure; records inserted
    /// before it stay.
    pub fn apply(&self, store: &ConferenceStore) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for user in &self.users {
            let id = store.add_user(&user.username)?;
            for capability in &user.capabilities {
                store.grant(id, capability)?;
            }
            report.users += 1;
        }

        for event in &self.events {
            let created =
                store.add_event(&event.slug, &event.name, event.starts_on, event.ends_on)?;
            for owner in &event.owners {
                store.add_event_owner(created.id, user(store, owner)?)?;
            }
            report.events += 1;
        }

        for activity in &self.activities {
            let event = event(store, &activity.event)?;
            let created = store.add_activity(event, &activity.slug, &activity.name)?;
            for owner in &activity.owners {
                store.add_activity_owner(created.id, user(store, owner)?)?;
            }
        }

        for track in &self.tracks {
            let event = event(store, &track.event)?;
            store.add_track(event, &track.slug, &track.name)?;
        }

        for submission in &self.submissions {
            let event = event(store, &submission.event)?;
            let track = store
                .track_by_slug(event, &submission.track)?
                .ok_or_else(|| {
                    Error::Fixture(format!(
                        "no track '{}' in event '{}'",
                        submission.track, submission.event
                    ))
                })?;
            let created = store.add_submission(track.id, &submission.title)?;
            for author in &submission.authors {
                store.add_submission_author(created.id, user(store, author)?)?;
            }
            for reviewer in &submission.reviewers {
                let review = store.add_review(created.id, user(store, reviewer)?)?;
                report
                    .reviews
                    .push((submission.title.clone(), reviewer.clone(), review.id));
            }
            report.submissions.push((submission.title.clone(), created.id));
        }

        for registration in &self.registrations {
            let event = event(store, &registration.event)?;
            let created = store.register(event, user(store, &registration.user)?)?;
            for slug in &registration.activities {
                let activity = store.activity_by_slug(event, slug)?.ok_or_else(|| {
                    Error::Fixture(format!(
                        "no activity '{slug}' in event '{}'",
                        registration.event
                    ))
                })?;
                store.register_activity(activity.id, created.id)?;
            }
            report.registrations += 1;
        }

        info!(
            users = report.users,
            events = report.events,
            registrations = report.registrations,
            "fixture applied"
        );
        Ok(report)
    }
}

fn user(store: &ConferenceStore, username: &str) -> Result<UserId> {
    store
        .user_id(username)?
        .ok_or_else(|| Error::Fixture(format!("unknown user '{username}'")))
}

fn event(store: &ConferenceStore, slug: &str) -> Result<EventId> {
    store
        .event_by_slug(slug)?
        .map(|event| event.id)
        .ok_or_else(|| Error::Fixture(format!("unknown event '{slug}'")))
}
