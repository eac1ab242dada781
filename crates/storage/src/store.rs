//! SQLite conference store implementation.

use crate::{Error, Result};
use chrono::NaiveDate;
use conference::model::{
    Activity, ActivityRegistration, Event, EventRegistration, Review, Submission, Track,
};
use conference::{
    ActivityId, ActivityRegistrationId, EventId, EventRegistrationId, ReviewId, SubmissionId,
    TrackId, User, UserId,
};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// SQLite-backed conference store.
///
/// The connection sits behind a mutex so a store can be shared across
/// threads inside a [`conference::Target`].
pub struct ConferenceStore {
    conn: Mutex<Connection>,
}

impl ConferenceStore {
    /// Open or create a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::Poisoned)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn()?.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS user_capabilities (
                user_id TEXT NOT NULL REFERENCES users(id),
                capability TEXT NOT NULL,
                PRIMARY KEY (user_id, capability)
            );

            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                starts_on TEXT NOT NULL,
                ends_on TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS event_owners (
                event_id TEXT NOT NULL REFERENCES events(id),
                user_id TEXT NOT NULL REFERENCES users(id),
                PRIMARY KEY (event_id, user_id)
            );

            CREATE TABLE IF NOT EXISTS activities (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL REFERENCES events(id),
                slug TEXT NOT NULL,
                name TEXT NOT NULL,
                UNIQUE (event_id, slug)
            );
            CREATE TABLE IF NOT EXISTS activity_owners (
                activity_id TEXT NOT NULL REFERENCES activities(id),
                user_id TEXT NOT NULL REFERENCES users(id),
                PRIMARY KEY (activity_id, user_id)
            );

            CREATE TABLE IF NOT EXISTS tracks (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL REFERENCES events(id),
                slug TEXT NOT NULL,
                name TEXT NOT NULL,
                UNIQUE (event_id, slug)
            );

            CREATE TABLE IF NOT EXISTS submissions (
                id TEXT PRIMARY KEY,
                track_id TEXT NOT NULL REFERENCES tracks(id),
                title TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS submission_authors (
                submission_id TEXT NOT NULL REFERENCES submissions(id),
                user_id TEXT NOT NULL REFERENCES users(id),
                PRIMARY KEY (submission_id, user_id)
            );

            CREATE TABLE IF NOT EXISTS reviews (
                id TEXT PRIMARY KEY,
                submission_id TEXT NOT NULL REFERENCES submissions(id),
                author_id TEXT NOT NULL REFERENCES users(id)
            );

            CREATE TABLE IF NOT EXISTS event_registrations (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL REFERENCES events(id),
                user_id TEXT NOT NULL REFERENCES users(id),
                UNIQUE (event_id, user_id)
            );
            CREATE TABLE IF NOT EXISTS activity_registrations (
                id TEXT PRIMARY KEY,
                activity_id TEXT NOT NULL REFERENCES activities(id),
                event_registration_id TEXT NOT NULL REFERENCES event_registrations(id),
                UNIQUE (activity_id, event_registration_id)
            );
            "#,
        )?;
        Ok(())
    }

    // Users

    pub fn add_user(&self, username: &str) -> Result<UserId> {
        let id = UserId::new();
        self.conn()?.execute(
            "INSERT INTO users (id, username) VALUES (?1, ?2)",
            params![id.to_string(), username],
        )?;
        debug!(%id, username, "user added");
        Ok(id)
    }

    /// Grant a coarse capability to a user.
    pub fn grant(&self, user: UserId, capability: &str) -> Result<()> {
        self.conn()?.execute(
            "INSERT OR IGNORE INTO user_capabilities (user_id, capability) VALUES (?1, ?2)",
            params![user.to_string(), capability],
        )?;
        Ok(())
    }

    pub fn user_id(&self, username: &str) -> Result<Option<UserId>> {
        let id: Option<String> = self
            .conn()?
            .query_row(
                "SELECT id FROM users WHERE username = ?1",
                [username],
                |row| row.get(0),
            )
            .optional()?;
        id.map(|id| parse("users.id", &id)).transpose()
    }

    /// Load an authenticated user with their coarse capability set.
    pub fn load_user(&self, username: &str) -> Result<User> {
        let id = self
            .user_id(username)?
            .ok_or_else(|| Error::NotFound(format!("user '{username}'")))?;

        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT capability FROM user_capabilities WHERE user_id = ?1")?;
        let capabilities = stmt
            .query_map([id.to_string()], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;

        Ok(User::authenticated(id, username).with_coarse_capabilities(capabilities))
    }

    // Events

    pub fn add_event(
        &self,
        slug: &str,
        name: &str,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> Result<Event> {
        let event = Event {
            id: EventId::new(),
            slug: slug.to_string(),
            name: name.to_string(),
            starts_on,
            ends_on,
        };
        self.conn()?.execute(
            "INSERT INTO events (id, slug, name, starts_on, ends_on) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id.to_string(),
                event.slug,
                event.name,
                event.starts_on.to_string(),
                event.ends_on.to_string(),
            ],
        )?;
        Ok(event)
    }

    pub fn add_event_owner(&self, event: EventId, user: UserId) -> Result<()> {
        self.conn()?.execute(
            "INSERT OR IGNORE INTO event_owners (event_id, user_id) VALUES (?1, ?2)",
            params![event.to_string(), user.to_string()],
        )?;
        Ok(())
    }

    pub fn event(&self, id: EventId) -> Result<Option<Event>> {
        self.query_event("id", &id.to_string())
    }

    pub fn event_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        self.query_event("slug", slug)
    }

    fn query_event(&self, column: &str, value: &str) -> Result<Option<Event>> {
        let sql =
            format!("SELECT id, slug, name, starts_on, ends_on FROM events WHERE {column} = ?1");
        let row = self
            .conn()?
            .query_row(&sql, [value], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .optional()?;

        row.map(|(id, slug, name, starts_on, ends_on)| {
            Ok(Event {
                id: parse("events.id", &id)?,
                slug,
                name,
                starts_on: parse("events.starts_on", &starts_on)?,
                ends_on: parse("events.ends_on", &ends_on)?,
            })
        })
        .transpose()
    }

    pub fn is_event_owner(&self, event: EventId, user: UserId) -> Result<bool> {
        self.exists(
            "SELECT 1 FROM event_owners WHERE event_id = ?1 AND user_id = ?2",
            &event.to_string(),
            &user.to_string(),
        )
    }

    // Activities

    pub fn add_activity(&self, event: EventId, slug: &str, name: &str) -> Result<Activity> {
        let activity = Activity {
            id: ActivityId::new(),
            event_id: event,
            slug: slug.to_string(),
            name: name.to_string(),
        };
        self.conn()?.execute(
            "INSERT INTO activities (id, event_id, slug, name) VALUES (?1, ?2, ?3, ?4)",
            params![
                activity.id.to_string(),
                event.to_string(),
                activity.slug,
                activity.name,
            ],
        )?;
        Ok(activity)
    }

    pub fn add_activity_owner(&self, activity: ActivityId, user: UserId) -> Result<()> {
        self.conn()?.execute(
            "INSERT OR IGNORE INTO activity_owners (activity_id, user_id) VALUES (?1, ?2)",
            params![activity.to_string(), user.to_string()],
        )?;
        Ok(())
    }

    pub fn activity(&self, id: ActivityId) -> Result<Option<Activity>> {
        self.query_activity("id = ?1", &[&id.to_string()])
    }

    pub fn activity_by_slug(&self, event: EventId, slug: &str) -> Result<Option<Activity>> {
        self.query_activity("event_id = ?1 AND slug = ?2", &[&event.to_string(), slug])
    }

    fn query_activity(&self, filter: &str, values: &[&str]) -> Result<Option<Activity>> {
        let sql = format!("SELECT id, event_id, slug, name FROM activities WHERE {filter}");
        let row = self
            .conn()?
            .query_row(&sql, rusqlite::params_from_iter(values), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .optional()?;

        row.map(|(id, event_id, slug, name)| {
            Ok(Activity {
                id: parse("activities.id", &id)?,
                event_id: parse("activities.event_id", &event_id)?,
                slug,
                name,
            })
        })
        .transpose()
    }

    pub fn is_activity_owner(&self, activity: ActivityId, user: UserId) -> Result<bool> {
        self.exists(
            "SELECT 1 FROM activity_owners WHERE activity_id = ?1 AND user_id = ?2",
            &activity.to_string(),
            &user.to_string(),
        )
    }

    // Tracks

    pub fn add_track(&self, event: EventId, slug: &str, name: &str) -> Result<Track> {
        let track = Track {
            id: TrackId::new(),
            event_id: event,
            slug: slug.to_string(),
            name: name.to_string(),
        };
        self.conn()?.execute(
            "INSERT INTO tracks (id, event_id, slug, name) VALUES (?1, ?2, ?3, ?4)",
            params![
                track.id.to_string(),
                event.to_string(),
                track.slug,
                track.name,
            ],
        )?;
        Ok(track)
    }

    pub fn track(&self, id: TrackId) -> Result<Option<Track>> {
        self.query_track("id = ?1", &[&id.to_string()])
    }

    pub fn track_by_slug(&self, event: EventId, slug: &str) -> Result<Option<Track>> {
        self.query_track("event_id = ?1 AND slug = ?2", &[&event.to_string(), slug])
    }

    fn query_track(&self, filter: &str, values: &[&str]) -> Result<Option<Track>> {
        let sql = format!("SELECT id, event_id, slug, name FROM tracks WHERE {filter}");
        let row = self
            .conn()?
            .query_row(&sql, rusqlite::params_from_iter(values), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .optional()?;

        row.map(|(id, event_id, slug, name)| {
            Ok(Track {
                id: parse("tracks.id", &id)?,
                event_id: parse("tracks.event_id", &event_id)?,
                slug,
                name,
            })
        })
        .transpose()
    }

    // Submissions and reviews

    pub fn add_submission(&self, track: TrackId, title: &str) -> Result<Submission> {
        let submission = Submission {
            id: SubmissionId::new(),
            track_id: track,
            title: title.to_string(),
        };
        self.conn()?.execute(
            "INSERT INTO submissions (id, track_id, title) VALUES (?1, ?2, ?3)",
            params![
                submission.id.to_string(),
                track.to_string(),
                submission.title,
            ],
        )?;
        Ok(submission)
    }

    pub fn add_submission_author(&self, submission: SubmissionId, user: UserId) -> Result<()> {
        self.conn()?.execute(
            "INSERT OR IGNORE INTO submission_authors (submission_id, user_id) VALUES (?1, ?2)",
            params![submission.to_string(), user.to_string()],
        )?;
        Ok(())
    }

    pub fn submission(&self, id: SubmissionId) -> Result<Option<Submission>> {
        let row = self
            .conn()?
            .query_row(
                "SELECT id, track_id, title FROM submissions WHERE id = ?1",
                [id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, track_id, title)| {
            Ok(Submission {
                id: parse("submissions.id", &id)?,
                track_id: parse("submissions.track_id", &track_id)?,
                title,
            })
        })
        .transpose()
    }

    pub fn is_submission_author(&self, submission: SubmissionId, user: UserId) -> Result<bool> {
        self.exists(
            "SELECT 1 FROM submission_authors WHERE submission_id = ?1 AND user_id = ?2",
            &submission.to_string(),
            &user.to_string(),
        )
    }

    /// Request a review of `submission` from `author`.
    pub fn add_review(&self, submission: SubmissionId, author: UserId) -> Result<Review> {
        let review = Review {
            id: ReviewId::new(),
            submission_id: submission,
            author_id: author,
        };
        self.conn()?.execute(
            "INSERT INTO reviews (id, submission_id, author_id) VALUES (?1, ?2, ?3)",
            params![
                review.id.to_string(),
                submission.to_string(),
                author.to_string(),
            ],
        )?;
        Ok(review)
    }

    pub fn review(&self, id: ReviewId) -> Result<Option<Review>> {
        let row = self
            .conn()?
            .query_row(
                "SELECT id, submission_id, author_id FROM reviews WHERE id = ?1",
                [id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, submission_id, author_id)| {
            Ok(Review {
                id: parse("reviews.id", &id)?,
                submission_id: parse("reviews.submission_id", &submission_id)?,
                author_id: parse("reviews.author_id", &author_id)?,
            })
        })
        .transpose()
    }

    // Registrations

    /// Register `user` into `event`.
    pub fn register(&self, event: EventId, user: UserId) -> Result<EventRegistration> {
        let registration = EventRegistration {
            id: EventRegistrationId::new(),
            event_id: event,
            user_id: user,
        };
        self.conn()?.execute(
            "INSERT INTO event_registrations (id, event_id, user_id) VALUES (?1, ?2, ?3)",
            params![
                registration.id.to_string(),
                event.to_string(),
                user.to_string(),
            ],
        )?;
        Ok(registration)
    }

    pub fn event_registration(&self, id: EventRegistrationId) -> Result<Option<EventRegistration>> {
        self.query_event_registration("id = ?1", &[&id.to_string()])
    }

    /// The registration of `user` to `event`, if any.
    pub fn registration_of(
        &self,
        event: EventId,
        user: UserId,
    ) -> Result<Option<EventRegistration>> {
        self.query_event_registration(
            "event_id = ?1 AND user_id = ?2",
            &[&event.to_string(), &user.to_string()],
        )
    }

    fn query_event_registration(
        &self,
        filter: &str,
        values: &[&str],
    ) -> Result<Option<EventRegistration>> {
        let sql = format!("SELECT id, event_id, user_id FROM event_registrations WHERE {filter}");
        let row = self
            .conn()?
            .query_row(&sql, rusqlite::params_from_iter(values), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .optional()?;

        row.map(|(id, event_id, user_id)| {
            Ok(EventRegistration {
                id: parse("event_registrations.id", &id)?,
                event_id: parse("event_registrations.event_id", &event_id)?,
                user_id: parse("event_registrations.user_id", &user_id)?,
            })
        })
        .transpose()
    }

    pub fn is_registered(&self, event: EventId, user: UserId) -> Result<bool> {
        self.exists(
            "SELECT 1 FROM event_registrations WHERE event_id = ?1 AND user_id = ?2",
            &event.to_string(),
            &user.to_string(),
        )
    }

    /// Register the holder of `registration` into `activity`.
    pub fn register_activity(
        &self,
        activity: ActivityId,
        registration: EventRegistrationId,
    ) -> Result<ActivityRegistration> {
        let activity_registration = ActivityRegistration {
            id: ActivityRegistrationId::new(),
            activity_id: activity,
            event_registration_id: registration,
        };
        self.conn()?.execute(
            "INSERT INTO activity_registrations (id, activity_id, event_registration_id)
             VALUES (?1, ?2, ?3)",
            params![
                activity_registration.id.to_string(),
                activity.to_string(),
                registration.to_string(),
            ],
        )?;
        Ok(activity_registration)
    }

    pub fn activity_registration(
        &self,
        id: ActivityRegistrationId,
    ) -> Result<Option<ActivityRegistration>> {
        self.query_activity_registration("id = ?1", &[&id.to_string()])
    }

    /// The registration to `activity` made through `registration`, if any.
    pub fn activity_registration_of(
        &self,
        activity: ActivityId,
        registration: EventRegistrationId,
    ) -> Result<Option<ActivityRegistration>> {
        self.query_activity_registration(
            "activity_id = ?1 AND event_registration_id = ?2",
            &[&activity.to_string(), &registration.to_string()],
        )
    }

    fn query_activity_registration(
        &self,
        filter: &str,
        values: &[&str],
    ) -> Result<Option<ActivityRegistration>> {
        let sql = format!(
            "SELECT id, activity_id, event_registration_id FROM activity_registrations WHERE {filter}"
        );
        let row = self
            .conn()?
            .query_row(&sql, rusqlite::params_from_iter(values), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .optional()?;

        row.map(|(id, activity_id, event_registration_id)| {
            Ok(ActivityRegistration {
                id: parse("activity_registrations.id", &id)?,
                activity_id: parse("activity_registrations.activity_id", &activity_id)?,
                event_registration_id: parse(
                    "activity_registrations.event_registration_id",
                    &event_registration_id,
                )?,
            })
        })
        .transpose()
    }

    fn exists(&self, sql: &str, first: &str, second: &str) -> Result<bool> {
        let found = self
            .conn()?
            .query_row(sql, [first, second], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse<T>(column: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| Error::Corrupt(format!("{column} '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy::Subject;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 10, day).unwrap()
    }

    #[test]
    fn test_users_and_grants() {
        let store = ConferenceStore::in_memory().unwrap();
        let id = store.add_user("alice").unwrap();
        store.grant(id, "add_event").unwrap();
        store.grant(id, "add_event").unwrap();

        let alice = store.load_user("alice").unwrap();
        assert_eq!(alice.id, id);
        assert!(alice.is_authenticated());
        assert!(alice.has_coarse_capabilities(&["add_event"]));
        assert!(!alice.has_coarse_capabilities(&["change_event"]));

        assert!(matches!(store.load_user("nobody"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_user_without_grants_has_empty_set() {
        let store = ConferenceStore::in_memory().unwrap();
        store.add_user("bob").unwrap();

        let bob = store.load_user("bob").unwrap();
        assert_eq!(bob.coarse_capabilities().map(|set| set.len()), Some(0));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = ConferenceStore::in_memory().unwrap();
        store.add_user("alice").unwrap();
        assert!(matches!(store.add_user("alice"), Err(Error::Database(_))));
    }

    #[test]
    fn test_event_lookup() {
        let store = ConferenceStore::in_memory().unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();

        assert_eq!(store.event(event.id).unwrap(), Some(event.clone()));
        assert_eq!(store.event_by_slug("sbes").unwrap(), Some(event));
        assert_eq!(store.event_by_slug("cbsoft").unwrap(), None);
    }

    #[test]
    fn test_nested_records() {
        let store = ConferenceStore::in_memory().unwrap();
        let author = store.add_user("carol").unwrap();
        let reviewer = store.add_user("dave").unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();
        let activity = store.add_activity(event.id, "keynote", "Keynote").unwrap();
        let track = store.add_track(event.id, "research", "Research").unwrap();
        let submission = store.add_submission(track.id, "On Predicates").unwrap();
        store.add_submission_author(submission.id, author).unwrap();
        let review = store.add_review(submission.id, reviewer).unwrap();

        assert_eq!(
            store.activity_by_slug(event.id, "keynote").unwrap(),
            Some(activity.clone())
        );
        assert_eq!(store.activity(activity.id).unwrap(), Some(activity));
        assert_eq!(
            store.track_by_slug(event.id, "research").unwrap(),
            Some(track.clone())
        );
        assert_eq!(store.track(track.id).unwrap(), Some(track));
        assert_eq!(
            store.submission(submission.id).unwrap(),
            Some(submission.clone())
        );
        assert_eq!(store.review(review.id).unwrap(), Some(review));
        assert!(store.is_submission_author(submission.id, author).unwrap());
        assert!(!store.is_submission_author(submission.id, reviewer).unwrap());
    }

    #[test]
    fn test_registrations() {
        let store = ConferenceStore::in_memory().unwrap();
        let erin = store.add_user("erin").unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();
        let activity = store.add_activity(event.id, "keynote", "Keynote").unwrap();

        let registration = store.register(event.id, erin).unwrap();
        let activity_registration = store
            .register_activity(activity.id, registration.id)
            .unwrap();

        assert!(store.is_registered(event.id, erin).unwrap());
        assert_eq!(
            store.registration_of(event.id, erin).unwrap(),
            Some(registration.clone())
        );
        assert_eq!(
            store.event_registration(registration.id).unwrap(),
            Some(registration.clone())
        );
        assert_eq!(
            store
                .activity_registration(activity_registration.id)
                .unwrap(),
            Some(activity_registration.clone())
        );
        assert_eq!(
            store
                .activity_registration_of(activity.id, registration.id)
                .unwrap(),
            Some(activity_registration)
        );
        assert!(matches!(store.register(event.id, erin), Err(Error::Database(_))));
    }

    #[test]
    fn test_ownership() {
        let store = ConferenceStore::in_memory().unwrap();
        let owner = store.add_user("owner").unwrap();
        let other = store.add_user("other").unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();
        let activity = store.add_activity(event.id, "keynote", "Keynote").unwrap();
        store.add_event_owner(event.id, owner).unwrap();
        store.add_activity_owner(activity.id, other).unwrap();

        assert!(store.is_event_owner(event.id, owner).unwrap());
        assert!(!store.is_event_owner(event.id, other).unwrap());
        assert!(store.is_activity_owner(activity.id, other).unwrap());
        assert!(!store.is_activity_owner(activity.id, owner).unwrap());
    }

    #[test]
    fn test_corrupt_id_is_reported() {
        let store = ConferenceStore::in_memory().unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO events (id, slug, name, starts_on, ends_on)
                 VALUES ('not-a-uuid', 'bad', 'Bad', '2020-10-01', '2020-10-02')",
                [],
            )
            .unwrap();

        assert!(matches!(store.event_by_slug("bad"), Err(Error::Corrupt(_))));
    }
}
