//! Relationship lookups for the authorization predicates.

use crate::ConferenceStore;
use conference::model::{Activity, EventRegistration, Submission, Track};
use conference::{
    ActivityId, Directory, DirectoryResult, EventId, EventRegistrationId, SubmissionId, TrackId,
    UserId,
};

impl Directory for ConferenceStore {
    fn is_event_owner(&self, event: EventId, user: UserId) -> DirectoryResult<bool> {
        Ok(ConferenceStore::is_event_owner(self, event, user)?)
    }

    fn is_activity_owner(&self, activity: ActivityId, user: UserId) -> DirectoryResult<bool> {
        Ok(ConferenceStore::is_activity_owner(self, activity, user)?)
    }

    fn is_submission_author(
        &self,
        submission: SubmissionId,
        user: UserId,
    ) -> DirectoryResult<bool> {
        Ok(ConferenceStore::is_submission_author(self, submission, user)?)
    }

    fn is_registered(&self, event: EventId, user: UserId) -> DirectoryResult<bool> {
        Ok(ConferenceStore::is_registered(self, event, user)?)
    }

    fn activity(&self, id: ActivityId) -> DirectoryResult<Option<Activity>> {
        Ok(ConferenceStore::activity(self, id)?)
    }

    fn track(&self, id: TrackId) -> DirectoryResult<Option<Track>> {
        Ok(ConferenceStore::track(self, id)?)
    }

    fn submission(&self, id: SubmissionId) -> DirectoryResult<Option<Submission>> {
        Ok(ConferenceStore::submission(self, id)?)
    }

    fn event_registration(
        &self,
        id: EventRegistrationId,
    ) -> DirectoryResult<Option<EventRegistration>> {
        Ok(ConferenceStore::event_registration(self, id)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::ConferenceStore;
    use chrono::NaiveDate;
    use conference::resources::{
        ActivityAction, EventAction, EventRegistrationAction, SubmissionAction,
    };
    use conference::{AccessError, Authorizer, ResourceKind, Target};
    use std::sync::Arc;

    struct Seeded {
        store: Arc<ConferenceStore>,
        authz: Authorizer,
    }

    fn seeded() -> Seeded {
        Seeded {
            store: Arc::new(ConferenceStore::in_memory().unwrap()),
            authz: Authorizer::new().unwrap(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 10, day).unwrap()
    }

    #[test]
    fn test_owner_updates_event_through_store() {
        let Seeded { store, authz } = seeded();
        let owner = store.add_user("owner").unwrap();
        store.add_user("other").unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();
        store.add_event_owner(event.id, owner).unwrap();

        let target = Target::new(event, store.clone());
        assert!(authz.event().check_object(
            EventAction::Update,
            &store.load_user("owner").unwrap(),
            &target
        ));
        assert!(!authz.event().check_object(
            EventAction::Update,
            &store.load_user("other").unwrap(),
            &target
        ));
    }

    #[test]
    fn test_activity_registration_needs_event_registration() {
        let Seeded { store, authz } = seeded();
        let erin = store.add_user("erin").unwrap();
        store.add_user("frank").unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();
        let activity = store.add_activity(event.id, "keynote", "Keynote").unwrap();
        store.register(event.id, erin).unwrap();

        let target = Target::new(activity, store.clone());
        assert!(authz.activity().check_object(
            ActivityAction::Register,
            &store.load_user("erin").unwrap(),
            &target
        ));
        assert!(!authz.activity().check_object(
            ActivityAction::Register,
            &store.load_user("frank").unwrap(),
            &target
        ));
    }

    #[test]
    fn test_submission_author_and_event_owner() {
        let Seeded { store, authz } = seeded();
        let owner = store.add_user("owner").unwrap();
        let carol = store.add_user("carol").unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();
        store.add_event_owner(event.id, owner).unwrap();
        let track = store.add_track(event.id, "research", "Research").unwrap();
        let submission = store.add_submission(track.id, "On Predicates").unwrap();
        store.add_submission_author(submission.id, carol).unwrap();

        let target = Target::new(submission, store.clone());
        let carol = store.load_user("carol").unwrap();
        let owner = store.load_user("owner").unwrap();

        let submissions = authz.submission();
        assert!(submissions.check_object(SubmissionAction::Update, &carol, &target));
        assert!(!submissions.check_object(SubmissionAction::Update, &owner, &target));
        // Requesting reviews resolves the event through the track.
        assert!(submissions.check_object(SubmissionAction::RequestReview, &owner, &target));
        assert!(!submissions.check_object(SubmissionAction::RequestReview, &carol, &target));
    }

    #[test]
    fn test_registrant_or_owner_removes_registration() {
        let Seeded { store, authz } = seeded();
        let owner = store.add_user("owner").unwrap();
        let erin = store.add_user("erin").unwrap();
        store.add_user("frank").unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();
        store.add_event_owner(event.id, owner).unwrap();
        let registration = store.register(event.id, erin).unwrap();

        let target = Target::new(registration, store.clone());
        for (username, expected) in [("erin", true), ("owner", true), ("frank", false)] {
            assert_eq!(
                authz.event_registration().check_object(
                    EventRegistrationAction::Destroy,
                    &store.load_user(username).unwrap(),
                    &target
                ),
                expected,
                "{username}"
            );
        }
    }

    #[test]
    fn test_coarse_grant_controls_event_creation() {
        let Seeded { store, authz } = seeded();
        let staff = store.add_user("staff").unwrap();
        store.grant(staff, "add_event").unwrap();
        store.add_user("member").unwrap();

        let staff = store.load_user("staff").unwrap();
        assert!(authz.event().check_action(EventAction::Create, &staff));
        assert_eq!(
            authz
                .enforce(
                    ResourceKind::Event,
                    Some("create"),
                    &store.load_user("member").unwrap(),
                    None
                )
                .map_err(|e| e.status()),
            Err(403)
        );
        assert_eq!(
            authz.enforce(
                ResourceKind::Event,
                Some("create"),
                &conference::User::anonymous(),
                None
            ),
            Err(AccessError::Unauthenticated)
        );
    }

    #[test]
    fn test_store_backed_target_crosses_threads() {
        let Seeded { store, authz } = seeded();
        let owner = store.add_user("owner").unwrap();
        let event = store.add_event("sbes", "SBES", date(1), date(3)).unwrap();
        store.add_event_owner(event.id, owner).unwrap();

        let target = Target::new(event, store.clone());
        let user = store.load_user("owner").unwrap();
        let allowed = std::thread::spawn(move || {
            authz
                .event()
                .check_object(EventAction::Update, &user, &target)
        })
        .join()
        .unwrap();
        assert!(allowed);
    }
}
