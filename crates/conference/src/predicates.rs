//! Relationship predicates for the conference domain.
//!
//! Each predicate states which objects it resolves and how. A lookup that
//! fails is logged and treated as `false`; an unresolvable relationship is
//! `false` as well. Anonymous users never satisfy a relationship.

use crate::directory::DirectoryResult;
use crate::target::{Object, Target};
use crate::user::User;
use policy::{Predicate, Subject};
use tracing::warn;

/// Predicates over conference users and targets.
pub type Rule = Predicate<User, Target>;

fn settle(predicate: &'static str, target: &Target, result: DirectoryResult<bool>) -> bool {
    match result {
        Ok(held) => held,
        Err(e) => {
            warn!(
                predicate,
                object = target.object().kind(),
                error = %e,
                "lookup failed, denying"
            );
            false
        }
    }
}

/// The user owns the event the target belongs to.
///
/// Resolves the event through [`Target::event_id`], so it applies to events
/// and to everything hanging off one (activities, tracks, submissions,
/// reviews, registrations).
pub fn is_event_owner() -> Rule {
    Predicate::object("is_event_owner", |user: &User, target: &Target| {
        if !user.is_authenticated() {
            return false;
        }
        let result = target.event_id().and_then(|event| match event {
            Some(event) => target.directory().is_event_owner(event, user.id),
            None => Ok(false),
        });
        settle("is_event_owner", target, result)
    })
}

/// The user owns the activity directly.
///
/// Applies to activities and activity registrations. Event ownership does not
/// count; combine with [`is_event_owner`] for that.
pub fn is_activity_owner() -> Rule {
    Predicate::object("is_activity_owner", |user: &User, target: &Target| {
        if !user.is_authenticated() {
            return false;
        }
        let result = match target.activity_id() {
            Some(activity) => target.directory().is_activity_owner(activity, user.id),
            None => Ok(false),
        };
        settle("is_activity_owner", target, result)
    })
}

/// The user is one of the submission's authors. Applies to submissions only.
pub fn is_submission_author() -> Rule {
    Predicate::object("is_submission_author", |user: &User, target: &Target| {
        if !user.is_authenticated() {
            return false;
        }
        let result = match target.submission_id() {
            Some(submission) => target.directory().is_submission_author(submission, user.id),
            None => Ok(false),
        };
        settle("is_submission_author", target, result)
    })
}

/// The user is the review's assigned author. Applies to reviews only; needs
/// no lookup.
pub fn is_review_author() -> Rule {
    Predicate::object("is_review_author", |user: &User, target: &Target| {
        user.is_authenticated()
            && matches!(target.object(), Object::Review(review) if review.author_id == user.id)
    })
}

/// The user holds a registration to the target's event.
///
/// Resolves the event like [`is_event_owner`]: an activity or track checks
/// the registration to its parent event.
pub fn is_registered_to_event() -> Rule {
    Predicate::object("is_registered_to_event", |user: &User, target: &Target| {
        if !user.is_authenticated() {
            return false;
        }
        let result = target.event_id().and_then(|event| match event {
            Some(event) => target.directory().is_registered(event, user.id),
            None => Ok(false),
        });
        settle("is_registered_to_event", target, result)
    })
}

/// The target is the user's own account.
pub fn user_is_self() -> Rule {
    Predicate::object("user_is_self", |user: &User, target: &Target| {
        user.is_authenticated() && matches!(target.object(), Object::User(id) if *id == user.id)
    })
}

/// The user is the one registered by the target registration.
///
/// Event registrations carry the user; activity registrations resolve it
/// through their event registration.
pub fn is_registrant() -> Rule {
    Predicate::object("is_registrant", |user: &User, target: &Target| {
        if !user.is_authenticated() {
            return false;
        }
        let result = target
            .registrant()
            .map(|registrant| registrant == Some(user.id));
        settle("is_registrant", target, result)
    })
}

/// The user is logged in.
pub fn is_authenticated() -> Rule {
    policy::is_authenticated()
}
