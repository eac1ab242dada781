//! Capability names and the table binding them to predicates.

use crate::predicates::{
    is_activity_owner, is_authenticated, is_event_owner, is_registered_to_event, is_registrant,
    is_review_author, is_submission_author, user_is_self,
};
use crate::target::Target;
use crate::user::User;
use policy::{Registry, Result, granted, or};

pub const ADD_EVENT: &str = "add_event";
pub const CHANGE_EVENT: &str = "change_event";
pub const DELETE_EVENT: &str = "delete_event";
pub const ANSWER_REVIEW: &str = "answer_review";
pub const VIEW_ACTIVITIES_FOR_EVENT: &str = "view_activities_for_event";
pub const VIEW_REGISTRATIONS_FOR_EVENT: &str = "view_registrations_for_event";
pub const VIEW_SUBMISSIONS_FOR_EVENT: &str = "view_submissions_for_event";
pub const VIEW_REVIEW_QUESTIONS_FOR_TRACK: &str = "view_review_questions_for_track";
pub const VIEW_TRACKS_FOR_EVENT: &str = "view_tracks_for_event";
pub const VIEW_ACTIVITY_REGISTRATIONS_FOR_EVENT: &str = "view_activity_registrations_for_event";
pub const VIEW_REGISTRATIONS_FOR_ACTIVITY: &str = "view_registrations_for_activity";
pub const REGISTER_SELF_INTO_EVENT: &str = "register_self_into_event";
pub const REGISTER_SELF_INTO_ACTIVITY: &str = "register_self_into_activity";
pub const ADD_SUBMISSION_TO_TRACK: &str = "add_submission_to_track";
pub const CHANGE_SUBMISSION: &str = "change_submission";
pub const DELETE_SUBMISSION: &str = "delete_submission";
pub const CHANGE_USER: &str = "change_user";
pub const DELETE_EVENT_REGISTRATION: &str = "delete_event_registration";
pub const DELETE_ACTIVITY_REGISTRATION: &str = "delete_activity_registration";

/// Build the conference capability table.
///
/// Called once during startup; share the result behind an `Arc`.
pub fn registry() -> Result<Registry<User, Target>> {
    Ok(Registry::builder()
        .register(ADD_EVENT, Some(granted(ADD_EVENT)))?
        .register(CHANGE_EVENT, Some(is_event_owner()))?
        .register(DELETE_EVENT, Some(is_event_owner()))?
        .register(ANSWER_REVIEW, Some(is_review_author()))?
        .register(VIEW_ACTIVITIES_FOR_EVENT, Some(is_authenticated()))?
        .register(VIEW_REGISTRATIONS_FOR_EVENT, Some(is_event_owner()))?
        .register(VIEW_SUBMISSIONS_FOR_EVENT, Some(is_event_owner()))?
        .register(VIEW_REVIEW_QUESTIONS_FOR_TRACK, Some(is_event_owner()))?
        .register(VIEW_TRACKS_FOR_EVENT, Some(is_authenticated()))?
        .register(
            VIEW_ACTIVITY_REGISTRATIONS_FOR_EVENT,
            Some(is_event_owner()),
        )?
        .register(
            VIEW_REGISTRATIONS_FOR_ACTIVITY,
            Some(or(is_activity_owner(), is_event_owner())),
        )?
        .register(REGISTER_SELF_INTO_EVENT, Some(is_authenticated()))?
        .register(REGISTER_SELF_INTO_ACTIVITY, Some(is_registered_to_event()))?
        .register(ADD_SUBMISSION_TO_TRACK, Some(is_registered_to_event()))?
        .register(CHANGE_SUBMISSION, Some(is_submission_author()))?
        .register(DELETE_SUBMISSION, Some(is_submission_author()))?
        .register(CHANGE_USER, Some(user_is_self()))?
        .register(
            DELETE_EVENT_REGISTRATION,
            Some(or(is_registrant(), is_event_owner())),
        )?
        .register(DELETE_ACTIVITY_REGISTRATION, Some(is_registrant()))?
        .build())
}
