//! Protected resources, their actions and default requirements.

use crate::capabilities::*;
use crate::error::Error;
use policy::{Action, ActionMap, CapabilitySpec};
use std::fmt;
use std::str::FromStr;

macro_rules! actions {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Action for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

actions!(
    /// Actions on events, including the nested listings under an event.
    EventAction {
        Create => "create",
        Retrieve => "retrieve",
        List => "list",
        Update => "update",
        Destroy => "destroy",
        ListRegistrations => "list_registrations",
        ListActivities => "list_activities",
        ListTracks => "list_tracks",
        ListSubmissions => "list_submissions",
        ListActivityRegistrations => "list_activity_registrations",
        Register => "register",
    }
);

actions!(ActivityAction {
    Create => "create",
    Retrieve => "retrieve",
    Update => "update",
    Destroy => "destroy",
    ListRegistrations => "list_registrations",
    Register => "register",
});

actions!(TrackAction {
    Create => "create",
    Retrieve => "retrieve",
    Update => "update",
    Destroy => "destroy",
    ListSubmissions => "list_submissions",
    ListReviewQuestions => "list_review_questions",
    AddReviewQuestion => "add_review_question",
    AddDocumentSlot => "add_document_slot",
    Submit => "submit",
});

actions!(SubmissionAction {
    Create => "create",
    Update => "update",
    Destroy => "destroy",
    AddDocument => "add_document",
    RequestReview => "request_review",
});

actions!(ReviewAction {
    Answer => "answer",
});

actions!(
    /// Event registrations. `create` registers the acting user;
    /// `create_for_other` is the organizer registering someone else.
    EventRegistrationAction {
        List => "list",
        Create => "create",
        CreateForOther => "create_for_other",
        Destroy => "destroy",
    }
);

actions!(ActivityRegistrationAction {
    List => "list",
    Create => "create",
    Destroy => "destroy",
});

actions!(
    /// Account endpoints. The `current*` actions act on the caller's own
    /// account; `update` targets an account by id.
    UserAction {
        List => "list",
        Create => "create",
        Update => "update",
        Current => "current",
        CurrentUpdate => "current_update",
        CurrentDestroy => "current_destroy",
        CurrentListSubmissions => "current_list_submissions",
        CurrentListReviewRequests => "current_list_review_requests",
    }
);

fn require(capability: &str) -> CapabilitySpec {
    CapabilitySpec::require([capability])
}

pub fn event_actions() -> ActionMap<EventAction> {
    use EventAction::*;
    ActionMap::new()
        .with(Create, require(ADD_EVENT))
        .with(Retrieve, CapabilitySpec::AllowAny)
        .with(List, CapabilitySpec::AllowAny)
        .with(Update, require(CHANGE_EVENT))
        .with(Destroy, require(DELETE_EVENT))
        .with(ListRegistrations, require(VIEW_REGISTRATIONS_FOR_EVENT))
        .with(ListActivities, require(VIEW_ACTIVITIES_FOR_EVENT))
        .with(ListTracks, require(VIEW_TRACKS_FOR_EVENT))
        .with(ListSubmissions, require(VIEW_SUBMISSIONS_FOR_EVENT))
        .with(
            ListActivityRegistrations,
            require(VIEW_ACTIVITY_REGISTRATIONS_FOR_EVENT),
        )
        .with(Register, require(REGISTER_SELF_INTO_EVENT))
}

pub fn activity_actions() -> ActionMap<ActivityAction> {
    use ActivityAction::*;
    ActionMap::new()
        .with(Create, require(CHANGE_EVENT))
        .with(Retrieve, require(VIEW_ACTIVITIES_FOR_EVENT))
        .with(Update, require(CHANGE_EVENT))
        .with(Destroy, require(CHANGE_EVENT))
        .with(ListRegistrations, require(VIEW_REGISTRATIONS_FOR_ACTIVITY))
        .with(Register, require(REGISTER_SELF_INTO_ACTIVITY))
}

pub fn track_actions() -> ActionMap<TrackAction> {
    use TrackAction::*;
    ActionMap::new()
        .with(Create, require(CHANGE_EVENT))
        .with(Retrieve, require(VIEW_TRACKS_FOR_EVENT))
        .with(Update, require(CHANGE_EVENT))
        .with(Destroy, require(CHANGE_EVENT))
        .with(ListSubmissions, require(VIEW_SUBMISSIONS_FOR_EVENT))
        .with(
            ListReviewQuestions,
            require(VIEW_REVIEW_QUESTIONS_FOR_TRACK),
        )
        .with(AddReviewQuestion, require(CHANGE_EVENT))
        .with(AddDocumentSlot, require(CHANGE_EVENT))
        .with(Submit, require(ADD_SUBMISSION_TO_TRACK))
}

pub fn submission_actions() -> ActionMap<SubmissionAction> {
    use SubmissionAction::*;
    ActionMap::new()
        .with(Create, require(ADD_SUBMISSION_TO_TRACK))
        .with(Update, require(CHANGE_SUBMISSION))
        .with(Destroy, require(DELETE_SUBMISSION))
        .with(AddDocument, require(CHANGE_SUBMISSION))
        .with(RequestReview, require(CHANGE_EVENT))
}

pub fn review_actions() -> ActionMap<ReviewAction> {
    ActionMap::new().with(ReviewAction::Answer, require(ANSWER_REVIEW))
}

pub fn event_registration_actions() -> ActionMap<EventRegistrationAction> {
    use EventRegistrationAction::*;
    ActionMap::new()
        .with(List, CapabilitySpec::AllowAuthenticated)
        .with(Create, require(REGISTER_SELF_INTO_EVENT))
        .with(CreateForOther, require(CHANGE_EVENT))
        .with(Destroy, require(DELETE_EVENT_REGISTRATION))
}

pub fn activity_registration_actions() -> ActionMap<ActivityRegistrationAction> {
    use ActivityRegistrationAction::*;
    ActionMap::new()
        .with(List, CapabilitySpec::AllowAuthenticated)
        .with(Create, require(REGISTER_SELF_INTO_ACTIVITY))
        .with(Destroy, require(DELETE_ACTIVITY_REGISTRATION))
}

pub fn user_actions() -> ActionMap<UserAction> {
    use UserAction::*;
    ActionMap::new()
        .with(List, CapabilitySpec::AllowAuthenticated)
        .with(Create, CapabilitySpec::AllowAny)
        .with(Update, require(CHANGE_USER))
        .with(Current, CapabilitySpec::AllowAuthenticated)
        .with(CurrentUpdate, CapabilitySpec::AllowAuthenticated)
        .with(CurrentDestroy, CapabilitySpec::AllowAuthenticated)
        .with(CurrentListSubmissions, CapabilitySpec::AllowAuthenticated)
        .with(
            CurrentListReviewRequests,
            CapabilitySpec::AllowAuthenticated,
        )
}

/// A protected resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Event,
    Activity,
    Track,
    Submission,
    Review,
    EventRegistration,
    ActivityRegistration,
    User,
}

impl ResourceKind {
    pub const ALL: &'static [Self] = &[
        Self::Event,
        Self::Activity,
        Self::Track,
        Self::Submission,
        Self::Review,
        Self::EventRegistration,
        Self::ActivityRegistration,
        Self::User,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Activity => "activity",
            Self::Track => "track",
            Self::Submission => "submission",
            Self::Review => "review",
            Self::EventRegistration => "event_registration",
            Self::ActivityRegistration => "activity_registration",
            Self::User => "user",
        }
    }

    /// Action names the resource implements, `metadata` excluded.
    pub fn action_names(self) -> Vec<&'static str> {
        fn names<A: Action>() -> Vec<&'static str> {
            A::ALL.iter().map(|action| action.name()).collect()
        }

        match self {
            Self::Event => names::<EventAction>(),
            Self::Activity => names::<ActivityAction>(),
            Self::Track => names::<TrackAction>(),
            Self::Submission => names::<SubmissionAction>(),
            Self::Review => names::<ReviewAction>(),
            Self::EventRegistration => names::<EventRegistrationAction>(),
            Self::ActivityRegistration => names::<ActivityRegistrationAction>(),
            Self::User => names::<UserAction>(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownResource(s.to_string()))
    }
}
