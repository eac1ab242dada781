//! One gate per conference resource over a shared capability table.

use crate::capabilities;
use crate::dispatch::{self, AccessError};
use crate::error::{Error, Result};
use crate::resources::*;
use crate::target::Target;
use crate::user::User;
use policy::{Action, ActionMap, CapabilitySpec, Decision, Gate, Registry};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Per-resource replacements for action map entries, keyed by resource name
/// and then action name.
///
/// ```toml
/// [event]
/// destroy = "deny_all"
/// ```
pub type Overrides = BTreeMap<String, BTreeMap<String, CapabilitySpec>>;

/// One line of the effective rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub resource: ResourceKind,
    pub action: &'static str,
    pub spec: CapabilitySpec,
}

type ConferenceGate<A> = Gate<User, Target, A>;

/// Authorization entry point for every conference resource.
///
/// Construction validates the whole configuration: each action map covers
/// every action its resource implements, and every capability it names is
/// registered. A failure here is a configuration error and should abort
/// startup.
pub struct Authorizer {
    registry: Arc<Registry<User, Target>>,
    event: ConferenceGate<EventAction>,
    activity: ConferenceGate<ActivityAction>,
    track: ConferenceGate<TrackAction>,
    submission: ConferenceGate<SubmissionAction>,
    review: ConferenceGate<ReviewAction>,
    event_registration: ConferenceGate<EventRegistrationAction>,
    activity_registration: ConferenceGate<ActivityRegistrationAction>,
    user: ConferenceGate<UserAction>,
}

fn build<A: Action>(
    kind: ResourceKind,
    mut actions: ActionMap<A>,
    overrides: &Overrides,
    registry: &Arc<Registry<User, Target>>,
) -> Result<ConferenceGate<A>> {
    if let Some(entries) = overrides.get(kind.name()) {
        let replacements =
            ActionMap::from_names(entries.iter().map(|(name, spec)| (name, spec.clone())))?;
        info!(
            resource = kind.name(),
            entries = entries.len(),
            "applying overrides"
        );
        actions.merge(replacements);
    }

    let gate = Gate::new(kind.name(), actions, Arc::clone(registry))?;
    gate.require_coverage()?;
    Ok(gate)
}

fn declarations<A: Action>(
    kind: ResourceKind,
    gate: &ConferenceGate<A>,
) -> impl Iterator<Item = Declaration> + '_ {
    gate.actions()
        .iter()
        .map(move |(action, spec)| Declaration {
            resource: kind,
            action: action.name(),
            spec: spec.clone(),
        })
}

impl Authorizer {
    /// Build with the default action maps.
    pub fn new() -> Result<Self> {
        Self::with_overrides(&Overrides::new())
    }

    /// Build with the default action maps, replacing the entries named in
    /// `overrides`. Unknown resources or actions are rejected.
    pub fn with_overrides(overrides: &Overrides) -> Result<Self> {
        if let Some(unknown) = overrides
            .keys()
            .find(|name| name.parse::<ResourceKind>().is_err())
        {
            return Err(Error::UnknownResource(unknown.clone()));
        }

        let registry = Arc::new(capabilities::registry()?);

        Ok(Self {
            event: build(ResourceKind::Event, event_actions(), overrides, &registry)?,
            activity: build(
                ResourceKind::Activity,
                activity_actions(),
                overrides,
                &registry,
            )?,
            track: build(ResourceKind::Track, track_actions(), overrides, &registry)?,
            submission: build(
                ResourceKind::Submission,
                submission_actions(),
                overrides,
                &registry,
            )?,
            review: build(ResourceKind::Review, review_actions(), overrides, &registry)?,
            event_registration: build(
                ResourceKind::EventRegistration,
                event_registration_actions(),
                overrides,
                &registry,
            )?,
            activity_registration: build(
                ResourceKind::ActivityRegistration,
                activity_registration_actions(),
                overrides,
                &registry,
            )?,
            user: build(ResourceKind::User, user_actions(), overrides, &registry)?,
            registry,
        })
    }

    pub fn registry(&self) -> &Registry<User, Target> {
        &self.registry
    }

    pub fn event(&self) -> &ConferenceGate<EventAction> {
        &self.event
    }

    pub fn activity(&self) -> &ConferenceGate<ActivityAction> {
        &self.activity
    }

    pub fn track(&self) -> &ConferenceGate<TrackAction> {
        &self.track
    }

    pub fn submission(&self) -> &ConferenceGate<SubmissionAction> {
        &self.submission
    }

    pub fn review(&self) -> &ConferenceGate<ReviewAction> {
        &self.review
    }

    pub fn event_registration(&self) -> &ConferenceGate<EventRegistrationAction> {
        &self.event_registration
    }

    pub fn activity_registration(&self) -> &ConferenceGate<ActivityRegistrationAction> {
        &self.activity_registration
    }

    pub fn user(&self) -> &ConferenceGate<UserAction> {
        &self.user
    }

    /// Decide an action addressed by name, as a router sees it.
    pub fn decide(
        &self,
        kind: ResourceKind,
        action: Option<&str>,
        user: &User,
        target: Option<&Target>,
    ) -> Decision {
        match kind {
            ResourceKind::Event => self.event.decide_named(action, user, target),
            ResourceKind::Activity => self.activity.decide_named(action, user, target),
            ResourceKind::Track => self.track.decide_named(action, user, target),
            ResourceKind::Submission => self.submission.decide_named(action, user, target),
            ResourceKind::Review => self.review.decide_named(action, user, target),
            ResourceKind::EventRegistration => {
                self.event_registration.decide_named(action, user, target)
            }
            ResourceKind::ActivityRegistration => {
                self.activity_registration.decide_named(action, user, target)
            }
            ResourceKind::User => self.user.decide_named(action, user, target),
        }
    }

    pub fn authorize(
        &self,
        kind: ResourceKind,
        action: Option<&str>,
        user: &User,
        target: Option<&Target>,
    ) -> bool {
        self.decide(kind, action, user, target).is_allowed()
    }

    /// Like [`decide`](Self::decide), but a denial becomes an [`AccessError`]
    /// carrying the status the caller should see.
    pub fn enforce(
        &self,
        kind: ResourceKind,
        action: Option<&str>,
        user: &User,
        target: Option<&Target>,
    ) -> std::result::Result<(), AccessError> {
        let decision = self.decide(kind, action, user, target);
        dispatch::enforce(decision, user, kind.name(), action.unwrap_or(""))
    }

    /// The effective action maps, resource by resource.
    pub fn declarations(&self) -> Vec<Declaration> {
        let mut all = Vec::new();
        all.extend(declarations(ResourceKind::Event, &self.event));
        all.extend(declarations(ResourceKind::Activity, &self.activity));
        all.extend(declarations(ResourceKind::Track, &self.track));
        all.extend(declarations(ResourceKind::Submission, &self.submission));
        all.extend(declarations(ResourceKind::Review, &self.review));
        all.extend(declarations(ResourceKind::EventRegistration, &self.event_registration));
        all.extend(declarations(
            ResourceKind::ActivityRegistration,
            &self.activity_registration,
        ));
        all.extend(declarations(ResourceKind::User, &self.user));
        all
    }
}
