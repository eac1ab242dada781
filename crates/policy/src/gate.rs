//! Request-time enforcement for one resource type.

use crate::{
    Action, ActionMap, CapabilitySpec, Error, Operation, Registry, Resolver, Result, Subject,
};
use std::sync::Arc;
use tracing::debug;

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { reason: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    fn deny(reason: impl Into<String>) -> Self {
        Decision::Deny {
            reason: reason.into(),
        }
    }
}

/// Enforces a resource's [`ActionMap`] against a shared [`Registry`].
///
/// Checks run in two granularities with the same map entry:
///
/// - pre-fetch, without a target ([`check_action`](Self::check_action)):
///   may the subject attempt the action at all? Object predicates fall back
///   to the subject's coarse grants.
/// - post-fetch, with the concrete target ([`check_object`](Self::check_object)):
///   may the subject perform it on this object?
///
/// Undeclared actions are always denied. The metadata operation is always
/// allowed.
pub struct Gate<U: ?Sized, T: ?Sized, A> {
    resource: String,
    actions: ActionMap<A>,
    resolver: Resolver<U, T>,
}

impl<U, T, A> Gate<U, T, A>
where
    U: Subject + ?Sized + 'static,
    T: ?Sized + 'static,
    A: Action,
{
    /// Create a gate, failing if `actions` names a capability `registry` lacks.
    pub fn new(
        resource: impl Into<String>,
        actions: ActionMap<A>,
        registry: Arc<Registry<U, T>>,
    ) -> Result<Self> {
        if let Some(unknown) = actions.capabilities().find(|name| !registry.contains(name)) {
            return Err(Error::UnknownCapability(unknown.to_string()));
        }

        Ok(Self {
            resource: resource.into(),
            actions,
            resolver: Resolver::new(registry),
        })
    }

    /// Fail unless every implemented action has an entry.
    pub fn require_coverage(&self) -> Result<()> {
        match self.actions.missing().first() {
            Some(action) => Err(Error::UndeclaredAction {
                resource: self.resource.clone(),
                action: action.name(),
            }),
            None => Ok(()),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn actions(&self) -> &ActionMap<A> {
        &self.actions
    }

    pub fn resolver(&self) -> &Resolver<U, T> {
        &self.resolver
    }

    /// Decide whether `user` may perform `op`, optionally on `target`.
    pub fn decide(&self, op: impl Into<Operation<A>>, user: &U, target: Option<&T>) -> Decision {
        let op = op.into();
        let decision = self.evaluate(op, user, target);

        debug!(
            resource = %self.resource,
            action = op.name(),
            object = target.is_some(),
            allowed = decision.is_allowed(),
            "authorization decision"
        );

        decision
    }

    pub fn authorize(&self, op: impl Into<Operation<A>>, user: &U, target: Option<&T>) -> bool {
        self.decide(op, user, target).is_allowed()
    }

    /// Authorize an action given by name, as a string-routed caller sees it.
    ///
    /// A missing name or one the resource does not implement is denied.
    pub fn authorize_named(&self, action: Option<&str>, user: &U, target: Option<&T>) -> bool {
        self.decide_named(action, user, target).is_allowed()
    }

    pub fn decide_named(&self, action: Option<&str>, user: &U, target: Option<&T>) -> Decision {
        let Some(name) = action else {
            debug!(resource = %self.resource, "request names no action");
            return Decision::deny("no action given");
        };

        match Operation::<A>::parse(name) {
            Some(op) => self.decide(op, user, target),
            None => {
                debug!(resource = %self.resource, action = name, "unknown action");
                Decision::deny(format!("'{}' does not implement action '{name}'", self.resource))
            }
        }
    }

    /// Pre-fetch check: may `user` attempt `op` on some object?
    pub fn check_action(&self, op: impl Into<Operation<A>>, user: &U) -> bool {
        self.authorize(op, user, None)
    }

    /// Post-fetch check: may `user` perform `op` on `target`?
    pub fn check_object(&self, op: impl Into<Operation<A>>, user: &U, target: &T) -> bool {
        self.authorize(op, user, Some(target))
    }

    /// Keep only the items `user` may perform `op` on.
    pub fn filter<'a, I>(
        &'a self,
        op: Operation<A>,
        user: &'a U,
        items: I,
    ) -> impl Iterator<Item = &'a T>
    where
        I: IntoIterator<Item = &'a T>,
    {
        items
            .into_iter()
            .filter(move |item| self.authorize(op, user, Some(*item)))
    }

    fn evaluate(&self, op: Operation<A>, user: &U, target: Option<&T>) -> Decision {
        let action = match op {
            Operation::Metadata => return Decision::Allow,
            Operation::Perform(action) => action,
        };

        let Some(spec) = self.actions.get(action) else {
            return Decision::deny(format!(
                "'{}' declares no capabilities for '{}'",
                self.resource,
                action.name()
            ));
        };

        match spec {
            CapabilitySpec::AllowAny => Decision::Allow,
            CapabilitySpec::DenyAll => Decision::deny(format!("'{}' is disabled", action.name())),
            CapabilitySpec::AllowAuthenticated => self.require_all(&[], user, target),
            CapabilitySpec::RequireAll(capabilities) => {
                self.require_all(capabilities, user, target)
            }
        }
    }

    fn require_all(&self, capabilities: &[String], user: &U, target: Option<&T>) -> Decision {
        if !user.is_authenticated() {
            return Decision::deny("authentication required");
        }

        match capabilities
            .iter()
            .find(|capability| !self.resolver.has_capability(user, capability, target))
        {
            Some(missing) => Decision::deny(format!("missing capability '{missing}'")),
            None => Decision::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Predicate, is_authenticated, or};

    struct Person {
        id: u32,
        logged_in: bool,
    }

    impl Subject for Person {
        fn is_authenticated(&self) -> bool {
            self.logged_in
        }
    }

    struct Party {
        hosts: Vec<u32>,
        guests: Vec<u32>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum PartyAction {
        Create,
        Retrieve,
        List,
        Update,
        Destroy,
        Attend,
        Invite,
    }

    impl Action for PartyAction {
        const ALL: &'static [Self] = &[
            Self::Create,
            Self::Retrieve,
            Self::List,
            Self::Update,
            Self::Destroy,
            Self::Attend,
            Self::Invite,
        ];

        fn name(self) -> &'static str {
            match self {
                Self::Create => "create",
                Self::Retrieve => "retrieve",
                Self::List => "list",
                Self::Update => "update",
                Self::Destroy => "destroy",
                Self::Attend => "attend",
                Self::Invite => "invite",
            }
        }
    }

    fn is_host() -> Predicate<Person, Party> {
        Predicate::object("is_host", |p: &Person, party: &Party| {
            party.hosts.contains(&p.id)
        })
    }

    fn is_guest() -> Predicate<Person, Party> {
        Predicate::object("is_guest", |p: &Person, party: &Party| {
            party.guests.contains(&p.id)
        })
    }

    fn registry() -> Arc<Registry<Person, Party>> {
        Arc::new(
            Registry::builder()
                .register("change_party", Some(is_host()))
                .unwrap()
                .register("attend_party", Some(or(is_guest(), is_host())))
                .unwrap()
                .register("be_guest", Some(is_guest()))
                .unwrap()
                .register("wear_badge", Some(is_authenticated()))
                .unwrap()
                .register("anyone_logged_in", None)
                .unwrap()
                .build(),
        )
    }

    fn gate() -> Gate<Person, Party, PartyAction> {
        let actions = ActionMap::new()
            .with(PartyAction::Create, CapabilitySpec::AllowAuthenticated)
            .with(PartyAction::Retrieve, CapabilitySpec::AllowAny)
            .with(PartyAction::List, CapabilitySpec::RequireAll(vec![]))
            .with(
                PartyAction::Update,
                CapabilitySpec::require(["change_party"]),
            )
            .with(PartyAction::Destroy, CapabilitySpec::DenyAll)
            .with(
                PartyAction::Attend,
                CapabilitySpec::require(["attend_party", "wear_badge"]),
            );
        Gate::new("party", actions, registry()).unwrap()
    }

    fn person(id: u32) -> Person {
        Person {
            id,
            logged_in: true,
        }
    }

    fn anonymous() -> Person {
        Person {
            id: 0,
            logged_in: false,
        }
    }

    fn party() -> Party {
        Party {
            hosts: vec![1],
            guests: vec![2],
        }
    }

    #[test]
    fn test_undeclared_action_is_denied_for_everyone() {
        let gate = gate();
        let party = party();

        assert!(!gate.authorize(PartyAction::Invite, &person(1), Some(&party)));
        assert!(!gate.authorize(PartyAction::Invite, &person(1), None));
        assert!(!gate.authorize(PartyAction::Invite, &anonymous(), None));
    }

    #[test]
    fn test_allow_any_admits_anonymous() {
        let gate = gate();
        assert!(gate.authorize(PartyAction::Retrieve, &anonymous(), None));
        assert!(gate.authorize(PartyAction::Retrieve, &anonymous(), Some(&party())));
    }

    #[test]
    fn test_deny_all_overrides_ownership() {
        let gate = gate();
        assert!(!gate.authorize(PartyAction::Destroy, &person(1), Some(&party())));
    }

    #[test]
    fn test_empty_list_means_authenticated() {
        let gate = gate();

        assert!(gate.authorize(PartyAction::List, &person(5), None));
        assert!(!gate.authorize(PartyAction::List, &anonymous(), None));
        assert!(gate.authorize(PartyAction::Create, &person(5), None));
        assert!(!gate.authorize(PartyAction::Create, &anonymous(), None));
    }

    #[test]
    fn test_all_capabilities_must_hold() {
        let gate = gate();
        let party = party();

        assert!(gate.authorize(PartyAction::Attend, &person(2), Some(&party)));
        assert!(gate.authorize(PartyAction::Attend, &person(1), Some(&party)));
        assert!(!gate.authorize(PartyAction::Attend, &person(3), Some(&party)));

        let stranger = Person {
            id: 2,
            logged_in: false,
        };
        assert!(!gate.authorize(PartyAction::Attend, &stranger, Some(&party)));
    }

    #[test]
    fn test_later_capability_failing_denies() {
        let actions = ActionMap::new().with(
            PartyAction::Attend,
            CapabilitySpec::require(["attend_party", "be_guest"]),
        );
        let gate = Gate::new("party", actions, registry()).unwrap();
        let party = party();

        assert!(gate.authorize(PartyAction::Attend, &person(2), Some(&party)));
        assert_eq!(
            gate.decide(PartyAction::Attend, &person(1), Some(&party)),
            Decision::Deny {
                reason: "missing capability 'be_guest'".into()
            }
        );
    }

    #[test]
    fn test_object_check_on_owner() {
        let gate = gate();
        let party = party();

        assert!(gate.check_object(PartyAction::Update, &person(1), &party));
        assert!(!gate.check_object(PartyAction::Update, &person(2), &party));
    }

    #[test]
    fn test_prefetch_may_allow_what_postfetch_denies() {
        let gate = gate();
        let party = party();

        assert!(gate.check_action(PartyAction::Update, &person(2)));
        assert!(!gate.check_object(PartyAction::Update, &person(2), &party));
    }

    #[test]
    fn test_metadata_always_allowed() {
        let gate = gate();
        assert!(gate.authorize(Operation::<PartyAction>::Metadata, &anonymous(), None));
        assert!(gate.authorize_named(Some("metadata"), &anonymous(), None));

        let empty: Gate<Person, Party, PartyAction> =
            Gate::new("party", ActionMap::new(), registry()).unwrap();
        assert!(empty.authorize(Operation::<PartyAction>::Metadata, &anonymous(), None));
    }

    #[test]
    fn test_named_actions() {
        let gate = gate();

        assert!(gate.authorize_named(Some("retrieve"), &anonymous(), None));
        assert!(!gate.authorize_named(Some("explode"), &person(1), None));
        assert!(!gate.authorize_named(None, &person(1), None));
    }

    #[test]
    fn test_decision_reasons() {
        let gate = gate();

        assert_eq!(
            gate.decide(PartyAction::Update, &anonymous(), None),
            Decision::Deny {
                reason: "authentication required".into()
            }
        );
        assert_eq!(
            gate.decide(PartyAction::Update, &person(2), Some(&party())),
            Decision::Deny {
                reason: "missing capability 'change_party'".into()
            }
        );
    }

    #[test]
    fn test_decisions_are_repeatable() {
        let gate = gate();
        let party = party();

        for id in 0..4 {
            let first = gate.authorize(PartyAction::Attend, &person(id), Some(&party));
            for _ in 0..5 {
                assert_eq!(
                    gate.authorize(PartyAction::Attend, &person(id), Some(&party)),
                    first
                );
            }
        }
    }

    #[test]
    fn test_filter_keeps_permitted_rows() {
        let gate = gate();
        let parties = vec![
            Party {
                hosts: vec![1],
                guests: vec![],
            },
            Party {
                hosts: vec![2],
                guests: vec![],
            },
            Party {
                hosts: vec![1, 2],
                guests: vec![],
            },
        ];
        let user = person(1);

        let visible: Vec<_> = gate
            .filter(PartyAction::Update.into(), &user, &parties)
            .collect();
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_new_rejects_unregistered_capability() {
        let actions = ActionMap::new().with(PartyAction::Update, CapabilitySpec::require(["nope"]));
        let result = Gate::new("party", actions, registry());
        assert!(matches!(result, Err(Error::UnknownCapability(name)) if name == "nope"));
    }

    #[test]
    fn test_require_coverage() {
        let gate = gate();
        assert!(matches!(
            gate.require_coverage(),
            Err(Error::UndeclaredAction { action: "invite", .. })
        ));
    }
}
