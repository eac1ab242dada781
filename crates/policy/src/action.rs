//! Per-resource declarations of what each action requires.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::path::Path;

/// Reserved action name for metadata probes (CORS preflight and the like).
pub const METADATA: &str = "metadata";

/// A closed set of actions a resource implements.
pub trait Action: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every action the resource implements.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.name() == name)
    }
}

/// What an inbound request asks to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation<A> {
    /// Introspection. Always allowed.
    Metadata,
    /// A declared action of the resource.
    Perform(A),
}

impl<A: Action> Operation<A> {
    /// Parse an action name; `"metadata"` is reserved.
    pub fn parse(name: &str) -> Option<Self> {
        if name == METADATA {
            Some(Self::Metadata)
        } else {
            A::parse(name).map(Self::Perform)
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Metadata => METADATA,
            Self::Perform(action) => action.name(),
        }
    }
}

impl<A> From<A> for Operation<A> {
    fn from(action: A) -> Self {
        Self::Perform(action)
    }
}

/// What the subject must satisfy to perform an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSpec", into = "RawSpec")]
pub enum CapabilitySpec {
    /// Authenticated, and every listed capability holds.
    RequireAll(Vec<String>),
    /// Anyone, including anonymous subjects.
    AllowAny,
    /// Any authenticated subject. Same as an empty `RequireAll`.
    AllowAuthenticated,
    /// Nobody.
    DenyAll,
}

impl CapabilitySpec {
    pub fn require<I, S>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RequireAll(capabilities.into_iter().map(Into::into).collect())
    }

    /// Capability names this requirement refers to.
    pub fn capabilities(&self) -> &[String] {
        match self {
            Self::RequireAll(names) => names.as_slice(),
            _ => &[],
        }
    }
}

impl fmt::Display for CapabilitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequireAll(names) if names.is_empty() => f.write_str("[]"),
            Self::RequireAll(names) => write!(f, "[{}]", names.join(", ")),
            Self::AllowAny => f.write_str("allow_any"),
            Self::AllowAuthenticated => f.write_str("allow_authenticated"),
            Self::DenyAll => f.write_str("deny_all"),
        }
    }
}

// Either `["change_event"]` or a keyword such as `"allow_any"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSpec {
    Keyword(Keyword),
    Capabilities(Vec<String>),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Keyword {
    AllowAny,
    AllowAuthenticated,
    DenyAll,
}

impl From<RawSpec> for CapabilitySpec {
    fn from(raw: RawSpec) -> Self {
        match raw {
            RawSpec::Keyword(Keyword::AllowAny) => Self::AllowAny,
            RawSpec::Keyword(Keyword::AllowAuthenticated) => Self::AllowAuthenticated,
            RawSpec::Keyword(Keyword::DenyAll) => Self::DenyAll,
            RawSpec::Capabilities(names) => Self::RequireAll(names),
        }
    }
}

impl From<CapabilitySpec> for RawSpec {
    fn from(spec: CapabilitySpec) -> Self {
        match spec {
            CapabilitySpec::AllowAny => Self::Keyword(Keyword::AllowAny),
            CapabilitySpec::AllowAuthenticated => Self::Keyword(Keyword::AllowAuthenticated),
            CapabilitySpec::DenyAll => Self::Keyword(Keyword::DenyAll),
            CapabilitySpec::RequireAll(names) => Self::Capabilities(names),
        }
    }
}

/// Action to capability requirements for one resource type.
#[derive(Debug, Clone)]
pub struct ActionMap<A> {
    entries: HashMap<A, CapabilitySpec>,
}

impl<A> Default for ActionMap<A> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<A: Action> ActionMap<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: A, spec: CapabilitySpec) -> Self {
        self.insert(action, spec);
        self
    }

    pub fn insert(&mut self, action: A, spec: CapabilitySpec) -> Option<CapabilitySpec> {
        self.entries.insert(action, spec)
    }

    pub fn get(&self, action: A) -> Option<&CapabilitySpec> {
        self.entries.get(&action)
    }

    /// Declared entries, in the order of [`Action::ALL`].
    pub fn iter(&self) -> impl Iterator<Item = (A, &CapabilitySpec)> {
        A::ALL
            .iter()
            .filter_map(|action| self.entries.get(action).map(|spec| (*action, spec)))
    }

    /// Every capability name referenced by any entry.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .flat_map(|spec| spec.capabilities().iter().map(String::as_str))
    }

    /// Implemented actions with no entry.
    pub fn missing(&self) -> Vec<A> {
        A::ALL
            .iter()
            .copied()
            .filter(|action| !self.entries.contains_key(action))
            .collect()
    }

    /// Replace entries with those declared in `overrides`.
    pub fn merge(&mut self, overrides: ActionMap<A>) {
        self.entries.extend(overrides.entries);
    }

    /// Build from action names, rejecting names the resource does not implement.
    pub fn from_names<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, CapabilitySpec)>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for (name, spec) in entries {
            let name = name.as_ref();
            if name == METADATA {
                return Err(Error::Invalid(format!("'{METADATA}' is reserved and always allowed")));
            }
            let action = A::parse(name)
                .ok_or_else(|| Error::Parse(format!("unknown action '{name}'")))?;
            map.insert(action, spec);
        }
        Ok(map)
    }

    /// Load an action map from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse an action map from a TOML table such as
    /// `update = ["change_event"]` / `retrieve = "allow_any"`.
    pub fn parse(toml: &str) -> Result<Self> {
        let raw: BTreeMap<String, CapabilitySpec> =
            toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        Self::from_names(raw)
    }
}
