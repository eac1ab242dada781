//! Capability name to predicate table.

use crate::{Error, Predicate, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Collects registrations during startup.
///
/// Consumed by [`build`](Self::build); the resulting [`Registry`] cannot be
/// modified.
pub struct RegistryBuilder<U: ?Sized, T: ?Sized> {
    entries: BTreeMap<String, Option<Predicate<U, T>>>,
}

impl<U: ?Sized, T: ?Sized> Default for RegistryBuilder<U, T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<U: ?Sized, T: ?Sized> RegistryBuilder<U, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`.
    ///
    /// `None` means any authenticated subject holds the capability, with no
    /// object check.
    pub fn register(
        mut self,
        name: impl Into<String>,
        predicate: Option<Predicate<U, T>>,
    ) -> Result<Self> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::DuplicateCapability(name));
        }
        self.entries.insert(name, predicate);
        Ok(self)
    }

    pub fn build(self) -> Registry<U, T> {
        Registry {
            entries: self.entries,
        }
    }
}

/// Immutable capability table.
///
/// Built once at startup, then shared read-only (usually behind an `Arc`).
pub struct Registry<U: ?Sized, T: ?Sized> {
    entries: BTreeMap<String, Option<Predicate<U, T>>>,
}

impl<U: ?Sized, T: ?Sized> Registry<U, T> {
    pub fn builder() -> RegistryBuilder<U, T> {
        RegistryBuilder::new()
    }

    /// Find the rule for `name`.
    ///
    /// `Ok(None)` is a capability registered as "any authenticated subject";
    /// a name that was never registered is an error.
    pub fn lookup(&self, name: &str) -> Result<Option<&Predicate<U, T>>> {
        self.entries
            .get(name)
            .map(Option::as_ref)
            .ok_or_else(|| Error::UnknownCapability(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Registered names with their rules, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&Predicate<U, T>>)> {
        self.entries
            .iter()
            .map(|(name, rule)| (name.as_str(), rule.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<U: ?Sized, T: ?Sized> fmt::Debug for Registry<U, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
