//! Decides whether a subject holds a single named capability.

use crate::{Registry, Result, Subject};
use std::sync::Arc;
use tracing::error;

/// Evaluates capabilities against a shared [`Registry`].
///
/// Every check is side-effect free apart from whatever reads the registered
/// predicates perform, so it is safe to call once per row when filtering a
/// listing.
pub struct Resolver<U: ?Sized, T: ?Sized> {
    registry: Arc<Registry<U, T>>,
}

impl<U: ?Sized, T: ?Sized> Clone for Resolver<U, T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<U, T> Resolver<U, T>
where
    U: Subject + ?Sized + 'static,
    T: ?Sized + 'static,
{
    pub fn new(registry: Arc<Registry<U, T>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry<U, T> {
        &self.registry
    }

    /// Check `capability` for `user`, optionally against `target`.
    ///
    /// Without a target, an object predicate cannot be evaluated; the answer
    /// is then the coarse one: the user is authenticated and carries the
    /// capability as a coarse grant. A coarse `true` does not imply the
    /// object check will pass.
    ///
    /// Names that were never registered deny.
    pub fn has_capability(&self, user: &U, capability: &str, target: Option<&T>) -> bool {
        match self.try_has_capability(user, capability, target) {
            Ok(held) => held,
            Err(e) => {
                error!(
                    capability,
                    error = %e,
                    "capability check against unregistered name"
                );
                false
            }
        }
    }

    /// Like [`has_capability`](Self::has_capability), but reports unregistered
    /// names as [`Error::UnknownCapability`](crate::Error::UnknownCapability).
    pub fn try_has_capability(
        &self,
        user: &U,
        capability: &str,
        target: Option<&T>,
    ) -> Result<bool> {
        let held = match self.registry.lookup(capability)? {
            None => user.is_authenticated(),
            Some(predicate) => match target {
                Some(target) => predicate.evaluate(user, Some(target)),
                None if predicate.requires_object() => {
                    user.is_authenticated() && user.has_coarse_capabilities(&[capability])
                }
                None => predicate.evaluate(user, None),
            },
        };
        Ok(held)
    }
}
