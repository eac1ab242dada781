//! The acting user, as seen by the engine.

/// An identity whose requests are authorized.
///
/// The engine never owns subjects; the identity provider hands them in for
/// the duration of a check.
pub trait Subject {
    /// `false` for anonymous callers.
    fn is_authenticated(&self) -> bool;

    /// Whether the subject holds every one of `names` as a coarse grant.
    ///
    /// Coarse grants are assigned outside this engine and are not scoped to
    /// any object. Subjects that carry no precomputed set grant everything
    /// here, leaving the decision to authentication alone.
    fn has_coarse_capabilities(&self, names: &[&str]) -> bool {
        let _ = names;
        true
    }
}

impl<S: Subject + ?Sized> Subject for &S {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }

    fn has_coarse_capabilities(&self, names: &[&str]) -> bool {
        (**self).has_coarse_capabilities(names)
    }
}
