//! Named boolean tests over `(subject, target)`.

use crate::Subject;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Whether a predicate needs a concrete target to say anything useful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Decided from the subject alone.
    Global,
    /// Decided from the subject's relationship to a target object.
    Object,
}

type TestFn<U, T> = dyn Fn(&U, Option<&T>) -> bool + Send + Sync;

/// A named, pure test of one relationship between a subject and a target.
///
/// Predicates are cheap to clone and may be evaluated any number of times
/// per request. They must not mutate either argument.
pub struct Predicate<U: ?Sized, T: ?Sized> {
    name: Cow<'static, str>,
    scope: Scope,
    test: Arc<TestFn<U, T>>,
}

impl<U: ?Sized + 'static, T: ?Sized + 'static> Predicate<U, T> {
    /// A predicate that only looks at the subject.
    pub fn global<F>(name: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(&U) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            scope: Scope::Global,
            test: Arc::new(move |user: &U, _: Option<&T>| test(user)),
        }
    }

    /// A predicate over a target object. Without a target it is `false`.
    pub fn object<F>(name: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(&U, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            scope: Scope::Object,
            test: Arc::new(move |user: &U, target: Option<&T>| {
                target.is_some_and(|target| test(user, target))
            }),
        }
    }

    pub(crate) fn composite<F>(name: String, scope: Scope, test: F) -> Self
    where
        F: Fn(&U, Option<&T>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: Cow::Owned(name),
            scope,
            test: Arc::new(test),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn requires_object(&self) -> bool {
        self.scope == Scope::Object
    }

    /// Run the test.
    pub fn evaluate(&self, user: &U, target: Option<&T>) -> bool {
        (self.test)(user, target)
    }
}

impl<U: ?Sized, T: ?Sized> Clone for Predicate<U, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            scope: self.scope,
            test: Arc::clone(&self.test),
        }
    }
}

impl<U: ?Sized, T: ?Sized> fmt::Debug for Predicate<U, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish()
    }
}

impl<U: ?Sized, T: ?Sized> fmt::Display for Predicate<U, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// True iff the subject is logged in.
pub fn is_authenticated<U: Subject + ?Sized + 'static, T: ?Sized + 'static>() -> Predicate<U, T> {
    Predicate::global("is_authenticated", |user: &U| user.is_authenticated())
}

/// True iff the subject is logged in and carries `capability` as a coarse grant.
///
/// Used for capabilities that have no object to check against, such as
/// creating a new top-level record.
pub fn granted<U: Subject + ?Sized + 'static, T: ?Sized + 'static>(
    capability: impl Into<Cow<'static, str>>,
) -> Predicate<U, T> {
    let capability = capability.into();
    let name = format!("granted({capability})");
    Predicate::global(name, move |user: &U| {
        user.is_authenticated() && user.has_coarse_capabilities(&[capability.as_ref()])
    })
}
