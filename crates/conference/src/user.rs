//! The acting user.

use crate::ids::UserId;
use policy::Subject;
use std::collections::BTreeSet;

/// A user as supplied by the identity provider.
///
/// `coarse` holds capability names granted outside the object-level rules
/// (for example by an administrator). `None` means no such set was loaded,
/// in which case coarse checks fall back to authentication alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    authenticated: bool,
    coarse: Option<BTreeSet<String>>,
}

impl User {
    /// A logged-in user.
    pub fn authenticated(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            authenticated: true,
            coarse: None,
        }
    }

    /// A caller that has not logged in.
    pub fn anonymous() -> Self {
        Self {
            id: UserId::anonymous(),
            username: String::new(),
            authenticated: false,
            coarse: None,
        }
    }

    /// Attach the user's coarse capability set.
    pub fn with_coarse_capabilities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coarse = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn coarse_capabilities(&self) -> Option<&BTreeSet<String>> {
        self.coarse.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        !self.authenticated
    }
}

impl Subject for User {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn has_coarse_capabilities(&self, names: &[&str]) -> bool {
        match &self.coarse {
            Some(set) => names.iter().all(|name| set.contains(*name)),
            None => true,
        }
    }
}
