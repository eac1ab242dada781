//! Boolean algebra over predicates.
//!
//! Composites evaluate left to right and stop as soon as the outcome is
//! known, so an expensive lookup on the right is skipped when the left side
//! already decides.

use crate::predicate::{Predicate, Scope};

fn widest(left: Scope, right: Scope) -> Scope {
    if left == Scope::Object || right == Scope::Object {
        Scope::Object
    } else {
        Scope::Global
    }
}

/// Both predicates hold.
pub fn and<U: ?Sized + 'static, T: ?Sized + 'static>(
    left: Predicate<U, T>,
    right: Predicate<U, T>,
) -> Predicate<U, T> {
    let name = format!("({left} & {right})");
    let scope = widest(left.scope(), right.scope());
    Predicate::composite(name, scope, move |user: &U, target: Option<&T>| {
        left.evaluate(user, target) && right.evaluate(user, target)
    })
}

/// At least one predicate holds.
pub fn or<U: ?Sized + 'static, T: ?Sized + 'static>(
    left: Predicate<U, T>,
    right: Predicate<U, T>,
) -> Predicate<U, T> {
    let name = format!("({left} | {right})");
    let scope = widest(left.scope(), right.scope());
    Predicate::composite(name, scope, move |user: &U, target: Option<&T>| {
        left.evaluate(user, target) || right.evaluate(user, target)
    })
}

/// The predicate does not hold.
///
/// Note that negating an object predicate makes it `true` when no target is
/// given.
pub fn not<U: ?Sized + 'static, T: ?Sized + 'static>(inner: Predicate<U, T>) -> Predicate<U, T> {
    let name = format!("!{inner}");
    let scope = inner.scope();
    Predicate::composite(name, scope, move |user: &U, target: Option<&T>| {
        !inner.evaluate(user, target)
    })
}
