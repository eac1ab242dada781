//! Resolving `--target` arguments against the store.
//!
//! A target is written `kind:path`:
//!
//! | kind | path |
//! |---|---|
//! | `event` | `<event>` |
//! | `activity`, `track` | `<event>/<slug>` |
//! | `submission`, `review` | `<uuid>` |
//! | `event_registration` | `<event>/<username>` |
//! | `activity_registration` | `<event>/<activity>/<username>` |
//! | `user` | `<username>` |

use crate::error::{Error, Result};
use conference::{Object, ResourceKind};
use std::str::FromStr;
use storage::ConferenceStore;

pub fn resolve(store: &ConferenceStore, target: &str) -> Result<Object> {
    let invalid = |reason: &str| Error::InvalidTarget {
        target: target.to_string(),
        reason: reason.to_string(),
    };

    let (kind, path) = target
        .split_once(':')
        .ok_or_else(|| invalid("expected kind:path"))?;
    let kind: ResourceKind = kind.parse().map_err(|_| invalid("unknown kind"))?;
    let parts: Vec<&str> = path.split('/').collect();
    let missing = || Error::TargetNotFound(target.to_string());

    let object: Object = match (kind, parts.as_slice()) {
        (ResourceKind::Event, [slug]) => store.event_by_slug(slug)?.ok_or_else(missing)?.into(),
        (ResourceKind::Activity, [event, slug]) => {
            let event = store.event_by_slug(event)?.ok_or_else(missing)?;
            store
                .activity_by_slug(event.id, slug)?
                .ok_or_else(missing)?
                .into()
        }
        (ResourceKind::Track, [event, slug]) => {
            let event = store.event_by_slug(event)?.ok_or_else(missing)?;
            store
                .track_by_slug(event.id, slug)?
                .ok_or_else(missing)?
                .into()
        }
        (ResourceKind::Submission, [id]) => store
            .submission(parse_id(id, &invalid)?)?
            .ok_or_else(missing)?
            .into(),
        (ResourceKind::Review, [id]) => store
            .review(parse_id(id, &invalid)?)?
            .ok_or_else(missing)?
            .into(),
        (ResourceKind::EventRegistration, [event, username]) => {
            let event = store.event_by_slug(event)?.ok_or_else(missing)?;
            let user = store.user_id(username)?.ok_or_else(missing)?;
            store
                .registration_of(event.id, user)?
                .ok_or_else(missing)?
                .into()
        }
        (ResourceKind::ActivityRegistration, [event, activity, username]) => {
            let event = store.event_by_slug(event)?.ok_or_else(missing)?;
            let activity = store
                .activity_by_slug(event.id, activity)?
                .ok_or_else(missing)?;
            let user = store.user_id(username)?.ok_or_else(missing)?;
            let registration = store.registration_of(event.id, user)?.ok_or_else(missing)?;
            store
                .activity_registration_of(activity.id, registration.id)?
                .ok_or_else(missing)?
                .into()
        }
        (ResourceKind::User, [username]) => store.user_id(username)?.ok_or_else(missing)?.into(),
        _ => return Err(invalid("wrong number of path segments")),
    };

    Ok(object)
}

fn parse_id<T: FromStr>(id: &str, invalid: &impl Fn(&str) -> Error) -> Result<T> {
    id.parse().map_err(|_| invalid("not a uuid"))
}
