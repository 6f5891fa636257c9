//! NIP-18: Reposts
//!
//! A repost (boost) points at the reposted note with an `e` tag and may carry
//! the reposted event serialized as JSON in its content.
//!
//! See: <https://github.com/nostr-protocol/nips/blob/master/18.md>

use tracing::trace;

use crate::nip01::{Event, KIND_GENERIC_REPOST, KIND_REPOST};
use crate::nip10::TagKind;
use crate::nip19::EventId;

pub fn is_repost_kind(kind: u16) -> bool {
    kind == KIND_REPOST || kind == KIND_GENERIC_REPOST
}

/// Id of the reposted event: the first well-formed `e` tag.
pub fn boosted_event_id(event: &Event) -> Option<EventId> {
    event.tags.iter().find_map(|tag| match TagKind::classify(tag) {
        TagKind::Event(event_tag) => Some(event_tag.id),
        _ => None,
    })
}

/// The reposted event embedded in the content, if it parses and matches the
/// `e` tag.
pub fn embedded_event(event: &Event) -> Option<Event> {
    let target = boosted_event_id(event)?;
    if event.content.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Event>(&event.content) {
        Ok(embedded) if EventId::from_hex(&embedded.id).ok() == Some(target) => Some(embedded),
        Ok(embedded) => {
            trace!(repost = %event.id, embedded = %embedded.id, "embedded event does not match e tag");
            None
        }
        Err(error) => {
            trace!(repost = %event.id, %error, "repost content is not an event");
            None
        }
    }
}
