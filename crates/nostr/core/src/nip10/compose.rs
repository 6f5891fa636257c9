use std::collections::HashMap;

use super::marker::Marker;
use super::thread::ThreadReference;
use crate::nip01::{Event, EventTemplate};
use crate::nip19::Nip19;
use crate::tag_parsing::{tag_field, tag_name};

/// Tags whose third element is a relay hint.
const HINTED_TAGS: [&str; 4] = ["e", "p", "a", "q"];

/// Fill the relay slot (element 2) of reference tags from `hints`, keyed by
/// the tag value.
///
/// Only non-empty hints are written. Tags without a hint are left exactly as
/// they are; a marker sitting in the relay slot is shifted right.
pub fn apply_relay_hints(tags: &mut [Vec<String>], hints: &HashMap<String, String>) {
    for tag in tags.iter_mut() {
        if !tag_name(tag).is_some_and(|name| HINTED_TAGS.contains(&name)) {
            continue;
        }
        let Some(hint) = tag_field(tag, 1)
            .and_then(|value| hints.get(value))
            .filter(|hint| !hint.is_empty())
            .cloned()
        else {
            continue;
        };

        let slot_holds_marker = tag.get(2).map(|slot| Marker::parse(slot).is_some());
        match slot_holds_marker {
            None => tag.push(hint),
            Some(true) => tag.insert(2, hint),
            Some(false) => tag[2] = hint,
        }
    }
}

impl EventTemplate {
    pub fn with_relay_hints(mut self, hints: &HashMap<String, String>) -> Self {
        apply_relay_hints(&mut self.tags, hints);
        self
    }
}

fn first_relay(identifier: &Nip19) -> String {
    let relays = match identifier {
        Nip19::Event(event) => event.relays(),
        Nip19::Coordinate(coordinate) => coordinate.relays(),
        _ => &[],
    };
    relays.first().cloned().unwrap_or_default()
}

fn marked_tag(identifier: &Nip19, marker: Marker) -> Option<Vec<String>> {
    let relay = first_relay(identifier);
    match identifier {
        Nip19::Event(event) => {
            let mut tag = vec![
                "e".to_string(),
                event.event_id.to_hex(),
                relay,
                marker.as_str().to_string(),
            ];
            if let Some(author) = event.author {
                tag.push(author.to_hex());
            }
            Some(tag)
        }
        Nip19::EventId(id) => Some(vec![
            "e".to_string(),
            id.to_hex(),
            relay,
            marker.as_str().to_string(),
        ]),
        Nip19::Coordinate(coordinate) => Some(vec![
            "a".to_string(),
            coordinate.coordinate(),
            relay,
            marker.as_str().to_string(),
        ]),
        _ => None,
    }
}

/// Tags for a reply to `parent`, given the parent's own resolved thread.
///
/// Emits a `root` marked tag (the parent itself when it starts the thread),
/// a `reply` marked tag for the parent when it is not the root, and `p` tags
/// for the parent author followed by everyone the parent already notified.
pub fn reply_tags(parent: &Event, parent_thread: &ThreadReference) -> Vec<Vec<String>> {
    let parent_tag = |marker: Marker| {
        let mut tag = vec![
            "e".to_string(),
            parent.id.clone(),
            String::new(),
            marker.as_str().to_string(),
        ];
        if !parent.pubkey.is_empty() {
            tag.push(parent.pubkey.clone());
        }
        tag
    };

    let mut tags = Vec::new();
    match parent_thread
        .root
        .as_ref()
        .and_then(|root| marked_tag(root, Marker::Root))
    {
        Some(root_tag) => {
            tags.push(root_tag);
            tags.push(parent_tag(Marker::Reply));
        }
        None => tags.push(parent_tag(Marker::Root)),
    }

    let mut notified: Vec<String> = Vec::new();
    let parent_author = Some(parent.pubkey.clone()).filter(|pubkey| !pubkey.is_empty());
    for pubkey in parent_author.into_iter().chain(
        parent_thread
            .mentioned_pubkeys
            .iter()
            .map(|pubkey| pubkey.to_hex()),
    ) {
        if !notified.contains(&pubkey) {
            notified.push(pubkey);
        }
    }
    tags.extend(notified.into_iter().map(|pubkey| vec!["p".to_string(), pubkey]));

    tags
}
