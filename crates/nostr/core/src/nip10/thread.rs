use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::lookup::ReferenceLookup;
use super::marker::{CoordinateTag, EventTag, Marker, TagKind};
use crate::nip01::{Event, KIND_HIGHLIGHT, KIND_LONG_FORM};
use crate::nip19::{Nip19, PublicKey};
use crate::nip21;

static HASHTAG_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([\p{L}\p{N}_]+)").ok());

/// Thread position and references of a single event, derived from its tags
/// and content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadReference {
    pub reply_to: Option<Nip19>,
    pub reply_to_author: Option<PublicKey>,
    pub root: Option<Nip19>,
    /// Mentioned and quoted events, first occurrence order.
    pub mentioned_events: Vec<Nip19>,
    pub mentioned_pubkeys: BTreeSet<PublicKey>,
    /// Lowercased.
    pub hashtags: BTreeSet<String>,
}

impl ThreadReference {
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }

    pub fn reply_to_key(&self) -> Option<String> {
        self.reply_to.as_ref().and_then(Nip19::lookup_key)
    }

    pub fn root_key(&self) -> Option<String> {
        self.root.as_ref().and_then(Nip19::lookup_key)
    }
}

/// Tags of one event, classified once and kept in tag order.
struct ClassifiedTags<'a> {
    events: Vec<EventTag>,
    coordinates: Vec<CoordinateTag>,
    pubkeys: Vec<PublicKey>,
    hashtags: Vec<&'a str>,
    quotes: Vec<Nip19>,
}

impl<'a> ClassifiedTags<'a> {
    fn new(tags: &'a [Vec<String>]) -> Self {
        let mut classified = Self {
            events: Vec::new(),
            coordinates: Vec::new(),
            pubkeys: Vec::new(),
            hashtags: Vec::new(),
            quotes: Vec::new(),
        };

        for tag in tags {
            match TagKind::classify(tag) {
                TagKind::Event(event) => classified.events.push(event),
                TagKind::Coordinate(coordinate) => classified.coordinates.push(coordinate),
                TagKind::Pubkey(pubkey) => classified.pubkeys.push(pubkey),
                TagKind::Hashtag(hashtag) => classified.hashtags.push(hashtag),
                TagKind::Quote(quote) => classified.quotes.push(quote),
                TagKind::Unknown => {}
            }
        }

        classified
    }

    fn event_marked(&self, marker: Marker) -> Option<&EventTag> {
        self.events.iter().find(|tag| tag.marker == Some(marker))
    }

    fn coordinate_marked(&self, marker: Marker) -> Option<&CoordinateTag> {
        self.coordinates.iter().find(|tag| tag.marker == Some(marker))
    }

    /// True when no `e` tag carries a marker (deprecated positional form).
    fn is_positional(&self) -> bool {
        self.events.iter().all(|tag| tag.marker.is_none())
    }
}

/// A resolved reply or root target.
enum Target<'t> {
    Event(&'t EventTag),
    Coordinate(&'t CoordinateTag),
}

impl Target<'_> {
    fn to_nip19(&self) -> Nip19 {
        match self {
            Target::Event(tag) => tag.to_nip19(),
            Target::Coordinate(tag) => Nip19::Coordinate(tag.coordinate.clone()),
        }
    }

    /// Co-located author first, then whatever the host knows.
    fn author(&self, lookup: &dyn ReferenceLookup) -> Option<PublicKey> {
        match self {
            Target::Event(tag) => tag.author.or_else(|| lookup.author_of(&tag.id.to_hex())),
            Target::Coordinate(tag) => Some(tag.coordinate.author),
        }
    }
}

/// Reply target: `reply` marker, then `root` marker, then the last `e` tag
/// that is not a mention. Falls back to a marked `a` tag when the event
/// carries no usable `e` tag.
fn reply_target<'t>(tags: &'t ClassifiedTags<'_>) -> Option<Target<'t>> {
    tags.event_marked(Marker::Reply)
        .or_else(|| tags.event_marked(Marker::Root))
        .or_else(|| {
            tags.events
                .iter()
                .rev()
                .find(|tag| tag.marker != Some(Marker::Mention))
        })
        .map(Target::Event)
        .or_else(|| {
            tags.coordinate_marked(Marker::Reply)
                .or_else(|| tags.coordinate_marked(Marker::Root))
                .map(Target::Coordinate)
        })
}

/// Root target: highlight, then article, then note.
fn root_target<'t>(
    tags: &'t ClassifiedTags<'_>,
    lookup: &dyn ReferenceLookup,
) -> Option<Target<'t>> {
    let root_events = || {
        tags.events
            .iter()
            .filter(|tag| tag.marker == Some(Marker::Root))
    };

    let highlight = root_events()
        .find(|tag| lookup.kind_of(&tag.id.to_hex()) == Some(KIND_HIGHLIGHT))
        .map(Target::Event)
        .or_else(|| {
            tags.coordinates
                .iter()
                .find(|tag| {
                    tag.marker == Some(Marker::Root)
                        && tag.coordinate.kind == u32::from(KIND_HIGHLIGHT)
                })
                .map(Target::Coordinate)
        });

    let article = || {
        tags.coordinate_marked(Marker::Root)
            .or_else(|| {
                tags.coordinates.iter().find(|tag| {
                    tag.marker.is_none() && tag.coordinate.kind == u32::from(KIND_LONG_FORM)
                })
            })
            .map(Target::Coordinate)
    };

    let note = || {
        root_events()
            .next()
            .or_else(|| {
                if tags.is_positional() {
                    tags.events.first()
                } else {
                    None
                }
            })
            .map(Target::Event)
    };

    highlight.or_else(article).or_else(note)
}

fn content_hashtags(content: &str) -> impl Iterator<Item = &str> {
    HASHTAG_REGEX
        .as_ref()
        .into_iter()
        .flat_map(move |regex| regex.captures_iter(content))
        .filter_map(|captures| captures.get(1))
        .map(|hashtag| hashtag.as_str())
}

/// Derive the thread structure of `event`.
///
/// Never fails: malformed tags are treated as absent.
pub fn resolve_thread(event: &Event, lookup: &dyn ReferenceLookup) -> ThreadReference {
    let tags = ClassifiedTags::new(&event.tags);
    let content_refs = nip21::extract_uris(&event.content);

    let reply = reply_target(&tags);
    let root = root_target(&tags, lookup);

    let reply_to_author = reply.as_ref().and_then(|target| target.author(lookup));
    let root_author = root.as_ref().and_then(|target| target.author(lookup));

    let mut mentioned_pubkeys: BTreeSet<PublicKey> = tags.pubkeys.iter().copied().collect();
    mentioned_pubkeys.extend(reply_to_author);
    mentioned_pubkeys.extend(root_author);
    mentioned_pubkeys.extend(content_refs.iter().filter_map(|identifier| match identifier {
        Nip19::Pubkey(_) | Nip19::Profile(_) => identifier.public_key(),
        _ => None,
    }));

    let mut seen = HashSet::new();
    let mentioned_events = tags
        .events
        .iter()
        .filter(|tag| tag.marker == Some(Marker::Mention))
        .map(EventTag::to_nip19)
        .chain(tags.quotes.iter().cloned())
        .chain(
            content_refs
                .into_iter()
                .filter(|identifier| identifier.lookup_key().is_some()),
        )
        .filter(|identifier| {
            identifier
                .lookup_key()
                .is_some_and(|key| seen.insert(key))
        })
        .collect();

    let hashtags = tags
        .hashtags
        .iter()
        .copied()
        .chain(content_hashtags(&event.content))
        .map(str::to_lowercase)
        .collect();

    ThreadReference {
        reply_to: reply.as_ref().map(Target::to_nip19),
        reply_to_author,
        root: root.as_ref().map(Target::to_nip19),
        mentioned_events,
        mentioned_pubkeys,
        hashtags,
    }
}
