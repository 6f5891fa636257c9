use tracing::trace;

use crate::nip19::{EventId, Nip19, Nip19Coordinate, Nip19Event, PublicKey};
use crate::tag_parsing::{is_hex64, non_empty_field, tag_field, tag_name};

/// Position of a referenced event in a reply thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Reply,
    Root,
    Mention,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Reply => "reply",
            Marker::Root => "root",
            Marker::Mention => "mention",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "reply" => Some(Marker::Reply),
            "root" => Some(Marker::Root),
            "mention" => Some(Marker::Mention),
            _ => None,
        }
    }
}

/// An `e` or `q` tag pointing at a regular event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTag {
    pub id: EventId,
    pub relay: Option<String>,
    pub marker: Option<Marker>,
    /// Pubkey carried in the tag itself (NIP-10 fifth element).
    pub author: Option<PublicKey>,
}

impl EventTag {
    pub fn to_nip19(&self) -> Nip19 {
        let mut pointer = Nip19Event::new(self.id);
        if let Some(relay) = &self.relay {
            pointer = pointer.with_relay(relay);
        }
        if let Some(author) = self.author {
            pointer = pointer.with_author(author);
        }
        Nip19::Event(pointer)
    }
}

/// An `a` tag pointing at a replaceable event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateTag {
    pub coordinate: Nip19Coordinate,
    pub marker: Option<Marker>,
}

/// A tag classified by its type marker. Anything that does not have the
/// expected shape is `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind<'a> {
    Event(EventTag),
    Pubkey(PublicKey),
    Coordinate(CoordinateTag),
    Hashtag(&'a str),
    Quote(Nip19),
    Unknown,
}

impl<'a> TagKind<'a> {
    pub fn classify(tag: &'a [String]) -> Self {
        let kind = match tag_name(tag) {
            Some("e") => parse_event_tag(tag).map(TagKind::Event),
            Some("p") => tag_field(tag, 1)
                .filter(|value| is_hex64(value))
                .and_then(|value| PublicKey::from_hex(value).ok())
                .map(TagKind::Pubkey),
            Some("a") => parse_coordinate_tag(tag).map(TagKind::Coordinate),
            Some("t") => non_empty_field(tag, 1).map(TagKind::Hashtag),
            Some("q") => parse_quote_tag(tag).map(TagKind::Quote),
            _ => None,
        };

        match kind {
            Some(kind) => kind,
            None => {
                if matches!(tag_name(tag), Some("e" | "p" | "a" | "t" | "q")) {
                    trace!(?tag, "skipping malformed tag");
                }
                TagKind::Unknown
            }
        }
    }
}

/// `["e", <id>, <relay>, <marker>, <pubkey>]`. Some clients put the marker
/// in the relay slot; that is accepted too.
fn parse_event_tag(tag: &[String]) -> Option<EventTag> {
    let id = tag_field(tag, 1).filter(|value| is_hex64(value))?;
    let id = EventId::from_hex(id).ok()?;

    let slot_two = non_empty_field(tag, 2);
    let (relay, marker) = match slot_two.and_then(Marker::parse) {
        Some(marker) => (None, Some(marker)),
        None => (
            slot_two.map(str::to_string),
            tag_field(tag, 3).and_then(Marker::parse),
        ),
    };

    let author = tag_field(tag, 4)
        .filter(|value| is_hex64(value))
        .and_then(|value| PublicKey::from_hex(value).ok());

    Some(EventTag {
        id,
        relay,
        marker,
        author,
    })
}

/// `["a", <kind>:<pubkey>:<d>, <relay>, <marker>]`
fn parse_coordinate_tag(tag: &[String]) -> Option<CoordinateTag> {
    let mut coordinate = Nip19Coordinate::parse_coordinate(tag_field(tag, 1)?).ok()?;
    if let Some(relay) = non_empty_field(tag, 2) {
        coordinate = coordinate.with_relay(relay);
    }

    Some(CoordinateTag {
        coordinate,
        marker: tag_field(tag, 3).and_then(Marker::parse),
    })
}

/// `["q", <id or coordinate>, <relay>, <pubkey>]` (NIP-18 quote).
fn parse_quote_tag(tag: &[String]) -> Option<Nip19> {
    let value = tag_field(tag, 1)?;
    let relay = non_empty_field(tag, 2);

    if is_hex64(value) {
        let mut pointer = Nip19Event::new(EventId::from_hex(value).ok()?);
        if let Some(relay) = relay {
            pointer = pointer.with_relay(relay);
        }
        if let Some(author) = tag_field(tag, 3)
            .filter(|value| is_hex64(value))
            .and_then(|value| PublicKey::from_hex(value).ok())
        {
            pointer = pointer.with_author(author);
        }
        return Some(Nip19::Event(pointer));
    }

    let mut coordinate = Nip19Coordinate::parse_coordinate(value).ok()?;
    if let Some(relay) = relay {
        coordinate = coordinate.with_relay(relay);
    }
    Some(Nip19::Coordinate(coordinate))
}
