use bech32::primitives::decode::{CheckedHrpstring, CheckedHrpstringError};
use bech32::{Bech32, Hrp};
use tracing::trace;

use super::error::{Nip19Error, Result};
use super::keys::{EventId, PublicKey, SecretKey};
use super::tlv::{TLV_AUTHOR, TLV_KIND, TLV_RELAY, TLV_SPECIAL, TlvReader, TlvWriter};

pub const PREFIX_NPUB: &str = "npub";
pub const PREFIX_NSEC: &str = "nsec";
pub const PREFIX_NOTE: &str = "note";
pub const PREFIX_NEVENT: &str = "nevent";
pub const PREFIX_NADDR: &str = "naddr";
pub const PREFIX_NPROFILE: &str = "nprofile";
pub const PREFIX_NRELAY: &str = "nrelay";

/// Adds `url` unless it is empty or already present. Keeps first-occurrence order.
fn push_relay(relays: &mut Vec<String>, url: &str) {
    if !url.is_empty() && !relays.iter().any(|existing| existing == url) {
        relays.push(url.to_string());
    }
}

/// Event pointer (`nevent`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nip19Event {
    pub event_id: EventId,
    relays: Vec<String>,
    pub author: Option<PublicKey>,
    pub kind: Option<u32>,
}

impl Nip19Event {
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            relays: Vec::new(),
            author: None,
            kind: None,
        }
    }

    pub fn with_relay(mut self, url: impl AsRef<str>) -> Self {
        push_relay(&mut self.relays, url.as_ref());
        self
    }

    /// Relay hints in first-occurrence order, no duplicates, none empty.
    pub fn relays(&self) -> &[String] {
        &self.relays
    }

    pub fn with_author(mut self, author: PublicKey) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_kind(mut self, kind: u32) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Replaceable event pointer (`naddr`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nip19Coordinate {
    pub kind: u32,
    pub author: PublicKey,
    /// The `d` tag value. May be empty.
    pub identifier: String,
    relays: Vec<String>,
}

impl Nip19Coordinate {
    pub fn new(kind: u32, author: PublicKey, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            author,
            identifier: identifier.into(),
            relays: Vec::new(),
        }
    }

    pub fn with_relay(mut self, url: impl AsRef<str>) -> Self {
        push_relay(&mut self.relays, url.as_ref());
        self
    }

    /// Relay hints in first-occurrence order, no duplicates, none empty.
    pub fn relays(&self) -> &[String] {
        &self.relays
    }

    /// Renders the `a` tag form `<kind>:<pubkey hex>:<identifier>`.
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.kind, self.author.to_hex(), self.identifier)
    }

    /// Parses the `a` tag form. The identifier may itself contain `:`.
    pub fn parse_coordinate(value: &str) -> Result<Self> {
        let mut parts = value.splitn(3, ':');
        let (Some(kind), Some(author), Some(identifier)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Nip19Error::MalformedPayload(format!(
                "coordinate needs kind:pubkey:identifier, got {value:?}"
            )));
        };

        let kind = kind
            .parse::<u32>()
            .map_err(|e| Nip19Error::MalformedPayload(format!("invalid coordinate kind: {e}")))?;
        let author = PublicKey::from_hex(author)?;

        Ok(Self::new(kind, author, identifier))
    }
}

/// Profile pointer (`nprofile`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nip19Profile {
    pub public_key: PublicKey,
    relays: Vec<String>,
}

impl Nip19Profile {
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            relays: Vec::new(),
        }
    }

    pub fn with_relay(mut self, url: impl AsRef<str>) -> Self {
        push_relay(&mut self.relays, url.as_ref());
        self
    }

    /// Relay hints in first-occurrence order, no duplicates, none empty.
    pub fn relays(&self) -> &[String] {
        &self.relays
    }
}

/// Relay pointer (`nrelay`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nip19Relay {
    pub url: String,
}

impl Nip19Relay {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Any bech32-encoded protocol identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Nip19 {
    Pubkey(PublicKey),
    Secret(SecretKey),
    EventId(EventId),
    Event(Nip19Event),
    Coordinate(Nip19Coordinate),
    Profile(Nip19Profile),
    Relay(Nip19Relay),
}

impl Nip19 {
    pub fn prefix(&self) -> &'static str {
        match self {
            Nip19::Pubkey(_) => PREFIX_NPUB,
            Nip19::Secret(_) => PREFIX_NSEC,
            Nip19::EventId(_) => PREFIX_NOTE,
            Nip19::Event(_) => PREFIX_NEVENT,
            Nip19::Coordinate(_) => PREFIX_NADDR,
            Nip19::Profile(_) => PREFIX_NPROFILE,
            Nip19::Relay(_) => PREFIX_NRELAY,
        }
    }

    pub fn from_bech32(text: &str) -> Result<Self> {
        decode(text)
    }

    pub fn to_bech32(&self) -> Result<String> {
        encode(self)
    }

    /// Key used to look the referenced thing up in local state: event id hex
    /// for event references, `kind:pubkey:identifier` for coordinates.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            Nip19::EventId(id) => Some(id.to_hex()),
            Nip19::Event(event) => Some(event.event_id.to_hex()),
            Nip19::Coordinate(coordinate) => Some(coordinate.coordinate()),
            Nip19::Pubkey(_) | Nip19::Secret(_) | Nip19::Profile(_) | Nip19::Relay(_) => None,
        }
    }

    /// The pubkey carried inside the identifier itself, if any.
    pub fn public_key(&self) -> Option<PublicKey> {
        match self {
            Nip19::Pubkey(pubkey) => Some(*pubkey),
            Nip19::Profile(profile) => Some(profile.public_key),
            Nip19::Event(event) => event.author,
            Nip19::Coordinate(coordinate) => Some(coordinate.author),
            Nip19::Secret(_) | Nip19::EventId(_) | Nip19::Relay(_) => None,
        }
    }
}

fn map_bech32_error(error: CheckedHrpstringError) -> Nip19Error {
    match error {
        CheckedHrpstringError::Checksum(_) => Nip19Error::InvalidChecksum,
        other => Nip19Error::MalformedPayload(other.to_string()),
    }
}

/// Decode a bech32 identifier.
///
/// The checksum is verified before the prefix or payload are looked at.
pub fn decode(text: &str) -> Result<Nip19> {
    let checked = CheckedHrpstring::new::<Bech32>(text.trim()).map_err(map_bech32_error)?;
    let prefix = checked.hrp().to_lowercase();
    let payload: Vec<u8> = checked.byte_iter().collect();

    match prefix.as_str() {
        PREFIX_NPUB => PublicKey::from_slice(&payload).map(Nip19::Pubkey),
        PREFIX_NSEC => SecretKey::from_slice(&payload).map(Nip19::Secret),
        PREFIX_NOTE => EventId::from_slice(&payload).map(Nip19::EventId),
        PREFIX_NEVENT => decode_event(&payload).map(Nip19::Event),
        PREFIX_NADDR => decode_coordinate(&payload).map(Nip19::Coordinate),
        PREFIX_NPROFILE => decode_profile(&payload).map(Nip19::Profile),
        PREFIX_NRELAY => decode_relay(&payload).map(Nip19::Relay),
        _ => Err(Nip19Error::UnknownPrefix(prefix)),
    }
}

/// Encode an identifier to its bech32 text form.
pub fn encode(identifier: &Nip19) -> Result<String> {
    let payload = match identifier {
        Nip19::Pubkey(pubkey) => pubkey.as_bytes().to_vec(),
        Nip19::Secret(secret) => secret.as_bytes().to_vec(),
        Nip19::EventId(id) => id.as_bytes().to_vec(),
        Nip19::Event(event) => {
            let mut writer = TlvWriter::new();
            writer.push(TLV_SPECIAL, event.event_id.as_bytes())?;
            if let Some(author) = &event.author {
                writer.push(TLV_AUTHOR, author.as_bytes())?;
            }
            if let Some(kind) = event.kind {
                writer.push(TLV_KIND, &kind.to_be_bytes())?;
            }
            push_relays(&mut writer, &event.relays)?;
            writer.into_bytes()
        }
        Nip19::Coordinate(coordinate) => {
            let mut writer = TlvWriter::new();
            writer.push(TLV_SPECIAL, coordinate.identifier.as_bytes())?;
            writer.push(TLV_AUTHOR, coordinate.author.as_bytes())?;
            writer.push(TLV_KIND, &coordinate.kind.to_be_bytes())?;
            push_relays(&mut writer, &coordinate.relays)?;
            writer.into_bytes()
        }
        Nip19::Profile(profile) => {
            let mut writer = TlvWriter::new();
            writer.push(TLV_SPECIAL, profile.public_key.as_bytes())?;
            push_relays(&mut writer, &profile.relays)?;
            writer.into_bytes()
        }
        Nip19::Relay(relay) => {
            let mut writer = TlvWriter::new();
            writer.push(TLV_SPECIAL, relay.url.as_bytes())?;
            writer.into_bytes()
        }
    };

    let hrp = Hrp::parse(identifier.prefix())
        .map_err(|e| Nip19Error::MalformedPayload(format!("invalid prefix: {e}")))?;
    bech32::encode::<Bech32>(hrp, &payload)
        .map_err(|e| Nip19Error::PayloadTooLong(e.to_string()))
}

fn push_relays(writer: &mut TlvWriter, relays: &[String]) -> Result<()> {
    for relay in relays {
        writer.push(TLV_RELAY, relay.as_bytes())?;
    }
    Ok(())
}

/// Known TLV fields of a structured payload. First occurrence wins for the
/// single-valued fields.
#[derive(Default)]
struct TlvFields<'a> {
    special: Option<&'a [u8]>,
    relays: Vec<String>,
    author: Option<PublicKey>,
    kind: Option<u32>,
}

impl<'a> TlvFields<'a> {
    fn read(payload: &'a [u8]) -> Result<Self> {
        let mut fields = Self::default();

        for entry in TlvReader::new(payload) {
            let entry = entry?;
            match entry.tlv_type {
                TLV_SPECIAL => {
                    if fields.special.is_none() {
                        fields.special = Some(entry.value);
                    }
                }
                TLV_RELAY => {
                    let url = std::str::from_utf8(entry.value).map_err(|e| {
                        Nip19Error::MalformedPayload(format!("relay is not UTF-8: {e}"))
                    })?;
                    push_relay(&mut fields.relays, url);
                }
                TLV_AUTHOR => {
                    if fields.author.is_none() {
                        fields.author = Some(PublicKey::from_slice(entry.value)?);
                    }
                }
                TLV_KIND => {
                    let bytes = <[u8; 4]>::try_from(entry.value).map_err(|_| {
                        Nip19Error::MalformedPayload(format!(
                            "kind must be 4 bytes, got {}",
                            entry.value.len()
                        ))
                    })?;
                    if fields.kind.is_none() {
                        fields.kind = Some(u32::from_be_bytes(bytes));
                    }
                }
                unknown => {
                    trace!(tlv_type = unknown, len = entry.value.len(), "skipping unknown TLV");
                }
            }
        }

        Ok(fields)
    }

    fn special(&self) -> Result<&'a [u8]> {
        self.special
            .ok_or_else(|| Nip19Error::MalformedPayload("missing special TLV".to_string()))
    }
}

fn utf8(bytes: &[u8], what: &str) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Nip19Error::MalformedPayload(format!("{what} is not UTF-8: {e}")))
}

fn decode_event(payload: &[u8]) -> Result<Nip19Event> {
    let fields = TlvFields::read(payload)?;
    Ok(Nip19Event {
        event_id: EventId::from_slice(fields.special()?)?,
        relays: fields.relays,
        author: fields.author,
        kind: fields.kind,
    })
}

fn decode_coordinate(payload: &[u8]) -> Result<Nip19Coordinate> {
    let fields = TlvFields::read(payload)?;
    let identifier = utf8(fields.special()?, "identifier")?;
    let author = fields
        .author
        .ok_or_else(|| Nip19Error::MalformedPayload("naddr missing author".to_string()))?;
    let kind = fields
        .kind
        .ok_or_else(|| Nip19Error::MalformedPayload("naddr missing kind".to_string()))?;

    Ok(Nip19Coordinate {
        kind,
        author,
        identifier,
        relays: fields.relays,
    })
}

fn decode_profile(payload: &[u8]) -> Result<Nip19Profile> {
    let fields = TlvFields::read(payload)?;
    Ok(Nip19Profile {
        public_key: PublicKey::from_slice(fields.special()?)?,
        relays: fields.relays,
    })
}

fn decode_relay(payload: &[u8]) -> Result<Nip19Relay> {
    let fields = TlvFields::read(payload)?;
    Ok(Nip19Relay {
        url: utf8(fields.special()?, "relay url")?,
    })
}
