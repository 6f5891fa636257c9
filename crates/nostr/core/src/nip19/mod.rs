//! NIP-19: bech32-encoded entities
//!
//! Human-shareable identifiers for keys, events, replaceable events, profiles
//! and relays. Bare values (`npub`, `nsec`, `note`) carry 32 raw bytes;
//! structured values (`nevent`, `naddr`, `nprofile`, `nrelay`) carry a TLV
//! stream.
//!
//! Internal module boundaries:
//! - `error`: shared error and result types
//! - `keys`: 32-byte key and id newtypes
//! - `tlv`: type-length-value reader/writer
//! - `model`: identifier model + bech32 encode/decode
//! - `tests`: codec coverage
//!
//! # TLV layout
//!
//! ```text
//! +------+--------+-----------------+
//! | type | length | value           |
//! | 1 B  | 1 B    | `length` bytes  |
//! +------+--------+-----------------+
//!
//! 0 special  event id / `d` identifier / pubkey / relay url
//! 1 relay    relay url, repeatable
//! 2 author   32-byte pubkey
//! 3 kind     u32, big-endian
//! ```
//!
//! Unknown types are skipped so newer encoders stay readable. Encoding
//! emits special, author, kind, then every relay.
//!
//! See: <https://github.com/nostr-protocol/nips/blob/master/19.md>

mod error;
mod keys;
mod model;
mod tlv;

pub use error::{Nip19Error, Result};
pub use keys::{EventId, PublicKey, SecretKey};
pub use model::{
    Nip19, Nip19Coordinate, Nip19Event, Nip19Profile, Nip19Relay, PREFIX_NADDR, PREFIX_NEVENT,
    PREFIX_NOTE, PREFIX_NPROFILE, PREFIX_NPUB, PREFIX_NRELAY, PREFIX_NSEC, decode, encode,
};
pub use tlv::{TLV_AUTHOR, TLV_KIND, TLV_RELAY, TLV_SPECIAL, TlvEntry, TlvReader, TlvWriter};
