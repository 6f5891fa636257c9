//! NIP-01: Basic protocol event shape.
//!
//! Only the data model lives here. Hashing and signing belong to an external
//! signer; `sig` is carried through untouched.
//!
//! See: <https://github.com/nostr-protocol/nips/blob/master/01.md>

use serde::{Deserialize, Serialize};

/// Short text note.
pub const KIND_TEXT_NOTE: u16 = 1;
/// Repost of a kind 1 note (NIP-18).
pub const KIND_REPOST: u16 = 6;
/// Repost of any other kind (NIP-18).
pub const KIND_GENERIC_REPOST: u16 = 16;
/// Highlight (NIP-84).
pub const KIND_HIGHLIGHT: u16 = 9802;
/// Long-form article (NIP-23).
pub const KIND_LONG_FORM: u16 = 30023;

/// A signed event as received from a relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub pubkey: String,
    pub created_at: u64,
    pub kind: u16,
    pub tags: Vec<Vec<String>>,
    pub content: String,
    pub sig: String,
}

/// An event that has not been hashed or signed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub created_at: u64,
    pub kind: u16,
    pub tags: Vec<Vec<String>>,
    pub content: String,
}

impl EventTemplate {
    pub fn new(kind: u16, content: impl Into<String>, created_at: u64) -> Self {
        Self {
            created_at,
            kind,
            tags: Vec::new(),
            content: content.into(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<Vec<String>>) -> Self {
        self.tags.extend(tags);
        self
    }
}
