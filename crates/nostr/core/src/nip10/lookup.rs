use std::collections::HashMap;

use crate::nip19::PublicKey;

/// Read-only view of locally known events, injected into the resolver.
///
/// Keys are event id hex or `kind:pubkey:identifier` coordinates.
pub trait ReferenceLookup {
    fn author_of(&self, id: &str) -> Option<PublicKey>;

    fn kind_of(&self, _id: &str) -> Option<u16> {
        None
    }
}

/// Knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl ReferenceLookup for NoLookup {
    fn author_of(&self, _id: &str) -> Option<PublicKey> {
        None
    }
}

impl ReferenceLookup for HashMap<String, PublicKey> {
    fn author_of(&self, id: &str) -> Option<PublicKey> {
        self.get(id).copied()
    }
}

/// Lookup backed by plain maps, for hosts that already keep author and kind
/// indexes in memory.
#[derive(Debug, Clone, Default)]
pub struct MapLookup {
    pub authors: HashMap<String, PublicKey>,
    pub kinds: HashMap<String, u16>,
}

impl MapLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, author: PublicKey, kind: u16) {
        let id = id.into();
        self.authors.insert(id.clone(), author);
        self.kinds.insert(id, kind);
    }
}

impl ReferenceLookup for MapLookup {
    fn author_of(&self, id: &str) -> Option<PublicKey> {
        self.authors.get(id).copied()
    }

    fn kind_of(&self, id: &str) -> Option<u16> {
        self.kinds.get(id).copied()
    }
}
