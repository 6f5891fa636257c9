pub mod feed;
pub mod nip01;
pub mod nip10;
pub mod nip18;
pub mod nip19;
pub mod nip21;
mod tag_parsing;

pub use feed::{
    AvatarRef, FeedDelta, FeedNote, LocalMarker, PageSnapshot, ProfileFragment, SyncConfig,
    compute_delta, compute_delta_with,
};
pub use nip01::{Event, EventTemplate};
pub use nip10::{MapLookup, NoLookup, ReferenceLookup, ThreadReference, resolve_thread};
pub use nip19::{
    EventId, Nip19, Nip19Coordinate, Nip19Error, Nip19Event, Nip19Profile, Nip19Relay, PublicKey,
    SecretKey,
};
