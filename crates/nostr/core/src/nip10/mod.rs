//! NIP-10: Text note threading
//!
//! Turns an event's flat tag list into its position in a reply thread and the
//! set of things it references, and builds reference tags for outgoing
//! replies.
//!
//! Internal module boundaries:
//! - `marker`: tag classification (`TagKind`) and relationship markers
//! - `lookup`: `ReferenceLookup`, the host-provided view of known events
//! - `thread`: `resolve_thread` and `ThreadReference`
//! - `compose`: reply tags and relay hint injection for publishing
//! - `tests`: resolution and composition coverage
//!
//! # Resolution order
//!
//! ```text
//! reply:  e[reply]  >  e[root]  >  last e not marked mention  >  a[reply|root]
//! root:   highlight (e[root] of kind 9802)  >  article (a[root], or unmarked
//!         a of kind 30023)  >  e[root]  >  first e (unmarked tags only)
//! author: pubkey in the chosen tag  >  ReferenceLookup::author_of  >  none
//! ```
//!
//! A note can reply inside a note thread while its root is an article or a
//! highlight, so the two orders are independent.
//!
//! See: <https://github.com/nostr-protocol/nips/blob/master/10.md>

mod compose;
mod lookup;
mod marker;
mod thread;

pub use compose::{apply_relay_hints, reply_tags};
pub use lookup::{MapLookup, NoLookup, ReferenceLookup};
pub use marker::{CoordinateTag, EventTag, Marker, TagKind};
pub use thread::{ThreadReference, resolve_thread};
