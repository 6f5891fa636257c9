//! Feed delta computation
//!
//! Merges a freshly fetched page against the newest locally shown item and
//! reports what is new, newest first, deduplicated by underlying note.
//!
//! Internal module boundaries:
//! - `config`: `SyncConfig` tunables
//! - `model`: snapshot, marker and delta types
//! - `delta`: `compute_delta`
//! - `tests`: ordering, dedup, closure and mute coverage
//!
//! # Effective timestamp
//!
//! ```text
//! note N   created_at = 100
//! boost B  created_at = 200, ["e", N]
//!
//! union:  (100, N) (200, N)  ->  sorted desc, first wins  ->  [N @ 200]
//! ```
//!
//! The threshold is the later of the local marker's authoring time and its
//! latest known boost time, so an item boosted locally after it was written
//! does not come back as new. Recomputing with the marker moved to the
//! previous delta's newest item yields an empty delta.
//!
//! Resetting the host's "new items" badge is left to the host; see
//! [`FeedDelta::should_reset`].

mod config;
mod delta;
mod model;

pub use config::SyncConfig;
pub use delta::{compute_delta, compute_delta_with};
pub use model::{AvatarRef, FeedDelta, FeedNote, LocalMarker, PageSnapshot, ProfileFragment};

#[cfg(test)]
mod tests;
