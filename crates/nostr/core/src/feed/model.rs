use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::nip01::Event;

/// A note as the feed sees it: identity, author and authoring time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedNote {
    pub id: String,
    pub author_id: String,
    pub created_at: u64,
}

impl FeedNote {
    pub fn new(id: impl Into<String>, author_id: impl Into<String>, created_at: u64) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            created_at,
        }
    }
}

impl From<&Event> for FeedNote {
    fn from(event: &Event) -> Self {
        Self::new(event.id.clone(), event.pubkey.clone(), event.created_at)
    }
}

/// Display fields of an author, used only for avatars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFragment {
    pub picture: Option<String>,
    pub display_name: Option<String>,
}

/// One fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub notes: Vec<FeedNote>,
    /// Repost events (kind 6/16).
    pub boosts: Vec<Event>,
    /// Events the boosts point at.
    pub referenced_events: Vec<Event>,
    /// Keyed by author pubkey hex.
    pub profiles: HashMap<String, ProfileFragment>,
}

/// The newest item the host already shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMarker {
    pub id: String,
    pub created_at: u64,
    /// Times at which the item was boosted, as known locally.
    #[serde(default)]
    pub boost_timestamps: Vec<u64>,
}

impl LocalMarker {
    pub fn new(id: impl Into<String>, created_at: u64) -> Self {
        Self {
            id: id.into(),
            created_at,
            boost_timestamps: Vec::new(),
        }
    }

    pub fn with_boost_at(mut self, timestamp: u64) -> Self {
        self.boost_timestamps.push(timestamp);
        self
    }

    /// Authoring time or latest boost time, whichever is later.
    pub fn latest_timestamp(&self) -> u64 {
        self.boost_timestamps
            .iter()
            .copied()
            .fold(self.created_at, u64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarRef {
    pub author_id: String,
    pub picture: Option<String>,
    pub display_name: Option<String>,
}

impl AvatarRef {
    pub(crate) fn for_author(author_id: &str, profile: Option<&ProfileFragment>) -> Self {
        Self {
            author_id: author_id.to_string(),
            picture: profile.and_then(|profile| profile.picture.clone()),
            display_name: profile.and_then(|profile| profile.display_name.clone()),
        }
    }
}

/// What is new since the local marker, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDelta {
    pub ordered_new_ids: Vec<String>,
    pub representative_avatars: Vec<AvatarRef>,
}

impl FeedDelta {
    pub fn is_empty(&self) -> bool {
        self.ordered_new_ids.is_empty()
    }

    pub fn newest_id(&self) -> Option<&str> {
        self.ordered_new_ids.first().map(String::as_str)
    }

    /// True when the host should clear its "new items" state: nothing is
    /// new, or the item on top of the visible list is already the newest.
    pub fn should_reset(&self, visible_top: Option<&str>) -> bool {
        self.is_empty() || (visible_top.is_some() && visible_top == self.newest_id())
    }
}
