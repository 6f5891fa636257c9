use serde::{Deserialize, Serialize};

/// Feed delta tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum number of distinct-author avatars in a delta.
    pub max_avatars: usize,
    /// Also drop boosts made by muted users, not only notes written by them.
    /// Off by default: a muted user's boost of someone else's note still shows.
    pub drop_muted_boosters: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_avatars: 3,
            drop_muted_boosters: false,
        }
    }
}
