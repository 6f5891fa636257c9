//! NIP-21: `nostr:` URI scheme
//!
//! Free-text content references other entities as `nostr:<bech32>`. `nsec`
//! is not a valid reference and never matches. Matching ignores case; a
//! token in mixed case fails bech32 decoding and is skipped.
//!
//! See: <https://github.com/nostr-protocol/nips/blob/master/21.md>

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::nip19::{self, Nip19};

pub const URI_SCHEME: &str = "nostr:";

static NOSTR_URI_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)nostr:((?:npub|nprofile|note|nevent|naddr|nrelay)1[qpzry9x8gf2tvdw0s3jn54khce6mua7l]+)")
        .ok()
});

/// Decode every `nostr:` URI in `content`, in order of appearance.
///
/// Tokens that fail to decode are skipped.
pub fn extract_uris(content: &str) -> Vec<Nip19> {
    let Some(regex) = NOSTR_URI_REGEX.as_ref() else {
        return Vec::new();
    };

    regex
        .captures_iter(content)
        .filter_map(|captures| captures.get(1))
        .filter_map(|bech32| match nip19::decode(bech32.as_str()) {
            Ok(identifier) => Some(identifier),
            Err(error) => {
                trace!(uri = bech32.as_str(), %error, "skipping undecodable nostr: uri");
                None
            }
        })
        .collect()
}

/// Render an identifier as a `nostr:` URI.
pub fn to_uri(identifier: &Nip19) -> nip19::Result<String> {
    Ok(format!("{URI_SCHEME}{}", identifier.to_bech32()?))
}
