use std::fmt;
use std::str::FromStr;

use super::error::{Nip19Error, Result};

fn bytes32(bytes: &[u8], what: &str) -> Result<[u8; 32]> {
    <[u8; 32]>::try_from(bytes).map_err(|_| {
        Nip19Error::MalformedPayload(format!("{what} must be 32 bytes, got {}", bytes.len()))
    })
}

fn hex32(value: &str, what: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(value)
        .map_err(|e| Nip19Error::MalformedPayload(format!("invalid {what} hex: {e}")))?;
    bytes32(&bytes, what)
}

macro_rules! bare_value {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; 32]);

        impl $name {
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(bytes: &[u8]) -> Result<Self> {
                bytes32(bytes, $what).map(Self)
            }

            pub fn from_hex(value: &str) -> Result<Self> {
                hex32(value, $what).map(Self)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl FromStr for $name {
            type Err = Nip19Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_hex(s)
            }
        }
    };
}

bare_value!(
    /// x-only secp256k1 public key.
    PublicKey,
    "public key"
);
bare_value!(
    /// secp256k1 secret key. `Debug` never prints the key material.
    SecretKey,
    "secret key"
);
bare_value!(
    /// SHA-256 event id.
    EventId,
    "event id"
);

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.to_hex())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}
