use thiserror::Error;

/// NIP-19 error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Nip19Error {
    #[error("invalid bech32 checksum")]
    InvalidChecksum,

    #[error("unknown prefix: {0}")]
    UnknownPrefix(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("truncated TLV: type {tlv_type} declares {declared} bytes, {remaining} remaining")]
    TruncatedTlv {
        tlv_type: u8,
        declared: usize,
        remaining: usize,
    },

    #[error("payload too long: {0}")]
    PayloadTooLong(String),
}

pub type Result<T> = std::result::Result<T, Nip19Error>;
