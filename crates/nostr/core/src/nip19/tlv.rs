use super::error::{Nip19Error, Result};

/// Primary identifying bytes: event id, pubkey, `d` identifier or relay url.
pub const TLV_SPECIAL: u8 = 0;
/// Relay url, repeatable.
pub const TLV_RELAY: u8 = 1;
/// 32-byte author pubkey.
pub const TLV_AUTHOR: u8 = 2;
/// 4-byte big-endian kind.
pub const TLV_KIND: u8 = 3;

/// A single type-length-value record borrowed from a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvEntry<'a> {
    pub tlv_type: u8,
    pub value: &'a [u8],
}

/// Iterator over the TLV records of a structured payload.
///
/// Yields `TruncatedTlv` once and then stops when a record runs past the
/// end of the payload.
pub struct TlvReader<'a> {
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> TlvReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            failed: false,
        }
    }
}

impl<'a> Iterator for TlvReader<'a> {
    type Item = Result<TlvEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }

        let remaining = &self.data[self.offset..];
        let tlv_type = remaining[0];

        let Some(&length) = remaining.get(1) else {
            self.failed = true;
            return Some(Err(Nip19Error::TruncatedTlv {
                tlv_type,
                declared: 1,
                remaining: 0,
            }));
        };

        let length = usize::from(length);
        let body = &remaining[2..];
        if length > body.len() {
            self.failed = true;
            return Some(Err(Nip19Error::TruncatedTlv {
                tlv_type,
                declared: length,
                remaining: body.len(),
            }));
        }

        self.offset += 2 + length;
        Some(Ok(TlvEntry {
            tlv_type,
            value: &body[..length],
        }))
    }
}

/// Append-only TLV payload builder.
#[derive(Debug, Default)]
pub struct TlvWriter {
    bytes: Vec<u8>,
}

impl TlvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tlv_type: u8, value: &[u8]) -> Result<()> {
        let length = u8::try_from(value.len()).map_err(|_| {
            Nip19Error::PayloadTooLong(format!(
                "TLV type {tlv_type} value is {} bytes (max 255)",
                value.len()
            ))
        })?;

        self.bytes.push(tlv_type);
        self.bytes.push(length);
        self.bytes.extend_from_slice(value);
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
