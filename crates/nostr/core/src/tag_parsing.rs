pub(crate) fn tag_name(tag: &[String]) -> Option<&str> {
    tag.first().map(String::as_str)
}

pub(crate) fn tag_field(tag: &[String], index: usize) -> Option<&str> {
    tag.get(index).map(String::as_str)
}

/// Like `tag_field`, but an empty string counts as absent.
pub(crate) fn non_empty_field(tag: &[String], index: usize) -> Option<&str> {
    tag_field(tag, index).filter(|value| !value.is_empty())
}

/// 32-byte values (event ids, pubkeys) are carried as 64 hex characters.
pub(crate) fn is_hex64(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit())
}
