use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything outside the RFC 3986 unreserved set gets escaped.
const RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes `value` per RFC 5849 section 3.6.
///
/// Input is taken as UTF-8; each escaped byte becomes `%XX` with
/// uppercase hex digits.
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, RESERVED).to_string()
}

/// Standard base64 (RFC 4648 section 4) with padding and no line breaks.
pub fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub(crate) fn base64_decode(value: &str) -> Option<Vec<u8>> {
    STANDARD.decode(value).ok()
}

/// Joins the encoded signing key and secret credential with `&`.
pub fn composite_key(signing_key: &str, secret_credential: &str) -> String {
    let mut key = percent_encode(signing_key);
    key.push('&');
    key.push_str(&percent_encode(secret_credential));
    key
}
