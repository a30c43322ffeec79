//! Strict percent decoding with `decodeURIComponent` semantics.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use super::DecodeFailure;

/// Percent-decodes `input`, failing on malformed escapes or non-UTF-8 output.
///
/// Unlike form decoding, `+` is left as-is.
pub fn decode_uri_component(input: &str) -> Result<String, DecodeFailure> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while let Some(pos) = bytes[i..].iter().position(|&b| b == b'%') {
        let at = i + pos;
        let well_formed = bytes
            .get(at + 1..at + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(DecodeFailure::InvalidEscape { offset: at });
        }
        i = at + 3;
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| DecodeFailure::InvalidUtf8)
}
