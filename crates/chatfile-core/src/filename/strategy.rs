//! Ordered decoding strategies and their failure outcomes.

use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use super::percent::decode_uri_component;

/// Standard alphabet; tolerant of non-zero trailing bits in the final quantum.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Strategies tried by [`super::decode_filename`], in order. The last one always succeeds.
pub const DECODE_CHAIN: [DecodeStrategy; 3] = [
    DecodeStrategy::Base64Url,
    DecodeStrategy::Percent,
    DecodeStrategy::Original,
];

/// One way of interpreting an encoded filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// URL-safe base64 (`-`/`_`), padding optional, UTF-8 payload.
    Base64Url,
    /// `decodeURIComponent`-style percent decoding.
    Percent,
    /// The input itself.
    Original,
}

/// Why a strategy did not accept an input. Never surfaced to callers of the codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFailure {
    #[error("characters outside the base64 alphabet")]
    NotBase64Alphabet,
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
    #[error("decoded name is empty")]
    Empty,
    #[error("malformed percent escape at byte {offset}")]
    InvalidEscape { offset: usize },
}

impl DecodeStrategy {
    pub fn apply(self, encoded: &str) -> Result<String, DecodeFailure> {
        match self {
            DecodeStrategy::Base64Url => decode_base64url(encoded),
            DecodeStrategy::Percent => decode_uri_component(encoded),
            DecodeStrategy::Original => Ok(encoded.to_string()),
        }
    }
}

/// Translates the URL-safe alphabet to the standard one and pads to a multiple of four.
fn to_padded_standard(encoded: &str) -> String {
    let mut out: String = encoded
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let rem = out.len() % 4;
    if rem != 0 {
        out.extend(std::iter::repeat('=').take(4 - rem));
    }
    out
}

fn decode_base64url(encoded: &str) -> Result<String, DecodeFailure> {
    let padded = to_padded_standard(encoded);
    let in_alphabet = padded
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='));
    if !in_alphabet {
        return Err(DecodeFailure::NotBase64Alphabet);
    }

    let bytes = LENIENT_STANDARD.decode(padded.as_bytes())?;
    let text = String::from_utf8(bytes).map_err(|_| DecodeFailure::InvalidUtf8)?;
    if text.is_empty() {
        return Err(DecodeFailure::Empty);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_and_alphabet_translation() {
        assert_eq!(to_padded_standard("ab-_"), "ab+/");
        assert_eq!(to_padded_standard("abcdef"), "abcdef==");
        assert_eq!(to_padded_standard("abc"), "abc=");
    }

    #[test]
    fn base64url_rejects_foreign_characters() {
        assert_eq!(
            DecodeStrategy::Base64Url.apply("file.txt"),
            Err(DecodeFailure::NotBase64Alphabet)
        );
    }

    #[test]
    fn base64url_rejects_impossible_lengths() {
        // Five data characters cannot form a valid quantum.
        assert!(matches!(
            DecodeStrategy::Base64Url.apply("abcde"),
            Err(DecodeFailure::Base64(_))
        ));
    }

    #[test]
    fn original_always_succeeds() {
        assert_eq!(DecodeStrategy::Original.apply("%%%").as_deref(), Ok("%%%"));
        assert_eq!(DECODE_CHAIN.last(), Some(&DecodeStrategy::Original));
    }
}
