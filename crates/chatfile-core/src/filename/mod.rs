//! Display-name recovery for transport-encoded attachment filenames.
//!
//! Upload services hand back names as URL-safe base64 tokens, as
//! percent-encoded text, or as plain text. [`decode_filename`] tries each
//! interpretation in order and always yields something renderable.

mod percent;
mod strategy;

pub use percent::decode_uri_component;
pub use strategy::{DecodeFailure, DecodeStrategy, DECODE_CHAIN};

/// Shown when a message carries no filename at all.
pub const UNKNOWN_FILE: &str = "Unknown File";

/// Decodes an encoded filename into a human-readable display name.
///
/// Never fails: an empty input yields [`UNKNOWN_FILE`], and an input no
/// strategy understands is returned unchanged.
///
/// # Examples
///
/// - `decode_filename("aGVsbG8ucG5n")` → `"hello.png"`
/// - `decode_filename("already%20plain")` → `"already plain"`
/// - `decode_filename("%")` → `"%"`
pub fn decode_filename(encoded: &str) -> String {
    if encoded.is_empty() {
        return UNKNOWN_FILE.to_string();
    }

    for strategy in DECODE_CHAIN {
        match strategy.apply(encoded) {
            Ok(decoded) => return decoded,
            Err(failure) => {
                tracing::debug!(?strategy, %failure, "filename strategy rejected input");
            }
        }
    }

    encoded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_unknown_file() {
        assert_eq!(decode_filename(""), "Unknown File");
    }

    #[test]
    fn base64url_names() {
        assert_eq!(decode_filename("aGVsbG8ucG5n"), "hello.png");
        assert_eq!(decode_filename("cGhvdG9-MS5qcGc"), "photo~1.jpg");
        assert_eq!(decode_filename("YT9iPmMudHh0"), "a?b>c.txt");
    }

    #[test]
    fn unpadded_multibyte_names() {
        assert_eq!(decode_filename("67O06rOg7IScLnBkZg"), "보고서.pdf");
        assert_eq!(decode_filename("Y2Fmw6kudHh0"), "café.txt");
    }

    #[test]
    fn percent_encoded_names() {
        assert_eq!(decode_filename("already%20plain"), "already plain");
        assert_eq!(decode_filename("caf%C3%A9.txt"), "café.txt");
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(decode_filename("hello.png"), "hello.png");
        assert_eq!(decode_filename("my file (1).txt"), "my file (1).txt");
    }

    #[test]
    fn base64_alphabet_but_not_utf8_falls_back_to_original() {
        // "report==" decodes to bytes that are not valid UTF-8.
        assert_eq!(decode_filename("report"), "report");
        // "abc=" is 0x69 0xB7; no lossy "i\u{FFFD}" substitution.
        assert_eq!(
            DecodeStrategy::Base64Url.apply("abc"),
            Err(DecodeFailure::InvalidUtf8)
        );
        assert_eq!(decode_filename("abc"), "abc");
    }

    #[test]
    fn invalid_escapes_return_the_input() {
        assert_eq!(decode_filename("%"), "%");
        assert_eq!(decode_filename("100%.txt"), "100%.txt");
        assert_eq!(decode_filename("bad%E9.txt"), "bad%E9.txt");
    }
}
