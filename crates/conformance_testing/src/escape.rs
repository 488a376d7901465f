//! Decoding of `\xHH` and `\uHHHH` escapes found in fixture text
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

lazy_static! {
    static ref ESCAPE: Regex = escape_regex();
}

#[allow(clippy::expect_used)]
fn escape_regex() -> Regex {
    Regex::new(r"\\x([0-9a-fA-F]{2})|\\u([0-9a-fA-F]{4})").expect("escape pattern")
}

/// Resolves `\xHH` and `\uHHHH` escape sequences in the given input.
///
/// A marker that is not followed by exactly two (or four) hex digits is copied as-is. Code
/// points in the surrogate range decode to U+FFFD. When the input holds no escape at all, it is
/// returned borrowed.
#[must_use]
pub fn decode_escapes(input: &str) -> Cow<'_, str> {
    ESCAPE.replace_all(input, |caps: &Captures| {
        let hex = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());

        u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(REPLACEMENT_CHARACTER)
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Hello\\x20World", "Hello World" ; "hex escape")]
    #[test_case("Hello\\u0020World", "Hello World" ; "unicode escape")]
    #[test_case("\\uD800", "\u{FFFD}" ; "lone high surrogate")]
    #[test_case("\\uDFFF", "\u{FFFD}" ; "lone low surrogate")]
    #[test_case("\\uD83D\\uDE00", "\u{FFFD}\u{FFFD}" ; "escaped surrogate pair")]
    #[test_case("\\x41\\x42", "AB" ; "adjacent escapes")]
    #[test_case("\\xff", "\u{ff}" ; "lowercase hex")]
    #[test_case("\\u00e9t\\u00E9", "été" ; "mixed case hex")]
    #[test_case("\\u000", "\\u000" ; "truncated unicode escape at end")]
    #[test_case("\\x4g", "\\x4g" ; "invalid hex digit")]
    #[test_case("\\u12G4abc", "\\u12G4abc" ; "no partial consumption")]
    #[test_case("\\x\\x41", "\\xA" ; "scanning resumes after backslash")]
    #[test_case("a\\nb\\x41", "a\\nbA" ; "other backslashes pass through")]
    #[test_case("\\x4\u{e9}", "\\x4\u{e9}" ; "multibyte after marker")]
    #[test_case("\u{e9}\\x41\u{1F600}", "\u{e9}A\u{1F600}" ; "multibyte around escape")]
    fn decode(input: &str, expected: &str) {
        assert_eq!(decode_escapes(input), expected);
    }

    #[test]
    fn plain_text_is_borrowed() {
        for input in ["", "plain text", "back\\slash", "\\n\\t", "x\\"] {
            let decoded = decode_escapes(input);
            assert!(matches!(decoded, Cow::Borrowed(_)), "{input:?} was copied");
            assert_eq!(decoded, input);
        }
    }

    #[test]
    fn escaped_text_is_owned() {
        assert!(matches!(decode_escapes("\\x41"), Cow::Owned(_)));
    }
}
