//! Whitespace and line-ending normalization for canonical text
//!
//! The trim set is the ECMAScript WhiteSpace + LineTerminator set, which is
//! what the report generator's tooling trims with. It includes U+FEFF (so a
//! leading byte-order mark is dropped) and excludes U+0085, unlike
//! `str::trim`. Using a different set would change digests of existing
//! records.

use std::borrow::Cow;

/// Characters removed by [`trim_whitespace`]
pub fn is_trim_char(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Trim leading and trailing whitespace only
pub fn trim_whitespace(text: &str) -> &str {
    text.trim_matches(is_trim_char)
}

/// Replace every CRLF pair with LF; lone CR is left as is
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Canonical form of one fetched dataset: LF line endings, trimmed
pub fn normalize_dataset(text: &str) -> String {
    trim_whitespace(&normalize_line_endings(text)).to_string()
}
