//! Header text normalization.
//!
//! Two headers are the same column iff their normalized forms are equal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Zero-width and invisible code points removed before comparison.
const INVISIBLE: &[char] = &[
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // byte order mark
];

/// Canonical comparison form of a header.
///
/// Invisible characters are dropped, no-break spaces count as whitespace,
/// the text is decomposed (NFD) with combining marks removed, lowercased,
/// and whitespace runs collapse to a single space.
#[must_use]
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .filter(|c| !INVISIBLE.contains(c))
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
