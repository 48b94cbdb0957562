use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// @module: Token normalization for keyword matching

// @const: Punctuation stripped from transcript words before matching
static STRIP_PUNCTUATION: Lazy<HashSet<char>> = Lazy::new(|| {
    [
        '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_',
        '`', '~', '(', ')',
    ]
    .into_iter()
    .collect()
});

/// Normalize a token for matching: lowercase, decompose and drop diacritical
/// marks, and optionally strip a fixed punctuation set.
///
/// Pure and total; an empty input yields an empty output.
pub fn normalize(token: &str, strip_punctuation: bool) -> String {
    token
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !strip_punctuation || !STRIP_PUNCTUATION.contains(c))
        .collect()
}
