//! Text normalization shared by matching, highlighting and sorting.
//!
//! Every comparison in this crate runs on normalized text: lowercased, with
//! Latin diacritics removed. Queries are additionally deduplicated so that
//! repeated characters do not change the outcome of a match.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Latin letters whose diacritic is part of the glyph itself and therefore
/// survives NFD decomposition. Mapped to their base letter.
const LATIN_SUBSTITUTIONS: &[(char, char)] = &[
    ('ø', 'o'),
    ('ł', 'l'),
    ('đ', 'd'),
    ('ħ', 'h'),
    ('ı', 'i'),
    ('ŧ', 't'),
    ('ŀ', 'l'),
];

fn substitute(c: char) -> char {
    LATIN_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |&(_, to)| to)
}

/// Lowercase `s` and strip its diacritics.
///
/// Accented characters are decomposed (NFD) and their combining marks
/// dropped, so `"Ángel"` becomes `"angel"` and `"Ñandú"` becomes `"nandu"`.
/// A small substitution table covers letters like `ø` and `ł` that have no
/// decomposition.
///
/// Returns [`Cow::Borrowed`] when `s` is already lowercase ASCII, which is
/// the common case for typed queries.
///
/// # Examples
///
/// ```
/// use matchselect::normalize::normalize;
///
/// assert_eq!(normalize("Canción"), "cancion");
/// assert_eq!(normalize("Łódź"), "lodz");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(s: &str) -> Cow<'_, str> {
    // Fast path: lowercase ASCII needs no work at all.
    if s.is_ascii() && !s.bytes().any(|b| b.is_ascii_uppercase()) {
        return Cow::Borrowed(s);
    }

    if s.is_ascii() {
        return Cow::Owned(s.to_ascii_lowercase());
    }

    // Lowercase before decomposing: some lowercase mappings (e.g. U+0130)
    // introduce combining marks that the NFD pass then removes.
    let lower = s.to_lowercase();
    let stripped: String = lower
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(substitute)
        .collect();

    Cow::Owned(stripped)
}

/// Collapse repeated characters, keeping only the first occurrence of each.
///
/// Order of first occurrences is preserved.
///
/// # Examples
///
/// ```
/// use matchselect::normalize::dedupe;
///
/// assert_eq!(dedupe("banana"), "ban");
/// assert_eq!(dedupe("juan"), "juan");
/// assert_eq!(dedupe(""), "");
/// ```
pub fn dedupe(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if !out.contains(c) {
            out.push(c);
        }
    }
    out
}

/// Normalized form of a single character.
///
/// Returns `None` for characters that normalize away entirely (a lone
/// combining mark, for instance).
pub fn normalize_char(c: char) -> Option<char> {
    let mut buf = [0u8; 4];
    normalize(c.encode_utf8(&mut buf)).chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_ascii_is_borrowed() {
        let result = normalize("hello world");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "hello world");
    }

    #[test]
    fn uppercase_ascii_is_lowercased() {
        assert_eq!(normalize("Hello World"), "hello world");
    }

    #[test]
    fn spanish_accents_are_stripped() {
        assert_eq!(normalize("Árbol"), "arbol");
        assert_eq!(normalize("camión"), "camion");
        assert_eq!(normalize("pingüino"), "pinguino");
        assert_eq!(normalize("Ñoño"), "nono");
    }

    #[test]
    fn substitution_table_letters() {
        assert_eq!(normalize("Øresund"), "oresund");
        assert_eq!(normalize("Łukasz"), "lukasz");
        assert_eq!(normalize("Đorđe"), "dorde");
    }

    #[test]
    fn decomposed_input_is_stripped() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT.
        assert_eq!(normalize("cafe\u{0301}"), "cafe");
    }

    #[test]
    fn dotted_capital_i_loses_its_dot() {
        assert_eq!(normalize("İstanbul"), "istanbul");
    }

    #[test]
    fn normalize_is_idempotent_on_samples() {
        for s in ["Canción", "ÀÉÎÕÜ", "Øystein Łoś", "plain", "İ", ""] {
            let once = normalize(s).into_owned();
            assert_eq!(normalize(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        assert_eq!(dedupe("mississippi"), "misp");
        assert_eq!(dedupe("aaaa"), "a");
        assert_eq!(dedupe("ab ba"), "ab ");
    }

    #[test]
    fn dedupe_handles_multibyte_chars() {
        assert_eq!(dedupe("ñañaña"), "ña");
    }

    #[test]
    fn normalize_char_strips_accent() {
        assert_eq!(normalize_char('Á'), Some('a'));
        assert_eq!(normalize_char('x'), Some('x'));
        assert_eq!(normalize_char(' '), Some(' '));
    }

    #[test]
    fn normalize_char_lone_combining_mark() {
        assert_eq!(normalize_char('\u{0301}'), None);
    }
}
