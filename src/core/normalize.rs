//! Canonical text form used for every comparison in filtering and sorting.
//!
//! [`normalize_text`] lower-cases, decomposes accented characters (NFD) and
//! drops the combining marks, and folds typographic quotes and primes to
//! their plain ASCII counterparts. Two strings match in search or status
//! filtering only when their normalized forms are equal (or, for search,
//! when one contains the other).

use unicode_normalization::UnicodeNormalization;

/// Canonicalize `text` for case, diacritic and quote insensitive comparison.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(fold_quote)
        .collect()
}

// U+0300..=U+036F, the Combining Diacritical Marks block
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn fold_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{2036}' => '"',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_diacritics() {
        assert_eq!(normalize_text("Rick Sánchez"), "rick sanchez");
        assert_eq!(normalize_text("ÉLÈVE Ñandú"), "eleve nandu");
    }

    #[test]
    fn test_folds_typographic_quotes() {
        assert_eq!(normalize_text("Rick\u{2019}s"), "rick's");
        assert_eq!(normalize_text("\u{201C}Tiny\u{201D}"), "\"tiny\"");
        assert_eq!(normalize_text("5\u{2032}10\u{2033}"), "5'10\"");
    }

    #[test]
    fn test_plain_ascii_is_unchanged_apart_from_case() {
        assert_eq!(normalize_text("Morty Smith"), "morty smith");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Rick Sánchez",
            "Mr. Poopybutthole",
            "Abradolf Lincler\u{2019}s \u{201C}clone\u{201D}",
            "ÅNGSTRÖM",
            "Zoë \u{2035}quoted\u{2036}",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_equal_after_normalization() {
        assert_eq!(normalize_text("ALIVE"), normalize_text("alive"));
        assert_eq!(normalize_text("Dëad"), normalize_text("dead"));
    }
}
