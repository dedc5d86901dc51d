//! Name normalization and matching.
//!
//! Students type names free-hand ("Qe₁", " price ", "p'"), so every name
//! comparison in grading goes through [`matches_name`]. Raw strings are
//! never compared directly.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// The canonical form a rubric name must normalize to in order to act as
/// the generic "quantity(...)" wildcard.
const QUANTITY_WILDCARD: &str = "quantity()";

/// Canonicalize a user-typed name for comparison.
///
/// Pipeline, in order: NFD decomposition; drop combining marks; collapse
/// whitespace runs to a single space; drop straight and curly quotes;
/// substitute the first `"qe"` with `"q"` and the first `"pe"` with `"p"`
/// (transliteration quirks - once each, not global); lowercase; join the
/// remaining words with no separator so the comparison is
/// whitespace-insensitive.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut spaced = String::with_capacity(stripped.len());
    let mut prev_space = false;
    for c in stripped.chars() {
        if c.is_whitespace() {
            if !prev_space {
                spaced.push(' ');
            }
            prev_space = true;
        } else {
            match c {
                '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' => {}
                _ => spaced.push(c),
            }
            prev_space = false;
        }
    }

    let substituted = replace_first(&replace_first(&spaced, "qe", "q"), "pe", "p");

    substituted.to_lowercase().split_whitespace().collect()
}

/// Replace only the first occurrence of `from`.
fn replace_first(s: &str, from: &str, to: &str) -> String {
    match s.find(from) {
        Some(idx) => {
            let mut out = String::with_capacity(s.len());
            out.push_str(&s[..idx]);
            out.push_str(to);
            out.push_str(&s[idx + from.len()..]);
            out
        }
        None => s.to_string(),
    }
}

/// Does a user-chosen name satisfy the rubric's expected name?
///
/// When the expected name normalizes to the `quantity()` sentinel, the test
/// name matches iff it reads `quantity(<one or more characters>)`
/// case-insensitively, taken as-is rather than normalized. Otherwise the
/// two names are equal after [`normalize`].
pub fn matches_name(test: &str, correct: &str) -> bool {
    if normalize(correct) == QUANTITY_WILDCARD {
        return matches_quantity_wildcard(test);
    }
    normalize(test) == normalize(correct)
}

/// `quantity(` + one-or-more characters + `)`, matched case-insensitively
/// against the whole string.
fn matches_quantity_wildcard(test: &str) -> bool {
    let lower = test.to_lowercase();
    lower.starts_with("quantity(") && lower.ends_with(')') && lower.len() > QUANTITY_WILDCARD.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            "Price",
            "  Qé₁ demand ",
            "p'",
            "\u{201C}Supply\u{201D}",
            "qe pe",
            "",
            "quantity(x)",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalize_strips_diacritics() {
        assert_eq!(normalize("Qé"), normalize("Qe"));
        assert_eq!(normalize("prícé"), "price");
    }

    #[test]
    fn normalize_strips_quotes() {
        assert_eq!(normalize("p'"), "p");
        assert_eq!(normalize("\u{2018}D\u{2019}"), "d");
        assert_eq!(normalize("\"S\""), "s");
    }

    #[test]
    fn normalize_is_whitespace_insensitive() {
        assert_eq!(normalize("Demand  Curve"), normalize("demandcurve"));
        assert_eq!(normalize("  D \u{00A0} 1 "), "d1");
    }

    #[test]
    fn normalize_substitutes_qe_pe_once() {
        // First occurrence only, applied before lowercasing.
        assert_eq!(normalize("qe"), "q");
        assert_eq!(normalize("pe"), "p");
        assert_eq!(normalize("qe qe"), "qqe");
        // "pe" inside "people": only the first is rewritten.
        assert_eq!(normalize("people"), "pople");
    }

    #[test]
    fn matches_name_normalized_equality() {
        assert!(matches_name("  Démand ", "demand"));
        assert!(matches_name("Price Level", "pricelevel"));
        assert!(!matches_name("supply", "demand"));
    }

    #[test]
    fn matches_name_quantity_wildcard() {
        assert!(matches_name("Quantity(x)", "quantity()"));
        assert!(matches_name("quantity(apples)", "Quantity()"));
        assert!(!matches_name("Quantity()", "quantity()"));
        assert!(!matches_name("quantity", "quantity()"));
        assert!(!matches_name("amount(x)", "quantity()"));
    }
}
