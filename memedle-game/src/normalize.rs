//! Phrase normalization.
//!
//! Every comparison in the game happens on the canonical form produced by
//! [`normalize`]; the human-facing form comes from [`to_display`]. The two
//! are computed once per phrase and never mixed.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical comparison form: NFD-decomposed, combining marks stripped,
/// ASCII letters only, uppercased.
///
/// Accented and plain spellings collapse to the same form ("caffè" and
/// "CAFFE" are equal); digits, punctuation, and whitespace vanish entirely,
/// so multi-word phrases compare as a single run of letters.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .filter(char::is_ascii_alphabetic)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

/// Human-facing form: uppercased with whitespace runs collapsed to single
/// spaces. Word boundaries survive for grid rendering; accents and
/// punctuation are kept as written.
#[must_use]
pub fn to_display(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            out.extend(ch.to_uppercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents() {
        assert_eq!(normalize("caffè"), "CAFFE");
        assert_eq!(normalize("però"), "PERO");
    }

    #[test]
    fn normalize_drops_non_letters() {
        assert_eq!(normalize("pasta al pesto"), "PASTAALPESTO");
        assert_eq!(normalize("obbligo o verità!"), "OBBLIGOOVERITA");
        assert_eq!(normalize("agent 007"), "AGENT");
    }

    #[test]
    fn normalize_uppercases_mixed_input() {
        assert_eq!(normalize("PiNgU"), "PINGU");
    }

    #[test]
    fn normalize_of_garbage_is_empty() {
        assert_eq!(normalize("123 !?"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn display_uppercases_and_collapses_runs() {
        assert_eq!(to_display("pasta  al   pesto"), "PASTA AL PESTO");
        assert_eq!(to_display("zaya\tmbriaca"), "ZAYA MBRIACA");
    }

    #[test]
    fn display_keeps_accents_and_edges() {
        assert_eq!(to_display("caffè di mika"), "CAFFÈ DI MIKA");
        // Leading and trailing runs collapse but are not trimmed.
        assert_eq!(to_display(" lumaca "), " LUMACA ");
    }
}
