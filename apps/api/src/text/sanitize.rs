//! Text sanitizer: maps typographic Unicode to the small glyph set every backend can draw.
//!
//! The output alphabet is printable ASCII, `\n`, `\t`, the Latin-1 supplement and
//! Latin Extended-A/B letters (U+00A1..=U+024F), and the canonical bullet `•`.
//! Every replacement produces characters from that alphabet, which is what makes
//! `sanitize` idempotent.

/// Canonical bullet glyph emitted for every decorative bullet variant.
pub const BULLET: char = '•';

/// Sanitizes a résumé body. Pure and total: any input yields a (possibly empty) string.
///
/// - typographic quotes → `'` / `"`
/// - em/en dashes, minus and non-breaking hyphens → `-`
/// - non-breaking and typographic spaces → ` `
/// - `…` → `...`
/// - decorative bullets → `•`
/// - check marks → `[x]`, crosses and empty ballot boxes → `[ ]`
/// - `\r\n` and lone `\r` → `\n`
/// - everything else outside the output alphabet is dropped
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
            continue;
        }

        match replacement(c) {
            Some(rep) => out.push_str(rep),
            None if is_kept(c) => out.push(c),
            None => {}
        }
    }

    out
}

fn replacement(c: char) -> Option<&'static str> {
    let rep = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
        | '\u{2212}' => "-",
        '\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2004}' | '\u{2005}' | '\u{2006}'
        | '\u{2007}' | '\u{2008}' | '\u{2009}' | '\u{200A}' | '\u{202F}' | '\u{205F}'
        | '\u{3000}' => " ",
        '\u{2026}' => "...",
        '\u{25CF}' | '\u{25AA}' | '\u{25A0}' | '\u{25E6}' | '\u{2023}' | '\u{2043}'
        | '\u{2219}' | '\u{00B7}' | '\u{25C6}' | '\u{2666}' | '\u{25BA}' | '\u{25B8}'
        | '\u{27A4}' | '\u{2756}' | '\u{25A1}' | '\u{25CB}' | '\u{2605}' | '\u{2606}'
        | '\u{2794}' | '\u{2192}' => "\u{2022}",
        '\u{2713}' | '\u{2714}' | '\u{2611}' | '\u{2705}' => "[x]",
        '\u{2717}' | '\u{2718}' | '\u{2610}' | '\u{274C}' | '\u{2612}' => "[ ]",
        '\u{FB00}' => "ff",
        '\u{FB01}' => "fi",
        '\u{FB02}' => "fl",
        '\u{FB03}' => "ffi",
        '\u{FB04}' => "ffl",
        _ => return None,
    };
    Some(rep)
}

fn is_kept(c: char) -> bool {
    match c {
        '\n' | '\t' => true,
        ' '..='~' => true,
        // soft hyphen is invisible in source text and would render as a stray dash
        '\u{00AD}' => false,
        '\u{00A1}'..='\u{024F}' => true,
        BULLET => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_quotes_become_straight() {
        assert_eq!(sanitize("\u{201C}Hi\u{201D} it\u{2019}s"), "\"Hi\" it's");
    }

    #[test]
    fn test_dashes_become_hyphen() {
        assert_eq!(sanitize("2019 \u{2013} 2021 \u{2014} now"), "2019 - 2021 - now");
    }

    #[test]
    fn test_nbsp_and_ellipsis() {
        assert_eq!(sanitize("a\u{00A0}b\u{2026}"), "a b...");
    }

    #[test]
    fn test_decorative_bullets_fold_to_canonical() {
        assert_eq!(sanitize("\u{25CF} one\n\u{25AA} two\n\u{27A4} three"), "• one\n• two\n• three");
    }

    #[test]
    fn test_checkmarks_become_tags() {
        assert_eq!(sanitize("\u{2714} Rust \u{2718} Go"), "[x] Rust [ ] Go");
    }

    #[test]
    fn test_strips_control_and_out_of_range() {
        assert_eq!(sanitize("a\u{0007}b\u{200B}c\u{1F600}d\u{FEFF}"), "abcd");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(sanitize("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_latin_accents_preserved() {
        assert_eq!(sanitize("Résumé Łódź"), "Résumé Łódź");
    }

    #[test]
    fn test_ligatures_expanded() {
        assert_eq!(sanitize("\u{FB01}nance of\u{FB02}ow"), "finance offlow");
    }

    #[test]
    fn test_idempotent_on_mixed_input() {
        let samples = [
            "",
            "plain ascii",
            "\u{201C}quoted\u{201D} \u{2014} \u{2026} \u{25CF} \u{2713} \u{2717}\r\n\u{00A0}",
            "\u{00AD}\u{0085}\u{009F}\u{3000}\u{FB03}\u{2022}\t",
            "Łódź • 2020–Present ✔",
        ];
        for s in samples {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once, "sanitize not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_empty_is_empty() {
        assert_eq!(sanitize(""), "");
    }
}
