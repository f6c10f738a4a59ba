//! Line-level pattern detectors used by the classifier and the hint validator.
//!
//! All detectors operate on sanitized text, so dashes are plain `-` and decorative
//! bullets are the canonical `•`.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::sanitize::BULLET;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}")
        .expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\+\d{1,3}(?:[\s.-]\d{2,5}){2,4}\b)|(?:(?:\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b)",
    )
    .expect("phone pattern is valid")
});

static PROFILE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:linkedin|github)\.com|\b(?:linkedin|github)\s*[:/]")
        .expect("profile link pattern is valid")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern is valid"));

const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let endpoint = format!(r"(?:{MONTH}\s+|\d{{1,2}}/)?(?:19|20)\d{{2}}");
    let open_end = r"(?:present|current|now|today|ongoing)";
    Regex::new(&format!(
        r"(?i)\b{endpoint}\s*(?:-|to|until)\s*(?:{endpoint}|{open_end})\b"
    ))
    .expect("date range pattern is valid")
});

/// A `-` that is not a word-internal hyphen (`Full-stack` is not a separator,
/// `Engineer - Acme` and `2019-2021` are).
static DASH_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z])-|-(?:$|[^A-Za-z])").expect("dash pattern is valid")
});

/// True for lines carrying an email address, a phone number, or a LinkedIn / GitHub
/// profile reference.
pub fn is_contact_like(text: &str) -> bool {
    EMAIL_RE.is_match(text) || PHONE_RE.is_match(text) || PROFILE_LINK_RE.is_match(text)
}

/// True if the line contains a plausible 4-digit year (1900–2099).
pub fn contains_year(text: &str) -> bool {
    YEAR_RE.is_match(text)
}

/// Returns the first date range in the line (`2019 - 2021`, `Jan 2020 to Present`, ...).
pub fn find_date_range(text: &str) -> Option<&str> {
    DATE_RANGE_RE.find(text).map(|m| m.as_str())
}

/// True if the line carries any date signal the JobTitle rule cares about.
pub fn has_date(text: &str) -> bool {
    contains_year(text) || find_date_range(text).is_some()
}

/// True if the line contains a title/company separator: `|`, a tab, or a
/// free-standing dash.
pub fn has_separator(text: &str) -> bool {
    text.contains('|') || text.contains('\t') || DASH_SEPARATOR_RE.is_match(text)
}

/// Strips a leading list marker and returns the remaining content.
///
/// Recognized markers: `•` (space optional), and `-`, `*`, `+`, `>` followed by
/// whitespace. Returns `None` when the line is not marked or nothing follows the
/// marker.
pub fn strip_bullet_marker(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    let mut chars = trimmed.chars();
    let first = chars.next()?;

    let rest = if first == BULLET {
        chars.as_str()
    } else if matches!(first, '-' | '*' | '+' | '>') {
        let rest = chars.as_str();
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        rest
    } else {
        return None;
    };

    let content = rest.trim();
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

/// Counts non-empty comma-separated tokens.
pub fn comma_token_count(text: &str) -> usize {
    text.split(',').filter(|t| !t.trim().is_empty()).count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits a two-column line (`Acme Corp | Berlin`, `Acme Corp\tBerlin`) into its
/// left and right parts. Lines without a column separator return `(text, None)`.
pub fn split_columns(text: &str) -> (&str, Option<&str>) {
    let split = text
        .split_once('\t')
        .or_else(|| text.split_once(" | "))
        .or_else(|| text.split_once("   "));

    match split {
        Some((left, right)) if !left.trim().is_empty() && !right.trim().is_empty() => {
            (left.trim(), Some(right.trim()))
        }
        _ => (text.trim(), None),
    }
}

/// A single alphabetic word, the shape of one half of a split masthead (`JANE` / `DOE`).
pub fn is_single_alpha_word(text: &str) -> bool {
    let t = text.trim();
    !t.is_empty() && t.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '.')
}
