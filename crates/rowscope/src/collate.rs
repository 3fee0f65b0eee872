//! Locale-style string comparison.
//!
//! Approximates the default root collation most UI toolkits use for
//! `localeCompare`: letters compare by their base form first (accents and
//! case folded away), then accented before unaccented differences are
//! resolved, then lowercase sorts before uppercase. Strings that are equal
//! under every level fall back to byte order so the result is total.

use std::cmp::Ordering;

use deunicode::deunicode;

/// Compares two strings the way a locale-aware sort would.
///
/// ```
/// use std::cmp::Ordering;
/// use rowscope::collate::locale_compare;
///
/// assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_compare("résumé", "resume"), Ordering::Greater);
/// assert_eq!(locale_compare("a", "A"), Ordering::Less);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| accent_level(a, b))
        .then_with(|| case_level(a, b))
        .then_with(|| a.cmp(b))
}

/// Base letters only: transliterated to ASCII and lowercased.
fn primary_key(s: &str) -> String {
    deunicode(s).to_lowercase()
}

// Unaccented forms sort before accented ones.
fn accent_level(a: &str, b: &str) -> Ordering {
    let a_plain = a.is_ascii();
    let b_plain = b.is_ascii();
    match (a_plain, b_plain) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

// Lowercase before uppercase at the first differing character.
fn case_level(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    a.chars().count().cmp(&b.chars().count())
}
