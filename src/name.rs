// Player name normalization.
//
// Sleeper pick metadata and rankings CSVs disagree on suffixes, punctuation,
// and spacing ("Justin Jefferson Jr." vs "JUSTIN  JEFFERSON"). Both sources
// are reduced to one canonical key before any membership check.

use regex::Regex;
use std::sync::LazyLock;

/// Generational suffixes dropped when they appear as standalone words.
static RE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(Jr\.?|Sr\.?|II|III|IV|V)\b").expect("invalid suffix regex"));

/// Everything that is not a letter, whitespace, or hyphen.
static RE_NON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z\s\-]").expect("invalid charset regex"));

/// Runs of whitespace of any kind.
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Canonicalize a player's full name for cross-source comparison.
///
/// Strips generational suffixes (Jr/Sr/II-V) as whole words, removes every
/// character that is not a letter, whitespace, or hyphen, collapses
/// whitespace runs to single spaces, trims, and lowercases. Two raw names
/// refer to the same player iff their normalized forms are equal. Distinct
/// players can still collide on the same key; that false-positive risk is
/// accepted.
///
/// Degenerate inputs never fail: an empty or suffix-only name normalizes to
/// the empty string, which matches no real ranking entry.
pub fn normalize(name: &str) -> String {
    let stripped = RE_SUFFIX.replace_all(name, "");
    let cleaned = RE_NON_NAME.replace_all(&stripped, "");
    let collapsed = RE_WHITESPACE.replace_all(&cleaned, " ");
    collapsed.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
