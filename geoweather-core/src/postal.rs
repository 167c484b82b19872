//! Per-country postal code formats.
//!
//! Every pattern is anchored and compiled case-insensitively. Countries that
//! are not listed fall back to [`DEFAULT_FORMAT`].

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

/// Fallback for countries without a dedicated entry.
pub const DEFAULT_FORMAT: &str = r"^[A-Z0-9\s-]{3,10}$";

/// ISO 3166 alpha-2 code → postal code pattern.
pub const POSTAL_FORMATS: &[(&str, &str)] = &[
    // North America
    ("US", r"^[0-9]{5}(-[0-9]{4})?$"),
    ("CA", r"^[ABCEGHJKLMNPRSTVXY][0-9][A-Z]\s?[0-9][A-Z][0-9]$"),
    ("MX", r"^[0-9]{5}$"),
    // Europe
    ("GB", r"^[A-Z]{1,2}[0-9][A-Z0-9]?\s?[0-9][A-Z]{2}$"),
    ("DE", r"^[0-9]{5}$"),
    ("FR", r"^[0-9]{5}$"),
    ("IT", r"^[0-9]{5}$"),
    ("ES", r"^[0-9]{5}$"),
    ("NL", r"^[0-9]{4}\s?[A-Z]{2}$"),
    ("AT", r"^[0-9]{4}$"),
    ("BE", r"^[0-9]{4}$"),
    ("CH", r"^[0-9]{4}$"),
    ("DK", r"^[0-9]{4}$"),
    ("FI", r"^[0-9]{5}$"),
    ("GR", r"^[0-9]{3}\s?[0-9]{2}$"),
    ("IE", r"^[A-Z][0-9]{2}\s?[A-Z0-9]{4}$"),
    ("NO", r"^[0-9]{4}$"),
    ("PT", r"^[0-9]{4}-[0-9]{3}$"),
    ("SE", r"^[0-9]{3}\s?[0-9]{2}$"),
    // Asia
    ("JP", r"^[0-9]{3}-[0-9]{4}$"),
    ("CN", r"^[0-9]{6}$"),
    ("IN", r"^[0-9]{6}$"),
    ("KR", r"^[0-9]{5}$"),
    ("SG", r"^[0-9]{6}$"),
    ("TH", r"^[0-9]{5}$"),
    ("MY", r"^[0-9]{5}$"),
    // Oceania
    ("AU", r"^[0-9]{4}$"),
    ("NZ", r"^[0-9]{4}$"),
    // South America
    ("BR", r"^[0-9]{5}-[0-9]{3}$"),
    ("AR", r"^[A-Z][0-9]{4}[A-Z]{3}$"),
    ("CL", r"^[0-9]{7}$"),
    // Middle East
    ("IL", r"^[0-9]{5}([0-9]{2})?$"),
    ("SA", r"^[0-9]{5}(-[0-9]{4})?$"),
    ("AE", r"^[0-9]{5}$"),
];

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i-u){pattern}")).expect("postal code patterns are valid regexes")
}

static PATTERNS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    POSTAL_FORMATS
        .iter()
        .map(|(code, pattern)| (*code, compile(pattern)))
        .collect()
});

static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(DEFAULT_FORMAT));

/// Pattern used for `country_code`, falling back to the default format.
pub fn pattern_for(country_code: &str) -> &'static Regex {
    let key = country_code.trim().to_ascii_uppercase();
    PATTERNS.get(key.as_str()).unwrap_or(&DEFAULT_PATTERN)
}

/// Whether `country_code` has a dedicated entry in the table.
pub fn is_known_country(country_code: &str) -> bool {
    PATTERNS.contains_key(country_code.trim().to_ascii_uppercase().as_str())
}

/// Returns true when the trimmed `candidate` is a well-formed postal code for `country_code`.
pub fn matches_postal_format(candidate: &str, country_code: &str) -> bool {
    pattern_for(country_code).is_match(candidate.trim())
}
