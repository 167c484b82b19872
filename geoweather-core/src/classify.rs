//! Classification of free-form location input.
//!
//! Decides whether user text is a coordinate pair, a postal code (optionally
//! followed by a country code), a "city, state, US" tuple, a "city, country"
//! pair, or a free-text query for direct geocoding.
//!
//! The country heuristic treats any trailing two-letter token as an ISO
//! country code, so "Springfield IL" is read as Springfield in Israel rather
//! than Illinois. Only a trailing `US` promotes the token before it to a state.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{error::GeocodingError, postal::matches_postal_format};

/// Country assumed when none is given.
pub const DEFAULT_COUNTRY: &str = "US";

/// Result limit used for direct geocoding queries.
pub const DEFAULT_RESULT_LIMIT: u8 = 1;

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9]+\.?[0-9]*),\s*(-?[0-9]+\.?[0-9]*)$").expect("valid coordinate regex")
});

static POSTAL_WITH_COUNTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^([A-Z0-9\s-]+)(?:[\s,]+([A-Z]{2}))?$").expect("valid postal code regex")
});

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*|\s+").expect("valid separator regex"));

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifiedInput {
    PostalCode { code: String, country_code: String },
    CityState { city: String, state: String, country_code: String },
    CityCountry { city: String, country_code: String },
    Coordinates { lat: f64, lon: f64 },
    FreeText { query: String },
}

impl ClassifiedInput {
    pub fn label(&self) -> &'static str {
        match self {
            ClassifiedInput::PostalCode { .. } => "postal code",
            ClassifiedInput::CityState { .. } => "city, state",
            ClassifiedInput::CityCountry { .. } => "city, country",
            ClassifiedInput::Coordinates { .. } => "coordinates",
            ClassifiedInput::FreeText { .. } => "free text",
        }
    }
}

/// Parse `"<lat>,<lon>"` with optional whitespace after the comma.
pub fn parse_coordinates(input: &str) -> Option<(f64, f64)> {
    let caps = COORDINATES.captures(input.trim())?;
    let lat = caps[1].parse().ok()?;
    let lon = caps[2].parse().ok()?;
    Some((lat, lon))
}

fn is_two_letter(token: &str) -> bool {
    token.len() == 2 && token.bytes().all(|b| b.is_ascii_alphabetic())
}

fn classify_postal(input: &str) -> Option<ClassifiedInput> {
    let caps = POSTAL_WITH_COUNTRY.captures(input)?;
    let code = caps.get(1)?.as_str().trim();
    let country_code = caps
        .get(2)
        .map_or(DEFAULT_COUNTRY.to_string(), |m| m.as_str().to_ascii_uppercase());

    matches_postal_format(code, &country_code)
        .then(|| ClassifiedInput::PostalCode { code: code.to_string(), country_code })
}

fn classify_parts(parts: &[&str]) -> Option<ClassifiedInput> {
    let n = parts.len();
    if n < 2 {
        return None;
    }

    let last = parts[n - 1];
    if is_two_letter(last) {
        if n >= 3 && is_two_letter(parts[n - 2]) && last.eq_ignore_ascii_case(DEFAULT_COUNTRY) {
            return Some(ClassifiedInput::CityState {
                city: parts[..n - 2].join(" "),
                state: parts[n - 2].to_string(),
                country_code: DEFAULT_COUNTRY.to_string(),
            });
        }
        return Some(ClassifiedInput::CityCountry {
            city: parts[..n - 1].join(" "),
            country_code: last.to_string(),
        });
    }

    None
}

/// Classify raw location input. Pure: the same input always yields the same result.
pub fn classify(input: &str) -> Result<ClassifiedInput, GeocodingError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GeocodingError::EmptyInput);
    }

    if let Some((lat, lon)) = parse_coordinates(input) {
        return Ok(ClassifiedInput::Coordinates { lat, lon });
    }

    if let Some(postal) = classify_postal(input) {
        return Ok(postal);
    }

    let parts: Vec<&str> = SEPARATOR.split(input).collect();
    if let Some(classified) = classify_parts(&parts) {
        return Ok(classified);
    }

    Ok(ClassifiedInput::FreeText { query: input.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postal(code: &str, country: &str) -> ClassifiedInput {
        ClassifiedInput::PostalCode { code: code.into(), country_code: country.into() }
    }

    #[test]
    fn five_digit_zip_is_us_postal_code() {
        assert_eq!(classify("10001").unwrap(), postal("10001", "US"));
        assert_eq!(classify("  10001-1234 ").unwrap(), postal("10001-1234", "US"));
    }

    #[test]
    fn postal_code_with_comma_separated_country() {
        assert_eq!(classify("12345,DE").unwrap(), postal("12345", "DE"));
        assert_eq!(classify("K1A 0B1, ca").unwrap(), postal("K1A 0B1", "CA"));
        assert_eq!(classify("123-4567, JP").unwrap(), postal("123-4567", "JP"));
    }

    #[test]
    fn non_ascii_lookalike_letters_are_not_postal_codes() {
        let classified = classify("\u{212A}1A 0B1, CA").unwrap();
        assert!(!matches!(classified, ClassifiedInput::PostalCode { .. }));
    }

    #[test]
    fn zip_followed_by_mismatched_country_is_not_a_postal_code() {
        // The greedy code capture swallows " CA", so the whole string is
        // checked against the US format and fails; the split step then reads
        // CA as a country.
        let classified = classify("10001 CA").unwrap();
        assert!(!matches!(classified, ClassifiedInput::PostalCode { .. }));
        assert_eq!(
            classified,
            ClassifiedInput::CityCountry { city: "10001".into(), country_code: "CA".into() }
        );
    }

    #[test]
    fn city_and_country() {
        assert_eq!(
            classify("Paris, FR").unwrap(),
            ClassifiedInput::CityCountry { city: "Paris".into(), country_code: "FR".into() }
        );
        assert_eq!(
            classify("Rio de Janeiro BR").unwrap(),
            ClassifiedInput::CityCountry { city: "Rio de Janeiro".into(), country_code: "BR".into() }
        );
    }

    #[test]
    fn city_state_us() {
        assert_eq!(
            classify("New York, NY, US").unwrap(),
            ClassifiedInput::CityState {
                city: "New York".into(),
                state: "NY".into(),
                country_code: "US".into()
            }
        );
        assert_eq!(
            classify("austin tx us").unwrap(),
            ClassifiedInput::CityState {
                city: "austin".into(),
                state: "tx".into(),
                country_code: "US".into()
            }
        );
    }

    #[test]
    fn two_letter_state_without_us_is_read_as_country() {
        assert_eq!(
            classify("Springfield, IL").unwrap(),
            ClassifiedInput::CityCountry { city: "Springfield".into(), country_code: "IL".into() }
        );
    }

    #[test]
    fn non_us_trailing_pair_keeps_state_in_city() {
        assert_eq!(
            classify("Sydney NS AU").unwrap(),
            ClassifiedInput::CityCountry { city: "Sydney NS".into(), country_code: "AU".into() }
        );
    }

    #[test]
    fn bare_city_is_free_text() {
        assert_eq!(classify("London").unwrap(), ClassifiedInput::FreeText { query: "London".into() });
    }

    #[test]
    fn multi_word_without_country_is_free_text() {
        assert_eq!(
            classify("  Eiffel Tower Paris ").unwrap(),
            ClassifiedInput::FreeText { query: "Eiffel Tower Paris".into() }
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(classify(""), Err(GeocodingError::EmptyInput)));
        assert!(matches!(classify("   "), Err(GeocodingError::EmptyInput)));
    }

    #[test]
    fn coordinates_take_priority() {
        assert_eq!(
            classify("40.7128, -74.0060").unwrap(),
            ClassifiedInput::Coordinates { lat: 40.7128, lon: -74.006 }
        );
        assert_eq!(parse_coordinates("-33.9,151"), Some((-33.9, 151.0)));
        assert_eq!(parse_coordinates("40.7128"), None);
        assert_eq!(parse_coordinates("abc, def"), None);
    }

    #[test]
    fn classification_is_deterministic() {
        for input in ["10001", "Paris, FR", "New York, NY, US", "London", "1.5,2.5"] {
            assert_eq!(classify(input).unwrap(), classify(input).unwrap());
        }
    }
}
