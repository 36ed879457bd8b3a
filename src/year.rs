//! Signed calendar years: negative values are BC.

use std::sync::LazyLock;

use regex::Regex;

/// Left edge of the year slider.
pub const MIN_YEAR: i32 = -2000;
/// Right edge of the year slider.
pub const MAX_YEAR: i32 = 2026;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(-?\d{1,5})\s*(BCE|BC|CE|AD)?\s*$").expect("year regex")
});

/// Parse "800", "-200", "200 BC", "200BCE", "1500 AD", "1500 CE".
///
/// An era suffix on a negative number is rejected as ambiguous.
pub fn parse_year(raw: &str) -> Option<i32> {
    let caps = YEAR_RE.captures(raw)?;
    let value: i32 = caps[1].parse().ok()?;
    match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()) {
        None => Some(value),
        Some(_) if value < 0 => None,
        Some(era) if era.starts_with('B') => Some(-value),
        Some(_) => Some(value),
    }
}

/// "200 BC" / "800 AD".
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BC", year.unsigned_abs())
    } else {
        format!("{year} AD")
    }
}

/// Clamp a year onto the slider range.
pub fn clamp_to_slider(year: i32) -> i32 {
    year.clamp(MIN_YEAR, MAX_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_year("800"), Some(800));
        assert_eq!(parse_year("-200"), Some(-200));
        assert_eq!(parse_year("  0 "), Some(0));
    }

    #[test]
    fn test_parse_era_suffixes() {
        assert_eq!(parse_year("200 BC"), Some(-200));
        assert_eq!(parse_year("200bce"), Some(-200));
        assert_eq!(parse_year("1500 AD"), Some(1500));
        assert_eq!(parse_year("1500CE"), Some(1500));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("year 800"), None);
        assert_eq!(parse_year("-200 BC"), None);
        assert_eq!(parse_year("12.5"), None);
    }

    #[test]
    fn test_format_year() {
        assert_eq!(format_year(-2000), "2000 BC");
        assert_eq!(format_year(0), "0 AD");
        assert_eq!(format_year(1945), "1945 AD");
    }

    #[test]
    fn test_clamp_to_slider() {
        assert_eq!(clamp_to_slider(-5000), MIN_YEAR);
        assert_eq!(clamp_to_slider(3000), MAX_YEAR);
        assert_eq!(clamp_to_slider(1200), 1200);
    }
}
