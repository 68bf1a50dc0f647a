//! Locale-aware value coercion.
//!
//! Source transcripts print decimals with a comma separator ("3,42") and
//! dates in day-first order. Every numeric/date parse in the pipeline goes
//! through here so the normalization lives in exactly one place.

use chrono::NaiveDate;

/// Normalize a decimal string: trim and turn a comma separator into a dot.
pub fn normalize_decimal(raw: &str) -> String {
    raw.trim().replace(',', ".")
}

/// Parse a number that may use either decimal separator.
pub fn parse_locale_f64(raw: &str) -> Option<f64> {
    normalize_decimal(raw).parse().ok()
}

/// Parse a date in any of the formats seen on transcripts:
/// ISO 8601, dotted day-first (Turkish convention), slashed or dashed
/// day-first.
pub fn parse_locale_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_decimal_normalized() {
        assert_eq!(normalize_decimal(" 3,42 "), "3.42");
        assert_eq!(normalize_decimal("3.42"), "3.42");
    }

    #[test]
    fn parses_both_separators() {
        assert_eq!(parse_locale_f64("3,42"), Some(3.42));
        assert_eq!(parse_locale_f64("3.42"), Some(3.42));
        assert_eq!(parse_locale_f64("240"), Some(240.0));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_locale_f64(""), None);
        assert_eq!(parse_locale_f64("3,4,2"), None);
        assert_eq!(parse_locale_f64("abc"), None);
    }

    #[test]
    fn iso_date() {
        assert_eq!(
            parse_locale_date("2020-09-15"),
            NaiveDate::from_ymd_opt(2020, 9, 15)
        );
    }

    #[test]
    fn dotted_day_first_date() {
        assert_eq!(
            parse_locale_date("15.09.2020"),
            NaiveDate::from_ymd_opt(2020, 9, 15)
        );
    }

    #[test]
    fn slashed_and_dashed_day_first() {
        assert_eq!(
            parse_locale_date("15/09/2020"),
            NaiveDate::from_ymd_opt(2020, 9, 15)
        );
        assert_eq!(
            parse_locale_date("15-09-2020"),
            NaiveDate::from_ymd_opt(2020, 9, 15)
        );
    }

    #[test]
    fn invalid_date_is_none() {
        assert_eq!(parse_locale_date("not a date"), None);
        assert_eq!(parse_locale_date("32.13.2020"), None);
        assert_eq!(parse_locale_date(""), None);
    }
}
