//! Helpers for turning raw form values into typed fields.
//!
//! HTML forms submit every input as a string, and an untouched input arrives
//! as an empty string. These helpers treat blank values as "not provided" and
//! reject anything present but unparseable.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Date format produced by `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trim a raw value, mapping blank input to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional `YYYY-MM-DD` date
pub fn parse_optional_date(field: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    non_blank(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, DATE_FORMAT).map_err(|_| {
                AppError::Validation(format!("{} must be a date in YYYY-MM-DD format, got '{}'", field, v))
            })
        })
        .transpose()
}

/// Parse an optional integer field
pub fn parse_optional_int<T: std::str::FromStr>(field: &str, value: Option<String>) -> AppResult<Option<T>> {
    non_blank(value)
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| AppError::Validation(format!("{} must be a whole number, got '{}'", field, v)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(Some(" Ursula ".into())), Some("Ursula".to_string()));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("birth_date", Some("".into())).unwrap(), None);
        assert_eq!(
            parse_optional_date("birth_date", Some("1929-10-21".into())).unwrap(),
            NaiveDate::from_ymd_opt(1929, 10, 21)
        );
        assert!(matches!(
            parse_optional_date("birth_date", Some("21/10/1929".into())),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_optional_int() {
        assert_eq!(parse_optional_int::<i32>("year", None).unwrap(), None);
        assert_eq!(parse_optional_int::<i32>("year", Some(" 1969 ".into())).unwrap(), Some(1969));
        assert!(parse_optional_int::<i32>("year", Some("nineteen".into())).is_err());
    }
}
