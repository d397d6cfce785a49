//! Text representation of dates for input surfaces. The engine itself only
//! deals in [`CalendarDate`] values.

use chrono::NaiveDate;

use crate::datemath::CalendarDate;
use crate::error::Result;

/// `MM-DD-YYYY`
pub const DEFAULT_FORMAT: &str = "%m-%d-%Y";

pub fn format_date(date: &CalendarDate, fmt: &str) -> String {
    date.naive().format(fmt).to_string()
}

pub fn parse_date(s: &str, fmt: &str) -> Result<CalendarDate> {
    Ok(CalendarDate::from(NaiveDate::parse_from_str(s.trim(), fmt)?))
}

/// Parses `s` in `fmt`, falling back to ISO `YYYY-MM-DD`.
pub fn parse_date_or_iso(s: &str, fmt: &str) -> Result<CalendarDate> {
    parse_date(s, fmt).or_else(|err| {
        s.parse::<CalendarDate>()
            .map_err(|_| err.with_msg(&format!("'{}' matches neither {} nor YYYY-MM-DD", s, fmt)))
    })
}

/// Formats an optional value, yielding an empty string for no value.
pub fn format_value(value: Option<&CalendarDate>, fmt: &str) -> String {
    value.map(|date| format_date(date, fmt)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_format_is_month_first() {
        let date = CalendarDate::from_ymd_normalized(2024, 5, 9);
        assert_eq!(format_date(&date, DEFAULT_FORMAT), "06-09-2024");
        assert_eq!(parse_date("06-09-2024", DEFAULT_FORMAT).ok(), Some(date));
    }

    #[test]
    fn custom_formats() {
        let date = CalendarDate::from_ymd_normalized(2023, 11, 31);
        assert_eq!(format_date(&date, "%d.%m.%Y"), "31.12.2023");
        assert_eq!(format_date(&date, "%B %-d, %Y"), "December 31, 2023");
        assert_eq!(parse_date(" 31.12.2023 ", "%d.%m.%Y").ok(), Some(date));
    }

    #[test]
    fn invalid_input_is_a_parse_error() {
        let err = parse_date("02-30-2024", DEFAULT_FORMAT).expect_err("no Feb 30th");
        assert!(matches!(err.kind, ErrorKind::DateParse));
        assert!(parse_date("yesterday", DEFAULT_FORMAT).is_err());
    }

    #[test]
    fn iso_fallback() {
        let date = CalendarDate::from_ymd_normalized(2024, 5, 9);
        assert_eq!(parse_date_or_iso("06-09-2024", DEFAULT_FORMAT).ok(), Some(date));
        assert_eq!(parse_date_or_iso("2024-06-09", DEFAULT_FORMAT).ok(), Some(date));

        let err = parse_date_or_iso("9th of June", DEFAULT_FORMAT).expect_err("unparseable");
        assert!(matches!(err.kind, ErrorKind::DateParse));
        assert!(err.to_string().contains("'9th of June'"));
    }

    #[test]
    fn empty_value() {
        assert_eq!(format_value(None, DEFAULT_FORMAT), "");
    }
}
