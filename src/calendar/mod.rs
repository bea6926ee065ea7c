use ::time::format_description::FormatItem;
use ::time::macros::format_description;
use ::time::{Date, Duration, PrimitiveDateTime};
use thiserror::Error;

mod date_unit;
pub use date_unit::*;
mod resolver;
pub use resolver::*;

/// The only accepted date format, `YYYY-MM-DD`.
pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Format of the generation timestamp stamped into every footer.
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Bad date `{input}`, expected YYYY-MM-DD")]
pub struct InvalidDate {
    input: String,
}

impl InvalidDate {
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

pub fn parse_date(input: &str) -> Result<Date, InvalidDate> {
    Date::parse(input.trim(), DATE_FORMAT).map_err(|_| InvalidDate {
        input: input.to_string(),
    })
}

#[must_use]
pub fn format_date(date: Date) -> String {
    // the format only consists of date components, which every `Date` has
    date.format(DATE_FORMAT).unwrap_or_else(|_| {
        format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    })
}

#[must_use]
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).unwrap_or_else(|_| {
        format!(
            "{} {:02}:{:02}:{:02}",
            format_date(timestamp.date()),
            timestamp.hour(),
            timestamp.minute(),
            timestamp.second()
        )
    })
}

pub trait DateExt {
    /// Number of days since the last monday (0 for a monday).
    #[must_use]
    fn days_since_monday(&self) -> u8;
}

impl DateExt for Date {
    fn days_since_monday(&self) -> u8 {
        self.weekday().number_days_from_monday()
    }
}

/// Returns the monday of the week containing `date`.
///
/// The result is never after `date` and at most six days before it. Returns
/// `None` if that monday precedes the earliest representable date.
#[must_use]
pub fn week_start(date: Date) -> Option<Date> {
    let offset = Duration::days(i64::from(date.days_since_monday()));
    date.checked_sub(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::time::macros::{date, datetime};
    use ::time::Weekday;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-06-12"), Ok(date!(2024 - 06 - 12)));
        assert_eq!(parse_date(" 2024-06-12\n"), Ok(date!(2024 - 06 - 12)));
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2024-6-12").is_err());
        assert!(parse_date("12.06.2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_invalid_date_message() {
        let error = parse_date("not-a-date").unwrap_err();
        assert_eq!(error.input(), "not-a-date");
        assert_eq!(
            error.to_string(),
            "Bad date `not-a-date`, expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_week_start() {
        // 2024-06-12 is a wednesday
        assert_eq!(week_start(date!(2024 - 06 - 12)), Some(date!(2024 - 06 - 10)));
        assert_eq!(week_start(date!(2024 - 06 - 10)), Some(date!(2024 - 06 - 10)));
        assert_eq!(week_start(date!(2024 - 06 - 16)), Some(date!(2024 - 06 - 10)));
        // crossing month and year boundaries
        assert_eq!(week_start(date!(2024 - 03 - 02)), Some(date!(2024 - 02 - 26)));
        assert_eq!(week_start(date!(2025 - 01 - 01)), Some(date!(2024 - 12 - 30)));
    }

    #[test]
    fn test_week_start_properties() {
        let mut date = date!(2023 - 12 - 01);
        let end = date!(2024 - 03 - 31);

        while date <= end {
            let monday = week_start(date).unwrap();

            assert_eq!(monday.weekday(), Weekday::Monday, "{}", date);
            assert!(monday <= date, "{}", date);
            assert!((date - monday).whole_days() <= 6, "{}", date);
            assert_eq!(week_start(monday), Some(monday), "{}", date);

            date = date.next_day().unwrap();
        }
    }

    #[test]
    fn test_week_start_before_calendar() {
        let mut date = Date::MIN;
        for _ in 0..7 {
            match week_start(date) {
                Some(monday) => assert_eq!(monday.weekday(), Weekday::Monday, "{}", date),
                None => assert_ne!(date.weekday(), Weekday::Monday, "{}", date),
            }

            date = date.next_day().unwrap();
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(datetime!(2024-06-12 09:05:03)),
            "2024-06-12 09:05:03".to_string()
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date!(2024 - 06 - 10)), "2024-06-10".to_string());
        assert_eq!(format_date(date!(0999 - 01 - 02)), "0999-01-02".to_string());
    }
}
