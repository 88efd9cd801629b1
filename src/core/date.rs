//! Calendar field access and date arithmetic over `chrono` naive date-times.
//!
//! All values are treated as wall-clock times; conversions to and from epoch
//! milliseconds assume UTC.

use crate::utils::error::{KitError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike,
};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarField {
    Year,
    /// 1-based.
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    /// Monday = 1 .. Sunday = 7.
    DayOfWeek,
    DayOfYear,
    /// ISO-8601 week number.
    WeekOfYear,
}

pub fn get_field(date_time: &NaiveDateTime, field: CalendarField) -> i64 {
    match field {
        CalendarField::Year => date_time.year() as i64,
        CalendarField::Month => date_time.month() as i64,
        CalendarField::Day => date_time.day() as i64,
        CalendarField::Hour => date_time.hour() as i64,
        CalendarField::Minute => date_time.minute() as i64,
        CalendarField::Second => date_time.second() as i64,
        CalendarField::Millisecond => (date_time.nanosecond() / 1_000_000) as i64,
        CalendarField::DayOfWeek => date_time.weekday().number_from_monday() as i64,
        CalendarField::DayOfYear => date_time.ordinal() as i64,
        CalendarField::WeekOfYear => date_time.iso_week().week() as i64,
    }
}

/// Adds `amount` of `field` to `date_time`. Month and year arithmetic clamps
/// the day of month, so Jan 31 + 1 month lands on the last day of February.
pub fn add(
    date_time: &NaiveDateTime,
    field: CalendarField,
    amount: i64,
) -> Result<NaiveDateTime> {
    let overflow = || {
        KitError::invalid_argument("amount", amount, format!("{:?} arithmetic overflowed", field))
    };

    let result = match field {
        CalendarField::Year => {
            let months = amount.checked_mul(12).ok_or_else(overflow)?;
            add_months(date_time, months)
        }
        CalendarField::Month => add_months(date_time, amount),
        CalendarField::Day => {
            TimeDelta::try_days(amount).and_then(|d| date_time.checked_add_signed(d))
        }
        CalendarField::Hour => {
            TimeDelta::try_hours(amount).and_then(|d| date_time.checked_add_signed(d))
        }
        CalendarField::Minute => {
            TimeDelta::try_minutes(amount).and_then(|d| date_time.checked_add_signed(d))
        }
        CalendarField::Second => {
            TimeDelta::try_seconds(amount).and_then(|d| date_time.checked_add_signed(d))
        }
        CalendarField::Millisecond => {
            TimeDelta::try_milliseconds(amount).and_then(|d| date_time.checked_add_signed(d))
        }
        CalendarField::DayOfWeek | CalendarField::DayOfYear | CalendarField::WeekOfYear => {
            return Err(KitError::invalid_argument(
                "field",
                format!("{:?}", field),
                "Derived calendar fields cannot be added to",
            ))
        }
    };

    result.ok_or_else(overflow)
}

fn add_months(date_time: &NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        date_time.checked_add_months(Months::new(magnitude))
    } else {
        date_time.checked_sub_months(Months::new(magnitude))
    }
}

fn checked_items(pattern: &str) -> Result<StrftimeItems<'_>> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(KitError::invalid_argument(
            "pattern",
            pattern,
            "Invalid strftime pattern",
        ));
    }
    Ok(StrftimeItems::new(pattern))
}

/// Formats with a strftime pattern such as `%Y-%m-%d %H:%M:%S`.
pub fn format_date(date_time: &NaiveDateTime, pattern: &str) -> Result<String> {
    let items = checked_items(pattern)?;
    let mut out = String::new();
    write!(out, "{}", date_time.format_with_items(items)).map_err(|_| {
        KitError::invalid_argument("pattern", pattern, "Pattern needs fields the value lacks")
    })?;
    Ok(out)
}

pub fn parse_date_time(text: &str, pattern: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, pattern).map_err(|e| KitError::parse(text, e))
}

pub fn parse_date(text: &str, pattern: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, pattern).map_err(|e| KitError::parse(text, e))
}

pub fn start_of_day(date_time: &NaiveDateTime) -> NaiveDateTime {
    date_time.date().and_time(NaiveTime::MIN)
}

/// 23:59:59.999 on the same day.
pub fn end_of_day(date_time: &NaiveDateTime) -> NaiveDateTime {
    let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date_time.date().and_time(last_milli)
}

pub fn start_of_month(date: &NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(*date)
}

pub fn end_of_month(date: &NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: &NaiveDate, to: &NaiveDate) -> i64 {
    to.signed_duration_since(*from).num_days()
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn is_same_day(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn from_epoch_millis(millis: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis)
        .map(|utc| utc.naive_utc())
        .ok_or_else(|| KitError::invalid_argument("millis", millis, "Timestamp out of range"))
}

pub fn to_epoch_millis(date_time: &NaiveDateTime) -> i64 {
    date_time.and_utc().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_get_field() {
        let dt = at(2024, 3, 15, 13, 45, 30);
        assert_eq!(get_field(&dt, CalendarField::Year), 2024);
        assert_eq!(get_field(&dt, CalendarField::Month), 3);
        assert_eq!(get_field(&dt, CalendarField::Day), 15);
        assert_eq!(get_field(&dt, CalendarField::Hour), 13);
        // 2024-03-15 was a Friday
        assert_eq!(get_field(&dt, CalendarField::DayOfWeek), 5);
        assert_eq!(get_field(&dt, CalendarField::DayOfYear), 75);
        assert_eq!(get_field(&dt, CalendarField::WeekOfYear), 11);
    }

    #[test]
    fn test_add_month_clamps_day() {
        let jan_end = at(2024, 1, 31, 8, 0, 0);
        assert_eq!(add(&jan_end, CalendarField::Month, 1).unwrap(), at(2024, 2, 29, 8, 0, 0));
        assert_eq!(add(&jan_end, CalendarField::Month, -2).unwrap(), at(2023, 11, 30, 8, 0, 0));
        assert_eq!(add(&jan_end, CalendarField::Year, 1).unwrap(), at(2025, 1, 31, 8, 0, 0));
    }

    #[test]
    fn test_add_time_units() {
        let dt = at(2024, 12, 31, 23, 59, 30);
        assert_eq!(add(&dt, CalendarField::Second, 45).unwrap(), at(2025, 1, 1, 0, 0, 15));
        assert_eq!(add(&dt, CalendarField::Day, -31).unwrap(), at(2024, 11, 30, 23, 59, 30));
    }

    #[test]
    fn test_add_rejects_derived_fields() {
        let dt = at(2024, 1, 1, 0, 0, 0);
        assert!(matches!(
            add(&dt, CalendarField::DayOfWeek, 1),
            Err(KitError::InvalidArgument { .. })
        ));
        assert!(add(&dt, CalendarField::Year, i64::MAX).is_err());
    }

    #[test]
    fn test_format_and_parse() {
        let dt = at(2024, 3, 5, 7, 8, 9);
        assert_eq!(format_date(&dt, "%Y-%m-%d %H:%M:%S").unwrap(), "2024-03-05 07:08:09");
        assert!(format_date(&dt, "%Q").is_err());

        let parsed = parse_date_time("2024-03-05 07:08:09", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parsed, dt);
        assert!(matches!(
            parse_date("not a date", "%Y-%m-%d"),
            Err(KitError::Parse { .. })
        ));
    }

    #[test]
    fn test_boundaries() {
        let dt = at(2023, 2, 10, 15, 0, 0);
        assert_eq!(start_of_day(&dt), at(2023, 2, 10, 0, 0, 0));
        assert_eq!(get_field(&end_of_day(&dt), CalendarField::Millisecond), 999);
        assert_eq!(start_of_month(&dt.date()), NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(end_of_month(&dt.date()), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_calendar_helpers() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(days_between(&a, &b), 60);
        assert_eq!(days_between(&b, &a), -60);
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_same_day(&at(2024, 1, 1, 0, 0, 0), &at(2024, 1, 1, 23, 0, 0)));
    }

    #[test]
    fn test_epoch_millis() {
        let dt = from_epoch_millis(86_400_000).unwrap();
        assert_eq!(dt, at(1970, 1, 2, 0, 0, 0));
        assert_eq!(to_epoch_millis(&dt), 86_400_000);
        assert!(from_epoch_millis(i64::MAX).is_err());
    }
}
