//! Date parsing for statement rows and summary values.

use chrono::NaiveDate;

use super::patterns::{DATE_DAY_MONTH_NAME, DATE_DMY, DATE_MONTH_NAME_DAY};
use crate::models::profile::DateFormat;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a date token printed in the given format.
pub fn parse_date(text: &str, format: DateFormat) -> Option<NaiveDate> {
    let text = text.trim();
    match format {
        DateFormat::DayMonthYear => {
            let caps = DATE_DMY.captures(text)?;
            let day: u32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            NaiveDate::from_ymd_opt(parse_year(&caps[3]), month, day)
        }
        DateFormat::DayMonthNameYear => {
            let caps = DATE_DAY_MONTH_NAME.captures(text)?;
            let day: u32 = caps[1].parse().ok()?;
            let month = month_number(&caps[2])?;
            NaiveDate::from_ymd_opt(parse_year(&caps[3]), month, day)
        }
        DateFormat::MonthNameDayYear => {
            let caps = DATE_MONTH_NAME_DAY.captures(text)?;
            let month = month_number(&caps[1])?;
            let day: u32 = caps[2].parse().ok()?;
            NaiveDate::from_ymd_opt(parse_year(&caps[3]), month, day)
        }
    }
}

/// Parse a date token in whichever supported format fits.
pub fn parse_any_date(text: &str) -> Option<(NaiveDate, DateFormat)> {
    [
        DateFormat::DayMonthYear,
        DateFormat::DayMonthNameYear,
        DateFormat::MonthNameDayYear,
    ]
    .into_iter()
    .find_map(|format| parse_date(text, format).map(|date| (date, format)))
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: 00-50 is the 2000s, 51-99 the 1900s
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

/// Month number for a full or abbreviated (at least three letters) name.
fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    if name.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| full.starts_with(&name))
        .map(|i| i as u32 + 1)
}
