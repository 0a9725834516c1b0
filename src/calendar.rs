//! Date/time input surface.
//!
//! Six clamped integer fields combine into one civil instant, which converts
//! to the epoch timestamp the path core writes. Calendar arithmetic is done
//! by hand over the proleptic Gregorian calendar; no timezone handling, all
//! instants are UTC.

use crate::errors::ChronopathError;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Week starts on Monday, matching the panel grid.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The calendar's editable state: six bounded date/time fields plus the
/// property path the timestamp should be written to.
///
/// Field bounds are enforced by clamping on write, the way the host clamps
/// its integer properties: year 1–9999, month 1–12, day 1–31, hour 0–23,
/// minute 0–59, second 0–59. A day of 31 in a short month is representable
/// here and only rejected when combined into a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarProps {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    /// Target path for [`add_date_keyframe`](crate::engine::Engine::add_date_keyframe).
    /// `None` or empty means "no target".
    pub target_path: Option<String>,
}

impl CalendarProps {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        let mut props = Self {
            year: 1,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            target_path: None,
        };
        props.set_year(year);
        props.set_month(month);
        props.set_day(day);
        props.set_hour(hour);
        props.set_minute(minute);
        props.set_second(second);
        props
    }

    /// Current UTC date/time from the system clock.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        let (year, month, day) = civil_from_days(secs.div_euclid(86_400));
        let time = secs.rem_euclid(86_400);
        Self::new(
            year as i32,
            month,
            day,
            (time / 3_600) as u32,
            (time % 3_600 / 60) as u32,
            (time % 60) as u32,
        )
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year.clamp(1, 9999);
    }

    pub fn set_month(&mut self, month: u32) {
        self.month = month.clamp(1, 12);
    }

    pub fn set_day(&mut self, day: u32) {
        self.day = day.clamp(1, 31);
    }

    pub fn set_hour(&mut self, hour: u32) {
        self.hour = hour.min(23);
    }

    pub fn set_minute(&mut self, minute: u32) {
        self.minute = minute.min(59);
    }

    pub fn set_second(&mut self, second: u32) {
        self.second = second.min(59);
    }

    /// Seconds since the Unix epoch for the instant the fields describe.
    ///
    /// Fails only when the fields name no real civil date (February 30th);
    /// the individual fields are always in bounds.
    pub fn timestamp(&self) -> Result<f64, ChronopathError> {
        if self.day > days_in_month(self.year, self.month) {
            return Err(ChronopathError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            });
        }
        let days = days_from_civil(self.year as i64, self.month, self.day);
        let seconds =
            days * 86_400 + self.hour as i64 * 3_600 + self.minute as i64 * 60 + self.second as i64;
        Ok(seconds as f64)
    }
}

impl Default for CalendarProps {
    fn default() -> Self {
        Self::now()
    }
}

/// A partial date/time edit submitted by a day cell or header control.
///
/// Unset fields leave the current value alone. A month pushed past either end
/// of the year rolls into the adjacent year before anything is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateChange {
    pub year: Option<i32>,
    /// May be 0 or 13 on arrival; rollover happens in [`apply`](DateChange::apply).
    pub month: Option<i32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

impl DateChange {
    /// All six fields set to the current UTC date/time.
    pub fn today() -> Self {
        let now = CalendarProps::now();
        Self {
            year: Some(now.year()),
            month: Some(now.month() as i32),
            day: Some(now.day()),
            hour: Some(now.hour()),
            minute: Some(now.minute()),
            second: Some(now.second()),
        }
    }

    /// The request a prev/next header control submits: same year, month
    /// shifted by `offset`, time untouched.
    pub fn month_offset(props: &CalendarProps, offset: i32) -> Self {
        Self {
            year: Some(props.year()),
            month: Some(props.month() as i32 + offset),
            ..Self::default()
        }
    }

    pub fn apply(&self, props: &mut CalendarProps) {
        let mut year = self.year;
        let mut month = self.month;
        if let Some(m) = month {
            if m > 12 {
                year = Some(year.unwrap_or(props.year()) + 1);
                month = Some(1);
            } else if m <= 0 {
                year = Some(year.unwrap_or(props.year()) - 1);
                month = Some(12);
            }
        }
        if let Some(day) = self.day {
            props.set_day(day);
        }
        if let Some(m) = month {
            props.set_month(m.max(1) as u32);
        }
        if let Some(y) = year {
            props.set_year(y);
        }
        if let Some(hour) = self.hour {
            props.set_hour(hour);
        }
        if let Some(minute) = self.minute {
            props.set_minute(minute);
        }
        if let Some(second) = self.second {
            props.set_second(second);
        }
    }
}

// ============================================================================
// CIVIL DATE ARITHMETIC
// ============================================================================

pub fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    const LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let month = month.clamp(1, 12);
    if month == 2 && is_leap(year) {
        29
    } else {
        LENGTHS[month as usize - 1]
    }
}

/// Days from 1970-01-01 to the given civil date. Negative before the epoch.
pub fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (month as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { y + 1 } else { y };
    (year, month as u32, day as u32)
}

/// Weekday of a civil date, 0 = Monday through 6 = Sunday.
pub fn weekday(year: i32, month: u32, day: u32) -> u32 {
    // 1970-01-01 was a Thursday.
    (days_from_civil(year as i64, month, day) + 3).rem_euclid(7) as u32
}

fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    (1..month).map(|m| days_in_month(year, m)).sum::<u32>() + day
}

fn iso_weeks_in_year(year: i32) -> u32 {
    let p = |y: i32| (y + y / 4 - y / 100 + y / 400).rem_euclid(7);
    if p(year) == 4 || p(year - 1) == 3 {
        53
    } else {
        52
    }
}

/// ISO 8601 week number of a civil date.
pub fn iso_week(year: i32, month: u32, day: u32) -> u32 {
    let ordinal = day_of_year(year, month, day) as i32;
    let iso_weekday = weekday(year, month, day) as i32 + 1; // 1 = Monday
    let week = (ordinal - iso_weekday + 10) / 7;
    if week < 1 {
        iso_weeks_in_year(year - 1)
    } else if week as u32 > iso_weeks_in_year(year) {
        1
    } else {
        week as u32
    }
}

/// Civil date `delta` days away from the given one.
pub fn add_days(year: i32, month: u32, day: u32, delta: i64) -> (i32, u32, u32) {
    let (y, m, d) = civil_from_days(days_from_civil(year as i64, month, day) + delta);
    (y as i32, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn civil_round_trip() {
        for days in [-719_162, -1, 0, 1, 19_000, 2_932_896] {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days, "day number {days}");
        }
    }

    #[test]
    fn known_day_numbers() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
    }
}
