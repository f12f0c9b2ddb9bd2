// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hotel-local calendar.
//!
//! Expiry, relevance and age are judged against the hotel's own calendar
//! day, which can differ from the UTC date near midnight. Callers pass the
//! current instant in; nothing here reads the system clock.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, Time};

/// Errors constructing a [`HotelClock`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("unknown time zone '{0}'")]
    UnknownTimeZone(String),
}

/// Converts instants into the hotel's local calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotelClock {
    tz: Tz,
}

impl HotelClock {
    /// Creates a clock for an IANA time zone name such as `Asia/Almaty`.
    ///
    /// # Errors
    ///
    /// Returns `ClockError::UnknownTimeZone` if the name is not recognized.
    pub fn new(timezone: &str) -> Result<Self, ClockError> {
        timezone
            .parse::<Tz>()
            .map(|tz| Self { tz })
            .map_err(|_| ClockError::UnknownTimeZone(timezone.to_string()))
    }

    /// A clock on UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    #[must_use]
    pub fn timezone_name(&self) -> &'static str {
        self.tz.name()
    }

    /// Returns the hotel-local calendar date at `now`.
    ///
    /// Falls back to the UTC date if the instant cannot be represented.
    #[must_use]
    pub fn today(&self, now: OffsetDateTime) -> Date {
        self.local_date(now).unwrap_or_else(|| now.date())
    }

    /// Returns the instant the hotel-local `date` begins.
    ///
    /// When midnight falls in a DST gap the first existing local time of
    /// that day is used; unrepresentable dates fall back to UTC midnight.
    #[must_use]
    pub fn start_of_day(&self, date: Date) -> OffsetDateTime {
        self.local_midnight(date)
            .unwrap_or_else(|| date.with_time(Time::MIDNIGHT).assume_utc())
    }

    fn local_midnight(&self, date: Date) -> Option<OffsetDateTime> {
        let day = NaiveDate::from_ymd_opt(
            date.year(),
            u32::from(u8::from(date.month())),
            u32::from(date.day()),
        )?;
        let start = (0..24).find_map(|hour| {
            self.tz
                .from_local_datetime(&day.and_hms_opt(hour, 0, 0)?)
                .earliest()
        })?;
        OffsetDateTime::from_unix_timestamp(start.timestamp()).ok()
    }

    fn local_date(&self, now: OffsetDateTime) -> Option<Date> {
        let utc = Utc.timestamp_opt(now.unix_timestamp(), 0).single()?;
        let local = utc.with_timezone(&self.tz).date_naive();
        let month: Month = Month::try_from(u8::try_from(local.month()).ok()?).ok()?;
        let day: u8 = u8::try_from(local.day()).ok()?;
        Date::from_calendar_date(local.year(), month, day).ok()
    }
}

impl Default for HotelClock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_utc_clock_uses_utc_date() {
        let clock = HotelClock::utc();
        assert_eq!(clock.today(datetime!(2026-03-01 23:30 UTC)), date!(2026 - 03 - 01));
    }

    #[test]
    fn test_eastern_zone_rolls_date_forward() {
        let clock = HotelClock::new("Asia/Almaty").unwrap();
        assert_eq!(clock.today(datetime!(2026-03-01 23:30 UTC)), date!(2026 - 03 - 02));
    }

    #[test]
    fn test_start_of_day_is_local_midnight() {
        let clock = HotelClock::new("Asia/Almaty").unwrap();
        assert_eq!(
            clock.start_of_day(date!(2026 - 03 - 05)),
            datetime!(2026-03-04 19:00 UTC)
        );
        assert_eq!(
            HotelClock::utc().start_of_day(date!(2026 - 03 - 05)),
            datetime!(2026-03-05 00:00 UTC)
        );
    }

    #[test]
    fn test_unknown_zone_is_rejected() {
        assert_eq!(
            HotelClock::new("Mars/Olympus"),
            Err(ClockError::UnknownTimeZone(String::from("Mars/Olympus")))
        );
    }
}
