// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validity windows and date-range filters.

use crate::clock::HotelClock;
use crate::error::DomainError;
use crate::validation::{format_timestamp, validate_date_window};
use time::{Date, Duration};

/// An optional `[from, to]` date range during which an item is offered.
///
/// A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityWindow {
    from: Option<Date>,
    to: Option<Date>,
}

impl ValidityWindow {
    /// Creates a window, rejecting one that ends before it starts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateWindow` if `from > to`.
    pub fn new(from: Option<Date>, to: Option<Date>) -> Result<Self, DomainError> {
        validate_date_window(from, to)?;
        Ok(Self { from, to })
    }

    /// A window with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    #[must_use]
    pub const fn from(&self) -> Option<Date> {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> Option<Date> {
        self.to
    }

    /// Returns true if `today` lies inside every bound that is set, inclusive.
    #[must_use]
    pub fn is_relevant(&self, today: Date) -> bool {
        self.from.is_none_or(|from| from <= today) && self.to.is_none_or(|to| today <= to)
    }
}

/// An inclusive calendar-date filter applied to timestamps.
///
/// Days are the hotel's calendar days: bounds are local midnights of the
/// range's clock, converted to UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
    clock: HotelClock,
}

impl DateRange {
    /// A range of UTC calendar days.
    #[must_use]
    pub const fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self {
            from,
            to,
            clock: HotelClock::utc(),
        }
    }

    /// The same days, read on `clock`'s calendar.
    #[must_use]
    pub const fn on_clock(self, clock: HotelClock) -> Self {
        Self { clock, ..self }
    }

    /// Lower bound as a stored timestamp string (start of `from`), inclusive.
    #[must_use]
    pub fn lower_bound(&self) -> Option<String> {
        self.from
            .map(|d| format_timestamp(self.clock.start_of_day(d)))
    }

    /// Upper bound as a stored timestamp string (start of the day after `to`), exclusive.
    #[must_use]
    pub fn upper_bound_exclusive(&self) -> Option<String> {
        self.to.and_then(|d| {
            d.checked_add(Duration::days(1))
                .map(|next| format_timestamp(self.clock.start_of_day(next)))
        })
    }
}
