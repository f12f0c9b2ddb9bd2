// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DateRange, DomainError, HotelClock, ValidityWindow};
use time::macros::date;

#[test]
fn test_unbounded_window_is_always_relevant() {
    assert!(ValidityWindow::unbounded().is_relevant(date!(2026 - 01 - 01)));
}

#[test]
fn test_bounds_are_inclusive() {
    let window =
        ValidityWindow::new(Some(date!(2026 - 06 - 01)), Some(date!(2026 - 08 - 31))).unwrap();
    assert!(!window.is_relevant(date!(2026 - 05 - 31)));
    assert!(window.is_relevant(date!(2026 - 06 - 01)));
    assert!(window.is_relevant(date!(2026 - 08 - 31)));
    assert!(!window.is_relevant(date!(2026 - 09 - 01)));
}

#[test]
fn test_single_bound_leaves_other_side_open() {
    let from_only = ValidityWindow::new(Some(date!(2026 - 06 - 01)), None).unwrap();
    assert!(!from_only.is_relevant(date!(2026 - 05 - 01)));
    assert!(from_only.is_relevant(date!(2030 - 01 - 01)));

    let to_only = ValidityWindow::new(None, Some(date!(2026 - 06 - 01))).unwrap();
    assert!(to_only.is_relevant(date!(2020 - 01 - 01)));
    assert!(!to_only.is_relevant(date!(2026 - 06 - 02)));
}

#[test]
fn test_reversed_window_is_rejected() {
    let result = ValidityWindow::new(Some(date!(2026 - 06 - 02)), Some(date!(2026 - 06 - 01)));
    assert!(matches!(result, Err(DomainError::InvalidDateWindow { .. })));
}

#[test]
fn test_date_range_bounds_cover_whole_days() {
    let range = DateRange::new(Some(date!(2026 - 01 - 01)), Some(date!(2026 - 01 - 31)));
    assert_eq!(range.lower_bound().as_deref(), Some("2026-01-01T00:00:00Z"));
    assert_eq!(
        range.upper_bound_exclusive().as_deref(),
        Some("2026-02-01T00:00:00Z")
    );
    assert_eq!(DateRange::default().lower_bound(), None);
}

#[test]
fn test_date_range_on_hotel_clock_uses_local_midnight() {
    let almaty = HotelClock::new("Asia/Almaty").unwrap();
    let range = DateRange::new(Some(date!(2026 - 03 - 05)), Some(date!(2026 - 03 - 05)))
        .on_clock(almaty);
    assert_eq!(range.lower_bound().as_deref(), Some("2026-03-04T19:00:00Z"));
    assert_eq!(
        range.upper_bound_exclusive().as_deref(),
        Some("2026-03-05T19:00:00Z")
    );
}
