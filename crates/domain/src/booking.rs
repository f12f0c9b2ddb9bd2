// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bookings, their status lifecycle, and booking cards.
//!
//! ```text
//! BOOKED ──check in──► CHECKED_IN ──check out──► CHECKED_OUT
//!    │                     │
//!    └──────cancel─────────┴──────────────────► CANCELLED
//! ```
//!
//! CHECKED_OUT and CANCELLED are terminal.

use crate::error::DomainError;
use crate::money::Money;
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Booked,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub const ACTIVE: [Self; 2] = [Self::Booked, Self::CheckedIn];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "BOOKED",
            Self::CheckedIn => "CHECKED_IN",
            Self::CheckedOut => "CHECKED_OUT",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Numeric code used by the front desk's older tooling.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Booked => 1,
            Self::CheckedIn => 2,
            Self::CheckedOut => 3,
            Self::Cancelled => 4,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Booked | Self::CheckedIn)
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` for any edge outside
    /// the lifecycle graph.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        let reason: &str = match (self, target) {
            (Self::Booked, Self::CheckedIn)
            | (Self::CheckedIn, Self::CheckedOut)
            | (Self::Booked | Self::CheckedIn, Self::Cancelled) => return Ok(()),
            (current, _) if current.is_terminal() => "booking is already closed",
            (_, Self::CheckedIn) => "only a booked reservation can be checked in",
            (_, Self::CheckedOut) => "only a checked-in guest can be checked out",
            _ => "transition is not part of the booking lifecycle",
        };
        Err(DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: target.as_str().to_string(),
            reason: reason.to_string(),
        })
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOKED" | "1" => Ok(Self::Booked),
            "CHECKED_IN" | "2" => Ok(Self::CheckedIn),
            "CHECKED_OUT" | "3" => Ok(Self::CheckedOut),
            "CANCELLED" | "4" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidChoice {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// A single room-stay reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Option<i64>,
    pub guest_id: Option<i64>,
    pub agent_id: Option<i64>,
    pub room_id: Option<i64>,
    pub room_condition_id: Option<i64>,
    pub status: BookingStatus,
    pub created_by: i64,
    pub check_in: Option<OffsetDateTime>,
    pub check_out: Option<OffsetDateTime>,
    pub note: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Booking {
    /// Validates the stay window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CheckOutNotAfterCheckIn` if both times are set
    /// and check-out is not later than check-in.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out)
            && check_in >= check_out
        {
            return Err(DomainError::CheckOutNotAfterCheckIn {
                check_in,
                check_out,
            });
        }
        Ok(())
    }

    /// Length of stay; `None` unless both ends are set.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some(check_out - check_in),
            _ => None,
        }
    }

    /// Moves the booking to `target`, leaving it untouched on error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` for an invalid edge.
    pub fn transition(&mut self, target: BookingStatus) -> Result<(), DomainError> {
        self.status.validate_transition(target)?;
        self.status = target;
        Ok(())
    }
}

/// Lifecycle state of a booking card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingCardStatus {
    Active,
    Completed,
    Cancelled,
}

impl BookingCardStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for BookingCardStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" | "1" => Ok(Self::Active),
            "COMPLETED" | "2" => Ok(Self::Completed),
            "CANCELLED" | "3" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidChoice {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// A billing unit grouping bookings and purchased goods and services.
///
/// `total_amount` is a cached projection; `total_is_stale` records that an
/// input changed since it was last computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCard {
    pub id: Option<i64>,
    pub primary_guest_id: i64,
    pub booking_ids: Vec<i64>,
    pub goods_ids: Vec<i64>,
    pub service_ids: Vec<i64>,
    pub status: BookingCardStatus,
    pub total_amount: Money,
    pub total_is_stale: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl BookingCard {
    /// # Errors
    ///
    /// Returns `DomainError::BookingCardWithoutBookings` if no booking is attached.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.booking_ids.is_empty() {
            return Err(DomainError::BookingCardWithoutBookings);
        }
        Ok(())
    }
}
