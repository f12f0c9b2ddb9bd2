// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking card total computation.
//!
//! The card total is the room charge of every attached booking plus the
//! price of every attached good and service. A booking's room charge is
//! the nightly rate of its room's lowest-id room type times the number of
//! nights, with a minimum of one night. A booking without a priced room
//! contributes nothing.

use crate::error::DomainError;
use crate::money::Money;
use time::OffsetDateTime;

/// The inputs of one booking needed to price it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillableStay {
    /// Price of the first applicable room type, if the room has any.
    pub nightly_rate: Option<Money>,
    pub check_in: Option<OffsetDateTime>,
    pub check_out: Option<OffsetDateTime>,
}

impl BillableStay {
    /// Nights between the check-in and check-out calendar dates, if both are set.
    #[must_use]
    pub fn nights(&self) -> Option<i64> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                Some((check_out.date() - check_in.date()).whole_days())
            }
            _ => None,
        }
    }

    /// Room charge for the stay.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if rate times nights overflows.
    pub fn charge(&self) -> Result<Money, DomainError> {
        let Some(rate) = self.nightly_rate else {
            return Ok(Money::ZERO);
        };
        let nights: i64 = self.nights().filter(|n| *n > 0).unwrap_or(1);
        rate.checked_times(nights)
            .ok_or_else(|| DomainError::AmountOverflow {
                operation: format!("charging {nights} nights at {rate}"),
            })
    }
}

/// Computes a booking card total.
///
/// # Errors
///
/// Returns `DomainError::AmountOverflow` if any sum overflows.
pub fn calculate_card_total(
    stays: &[BillableStay],
    goods_prices: &[Money],
    service_prices: &[Money],
) -> Result<Money, DomainError> {
    let overflow = || DomainError::AmountOverflow {
        operation: String::from("summing the booking card total"),
    };

    let mut total: Money = Money::ZERO;
    for stay in stays {
        total = total.checked_add(stay.charge()?).ok_or_else(overflow)?;
    }
    for price in goods_prices.iter().chain(service_prices) {
        total = total.checked_add(*price).ok_or_else(overflow)?;
    }
    Ok(total)
}
