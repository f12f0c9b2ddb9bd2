// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payments across the card, cash and bank channels, and payment orders.
//!
//! All three channels share one record shape. Channel-specific references
//! live in [`PaymentDetails`]. A chargeback is a flag on a payment record
//! and counts negatively toward every total.

use crate::error::DomainError;
use crate::money::Money;
use crate::validation::{require_positive, require_text};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::OffsetDateTime;

/// The channel a payment was received through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentChannel {
    Card,
    Cash,
    Bank,
}

impl PaymentChannel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }
}

impl FromStr for PaymentChannel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            _ => Err(DomainError::InvalidChoice {
                field: "channel",
                value: s.to_string(),
            }),
        }
    }
}

/// Channel-specific payment references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentDetails {
    Card {
        cheque_id: Option<String>,
    },
    Cash {
        cheque_id: Option<String>,
        /// Worker who took the cash.
        received_by: Option<i64>,
    },
    Bank {
        reference_number: Option<String>,
        bank_name: String,
    },
}

impl PaymentDetails {
    #[must_use]
    pub const fn channel(&self) -> PaymentChannel {
        match self {
            Self::Card { .. } => PaymentChannel::Card,
            Self::Cash { .. } => PaymentChannel::Cash,
            Self::Bank { .. } => PaymentChannel::Bank,
        }
    }
}

/// A payment received against a booking card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Option<i64>,
    pub amount: Money,
    pub agent_id: Option<i64>,
    pub booking_card_id: i64,
    pub is_chargeback: bool,
    pub issued_at: OffsetDateTime,
    pub details: PaymentDetails,
}

impl Payment {
    #[must_use]
    pub const fn channel(&self) -> PaymentChannel {
        self.details.channel()
    }

    /// Validates the amount, the issue time and channel references.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive, the payment is dated
    /// after `now`, or a bank payment has no bank name.
    pub fn validate(&self, now: OffsetDateTime) -> Result<(), DomainError> {
        require_positive("amount", self.amount)?;
        if self.issued_at > now {
            return Err(DomainError::PaymentInFuture {
                issued_at: self.issued_at,
            });
        }
        if let PaymentDetails::Bank { bank_name, .. } = &self.details {
            require_text("bank_name", bank_name)?;
        }
        Ok(())
    }

    /// The amount with chargebacks negated.
    #[must_use]
    pub fn signed_amount(&self) -> Money {
        if self.is_chargeback {
            -self.amount
        } else {
            self.amount
        }
    }
}

/// Net collected amount per channel for a payment order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentBreakdown {
    pub card: Money,
    pub cash: Money,
    pub bank: Money,
}

impl PaymentBreakdown {
    /// Sums signed amounts per channel.
    #[must_use]
    pub fn from_payments<'a, I>(payments: I) -> Self
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let mut breakdown = Self::default();
        for payment in payments {
            let slot: &mut Money = match payment.channel() {
                PaymentChannel::Card => &mut breakdown.card,
                PaymentChannel::Cash => &mut breakdown.cash,
                PaymentChannel::Bank => &mut breakdown.bank,
            };
            *slot += payment.signed_amount();
        }
        breakdown
    }

    #[must_use]
    pub fn total(&self) -> Money {
        self.card + self.cash + self.bank
    }
}

/// Rolls up payments of one booking card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    pub id: Option<i64>,
    pub booking_card_id: i64,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

impl PaymentOrder {
    /// Opens an order for a card that does not yet have one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PaymentOrderExists` if `existing` is present.
    pub fn open(
        booking_card_id: i64,
        existing: Option<&Self>,
        notes: Option<String>,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if existing.is_some() {
            return Err(DomainError::PaymentOrderExists { booking_card_id });
        }
        Ok(Self {
            id: None,
            booking_card_id,
            notes,
            created_at: now,
        })
    }

    /// Checks that a payment can be attached through a channel action.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is of another channel or was
    /// recorded against another booking card.
    pub fn check_attachable(
        &self,
        payment: &Payment,
        channel: PaymentChannel,
    ) -> Result<(), DomainError> {
        let payment_id: i64 = payment.id.unwrap_or_default();
        if payment.channel() != channel {
            return Err(DomainError::PaymentChannelMismatch {
                payment_id,
                expected: channel.as_str(),
                actual: payment.channel().as_str(),
            });
        }
        if payment.booking_card_id != self.booking_card_id {
            return Err(DomainError::PaymentCardMismatch {
                payment_id,
                order_card_id: self.booking_card_id,
                payment_card_id: payment.booking_card_id,
            });
        }
        Ok(())
    }
}

/// Counts and sums over the payments of one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStatistics {
    pub payments: u64,
    pub chargebacks: u64,
    pub payment_amount: Money,
    pub chargeback_amount: Money,
    /// Cash totals keyed by the receiving worker.
    pub by_worker: BTreeMap<i64, ChannelTotals>,
    /// Bank totals keyed by bank name.
    pub by_bank: BTreeMap<String, ChannelTotals>,
}

/// Count and net amount for one grouping key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelTotals {
    pub count: u64,
    pub net: Money,
}

impl ChannelStatistics {
    /// Payments minus chargebacks.
    #[must_use]
    pub fn net(&self) -> Money {
        self.payment_amount - self.chargeback_amount
    }
}

/// Tallies statistics over payments of a single channel.
#[must_use]
pub fn channel_statistics<'a, I>(payments: I) -> ChannelStatistics
where
    I: IntoIterator<Item = &'a Payment>,
{
    let mut stats = ChannelStatistics::default();
    for payment in payments {
        if payment.is_chargeback {
            stats.chargebacks += 1;
            stats.chargeback_amount += payment.amount;
        } else {
            stats.payments += 1;
            stats.payment_amount += payment.amount;
        }

        let group: Option<&mut ChannelTotals> = match &payment.details {
            PaymentDetails::Cash {
                received_by: Some(worker_id),
                ..
            } => Some(stats.by_worker.entry(*worker_id).or_default()),
            PaymentDetails::Bank { bank_name, .. } => {
                Some(stats.by_bank.entry(bank_name.clone()).or_default())
            }
            _ => None,
        };
        if let Some(totals) = group {
            totals.count += 1;
            totals.net += payment.signed_amount();
        }
    }
    stats
}
