// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod agents;
mod billing;
mod booking;
mod catalog;
mod clock;
mod documents;
mod error;
mod guests;
mod inventory;
mod money;
mod payments;
mod relevance;
mod validation;
mod workforce;

#[cfg(test)]
mod tests;

pub use agents::Agent;
pub use billing::{BillableStay, calculate_card_total};
pub use booking::{Booking, BookingCard, BookingCardStatus, BookingStatus};
pub use catalog::{CatalogItem, CatalogKind, CatalogStatistics, catalog_statistics};
pub use clock::{ClockError, HotelClock};
pub use documents::{
    Document, DocumentStatistics, DocumentType, DocumentVerification, EXPIRY_WARNING_DAYS,
    ExpiryStatus, MAX_EXPIRY_WARNING_DAYS, NationalId, Nationality, document_statistics, full_name,
};
pub use error::DomainError;
pub use guests::{BookingEligibility, Gender, Guest};
pub use inventory::{DEFAULT_CONDITION_COLOR, Room, RoomCondition, RoomType};
pub use money::Money;
pub use payments::{
    ChannelStatistics, ChannelTotals, Payment, PaymentBreakdown, PaymentChannel, PaymentDetails,
    PaymentOrder, channel_statistics,
};
pub use relevance::{DateRange, ValidityWindow};
pub use validation::{
    format_date, format_timestamp, normalize_timestamp, parse_date, parse_optional_date,
    parse_optional_timestamp, parse_timestamp, require_positive, require_text,
    validate_color, validate_country_code, validate_date_window, validate_email, validate_phone,
};
pub use workforce::{
    JobTitle, ShiftReport, ShiftStatistics, ShiftTotals, Worker, round_hours, shift_payment,
    summarize_shifts,
};
