// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::money::Money;
use time::{Date, OffsetDateTime};

/// Errors that can occur during domain validation.
///
/// Validation failures are tied to the request field they concern
/// (see [`DomainError::field`]). Lifecycle failures such as an invalid
/// status transition are not tied to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty or whitespace.
    EmptyField {
        /// The offending field.
        field: &'static str,
    },
    /// A price, rate or payment amount is not strictly positive.
    NonPositiveAmount {
        /// The offending field.
        field: &'static str,
        /// The rejected amount.
        amount: Money,
    },
    /// A count or number field is not strictly positive.
    NonPositiveNumber {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A validity window ends before it starts.
    InvalidDateWindow {
        /// Window start.
        from: Date,
        /// Window end.
        to: Date,
    },
    /// Failed to parse a date or timestamp from a string.
    DateParseError {
        /// The field being parsed.
        field: &'static str,
        /// The invalid input.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// A value is not one of the accepted choices for an enumerated field.
    InvalidChoice {
        /// The field being parsed.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// National ID is not exactly 12 digits.
    InvalidNationalId(String),
    /// The birthdate encoded in the national ID disagrees with the supplied birthdate.
    NationalIdBirthdateMismatch {
        /// Birthdate decoded from the national ID.
        encoded: Date,
        /// Birthdate supplied with the document.
        supplied: Date,
    },
    /// Document expiry is not after its issue date.
    ExpiryNotAfterIssue {
        /// Issue date.
        issued: Date,
        /// Expiry date.
        expiry: Date,
    },
    /// Document issue date is not after the holder's birthdate.
    IssueNotAfterBirth {
        /// Birthdate.
        birth: Date,
        /// Issue date.
        issued: Date,
    },
    /// Phone number does not match the accepted shape.
    InvalidPhone(String),
    /// Email address is malformed.
    InvalidEmail(String),
    /// Color is not a `#RRGGBB` hex string.
    InvalidColor(String),
    /// Country code is not 2 or 3 letters.
    InvalidCountryCode(String),
    /// A guest was blacklisted without a reason.
    BlacklistReasonRequired,
    /// The guest is not allowed to book.
    GuestCannotBook {
        /// Why the guest may not book.
        reason: String,
    },
    /// Booking check-out is not after check-in.
    CheckOutNotAfterCheckIn {
        /// Check-in time.
        check_in: OffsetDateTime,
        /// Check-out time.
        check_out: OffsetDateTime,
    },
    /// A status change is not permitted by the lifecycle.
    InvalidStatusTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
        /// Why the transition is rejected.
        reason: String,
    },
    /// The worker already has an open shift.
    ShiftAlreadyOpen {
        /// The worker.
        worker_id: i64,
        /// The open report.
        report_id: i64,
    },
    /// The worker has no open shift to finish.
    NoOpenShift {
        /// The worker.
        worker_id: i64,
    },
    /// The shift report is already finished.
    ShiftAlreadyFinished {
        /// The report.
        report_id: i64,
    },
    /// Shift finish precedes its start.
    FinishBeforeStart {
        /// Shift start.
        start: OffsetDateTime,
        /// Requested finish.
        finish: OffsetDateTime,
    },
    /// No job title was given and the worker has no main job title.
    JobTitleRequired {
        /// The worker.
        worker_id: i64,
    },
    /// A payment is dated in the future.
    PaymentInFuture {
        /// Issue timestamp of the payment.
        issued_at: OffsetDateTime,
    },
    /// A payment order already exists for the booking card.
    PaymentOrderExists {
        /// The booking card.
        booking_card_id: i64,
    },
    /// The payment belongs to a different channel than the attach action.
    PaymentChannelMismatch {
        /// The payment.
        payment_id: i64,
        /// Channel the action attaches.
        expected: &'static str,
        /// Channel the payment was recorded under.
        actual: &'static str,
    },
    /// The payment was recorded against a different booking card than the order.
    PaymentCardMismatch {
        /// The payment.
        payment_id: i64,
        /// Booking card of the order.
        order_card_id: i64,
        /// Booking card of the payment.
        payment_card_id: i64,
    },
    /// A booking card must reference at least one booking.
    BookingCardWithoutBookings,
    /// Money arithmetic overflowed.
    AmountOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl DomainError {
    /// Returns the request field a validation failure belongs to.
    ///
    /// Returns `None` for lifecycle failures that are not about a single field.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyField { field }
            | Self::NonPositiveAmount { field, .. }
            | Self::NonPositiveNumber { field, .. }
            | Self::DateParseError { field, .. }
            | Self::InvalidChoice { field, .. } => Some(*field),
            Self::InvalidDateWindow { .. } => Some("relevant_to"),
            Self::InvalidNationalId(_) | Self::NationalIdBirthdateMismatch { .. } => {
                Some("national_id")
            }
            Self::ExpiryNotAfterIssue { .. } => Some("expiry_date"),
            Self::IssueNotAfterBirth { .. } => Some("issued_date"),
            Self::InvalidPhone(_) => Some("phone"),
            Self::InvalidEmail(_) => Some("email"),
            Self::InvalidColor(_) => Some("color"),
            Self::InvalidCountryCode(_) => Some("code"),
            Self::BlacklistReasonRequired => Some("blacklist_reason"),
            Self::GuestCannotBook { .. } => Some("guest_id"),
            Self::CheckOutNotAfterCheckIn { .. } => Some("check_out"),
            Self::FinishBeforeStart { .. } => Some("finish"),
            Self::JobTitleRequired { .. } => Some("job_title_id"),
            Self::PaymentInFuture { .. } => Some("issued_at"),
            Self::BookingCardWithoutBookings => Some("booking_ids"),
            Self::InvalidStatusTransition { .. }
            | Self::ShiftAlreadyOpen { .. }
            | Self::NoOpenShift { .. }
            | Self::ShiftAlreadyFinished { .. }
            | Self::PaymentOrderExists { .. }
            | Self::PaymentChannelMismatch { .. }
            | Self::PaymentCardMismatch { .. }
            | Self::AmountOverflow { .. } => None,
        }
    }

    /// Returns a stable rule name for lifecycle failures.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::InvalidStatusTransition { .. } => "status_transition",
            Self::ShiftAlreadyOpen { .. } => "one_open_shift_per_worker",
            Self::NoOpenShift { .. } => "open_shift_required",
            Self::ShiftAlreadyFinished { .. } => "shift_finished_once",
            Self::PaymentOrderExists { .. } => "one_payment_order_per_card",
            Self::PaymentChannelMismatch { .. } => "payment_channel",
            Self::PaymentCardMismatch { .. } => "payment_booking_card",
            Self::AmountOverflow { .. } => "amount_range",
            _ => "validation",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "Field '{field}' cannot be empty"),
            Self::NonPositiveAmount { field, amount } => {
                write!(f, "Field '{field}' must be greater than zero, got {amount}")
            }
            Self::NonPositiveNumber { field, value } => {
                write!(f, "Field '{field}' must be greater than zero, got {value}")
            }
            Self::InvalidDateWindow { from, to } => {
                write!(f, "Validity end {to} must not be before validity start {from}")
            }
            Self::DateParseError {
                field,
                value,
                error,
            } => write!(f, "Failed to parse {field} '{value}': {error}"),
            Self::InvalidChoice { field, value } => {
                write!(f, "'{value}' is not a valid choice for {field}")
            }
            Self::InvalidNationalId(value) => {
                write!(f, "National ID must be exactly 12 digits, got '{value}'")
            }
            Self::NationalIdBirthdateMismatch { encoded, supplied } => write!(
                f,
                "National ID does not match date of birth {supplied}: the ID encodes {encoded}"
            ),
            Self::ExpiryNotAfterIssue { issued, expiry } => write!(
                f,
                "Expiry date {expiry} must be later than issue date {issued}"
            ),
            Self::IssueNotAfterBirth { birth, issued } => write!(
                f,
                "Issue date {issued} must be later than date of birth {birth}"
            ),
            Self::InvalidPhone(value) => write!(
                f,
                "Phone number '{value}' must contain 9 to 15 digits with an optional leading '+'"
            ),
            Self::InvalidEmail(value) => write!(f, "'{value}' is not a valid email address"),
            Self::InvalidColor(value) => {
                write!(f, "Color '{value}' must be a hex value like #808080")
            }
            Self::InvalidCountryCode(value) => {
                write!(f, "Country code '{value}' must be 2 or 3 letters")
            }
            Self::BlacklistReasonRequired => {
                write!(f, "A reason is required when blacklisting a guest")
            }
            Self::GuestCannotBook { reason } => write!(f, "Guest cannot book: {reason}"),
            Self::CheckOutNotAfterCheckIn {
                check_in,
                check_out,
            } => write!(
                f,
                "Check-out {check_out} must be later than check-in {check_in}"
            ),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change status from {from} to {to}: {reason}")
            }
            Self::ShiftAlreadyOpen {
                worker_id,
                report_id,
            } => write!(
                f,
                "Worker {worker_id} already has an open shift (report {report_id})"
            ),
            Self::NoOpenShift { worker_id } => {
                write!(f, "Worker {worker_id} has no open shift")
            }
            Self::ShiftAlreadyFinished { report_id } => {
                write!(f, "Shift report {report_id} is already finished")
            }
            Self::FinishBeforeStart { start, finish } => write!(
                f,
                "Shift finish {finish} cannot be earlier than its start {start}"
            ),
            Self::JobTitleRequired { worker_id } => write!(
                f,
                "A job title is required: worker {worker_id} has no main job title"
            ),
            Self::PaymentInFuture { issued_at } => {
                write!(f, "Payment issue time {issued_at} cannot be in the future")
            }
            Self::PaymentOrderExists { booking_card_id } => write!(
                f,
                "A payment order already exists for booking card {booking_card_id}"
            ),
            Self::PaymentChannelMismatch {
                payment_id,
                expected,
                actual,
            } => write!(
                f,
                "Payment {payment_id} is a {actual} payment, expected a {expected} payment"
            ),
            Self::PaymentCardMismatch {
                payment_id,
                order_card_id,
                payment_card_id,
            } => write!(
                f,
                "Payment {payment_id} belongs to booking card {payment_card_id}, not {order_card_id}"
            ),
            Self::BookingCardWithoutBookings => {
                write!(f, "A booking card must include at least one booking")
            }
            Self::AmountOverflow { operation } => {
                write!(f, "Amount overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
