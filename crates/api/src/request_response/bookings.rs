// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking and booking card DTOs.

use super::double_option;

/// Full booking payload for create and replace.
///
/// The status is not part of the payload: bookings are created `BOOKED`
/// and move through the check-in, check-out and cancel actions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub guest_id: Option<i64>,
    #[serde(default)]
    pub agent_id: Option<i64>,
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub room_condition_id: Option<i64>,
    /// The worker who took the booking.
    pub created_by: i64,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Partial booking update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub guest_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub agent_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub room_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub room_condition_id: Option<Option<i64>>,
    pub created_by: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub check_in: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub check_out: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
}

/// A booking as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingView {
    pub id: i64,
    pub guest_id: Option<i64>,
    pub agent_id: Option<i64>,
    pub room_id: Option<i64>,
    pub room_condition_id: Option<i64>,
    /// Status name, e.g. `CHECKED_IN`.
    pub status: String,
    /// Historical numeric status code (1-4).
    pub status_code: i32,
    pub created_by: i64,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    /// Length of stay in seconds when both ends are set.
    pub duration_seconds: Option<i64>,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Booking list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingFilterQuery {
    /// Status name or numeric code.
    pub status: Option<String>,
    pub guest_id: Option<i64>,
    pub agent_id: Option<i64>,
    pub room_id: Option<i64>,
    pub created_by: Option<i64>,
}

/// Full booking card payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingCardRequest {
    pub primary_guest_id: i64,
    /// At least one booking.
    #[serde(default)]
    pub booking_ids: Vec<i64>,
    #[serde(default)]
    pub goods: Vec<i64>,
    #[serde(default)]
    pub services: Vec<i64>,
    /// `ACTIVE`, `COMPLETED` or `CANCELLED`; defaults to `ACTIVE`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Partial booking card update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingCardPatch {
    pub primary_guest_id: Option<i64>,
    pub booking_ids: Option<Vec<i64>>,
    pub goods: Option<Vec<i64>>,
    pub services: Option<Vec<i64>>,
    pub status: Option<String>,
}

/// A booking card as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingCardView {
    pub id: i64,
    pub primary_guest_id: i64,
    pub booking_ids: Vec<i64>,
    pub goods: Vec<i64>,
    pub services: Vec<i64>,
    pub status: String,
    /// Cached total in minor units.
    pub total_amount: i64,
    /// Set when an input changed since the total was computed.
    pub total_is_stale: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Booking card list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingCardFilterQuery {
    pub status: Option<String>,
    pub primary_guest_id: Option<i64>,
}

/// Body of `POST /booking-cards/{id}/add-booking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddBookingRequest {
    pub booking_id: i64,
}

/// Body of `POST /booking-cards/{id}/add-items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddItemsRequest {
    #[serde(default)]
    pub goods: Vec<i64>,
    #[serde(default)]
    pub services: Vec<i64>,
}

/// Result of `POST /booking-cards/{id}/recalculate`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecalculateResponse {
    pub total_amount: i64,
    pub message: String,
    pub card: BookingCardView,
}
