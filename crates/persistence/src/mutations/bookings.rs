// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking and booking card mutations.
//!
//! Card membership lives in two join tables: `booking_card_bookings` for
//! stays and `booking_card_items` for goods and services. The cached total
//! is written only by [`set_card_total`]; everything else that can move
//! it goes through [`mark_cards_stale`].

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{Booking, BookingCard, BookingStatus, Money, format_timestamp};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{booking_card_bookings, booking_card_items, booking_cards, bookings};
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Inserts a booking and returns its ID.
///
/// # Errors
///
/// Returns an error if a referenced row is missing or the insert fails.
pub fn insert_booking(conn: &mut SqliteConnection, booking: &Booking) -> Result<i64, PersistenceError> {
    diesel::insert_into(bookings::table)
        .values((
            bookings::guest_id.eq(booking.guest_id),
            bookings::agent_id.eq(booking.agent_id),
            bookings::room_id.eq(booking.room_id),
            bookings::room_condition_id.eq(booking.room_condition_id),
            bookings::status.eq(booking.status.as_str()),
            bookings::created_by.eq(booking.created_by),
            bookings::check_in.eq(booking.check_in.map(format_timestamp)),
            bookings::check_out.eq(booking.check_out.map(format_timestamp)),
            bookings::note.eq(&booking.note),
            bookings::created_at.eq(format_timestamp(booking.created_at)),
            bookings::updated_at.eq(format_timestamp(booking.updated_at)),
        ))
        .execute(conn)?;
    let booking_id: i64 = conn.get_last_insert_rowid()?;
    info!(booking_id, guest_id = ?booking.guest_id, room_id = ?booking.room_id, "Created booking");
    Ok(booking_id)
}

/// Overwrites a booking, status included. `created_at` is kept.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(bookings::table.find(booking_id))
        .set((
            bookings::guest_id.eq(booking.guest_id),
            bookings::agent_id.eq(booking.agent_id),
            bookings::room_id.eq(booking.room_id),
            bookings::room_condition_id.eq(booking.room_condition_id),
            bookings::status.eq(booking.status.as_str()),
            bookings::created_by.eq(booking.created_by),
            bookings::check_in.eq(booking.check_in.map(format_timestamp)),
            bookings::check_out.eq(booking.check_out.map(format_timestamp)),
            bookings::note.eq(&booking.note),
            bookings::updated_at.eq(format_timestamp(booking.updated_at)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "booking", booking_id)
}

/// Stores a new booking status.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_booking_status(
    conn: &mut SqliteConnection,
    booking_id: i64,
    status: BookingStatus,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(bookings::table.find(booking_id))
        .set((
            bookings::status.eq(status.as_str()),
            bookings::updated_at.eq(format_timestamp(now)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "booking", booking_id)?;
    info!(booking_id, status = status.as_str(), "Changed booking status");
    Ok(())
}

/// Deletes a booking that no card holds.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_booking(conn: &mut SqliteConnection, booking_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(bookings::table.find(booking_id)).execute(conn)?;
    ensure_affected(rows, "booking", booking_id)?;
    info!(booking_id, "Deleted booking");
    Ok(())
}

/// Inserts a booking card with its members and returns its ID.
///
/// # Errors
///
/// Returns an error if a member does not exist or the insert fails.
pub fn insert_booking_card(
    conn: &mut SqliteConnection,
    card: &BookingCard,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(booking_cards::table)
        .values((
            booking_cards::primary_guest_id.eq(card.primary_guest_id),
            booking_cards::status.eq(card.status.as_str()),
            booking_cards::total_amount.eq(card.total_amount.minor()),
            booking_cards::total_is_stale.eq(i32::from(card.total_is_stale)),
            booking_cards::created_at.eq(format_timestamp(card.created_at)),
            booking_cards::updated_at.eq(format_timestamp(card.updated_at)),
        ))
        .execute(conn)?;
    let booking_card_id: i64 = conn.get_last_insert_rowid()?;
    replace_card_members(conn, booking_card_id, card)?;
    info!(booking_card_id, primary_guest_id = card.primary_guest_id, "Created booking card");
    Ok(booking_card_id)
}

/// Overwrites a booking card and replaces its members. The total is
/// left to [`set_card_total`].
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_booking_card(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
    card: &BookingCard,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(booking_cards::table.find(booking_card_id))
        .set((
            booking_cards::primary_guest_id.eq(card.primary_guest_id),
            booking_cards::status.eq(card.status.as_str()),
            booking_cards::updated_at.eq(format_timestamp(card.updated_at)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "booking card", booking_card_id)?;
    replace_card_members(conn, booking_card_id, card)
}

/// Deletes a booking card no payment references. Member links go with it.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_booking_card(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(booking_cards::table.find(booking_card_id)).execute(conn)?;
    ensure_affected(rows, "booking card", booking_card_id)?;
    info!(booking_card_id, "Deleted booking card");
    Ok(())
}

fn replace_card_members(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
    card: &BookingCard,
) -> Result<(), PersistenceError> {
    diesel::delete(
        booking_card_bookings::table.filter(booking_card_bookings::booking_card_id.eq(booking_card_id)),
    )
    .execute(conn)?;
    diesel::delete(
        booking_card_items::table.filter(booking_card_items::booking_card_id.eq(booking_card_id)),
    )
    .execute(conn)?;

    add_card_bookings(conn, booking_card_id, &card.booking_ids)?;
    let item_ids: Vec<i64> = card
        .goods_ids
        .iter()
        .chain(card.service_ids.iter())
        .copied()
        .collect();
    add_card_items(conn, booking_card_id, &item_ids)
}

/// Links bookings to a card. Bookings already on the card are skipped.
///
/// # Errors
///
/// Returns `ReferencedRecord` if a booking does not exist, or a database
/// error.
pub fn add_card_bookings(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
    booking_ids: &[i64],
) -> Result<(), PersistenceError> {
    let links: Vec<_> = booking_ids
        .iter()
        .map(|booking_id| {
            (
                booking_card_bookings::booking_card_id.eq(booking_card_id),
                booking_card_bookings::booking_id.eq(*booking_id),
            )
        })
        .collect();
    if !links.is_empty() {
        diesel::insert_or_ignore_into(booking_card_bookings::table)
            .values(&links)
            .execute(conn)?;
    }
    debug!(booking_card_id, bookings = booking_ids.len(), "Linked bookings to card");
    Ok(())
}

/// Links goods or services to a card. Items already on the card are
/// skipped.
///
/// # Errors
///
/// Returns `ReferencedRecord` if an item does not exist, or a database
/// error.
pub fn add_card_items(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
    item_ids: &[i64],
) -> Result<(), PersistenceError> {
    let links: Vec<_> = item_ids
        .iter()
        .map(|item_id| {
            (
                booking_card_items::booking_card_id.eq(booking_card_id),
                booking_card_items::item_id.eq(*item_id),
            )
        })
        .collect();
    if !links.is_empty() {
        diesel::insert_or_ignore_into(booking_card_items::table)
            .values(&links)
            .execute(conn)?;
    }
    debug!(booking_card_id, items = item_ids.len(), "Linked items to card");
    Ok(())
}

/// Stores a freshly computed total and clears the stale flag.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn set_card_total(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
    total: Money,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(booking_cards::table.find(booking_card_id))
        .set((
            booking_cards::total_amount.eq(total.minor()),
            booking_cards::total_is_stale.eq(0),
            booking_cards::updated_at.eq(format_timestamp(now)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "booking card", booking_card_id)?;
    info!(booking_card_id, total = total.minor(), "Recalculated booking card total");
    Ok(())
}

/// Flags the cached total of every given card as out of date.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_cards_stale(
    conn: &mut SqliteConnection,
    booking_card_ids: &[i64],
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    if booking_card_ids.is_empty() {
        return Ok(0);
    }
    let rows: usize = diesel::update(
        booking_cards::table.filter(booking_cards::booking_card_id.eq_any(booking_card_ids)),
    )
    .set((
        booking_cards::total_is_stale.eq(1),
        booking_cards::updated_at.eq(format_timestamp(now)),
    ))
    .execute(conn)?;
    debug!(rows, "Marked booking card totals stale");
    Ok(rows)
}
