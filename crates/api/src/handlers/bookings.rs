// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking and booking card handlers.
//!
//! Card totals are recomputed inside the same transaction as the card
//! write for create, update, add-booking and add-items. Edits to a member
//! booking's room or dates only mark the card stale; `recalculate`
//! refreshes it.

use innkeep_domain::{
    Booking, BookingCard, BookingCardStatus, BookingStatus, CatalogItem, CatalogKind, Guest, Money,
    calculate_card_total, format_timestamp, parse_optional_timestamp,
};
use innkeep_persistence::{
    BookingCardFilter, BookingFilter, CardBillingInputs, Page, SqlitePersistence,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use super::{Now, distinct, found, id_of, list_params, non_blank, parse_choice, parse_optional_choice, referenced};
use crate::error::ApiError;
use crate::request_response::bookings::{
    AddBookingRequest, AddItemsRequest, BookingCardFilterQuery, BookingCardPatch,
    BookingCardRequest, BookingCardView, BookingFilterQuery, BookingPatch, BookingRequest,
    BookingView, RecalculateResponse,
};
use crate::request_response::{ListQuery, ListResponse, merge};

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        Self {
            id: id_of(booking.id),
            duration_seconds: booking.duration().map(|d| d.whole_seconds()),
            guest_id: booking.guest_id,
            agent_id: booking.agent_id,
            room_id: booking.room_id,
            room_condition_id: booking.room_condition_id,
            status: booking.status.as_str().to_string(),
            status_code: booking.status.code(),
            created_by: booking.created_by,
            check_in: booking.check_in.map(format_timestamp),
            check_out: booking.check_out.map(format_timestamp),
            note: booking.note,
            created_at: format_timestamp(booking.created_at),
            updated_at: format_timestamp(booking.updated_at),
        }
    }
}

impl From<BookingCard> for BookingCardView {
    fn from(card: BookingCard) -> Self {
        Self {
            id: id_of(card.id),
            primary_guest_id: card.primary_guest_id,
            booking_ids: card.booking_ids,
            goods: card.goods_ids,
            services: card.service_ids,
            status: card.status.as_str().to_string(),
            total_amount: card.total_amount.minor(),
            total_is_stale: card.total_is_stale,
            created_at: format_timestamp(card.created_at),
            updated_at: format_timestamp(card.updated_at),
        }
    }
}

// ========================================================================
// Bookings
// ========================================================================

fn booking_list(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: &BookingFilter,
) -> Result<ListResponse<BookingView>, ApiError> {
    let page: Page<Booking> = persistence.list_bookings(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(BookingView::from)))
}

/// Resolves every reference of a booking request and builds the booking.
///
/// The blacklist gate runs whenever the guest is set or changes.
fn booking_from_request(
    persistence: &mut SqlitePersistence,
    request: BookingRequest,
    existing: Option<&Booking>,
    now: Now,
) -> Result<Booking, ApiError> {
    if let Some(guest_id) = request.guest_id {
        let guest: Guest = referenced(persistence.get_guest(guest_id)?, "guest_id", guest_id)?;
        if existing.is_none_or(|b| b.guest_id != Some(guest_id)) {
            guest.ensure_can_book()?;
        }
    }
    if let Some(agent_id) = request.agent_id {
        referenced(persistence.get_agent(agent_id)?, "agent_id", agent_id)?;
    }
    if let Some(room_id) = request.room_id {
        referenced(persistence.get_room(room_id)?, "room_id", room_id)?;
    }
    if let Some(room_condition_id) = request.room_condition_id {
        referenced(
            persistence.get_room_condition(room_condition_id)?,
            "room_condition_id",
            room_condition_id,
        )?;
    }
    referenced(
        persistence.get_worker(request.created_by)?,
        "created_by",
        request.created_by,
    )?;

    let booking: Booking = Booking {
        id: existing.and_then(|b| b.id),
        guest_id: request.guest_id,
        agent_id: request.agent_id,
        room_id: request.room_id,
        room_condition_id: request.room_condition_id,
        status: existing.map_or(BookingStatus::Booked, |b| b.status),
        created_by: request.created_by,
        check_in: parse_optional_timestamp("check_in", request.check_in.as_deref())?,
        check_out: parse_optional_timestamp("check_out", request.check_out.as_deref())?,
        note: non_blank(request.note),
        created_at: existing.map_or(now.instant, |b| b.created_at),
        updated_at: now.instant,
    };
    booking.validate()?;
    Ok(booking)
}

/// Lists bookings, optionally filtered by status name or code.
///
/// # Errors
///
/// Returns an error for an unknown status, invalid list parameters, or a
/// failed query.
pub fn list_bookings(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: BookingFilterQuery,
) -> Result<ListResponse<BookingView>, ApiError> {
    let status: Option<BookingStatus> = parse_optional_choice(filter.status.as_deref())?;
    let filter: BookingFilter = BookingFilter {
        statuses: status.into_iter().collect(),
        guest_id: filter.guest_id,
        agent_id: filter.agent_id,
        room_id: filter.room_id,
        created_by: filter.created_by,
    };
    booking_list(persistence, query, &filter)
}

/// Lists bookings that are booked or checked in.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_active_bookings(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
) -> Result<ListResponse<BookingView>, ApiError> {
    let filter: BookingFilter = BookingFilter {
        statuses: BookingStatus::ACTIVE.to_vec(),
        ..BookingFilter::default()
    };
    booking_list(persistence, query, &filter)
}

/// Lists one guest's bookings.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown guest.
pub fn list_guest_bookings(
    persistence: &mut SqlitePersistence,
    guest_id: i64,
    query: ListQuery,
) -> Result<ListResponse<BookingView>, ApiError> {
    found(persistence.get_guest(guest_id)?, "Guest", guest_id)?;
    let filter: BookingFilter = BookingFilter {
        guest_id: Some(guest_id),
        ..BookingFilter::default()
    };
    booking_list(persistence, query, &filter)
}

/// Lists the bookings placed through an agent.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown agent.
pub fn list_agent_bookings(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    query: ListQuery,
) -> Result<ListResponse<BookingView>, ApiError> {
    found(persistence.get_agent(agent_id)?, "Agent", agent_id)?;
    let filter: BookingFilter = BookingFilter {
        agent_id: Some(agent_id),
        ..BookingFilter::default()
    };
    booking_list(persistence, query, &filter)
}

/// Retrieves one booking.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_booking(persistence: &mut SqlitePersistence, booking_id: i64) -> Result<BookingView, ApiError> {
    let booking: Booking = found(persistence.get_booking(booking_id)?, "Booking", booking_id)?;
    Ok(BookingView::from(booking))
}

/// Creates a booking in the `BOOKED` state.
///
/// # Errors
///
/// Returns an error for an unknown reference, a guest who cannot book, or
/// a check-out that is not after check-in.
pub fn create_booking(
    persistence: &mut SqlitePersistence,
    request: BookingRequest,
    now: Now,
) -> Result<BookingView, ApiError> {
    let mut booking: Booking = booking_from_request(persistence, request, None, now)?;
    booking.id = Some(persistence.insert_booking(&booking)?);
    Ok(BookingView::from(booking))
}

/// Replaces a booking's details. The status only changes through the
/// check-in, check-out and cancel actions.
///
/// Changing the room or the dates marks the cards holding the booking as
/// stale.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_booking(
    persistence: &mut SqlitePersistence,
    booking_id: i64,
    request: BookingRequest,
    now: Now,
) -> Result<BookingView, ApiError> {
    let existing: Booking = found(persistence.get_booking(booking_id)?, "Booking", booking_id)?;
    let booking: Booking = booking_from_request(persistence, request, Some(&existing), now)?;
    let pricing_changed: bool = booking.room_id != existing.room_id
        || booking.check_in != existing.check_in
        || booking.check_out != existing.check_out;

    persistence.in_transaction(|p| -> Result<(), ApiError> {
        p.update_booking(booking_id, &booking)?;
        if pricing_changed {
            let card_ids: Vec<i64> = p.card_ids_containing_bookings(&[booking_id])?;
            let marked: usize = p.mark_cards_stale(&card_ids, now.instant)?;
            debug!(booking_id, marked, "Booking pricing inputs changed");
        }
        Ok(())
    })?;
    Ok(BookingView::from(booking))
}

/// Partially updates a booking.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_booking(
    persistence: &mut SqlitePersistence,
    booking_id: i64,
    patch: BookingPatch,
    now: Now,
) -> Result<BookingView, ApiError> {
    let existing: Booking = found(persistence.get_booking(booking_id)?, "Booking", booking_id)?;
    let mut request: BookingRequest = BookingRequest {
        guest_id: existing.guest_id,
        agent_id: existing.agent_id,
        room_id: existing.room_id,
        room_condition_id: existing.room_condition_id,
        created_by: existing.created_by,
        check_in: existing.check_in.map(format_timestamp),
        check_out: existing.check_out.map(format_timestamp),
        note: existing.note,
    };
    merge(&mut request.guest_id, patch.guest_id);
    merge(&mut request.agent_id, patch.agent_id);
    merge(&mut request.room_id, patch.room_id);
    merge(&mut request.room_condition_id, patch.room_condition_id);
    merge(&mut request.created_by, patch.created_by);
    merge(&mut request.check_in, patch.check_in);
    merge(&mut request.check_out, patch.check_out);
    merge(&mut request.note, patch.note);
    update_booking(persistence, booking_id, request, now)
}

/// Deletes a booking no card holds.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_booking(persistence: &mut SqlitePersistence, booking_id: i64) -> Result<(), ApiError> {
    persistence.delete_booking(booking_id)?;
    Ok(())
}

fn transition_booking(
    persistence: &mut SqlitePersistence,
    booking_id: i64,
    target: BookingStatus,
    now: Now,
) -> Result<BookingView, ApiError> {
    let mut booking: Booking = found(persistence.get_booking(booking_id)?, "Booking", booking_id)?;
    let from: BookingStatus = booking.status;
    booking.transition(target)?;
    booking.updated_at = now.instant;
    persistence.update_booking_status(booking_id, target, now.instant)?;
    info!(
        booking_id,
        from = from.as_str(),
        to = target.as_str(),
        "Booking status changed"
    );
    Ok(BookingView::from(booking))
}

/// Moves a booked reservation to `CHECKED_IN`.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a rule violation for any other state.
pub fn check_in_booking(
    persistence: &mut SqlitePersistence,
    booking_id: i64,
    now: Now,
) -> Result<BookingView, ApiError> {
    transition_booking(persistence, booking_id, BookingStatus::CheckedIn, now)
}

/// Moves a checked-in booking to `CHECKED_OUT`.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a rule violation for any other state.
pub fn check_out_booking(
    persistence: &mut SqlitePersistence,
    booking_id: i64,
    now: Now,
) -> Result<BookingView, ApiError> {
    transition_booking(persistence, booking_id, BookingStatus::CheckedOut, now)
}

/// Cancels a booking that is not yet closed.
///
/// # Errors
///
/// Returns `ResourceNotFound` or a rule violation for a closed booking.
pub fn cancel_booking(
    persistence: &mut SqlitePersistence,
    booking_id: i64,
    now: Now,
) -> Result<BookingView, ApiError> {
    transition_booking(persistence, booking_id, BookingStatus::Cancelled, now)
}

// ========================================================================
// Booking cards
// ========================================================================

/// Recomputes and stores a card total.
fn recompute_total(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
    now: OffsetDateTime,
) -> Result<Money, ApiError> {
    let inputs: CardBillingInputs = persistence.card_billing_inputs(booking_card_id)?;
    let total: Money =
        calculate_card_total(&inputs.stays, &inputs.goods_prices, &inputs.service_prices)?;
    persistence.set_card_total(booking_card_id, total, now)?;
    Ok(total)
}

fn reload_card(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
) -> Result<BookingCardView, ApiError> {
    let card: BookingCard = found(
        persistence.get_booking_card(booking_card_id)?,
        "BookingCard",
        booking_card_id,
    )?;
    Ok(BookingCardView::from(card))
}

/// Checks that every ID names an item of `kind`; reports the first
/// unknown one against the kind's request field.
fn check_items(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    item_ids: &[i64],
) -> Result<Vec<i64>, ApiError> {
    let item_ids: Vec<i64> = distinct(item_ids);
    let known: Vec<CatalogItem> = persistence.get_catalog_items(kind, &item_ids)?;
    if let Some(unknown) = item_ids
        .iter()
        .find(|id| !known.iter().any(|item| item.id == Some(**id)))
    {
        return Err(ApiError::invalid(
            kind.field(),
            format!("Object with ID {unknown} does not exist"),
        ));
    }
    Ok(item_ids)
}

fn card_from_request(
    persistence: &mut SqlitePersistence,
    request: BookingCardRequest,
    existing: Option<&BookingCard>,
    now: Now,
) -> Result<BookingCard, ApiError> {
    referenced(
        persistence.get_guest(request.primary_guest_id)?,
        "primary_guest_id",
        request.primary_guest_id,
    )?;
    let booking_ids: Vec<i64> = distinct(&request.booking_ids);
    for booking_id in &booking_ids {
        referenced(persistence.get_booking(*booking_id)?, "booking_ids", *booking_id)?;
    }
    let goods_ids: Vec<i64> = check_items(persistence, CatalogKind::Goods, &request.goods)?;
    let service_ids: Vec<i64> = check_items(persistence, CatalogKind::Service, &request.services)?;
    let status: BookingCardStatus = match request.status.as_deref() {
        Some(status) => parse_choice(status)?,
        None => BookingCardStatus::Active,
    };

    let card: BookingCard = BookingCard {
        id: existing.and_then(|c| c.id),
        primary_guest_id: request.primary_guest_id,
        booking_ids,
        goods_ids,
        service_ids,
        status,
        total_amount: existing.map_or(Money::ZERO, |c| c.total_amount),
        total_is_stale: existing.is_some_and(|c| c.total_is_stale),
        created_at: existing.map_or(now.instant, |c| c.created_at),
        updated_at: now.instant,
    };
    card.validate()?;
    Ok(card)
}

/// Lists booking cards.
///
/// # Errors
///
/// Returns an error for an unknown status, invalid list parameters, or a
/// failed query.
pub fn list_booking_cards(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: BookingCardFilterQuery,
) -> Result<ListResponse<BookingCardView>, ApiError> {
    let filter: BookingCardFilter = BookingCardFilter {
        status: parse_optional_choice(filter.status.as_deref())?,
        primary_guest_id: filter.primary_guest_id,
    };
    let page: Page<BookingCard> = persistence.list_booking_cards(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(BookingCardView::from)))
}

/// Retrieves one booking card.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_booking_card(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
) -> Result<BookingCardView, ApiError> {
    reload_card(persistence, booking_card_id)
}

/// Creates a booking card and computes its total.
///
/// # Errors
///
/// Returns an error for an unknown reference or a card without bookings.
pub fn create_booking_card(
    persistence: &mut SqlitePersistence,
    request: BookingCardRequest,
    now: Now,
) -> Result<BookingCardView, ApiError> {
    let card: BookingCard = card_from_request(persistence, request, None, now)?;
    persistence.in_transaction(|p| {
        let booking_card_id: i64 = p.insert_booking_card(&card)?;
        recompute_total(p, booking_card_id, now.instant)?;
        reload_card(p, booking_card_id)
    })
}

/// Replaces a booking card's members and recomputes its total.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_booking_card(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
    request: BookingCardRequest,
    now: Now,
) -> Result<BookingCardView, ApiError> {
    let existing: BookingCard = found(
        persistence.get_booking_card(booking_card_id)?,
        "BookingCard",
        booking_card_id,
    )?;
    let card: BookingCard = card_from_request(persistence, request, Some(&existing), now)?;
    persistence.in_transaction(|p| {
        p.update_booking_card(booking_card_id, &card)?;
        recompute_total(p, booking_card_id, now.instant)?;
        reload_card(p, booking_card_id)
    })
}

/// Partially updates a booking card.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_booking_card(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
    patch: BookingCardPatch,
    now: Now,
) -> Result<BookingCardView, ApiError> {
    let existing: BookingCard = found(
        persistence.get_booking_card(booking_card_id)?,
        "BookingCard",
        booking_card_id,
    )?;
    let mut request: BookingCardRequest = BookingCardRequest {
        primary_guest_id: existing.primary_guest_id,
        booking_ids: existing.booking_ids,
        goods: existing.goods_ids,
        services: existing.service_ids,
        status: Some(existing.status.as_str().to_string()),
    };
    merge(&mut request.primary_guest_id, patch.primary_guest_id);
    merge(&mut request.booking_ids, patch.booking_ids);
    merge(&mut request.goods, patch.goods);
    merge(&mut request.services, patch.services);
    merge(&mut request.status, patch.status.map(Some));
    update_booking_card(persistence, booking_card_id, request, now)
}

/// Deletes a booking card no payment or order references.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_booking_card(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_booking_card(booking_card_id)?;
    Ok(())
}

/// Recomputes a card total from its current members and clears the stale
/// flag.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown card.
pub fn recalculate_booking_card(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
    now: Now,
) -> Result<RecalculateResponse, ApiError> {
    found(
        persistence.get_booking_card(booking_card_id)?,
        "BookingCard",
        booking_card_id,
    )?;
    persistence.in_transaction(|p| {
        let total: Money = recompute_total(p, booking_card_id, now.instant)?;
        let card: BookingCardView = reload_card(p, booking_card_id)?;
        Ok(RecalculateResponse {
            total_amount: total.minor(),
            message: format!("Total recalculated: {total}"),
            card,
        })
    })
}

/// Attaches a booking to a card and recomputes the total.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown card or booking.
pub fn add_booking_to_card(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
    request: AddBookingRequest,
    now: Now,
) -> Result<BookingCardView, ApiError> {
    found(
        persistence.get_booking_card(booking_card_id)?,
        "BookingCard",
        booking_card_id,
    )?;
    found(
        persistence.get_booking(request.booking_id)?,
        "Booking",
        request.booking_id,
    )?;
    persistence.in_transaction(|p| {
        p.add_card_bookings(booking_card_id, &[request.booking_id])?;
        recompute_total(p, booking_card_id, now.instant)?;
        reload_card(p, booking_card_id)
    })
}

/// Attaches goods and services to a card and recomputes the total.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown card or item.
pub fn add_items_to_card(
    persistence: &mut SqlitePersistence,
    booking_card_id: i64,
    request: &AddItemsRequest,
    now: Now,
) -> Result<BookingCardView, ApiError> {
    found(
        persistence.get_booking_card(booking_card_id)?,
        "BookingCard",
        booking_card_id,
    )?;
    let mut item_ids: Vec<i64> = Vec::new();
    for (kind, ids) in [
        (CatalogKind::Goods, &request.goods),
        (CatalogKind::Service, &request.services),
    ] {
        let ids: Vec<i64> = distinct(ids);
        let known: Vec<CatalogItem> = persistence.get_catalog_items(kind, &ids)?;
        if let Some(unknown) = ids
            .iter()
            .find(|id| !known.iter().any(|item| item.id == Some(**id)))
        {
            return Err(ApiError::ResourceNotFound {
                resource_type: kind.as_str().to_string(),
                message: format!("{} with ID {unknown} does not exist", kind.as_str()),
            });
        }
        item_ids.extend(ids);
    }
    persistence.in_transaction(|p| {
        p.add_card_items(booking_card_id, &item_ids)?;
        recompute_total(p, booking_card_id, now.instant)?;
        reload_card(p, booking_card_id)
    })
}
