// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking and booking card queries, including the inputs of the card
//! total computation.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use innkeep_domain::{
    BillableStay, Booking, BookingCard, BookingCardStatus, BookingStatus, CatalogKind, Money,
};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::data_models::{BookingCardFilter, BookingFilter, ListParams, Page};
use crate::diesel_schema::{
    agents, booking_card_bookings, booking_card_items, booking_cards, bookings, catalog_items,
    guests,
};
use crate::error::PersistenceError;
use crate::queries::inventory::nightly_rates;
use crate::queries::{flag, paginate, search_pattern, stored_optional_timestamp, stored_timestamp};

#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
struct BookingRow {
    booking_id: i64,
    guest_id: Option<i64>,
    agent_id: Option<i64>,
    room_id: Option<i64>,
    room_condition_id: Option<i64>,
    status: String,
    created_by: i64,
    check_in: Option<String>,
    check_out: Option<String>,
    note: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.booking_id),
            guest_id: row.guest_id,
            agent_id: row.agent_id,
            room_id: row.room_id,
            room_condition_id: row.room_condition_id,
            status: BookingStatus::from_str(&row.status)?,
            created_by: row.created_by,
            check_in: stored_optional_timestamp("check_in", row.check_in.as_deref())?,
            check_out: stored_optional_timestamp("check_out", row.check_out.as_deref())?,
            note: row.note,
            created_at: stored_timestamp("created_at", &row.created_at)?,
            updated_at: stored_timestamp("updated_at", &row.updated_at)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = booking_cards)]
struct BookingCardRow {
    booking_card_id: i64,
    primary_guest_id: i64,
    status: String,
    total_amount: i64,
    total_is_stale: i32,
    created_at: String,
    updated_at: String,
}

/// Retrieves a booking by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    bookings::table
        .find(booking_id)
        .select(BookingRow::as_select())
        .first(conn)
        .optional()?
        .map(Booking::try_from)
        .transpose()
}

/// Loads the bookings with the given IDs, ascending by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn get_bookings(
    conn: &mut SqliteConnection,
    booking_ids: &[i64],
) -> Result<Vec<Booking>, PersistenceError> {
    bookings::table
        .filter(bookings::booking_id.eq_any(booking_ids))
        .order(bookings::booking_id.asc())
        .select(BookingRow::as_select())
        .load::<BookingRow>(conn)?
        .into_iter()
        .map(Booking::try_from)
        .collect()
}

fn filtered_bookings(params: &ListParams, filter: &BookingFilter) -> bookings::BoxedQuery<'static, Sqlite> {
    let mut query = bookings::table.into_boxed();
    if !filter.statuses.is_empty() {
        let statuses: Vec<&'static str> = filter.statuses.iter().map(BookingStatus::as_str).collect();
        query = query.filter(bookings::status.eq_any(statuses));
    }
    if let Some(guest_id) = filter.guest_id {
        query = query.filter(bookings::guest_id.eq(guest_id));
    }
    if let Some(agent_id) = filter.agent_id {
        query = query.filter(bookings::agent_id.eq(agent_id));
    }
    if let Some(room_id) = filter.room_id {
        query = query.filter(bookings::room_id.eq(room_id));
    }
    if let Some(created_by) = filter.created_by {
        query = query.filter(bookings::created_by.eq(created_by));
    }
    if let Some(pattern) = search_pattern(params) {
        let matching_guests = guests::table
            .filter(
                guests::first_name
                    .like(pattern.clone())
                    .or(guests::last_name.like(pattern.clone())),
            )
            .select(guests::guest_id);
        let matching_agents = agents::table
            .filter(agents::full_title.like(pattern.clone()))
            .select(agents::agent_id);
        query = query.filter(
            bookings::note
                .assume_not_null()
                .like(pattern)
                .or(bookings::guest_id.assume_not_null().eq_any(matching_guests))
                .or(bookings::agent_id.assume_not_null().eq_any(matching_agents)),
        );
    }
    query
}

/// Lists bookings. Searches guest names, agent title and note; default
/// ordering is newest first.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_bookings(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: &BookingFilter,
) -> Result<Page<Booking>, PersistenceError> {
    let count: i64 = filtered_bookings(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_bookings(params, filter),
        params.ordering.as_deref().unwrap_or("-created_at"),
        {
            "id" => bookings::booking_id,
            "check_in" => bookings::check_in,
            "check_out" => bookings::check_out,
            "created_at" => bookings::created_at,
        }
    )
    .then_order_by(bookings::booking_id.asc());

    let items: Vec<Booking> = paginate(query, params)
        .select(BookingRow::as_select())
        .load::<BookingRow>(conn)?
        .into_iter()
        .map(Booking::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}

/// Booking and item membership of the given cards.
struct CardMembers {
    bookings: BTreeMap<i64, Vec<i64>>,
    goods: BTreeMap<i64, Vec<i64>>,
    services: BTreeMap<i64, Vec<i64>>,
}

fn load_card_members(
    conn: &mut SqliteConnection,
    card_ids: &[i64],
) -> Result<CardMembers, PersistenceError> {
    let booking_links: Vec<(i64, i64)> = booking_card_bookings::table
        .filter(booking_card_bookings::booking_card_id.eq_any(card_ids))
        .select((
            booking_card_bookings::booking_card_id,
            booking_card_bookings::booking_id,
        ))
        .order((
            booking_card_bookings::booking_card_id.asc(),
            booking_card_bookings::booking_id.asc(),
        ))
        .load(conn)?;

    let item_links: Vec<(i64, i64, String)> = booking_card_items::table
        .inner_join(catalog_items::table)
        .filter(booking_card_items::booking_card_id.eq_any(card_ids))
        .select((
            booking_card_items::booking_card_id,
            booking_card_items::item_id,
            catalog_items::kind,
        ))
        .order((
            booking_card_items::booking_card_id.asc(),
            booking_card_items::item_id.asc(),
        ))
        .load(conn)?;

    let mut members = CardMembers {
        bookings: BTreeMap::new(),
        goods: BTreeMap::new(),
        services: BTreeMap::new(),
    };
    for (card_id, booking_id) in booking_links {
        members.bookings.entry(card_id).or_default().push(booking_id);
    }
    for (card_id, item_id, kind) in item_links {
        let slot = match CatalogKind::from_str(&kind)? {
            CatalogKind::Goods => &mut members.goods,
            CatalogKind::Service => &mut members.services,
        };
        slot.entry(card_id).or_default().push(item_id);
    }
    Ok(members)
}

fn assemble_cards(
    conn: &mut SqliteConnection,
    rows: Vec<BookingCardRow>,
) -> Result<Vec<BookingCard>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.booking_card_id).collect();
    let mut members: CardMembers = load_card_members(conn, &ids)?;

    rows.into_iter()
        .map(|row| {
            Ok(BookingCard {
                id: Some(row.booking_card_id),
                primary_guest_id: row.primary_guest_id,
                booking_ids: members.bookings.remove(&row.booking_card_id).unwrap_or_default(),
                goods_ids: members.goods.remove(&row.booking_card_id).unwrap_or_default(),
                service_ids: members.services.remove(&row.booking_card_id).unwrap_or_default(),
                status: BookingCardStatus::from_str(&row.status)?,
                total_amount: Money::from_minor(row.total_amount),
                total_is_stale: flag(row.total_is_stale),
                created_at: stored_timestamp("created_at", &row.created_at)?,
                updated_at: stored_timestamp("updated_at", &row.updated_at)?,
            })
        })
        .collect()
}

/// Retrieves a booking card with its bookings, goods and services.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_booking_card(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
) -> Result<Option<BookingCard>, PersistenceError> {
    let row: Option<BookingCardRow> = booking_cards::table
        .find(booking_card_id)
        .select(BookingCardRow::as_select())
        .first(conn)
        .optional()?;
    match row {
        Some(row) => Ok(assemble_cards(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

fn filtered_cards(filter: BookingCardFilter) -> booking_cards::BoxedQuery<'static, Sqlite> {
    let mut query = booking_cards::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(booking_cards::status.eq(status.as_str()));
    }
    if let Some(guest_id) = filter.primary_guest_id {
        query = query.filter(booking_cards::primary_guest_id.eq(guest_id));
    }
    query
}

/// Lists booking cards. Default ordering is newest first.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_booking_cards(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: BookingCardFilter,
) -> Result<Page<BookingCard>, PersistenceError> {
    let count: i64 = filtered_cards(filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_cards(filter),
        params.ordering.as_deref().unwrap_or("-created_at"),
        {
            "id" => booking_cards::booking_card_id,
            "created_at" => booking_cards::created_at,
            "total_amount" => booking_cards::total_amount,
        }
    )
    .then_order_by(booking_cards::booking_card_id.asc());

    let rows: Vec<BookingCardRow> = paginate(query, params)
        .select(BookingCardRow::as_select())
        .load(conn)?;
    let items: Vec<BookingCard> = assemble_cards(conn, rows)?;

    Ok(Page { count, items })
}

/// IDs of the cards that contain any of the given bookings.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn card_ids_containing_bookings(
    conn: &mut SqliteConnection,
    booking_ids: &[i64],
) -> Result<Vec<i64>, PersistenceError> {
    Ok(booking_card_bookings::table
        .filter(booking_card_bookings::booking_id.eq_any(booking_ids))
        .select(booking_card_bookings::booking_card_id)
        .distinct()
        .order(booking_card_bookings::booking_card_id.asc())
        .load(conn)?)
}

/// IDs of the cards that contain a booking of the given room.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn card_ids_using_room(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(booking_card_bookings::table
        .inner_join(bookings::table)
        .filter(bookings::room_id.eq(room_id))
        .select(booking_card_bookings::booking_card_id)
        .distinct()
        .order(booking_card_bookings::booking_card_id.asc())
        .load(conn)?)
}

/// Inputs of the card total: one billable stay per member booking, plus
/// the prices of the card's goods and services.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardBillingInputs {
    pub stays: Vec<BillableStay>,
    pub goods_prices: Vec<Money>,
    pub service_prices: Vec<Money>,
}

/// Gathers everything needed to compute a card total.
///
/// # Errors
///
/// Returns an error if a query fails or a stored row is invalid.
pub fn card_billing_inputs(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
) -> Result<CardBillingInputs, PersistenceError> {
    let booking_ids: Vec<i64> = booking_card_bookings::table
        .filter(booking_card_bookings::booking_card_id.eq(booking_card_id))
        .select(booking_card_bookings::booking_id)
        .load(conn)?;
    let stays_bookings: Vec<Booking> = get_bookings(conn, &booking_ids)?;

    let room_ids: Vec<i64> = stays_bookings.iter().filter_map(|b| b.room_id).collect();
    let rates: BTreeMap<i64, Money> = nightly_rates(conn, &room_ids)?;

    let stays: Vec<BillableStay> = stays_bookings
        .iter()
        .map(|booking| BillableStay {
            nightly_rate: booking.room_id.and_then(|room_id| rates.get(&room_id).copied()),
            check_in: booking.check_in,
            check_out: booking.check_out,
        })
        .collect();

    let items: Vec<(String, i64)> = booking_card_items::table
        .inner_join(catalog_items::table)
        .filter(booking_card_items::booking_card_id.eq(booking_card_id))
        .select((catalog_items::kind, catalog_items::price))
        .order(catalog_items::item_id.asc())
        .load(conn)?;

    let mut inputs = CardBillingInputs {
        stays,
        ..CardBillingInputs::default()
    };
    for (kind, price) in items {
        match CatalogKind::from_str(&kind)? {
            CatalogKind::Goods => inputs.goods_prices.push(Money::from_minor(price)),
            CatalogKind::Service => inputs.service_prices.push(Money::from_minor(price)),
        }
    }
    Ok(inputs)
}
