// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room type, room and room condition queries.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use innkeep_domain::{Money, Room, RoomCondition, RoomType, ValidityWindow, format_date};
use std::collections::BTreeMap;

use crate::data_models::{ListParams, Page, RoomConditionFilter, RoomFilter, RoomTypeFilter};
use crate::diesel_schema::{room_conditions, room_room_types, room_types, rooms};
use crate::error::PersistenceError;
use crate::queries::{flag, paginate, search_pattern, stored_optional_date, stored_timestamp};

#[derive(Queryable, Selectable)]
#[diesel(table_name = room_types)]
struct RoomTypeRow {
    room_type_id: i64,
    title: String,
    price: i64,
    relevant_from: Option<String>,
    relevant_to: Option<String>,
    description: Option<String>,
    is_active: i32,
    created_at: String,
    updated_at: String,
}

impl TryFrom<RoomTypeRow> for RoomType {
    type Error = PersistenceError;

    fn try_from(row: RoomTypeRow) -> Result<Self, Self::Error> {
        let window: ValidityWindow = ValidityWindow::new(
            stored_optional_date("relevant_from", row.relevant_from.as_deref())?,
            stored_optional_date("relevant_to", row.relevant_to.as_deref())?,
        )?;
        Ok(Self {
            id: Some(row.room_type_id),
            title: row.title,
            price: Money::from_minor(row.price),
            window,
            description: row.description,
            is_active: flag(row.is_active),
            created_at: stored_timestamp("created_at", &row.created_at)?,
            updated_at: stored_timestamp("updated_at", &row.updated_at)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = rooms)]
struct RoomRow {
    room_id: i64,
    number: i64,
    floor: Option<i64>,
    is_active: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = room_conditions)]
struct RoomConditionRow {
    room_condition_id: i64,
    label: String,
    color: String,
    is_available: i32,
}

impl From<RoomConditionRow> for RoomCondition {
    fn from(row: RoomConditionRow) -> Self {
        Self {
            id: Some(row.room_condition_id),
            label: row.label,
            color: row.color,
            is_available: flag(row.is_available),
        }
    }
}

/// Retrieves a room type by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_room_type(
    conn: &mut SqliteConnection,
    room_type_id: i64,
) -> Result<Option<RoomType>, PersistenceError> {
    room_types::table
        .find(room_type_id)
        .select(RoomTypeRow::as_select())
        .first(conn)
        .optional()?
        .map(RoomType::try_from)
        .transpose()
}

fn filtered_room_types(
    params: &ListParams,
    filter: RoomTypeFilter,
) -> room_types::BoxedQuery<'static, Sqlite> {
    let mut query = room_types::table.into_boxed();
    if let Some(is_active) = filter.is_active {
        query = query.filter(room_types::is_active.eq(i32::from(is_active)));
    }
    if let Some(today) = filter.relevant_on {
        let today: String = format_date(today);
        query = query
            .filter(
                room_types::relevant_from
                    .is_null()
                    .or(room_types::relevant_from.assume_not_null().le(today.clone())),
            )
            .filter(
                room_types::relevant_to
                    .is_null()
                    .or(room_types::relevant_to.assume_not_null().ge(today)),
            );
    }
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(
            room_types::title
                .like(pattern.clone())
                .or(room_types::description.assume_not_null().like(pattern)),
        );
    }
    query
}

/// Lists room types. Searches title and description; default ordering is
/// by title.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_room_types(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: RoomTypeFilter,
) -> Result<Page<RoomType>, PersistenceError> {
    let count: i64 = filtered_room_types(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_room_types(params, filter),
        params.ordering.as_deref().unwrap_or("title"),
        {
            "id" => room_types::room_type_id,
            "title" => room_types::title,
            "price" => room_types::price,
            "created_at" => room_types::created_at,
        }
    )
    .then_order_by(room_types::room_type_id.asc());

    let items: Vec<RoomType> = paginate(query, params)
        .select(RoomTypeRow::as_select())
        .load::<RoomTypeRow>(conn)?
        .into_iter()
        .map(RoomType::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}

/// Room type IDs attached to each of the given rooms, ascending.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn room_type_ids_for_rooms(
    conn: &mut SqliteConnection,
    room_ids: &[i64],
) -> Result<BTreeMap<i64, Vec<i64>>, PersistenceError> {
    let links: Vec<(i64, i64)> = room_room_types::table
        .filter(room_room_types::room_id.eq_any(room_ids))
        .select((room_room_types::room_id, room_room_types::room_type_id))
        .order((room_room_types::room_id.asc(), room_room_types::room_type_id.asc()))
        .load(conn)?;

    let mut by_room: BTreeMap<i64, Vec<i64>> =
        room_ids.iter().map(|id| (*id, Vec::new())).collect();
    for (room_id, room_type_id) in links {
        by_room.entry(room_id).or_default().push(room_type_id);
    }
    Ok(by_room)
}

/// Nightly rate of each given room: the price of its lowest-ID room type.
///
/// Rooms without any room type are absent from the map.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn nightly_rates(
    conn: &mut SqliteConnection,
    room_ids: &[i64],
) -> Result<BTreeMap<i64, Money>, PersistenceError> {
    let rows: Vec<(i64, i64, i64)> = room_room_types::table
        .inner_join(room_types::table)
        .filter(room_room_types::room_id.eq_any(room_ids))
        .select((room_room_types::room_id, room_types::room_type_id, room_types::price))
        .order((room_room_types::room_id.asc(), room_types::room_type_id.asc()))
        .load(conn)?;

    let mut rates: BTreeMap<i64, Money> = BTreeMap::new();
    for (room_id, _room_type_id, price) in rows {
        rates.entry(room_id).or_insert_with(|| Money::from_minor(price));
    }
    Ok(rates)
}

fn attach_room_types(
    conn: &mut SqliteConnection,
    rows: Vec<RoomRow>,
) -> Result<Vec<Room>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.room_id).collect();
    let mut type_ids: BTreeMap<i64, Vec<i64>> = room_type_ids_for_rooms(conn, &ids)?;
    Ok(rows
        .into_iter()
        .map(|row| Room {
            id: Some(row.room_id),
            number: row.number,
            floor: row.floor,
            room_type_ids: type_ids.remove(&row.room_id).unwrap_or_default(),
            is_active: flag(row.is_active),
        })
        .collect())
}

/// Retrieves a room, with its room types, by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_room(conn: &mut SqliteConnection, room_id: i64) -> Result<Option<Room>, PersistenceError> {
    let row: Option<RoomRow> = rooms::table
        .find(room_id)
        .select(RoomRow::as_select())
        .first(conn)
        .optional()?;
    match row {
        Some(row) => Ok(attach_room_types(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

fn filtered_rooms(params: &ListParams, filter: RoomFilter) -> rooms::BoxedQuery<'static, Sqlite> {
    let mut query = rooms::table.into_boxed();
    if let Some(floor) = filter.floor {
        query = query.filter(rooms::floor.eq(floor));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(rooms::is_active.eq(i32::from(is_active)));
    }
    if let Some(room_type_id) = filter.room_type_id {
        query = query.filter(
            rooms::room_id.eq_any(
                room_room_types::table
                    .filter(room_room_types::room_type_id.eq(room_type_id))
                    .select(room_room_types::room_id),
            ),
        );
    }
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(sql::<Bool>("CAST(rooms.number AS TEXT) LIKE ").bind::<Text, _>(pattern));
    }
    query
}

/// Lists rooms. Searches the room number; default ordering is by number.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_rooms(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: RoomFilter,
) -> Result<Page<Room>, PersistenceError> {
    let count: i64 = filtered_rooms(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_rooms(params, filter),
        params.ordering.as_deref().unwrap_or("number"),
        {
            "id" => rooms::room_id,
            "number" => rooms::number,
            "floor" => rooms::floor,
        }
    )
    .then_order_by(rooms::room_id.asc());

    let rows: Vec<RoomRow> = paginate(query, params)
        .select(RoomRow::as_select())
        .load(conn)?;
    let items: Vec<Room> = attach_room_types(conn, rows)?;

    Ok(Page { count, items })
}

/// Retrieves a room condition by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_room_condition(
    conn: &mut SqliteConnection,
    room_condition_id: i64,
) -> Result<Option<RoomCondition>, PersistenceError> {
    let row: Option<RoomConditionRow> = room_conditions::table
        .find(room_condition_id)
        .select(RoomConditionRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(RoomCondition::from))
}

fn filtered_room_conditions(
    params: &ListParams,
    filter: RoomConditionFilter,
) -> room_conditions::BoxedQuery<'static, Sqlite> {
    let mut query = room_conditions::table.into_boxed();
    if let Some(is_available) = filter.is_available {
        query = query.filter(room_conditions::is_available.eq(i32::from(is_available)));
    }
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(room_conditions::label.like(pattern));
    }
    query
}

/// Lists room conditions. Searches the label; default ordering is by label.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_room_conditions(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: RoomConditionFilter,
) -> Result<Page<RoomCondition>, PersistenceError> {
    let count: i64 = filtered_room_conditions(params, filter)
        .count()
        .get_result(conn)?;

    let query = apply_ordering!(
        filtered_room_conditions(params, filter),
        params.ordering.as_deref().unwrap_or("label"),
        {
            "id" => room_conditions::room_condition_id,
            "label" => room_conditions::label,
        }
    )
    .then_order_by(room_conditions::room_condition_id.asc());

    let rows: Vec<RoomConditionRow> = paginate(query, params)
        .select(RoomConditionRow::as_select())
        .load(conn)?;

    Ok(Page {
        count,
        items: rows.into_iter().map(RoomCondition::from).collect(),
    })
}
