// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room type, room and room condition mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{Room, RoomCondition, RoomType, format_date, format_timestamp};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{room_conditions, room_room_types, room_types, rooms};
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Inserts a room type and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_room_type(
    conn: &mut SqliteConnection,
    room_type: &RoomType,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(room_types::table)
        .values((
            room_types::title.eq(&room_type.title),
            room_types::price.eq(room_type.price.minor()),
            room_types::relevant_from.eq(room_type.window.from().map(format_date)),
            room_types::relevant_to.eq(room_type.window.to().map(format_date)),
            room_types::description.eq(&room_type.description),
            room_types::is_active.eq(i32::from(room_type.is_active)),
            room_types::created_at.eq(format_timestamp(room_type.created_at)),
            room_types::updated_at.eq(format_timestamp(room_type.updated_at)),
        ))
        .execute(conn)?;
    let room_type_id: i64 = conn.get_last_insert_rowid()?;
    info!(room_type_id, title = %room_type.title, "Created room type");
    Ok(room_type_id)
}

/// Overwrites a room type.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_room_type(
    conn: &mut SqliteConnection,
    room_type_id: i64,
    room_type: &RoomType,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(room_types::table.find(room_type_id))
        .set((
            room_types::title.eq(&room_type.title),
            room_types::price.eq(room_type.price.minor()),
            room_types::relevant_from.eq(room_type.window.from().map(format_date)),
            room_types::relevant_to.eq(room_type.window.to().map(format_date)),
            room_types::description.eq(&room_type.description),
            room_types::is_active.eq(i32::from(room_type.is_active)),
            room_types::updated_at.eq(format_timestamp(room_type.updated_at)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "room type", room_type_id)
}

/// Deletes a room type no room uses.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_room_type(conn: &mut SqliteConnection, room_type_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(room_types::table.find(room_type_id)).execute(conn)?;
    ensure_affected(rows, "room type", room_type_id)?;
    info!(room_type_id, "Deleted room type");
    Ok(())
}

/// Inserts a room together with its type links and returns its ID.
///
/// # Errors
///
/// Returns an error if the number is taken, a type does not exist, or the
/// insert fails.
pub fn insert_room(conn: &mut SqliteConnection, room: &Room) -> Result<i64, PersistenceError> {
    diesel::insert_into(rooms::table)
        .values((
            rooms::number.eq(room.number),
            rooms::floor.eq(room.floor),
            rooms::is_active.eq(i32::from(room.is_active)),
        ))
        .execute(conn)?;
    let room_id: i64 = conn.get_last_insert_rowid()?;
    replace_room_types(conn, room_id, &room.room_type_ids)?;
    info!(room_id, number = room.number, "Created room");
    Ok(room_id)
}

/// Overwrites a room and its type links.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_room(conn: &mut SqliteConnection, room_id: i64, room: &Room) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(rooms::table.find(room_id))
        .set((
            rooms::number.eq(room.number),
            rooms::floor.eq(room.floor),
            rooms::is_active.eq(i32::from(room.is_active)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "room", room_id)?;
    replace_room_types(conn, room_id, &room.room_type_ids)
}

/// Deletes a room no booking references.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_room(conn: &mut SqliteConnection, room_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(rooms::table.find(room_id)).execute(conn)?;
    ensure_affected(rows, "room", room_id)?;
    info!(room_id, "Deleted room");
    Ok(())
}

fn replace_room_types(
    conn: &mut SqliteConnection,
    room_id: i64,
    room_type_ids: &[i64],
) -> Result<(), PersistenceError> {
    diesel::delete(room_room_types::table.filter(room_room_types::room_id.eq(room_id)))
        .execute(conn)?;
    let links: Vec<_> = room_type_ids
        .iter()
        .map(|room_type_id| {
            (
                room_room_types::room_id.eq(room_id),
                room_room_types::room_type_id.eq(*room_type_id),
            )
        })
        .collect();
    if !links.is_empty() {
        diesel::insert_or_ignore_into(room_room_types::table)
            .values(&links)
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a room condition and returns its ID.
///
/// # Errors
///
/// Returns an error if the label is taken or the insert fails.
pub fn insert_room_condition(
    conn: &mut SqliteConnection,
    condition: &RoomCondition,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(room_conditions::table)
        .values((
            room_conditions::label.eq(&condition.label),
            room_conditions::color.eq(&condition.color),
            room_conditions::is_available.eq(i32::from(condition.is_available)),
        ))
        .execute(conn)?;
    let room_condition_id: i64 = conn.get_last_insert_rowid()?;
    info!(room_condition_id, label = %condition.label, "Created room condition");
    Ok(room_condition_id)
}

/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_room_condition(
    conn: &mut SqliteConnection,
    room_condition_id: i64,
    condition: &RoomCondition,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(room_conditions::table.find(room_condition_id))
        .set((
            room_conditions::label.eq(&condition.label),
            room_conditions::color.eq(&condition.color),
            room_conditions::is_available.eq(i32::from(condition.is_available)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "room condition", room_condition_id)
}

/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_room_condition(
    conn: &mut SqliteConnection,
    room_condition_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(room_conditions::table.find(room_condition_id)).execute(conn)?;
    ensure_affected(rows, "room condition", room_condition_id)
}
