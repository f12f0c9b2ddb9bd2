// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room type, room and room condition handlers.
//!
//! Rooms price their stays through their room types, so changing a room's
//! types or a room type's price marks the booking cards that use those
//! rooms as stale.

use innkeep_domain::{
    DEFAULT_CONDITION_COLOR, Money, Room, RoomCondition, RoomType, ValidityWindow, format_date,
    format_timestamp, parse_optional_date,
};
use innkeep_persistence::{
    ListParams, Page, RoomConditionFilter, RoomFilter, RoomTypeFilter, SqlitePersistence,
};
use time::{Date, OffsetDateTime};
use tracing::debug;

use super::{Now, distinct, found, id_of, list_params, non_blank, referenced};
use crate::error::ApiError;
use crate::request_response::inventory::{
    RoomConditionFilterQuery, RoomConditionPatch, RoomConditionRequest, RoomConditionView,
    RoomFilterQuery, RoomPatch, RoomRequest, RoomTypeFilterQuery, RoomTypePatch, RoomTypeRequest,
    RoomTypeView, RoomView,
};
use crate::request_response::{ListQuery, ListResponse, merge};

fn room_type_view(room_type: RoomType, today: Date) -> RoomTypeView {
    RoomTypeView {
        id: id_of(room_type.id),
        is_relevant: room_type.is_relevant(today),
        title: room_type.title,
        price: room_type.price.minor(),
        relevant_from: room_type.window.from().map(format_date),
        relevant_to: room_type.window.to().map(format_date),
        description: room_type.description,
        is_active: room_type.is_active,
        created_at: format_timestamp(room_type.created_at),
        updated_at: format_timestamp(room_type.updated_at),
    }
}

impl From<Room> for RoomView {
    fn from(room: Room) -> Self {
        Self {
            id: id_of(room.id),
            number: room.number,
            floor: room.floor,
            room_type_ids: room.room_type_ids,
            is_active: room.is_active,
        }
    }
}

impl From<RoomCondition> for RoomConditionView {
    fn from(condition: RoomCondition) -> Self {
        Self {
            id: id_of(condition.id),
            label: condition.label,
            color: condition.color,
            is_available: condition.is_available,
        }
    }
}

/// Marks every card with a booking in one of `room_ids` as stale.
fn mark_room_cards_stale(
    persistence: &mut SqlitePersistence,
    room_ids: &[i64],
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let mut card_ids: Vec<i64> = Vec::new();
    for room_id in room_ids {
        card_ids.extend(persistence.card_ids_using_room(*room_id)?);
    }
    let card_ids: Vec<i64> = distinct(&card_ids);
    if !card_ids.is_empty() {
        let marked: usize = persistence.mark_cards_stale(&card_ids, now)?;
        debug!(marked, "Marked booking card totals stale after a rate change");
    }
    Ok(())
}

// ========================================================================
// Room types
// ========================================================================

fn room_type_from_request(
    request: RoomTypeRequest,
    existing: Option<&RoomType>,
    now: Now,
) -> Result<RoomType, ApiError> {
    let from: Option<Date> = parse_optional_date("relevant_from", request.relevant_from.as_deref())?;
    let to: Option<Date> = parse_optional_date("relevant_to", request.relevant_to.as_deref())?;
    let room_type: RoomType = RoomType {
        id: existing.and_then(|t| t.id),
        title: request.title.trim().to_string(),
        price: Money::from_minor(request.price),
        window: ValidityWindow::new(from, to)?,
        description: non_blank(request.description),
        is_active: request.is_active,
        created_at: existing.map_or(now.instant, |t| t.created_at),
        updated_at: now.instant,
    };
    room_type.validate()?;
    Ok(room_type)
}

fn room_type_list(
    persistence: &mut SqlitePersistence,
    params: &ListParams,
    filter: RoomTypeFilter,
    today: Date,
) -> Result<ListResponse<RoomTypeView>, ApiError> {
    let page: Page<RoomType> = persistence.list_room_types(params, filter)?;
    Ok(ListResponse::from(page.map(|t| room_type_view(t, today))))
}

/// Lists room types.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_room_types(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: RoomTypeFilterQuery,
    now: Now,
) -> Result<ListResponse<RoomTypeView>, ApiError> {
    let filter: RoomTypeFilter = RoomTypeFilter {
        is_active: filter.is_active,
        relevant_on: None,
    };
    room_type_list(persistence, &list_params(query)?, filter, now.today)
}

/// Lists active room types.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_active_room_types(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    now: Now,
) -> Result<ListResponse<RoomTypeView>, ApiError> {
    let filter: RoomTypeFilter = RoomTypeFilter {
        is_active: Some(true),
        relevant_on: None,
    };
    room_type_list(persistence, &list_params(query)?, filter, now.today)
}

/// Lists active room types offered today.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_relevant_room_types(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    now: Now,
) -> Result<ListResponse<RoomTypeView>, ApiError> {
    let filter: RoomTypeFilter = RoomTypeFilter {
        is_active: Some(true),
        relevant_on: Some(now.today),
    };
    room_type_list(persistence, &list_params(query)?, filter, now.today)
}

/// Retrieves one room type.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_room_type(
    persistence: &mut SqlitePersistence,
    room_type_id: i64,
    now: Now,
) -> Result<RoomTypeView, ApiError> {
    let room_type: RoomType = found(persistence.get_room_type(room_type_id)?, "RoomType", room_type_id)?;
    Ok(room_type_view(room_type, now.today))
}

/// Creates a room type.
///
/// # Errors
///
/// Returns an error for a blank or duplicate title, a non-positive price,
/// or a window that ends before it starts.
pub fn create_room_type(
    persistence: &mut SqlitePersistence,
    request: RoomTypeRequest,
    now: Now,
) -> Result<RoomTypeView, ApiError> {
    let mut room_type: RoomType = room_type_from_request(request, None, now)?;
    room_type.id = Some(persistence.insert_room_type(&room_type)?);
    Ok(room_type_view(room_type, now.today))
}

/// Replaces a room type. A price change marks affected card totals stale.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_room_type(
    persistence: &mut SqlitePersistence,
    room_type_id: i64,
    request: RoomTypeRequest,
    now: Now,
) -> Result<RoomTypeView, ApiError> {
    let existing: RoomType = found(persistence.get_room_type(room_type_id)?, "RoomType", room_type_id)?;
    let room_type: RoomType = room_type_from_request(request, Some(&existing), now)?;
    let price_changed: bool = room_type.price != existing.price;

    persistence.in_transaction(|p| -> Result<(), ApiError> {
        p.update_room_type(room_type_id, &room_type)?;
        if price_changed {
            let filter: RoomFilter = RoomFilter {
                room_type_id: Some(room_type_id),
                ..RoomFilter::default()
            };
            let room_ids: Vec<i64> = p
                .list_rooms(&ListParams::default(), filter)?
                .items
                .into_iter()
                .filter_map(|r| r.id)
                .collect();
            mark_room_cards_stale(p, &room_ids, now.instant)?;
        }
        Ok(())
    })?;
    Ok(room_type_view(room_type, now.today))
}

/// Partially updates a room type.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_room_type(
    persistence: &mut SqlitePersistence,
    room_type_id: i64,
    patch: RoomTypePatch,
    now: Now,
) -> Result<RoomTypeView, ApiError> {
    let existing: RoomType = found(persistence.get_room_type(room_type_id)?, "RoomType", room_type_id)?;
    let mut request: RoomTypeRequest = RoomTypeRequest {
        title: existing.title,
        price: existing.price.minor(),
        relevant_from: existing.window.from().map(format_date),
        relevant_to: existing.window.to().map(format_date),
        description: existing.description,
        is_active: existing.is_active,
    };
    merge(&mut request.title, patch.title);
    merge(&mut request.price, patch.price);
    merge(&mut request.relevant_from, patch.relevant_from);
    merge(&mut request.relevant_to, patch.relevant_to);
    merge(&mut request.description, patch.description);
    merge(&mut request.is_active, patch.is_active);
    update_room_type(persistence, room_type_id, request, now)
}

/// Deletes a room type no room uses.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_room_type(persistence: &mut SqlitePersistence, room_type_id: i64) -> Result<(), ApiError> {
    persistence.delete_room_type(room_type_id)?;
    Ok(())
}

// ========================================================================
// Rooms
// ========================================================================

fn room_from_request(
    persistence: &mut SqlitePersistence,
    id: Option<i64>,
    request: RoomRequest,
) -> Result<Room, ApiError> {
    let room_type_ids: Vec<i64> = distinct(&request.room_type_ids);
    for room_type_id in &room_type_ids {
        referenced(
            persistence.get_room_type(*room_type_id)?,
            "room_type_ids",
            *room_type_id,
        )?;
    }
    let room: Room = Room {
        id,
        number: request.number,
        floor: request.floor,
        room_type_ids,
        is_active: request.is_active,
    };
    room.validate()?;
    Ok(room)
}

/// Lists rooms.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_rooms(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: RoomFilterQuery,
) -> Result<ListResponse<RoomView>, ApiError> {
    let filter: RoomFilter = RoomFilter {
        floor: filter.floor,
        is_active: filter.is_active,
        room_type_id: filter.room_type_id,
    };
    let page: Page<Room> = persistence.list_rooms(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(RoomView::from)))
}

/// Lists rooms available for sale, which are the active rooms.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_available_rooms(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
) -> Result<ListResponse<RoomView>, ApiError> {
    list_rooms(
        persistence,
        query,
        RoomFilterQuery {
            is_active: Some(true),
            ..RoomFilterQuery::default()
        },
    )
}

/// Retrieves one room.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_room(persistence: &mut SqlitePersistence, room_id: i64) -> Result<RoomView, ApiError> {
    let room: Room = found(persistence.get_room(room_id)?, "Room", room_id)?;
    Ok(RoomView::from(room))
}

/// Creates a room.
///
/// # Errors
///
/// Returns an error for a non-positive or duplicate number, or an
/// unknown room type.
pub fn create_room(
    persistence: &mut SqlitePersistence,
    request: RoomRequest,
) -> Result<RoomView, ApiError> {
    let mut room: Room = room_from_request(persistence, None, request)?;
    room.id = Some(persistence.insert_room(&room)?);
    Ok(RoomView::from(room))
}

/// Replaces a room. Changing its room types marks affected card totals
/// stale.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_room(
    persistence: &mut SqlitePersistence,
    room_id: i64,
    request: RoomRequest,
    now: Now,
) -> Result<RoomView, ApiError> {
    let existing: Room = found(persistence.get_room(room_id)?, "Room", room_id)?;
    let room: Room = room_from_request(persistence, Some(room_id), request)?;

    let mut before: Vec<i64> = existing.room_type_ids;
    let mut after: Vec<i64> = room.room_type_ids.clone();
    before.sort_unstable();
    after.sort_unstable();

    persistence.in_transaction(|p| -> Result<(), ApiError> {
        p.update_room(room_id, &room)?;
        if before != after {
            mark_room_cards_stale(p, &[room_id], now.instant)?;
        }
        Ok(())
    })?;
    Ok(RoomView::from(room))
}

/// Partially updates a room.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_room(
    persistence: &mut SqlitePersistence,
    room_id: i64,
    patch: RoomPatch,
    now: Now,
) -> Result<RoomView, ApiError> {
    let existing: Room = found(persistence.get_room(room_id)?, "Room", room_id)?;
    let mut request: RoomRequest = RoomRequest {
        number: existing.number,
        floor: existing.floor,
        room_type_ids: existing.room_type_ids,
        is_active: existing.is_active,
    };
    merge(&mut request.number, patch.number);
    merge(&mut request.floor, patch.floor);
    merge(&mut request.room_type_ids, patch.room_type_ids);
    merge(&mut request.is_active, patch.is_active);
    update_room(persistence, room_id, request, now)
}

/// Deletes a room with no bookings.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_room(persistence: &mut SqlitePersistence, room_id: i64) -> Result<(), ApiError> {
    persistence.delete_room(room_id)?;
    Ok(())
}

// ========================================================================
// Room conditions
// ========================================================================

fn condition_from_request(id: Option<i64>, request: RoomConditionRequest) -> Result<RoomCondition, ApiError> {
    let condition: RoomCondition = RoomCondition {
        id,
        label: request.label.trim().to_string(),
        color: non_blank(request.color).unwrap_or_else(|| DEFAULT_CONDITION_COLOR.to_string()),
        is_available: request.is_available,
    };
    condition.validate()?;
    Ok(condition)
}

/// Lists room conditions.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_room_conditions(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: RoomConditionFilterQuery,
) -> Result<ListResponse<RoomConditionView>, ApiError> {
    let filter: RoomConditionFilter = RoomConditionFilter {
        is_available: filter.is_available,
    };
    let page: Page<RoomCondition> = persistence.list_room_conditions(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(RoomConditionView::from)))
}

/// Retrieves one room condition.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_room_condition(
    persistence: &mut SqlitePersistence,
    room_condition_id: i64,
) -> Result<RoomConditionView, ApiError> {
    let condition: RoomCondition = found(
        persistence.get_room_condition(room_condition_id)?,
        "RoomCondition",
        room_condition_id,
    )?;
    Ok(RoomConditionView::from(condition))
}

/// Creates a room condition. The color defaults to grey.
///
/// # Errors
///
/// Returns an error for a blank or duplicate label or a malformed color.
pub fn create_room_condition(
    persistence: &mut SqlitePersistence,
    request: RoomConditionRequest,
) -> Result<RoomConditionView, ApiError> {
    let mut condition: RoomCondition = condition_from_request(None, request)?;
    condition.id = Some(persistence.insert_room_condition(&condition)?);
    Ok(RoomConditionView::from(condition))
}

/// Replaces a room condition.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_room_condition(
    persistence: &mut SqlitePersistence,
    room_condition_id: i64,
    request: RoomConditionRequest,
) -> Result<RoomConditionView, ApiError> {
    found(
        persistence.get_room_condition(room_condition_id)?,
        "RoomCondition",
        room_condition_id,
    )?;
    let condition: RoomCondition = condition_from_request(Some(room_condition_id), request)?;
    persistence.update_room_condition(room_condition_id, &condition)?;
    Ok(RoomConditionView::from(condition))
}

/// Partially updates a room condition.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_room_condition(
    persistence: &mut SqlitePersistence,
    room_condition_id: i64,
    patch: RoomConditionPatch,
) -> Result<RoomConditionView, ApiError> {
    let existing: RoomCondition = found(
        persistence.get_room_condition(room_condition_id)?,
        "RoomCondition",
        room_condition_id,
    )?;
    let mut request: RoomConditionRequest = RoomConditionRequest {
        label: existing.label,
        color: Some(existing.color),
        is_available: existing.is_available,
    };
    merge(&mut request.label, patch.label);
    merge(&mut request.color, patch.color.map(Some));
    merge(&mut request.is_available, patch.is_available);
    update_room_condition(persistence, room_condition_id, request)
}

/// Deletes a room condition no booking uses.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_room_condition(
    persistence: &mut SqlitePersistence,
    room_condition_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_room_condition(room_condition_id)?;
    Ok(())
}
