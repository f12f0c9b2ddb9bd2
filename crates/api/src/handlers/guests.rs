// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest register handlers.

use std::collections::BTreeMap;

use innkeep_domain::{
    BookingEligibility, Gender, Guest, format_date, format_timestamp, parse_optional_date,
};
use innkeep_persistence::{GuestFilter, Page, SqlitePersistence};
use time::Date;
use tracing::info;

use super::{
    Now, distinct, found, id_of, list_params, non_blank, parse_optional_choice, referenced,
};
use crate::error::ApiError;
use crate::request_response::guests::{
    BlacklistRequest, EligibilityView, GuestFilterQuery, GuestPatch, GuestRequest, GuestView,
};
use crate::request_response::{ListQuery, ListResponse, merge};

fn guest_view(guest: Guest, document_ids: Vec<i64>, today: Date) -> GuestView {
    GuestView {
        id: id_of(guest.id),
        full_name: guest.full_name(),
        age: guest.age(today),
        first_name: guest.first_name,
        last_name: guest.last_name,
        middle_name: guest.middle_name,
        nationality_id: guest.nationality_id,
        document_ids,
        phone: guest.phone,
        email: guest.email,
        date_of_birth: guest.date_of_birth.map(format_date),
        gender: guest.gender.map(|g| g.as_str().to_string()),
        blacklisted: guest.blacklisted,
        blacklist_reason: guest.blacklist_reason,
        notes: guest.notes,
        created_at: format_timestamp(guest.created_at),
        updated_at: format_timestamp(guest.updated_at),
    }
}

fn render_guest(
    persistence: &mut SqlitePersistence,
    guest: Guest,
    today: Date,
) -> Result<GuestView, ApiError> {
    let guest_id: i64 = id_of(guest.id);
    let document_ids: Vec<i64> = persistence
        .guest_document_ids(&[guest_id])?
        .remove(&guest_id)
        .unwrap_or_default();
    Ok(guest_view(guest, document_ids, today))
}

fn render_guests(
    persistence: &mut SqlitePersistence,
    page: Page<Guest>,
    today: Date,
) -> Result<ListResponse<GuestView>, ApiError> {
    let ids: Vec<i64> = page.items.iter().filter_map(|g| g.id).collect();
    let mut documents: BTreeMap<i64, Vec<i64>> = persistence.guest_document_ids(&ids)?;
    Ok(ListResponse::from(page.map(|guest| {
        let document_ids: Vec<i64> = documents.remove(&id_of(guest.id)).unwrap_or_default();
        guest_view(guest, document_ids, today)
    })))
}

/// Validates a guest request against the register.
///
/// Returns the guest to store and its distinct document IDs.
fn guest_from_request(
    persistence: &mut SqlitePersistence,
    request: GuestRequest,
    existing: Option<&Guest>,
    now: Now,
) -> Result<(Guest, Vec<i64>), ApiError> {
    referenced(
        persistence.get_nationality(request.nationality_id)?,
        "nationality_id",
        request.nationality_id,
    )?;
    let document_ids: Vec<i64> = distinct(&request.document_ids);
    for document_id in &document_ids {
        referenced(
            persistence.get_document(*document_id)?,
            "document_ids",
            *document_id,
        )?;
    }

    let guest: Guest = Guest {
        id: existing.and_then(|g| g.id),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        middle_name: non_blank(request.middle_name),
        nationality_id: request.nationality_id,
        phone: non_blank(request.phone),
        email: non_blank(request.email),
        date_of_birth: parse_optional_date("date_of_birth", request.date_of_birth.as_deref())?,
        gender: parse_optional_choice::<Gender>(request.gender.as_deref())?,
        blacklisted: request.blacklisted,
        blacklist_reason: if request.blacklisted {
            non_blank(request.blacklist_reason)
        } else {
            None
        },
        notes: non_blank(request.notes),
        created_at: existing.map_or(now.instant, |g| g.created_at),
        updated_at: now.instant,
    };
    guest.validate()?;

    if let Some(phone) = &guest.phone
        && persistence.phone_in_use(phone, guest.id)?
    {
        return Err(ApiError::invalid(
            "phone",
            "A guest with this phone already exists",
        ));
    }
    Ok((guest, document_ids))
}

/// Lists guests.
///
/// # Errors
///
/// Returns an error for an unknown gender code, invalid list parameters,
/// or a failed query.
pub fn list_guests(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: GuestFilterQuery,
    now: Now,
) -> Result<ListResponse<GuestView>, ApiError> {
    let filter: GuestFilter = GuestFilter {
        nationality_id: filter.nationality_id,
        gender: parse_optional_choice(filter.gender.as_deref())?,
        blacklisted: filter.blacklisted,
    };
    let page: Page<Guest> = persistence.list_guests(&list_params(query)?, filter)?;
    render_guests(persistence, page, now.today)
}

/// Lists blacklisted guests.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_blacklisted_guests(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    now: Now,
) -> Result<ListResponse<GuestView>, ApiError> {
    list_guests(
        persistence,
        query,
        GuestFilterQuery {
            blacklisted: Some(true),
            ..GuestFilterQuery::default()
        },
        now,
    )
}

/// Retrieves one guest.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_guest(
    persistence: &mut SqlitePersistence,
    guest_id: i64,
    now: Now,
) -> Result<GuestView, ApiError> {
    let guest: Guest = found(persistence.get_guest(guest_id)?, "Guest", guest_id)?;
    render_guest(persistence, guest, now.today)
}

/// Registers a guest and links their documents.
///
/// # Errors
///
/// Returns an error for invalid input, an unknown nationality or
/// document, or a phone number already in use.
pub fn create_guest(
    persistence: &mut SqlitePersistence,
    request: GuestRequest,
    now: Now,
) -> Result<GuestView, ApiError> {
    let (mut guest, document_ids): (Guest, Vec<i64>) =
        guest_from_request(persistence, request, None, now)?;
    persistence.in_transaction(|p| -> Result<(), ApiError> {
        let guest_id: i64 = p.insert_guest(&guest)?;
        p.replace_guest_documents(guest_id, &document_ids)?;
        guest.id = Some(guest_id);
        Ok(())
    })?;
    Ok(guest_view(guest, document_ids, now.today))
}

/// Replaces a guest, including the linked documents.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_guest(
    persistence: &mut SqlitePersistence,
    guest_id: i64,
    request: GuestRequest,
    now: Now,
) -> Result<GuestView, ApiError> {
    let existing: Guest = found(persistence.get_guest(guest_id)?, "Guest", guest_id)?;
    let (guest, document_ids): (Guest, Vec<i64>) =
        guest_from_request(persistence, request, Some(&existing), now)?;
    persistence.in_transaction(|p| -> Result<(), ApiError> {
        p.update_guest(guest_id, &guest)?;
        p.replace_guest_documents(guest_id, &document_ids)?;
        Ok(())
    })?;
    Ok(guest_view(guest, document_ids, now.today))
}

/// Partially updates a guest. Absent `document_ids` keeps the links.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_guest(
    persistence: &mut SqlitePersistence,
    guest_id: i64,
    patch: GuestPatch,
    now: Now,
) -> Result<GuestView, ApiError> {
    let existing: Guest = found(persistence.get_guest(guest_id)?, "Guest", guest_id)?;
    let document_ids: Vec<i64> = persistence
        .guest_document_ids(&[guest_id])?
        .remove(&guest_id)
        .unwrap_or_default();
    let mut request: GuestRequest = GuestRequest {
        first_name: existing.first_name,
        last_name: existing.last_name,
        middle_name: existing.middle_name,
        nationality_id: existing.nationality_id,
        document_ids,
        phone: existing.phone,
        email: existing.email,
        date_of_birth: existing.date_of_birth.map(format_date),
        gender: existing.gender.map(|g| g.as_str().to_string()),
        blacklisted: existing.blacklisted,
        blacklist_reason: existing.blacklist_reason,
        notes: existing.notes,
    };
    merge(&mut request.first_name, patch.first_name);
    merge(&mut request.last_name, patch.last_name);
    merge(&mut request.middle_name, patch.middle_name);
    merge(&mut request.nationality_id, patch.nationality_id);
    merge(&mut request.document_ids, patch.document_ids);
    merge(&mut request.phone, patch.phone);
    merge(&mut request.email, patch.email);
    merge(&mut request.date_of_birth, patch.date_of_birth);
    merge(&mut request.gender, patch.gender);
    merge(&mut request.blacklisted, patch.blacklisted);
    merge(&mut request.blacklist_reason, patch.blacklist_reason);
    merge(&mut request.notes, patch.notes);
    update_guest(persistence, guest_id, request, now)
}

/// Deletes a guest with no bookings or cards.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_guest(persistence: &mut SqlitePersistence, guest_id: i64) -> Result<(), ApiError> {
    persistence.delete_guest(guest_id)?;
    Ok(())
}

/// Blacklists a guest.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown guest or `InvalidInput` for
/// a blank reason.
pub fn blacklist_guest(
    persistence: &mut SqlitePersistence,
    guest_id: i64,
    request: &BlacklistRequest,
    now: Now,
) -> Result<GuestView, ApiError> {
    let mut guest: Guest = found(persistence.get_guest(guest_id)?, "Guest", guest_id)?;
    guest.blacklist(&request.reason)?;
    guest.updated_at = now.instant;
    persistence.update_guest(guest_id, &guest)?;
    info!(guest_id, "Guest blacklisted");
    render_guest(persistence, guest, now.today)
}

/// Lifts a guest's blacklist.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown guest.
pub fn unblacklist_guest(
    persistence: &mut SqlitePersistence,
    guest_id: i64,
    now: Now,
) -> Result<GuestView, ApiError> {
    let mut guest: Guest = found(persistence.get_guest(guest_id)?, "Guest", guest_id)?;
    guest.clear_blacklist();
    guest.updated_at = now.instant;
    persistence.update_guest(guest_id, &guest)?;
    info!(guest_id, "Guest removed from blacklist");
    render_guest(persistence, guest, now.today)
}

/// Reports whether a guest may book.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown guest.
pub fn guest_eligibility(
    persistence: &mut SqlitePersistence,
    guest_id: i64,
) -> Result<EligibilityView, ApiError> {
    let guest: Guest = found(persistence.get_guest(guest_id)?, "Guest", guest_id)?;
    let eligibility: BookingEligibility = guest.can_book();
    Ok(EligibilityView {
        guest_id,
        can_book: eligibility.allowed,
        reason: eligibility.reason,
    })
}
