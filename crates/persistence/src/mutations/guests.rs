// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{Guest, format_date, format_timestamp};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{guest_documents, guests};
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Inserts a guest and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_guest(conn: &mut SqliteConnection, guest: &Guest) -> Result<i64, PersistenceError> {
    diesel::insert_into(guests::table)
        .values((
            guests::first_name.eq(&guest.first_name),
            guests::last_name.eq(&guest.last_name),
            guests::middle_name.eq(&guest.middle_name),
            guests::nationality_id.eq(guest.nationality_id),
            guests::phone.eq(&guest.phone),
            guests::email.eq(&guest.email),
            guests::date_of_birth.eq(guest.date_of_birth.map(format_date)),
            guests::gender.eq(guest.gender.map(|g| g.as_str())),
            guests::blacklisted.eq(i32::from(guest.blacklisted)),
            guests::blacklist_reason.eq(&guest.blacklist_reason),
            guests::notes.eq(&guest.notes),
            guests::created_at.eq(format_timestamp(guest.created_at)),
            guests::updated_at.eq(format_timestamp(guest.updated_at)),
        ))
        .execute(conn)?;
    let guest_id: i64 = conn.get_last_insert_rowid()?;
    info!(guest_id, "Registered guest");
    Ok(guest_id)
}

/// Overwrites a guest, blacklist state included. `created_at` is kept.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_guest(
    conn: &mut SqliteConnection,
    guest_id: i64,
    guest: &Guest,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(guests::table.find(guest_id))
        .set((
            guests::first_name.eq(&guest.first_name),
            guests::last_name.eq(&guest.last_name),
            guests::middle_name.eq(&guest.middle_name),
            guests::nationality_id.eq(guest.nationality_id),
            guests::phone.eq(&guest.phone),
            guests::email.eq(&guest.email),
            guests::date_of_birth.eq(guest.date_of_birth.map(format_date)),
            guests::gender.eq(guest.gender.map(|g| g.as_str())),
            guests::blacklisted.eq(i32::from(guest.blacklisted)),
            guests::blacklist_reason.eq(&guest.blacklist_reason),
            guests::notes.eq(&guest.notes),
            guests::updated_at.eq(format_timestamp(guest.updated_at)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "guest", guest_id)
}

/// Deletes a guest no booking or card references. Document links go with it.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_guest(conn: &mut SqliteConnection, guest_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(guests::table.find(guest_id)).execute(conn)?;
    ensure_affected(rows, "guest", guest_id)?;
    info!(guest_id, "Deleted guest");
    Ok(())
}

/// Replaces the set of documents linked to a guest.
///
/// # Errors
///
/// Returns `ReferencedRecord` if a document does not exist, or a database
/// error.
pub fn replace_guest_documents(
    conn: &mut SqliteConnection,
    guest_id: i64,
    document_ids: &[i64],
) -> Result<(), PersistenceError> {
    diesel::delete(guest_documents::table.filter(guest_documents::guest_id.eq(guest_id)))
        .execute(conn)?;
    let links: Vec<_> = document_ids
        .iter()
        .map(|document_id| {
            (
                guest_documents::guest_id.eq(guest_id),
                guest_documents::document_id.eq(*document_id),
            )
        })
        .collect();
    if !links.is_empty() {
        diesel::insert_or_ignore_into(guest_documents::table)
            .values(&links)
            .execute(conn)?;
    }
    debug!(guest_id, documents = document_ids.len(), "Linked guest documents");
    Ok(())
}
