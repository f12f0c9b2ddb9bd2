// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nationality and document mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{Document, Nationality, format_date, format_timestamp};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{documents, nationalities};
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Inserts a nationality and returns its ID.
///
/// # Errors
///
/// Returns an error if the name is taken or the insert fails.
pub fn insert_nationality(
    conn: &mut SqliteConnection,
    nationality: &Nationality,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(nationalities::table)
        .values((
            nationalities::name.eq(&nationality.name),
            nationalities::code.eq(&nationality.code),
        ))
        .execute(conn)?;
    let nationality_id: i64 = conn.get_last_insert_rowid()?;
    info!(nationality_id, name = %nationality.name, "Created nationality");
    Ok(nationality_id)
}

/// Overwrites a nationality.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_nationality(
    conn: &mut SqliteConnection,
    nationality_id: i64,
    nationality: &Nationality,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(nationalities::table.find(nationality_id))
        .set((
            nationalities::name.eq(&nationality.name),
            nationalities::code.eq(&nationality.code),
        ))
        .execute(conn)?;
    ensure_affected(rows, "nationality", nationality_id)
}

/// Deletes a nationality no guest or document references.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_nationality(
    conn: &mut SqliteConnection,
    nationality_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(nationalities::table.find(nationality_id)).execute(conn)?;
    ensure_affected(rows, "nationality", nationality_id)
}

/// Inserts a document and returns its ID.
///
/// # Errors
///
/// Returns an error if the national ID is taken or the insert fails.
pub fn insert_document(conn: &mut SqliteConnection, document: &Document) -> Result<i64, PersistenceError> {
    diesel::insert_into(documents::table)
        .values((
            documents::nationality_id.eq(document.nationality_id),
            documents::national_id.eq(document.national_id.as_str()),
            documents::first_name.eq(&document.first_name),
            documents::last_name.eq(&document.last_name),
            documents::middle_name.eq(&document.middle_name),
            documents::date_of_birth.eq(document.date_of_birth.map(format_date)),
            documents::document_type.eq(document.document_type.as_str()),
            documents::number.eq(&document.number),
            documents::scan_path.eq(&document.scan_path),
            documents::scan_url.eq(&document.scan_url),
            documents::issued_by.eq(&document.issued_by),
            documents::issued_date.eq(document.issued_date.map(format_date)),
            documents::expiry_date.eq(document.expiry_date.map(format_date)),
            documents::notes.eq(&document.notes),
            documents::uploaded_at.eq(format_timestamp(document.uploaded_at)),
            documents::updated_at.eq(format_timestamp(document.updated_at)),
        ))
        .execute(conn)?;
    let document_id: i64 = conn.get_last_insert_rowid()?;
    info!(document_id, "Stored document");
    Ok(document_id)
}

/// Overwrites a document. `uploaded_at` is kept.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_document(
    conn: &mut SqliteConnection,
    document_id: i64,
    document: &Document,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(documents::table.find(document_id))
        .set((
            documents::nationality_id.eq(document.nationality_id),
            documents::national_id.eq(document.national_id.as_str()),
            documents::first_name.eq(&document.first_name),
            documents::last_name.eq(&document.last_name),
            documents::middle_name.eq(&document.middle_name),
            documents::date_of_birth.eq(document.date_of_birth.map(format_date)),
            documents::document_type.eq(document.document_type.as_str()),
            documents::number.eq(&document.number),
            documents::scan_path.eq(&document.scan_path),
            documents::scan_url.eq(&document.scan_url),
            documents::issued_by.eq(&document.issued_by),
            documents::issued_date.eq(document.issued_date.map(format_date)),
            documents::expiry_date.eq(document.expiry_date.map(format_date)),
            documents::notes.eq(&document.notes),
            documents::updated_at.eq(format_timestamp(document.updated_at)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "document", document_id)
}

/// Deletes a document no guest references.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_document(conn: &mut SqliteConnection, document_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(documents::table.find(document_id)).execute(conn)?;
    ensure_affected(rows, "document", document_id)?;
    info!(document_id, "Deleted document");
    Ok(())
}
