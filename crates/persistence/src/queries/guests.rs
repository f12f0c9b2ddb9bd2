// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest queries.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use innkeep_domain::{Gender, Guest};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::data_models::{GuestFilter, ListParams, Page};
use crate::diesel_schema::{guest_documents, guests};
use crate::error::PersistenceError;
use crate::queries::{flag, paginate, search_pattern, stored_optional_date, stored_timestamp};

#[derive(Queryable, Selectable)]
#[diesel(table_name = guests)]
struct GuestRow {
    guest_id: i64,
    first_name: String,
    last_name: String,
    middle_name: Option<String>,
    nationality_id: i64,
    phone: Option<String>,
    email: Option<String>,
    date_of_birth: Option<String>,
    gender: Option<String>,
    blacklisted: i32,
    blacklist_reason: Option<String>,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<GuestRow> for Guest {
    type Error = PersistenceError;

    fn try_from(row: GuestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.guest_id),
            first_name: row.first_name,
            last_name: row.last_name,
            middle_name: row.middle_name,
            nationality_id: row.nationality_id,
            phone: row.phone,
            email: row.email,
            date_of_birth: stored_optional_date("date_of_birth", row.date_of_birth.as_deref())?,
            gender: row.gender.as_deref().map(Gender::from_str).transpose()?,
            blacklisted: flag(row.blacklisted),
            blacklist_reason: row.blacklist_reason,
            notes: row.notes,
            created_at: stored_timestamp("created_at", &row.created_at)?,
            updated_at: stored_timestamp("updated_at", &row.updated_at)?,
        })
    }
}

/// Retrieves a guest by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_guest(
    conn: &mut SqliteConnection,
    guest_id: i64,
) -> Result<Option<Guest>, PersistenceError> {
    guests::table
        .find(guest_id)
        .select(GuestRow::as_select())
        .first(conn)
        .optional()?
        .map(Guest::try_from)
        .transpose()
}

fn filtered_guests(params: &ListParams, filter: GuestFilter) -> guests::BoxedQuery<'static, Sqlite> {
    let mut query = guests::table.into_boxed();
    if let Some(nationality_id) = filter.nationality_id {
        query = query.filter(guests::nationality_id.eq(nationality_id));
    }
    if let Some(gender) = filter.gender {
        query = query.filter(guests::gender.eq(gender.as_str()));
    }
    if let Some(blacklisted) = filter.blacklisted {
        query = query.filter(guests::blacklisted.eq(i32::from(blacklisted)));
    }
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(
            guests::first_name
                .like(pattern.clone())
                .or(guests::last_name.like(pattern.clone()))
                .or(guests::middle_name.assume_not_null().like(pattern.clone()))
                .or(guests::phone.assume_not_null().like(pattern.clone()))
                .or(guests::email.assume_not_null().like(pattern)),
        );
    }
    query
}

/// Lists guests. Searches names, phone and email; default ordering is
/// newest first.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_guests(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: GuestFilter,
) -> Result<Page<Guest>, PersistenceError> {
    let count: i64 = filtered_guests(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_guests(params, filter),
        params.ordering.as_deref().unwrap_or("-created_at"),
        {
            "id" => guests::guest_id,
            "last_name" => guests::last_name,
            "created_at" => guests::created_at,
        }
    )
    .then_order_by(guests::guest_id.asc());

    let items: Vec<Guest> = paginate(query, params)
        .select(GuestRow::as_select())
        .load::<GuestRow>(conn)?
        .into_iter()
        .map(Guest::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}

/// Returns true if another guest already uses this phone number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn phone_in_use(
    conn: &mut SqliteConnection,
    phone: &str,
    excluding_guest_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = guests::table
        .filter(guests::phone.eq(phone))
        .into_boxed();
    if let Some(guest_id) = excluding_guest_id {
        query = query.filter(guests::guest_id.ne(guest_id));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Document IDs linked to each of the given guests.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn guest_document_ids(
    conn: &mut SqliteConnection,
    guest_ids: &[i64],
) -> Result<BTreeMap<i64, Vec<i64>>, PersistenceError> {
    let links: Vec<(i64, i64)> = guest_documents::table
        .filter(guest_documents::guest_id.eq_any(guest_ids))
        .select((guest_documents::guest_id, guest_documents::document_id))
        .order((guest_documents::guest_id.asc(), guest_documents::document_id.asc()))
        .load(conn)?;

    let mut by_guest: BTreeMap<i64, Vec<i64>> = guest_ids.iter().map(|id| (*id, Vec::new())).collect();
    for (guest_id, document_id) in links {
        by_guest.entry(guest_id).or_default().push(document_id);
    }
    Ok(by_guest)
}
