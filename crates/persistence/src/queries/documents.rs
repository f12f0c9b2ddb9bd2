// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nationality and identity document queries.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use innkeep_domain::{Document, DocumentType, NationalId, Nationality, format_date};
use std::str::FromStr;
use time::Date;

use crate::data_models::{DocumentFilter, ListParams, Page};
use crate::diesel_schema::{documents, nationalities};
use crate::error::PersistenceError;
use crate::queries::{
    paginate, search_pattern, stored_date, stored_optional_date, stored_timestamp,
};

#[derive(Queryable, Selectable)]
#[diesel(table_name = nationalities)]
struct NationalityRow {
    nationality_id: i64,
    name: String,
    code: Option<String>,
}

impl From<NationalityRow> for Nationality {
    fn from(row: NationalityRow) -> Self {
        Self {
            id: Some(row.nationality_id),
            name: row.name,
            code: row.code,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = documents)]
struct DocumentRow {
    document_id: i64,
    nationality_id: i64,
    national_id: String,
    first_name: String,
    last_name: String,
    middle_name: Option<String>,
    date_of_birth: Option<String>,
    document_type: String,
    number: String,
    scan_path: Option<String>,
    scan_url: Option<String>,
    issued_by: Option<String>,
    issued_date: Option<String>,
    expiry_date: Option<String>,
    notes: Option<String>,
    uploaded_at: String,
    updated_at: String,
}

impl TryFrom<DocumentRow> for Document {
    type Error = PersistenceError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.document_id),
            nationality_id: row.nationality_id,
            national_id: NationalId::parse(&row.national_id)?,
            first_name: row.first_name,
            last_name: row.last_name,
            middle_name: row.middle_name,
            date_of_birth: stored_optional_date("date_of_birth", row.date_of_birth.as_deref())?,
            document_type: DocumentType::from_str(&row.document_type)?,
            number: row.number,
            scan_path: row.scan_path,
            scan_url: row.scan_url,
            issued_by: row.issued_by,
            issued_date: stored_optional_date("issued_date", row.issued_date.as_deref())?,
            expiry_date: stored_optional_date("expiry_date", row.expiry_date.as_deref())?,
            notes: row.notes,
            uploaded_at: stored_timestamp("uploaded_at", &row.uploaded_at)?,
            updated_at: stored_timestamp("updated_at", &row.updated_at)?,
        })
    }
}

fn load_documents(
    conn: &mut SqliteConnection,
    query: documents::BoxedQuery<'static, Sqlite>,
) -> Result<Vec<Document>, PersistenceError> {
    query
        .select(DocumentRow::as_select())
        .load::<DocumentRow>(conn)?
        .into_iter()
        .map(Document::try_from)
        .collect()
}

/// Retrieves a nationality by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_nationality(
    conn: &mut SqliteConnection,
    nationality_id: i64,
) -> Result<Option<Nationality>, PersistenceError> {
    let row: Option<NationalityRow> = nationalities::table
        .find(nationality_id)
        .select(NationalityRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Nationality::from))
}

fn filtered_nationalities(params: &ListParams) -> nationalities::BoxedQuery<'static, Sqlite> {
    let mut query = nationalities::table.into_boxed();
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(
            nationalities::name
                .like(pattern.clone())
                .or(nationalities::code.assume_not_null().like(pattern)),
        );
    }
    query
}

/// Lists nationalities. Searches name and code; default ordering is by name.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_nationalities(
    conn: &mut SqliteConnection,
    params: &ListParams,
) -> Result<Page<Nationality>, PersistenceError> {
    let count: i64 = filtered_nationalities(params).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_nationalities(params),
        params.ordering.as_deref().unwrap_or("name"),
        {
            "id" => nationalities::nationality_id,
            "name" => nationalities::name,
            "code" => nationalities::code,
        }
    )
    .then_order_by(nationalities::nationality_id.asc());

    let rows: Vec<NationalityRow> = paginate(query, params)
        .select(NationalityRow::as_select())
        .load(conn)?;

    Ok(Page {
        count,
        items: rows.into_iter().map(Nationality::from).collect(),
    })
}

/// Retrieves a document by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_document(
    conn: &mut SqliteConnection,
    document_id: i64,
) -> Result<Option<Document>, PersistenceError> {
    documents::table
        .find(document_id)
        .select(DocumentRow::as_select())
        .first(conn)
        .optional()?
        .map(Document::try_from)
        .transpose()
}

/// Looks up a document by its 12-digit national ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_document_by_national_id(
    conn: &mut SqliteConnection,
    national_id: &NationalId,
) -> Result<Option<Document>, PersistenceError> {
    documents::table
        .filter(documents::national_id.eq(national_id.as_str()))
        .select(DocumentRow::as_select())
        .first(conn)
        .optional()?
        .map(Document::try_from)
        .transpose()
}

fn filtered_documents(
    params: &ListParams,
    filter: DocumentFilter,
) -> documents::BoxedQuery<'static, Sqlite> {
    let mut query = documents::table.into_boxed();
    if let Some(nationality_id) = filter.nationality_id {
        query = query.filter(documents::nationality_id.eq(nationality_id));
    }
    if let Some(document_type) = filter.document_type {
        query = query.filter(documents::document_type.eq(document_type.as_str()));
    }
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(
            documents::national_id
                .like(pattern.clone())
                .or(documents::first_name.like(pattern.clone()))
                .or(documents::last_name.like(pattern.clone()))
                .or(documents::middle_name.assume_not_null().like(pattern.clone()))
                .or(documents::number.like(pattern)),
        );
    }
    query
}

/// Lists documents. Searches national ID, names and document number;
/// default ordering is newest upload first.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_documents(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: DocumentFilter,
) -> Result<Page<Document>, PersistenceError> {
    let count: i64 = filtered_documents(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_documents(params, filter),
        params.ordering.as_deref().unwrap_or("-uploaded_at"),
        {
            "id" => documents::document_id,
            "uploaded_at" => documents::uploaded_at,
            "expiry_date" => documents::expiry_date,
            "last_name" => documents::last_name,
            "first_name" => documents::first_name,
        }
    )
    .then_order_by(documents::document_id.asc());

    let items: Vec<Document> = load_documents(conn, paginate(query, params))?;
    Ok(Page { count, items })
}

/// Documents expiring after `today` and no later than `today + days`,
/// soonest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_documents_expiring_within(
    conn: &mut SqliteConnection,
    today: Date,
    days: i64,
) -> Result<Vec<Document>, PersistenceError> {
    let horizon: Date = i64::from(today.to_julian_day())
        .checked_add(days)
        .and_then(|day| i32::try_from(day).ok())
        .and_then(|day| Date::from_julian_day(day).ok())
        .unwrap_or(Date::MAX);
    let query = documents::table
        .filter(documents::expiry_date.gt(format_date(today)))
        .filter(documents::expiry_date.le(format_date(horizon)))
        .order((documents::expiry_date.asc(), documents::document_id.asc()))
        .into_boxed();
    load_documents(conn, query)
}

/// Documents whose expiry date is before `today`, most recently expired first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_expired_documents(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<Vec<Document>, PersistenceError> {
    let query = documents::table
        .filter(documents::expiry_date.lt(format_date(today)))
        .order((documents::expiry_date.desc(), documents::document_id.asc()))
        .into_boxed();
    load_documents(conn, query)
}

/// Every document's type and expiry date, for statistics.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is invalid.
pub fn document_types_and_expiry(
    conn: &mut SqliteConnection,
) -> Result<Vec<(DocumentType, Option<Date>)>, PersistenceError> {
    let rows: Vec<(String, Option<String>)> = documents::table
        .select((documents::document_type, documents::expiry_date))
        .load(conn)?;

    rows.into_iter()
        .map(|(document_type, expiry)| {
            Ok((
                DocumentType::from_str(&document_type)?,
                expiry
                    .as_deref()
                    .map(|value| stored_date("expiry_date", value))
                    .transpose()?,
            ))
        })
        .collect()
}
