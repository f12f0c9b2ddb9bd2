// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nationality and identity document handlers.

use innkeep_domain::{
    Document, DocumentStatistics, DocumentType, DocumentVerification, EXPIRY_WARNING_DAYS,
    ExpiryStatus, MAX_EXPIRY_WARNING_DAYS, NationalId, Nationality, document_statistics,
    format_date, format_timestamp, parse_optional_date,
};
use innkeep_persistence::{DocumentFilter, Page, SqlitePersistence};
use time::Date;

use super::{Now, found, id_of, list_params, non_blank, parse_choice, parse_optional_choice, referenced};
use crate::error::ApiError;
use crate::request_response::documents::{
    DocumentFilterQuery, DocumentPatch, DocumentRequest, DocumentStatisticsView,
    DocumentVerificationView, DocumentView, NationalIdQuery, NationalityPatch, NationalityRequest,
    NationalityView,
};
use crate::request_response::{DaysQuery, ListQuery, ListResponse, merge};

impl From<Nationality> for NationalityView {
    fn from(nationality: Nationality) -> Self {
        Self {
            id: id_of(nationality.id),
            name: nationality.name,
            code: nationality.code,
        }
    }
}

fn document_view(document: Document, today: Date) -> DocumentView {
    let status: ExpiryStatus = document.expiry(today);
    DocumentView {
        id: id_of(document.id),
        nationality_id: document.nationality_id,
        national_id: document.national_id.as_str().to_string(),
        full_name: document.full_name(),
        first_name: document.first_name,
        last_name: document.last_name,
        middle_name: document.middle_name,
        date_of_birth: document.date_of_birth.map(format_date),
        document_type: document.document_type.as_str().to_string(),
        number: document.number,
        scan_path: document.scan_path,
        scan_url: document.scan_url,
        issued_by: document.issued_by,
        issued_date: document.issued_date.map(format_date),
        expiry_date: document.expiry_date.map(format_date),
        notes: document.notes,
        is_expired: status.is_expired,
        days_until_expiry: status.days_until_expiry,
        is_expiring_soon: status.is_expiring_soon,
        uploaded_at: format_timestamp(document.uploaded_at),
        updated_at: format_timestamp(document.updated_at),
    }
}

fn document_list(documents: Vec<Document>, today: Date) -> ListResponse<DocumentView> {
    ListResponse::all(
        documents
            .into_iter()
            .map(|d| document_view(d, today))
            .collect(),
    )
}

fn warning_days(query: DaysQuery) -> Result<i64, ApiError> {
    match query.days {
        Some(days) if days < 0 => Err(ApiError::invalid("days", "Must not be negative")),
        Some(days) if days > MAX_EXPIRY_WARNING_DAYS => Err(ApiError::invalid(
            "days",
            format!("Must not exceed {MAX_EXPIRY_WARNING_DAYS}"),
        )),
        Some(days) => Ok(days),
        None => Ok(EXPIRY_WARNING_DAYS),
    }
}

// ========================================================================
// Nationalities
// ========================================================================

fn nationality_from_request(id: Option<i64>, request: NationalityRequest) -> Result<Nationality, ApiError> {
    let nationality: Nationality = Nationality {
        id,
        name: request.name.trim().to_string(),
        code: non_blank(request.code).map(|c| c.to_uppercase()),
    };
    nationality.validate()?;
    Ok(nationality)
}

/// Lists nationalities.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_nationalities(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
) -> Result<ListResponse<NationalityView>, ApiError> {
    let page: Page<Nationality> = persistence.list_nationalities(&list_params(query)?)?;
    Ok(ListResponse::from(page.map(NationalityView::from)))
}

/// Retrieves one nationality.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_nationality(
    persistence: &mut SqlitePersistence,
    nationality_id: i64,
) -> Result<NationalityView, ApiError> {
    let nationality: Nationality = found(
        persistence.get_nationality(nationality_id)?,
        "Nationality",
        nationality_id,
    )?;
    Ok(NationalityView::from(nationality))
}

/// Creates a nationality.
///
/// # Errors
///
/// Returns an error for a blank or duplicate name, or a malformed code.
pub fn create_nationality(
    persistence: &mut SqlitePersistence,
    request: NationalityRequest,
) -> Result<NationalityView, ApiError> {
    let mut nationality: Nationality = nationality_from_request(None, request)?;
    nationality.id = Some(persistence.insert_nationality(&nationality)?);
    Ok(NationalityView::from(nationality))
}

/// Replaces a nationality.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_nationality(
    persistence: &mut SqlitePersistence,
    nationality_id: i64,
    request: NationalityRequest,
) -> Result<NationalityView, ApiError> {
    found(
        persistence.get_nationality(nationality_id)?,
        "Nationality",
        nationality_id,
    )?;
    let nationality: Nationality = nationality_from_request(Some(nationality_id), request)?;
    persistence.update_nationality(nationality_id, &nationality)?;
    Ok(NationalityView::from(nationality))
}

/// Partially updates a nationality.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_nationality(
    persistence: &mut SqlitePersistence,
    nationality_id: i64,
    patch: NationalityPatch,
) -> Result<NationalityView, ApiError> {
    let existing: Nationality = found(
        persistence.get_nationality(nationality_id)?,
        "Nationality",
        nationality_id,
    )?;
    let mut request: NationalityRequest = NationalityRequest {
        name: existing.name,
        code: existing.code,
    };
    merge(&mut request.name, patch.name);
    merge(&mut request.code, patch.code);
    update_nationality(persistence, nationality_id, request)
}

/// Deletes a nationality no document or guest uses.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_nationality(
    persistence: &mut SqlitePersistence,
    nationality_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_nationality(nationality_id)?;
    Ok(())
}

/// Lists the documents issued under a nationality.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown nationality.
pub fn list_nationality_documents(
    persistence: &mut SqlitePersistence,
    nationality_id: i64,
    query: ListQuery,
    now: Now,
) -> Result<ListResponse<DocumentView>, ApiError> {
    found(
        persistence.get_nationality(nationality_id)?,
        "Nationality",
        nationality_id,
    )?;
    list_documents(
        persistence,
        query,
        DocumentFilterQuery {
            nationality_id: Some(nationality_id),
            document_type: None,
        },
        now,
    )
}

// ========================================================================
// Documents
// ========================================================================

/// Builds a validated document from a request, keeping the timestamps of
/// `existing` when replacing.
fn document_from_request(
    persistence: &mut SqlitePersistence,
    request: DocumentRequest,
    existing: Option<&Document>,
    now: Now,
) -> Result<Document, ApiError> {
    referenced(
        persistence.get_nationality(request.nationality_id)?,
        "nationality_id",
        request.nationality_id,
    )?;
    let document: Document = Document {
        id: existing.and_then(|d| d.id),
        nationality_id: request.nationality_id,
        national_id: NationalId::parse(request.national_id.trim())?,
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        middle_name: non_blank(request.middle_name),
        date_of_birth: parse_optional_date("date_of_birth", request.date_of_birth.as_deref())?,
        document_type: parse_choice::<DocumentType>(&request.document_type)?,
        number: request.number.trim().to_string(),
        scan_path: non_blank(request.scan_path),
        scan_url: non_blank(request.scan_url),
        issued_by: non_blank(request.issued_by),
        issued_date: parse_optional_date("issued_date", request.issued_date.as_deref())?,
        expiry_date: parse_optional_date("expiry_date", request.expiry_date.as_deref())?,
        notes: non_blank(request.notes),
        uploaded_at: existing.map_or(now.instant, |d| d.uploaded_at),
        updated_at: now.instant,
    };
    document.validate()?;
    Ok(document)
}

fn request_from_document(document: Document) -> DocumentRequest {
    DocumentRequest {
        nationality_id: document.nationality_id,
        national_id: document.national_id.as_str().to_string(),
        first_name: document.first_name,
        last_name: document.last_name,
        middle_name: document.middle_name,
        date_of_birth: document.date_of_birth.map(format_date),
        document_type: document.document_type.as_str().to_string(),
        number: document.number,
        scan_path: document.scan_path,
        scan_url: document.scan_url,
        issued_by: document.issued_by,
        issued_date: document.issued_date.map(format_date),
        expiry_date: document.expiry_date.map(format_date),
        notes: document.notes,
    }
}

/// Lists documents.
///
/// # Errors
///
/// Returns an error for an unknown document type, invalid list
/// parameters, or a failed query.
pub fn list_documents(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: DocumentFilterQuery,
    now: Now,
) -> Result<ListResponse<DocumentView>, ApiError> {
    let filter: DocumentFilter = DocumentFilter {
        nationality_id: filter.nationality_id,
        document_type: parse_optional_choice(filter.document_type.as_deref())?,
    };
    let page: Page<Document> = persistence.list_documents(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(|d| document_view(d, now.today))))
}

/// Retrieves one document.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_document(
    persistence: &mut SqlitePersistence,
    document_id: i64,
    now: Now,
) -> Result<DocumentView, ApiError> {
    let document: Document = found(persistence.get_document(document_id)?, "Document", document_id)?;
    Ok(document_view(document, now.today))
}

/// Registers a document.
///
/// # Errors
///
/// Returns an error for invalid input, an unknown nationality, or a
/// national ID already on file.
pub fn create_document(
    persistence: &mut SqlitePersistence,
    request: DocumentRequest,
    now: Now,
) -> Result<DocumentView, ApiError> {
    let mut document: Document = document_from_request(persistence, request, None, now)?;
    document.id = Some(persistence.insert_document(&document)?);
    Ok(document_view(document, now.today))
}

/// Replaces a document.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_document(
    persistence: &mut SqlitePersistence,
    document_id: i64,
    request: DocumentRequest,
    now: Now,
) -> Result<DocumentView, ApiError> {
    let existing: Document = found(persistence.get_document(document_id)?, "Document", document_id)?;
    let document: Document = document_from_request(persistence, request, Some(&existing), now)?;
    persistence.update_document(document_id, &document)?;
    Ok(document_view(document, now.today))
}

/// Partially updates a document.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_document(
    persistence: &mut SqlitePersistence,
    document_id: i64,
    patch: DocumentPatch,
    now: Now,
) -> Result<DocumentView, ApiError> {
    let existing: Document = found(persistence.get_document(document_id)?, "Document", document_id)?;
    let mut request: DocumentRequest = request_from_document(existing);
    merge(&mut request.nationality_id, patch.nationality_id);
    merge(&mut request.national_id, patch.national_id);
    merge(&mut request.first_name, patch.first_name);
    merge(&mut request.last_name, patch.last_name);
    merge(&mut request.middle_name, patch.middle_name);
    merge(&mut request.date_of_birth, patch.date_of_birth);
    merge(&mut request.document_type, patch.document_type);
    merge(&mut request.number, patch.number);
    merge(&mut request.scan_path, patch.scan_path);
    merge(&mut request.scan_url, patch.scan_url);
    merge(&mut request.issued_by, patch.issued_by);
    merge(&mut request.issued_date, patch.issued_date);
    merge(&mut request.expiry_date, patch.expiry_date);
    merge(&mut request.notes, patch.notes);
    update_document(persistence, document_id, request, now)
}

/// Deletes a document. Guest links to it are removed with it.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn delete_document(persistence: &mut SqlitePersistence, document_id: i64) -> Result<(), ApiError> {
    persistence.delete_document(document_id)?;
    Ok(())
}

/// Lists documents expiring within `days` (default 30), excluding those
/// already expired.
///
/// # Errors
///
/// Returns an error for a negative day count or a failed query.
pub fn list_expiring_documents(
    persistence: &mut SqlitePersistence,
    query: DaysQuery,
    now: Now,
) -> Result<ListResponse<DocumentView>, ApiError> {
    let days: i64 = warning_days(query)?;
    let documents: Vec<Document> = persistence.list_documents_expiring_within(now.today, days)?;
    Ok(document_list(documents, now.today))
}

/// Lists documents whose expiry date has passed.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_expired_documents(
    persistence: &mut SqlitePersistence,
    now: Now,
) -> Result<ListResponse<DocumentView>, ApiError> {
    let documents: Vec<Document> = persistence.list_expired_documents(now.today)?;
    Ok(document_list(documents, now.today))
}

/// Counts documents by type and expiry state.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn document_statistics_view(
    persistence: &mut SqlitePersistence,
    now: Now,
) -> Result<DocumentStatisticsView, ApiError> {
    let stats: DocumentStatistics =
        document_statistics(persistence.document_types_and_expiry()?, now.today);
    Ok(DocumentStatisticsView {
        total: stats.total,
        by_type: stats
            .by_type
            .into_iter()
            .map(|(t, count)| (t.as_str().to_string(), count))
            .collect(),
        expired: stats.expired,
        expiring_soon: stats.expiring_soon,
        valid: stats.valid,
    })
}

/// Looks a document up by national ID.
///
/// # Errors
///
/// Returns `InvalidInput` when the ID is missing or malformed and
/// `ResourceNotFound` when no document carries it.
pub fn find_document_by_national_id(
    persistence: &mut SqlitePersistence,
    query: NationalIdQuery,
    now: Now,
) -> Result<DocumentView, ApiError> {
    let raw: String = non_blank(query.national_id)
        .ok_or_else(|| ApiError::invalid("national_id", "This query parameter is required"))?;
    let national_id: NationalId = NationalId::parse(&raw)?;
    let document: Document = persistence
        .get_document_by_national_id(&national_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Document"),
            message: format!("No document with national ID {national_id}"),
        })?;
    Ok(document_view(document, now.today))
}

/// Checks a document for expiry and missing data.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID or an error for a negative
/// day count.
pub fn verify_document(
    persistence: &mut SqlitePersistence,
    document_id: i64,
    query: DaysQuery,
    now: Now,
) -> Result<DocumentVerificationView, ApiError> {
    let days: i64 = warning_days(query)?;
    let document: Document = found(persistence.get_document(document_id)?, "Document", document_id)?;
    let verification: DocumentVerification = document.verify(now.today, days);
    Ok(DocumentVerificationView {
        document_id,
        is_valid: verification.is_valid,
        is_expired: verification.status.is_expired,
        days_until_expiry: verification.status.days_until_expiry,
        is_expiring_soon: verification.status.is_expiring_soon,
        warnings: verification.warnings,
    })
}
