// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nationality and identity document DTOs.

use std::collections::BTreeMap;

use super::double_option;

/// Full nationality payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NationalityRequest {
    /// The nationality name (unique).
    pub name: String,
    /// ISO code, 2 or 3 letters.
    #[serde(default)]
    pub code: Option<String>,
}

/// Partial nationality update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NationalityPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub code: Option<Option<String>>,
}

/// A nationality as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NationalityView {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
}

/// Full document payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentRequest {
    pub nationality_id: i64,
    /// 12-digit national ID (unique).
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// `passport` or `id_card`.
    pub document_type: String,
    pub number: String,
    /// Stored file reference of the scan.
    #[serde(default)]
    pub scan_path: Option<String>,
    /// External URL of the scan.
    #[serde(default)]
    pub scan_url: Option<String>,
    #[serde(default)]
    pub issued_by: Option<String>,
    #[serde(default)]
    pub issued_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial document update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentPatch {
    pub nationality_id: Option<i64>,
    pub national_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub middle_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<String>>,
    pub document_type: Option<String>,
    pub number: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub scan_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub scan_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub issued_by: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub issued_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// A document as returned by the API, with its expiry state as of today.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentView {
    pub id: i64,
    pub nationality_id: i64,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    /// "last first [middle]".
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub document_type: String,
    pub number: String,
    pub scan_path: Option<String>,
    pub scan_url: Option<String>,
    pub issued_by: Option<String>,
    pub issued_date: Option<String>,
    pub expiry_date: Option<String>,
    pub notes: Option<String>,
    pub is_expired: bool,
    pub days_until_expiry: Option<i64>,
    pub is_expiring_soon: bool,
    pub uploaded_at: String,
    pub updated_at: String,
}

/// Document list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentFilterQuery {
    pub nationality_id: Option<i64>,
    pub document_type: Option<String>,
}

/// Query of `GET /documents/by-national-id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NationalIdQuery {
    pub national_id: Option<String>,
}

/// Document statistics as of today.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentStatisticsView {
    pub total: u64,
    /// Count per document type name.
    pub by_type: BTreeMap<String, u64>,
    pub expired: u64,
    pub expiring_soon: u64,
    pub valid: u64,
}

/// Result of `GET /documents/{id}/verify`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentVerificationView {
    pub document_id: i64,
    pub is_valid: bool,
    pub is_expired: bool,
    pub days_until_expiry: Option<i64>,
    pub is_expiring_soon: bool,
    pub warnings: Vec<String>,
}
