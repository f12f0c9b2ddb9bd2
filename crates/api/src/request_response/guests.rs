// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest DTOs.

use super::double_option;

/// Full guest payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuestRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub nationality_id: i64,
    /// Identity documents linked to the guest.
    #[serde(default)]
    pub document_ids: Vec<i64>,
    /// Phone number, unique among guests.
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// `M`, `F` or `O`.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blacklisted: bool,
    /// Required when `blacklisted` is set.
    #[serde(default)]
    pub blacklist_reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial guest update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuestPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub middle_name: Option<Option<String>>,
    pub nationality_id: Option<i64>,
    pub document_ids: Option<Vec<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub gender: Option<Option<String>>,
    pub blacklisted: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub blacklist_reason: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// A guest as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuestView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub full_name: String,
    pub nationality_id: i64,
    pub document_ids: Vec<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    /// Age in whole years as of today.
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub blacklisted: bool,
    pub blacklist_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Guest list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuestFilterQuery {
    pub nationality_id: Option<i64>,
    pub gender: Option<String>,
    pub blacklisted: Option<bool>,
}

/// Body of `POST /guests/{id}/blacklist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlacklistRequest {
    #[serde(default)]
    pub reason: String,
}

/// Result of `GET /guests/{id}/eligibility`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EligibilityView {
    pub guest_id: i64,
    pub can_book: bool,
    pub reason: String,
}
