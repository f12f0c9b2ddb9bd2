// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room type, room and room condition DTOs.

use super::{default_true, double_option};

/// Full room type payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomTypeRequest {
    pub title: String,
    /// Nightly rate in minor units.
    pub price: i64,
    /// First day the rate applies (`YYYY-MM-DD`).
    #[serde(default)]
    pub relevant_from: Option<String>,
    /// Last day the rate applies (`YYYY-MM-DD`).
    #[serde(default)]
    pub relevant_to: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial room type update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomTypePatch {
    pub title: Option<String>,
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub relevant_from: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub relevant_to: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// A room type as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomTypeView {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub relevant_from: Option<String>,
    pub relevant_to: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    /// Whether today falls inside the validity window.
    pub is_relevant: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Room type list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomTypeFilterQuery {
    pub is_active: Option<bool>,
}

/// Full room payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomRequest {
    /// Room number (unique).
    pub number: i64,
    #[serde(default)]
    pub floor: Option<i64>,
    #[serde(default)]
    pub room_type_ids: Vec<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial room update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomPatch {
    pub number: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub floor: Option<Option<i64>>,
    pub room_type_ids: Option<Vec<i64>>,
    pub is_active: Option<bool>,
}

/// A room as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomView {
    pub id: i64,
    pub number: i64,
    pub floor: Option<i64>,
    pub room_type_ids: Vec<i64>,
    pub is_active: bool,
}

/// Room list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomFilterQuery {
    pub floor: Option<i64>,
    pub is_active: Option<bool>,
    pub room_type_id: Option<i64>,
}

/// Full room condition payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomConditionRequest {
    /// Label (unique).
    pub label: String,
    /// `#RRGGBB`; defaults to grey.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Partial room condition update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomConditionPatch {
    pub label: Option<String>,
    pub color: Option<String>,
    pub is_available: Option<bool>,
}

/// A room condition as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomConditionView {
    pub id: i64,
    pub label: String,
    pub color: String,
    pub is_available: bool,
}

/// Room condition list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomConditionFilterQuery {
    pub is_available: Option<bool>,
}
