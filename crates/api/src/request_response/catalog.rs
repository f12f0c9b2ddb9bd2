// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goods and services DTOs. Both collections share these shapes.

use super::double_option;

/// Full catalog item payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CatalogItemRequest {
    pub name: String,
    /// Price in minor units.
    pub price: i64,
    #[serde(default)]
    pub relevant_from: Option<String>,
    #[serde(default)]
    pub relevant_to: Option<String>,
}

/// Partial catalog item update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CatalogItemPatch {
    pub name: Option<String>,
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub relevant_from: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub relevant_to: Option<Option<String>>,
}

/// A good or service as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CatalogItemView {
    pub id: i64,
    /// `goods` or `service`.
    pub kind: String,
    pub name: String,
    pub price: i64,
    pub relevant_from: Option<String>,
    pub relevant_to: Option<String>,
    pub is_relevant: bool,
}

/// Catalog statistics as of today. Price figures are `null` when the
/// catalog is empty.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CatalogStatisticsView {
    pub total: u64,
    pub relevant: u64,
    pub total_price: i64,
    pub average_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_price: Option<i64>,
}
