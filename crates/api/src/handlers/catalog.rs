// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goods and services handlers.
//!
//! Both collections share one set of handlers keyed by [`CatalogKind`];
//! an item of one kind is not visible through the other collection.

use innkeep_domain::{
    CatalogItem, CatalogKind, CatalogStatistics, Money, ValidityWindow, catalog_statistics,
    format_date, parse_optional_date,
};
use innkeep_persistence::{CatalogFilter, Page, SqlitePersistence};
use time::Date;

use super::{Now, id_of, list_params};
use crate::error::ApiError;
use crate::request_response::catalog::{
    CatalogItemPatch, CatalogItemRequest, CatalogItemView, CatalogStatisticsView,
};
use crate::request_response::{ListQuery, ListResponse, merge};

const fn resource_name(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Goods => "Goods",
        CatalogKind::Service => "Service",
    }
}

fn item_view(item: CatalogItem, today: Date) -> CatalogItemView {
    CatalogItemView {
        id: id_of(item.id),
        is_relevant: item.is_relevant(today),
        kind: item.kind.as_str().to_string(),
        name: item.name,
        price: item.price.minor(),
        relevant_from: item.window.from().map(format_date),
        relevant_to: item.window.to().map(format_date),
    }
}

fn find_item(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    item_id: i64,
) -> Result<CatalogItem, ApiError> {
    persistence
        .get_catalog_item(kind, item_id)?
        .ok_or_else(|| ApiError::not_found(resource_name(kind), item_id))
}

fn item_from_request(
    kind: CatalogKind,
    id: Option<i64>,
    request: CatalogItemRequest,
) -> Result<CatalogItem, ApiError> {
    let from: Option<Date> = parse_optional_date("relevant_from", request.relevant_from.as_deref())?;
    let to: Option<Date> = parse_optional_date("relevant_to", request.relevant_to.as_deref())?;
    let item: CatalogItem = CatalogItem {
        id,
        kind,
        name: request.name.trim().to_string(),
        price: Money::from_minor(request.price),
        window: ValidityWindow::new(from, to)?,
    };
    item.validate()?;
    Ok(item)
}

fn item_list(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: CatalogFilter,
    today: Date,
) -> Result<ListResponse<CatalogItemView>, ApiError> {
    let page: Page<CatalogItem> = persistence.list_catalog_items(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(|item| item_view(item, today))))
}

/// Lists the items of one kind.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_items(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    query: ListQuery,
    now: Now,
) -> Result<ListResponse<CatalogItemView>, ApiError> {
    let filter: CatalogFilter = CatalogFilter {
        kind,
        relevant_on: None,
    };
    item_list(persistence, query, filter, now.today)
}

/// Lists the items of one kind offered today.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_relevant_items(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    query: ListQuery,
    now: Now,
) -> Result<ListResponse<CatalogItemView>, ApiError> {
    let filter: CatalogFilter = CatalogFilter {
        kind,
        relevant_on: Some(now.today),
    };
    item_list(persistence, query, filter, now.today)
}

/// Retrieves one item.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID or an item of the other
/// kind.
pub fn get_item(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    item_id: i64,
    now: Now,
) -> Result<CatalogItemView, ApiError> {
    let item: CatalogItem = find_item(persistence, kind, item_id)?;
    Ok(item_view(item, now.today))
}

/// Creates an item.
///
/// # Errors
///
/// Returns an error for a blank name, a non-positive price, or a window
/// that ends before it starts.
pub fn create_item(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    request: CatalogItemRequest,
    now: Now,
) -> Result<CatalogItemView, ApiError> {
    let mut item: CatalogItem = item_from_request(kind, None, request)?;
    item.id = Some(persistence.insert_catalog_item(&item)?);
    Ok(item_view(item, now.today))
}

/// Replaces an item.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_item(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    item_id: i64,
    request: CatalogItemRequest,
    now: Now,
) -> Result<CatalogItemView, ApiError> {
    find_item(persistence, kind, item_id)?;
    let item: CatalogItem = item_from_request(kind, Some(item_id), request)?;
    persistence.update_catalog_item(kind, item_id, &item)?;
    Ok(item_view(item, now.today))
}

/// Partially updates an item.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_item(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    item_id: i64,
    patch: CatalogItemPatch,
    now: Now,
) -> Result<CatalogItemView, ApiError> {
    let existing: CatalogItem = find_item(persistence, kind, item_id)?;
    let mut request: CatalogItemRequest = CatalogItemRequest {
        name: existing.name,
        price: existing.price.minor(),
        relevant_from: existing.window.from().map(format_date),
        relevant_to: existing.window.to().map(format_date),
    };
    merge(&mut request.name, patch.name);
    merge(&mut request.price, patch.price);
    merge(&mut request.relevant_from, patch.relevant_from);
    merge(&mut request.relevant_to, patch.relevant_to);
    update_item(persistence, kind, item_id, request, now)
}

/// Deletes an item no booking card holds.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_item(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    item_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_catalog_item(kind, item_id)?;
    Ok(())
}

/// Summarizes the prices of one kind.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn item_statistics(
    persistence: &mut SqlitePersistence,
    kind: CatalogKind,
    now: Now,
) -> Result<CatalogStatisticsView, ApiError> {
    let items: Vec<CatalogItem> = persistence.all_catalog_items(kind)?;
    let stats: CatalogStatistics = catalog_statistics(&items, now.today);
    Ok(CatalogStatisticsView {
        total: stats.total,
        relevant: stats.relevant,
        total_price: stats.total_price.minor(),
        average_price: stats.average_price.map(Money::minor),
        max_price: stats.max_price.map(Money::minor),
        min_price: stats.min_price.map(Money::minor),
    })
}
