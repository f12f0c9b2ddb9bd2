// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goods and services mutations. Both kinds share one table.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{CatalogItem, CatalogKind, format_date};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::catalog_items;
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Inserts a catalog item and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_catalog_item(
    conn: &mut SqliteConnection,
    item: &CatalogItem,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(catalog_items::table)
        .values((
            catalog_items::kind.eq(item.kind.as_str()),
            catalog_items::name.eq(&item.name),
            catalog_items::price.eq(item.price.minor()),
            catalog_items::relevant_from.eq(item.window.from().map(format_date)),
            catalog_items::relevant_to.eq(item.window.to().map(format_date)),
        ))
        .execute(conn)?;
    let item_id: i64 = conn.get_last_insert_rowid()?;
    info!(item_id, kind = item.kind.as_str(), name = %item.name, "Created catalog item");
    Ok(item_id)
}

/// Overwrites an item of the given kind. The kind itself never changes.
///
/// # Errors
///
/// Returns `NotFound` if no item of that kind has the ID, or a database error.
pub fn update_catalog_item(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    item_id: i64,
    item: &CatalogItem,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(
        catalog_items::table
            .filter(catalog_items::item_id.eq(item_id))
            .filter(catalog_items::kind.eq(kind.as_str())),
    )
    .set((
        catalog_items::name.eq(&item.name),
        catalog_items::price.eq(item.price.minor()),
        catalog_items::relevant_from.eq(item.window.from().map(format_date)),
        catalog_items::relevant_to.eq(item.window.to().map(format_date)),
    ))
    .execute(conn)?;
    ensure_affected(rows, kind.as_str(), item_id)
}

/// Deletes an item of the given kind that no card holds.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_catalog_item(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    item_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(
        catalog_items::table
            .filter(catalog_items::item_id.eq(item_id))
            .filter(catalog_items::kind.eq(kind.as_str())),
    )
    .execute(conn)?;
    ensure_affected(rows, kind.as_str(), item_id)?;
    info!(item_id, kind = kind.as_str(), "Deleted catalog item");
    Ok(())
}
