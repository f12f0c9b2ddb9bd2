// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goods and services share one table; every query is scoped to a kind.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use innkeep_domain::{CatalogItem, CatalogKind, Money, ValidityWindow, format_date};
use std::str::FromStr;

use crate::data_models::{CatalogFilter, ListParams, Page};
use crate::diesel_schema::catalog_items;
use crate::error::PersistenceError;
use crate::queries::{paginate, search_pattern, stored_optional_date};

#[derive(Queryable, Selectable)]
#[diesel(table_name = catalog_items)]
pub(crate) struct CatalogItemRow {
    item_id: i64,
    kind: String,
    name: String,
    price: i64,
    relevant_from: Option<String>,
    relevant_to: Option<String>,
}

impl TryFrom<CatalogItemRow> for CatalogItem {
    type Error = PersistenceError;

    fn try_from(row: CatalogItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.item_id),
            kind: CatalogKind::from_str(&row.kind)?,
            name: row.name,
            price: Money::from_minor(row.price),
            window: ValidityWindow::new(
                stored_optional_date("relevant_from", row.relevant_from.as_deref())?,
                stored_optional_date("relevant_to", row.relevant_to.as_deref())?,
            )?,
        })
    }
}

/// Retrieves a catalog item of the given kind by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_catalog_item(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    item_id: i64,
) -> Result<Option<CatalogItem>, PersistenceError> {
    catalog_items::table
        .find(item_id)
        .filter(catalog_items::kind.eq(kind.as_str()))
        .select(CatalogItemRow::as_select())
        .first(conn)
        .optional()?
        .map(CatalogItem::try_from)
        .transpose()
}

/// Loads the items of one kind with the given IDs.
///
/// Missing IDs are simply absent from the result.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn get_catalog_items(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
    item_ids: &[i64],
) -> Result<Vec<CatalogItem>, PersistenceError> {
    catalog_items::table
        .filter(catalog_items::kind.eq(kind.as_str()))
        .filter(catalog_items::item_id.eq_any(item_ids))
        .order(catalog_items::item_id.asc())
        .select(CatalogItemRow::as_select())
        .load::<CatalogItemRow>(conn)?
        .into_iter()
        .map(CatalogItem::try_from)
        .collect()
}

fn filtered_items(
    params: &ListParams,
    filter: CatalogFilter,
) -> catalog_items::BoxedQuery<'static, Sqlite> {
    let mut query = catalog_items::table
        .filter(catalog_items::kind.eq(filter.kind.as_str()))
        .into_boxed();
    if let Some(today) = filter.relevant_on {
        let today: String = format_date(today);
        query = query
            .filter(
                catalog_items::relevant_from
                    .is_null()
                    .or(catalog_items::relevant_from.assume_not_null().le(today.clone())),
            )
            .filter(
                catalog_items::relevant_to
                    .is_null()
                    .or(catalog_items::relevant_to.assume_not_null().ge(today)),
            );
    }
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(catalog_items::name.like(pattern));
    }
    query
}

/// Lists goods or services. Searches the name; default ordering is by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_catalog_items(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: CatalogFilter,
) -> Result<Page<CatalogItem>, PersistenceError> {
    let count: i64 = filtered_items(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_items(params, filter),
        params.ordering.as_deref().unwrap_or("id"),
        {
            "id" => catalog_items::item_id,
            "name" => catalog_items::name,
            "price" => catalog_items::price,
        }
    )
    .then_order_by(catalog_items::item_id.asc());

    let items: Vec<CatalogItem> = paginate(query, params)
        .select(CatalogItemRow::as_select())
        .load::<CatalogItemRow>(conn)?
        .into_iter()
        .map(CatalogItem::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}

/// Every item of one kind, for statistics.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn all_catalog_items(
    conn: &mut SqliteConnection,
    kind: CatalogKind,
) -> Result<Vec<CatalogItem>, PersistenceError> {
    catalog_items::table
        .filter(catalog_items::kind.eq(kind.as_str()))
        .order(catalog_items::item_id.asc())
        .select(CatalogItemRow::as_select())
        .load::<CatalogItemRow>(conn)?
        .into_iter()
        .map(CatalogItem::try_from)
        .collect()
}
