// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CatalogItem, CatalogKind, Money, ValidityWindow, catalog_statistics};
use time::macros::date;

fn item(price: i64, window: ValidityWindow) -> CatalogItem {
    CatalogItem {
        id: None,
        kind: CatalogKind::Goods,
        name: String::from("Mineral water"),
        price: Money::from_minor(price),
        window,
    }
}

#[test]
fn test_price_must_be_positive() {
    assert!(item(500, ValidityWindow::unbounded()).validate().is_ok());
    let err = item(0, ValidityWindow::unbounded()).validate().unwrap_err();
    assert_eq!(err.field(), Some("price"));
}

#[test]
fn test_statistics_over_items() {
    let expired =
        ValidityWindow::new(Some(date!(2025 - 01 - 01)), Some(date!(2025 - 12 - 31))).unwrap();
    let items = [
        item(500, ValidityWindow::unbounded()),
        item(1500, ValidityWindow::unbounded()),
        item(1000, expired),
    ];
    let stats = catalog_statistics(&items, date!(2026 - 03 - 01));
    assert_eq!(stats.total, 3);
    assert_eq!(stats.relevant, 2);
    assert_eq!(stats.total_price, Money::from_minor(3000));
    assert_eq!(stats.average_price, Some(Money::from_minor(1000)));
    assert_eq!(stats.max_price, Some(Money::from_minor(1500)));
    assert_eq!(stats.min_price, Some(Money::from_minor(500)));
}

#[test]
fn test_statistics_of_empty_catalog() {
    let stats = catalog_statistics(&[], date!(2026 - 03 - 01));
    assert_eq!(stats.total, 0);
    assert_eq!(stats.average_price, None);
    assert_eq!(stats.max_price, None);
}
