// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{CatalogKind, Money, ValidityWindow};
use time::macros::date;

use super::{catalog_item, room, room_condition, room_type, seeded};
use crate::{
    CatalogFilter, ListParams, PersistenceError, RoomConditionFilter, RoomFilter, RoomTypeFilter,
    SqlitePersistence,
};

#[test]
fn test_room_round_trip_with_types() {
    let (mut persistence, fixture) = seeded();
    let deluxe = persistence
        .insert_room_type(&room_type("Deluxe", 18_000))
        .unwrap();
    let room_id = persistence
        .insert_room(&room(205, vec![deluxe, fixture.room_type_id]))
        .unwrap();

    let stored = persistence.get_room(room_id).unwrap().unwrap();
    assert_eq!(stored.number, 205);
    assert_eq!(stored.floor, Some(2));
    assert_eq!(stored.room_type_ids, vec![fixture.room_type_id, deluxe]);

    let mut changed = stored.clone();
    changed.room_type_ids = vec![deluxe];
    changed.is_active = false;
    persistence.update_room(room_id, &changed).unwrap();

    let stored = persistence.get_room(room_id).unwrap().unwrap();
    assert_eq!(stored.room_type_ids, vec![deluxe]);
    assert!(!stored.is_active);
}

#[test]
fn test_duplicate_room_number_names_field() {
    let (mut persistence, fixture) = seeded();
    let result = persistence.insert_room(&room(101, vec![fixture.room_type_id]));
    assert!(matches!(
        result,
        Err(PersistenceError::UniqueViolation { field: Some(ref f), .. }) if f == "number"
    ));
}

#[test]
fn test_room_type_in_use_cannot_be_deleted() {
    let (mut persistence, fixture) = seeded();
    assert!(matches!(
        persistence.delete_room_type(fixture.room_type_id),
        Err(PersistenceError::ReferencedRecord(_))
    ));

    persistence.delete_room(fixture.room_id).unwrap();
    persistence.delete_room_type(fixture.room_type_id).unwrap();
    assert!(persistence.get_room_type(fixture.room_type_id).unwrap().is_none());
}

#[test]
fn test_nightly_rate_uses_lowest_room_type_id() {
    let (mut persistence, fixture) = seeded();
    let suite = persistence.insert_room_type(&room_type("Suite", 5_000)).unwrap();
    let bare = persistence.insert_room(&room(102, Vec::new())).unwrap();
    persistence
        .update_room(fixture.room_id, &room(101, vec![suite, fixture.room_type_id]))
        .unwrap();

    let rates = persistence.nightly_rates(&[fixture.room_id, bare]).unwrap();
    assert_eq!(rates.get(&fixture.room_id), Some(&Money::from_minor(10_000)));
    assert!(!rates.contains_key(&bare));
}

#[test]
fn test_room_type_relevance_filter() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let mut summer = room_type("Summer", 12_000);
    summer.window = ValidityWindow::new(Some(date!(2026 - 06 - 01)), Some(date!(2026 - 08 - 31))).unwrap();
    persistence.insert_room_type(&summer).unwrap();
    persistence.insert_room_type(&room_type("Standard", 10_000)).unwrap();
    let mut retired = room_type("Retired", 9_000);
    retired.is_active = false;
    persistence.insert_room_type(&retired).unwrap();

    let in_march = RoomTypeFilter {
        is_active: Some(true),
        relevant_on: Some(date!(2026 - 03 - 10)),
    };
    let page = persistence.list_room_types(&ListParams::default(), in_march).unwrap();
    let titles: Vec<&str> = page.items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Standard"]);

    let on_last_day = RoomTypeFilter {
        is_active: Some(true),
        relevant_on: Some(date!(2026 - 08 - 31)),
    };
    let page = persistence.list_room_types(&ListParams::default(), on_last_day).unwrap();
    assert_eq!(page.count, 2);

    let stored = persistence
        .list_room_types(&ListParams::default(), RoomTypeFilter::default())
        .unwrap();
    let summer = stored.items.iter().find(|t| t.title == "Summer").unwrap();
    assert_eq!(summer.window.from(), Some(date!(2026 - 06 - 01)));
    assert_eq!(summer.window.to(), Some(date!(2026 - 08 - 31)));
}

#[test]
fn test_rooms_filter_by_type_and_floor() {
    let (mut persistence, fixture) = seeded();
    let deluxe = persistence.insert_room_type(&room_type("Deluxe", 18_000)).unwrap();
    persistence.insert_room(&room(201, vec![deluxe])).unwrap();
    persistence.insert_room(&room(202, vec![deluxe])).unwrap();

    let by_type = RoomFilter {
        room_type_id: Some(fixture.room_type_id),
        ..RoomFilter::default()
    };
    let page = persistence.list_rooms(&ListParams::default(), by_type).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].number, 101);

    let by_floor = RoomFilter {
        floor: Some(2),
        ..RoomFilter::default()
    };
    let page = persistence.list_rooms(&ListParams::default(), by_floor).unwrap();
    assert_eq!(page.count, 2);
}

#[test]
fn test_room_conditions() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let clean = persistence.insert_room_condition(&room_condition("Clean")).unwrap();
    let mut repair = room_condition("Under repair");
    repair.is_available = false;
    repair.color = "#FF0000".to_string();
    persistence.insert_room_condition(&repair).unwrap();

    let available = RoomConditionFilter {
        is_available: Some(true),
    };
    let page = persistence
        .list_room_conditions(&ListParams::default(), available)
        .unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].id, Some(clean));

    let duplicate = persistence.insert_room_condition(&room_condition("Clean"));
    assert!(matches!(
        duplicate,
        Err(PersistenceError::UniqueViolation { field: Some(ref f), .. }) if f == "label"
    ));
}

#[test]
fn test_catalog_kinds_are_separate() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let water = persistence
        .insert_catalog_item(&catalog_item(CatalogKind::Goods, "Water", 500))
        .unwrap();
    let laundry = persistence
        .insert_catalog_item(&catalog_item(CatalogKind::Service, "Laundry", 1_500))
        .unwrap();

    assert!(persistence.get_catalog_item(CatalogKind::Goods, water).unwrap().is_some());
    assert!(persistence.get_catalog_item(CatalogKind::Service, water).unwrap().is_none());

    let goods = CatalogFilter {
        kind: CatalogKind::Goods,
        relevant_on: None,
    };
    let page = persistence.list_catalog_items(&ListParams::default(), goods).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].name, "Water");

    let services = persistence
        .get_catalog_items(CatalogKind::Service, &[water, laundry])
        .unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].id, Some(laundry));
}

#[test]
fn test_catalog_writes_respect_kind() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let water = persistence
        .insert_catalog_item(&catalog_item(CatalogKind::Goods, "Water", 500))
        .unwrap();

    let renamed = catalog_item(CatalogKind::Goods, "Sparkling water", 700);
    assert!(matches!(
        persistence.update_catalog_item(CatalogKind::Service, water, &renamed),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.delete_catalog_item(CatalogKind::Service, water),
        Err(PersistenceError::NotFound(_))
    ));

    persistence
        .update_catalog_item(CatalogKind::Goods, water, &renamed)
        .unwrap();
    let stored = persistence
        .get_catalog_item(CatalogKind::Goods, water)
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Sparkling water");
    assert_eq!(stored.price, Money::from_minor(700));
}
