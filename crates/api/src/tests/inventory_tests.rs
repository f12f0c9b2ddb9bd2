// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rooms, room types, conditions and the catalog.

use innkeep_domain::CatalogKind;

use super::helpers::{card_with_extras, item_request, now, seeded};
use crate::error::ApiError;
use crate::handlers::bookings::get_booking_card;
use crate::handlers::catalog::{
    create_item, get_item, item_statistics, list_relevant_items,
};
use crate::handlers::inventory::{
    create_room_condition, create_room_type, list_relevant_room_types, patch_room,
    patch_room_type,
};
use crate::request_response::ListQuery;
use crate::request_response::catalog::CatalogItemRequest;
use crate::request_response::inventory::{
    RoomConditionRequest, RoomPatch, RoomTypePatch, RoomTypeRequest,
};

#[test]
fn test_room_type_price_change_marks_cards_stale() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);

    patch_room_type(
        &mut persistence,
        fixture.room_type_id,
        RoomTypePatch {
            price: Some(12_000),
            ..RoomTypePatch::default()
        },
        now(),
    )
    .unwrap();
    assert!(get_booking_card(&mut persistence, card_id).unwrap().total_is_stale);
}

#[test]
fn test_room_type_rename_keeps_cards_fresh() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);

    patch_room_type(
        &mut persistence,
        fixture.room_type_id,
        RoomTypePatch {
            title: Some(String::from("Standard Plus")),
            ..RoomTypePatch::default()
        },
        now(),
    )
    .unwrap();
    assert!(!get_booking_card(&mut persistence, card_id).unwrap().total_is_stale);
}

#[test]
fn test_room_type_change_marks_cards_stale() {
    let (mut persistence, fixture) = seeded();
    let card_id = card_with_extras(&mut persistence, &fixture);
    let suite = create_room_type(
        &mut persistence,
        RoomTypeRequest {
            title: String::from("Suite"),
            price: 25_000,
            relevant_from: None,
            relevant_to: None,
            description: None,
            is_active: true,
        },
        now(),
    )
    .unwrap()
    .id;

    patch_room(
        &mut persistence,
        fixture.room_id,
        RoomPatch {
            room_type_ids: Some(vec![suite]),
            ..RoomPatch::default()
        },
        now(),
    )
    .unwrap();
    assert!(get_booking_card(&mut persistence, card_id).unwrap().total_is_stale);
}

#[test]
fn test_unknown_room_type_reference_is_invalid_input() {
    let (mut persistence, fixture) = seeded();
    let result = patch_room(
        &mut persistence,
        fixture.room_id,
        RoomPatch {
            room_type_ids: Some(vec![999]),
            ..RoomPatch::default()
        },
        now(),
    );
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "room_type_ids"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_relevance_window_is_inclusive() {
    let (mut persistence, _fixture) = seeded();
    let ends_today = create_room_type(
        &mut persistence,
        RoomTypeRequest {
            title: String::from("Winter Promo"),
            price: 8_000,
            relevant_from: Some(String::from("2026-01-01")),
            relevant_to: Some(String::from("2026-03-10")),
            description: None,
            is_active: true,
        },
        now(),
    )
    .unwrap();
    assert!(ends_today.is_relevant);

    let ended = create_room_type(
        &mut persistence,
        RoomTypeRequest {
            title: String::from("Autumn Promo"),
            price: 8_000,
            relevant_from: None,
            relevant_to: Some(String::from("2026-03-09")),
            description: None,
            is_active: true,
        },
        now(),
    )
    .unwrap();
    assert!(!ended.is_relevant);

    let relevant = list_relevant_room_types(&mut persistence, ListQuery::default(), now()).unwrap();
    assert_eq!(relevant.count, 2);
    assert!(relevant.results.iter().all(|rt| rt.id != ended.id));
}

#[test]
fn test_window_end_before_start_is_invalid() {
    let (mut persistence, _fixture) = seeded();
    let request = CatalogItemRequest {
        relevant_from: Some(String::from("2026-03-10")),
        relevant_to: Some(String::from("2026-03-01")),
        ..item_request("Breakfast", 2000)
    };
    match create_item(&mut persistence, CatalogKind::Service, request, now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "relevant_to"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_room_condition_color_defaults_to_grey() {
    let (mut persistence, _fixture) = seeded();
    let condition = create_room_condition(
        &mut persistence,
        RoomConditionRequest {
            label: String::from("Needs cleaning"),
            color: None,
            is_available: false,
        },
    )
    .unwrap();
    assert_eq!(condition.color, "#808080");

    let result = create_room_condition(
        &mut persistence,
        RoomConditionRequest {
            label: String::from("Ready"),
            color: Some(String::from("green")),
            is_available: true,
        },
    );
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "color"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_catalog_kinds_are_separate() {
    let (mut persistence, _fixture) = seeded();
    let water = create_item(
        &mut persistence,
        CatalogKind::Goods,
        item_request("Water", 500),
        now(),
    )
    .unwrap();
    assert_eq!(water.kind, "goods");

    match get_item(&mut persistence, CatalogKind::Service, water.id, now()) {
        Err(ApiError::ResourceNotFound { .. }) => {}
        other => panic!("Expected ResourceNotFound, got: {other:?}"),
    }
}

#[test]
fn test_catalog_statistics() {
    let (mut persistence, _fixture) = seeded();
    for (name, price) in [("Water", 500), ("Juice", 900), ("Snack", 1000)] {
        create_item(&mut persistence, CatalogKind::Goods, item_request(name, price), now()).unwrap();
    }
    let expired = CatalogItemRequest {
        relevant_to: Some(String::from("2026-02-01")),
        ..item_request("Old Menu", 600)
    };
    create_item(&mut persistence, CatalogKind::Goods, expired, now()).unwrap();

    let stats = item_statistics(&mut persistence, CatalogKind::Goods, now()).unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.relevant, 3);
    assert_eq!(stats.total_price, 3000);
    assert_eq!(stats.max_price, Some(1000));
    assert_eq!(stats.min_price, Some(500));

    let relevant = list_relevant_items(
        &mut persistence,
        CatalogKind::Goods,
        ListQuery::default(),
        now(),
    )
    .unwrap();
    assert_eq!(relevant.count, 3);
}
