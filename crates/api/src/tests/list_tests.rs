// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Search, ordering and pagination on list endpoints.

use super::helpers::{book, guest_request, now, seeded};
use crate::error::ApiError;
use crate::handlers::agents::{create_agent, delete_agent};
use crate::handlers::bookings::list_bookings;
use crate::handlers::guests::{create_guest, delete_guest, list_guests};
use crate::request_response::ListQuery;
use crate::request_response::agents::AgentRequest;
use crate::request_response::bookings::BookingFilterQuery;
use crate::request_response::guests::{GuestFilterQuery, GuestRequest};

fn guest_named(nationality_id: i64, first_name: &str, last_name: &str) -> GuestRequest {
    GuestRequest {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        ..guest_request(nationality_id)
    }
}

#[test]
fn test_negative_limit_is_invalid_input() {
    let (mut persistence, _fixture) = seeded();
    let query = ListQuery {
        limit: Some(-1),
        ..ListQuery::default()
    };
    match list_guests(&mut persistence, query, GuestFilterQuery::default(), now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "limit"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_unknown_ordering_is_invalid_input() {
    let (mut persistence, _fixture) = seeded();
    let query = ListQuery {
        ordering: Some(String::from("password")),
        ..ListQuery::default()
    };
    match list_guests(&mut persistence, query, GuestFilterQuery::default(), now()) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "ordering"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_search_order_and_paginate_guests() {
    let (mut persistence, fixture) = seeded();
    for (first, last) in [("Bolat", "Akhmetov"), ("Zarina", "Akhmetova"), ("Timur", "Nurlanov")] {
        create_guest(
            &mut persistence,
            guest_named(fixture.nationality_id, first, last),
            now(),
        )
        .unwrap();
    }

    let search = ListQuery {
        search: Some(String::from("akhmet")),
        ordering: Some(String::from("-last_name")),
        ..ListQuery::default()
    };
    let found = list_guests(&mut persistence, search, GuestFilterQuery::default(), now()).unwrap();
    assert_eq!(found.count, 2);
    assert_eq!(found.results[0].first_name, "Zarina");

    let page = ListQuery {
        ordering: Some(String::from("last_name")),
        limit: Some(2),
        offset: Some(1),
        ..ListQuery::default()
    };
    let page = list_guests(&mut persistence, page, GuestFilterQuery::default(), now()).unwrap();
    assert_eq!(page.count, 4);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].first_name, "Zarina");
    assert_eq!(page.results[1].first_name, "Timur");
}

#[test]
fn test_unknown_status_filter_is_invalid_input() {
    let (mut persistence, _fixture) = seeded();
    let filter = BookingFilterQuery {
        status: Some(String::from("LOST")),
        ..BookingFilterQuery::default()
    };
    match list_bookings(&mut persistence, ListQuery::default(), filter) {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "status"),
        other => panic!("Expected InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_delete_of_referenced_record_is_conflict() {
    let (mut persistence, fixture) = seeded();
    book(&mut persistence, &fixture);

    match delete_guest(&mut persistence, fixture.guest_id) {
        Err(ApiError::Conflict { .. }) => {}
        other => panic!("Expected Conflict, got: {other:?}"),
    }
}

#[test]
fn test_delete_unknown_record_is_not_found() {
    let (mut persistence, _fixture) = seeded();
    match delete_agent(&mut persistence, 999) {
        Err(ApiError::ResourceNotFound { .. }) => {}
        other => panic!("Expected ResourceNotFound, got: {other:?}"),
    }
    let agent = create_agent(
        &mut persistence,
        AgentRequest {
            full_title: String::from("Steppe Travel LLP"),
            short_title: String::from("Steppe Travel"),
            tax_id: None,
            address: None,
            bank_account: None,
            bank_code: None,
            phone: None,
            is_active: true,
        },
        now(),
    )
    .unwrap();
    assert!(delete_agent(&mut persistence, agent.id).is_ok());
}
