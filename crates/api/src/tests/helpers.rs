// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use innkeep_domain::{CatalogKind, HotelClock};
use innkeep_persistence::SqlitePersistence;
use time::macros::datetime;

use crate::handlers::{Now, bookings, catalog, documents, guests, inventory, workforce};
use crate::request_response::bookings::{BookingCardRequest, BookingRequest};
use crate::request_response::catalog::CatalogItemRequest;
use crate::request_response::documents::NationalityRequest;
use crate::request_response::guests::GuestRequest;
use crate::request_response::inventory::{RoomRequest, RoomTypeRequest};
use crate::request_response::workforce::{JobTitleRequest, WorkerRequest};
use crate::{AuthenticatedActor, Role};

/// 2026-03-10 12:00 UTC, seen from a UTC hotel.
pub fn now() -> Now {
    Now::at(&HotelClock::utc(), datetime!(2026-03-10 12:00 UTC))
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("ADMIN"), Role::Admin)
}

pub fn create_test_staff() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("DESK"), Role::Staff)
}

pub fn guest_request(nationality_id: i64) -> GuestRequest {
    GuestRequest {
        first_name: String::from("Aigerim"),
        last_name: String::from("Sadykova"),
        middle_name: None,
        nationality_id,
        document_ids: Vec::new(),
        phone: None,
        email: None,
        date_of_birth: None,
        gender: None,
        blacklisted: false,
        blacklist_reason: None,
        notes: None,
    }
}

pub fn booking_request(fixture: &Fixture) -> BookingRequest {
    BookingRequest {
        guest_id: Some(fixture.guest_id),
        agent_id: None,
        room_id: Some(fixture.room_id),
        room_condition_id: None,
        created_by: fixture.worker_id,
        check_in: Some(String::from("2026-01-01T14:00:00Z")),
        check_out: Some(String::from("2026-01-04T11:00:00Z")),
        note: None,
    }
}

pub fn item_request(name: &str, price: i64) -> CatalogItemRequest {
    CatalogItemRequest {
        name: name.to_string(),
        price,
        relevant_from: None,
        relevant_to: None,
    }
}

/// IDs of the rows most tests need.
pub struct Fixture {
    pub job_title_id: i64,
    pub worker_id: i64,
    pub nationality_id: i64,
    pub guest_id: i64,
    pub room_type_id: i64,
    pub room_id: i64,
}

/// A store with one receptionist paid 1000 per hour, one guest and one
/// room whose only type costs 10000 per night.
pub fn seeded() -> (SqlitePersistence, Fixture) {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let now = now();

    let job_title_id = workforce::create_job_title(
        &mut persistence,
        JobTitleRequest {
            title: String::from("Receptionist"),
            pay_per_hour: 1000,
        },
    )
    .unwrap()
    .id;
    let worker_id = workforce::create_worker(
        &mut persistence,
        WorkerRequest {
            name: String::from("Dana"),
            main_job_title_id: Some(job_title_id),
            telegram_id: 1001,
            telegram_username: None,
        },
        now,
    )
    .unwrap()
    .id;
    let nationality_id = documents::create_nationality(
        &mut persistence,
        NationalityRequest {
            name: String::from("Kazakhstan"),
            code: Some(String::from("kz")),
        },
    )
    .unwrap()
    .id;
    let guest_id = guests::create_guest(&mut persistence, guest_request(nationality_id), now)
        .unwrap()
        .id;
    let room_type_id = inventory::create_room_type(
        &mut persistence,
        RoomTypeRequest {
            title: String::from("Standard"),
            price: 10_000,
            relevant_from: None,
            relevant_to: None,
            description: None,
            is_active: true,
        },
        now,
    )
    .unwrap()
    .id;
    let room_id = inventory::create_room(
        &mut persistence,
        RoomRequest {
            number: 101,
            floor: Some(1),
            room_type_ids: vec![room_type_id],
            is_active: true,
        },
    )
    .unwrap()
    .id;

    (
        persistence,
        Fixture {
            job_title_id,
            worker_id,
            nationality_id,
            guest_id,
            room_type_id,
            room_id,
        },
    )
}

/// Creates a booking for the fixture guest and room.
pub fn book(persistence: &mut SqlitePersistence, fixture: &Fixture) -> i64 {
    bookings::create_booking(persistence, booking_request(fixture), now())
        .unwrap()
        .id
}

/// Creates a card holding one booking, one 500 goods item and one 1500
/// service.
pub fn card_with_extras(persistence: &mut SqlitePersistence, fixture: &Fixture) -> i64 {
    let booking_id = book(persistence, fixture);
    let water = catalog::create_item(persistence, CatalogKind::Goods, item_request("Water", 500), now())
        .unwrap()
        .id;
    let laundry = catalog::create_item(
        persistence,
        CatalogKind::Service,
        item_request("Laundry", 1500),
        now(),
    )
    .unwrap()
    .id;
    bookings::create_booking_card(
        persistence,
        BookingCardRequest {
            primary_guest_id: fixture.guest_id,
            booking_ids: vec![booking_id],
            goods: vec![water],
            services: vec![laundry],
            status: None,
        },
        now(),
    )
    .unwrap()
    .id
}
