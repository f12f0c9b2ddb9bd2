// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod booking_tests;
mod document_tests;
mod initialization_tests;
mod inventory_tests;
mod list_tests;
mod operator_tests;
mod payment_tests;
mod transaction_tests;
mod workforce_tests;

use innkeep_domain::{
    Booking, BookingCard, BookingCardStatus, BookingStatus, CatalogItem, CatalogKind, Document,
    DocumentType, Gender, Guest, JobTitle, Money, NationalId, Nationality, Room, RoomCondition,
    RoomType, ValidityWindow, Worker,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::SqlitePersistence;

/// Fixed "now" shared by the fixtures.
pub const NOW: OffsetDateTime = datetime!(2026-03-10 12:00 UTC);

pub fn job_title(title: &str, pay_per_hour: i64) -> JobTitle {
    JobTitle {
        id: None,
        title: title.to_string(),
        pay_per_hour: Money::from_minor(pay_per_hour),
    }
}

pub fn worker(name: &str, telegram_id: i64, main_job_title_id: Option<i64>) -> Worker {
    Worker {
        id: None,
        name: name.to_string(),
        main_job_title_id,
        telegram_id,
        telegram_username: None,
        is_working: false,
        created_at: NOW,
    }
}

pub fn nationality(name: &str, code: &str) -> Nationality {
    Nationality {
        id: None,
        name: name.to_string(),
        code: Some(code.to_string()),
    }
}

pub fn document(nationality_id: i64, national_id: &str) -> Document {
    Document {
        id: None,
        nationality_id,
        national_id: NationalId::parse(national_id).unwrap(),
        first_name: "Aigerim".to_string(),
        last_name: "Sadykova".to_string(),
        middle_name: None,
        date_of_birth: None,
        document_type: DocumentType::Passport,
        number: "N1234567".to_string(),
        scan_path: None,
        scan_url: None,
        issued_by: None,
        issued_date: None,
        expiry_date: None,
        notes: None,
        uploaded_at: NOW,
        updated_at: NOW,
    }
}

pub fn guest(first_name: &str, last_name: &str, nationality_id: i64) -> Guest {
    Guest {
        id: None,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        middle_name: None,
        nationality_id,
        phone: None,
        email: None,
        date_of_birth: None,
        gender: Some(Gender::Female),
        blacklisted: false,
        blacklist_reason: None,
        notes: None,
        created_at: NOW,
        updated_at: NOW,
    }
}

pub fn room_type(title: &str, price: i64) -> RoomType {
    RoomType {
        id: None,
        title: title.to_string(),
        price: Money::from_minor(price),
        window: ValidityWindow::unbounded(),
        description: None,
        is_active: true,
        created_at: NOW,
        updated_at: NOW,
    }
}

pub fn room(number: i64, room_type_ids: Vec<i64>) -> Room {
    Room {
        id: None,
        number,
        floor: Some(number / 100),
        room_type_ids,
        is_active: true,
    }
}

pub fn room_condition(label: &str) -> RoomCondition {
    RoomCondition {
        id: None,
        label: label.to_string(),
        color: "#00FF00".to_string(),
        is_available: true,
    }
}

pub fn catalog_item(kind: CatalogKind, name: &str, price: i64) -> CatalogItem {
    CatalogItem {
        id: None,
        kind,
        name: name.to_string(),
        price: Money::from_minor(price),
        window: ValidityWindow::unbounded(),
    }
}

pub fn booking(guest_id: i64, room_id: i64, created_by: i64) -> Booking {
    Booking {
        id: None,
        guest_id: Some(guest_id),
        agent_id: None,
        room_id: Some(room_id),
        room_condition_id: None,
        status: BookingStatus::Booked,
        created_by,
        check_in: Some(datetime!(2026-01-01 14:00 UTC)),
        check_out: Some(datetime!(2026-01-04 11:00 UTC)),
        note: None,
        created_at: NOW,
        updated_at: NOW,
    }
}

pub fn booking_card(primary_guest_id: i64, booking_ids: Vec<i64>) -> BookingCard {
    BookingCard {
        id: None,
        primary_guest_id,
        booking_ids,
        goods_ids: Vec::new(),
        service_ids: Vec::new(),
        status: BookingCardStatus::Active,
        total_amount: Money::from_minor(0),
        total_is_stale: false,
        created_at: NOW,
        updated_at: NOW,
    }
}

/// IDs of the rows most tests need.
pub struct Fixture {
    pub worker_id: i64,
    pub nationality_id: i64,
    pub guest_id: i64,
    pub room_type_id: i64,
    pub room_id: i64,
}

/// A store with one worker, guest, room type (10000 per night) and room.
pub fn seeded() -> (SqlitePersistence, Fixture) {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let job_title_id = persistence
        .insert_job_title(&job_title("Receptionist", 1000))
        .unwrap();
    let worker_id = persistence
        .insert_worker(&worker("Dana", 1001, Some(job_title_id)))
        .unwrap();
    let nationality_id = persistence
        .insert_nationality(&nationality("Kazakhstan", "KZ"))
        .unwrap();
    let guest_id = persistence
        .insert_guest(&guest("Aigerim", "Sadykova", nationality_id))
        .unwrap();
    let room_type_id = persistence
        .insert_room_type(&room_type("Standard", 10_000))
        .unwrap();
    let room_id = persistence
        .insert_room(&room(101, vec![room_type_id]))
        .unwrap();

    (
        persistence,
        Fixture {
            worker_id,
            nationality_id,
            guest_id,
            room_type_id,
            room_id,
        },
    )
}
