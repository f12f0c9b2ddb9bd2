// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nationalities, documents and guests.

use innkeep_domain::{DocumentType, Gender, NationalId};
use time::macros::date;

use super::{NOW, document, guest, nationality, seeded};
use crate::{DocumentFilter, GuestFilter, ListParams, PersistenceError, SqlitePersistence};

#[test]
fn test_document_round_trip() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let nationality_id = persistence
        .insert_nationality(&nationality("Kazakhstan", "KZ"))
        .unwrap();

    let mut doc = document(nationality_id, "920515300123");
    doc.date_of_birth = Some(date!(1992 - 05 - 15));
    doc.issued_date = Some(date!(2020 - 01 - 10));
    doc.expiry_date = Some(date!(2030 - 01 - 10));
    doc.scan_url = Some("https://scans.example/920515300123.pdf".to_string());
    let id = persistence.insert_document(&doc).unwrap();

    let stored = persistence.get_document(id).unwrap().unwrap();
    assert_eq!(stored.id, Some(id));
    assert_eq!(stored.national_id.as_str(), "920515300123");
    assert_eq!(stored.document_type, DocumentType::Passport);
    assert_eq!(stored.date_of_birth, Some(date!(1992 - 05 - 15)));
    assert_eq!(stored.expiry_date, Some(date!(2030 - 01 - 10)));
    assert_eq!(stored.uploaded_at, NOW);

    let national_id = NationalId::parse("920515300123").unwrap();
    let by_national_id = persistence
        .get_document_by_national_id(&national_id)
        .unwrap()
        .unwrap();
    assert_eq!(by_national_id.id, Some(id));
}

#[test]
fn test_duplicate_national_id_names_field() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let nationality_id = persistence
        .insert_nationality(&nationality("Kazakhstan", "KZ"))
        .unwrap();
    persistence
        .insert_document(&document(nationality_id, "920515300123"))
        .unwrap();

    let result = persistence.insert_document(&document(nationality_id, "920515300123"));
    assert!(matches!(
        result,
        Err(PersistenceError::UniqueViolation { field: Some(ref f), .. }) if f == "national_id"
    ));
}

#[test]
fn test_expiry_queries() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let nationality_id = persistence
        .insert_nationality(&nationality("Kazakhstan", "KZ"))
        .unwrap();
    let today = date!(2026 - 03 - 10);

    let expiries = [
        ("000000000001", Some(date!(2026 - 03 - 01))),
        ("000000000002", Some(date!(2026 - 03 - 10))),
        ("000000000003", Some(date!(2026 - 04 - 09))),
        ("000000000004", Some(date!(2026 - 04 - 10))),
        ("000000000005", Some(date!(2026 - 03 - 20))),
        ("000000000006", None),
    ];
    for (national_id, expiry) in expiries {
        let mut doc = document(nationality_id, national_id);
        doc.expiry_date = expiry;
        persistence.insert_document(&doc).unwrap();
    }

    let soon: Vec<String> = persistence
        .list_documents_expiring_within(today, 30)
        .unwrap()
        .into_iter()
        .map(|d| d.national_id.as_str().to_string())
        .collect();
    assert_eq!(soon, vec!["000000000005", "000000000003"]);

    let everything = persistence
        .list_documents_expiring_within(today, i64::MAX)
        .unwrap();
    assert_eq!(everything.len(), 3);

    let expired = persistence.list_expired_documents(today).unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].national_id.as_str(), "000000000001");

    assert_eq!(persistence.document_types_and_expiry().unwrap().len(), 6);
}

#[test]
fn test_documents_filter_by_nationality() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let kz = persistence
        .insert_nationality(&nationality("Kazakhstan", "KZ"))
        .unwrap();
    let uz = persistence
        .insert_nationality(&nationality("Uzbekistan", "UZ"))
        .unwrap();
    persistence.insert_document(&document(kz, "000000000001")).unwrap();
    persistence.insert_document(&document(uz, "000000000002")).unwrap();

    let filter = DocumentFilter {
        nationality_id: Some(uz),
        ..DocumentFilter::default()
    };
    let page = persistence.list_documents(&ListParams::default(), filter).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].nationality_id, uz);
}

#[test]
fn test_nationality_in_use_cannot_be_deleted() {
    let (mut persistence, fixture) = seeded();
    assert!(matches!(
        persistence.delete_nationality(fixture.nationality_id),
        Err(PersistenceError::ReferencedRecord(_))
    ));
}

#[test]
fn test_guest_round_trip_with_documents() {
    let (mut persistence, fixture) = seeded();
    let document_id = persistence
        .insert_document(&document(fixture.nationality_id, "000000000001"))
        .unwrap();

    persistence
        .replace_guest_documents(fixture.guest_id, &[document_id])
        .unwrap();

    let stored = persistence.get_guest(fixture.guest_id).unwrap().unwrap();
    assert_eq!(stored.gender, Some(Gender::Female));
    assert!(!stored.blacklisted);

    let links = persistence.guest_document_ids(&[fixture.guest_id]).unwrap();
    assert_eq!(links.get(&fixture.guest_id), Some(&vec![document_id]));

    persistence.replace_guest_documents(fixture.guest_id, &[]).unwrap();
    let links = persistence.guest_document_ids(&[fixture.guest_id]).unwrap();
    assert!(links.get(&fixture.guest_id).is_none_or(Vec::is_empty));
}

#[test]
fn test_linked_document_cannot_be_deleted() {
    let (mut persistence, fixture) = seeded();
    let document_id = persistence
        .insert_document(&document(fixture.nationality_id, "000000000001"))
        .unwrap();
    persistence
        .replace_guest_documents(fixture.guest_id, &[document_id])
        .unwrap();

    assert!(matches!(
        persistence.delete_document(document_id),
        Err(PersistenceError::ReferencedRecord(_))
    ));
}

#[test]
fn test_linking_unknown_document_is_rejected() {
    let (mut persistence, fixture) = seeded();
    assert!(matches!(
        persistence.replace_guest_documents(fixture.guest_id, &[404]),
        Err(PersistenceError::ReferencedRecord(_))
    ));
}

#[test]
fn test_blacklist_state_is_persisted() {
    let (mut persistence, fixture) = seeded();
    let mut stored = persistence.get_guest(fixture.guest_id).unwrap().unwrap();
    stored.blacklist("damaged property").unwrap();
    persistence.update_guest(fixture.guest_id, &stored).unwrap();

    let blacklisted = GuestFilter {
        blacklisted: Some(true),
        ..GuestFilter::default()
    };
    let page = persistence.list_guests(&ListParams::default(), blacklisted).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(
        page.items[0].blacklist_reason.as_deref(),
        Some("damaged property")
    );
}

#[test]
fn test_phone_in_use_excludes_self() {
    let (mut persistence, fixture) = seeded();
    let mut stored = persistence.get_guest(fixture.guest_id).unwrap().unwrap();
    stored.phone = Some("+77011234567".to_string());
    persistence.update_guest(fixture.guest_id, &stored).unwrap();

    assert!(persistence.phone_in_use("+77011234567", None).unwrap());
    assert!(
        !persistence
            .phone_in_use("+77011234567", Some(fixture.guest_id))
            .unwrap()
    );

    let other = persistence
        .insert_guest(&guest("Bolat", "Nurlanov", fixture.nationality_id))
        .unwrap();
    assert!(persistence.phone_in_use("+77011234567", Some(other)).unwrap());
}
