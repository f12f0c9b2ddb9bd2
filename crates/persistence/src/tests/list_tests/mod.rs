// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Search, ordering and pagination shared by every list.

use super::{guest, job_title, nationality};
use crate::{GuestFilter, ListParams, PersistenceError, SqlitePersistence};

fn with_job_titles() -> SqlitePersistence {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    for (title, pay) in [
        ("Receptionist", 1_000),
        ("Housekeeper", 800),
        ("Manager", 2_500),
        ("Cook", 1_200),
    ] {
        persistence.insert_job_title(&job_title(title, pay)).unwrap();
    }
    persistence
}

fn titles(persistence: &mut SqlitePersistence, params: &ListParams) -> Vec<String> {
    persistence
        .list_job_titles(params)
        .unwrap()
        .items
        .into_iter()
        .map(|t| t.title)
        .collect()
}

#[test]
fn test_default_ordering() {
    let mut persistence = with_job_titles();
    assert_eq!(
        titles(&mut persistence, &ListParams::default()),
        vec!["Cook", "Housekeeper", "Manager", "Receptionist"]
    );
}

#[test]
fn test_descending_ordering() {
    let mut persistence = with_job_titles();
    let params = ListParams {
        ordering: Some("-pay_per_hour".to_string()),
        ..ListParams::default()
    };
    assert_eq!(
        titles(&mut persistence, &params),
        vec!["Manager", "Cook", "Receptionist", "Housekeeper"]
    );
}

#[test]
fn test_unknown_ordering_field_is_rejected() {
    let mut persistence = with_job_titles();
    let params = ListParams {
        ordering: Some("-salary".to_string()),
        ..ListParams::default()
    };
    assert_eq!(
        persistence.list_job_titles(&params),
        Err(PersistenceError::InvalidOrdering("salary".to_string()))
    );
}

#[test]
fn test_pagination_keeps_total_count() {
    let mut persistence = with_job_titles();
    let params = ListParams {
        limit: Some(2),
        offset: Some(1),
        ..ListParams::default()
    };
    let page = persistence.list_job_titles(&params).unwrap();
    assert_eq!(page.count, 4);
    let names: Vec<&str> = page.items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(names, vec!["Housekeeper", "Manager"]);

    let past_end = ListParams {
        offset: Some(10),
        ..ListParams::default()
    };
    let page = persistence.list_job_titles(&past_end).unwrap();
    assert_eq!(page.count, 4);
    assert!(page.items.is_empty());
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let mut persistence = with_job_titles();
    let params = ListParams {
        search: Some("KEEP".to_string()),
        ..ListParams::default()
    };
    assert_eq!(titles(&mut persistence, &params), vec!["Housekeeper"]);

    let blank = ListParams {
        search: Some("   ".to_string()),
        ..ListParams::default()
    };
    assert_eq!(titles(&mut persistence, &blank).len(), 4);
}

#[test]
fn test_search_combines_with_filters() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let kz = persistence
        .insert_nationality(&nationality("Kazakhstan", "KZ"))
        .unwrap();
    let uz = persistence
        .insert_nationality(&nationality("Uzbekistan", "UZ"))
        .unwrap();
    persistence.insert_guest(&guest("Aigerim", "Sadykova", kz)).unwrap();
    persistence.insert_guest(&guest("Aziza", "Sadykova", uz)).unwrap();
    persistence.insert_guest(&guest("Madina", "Karimova", uz)).unwrap();

    let params = ListParams {
        search: Some("sadyk".to_string()),
        ..ListParams::default()
    };
    let filter = GuestFilter {
        nationality_id: Some(uz),
        ..GuestFilter::default()
    };
    let page = persistence.list_guests(&params, filter).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.items[0].first_name, "Aziza");
}
