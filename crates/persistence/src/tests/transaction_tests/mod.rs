// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{job_title, seeded};
use crate::{ListParams, PersistenceError};

#[test]
fn test_transaction_commits_on_success() {
    let (mut persistence, _fixture) = seeded();
    let id = persistence
        .in_transaction(|p| {
            let id = p.insert_job_title(&job_title("Cook", 1_200))?;
            p.update_job_title(id, &job_title("Head cook", 1_500))?;
            Ok::<_, PersistenceError>(id)
        })
        .unwrap();

    let stored = persistence.get_job_title(id).unwrap().unwrap();
    assert_eq!(stored.title, "Head cook");
}

#[test]
fn test_transaction_rolls_back_on_error() {
    let (mut persistence, _fixture) = seeded();
    let before = persistence
        .list_job_titles(&ListParams::default())
        .unwrap()
        .count;

    let result: Result<(), PersistenceError> = persistence.in_transaction(|p| {
        p.insert_job_title(&job_title("Cook", 1_200))?;
        p.insert_job_title(&job_title("Receptionist", 900))?;
        Ok(())
    });
    assert!(matches!(result, Err(PersistenceError::UniqueViolation { .. })));

    let after = persistence
        .list_job_titles(&ListParams::default())
        .unwrap()
        .count;
    assert_eq!(before, after);
}

#[test]
fn test_connection_is_usable_after_rollback() {
    let (mut persistence, fixture) = seeded();
    let result: Result<(), PersistenceError> = persistence.in_transaction(|p| {
        p.delete_worker(fixture.worker_id)?;
        Err(PersistenceError::Other("abandoned".to_string()))
    });
    assert!(result.is_err());

    assert!(persistence.get_worker(fixture.worker_id).unwrap().is_some());
    persistence.insert_job_title(&job_title("Cook", 1_200)).unwrap();
}
