// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Domain values are validated by the caller before they reach this
//! module. Mutations only translate them into rows: timestamps as UTC
//! RFC 3339 text, dates as `YYYY-MM-DD`, money as minor units and flags
//! as 0/1.

pub mod agents;
pub mod bookings;
pub mod catalog;
pub mod documents;
pub mod guests;
pub mod inventory;
pub mod operators;
pub mod payments;
pub mod workforce;

use crate::error::PersistenceError;

/// Turns "zero rows touched" into `NotFound`.
pub(crate) fn ensure_affected(
    rows: usize,
    resource: &str,
    id: i64,
) -> Result<(), PersistenceError> {
    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "{resource} with ID {id} not found"
        )));
    }
    Ok(())
}
