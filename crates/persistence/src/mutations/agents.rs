// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{Agent, format_timestamp};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::agents;
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Inserts an agent and returns its ID.
///
/// # Errors
///
/// Returns an error if either title is taken or the insert fails.
pub fn insert_agent(conn: &mut SqliteConnection, agent: &Agent) -> Result<i64, PersistenceError> {
    diesel::insert_into(agents::table)
        .values((
            agents::full_title.eq(&agent.full_title),
            agents::short_title.eq(&agent.short_title),
            agents::tax_id.eq(&agent.tax_id),
            agents::address.eq(&agent.address),
            agents::bank_account.eq(&agent.bank_account),
            agents::bank_code.eq(&agent.bank_code),
            agents::phone.eq(&agent.phone),
            agents::is_active.eq(i32::from(agent.is_active)),
            agents::created_at.eq(format_timestamp(agent.created_at)),
            agents::updated_at.eq(format_timestamp(agent.updated_at)),
        ))
        .execute(conn)?;
    let agent_id: i64 = conn.get_last_insert_rowid()?;
    info!(agent_id, short_title = %agent.short_title, "Created agent");
    Ok(agent_id)
}

/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_agent(
    conn: &mut SqliteConnection,
    agent_id: i64,
    agent: &Agent,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(agents::table.find(agent_id))
        .set((
            agents::full_title.eq(&agent.full_title),
            agents::short_title.eq(&agent.short_title),
            agents::tax_id.eq(&agent.tax_id),
            agents::address.eq(&agent.address),
            agents::bank_account.eq(&agent.bank_account),
            agents::bank_code.eq(&agent.bank_code),
            agents::phone.eq(&agent.phone),
            agents::is_active.eq(i32::from(agent.is_active)),
            agents::updated_at.eq(format_timestamp(agent.updated_at)),
        ))
        .execute(conn)?;
    ensure_affected(rows, "agent", agent_id)
}

/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_agent(conn: &mut SqliteConnection, agent_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(agents::table.find(agent_id)).execute(conn)?;
    ensure_affected(rows, "agent", agent_id)?;
    info!(agent_id, "Deleted agent");
    Ok(())
}
