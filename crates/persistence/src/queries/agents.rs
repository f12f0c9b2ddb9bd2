// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use innkeep_domain::Agent;

use crate::data_models::{AgentFilter, ListParams, Page};
use crate::diesel_schema::agents;
use crate::error::PersistenceError;
use crate::queries::{flag, paginate, search_pattern, stored_timestamp};

#[derive(Queryable, Selectable)]
#[diesel(table_name = agents)]
struct AgentRow {
    agent_id: i64,
    full_title: String,
    short_title: String,
    tax_id: Option<String>,
    address: Option<String>,
    bank_account: Option<String>,
    bank_code: Option<String>,
    phone: Option<String>,
    is_active: i32,
    created_at: String,
    updated_at: String,
}

impl TryFrom<AgentRow> for Agent {
    type Error = PersistenceError;

    fn try_from(row: AgentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.agent_id),
            full_title: row.full_title,
            short_title: row.short_title,
            tax_id: row.tax_id,
            address: row.address,
            bank_account: row.bank_account,
            bank_code: row.bank_code,
            phone: row.phone,
            is_active: flag(row.is_active),
            created_at: stored_timestamp("created_at", &row.created_at)?,
            updated_at: stored_timestamp("updated_at", &row.updated_at)?,
        })
    }
}

/// Retrieves an agent by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_agent(
    conn: &mut SqliteConnection,
    agent_id: i64,
) -> Result<Option<Agent>, PersistenceError> {
    agents::table
        .find(agent_id)
        .select(AgentRow::as_select())
        .first(conn)
        .optional()?
        .map(Agent::try_from)
        .transpose()
}

fn filtered_agents(params: &ListParams, filter: AgentFilter) -> agents::BoxedQuery<'static, Sqlite> {
    let mut query = agents::table.into_boxed();
    if let Some(is_active) = filter.is_active {
        query = query.filter(agents::is_active.eq(i32::from(is_active)));
    }
    if let Some(pattern) = search_pattern(params) {
        query = query.filter(
            agents::full_title
                .like(pattern.clone())
                .or(agents::short_title.like(pattern.clone()))
                .or(agents::tax_id.assume_not_null().like(pattern.clone()))
                .or(agents::phone.assume_not_null().like(pattern)),
        );
    }
    query
}

/// Lists agents. Searches titles, tax ID and phone; default ordering is by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_agents(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: AgentFilter,
) -> Result<Page<Agent>, PersistenceError> {
    let count: i64 = filtered_agents(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_agents(params, filter),
        params.ordering.as_deref().unwrap_or("id"),
        {
            "id" => agents::agent_id,
            "full_title" => agents::full_title,
            "created_at" => agents::created_at,
        }
    )
    .then_order_by(agents::agent_id.asc());

    let items: Vec<Agent> = paginate(query, params)
        .select(AgentRow::as_select())
        .load::<AgentRow>(conn)?
        .into_iter()
        .map(Agent::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}
