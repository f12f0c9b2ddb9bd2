// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Corporate agent handlers.

use innkeep_domain::{Agent, format_timestamp};
use innkeep_persistence::{AgentFilter, Page, SqlitePersistence};

use super::{Now, found, id_of, list_params, non_blank};
use crate::error::ApiError;
use crate::request_response::agents::{AgentFilterQuery, AgentPatch, AgentRequest, AgentView};
use crate::request_response::{ListQuery, ListResponse, merge};

impl From<Agent> for AgentView {
    fn from(agent: Agent) -> Self {
        Self {
            id: id_of(agent.id),
            full_title: agent.full_title,
            short_title: agent.short_title,
            tax_id: agent.tax_id,
            address: agent.address,
            bank_account: agent.bank_account,
            bank_code: agent.bank_code,
            phone: agent.phone,
            is_active: agent.is_active,
            created_at: format_timestamp(agent.created_at),
            updated_at: format_timestamp(agent.updated_at),
        }
    }
}

fn agent_from_request(
    request: AgentRequest,
    existing: Option<&Agent>,
    now: Now,
) -> Result<Agent, ApiError> {
    let agent: Agent = Agent {
        id: existing.and_then(|a| a.id),
        full_title: request.full_title.trim().to_string(),
        short_title: request.short_title.trim().to_string(),
        tax_id: non_blank(request.tax_id),
        address: non_blank(request.address),
        bank_account: non_blank(request.bank_account),
        bank_code: non_blank(request.bank_code),
        phone: non_blank(request.phone),
        is_active: request.is_active,
        created_at: existing.map_or(now.instant, |a| a.created_at),
        updated_at: now.instant,
    };
    agent.validate()?;
    Ok(agent)
}

/// Lists agents.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_agents(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: AgentFilterQuery,
) -> Result<ListResponse<AgentView>, ApiError> {
    let filter: AgentFilter = AgentFilter {
        is_active: filter.is_active,
    };
    let page: Page<Agent> = persistence.list_agents(&list_params(query)?, filter)?;
    Ok(ListResponse::from(page.map(AgentView::from)))
}

/// Retrieves one agent.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_agent(persistence: &mut SqlitePersistence, agent_id: i64) -> Result<AgentView, ApiError> {
    let agent: Agent = found(persistence.get_agent(agent_id)?, "Agent", agent_id)?;
    Ok(AgentView::from(agent))
}

/// Registers an agent.
///
/// # Errors
///
/// Returns an error for blank or duplicate titles or a malformed phone.
pub fn create_agent(
    persistence: &mut SqlitePersistence,
    request: AgentRequest,
    now: Now,
) -> Result<AgentView, ApiError> {
    let mut agent: Agent = agent_from_request(request, None, now)?;
    agent.id = Some(persistence.insert_agent(&agent)?);
    Ok(AgentView::from(agent))
}

/// Replaces an agent.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_agent(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    request: AgentRequest,
    now: Now,
) -> Result<AgentView, ApiError> {
    let existing: Agent = found(persistence.get_agent(agent_id)?, "Agent", agent_id)?;
    let agent: Agent = agent_from_request(request, Some(&existing), now)?;
    persistence.update_agent(agent_id, &agent)?;
    Ok(AgentView::from(agent))
}

/// Partially updates an agent.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_agent(
    persistence: &mut SqlitePersistence,
    agent_id: i64,
    patch: AgentPatch,
    now: Now,
) -> Result<AgentView, ApiError> {
    let existing: Agent = found(persistence.get_agent(agent_id)?, "Agent", agent_id)?;
    let mut request: AgentRequest = AgentRequest {
        full_title: existing.full_title,
        short_title: existing.short_title,
        tax_id: existing.tax_id,
        address: existing.address,
        bank_account: existing.bank_account,
        bank_code: existing.bank_code,
        phone: existing.phone,
        is_active: existing.is_active,
    };
    merge(&mut request.full_title, patch.full_title);
    merge(&mut request.short_title, patch.short_title);
    merge(&mut request.tax_id, patch.tax_id);
    merge(&mut request.address, patch.address);
    merge(&mut request.bank_account, patch.bank_account);
    merge(&mut request.bank_code, patch.bank_code);
    merge(&mut request.phone, patch.phone);
    merge(&mut request.is_active, patch.is_active);
    update_agent(persistence, agent_id, request, now)
}

/// Deletes an agent nothing references.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Conflict`.
pub fn delete_agent(persistence: &mut SqlitePersistence, agent_id: i64) -> Result<(), ApiError> {
    persistence.delete_agent(agent_id)?;
    Ok(())
}
