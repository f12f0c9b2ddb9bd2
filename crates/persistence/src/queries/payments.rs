// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment and payment order queries.
//!
//! All three channels live in the `payments` table. The `channel` column
//! decides which of the optional reference columns are meaningful.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use innkeep_domain::{Money, Payment, PaymentChannel, PaymentDetails, PaymentOrder};
use std::str::FromStr;

use crate::data_models::{ListParams, Page, PaymentFilter, PaymentOrderFilter};
use crate::diesel_schema::{agents, payment_order_payments, payment_orders, payments, workers};
use crate::error::PersistenceError;
use crate::queries::{flag, paginate, search_pattern, stored_timestamp};

#[derive(Queryable, Selectable)]
#[diesel(table_name = payments)]
struct PaymentRow {
    payment_id: i64,
    channel: String,
    amount: i64,
    agent_id: Option<i64>,
    booking_card_id: i64,
    is_chargeback: i32,
    issued_at: String,
    cheque_id: Option<String>,
    received_by: Option<i64>,
    reference_number: Option<String>,
    bank_name: Option<String>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = PersistenceError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let details: PaymentDetails = match PaymentChannel::from_str(&row.channel)? {
            PaymentChannel::Card => PaymentDetails::Card {
                cheque_id: row.cheque_id,
            },
            PaymentChannel::Cash => PaymentDetails::Cash {
                cheque_id: row.cheque_id,
                received_by: row.received_by,
            },
            PaymentChannel::Bank => PaymentDetails::Bank {
                reference_number: row.reference_number,
                bank_name: row.bank_name.ok_or_else(|| {
                    PersistenceError::CorruptRecord(format!(
                        "bank payment {} has no bank name",
                        row.payment_id
                    ))
                })?,
            },
        };
        Ok(Self {
            id: Some(row.payment_id),
            amount: Money::from_minor(row.amount),
            agent_id: row.agent_id,
            booking_card_id: row.booking_card_id,
            is_chargeback: flag(row.is_chargeback),
            issued_at: stored_timestamp("issued_at", &row.issued_at)?,
            details,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = payment_orders)]
struct PaymentOrderRow {
    payment_order_id: i64,
    booking_card_id: i64,
    notes: Option<String>,
    created_at: String,
}

impl TryFrom<PaymentOrderRow> for PaymentOrder {
    type Error = PersistenceError;

    fn try_from(row: PaymentOrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.payment_order_id),
            booking_card_id: row.booking_card_id,
            notes: row.notes,
            created_at: stored_timestamp("created_at", &row.created_at)?,
        })
    }
}

/// Retrieves a payment of the given channel by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_payment(
    conn: &mut SqliteConnection,
    channel: PaymentChannel,
    payment_id: i64,
) -> Result<Option<Payment>, PersistenceError> {
    payments::table
        .find(payment_id)
        .filter(payments::channel.eq(channel.as_str()))
        .select(PaymentRow::as_select())
        .first(conn)
        .optional()?
        .map(Payment::try_from)
        .transpose()
}

/// Retrieves a payment of any channel by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_any_payment(
    conn: &mut SqliteConnection,
    payment_id: i64,
) -> Result<Option<Payment>, PersistenceError> {
    payments::table
        .find(payment_id)
        .select(PaymentRow::as_select())
        .first(conn)
        .optional()?
        .map(Payment::try_from)
        .transpose()
}

fn filtered_payments(
    params: &ListParams,
    filter: &PaymentFilter,
) -> payments::BoxedQuery<'static, Sqlite> {
    let mut query = payments::table
        .filter(payments::channel.eq(filter.channel.as_str()))
        .into_boxed();
    if let Some(agent_id) = filter.agent_id {
        query = query.filter(payments::agent_id.eq(agent_id));
    }
    if let Some(card_id) = filter.booking_card_id {
        query = query.filter(payments::booking_card_id.eq(card_id));
    }
    if let Some(is_chargeback) = filter.is_chargeback {
        query = query.filter(payments::is_chargeback.eq(i32::from(is_chargeback)));
    }
    if let Some(worker_id) = filter.received_by {
        query = query.filter(payments::received_by.eq(worker_id));
    }
    if let Some(bank_name) = &filter.bank_name {
        query = query.filter(payments::bank_name.eq(bank_name.clone()));
    }
    if let Some(lower) = filter.issued.lower_bound() {
        query = query.filter(payments::issued_at.ge(lower));
    }
    if let Some(upper) = filter.issued.upper_bound_exclusive() {
        query = query.filter(payments::issued_at.lt(upper));
    }
    if let Some(pattern) = search_pattern(params) {
        let matching_agents = agents::table
            .filter(
                agents::full_title
                    .like(pattern.clone())
                    .or(agents::short_title.like(pattern.clone())),
            )
            .select(agents::agent_id);
        let matching_workers = workers::table
            .filter(workers::name.like(pattern.clone()))
            .select(workers::worker_id);
        query = query.filter(
            payments::cheque_id
                .assume_not_null()
                .like(pattern.clone())
                .or(payments::reference_number.assume_not_null().like(pattern.clone()))
                .or(payments::bank_name.assume_not_null().like(pattern))
                .or(payments::agent_id.assume_not_null().eq_any(matching_agents))
                .or(payments::received_by.assume_not_null().eq_any(matching_workers)),
        );
    }
    query
}

/// Lists payments of one channel. Searches cheque and reference numbers,
/// bank name, agent titles and the receiving worker; default ordering is
/// newest issue first.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_payments(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: &PaymentFilter,
) -> Result<Page<Payment>, PersistenceError> {
    let count: i64 = filtered_payments(params, filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_payments(params, filter),
        params.ordering.as_deref().unwrap_or("-issued_at"),
        {
            "id" => payments::payment_id,
            "issued_at" => payments::issued_at,
            "amount" => payments::amount,
        }
    )
    .then_order_by(payments::payment_id.asc());

    let items: Vec<Payment> = paginate(query, params)
        .select(PaymentRow::as_select())
        .load::<PaymentRow>(conn)?
        .into_iter()
        .map(Payment::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}

/// Every payment matching `filter`, for statistics. Search is not applied.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn all_payments(
    conn: &mut SqliteConnection,
    filter: &PaymentFilter,
) -> Result<Vec<Payment>, PersistenceError> {
    filtered_payments(&ListParams::default(), filter)
        .order(payments::payment_id.asc())
        .select(PaymentRow::as_select())
        .load::<PaymentRow>(conn)?
        .into_iter()
        .map(Payment::try_from)
        .collect()
}

/// Retrieves a payment order by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_payment_order(
    conn: &mut SqliteConnection,
    payment_order_id: i64,
) -> Result<Option<PaymentOrder>, PersistenceError> {
    payment_orders::table
        .find(payment_order_id)
        .select(PaymentOrderRow::as_select())
        .first(conn)
        .optional()?
        .map(PaymentOrder::try_from)
        .transpose()
}

/// Retrieves the payment order of a booking card, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_payment_order_for_card(
    conn: &mut SqliteConnection,
    booking_card_id: i64,
) -> Result<Option<PaymentOrder>, PersistenceError> {
    payment_orders::table
        .filter(payment_orders::booking_card_id.eq(booking_card_id))
        .select(PaymentOrderRow::as_select())
        .first(conn)
        .optional()?
        .map(PaymentOrder::try_from)
        .transpose()
}

fn filtered_orders(filter: PaymentOrderFilter) -> payment_orders::BoxedQuery<'static, Sqlite> {
    let mut query = payment_orders::table.into_boxed();
    if let Some(card_id) = filter.booking_card_id {
        query = query.filter(payment_orders::booking_card_id.eq(card_id));
    }
    query
}

/// Lists payment orders. Default ordering is newest first.
///
/// # Errors
///
/// Returns an error if the query fails or the ordering field is unknown.
pub fn list_payment_orders(
    conn: &mut SqliteConnection,
    params: &ListParams,
    filter: PaymentOrderFilter,
) -> Result<Page<PaymentOrder>, PersistenceError> {
    let count: i64 = filtered_orders(filter).count().get_result(conn)?;

    let query = apply_ordering!(
        filtered_orders(filter),
        params.ordering.as_deref().unwrap_or("-created_at"),
        {
            "id" => payment_orders::payment_order_id,
            "created_at" => payment_orders::created_at,
        }
    )
    .then_order_by(payment_orders::payment_order_id.asc());

    let items: Vec<PaymentOrder> = paginate(query, params)
        .select(PaymentOrderRow::as_select())
        .load::<PaymentOrderRow>(conn)?
        .into_iter()
        .map(PaymentOrder::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page { count, items })
}

/// Payments attached to an order, ascending by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn payments_for_order(
    conn: &mut SqliteConnection,
    payment_order_id: i64,
) -> Result<Vec<Payment>, PersistenceError> {
    payment_order_payments::table
        .inner_join(payments::table)
        .filter(payment_order_payments::payment_order_id.eq(payment_order_id))
        .order(payments::payment_id.asc())
        .select(PaymentRow::as_select())
        .load::<PaymentRow>(conn)?
        .into_iter()
        .map(Payment::try_from)
        .collect()
}
