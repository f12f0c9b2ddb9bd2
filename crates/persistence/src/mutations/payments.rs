// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment and payment order mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{Payment, PaymentChannel, PaymentDetails, PaymentOrder, format_timestamp};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{payment_order_payments, payment_orders, payments};
use crate::error::PersistenceError;
use crate::mutations::ensure_affected;

/// Channel reference columns: cheque, receiving worker, bank reference,
/// bank name.
type ReferenceColumns<'a> = (
    Option<&'a str>,
    Option<i64>,
    Option<&'a str>,
    Option<&'a str>,
);

fn reference_columns(details: &PaymentDetails) -> ReferenceColumns<'_> {
    match details {
        PaymentDetails::Card { cheque_id } => (cheque_id.as_deref(), None, None, None),
        PaymentDetails::Cash {
            cheque_id,
            received_by,
        } => (cheque_id.as_deref(), *received_by, None, None),
        PaymentDetails::Bank {
            reference_number,
            bank_name,
        } => (None, None, reference_number.as_deref(), Some(bank_name.as_str())),
    }
}

/// Inserts a payment of any channel and returns its ID.
///
/// # Errors
///
/// Returns an error if a referenced row is missing or the insert fails.
pub fn insert_payment(conn: &mut SqliteConnection, payment: &Payment) -> Result<i64, PersistenceError> {
    let (cheque_id, received_by, reference_number, bank_name) = reference_columns(&payment.details);
    diesel::insert_into(payments::table)
        .values((
            payments::channel.eq(payment.channel().as_str()),
            payments::amount.eq(payment.amount.minor()),
            payments::agent_id.eq(payment.agent_id),
            payments::booking_card_id.eq(payment.booking_card_id),
            payments::is_chargeback.eq(i32::from(payment.is_chargeback)),
            payments::issued_at.eq(format_timestamp(payment.issued_at)),
            payments::cheque_id.eq(cheque_id),
            payments::received_by.eq(received_by),
            payments::reference_number.eq(reference_number),
            payments::bank_name.eq(bank_name),
        ))
        .execute(conn)?;
    let payment_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        payment_id,
        channel = payment.channel().as_str(),
        amount = payment.amount.minor(),
        chargeback = payment.is_chargeback,
        "Recorded payment"
    );
    Ok(payment_id)
}

/// Overwrites a payment of the given channel.
///
/// # Errors
///
/// Returns `NotFound` if no payment of that channel has the ID, or a
/// database error.
pub fn update_payment(
    conn: &mut SqliteConnection,
    channel: PaymentChannel,
    payment_id: i64,
    payment: &Payment,
) -> Result<(), PersistenceError> {
    let (cheque_id, received_by, reference_number, bank_name) = reference_columns(&payment.details);
    let rows: usize = diesel::update(
        payments::table
            .filter(payments::payment_id.eq(payment_id))
            .filter(payments::channel.eq(channel.as_str())),
    )
    .set((
        payments::amount.eq(payment.amount.minor()),
        payments::agent_id.eq(payment.agent_id),
        payments::booking_card_id.eq(payment.booking_card_id),
        payments::is_chargeback.eq(i32::from(payment.is_chargeback)),
        payments::issued_at.eq(format_timestamp(payment.issued_at)),
        payments::cheque_id.eq(cheque_id),
        payments::received_by.eq(received_by),
        payments::reference_number.eq(reference_number),
        payments::bank_name.eq(bank_name),
    ))
    .execute(conn)?;
    ensure_affected(rows, "payment", payment_id)
}

/// Deletes a payment of the given channel that no order holds.
///
/// # Errors
///
/// Returns `NotFound`, `ReferencedRecord`, or a database error.
pub fn delete_payment(
    conn: &mut SqliteConnection,
    channel: PaymentChannel,
    payment_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(
        payments::table
            .filter(payments::payment_id.eq(payment_id))
            .filter(payments::channel.eq(channel.as_str())),
    )
    .execute(conn)?;
    ensure_affected(rows, "payment", payment_id)?;
    info!(payment_id, channel = channel.as_str(), "Deleted payment");
    Ok(())
}

/// Inserts a payment order and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the card already has an order, or a
/// database error.
pub fn insert_payment_order(
    conn: &mut SqliteConnection,
    order: &PaymentOrder,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(payment_orders::table)
        .values((
            payment_orders::booking_card_id.eq(order.booking_card_id),
            payment_orders::notes.eq(&order.notes),
            payment_orders::created_at.eq(format_timestamp(order.created_at)),
        ))
        .execute(conn)?;
    let payment_order_id: i64 = conn.get_last_insert_rowid()?;
    info!(payment_order_id, booking_card_id = order.booking_card_id, "Opened payment order");
    Ok(payment_order_id)
}

/// Updates the notes of a payment order. The card never changes.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn update_payment_order_notes(
    conn: &mut SqliteConnection,
    payment_order_id: i64,
    notes: Option<&str>,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(payment_orders::table.find(payment_order_id))
        .set(payment_orders::notes.eq(notes))
        .execute(conn)?;
    ensure_affected(rows, "payment order", payment_order_id)
}

/// Deletes a payment order. Attached payments stay; only the links go.
///
/// # Errors
///
/// Returns `NotFound` for an unknown ID, or a database error.
pub fn delete_payment_order(
    conn: &mut SqliteConnection,
    payment_order_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(payment_orders::table.find(payment_order_id)).execute(conn)?;
    ensure_affected(rows, "payment order", payment_order_id)?;
    info!(payment_order_id, "Deleted payment order");
    Ok(())
}

/// Attaches a payment to an order. Attaching twice is a no-op.
///
/// # Errors
///
/// Returns `ReferencedRecord` if either side is missing, or a database
/// error.
pub fn attach_payment(
    conn: &mut SqliteConnection,
    payment_order_id: i64,
    payment_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(payment_order_payments::table)
        .values((
            payment_order_payments::payment_order_id.eq(payment_order_id),
            payment_order_payments::payment_id.eq(payment_id),
        ))
        .execute(conn)?;
    info!(payment_order_id, payment_id, "Attached payment to order");
    Ok(())
}
