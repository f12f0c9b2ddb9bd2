// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment and payment order handlers.

use innkeep_domain::{
    ChannelStatistics, ChannelTotals, DomainError, Money, Payment, PaymentBreakdown,
    PaymentChannel, PaymentDetails, PaymentOrder, channel_statistics, format_timestamp,
    parse_optional_timestamp,
};
use innkeep_persistence::{Page, PaymentFilter, PaymentOrderFilter, SqlitePersistence};
use time::OffsetDateTime;
use tracing::info;

use super::{Now, date_range, found, id_of, list_params, non_blank, referenced};
use crate::error::ApiError;
use crate::request_response::payments::{
    AttachPaymentRequest, BankPaymentTotals, ChannelStatisticsView, ChannelTotalsView,
    CreatePaymentOrderRequest, PaymentFilterQuery, PaymentOrderFilterQuery, PaymentOrderPatch,
    PaymentOrderView, PaymentPatch, PaymentRequest, PaymentView, UpdatePaymentOrderRequest,
    WorkerPaymentTotals,
};
use crate::request_response::{ListQuery, ListResponse, merge};

const fn resource_name(channel: PaymentChannel) -> &'static str {
    match channel {
        PaymentChannel::Card => "CardPayment",
        PaymentChannel::Cash => "CashPayment",
        PaymentChannel::Bank => "BankPayment",
    }
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        let channel: PaymentChannel = payment.channel();
        let (cheque_id, received_by, reference_number, bank_name) = match payment.details {
            PaymentDetails::Card { cheque_id } => (cheque_id, None, None, None),
            PaymentDetails::Cash {
                cheque_id,
                received_by,
            } => (cheque_id, received_by, None, None),
            PaymentDetails::Bank {
                reference_number,
                bank_name,
            } => (None, None, reference_number, Some(bank_name)),
        };
        Self {
            id: id_of(payment.id),
            channel: channel.as_str().to_string(),
            amount: payment.amount.minor(),
            agent_id: payment.agent_id,
            booking_card_id: payment.booking_card_id,
            is_chargeback: payment.is_chargeback,
            issued_at: format_timestamp(payment.issued_at),
            cheque_id,
            received_by,
            reference_number,
            bank_name,
        }
    }
}

impl From<ChannelTotals> for ChannelTotalsView {
    fn from(totals: ChannelTotals) -> Self {
        Self {
            count: totals.count,
            net: totals.net.minor(),
        }
    }
}

fn find_payment(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    payment_id: i64,
) -> Result<Payment, ApiError> {
    persistence
        .get_payment(channel, payment_id)?
        .ok_or_else(|| ApiError::not_found(resource_name(channel), payment_id))
}

/// Builds a validated payment of `channel`. References that do not apply
/// to the channel are dropped.
fn payment_from_request(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    request: PaymentRequest,
    existing: Option<&Payment>,
    now: Now,
) -> Result<Payment, ApiError> {
    referenced(
        persistence.get_booking_card(request.booking_card_id)?,
        "booking_card_id",
        request.booking_card_id,
    )?;
    if let Some(agent_id) = request.agent_id {
        referenced(persistence.get_agent(agent_id)?, "agent_id", agent_id)?;
    }

    let details: PaymentDetails = match channel {
        PaymentChannel::Card => PaymentDetails::Card {
            cheque_id: non_blank(request.cheque_id),
        },
        PaymentChannel::Cash => {
            if let Some(worker_id) = request.received_by {
                referenced(persistence.get_worker(worker_id)?, "received_by", worker_id)?;
            }
            PaymentDetails::Cash {
                cheque_id: non_blank(request.cheque_id),
                received_by: request.received_by,
            }
        }
        PaymentChannel::Bank => PaymentDetails::Bank {
            reference_number: non_blank(request.reference_number),
            bank_name: non_blank(request.bank_name).unwrap_or_default(),
        },
    };

    let issued_at: OffsetDateTime = parse_optional_timestamp("issued_at", request.issued_at.as_deref())?
        .or_else(|| existing.map(|p| p.issued_at))
        .unwrap_or(now.instant);

    let payment: Payment = Payment {
        id: existing.and_then(|p| p.id),
        amount: Money::from_minor(request.amount),
        agent_id: request.agent_id,
        booking_card_id: request.booking_card_id,
        is_chargeback: request.is_chargeback,
        issued_at,
        details,
    };
    payment.validate(now.instant)?;
    Ok(payment)
}

fn request_from_payment(payment: Payment) -> PaymentRequest {
    let view: PaymentView = PaymentView::from(payment);
    PaymentRequest {
        amount: view.amount,
        agent_id: view.agent_id,
        booking_card_id: view.booking_card_id,
        is_chargeback: view.is_chargeback,
        issued_at: Some(view.issued_at),
        cheque_id: view.cheque_id,
        received_by: view.received_by,
        reference_number: view.reference_number,
        bank_name: view.bank_name,
    }
}

fn payment_filter(
    channel: PaymentChannel,
    filter: PaymentFilterQuery,
    now: Now,
) -> Result<PaymentFilter, ApiError> {
    Ok(PaymentFilter {
        agent_id: filter.agent_id,
        booking_card_id: filter.booking_card_id,
        is_chargeback: filter.is_chargeback,
        received_by: filter.received_by,
        issued: date_range(filter.date_from.as_deref(), filter.date_to.as_deref(), now)?,
        bank_name: non_blank(filter.bank_name),
        ..PaymentFilter::channel(channel)
    })
}

// ========================================================================
// Payments
// ========================================================================

/// Lists the payments of one channel.
///
/// # Errors
///
/// Returns an error for a malformed date range, invalid list parameters,
/// or a failed query.
pub fn list_payments(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    query: ListQuery,
    filter: PaymentFilterQuery,
    now: Now,
) -> Result<ListResponse<PaymentView>, ApiError> {
    let filter: PaymentFilter = payment_filter(channel, filter, now)?;
    let page: Page<Payment> = persistence.list_payments(&list_params(query)?, &filter)?;
    Ok(ListResponse::from(page.map(PaymentView::from)))
}

/// Retrieves one payment of a channel.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID or a payment of another
/// channel.
pub fn get_payment(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    payment_id: i64,
) -> Result<PaymentView, ApiError> {
    let payment: Payment = find_payment(persistence, channel, payment_id)?;
    Ok(PaymentView::from(payment))
}

/// Records a payment.
///
/// # Errors
///
/// Returns an error for a non-positive amount, an issue time in the
/// future, an unknown reference, or a bank payment without a bank name.
pub fn create_payment(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    request: PaymentRequest,
    now: Now,
) -> Result<PaymentView, ApiError> {
    let mut payment: Payment = payment_from_request(persistence, channel, request, None, now)?;
    payment.id = Some(persistence.insert_payment(&payment)?);
    Ok(PaymentView::from(payment))
}

/// Replaces a payment. An omitted issue time keeps the recorded one.
///
/// A payment attached to its card's payment order cannot move to another
/// card.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn update_payment(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    payment_id: i64,
    request: PaymentRequest,
    now: Now,
) -> Result<PaymentView, ApiError> {
    let existing: Payment = find_payment(persistence, channel, payment_id)?;
    let payment: Payment = payment_from_request(persistence, channel, request, Some(&existing), now)?;

    if payment.booking_card_id != existing.booking_card_id
        && let Some(order) = persistence.get_payment_order_for_card(existing.booking_card_id)?
    {
        let attached: Vec<Payment> = persistence.payments_for_order(id_of(order.id))?;
        if attached.iter().any(|p| p.id == Some(payment_id)) {
            return Err(ApiError::from(DomainError::PaymentCardMismatch {
                payment_id,
                order_card_id: existing.booking_card_id,
                payment_card_id: payment.booking_card_id,
            }));
        }
    }

    persistence.update_payment(channel, payment_id, &payment)?;
    info!(payment_id, channel = channel.as_str(), "Updated payment");
    Ok(PaymentView::from(payment))
}

/// Partially updates a payment.
///
/// # Errors
///
/// Returns an error for an unknown ID or invalid input.
pub fn patch_payment(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    payment_id: i64,
    patch: PaymentPatch,
    now: Now,
) -> Result<PaymentView, ApiError> {
    let existing: Payment = find_payment(persistence, channel, payment_id)?;
    let mut request: PaymentRequest = request_from_payment(existing);
    merge(&mut request.amount, patch.amount);
    merge(&mut request.agent_id, patch.agent_id);
    merge(&mut request.booking_card_id, patch.booking_card_id);
    merge(&mut request.is_chargeback, patch.is_chargeback);
    merge(&mut request.issued_at, patch.issued_at.map(Some));
    merge(&mut request.cheque_id, patch.cheque_id);
    merge(&mut request.received_by, patch.received_by);
    merge(&mut request.reference_number, patch.reference_number);
    merge(&mut request.bank_name, patch.bank_name.map(Some));
    update_payment(persistence, channel, payment_id, request, now)
}

/// Deletes a payment.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn delete_payment(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    payment_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_payment(channel, payment_id)?;
    Ok(())
}

/// Totals the payments of one channel. Cash is broken down by receiving
/// worker and bank transfers by bank.
///
/// # Errors
///
/// Returns an error for a malformed date range or a failed query.
pub fn payment_statistics(
    persistence: &mut SqlitePersistence,
    channel: PaymentChannel,
    filter: PaymentFilterQuery,
    now: Now,
) -> Result<ChannelStatisticsView, ApiError> {
    let filter: PaymentFilter = payment_filter(channel, filter, now)?;
    let payments: Vec<Payment> = persistence.all_payments(&filter)?;
    let stats: ChannelStatistics = channel_statistics(&payments);

    Ok(ChannelStatisticsView {
        channel: channel.as_str().to_string(),
        payments: stats.payments,
        chargebacks: stats.chargebacks,
        payment_amount: stats.payment_amount.minor(),
        chargeback_amount: stats.chargeback_amount.minor(),
        net: stats.net().minor(),
        by_worker: stats
            .by_worker
            .into_iter()
            .map(|(worker_id, totals)| WorkerPaymentTotals {
                worker_id,
                totals: ChannelTotalsView::from(totals),
            })
            .collect(),
        by_bank: stats
            .by_bank
            .into_iter()
            .map(|(bank_name, totals)| BankPaymentTotals {
                bank_name,
                totals: ChannelTotalsView::from(totals),
            })
            .collect(),
    })
}

// ========================================================================
// Payment orders
// ========================================================================

fn order_view(order: PaymentOrder, payments: &[Payment]) -> PaymentOrderView {
    let breakdown: PaymentBreakdown = PaymentBreakdown::from_payments(payments);
    PaymentOrderView {
        id: id_of(order.id),
        booking_card_id: order.booking_card_id,
        notes: order.notes,
        created_at: format_timestamp(order.created_at),
        payment_ids: payments.iter().filter_map(|p| p.id).collect(),
        card_total: breakdown.card.minor(),
        cash_total: breakdown.cash.minor(),
        bank_total: breakdown.bank.minor(),
        total: breakdown.total().minor(),
    }
}

fn render_order(
    persistence: &mut SqlitePersistence,
    order: PaymentOrder,
) -> Result<PaymentOrderView, ApiError> {
    let payments: Vec<Payment> = persistence.payments_for_order(id_of(order.id))?;
    Ok(order_view(order, &payments))
}

fn find_order(
    persistence: &mut SqlitePersistence,
    payment_order_id: i64,
) -> Result<PaymentOrder, ApiError> {
    found(
        persistence.get_payment_order(payment_order_id)?,
        "PaymentOrder",
        payment_order_id,
    )
}

/// Lists payment orders with their totals.
///
/// # Errors
///
/// Returns an error for invalid list parameters or a failed query.
pub fn list_payment_orders(
    persistence: &mut SqlitePersistence,
    query: ListQuery,
    filter: PaymentOrderFilterQuery,
) -> Result<ListResponse<PaymentOrderView>, ApiError> {
    let filter: PaymentOrderFilter = PaymentOrderFilter {
        booking_card_id: filter.booking_card_id,
    };
    let page: Page<PaymentOrder> = persistence.list_payment_orders(&list_params(query)?, filter)?;
    let mut results: Vec<PaymentOrderView> = Vec::with_capacity(page.items.len());
    for order in page.items {
        results.push(render_order(persistence, order)?);
    }
    Ok(ListResponse {
        count: page.count,
        results,
    })
}

/// Retrieves one payment order.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn get_payment_order(
    persistence: &mut SqlitePersistence,
    payment_order_id: i64,
) -> Result<PaymentOrderView, ApiError> {
    let order: PaymentOrder = find_order(persistence, payment_order_id)?;
    render_order(persistence, order)
}

/// Opens the payment order of a booking card.
///
/// # Errors
///
/// Returns an error for an unknown card or a card that already has an
/// order.
pub fn create_payment_order(
    persistence: &mut SqlitePersistence,
    request: CreatePaymentOrderRequest,
    now: Now,
) -> Result<PaymentOrderView, ApiError> {
    referenced(
        persistence.get_booking_card(request.booking_card_id)?,
        "booking_card_id",
        request.booking_card_id,
    )?;
    let existing: Option<PaymentOrder> =
        persistence.get_payment_order_for_card(request.booking_card_id)?;
    let mut order: PaymentOrder = PaymentOrder::open(
        request.booking_card_id,
        existing.as_ref(),
        non_blank(request.notes),
        now.instant,
    )?;
    order.id = Some(persistence.insert_payment_order(&order)?);
    Ok(order_view(order, &[]))
}

/// Replaces the notes of a payment order.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn update_payment_order(
    persistence: &mut SqlitePersistence,
    payment_order_id: i64,
    request: UpdatePaymentOrderRequest,
) -> Result<PaymentOrderView, ApiError> {
    let mut order: PaymentOrder = find_order(persistence, payment_order_id)?;
    order.notes = non_blank(request.notes);
    persistence.update_payment_order_notes(payment_order_id, order.notes.as_deref())?;
    render_order(persistence, order)
}

/// Partially updates a payment order.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn patch_payment_order(
    persistence: &mut SqlitePersistence,
    payment_order_id: i64,
    patch: PaymentOrderPatch,
) -> Result<PaymentOrderView, ApiError> {
    let existing: PaymentOrder = find_order(persistence, payment_order_id)?;
    let mut request: UpdatePaymentOrderRequest = UpdatePaymentOrderRequest {
        notes: existing.notes,
    };
    merge(&mut request.notes, patch.notes);
    update_payment_order(persistence, payment_order_id, request)
}

/// Deletes a payment order. Attached payments are kept.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown ID.
pub fn delete_payment_order(
    persistence: &mut SqlitePersistence,
    payment_order_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_payment_order(payment_order_id)?;
    Ok(())
}

/// Attaches a payment of `channel` to an order.
///
/// The payment must belong to the order's booking card. Attaching a
/// payment twice is a no-op.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown order or payment, and a rule
/// violation for a channel or booking card mismatch.
pub fn attach_payment(
    persistence: &mut SqlitePersistence,
    payment_order_id: i64,
    channel: PaymentChannel,
    request: AttachPaymentRequest,
) -> Result<PaymentOrderView, ApiError> {
    let order: PaymentOrder = find_order(persistence, payment_order_id)?;
    let payment: Payment = found(
        persistence.get_any_payment(request.payment_id)?,
        "Payment",
        request.payment_id,
    )?;
    order.check_attachable(&payment, channel)?;

    persistence.in_transaction(|p| {
        p.attach_payment(payment_order_id, request.payment_id)?;
        render_order(p, order)
    })
}
