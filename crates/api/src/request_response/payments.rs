// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment and payment order DTOs.
//!
//! The three channel collections share one payload. Channel-specific
//! references that do not apply to a channel are ignored on write and
//! returned as `null`.

use super::double_option;

/// Full payment payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentRequest {
    /// Amount in minor units, always positive.
    pub amount: i64,
    #[serde(default)]
    pub agent_id: Option<i64>,
    pub booking_card_id: i64,
    #[serde(default)]
    pub is_chargeback: bool,
    /// Issue time (RFC 3339); defaults to now.
    #[serde(default)]
    pub issued_at: Option<String>,
    /// Card and cash: terminal or till cheque reference.
    #[serde(default)]
    pub cheque_id: Option<String>,
    /// Cash: the worker who took the cash.
    #[serde(default)]
    pub received_by: Option<i64>,
    /// Bank: transfer reference.
    #[serde(default)]
    pub reference_number: Option<String>,
    /// Bank: required bank name.
    #[serde(default)]
    pub bank_name: Option<String>,
}

/// Partial payment update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentPatch {
    pub amount: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub agent_id: Option<Option<i64>>,
    pub booking_card_id: Option<i64>,
    pub is_chargeback: Option<bool>,
    pub issued_at: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub cheque_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub received_by: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub reference_number: Option<Option<String>>,
    pub bank_name: Option<String>,
}

/// A payment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentView {
    pub id: i64,
    /// `card`, `cash` or `bank`.
    pub channel: String,
    pub amount: i64,
    pub agent_id: Option<i64>,
    pub booking_card_id: i64,
    pub is_chargeback: bool,
    pub issued_at: String,
    pub cheque_id: Option<String>,
    pub received_by: Option<i64>,
    pub reference_number: Option<String>,
    pub bank_name: Option<String>,
}

/// Payment list and statistics filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentFilterQuery {
    pub agent_id: Option<i64>,
    pub booking_card_id: Option<i64>,
    pub is_chargeback: Option<bool>,
    pub received_by: Option<i64>,
    pub bank_name: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Count and net amount of one group of payments.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelTotalsView {
    pub count: u64,
    pub net: i64,
}

/// Cash totals for one receiving worker.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkerPaymentTotals {
    pub worker_id: i64,
    #[serde(flatten)]
    pub totals: ChannelTotalsView,
}

/// Bank totals for one bank.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BankPaymentTotals {
    pub bank_name: String,
    #[serde(flatten)]
    pub totals: ChannelTotalsView,
}

/// Statistics for one payment channel.
///
/// `by_worker` is filled for cash and `by_bank` for bank transfers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelStatisticsView {
    pub channel: String,
    pub payments: u64,
    pub chargebacks: u64,
    pub payment_amount: i64,
    pub chargeback_amount: i64,
    /// Payments minus chargebacks.
    pub net: i64,
    pub by_worker: Vec<WorkerPaymentTotals>,
    pub by_bank: Vec<BankPaymentTotals>,
}

/// Body of `POST /payment-orders`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreatePaymentOrderRequest {
    /// The booking card; at most one order per card.
    pub booking_card_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `PUT /payment-orders/{id}`. The booking card of an order is
/// fixed once created; only the notes can be replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdatePaymentOrderRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `PATCH /payment-orders/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentOrderPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Body of the add-payment actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttachPaymentRequest {
    pub payment_id: i64,
}

/// A payment order with its per-channel totals.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentOrderView {
    pub id: i64,
    pub booking_card_id: i64,
    pub notes: Option<String>,
    pub created_at: String,
    pub payment_ids: Vec<i64>,
    /// Net card total (chargebacks subtracted).
    pub card_total: i64,
    pub cash_total: i64,
    pub bank_total: i64,
    /// Sum of the three channel totals.
    pub total: i64,
}

/// Payment order list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentOrderFilterQuery {
    pub booking_card_id: Option<i64>,
}
