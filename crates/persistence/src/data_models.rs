// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{
    BookingCardStatus, BookingStatus, CatalogKind, DateRange, DocumentType, Gender,
    PaymentChannel,
};
use serde::{Deserialize, Serialize};
use time::Date;

/// Operator account as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub disabled_at: Option<String>,
    pub last_login_at: Option<String>,
}

/// Operator session as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// Search, ordering and pagination shared by every list query.
///
/// `ordering` names one field, with a leading `-` for descending order.
/// When it is `None` each list uses its own default ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of a list query. `count` is the total before pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub count: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Converts every item while keeping the total.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            count: self.count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerFilter {
    pub main_job_title_id: Option<i64>,
    pub is_working: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftReportFilter {
    pub worker_id: Option<i64>,
    pub job_title_id: Option<i64>,
    /// `Some(true)` keeps open shifts only, `Some(false)` finished shifts only.
    pub open: Option<bool>,
    /// Bounds on the shift start, whole days.
    pub started: DateRange,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub nationality_id: Option<i64>,
    pub document_type: Option<DocumentType>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuestFilter {
    pub nationality_id: Option<i64>,
    pub gender: Option<Gender>,
    pub blacklisted: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentFilter {
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomTypeFilter {
    pub is_active: Option<bool>,
    /// Keeps only types whose validity window contains this date.
    pub relevant_on: Option<Date>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub floor: Option<i64>,
    pub is_active: Option<bool>,
    pub room_type_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomConditionFilter {
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Empty means any status.
    pub statuses: Vec<BookingStatus>,
    pub guest_id: Option<i64>,
    pub agent_id: Option<i64>,
    pub room_id: Option<i64>,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingCardFilter {
    pub status: Option<BookingCardStatus>,
    pub primary_guest_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogFilter {
    pub kind: CatalogKind,
    /// Keeps only items whose validity window contains this date.
    pub relevant_on: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFilter {
    pub channel: PaymentChannel,
    pub agent_id: Option<i64>,
    pub booking_card_id: Option<i64>,
    pub is_chargeback: Option<bool>,
    pub received_by: Option<i64>,
    pub bank_name: Option<String>,
    /// Bounds on the issue timestamp, whole days.
    pub issued: DateRange,
}

impl PaymentFilter {
    /// A filter that keeps every payment of one channel.
    #[must_use]
    pub fn channel(channel: PaymentChannel) -> Self {
        Self {
            channel,
            agent_id: None,
            booking_card_id: None,
            is_chargeback: None,
            received_by: None,
            bank_name: None,
            issued: DateRange::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentOrderFilter {
    pub booking_card_id: Option<i64>,
}
