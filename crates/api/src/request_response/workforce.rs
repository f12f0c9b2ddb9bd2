// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job title, worker and shift report DTOs.

use super::double_option;

/// Full job title payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JobTitleRequest {
    /// The job title (unique).
    pub title: String,
    /// Hourly pay rate in minor units.
    pub pay_per_hour: i64,
}

/// Partial job title update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JobTitlePatch {
    pub title: Option<String>,
    pub pay_per_hour: Option<i64>,
}

/// A job title as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JobTitleView {
    pub id: i64,
    pub title: String,
    pub pay_per_hour: i64,
}

/// Full worker payload for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkerRequest {
    /// The worker's name.
    pub name: String,
    /// The job title used when a shift starts without one.
    #[serde(default)]
    pub main_job_title_id: Option<i64>,
    /// External chat identity (unique).
    pub telegram_id: i64,
    /// External chat handle.
    #[serde(default)]
    pub telegram_username: Option<String>,
}

/// Partial worker update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkerPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub main_job_title_id: Option<Option<i64>>,
    pub telegram_id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub telegram_username: Option<Option<String>>,
}

/// A worker as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkerView {
    pub id: i64,
    pub name: String,
    pub main_job_title_id: Option<i64>,
    pub telegram_id: i64,
    pub telegram_username: Option<String>,
    /// Whether the worker currently has an open shift.
    pub is_working: bool,
    pub created_at: String,
}

/// Worker list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkerFilterQuery {
    pub main_job_title_id: Option<i64>,
    pub is_working: Option<bool>,
}

/// Body of `POST /workers/{id}/start-shift`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StartShiftRequest {
    /// Overrides the worker's main job title for this shift.
    #[serde(default)]
    pub job_title_id: Option<i64>,
}

/// Body of `POST /reports`: starts a shift for the given worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateReportRequest {
    pub worker_id: i64,
    #[serde(default)]
    pub job_title_id: Option<i64>,
}

/// Body of the finish-shift actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FinishShiftRequest {
    /// Finish time (RFC 3339); defaults to now.
    #[serde(default)]
    pub finish: Option<String>,
}

/// A shift report as returned by the API.
///
/// Duration, hours and payment are `null` while the shift is open.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShiftReportView {
    pub id: i64,
    pub worker_id: i64,
    pub job_title_id: i64,
    pub start: String,
    pub finish: Option<String>,
    pub is_open: bool,
    pub duration_seconds: Option<i64>,
    /// Hours worked, rounded to 2 decimals.
    pub hours: Option<f64>,
    /// Pay in minor units.
    pub total_payment: Option<i64>,
}

/// Shift report list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportFilterQuery {
    pub worker_id: Option<i64>,
    pub job_title_id: Option<i64>,
    /// `true` for open shifts only, `false` for finished ones.
    pub open: Option<bool>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Aggregated totals for one group of finished shifts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShiftTotalsView {
    pub shifts: u64,
    pub seconds: i64,
    pub hours: f64,
    pub payment: i64,
}

/// Totals for one worker.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorkerShiftTotals {
    pub worker_id: i64,
    #[serde(flatten)]
    pub totals: ShiftTotalsView,
}

/// Totals for one job title.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JobTitleShiftTotals {
    pub job_title: String,
    #[serde(flatten)]
    pub totals: ShiftTotalsView,
}

/// Shift statistics over an optional date range.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShiftStatisticsView {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub overall: ShiftTotalsView,
    pub by_worker: Vec<WorkerShiftTotals>,
    pub by_job_title: Vec<JobTitleShiftTotals>,
}
