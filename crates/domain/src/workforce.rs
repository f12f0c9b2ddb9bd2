// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job titles, workers and the shift ledger.
//!
//! ## Invariants
//!
//! - A worker has at most one open (unfinished) shift report
//! - A report is finished exactly once, and never before it started
//! - Pay is computed in minor units from whole seconds worked

use crate::error::DomainError;
use crate::money::Money;
use crate::validation::{require_positive, require_text};
use std::collections::BTreeMap;
use time::{Duration, OffsetDateTime};

const SECONDS_PER_HOUR: i128 = 3600;

/// A role a worker can hold, with its hourly pay rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTitle {
    pub id: Option<i64>,
    pub title: String,
    pub pay_per_hour: Money,
}

impl JobTitle {
    /// # Errors
    ///
    /// Returns an error if the title is blank or the rate is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title)?;
        require_positive("pay_per_hour", self.pay_per_hour)
    }
}

/// A member of staff whose shifts are tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub id: Option<i64>,
    pub name: String,
    pub main_job_title_id: Option<i64>,
    /// External chat identity, unique per worker.
    pub telegram_id: i64,
    pub telegram_username: Option<String>,
    pub is_working: bool,
    pub created_at: OffsetDateTime,
}

impl Worker {
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)
    }

    /// Resolves the job title a new shift is booked under.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::JobTitleRequired` if neither an explicit title
    /// nor a main job title is available.
    pub fn shift_job_title(&self, requested: Option<i64>) -> Result<i64, DomainError> {
        requested
            .or(self.main_job_title_id)
            .ok_or(DomainError::JobTitleRequired {
                worker_id: self.id.unwrap_or_default(),
            })
    }
}

/// One timed work interval for a worker under a job title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftReport {
    pub id: Option<i64>,
    pub worker_id: i64,
    pub job_title_id: i64,
    pub start: OffsetDateTime,
    pub finish: Option<OffsetDateTime>,
}

impl ShiftReport {
    /// Opens a shift for a worker.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ShiftAlreadyOpen` if `open_shift` is present.
    pub fn start(
        worker_id: i64,
        job_title_id: i64,
        open_shift: Option<&Self>,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if let Some(open) = open_shift {
            return Err(DomainError::ShiftAlreadyOpen {
                worker_id,
                report_id: open.id.unwrap_or_default(),
            });
        }
        Ok(Self {
            id: None,
            worker_id,
            job_title_id,
            start: now,
            finish: None,
        })
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.finish.is_none()
    }

    /// Closes the shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift is already finished or `finish` is
    /// earlier than the start.
    pub fn finish(&mut self, finish: OffsetDateTime) -> Result<(), DomainError> {
        if !self.is_open() {
            return Err(DomainError::ShiftAlreadyFinished {
                report_id: self.id.unwrap_or_default(),
            });
        }
        if finish < self.start {
            return Err(DomainError::FinishBeforeStart {
                start: self.start,
                finish,
            });
        }
        self.finish = Some(finish);
        Ok(())
    }

    /// Time worked; `None` while the shift is open.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.finish.map(|finish| finish - self.start)
    }

    /// Hours worked rounded to two decimals; `None` while open.
    #[must_use]
    pub fn hours(&self) -> Option<f64> {
        self.duration().map(|d| round_hours(d.whole_seconds()))
    }

    /// Pay for the shift at `rate` per hour; `None` while open.
    #[must_use]
    pub fn total_payment(&self, rate: Money) -> Option<Money> {
        self.duration().map(|d| shift_payment(d, rate))
    }
}

/// Pay for `worked` at `rate` per hour, rounded half-up to a minor unit.
#[must_use]
pub fn shift_payment(worked: Duration, rate: Money) -> Money {
    let numerator: i128 = i128::from(rate.minor()) * i128::from(worked.whole_seconds());
    let rounded: i128 = (numerator * 2 + SECONDS_PER_HOUR) / (SECONDS_PER_HOUR * 2);
    Money::from_minor(i64::try_from(rounded).unwrap_or(i64::MAX))
}

/// Converts seconds to hours rounded to two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn round_hours(seconds: i64) -> f64 {
    let hours: f64 = seconds as f64 / 3600.0;
    (hours * 100.0).round() / 100.0
}

/// Accumulated shifts, time and pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftTotals {
    pub shifts: u64,
    pub seconds: i64,
    pub payment: Money,
}

impl ShiftTotals {
    fn record(&mut self, seconds: i64, payment: Money) {
        self.shifts += 1;
        self.seconds += seconds;
        self.payment += payment;
    }

    #[must_use]
    pub fn hours(&self) -> f64 {
        round_hours(self.seconds)
    }
}

/// Shift statistics overall, per worker and per job title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftStatistics {
    pub overall: ShiftTotals,
    pub by_worker: BTreeMap<i64, ShiftTotals>,
    pub by_job_title: BTreeMap<String, ShiftTotals>,
}

/// Summarizes finished shifts paired with their job titles.
///
/// Open shifts are skipped. An empty input yields zero totals.
#[must_use]
pub fn summarize_shifts<'a, I>(shifts: I) -> ShiftStatistics
where
    I: IntoIterator<Item = (&'a ShiftReport, &'a JobTitle)>,
{
    let mut stats = ShiftStatistics::default();
    for (report, job_title) in shifts {
        let Some(worked) = report.duration() else {
            continue;
        };
        let seconds: i64 = worked.whole_seconds();
        let payment: Money = shift_payment(worked, job_title.pay_per_hour);

        stats.overall.record(seconds, payment);
        stats
            .by_worker
            .entry(report.worker_id)
            .or_default()
            .record(seconds, payment);
        stats
            .by_job_title
            .entry(job_title.title.clone())
            .or_default()
            .record(seconds, payment);
    }
    stats
}
