// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Innkeep hotel back office.
//!
//! The store is a single `SQLite` database accessed through Diesel. The
//! schema is embedded as migrations and applied at startup; foreign key
//! enforcement is verified before the adapter is handed out.
//!
//! ## Layout
//!
//! - `backend`: connection setup, PRAGMAs, migrations
//! - `queries`: read-only functions, one module per area
//! - `mutations`: write functions, one module per area
//! - [`Persistence`]: the adapter the API layer talks to
//!
//! ## Stored representation
//!
//! - Timestamps: UTC RFC 3339 text, truncated to seconds
//! - Dates: `YYYY-MM-DD`
//! - Money: integer minor units
//! - Flags: 0/1 integers
//!
//! Every function takes the current time as an argument. Nothing in this
//! crate reads the clock.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use innkeep_domain::{
    Agent, Booking, BookingCard, BookingStatus, CatalogItem, CatalogKind, Document, DocumentType,
    Guest, JobTitle, Money, NationalId, Nationality, Payment, PaymentChannel, PaymentOrder, Room,
    RoomCondition, RoomType, ShiftReport, Worker, format_timestamp,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, OffsetDateTime};
use tracing::warn;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so tests
/// never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Applies a client-supplied ordering to a boxed query.
///
/// The ordering names one field, optionally prefixed with `-` for
/// descending order. Field names map to columns through the table given
/// at the call site; any other name returns
/// [`PersistenceError::InvalidOrdering`] from the enclosing function.
///
/// # Usage
///
/// ```ignore
/// let query = apply_ordering!(
///     filtered_agents(filter),
///     params.ordering.as_deref().unwrap_or("id"),
///     {
///         "id" => agents::agent_id,
///         "full_title" => agents::full_title,
///     }
/// );
/// ```
macro_rules! apply_ordering {
    ($query:expr, $ordering:expr, { $($name:literal => $column:expr),+ $(,)? }) => {{
        let (field, descending) = $crate::queries::split_ordering($ordering);
        match field {
            $(
                $name => {
                    if descending {
                        $query.order($column.desc())
                    } else {
                        $query.order($column.asc())
                    }
                }
            )+
            other => {
                return Err($crate::error::PersistenceError::InvalidOrdering(
                    other.to_string(),
                ));
            }
        }
    }};
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AgentFilter, BookingCardFilter, BookingFilter, CatalogFilter, DocumentFilter, GuestFilter,
    ListParams, OperatorData, Page, PaymentFilter, PaymentOrderFilter, RoomConditionFilter,
    RoomFilter, RoomTypeFilter, SessionData, ShiftReportFilter, WorkerFilter,
};
pub use error::PersistenceError;
pub use queries::bookings::CardBillingInputs;

use backend::PersistenceBackend;

/// Type alias used by the server crate.
pub type SqlitePersistence = Persistence;

/// Persistence adapter for every back-office record.
///
/// Holds one `SQLite` connection. Callers that need several writes to
/// succeed or fail together wrap them in [`Persistence::in_transaction`].
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so adapters
    /// created in different tests are isolated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("innkeep_memdb_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Runs `f` inside one database transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back when it
    /// returns `Err`. Nested calls become savepoints.
    ///
    /// # Errors
    ///
    /// Returns the error of `f`, or a database error if the transaction
    /// cannot be opened or committed.
    pub fn in_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<PersistenceError>,
    {
        AnsiTransactionManager::begin_transaction(&mut self.conn).map_err(PersistenceError::from)?;
        match f(self) {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(&mut self.conn)
                    .map_err(PersistenceError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = AnsiTransactionManager::rollback_transaction(&mut self.conn)
                {
                    warn!(error = %rollback_err, "Failed to roll back transaction");
                }
                Err(err)
            }
        }
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// Creates a new operator.
    ///
    /// # Arguments
    ///
    /// * `login_name` - The login name (stored uppercase)
    /// * `display_name` - The display name
    /// * `password` - The plain-text password (stored as a bcrypt hash)
    /// * `role` - `Admin` or `Staff`
    ///
    /// # Errors
    ///
    /// Returns an error if the operator cannot be created.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_operator(&mut self.conn, login_name, display_name, password, role)
    }

    /// Retrieves an operator by login name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_login(&mut self.conn, login_name)
    }

    /// Retrieves an operator by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_id(&mut self.conn, operator_id)
    }

    /// Lists all operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_operators(&mut self) -> Result<Vec<OperatorData>, PersistenceError> {
        queries::operators::list_operators(&mut self.conn)
    }

    /// Counts the total number of operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_operators(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_operators(&mut self.conn)
    }

    /// Counts the admins that are not disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_active_admin_operators(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_active_admin_operators(&mut self.conn)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash cannot be parsed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::operators::verify_password(password, password_hash)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_login(
        &mut self,
        operator_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id, &format_timestamp(now))
    }

    /// Disables an operator and ends all of their sessions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown operator, or a database error.
    pub fn disable_operator(
        &mut self,
        operator_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::operators::set_operator_disabled(
            &mut self.conn,
            operator_id,
            true,
            &format_timestamp(now),
        )
    }

    /// Re-enables a disabled operator.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown operator, or a database error.
    pub fn enable_operator(
        &mut self,
        operator_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::operators::set_operator_disabled(
            &mut self.conn,
            operator_id,
            false,
            &format_timestamp(now),
        )
    }

    /// Deletes all sessions for a specific operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_sessions_for_operator(
        &mut self,
        operator_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::operators::delete_sessions_for_operator(&mut self.conn, operator_id)
    }

    // ========================================================================
    // Session Management
    // ========================================================================

    /// Creates a new session for an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        operator_id: i64,
        now: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_session(
            &mut self.conn,
            session_token,
            operator_id,
            &format_timestamp(now),
            &format_timestamp(expires_at),
        )
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, session_token)
    }

    /// Records activity on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(
        &mut self,
        session_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::operators::update_session_activity(&mut self.conn, session_id, &format_timestamp(now))
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every session that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: OffsetDateTime) -> Result<usize, PersistenceError> {
        mutations::operators::delete_expired_sessions(&mut self.conn, &format_timestamp(now))
    }

    // ========================================================================
    // Job Titles, Workers & Shift Reports
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_job_title(&mut self, job_title_id: i64) -> Result<Option<JobTitle>, PersistenceError> {
        queries::workforce::get_job_title(&mut self.conn, job_title_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_job_titles(&mut self, params: &ListParams) -> Result<Page<JobTitle>, PersistenceError> {
        queries::workforce::list_job_titles(&mut self.conn, params)
    }

    /// # Errors
    ///
    /// Returns an error if the title is taken or the insert fails.
    pub fn insert_job_title(&mut self, job_title: &JobTitle) -> Result<i64, PersistenceError> {
        mutations::workforce::insert_job_title(&mut self.conn, job_title)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, or a database error.
    pub fn update_job_title(
        &mut self,
        job_title_id: i64,
        job_title: &JobTitle,
    ) -> Result<(), PersistenceError> {
        mutations::workforce::update_job_title(&mut self.conn, job_title_id, job_title)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_job_title(&mut self, job_title_id: i64) -> Result<(), PersistenceError> {
        mutations::workforce::delete_job_title(&mut self.conn, job_title_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_worker(&mut self, worker_id: i64) -> Result<Option<Worker>, PersistenceError> {
        queries::workforce::get_worker(&mut self.conn, worker_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_workers(
        &mut self,
        params: &ListParams,
        filter: WorkerFilter,
    ) -> Result<Page<Worker>, PersistenceError> {
        queries::workforce::list_workers(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if the chat identity is taken or the insert fails.
    pub fn insert_worker(&mut self, worker: &Worker) -> Result<i64, PersistenceError> {
        mutations::workforce::insert_worker(&mut self.conn, worker)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, or a database error.
    pub fn update_worker(&mut self, worker_id: i64, worker: &Worker) -> Result<(), PersistenceError> {
        mutations::workforce::update_worker(&mut self.conn, worker_id, worker)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_worker(&mut self, worker_id: i64) -> Result<(), PersistenceError> {
        mutations::workforce::delete_worker(&mut self.conn, worker_id)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown worker, or a database error.
    pub fn set_worker_working(
        &mut self,
        worker_id: i64,
        is_working: bool,
    ) -> Result<(), PersistenceError> {
        mutations::workforce::set_worker_working(&mut self.conn, worker_id, is_working)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_shift_report(&mut self, report_id: i64) -> Result<Option<ShiftReport>, PersistenceError> {
        queries::workforce::get_shift_report(&mut self.conn, report_id)
    }

    /// Returns the open shift of a worker, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn find_open_shift(&mut self, worker_id: i64) -> Result<Option<ShiftReport>, PersistenceError> {
        queries::workforce::find_open_shift(&mut self.conn, worker_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_shift_reports(
        &mut self,
        params: &ListParams,
        filter: ShiftReportFilter,
    ) -> Result<Page<ShiftReport>, PersistenceError> {
        queries::workforce::list_shift_reports(&mut self.conn, params, filter)
    }

    /// Loads reports with their job titles for pay aggregation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn shift_reports_with_job_titles(
        &mut self,
        filter: ShiftReportFilter,
    ) -> Result<Vec<(ShiftReport, JobTitle)>, PersistenceError> {
        queries::workforce::shift_reports_with_job_titles(&mut self.conn, filter)
    }

    /// # Errors
    ///
    /// Returns `UniqueViolation` if the worker already has an open shift, or
    /// a database error.
    pub fn insert_shift_report(&mut self, report: &ShiftReport) -> Result<i64, PersistenceError> {
        mutations::workforce::insert_shift_report(&mut self.conn, report)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown report, or a database error.
    pub fn finish_shift_report(&mut self, report: &ShiftReport) -> Result<(), PersistenceError> {
        mutations::workforce::finish_shift_report(&mut self.conn, report)
    }

    // ========================================================================
    // Nationalities & Documents
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_nationality(
        &mut self,
        nationality_id: i64,
    ) -> Result<Option<Nationality>, PersistenceError> {
        queries::documents::get_nationality(&mut self.conn, nationality_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_nationalities(
        &mut self,
        params: &ListParams,
    ) -> Result<Page<Nationality>, PersistenceError> {
        queries::documents::list_nationalities(&mut self.conn, params)
    }

    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub fn insert_nationality(&mut self, nationality: &Nationality) -> Result<i64, PersistenceError> {
        mutations::documents::insert_nationality(&mut self.conn, nationality)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, or a database error.
    pub fn update_nationality(
        &mut self,
        nationality_id: i64,
        nationality: &Nationality,
    ) -> Result<(), PersistenceError> {
        mutations::documents::update_nationality(&mut self.conn, nationality_id, nationality)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_nationality(&mut self, nationality_id: i64) -> Result<(), PersistenceError> {
        mutations::documents::delete_nationality(&mut self.conn, nationality_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_document(&mut self, document_id: i64) -> Result<Option<Document>, PersistenceError> {
        queries::documents::get_document(&mut self.conn, document_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_document_by_national_id(
        &mut self,
        national_id: &NationalId,
    ) -> Result<Option<Document>, PersistenceError> {
        queries::documents::get_document_by_national_id(&mut self.conn, national_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_documents(
        &mut self,
        params: &ListParams,
        filter: DocumentFilter,
    ) -> Result<Page<Document>, PersistenceError> {
        queries::documents::list_documents(&mut self.conn, params, filter)
    }

    /// Documents whose expiry falls in `(today, today + days]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn list_documents_expiring_within(
        &mut self,
        today: Date,
        days: i64,
    ) -> Result<Vec<Document>, PersistenceError> {
        queries::documents::list_documents_expiring_within(&mut self.conn, today, days)
    }

    /// Documents whose expiry is before `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn list_expired_documents(&mut self, today: Date) -> Result<Vec<Document>, PersistenceError> {
        queries::documents::list_expired_documents(&mut self.conn, today)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn document_types_and_expiry(
        &mut self,
    ) -> Result<Vec<(DocumentType, Option<Date>)>, PersistenceError> {
        queries::documents::document_types_and_expiry(&mut self.conn)
    }

    /// # Errors
    ///
    /// Returns an error if the national ID is taken or the insert fails.
    pub fn insert_document(&mut self, document: &Document) -> Result<i64, PersistenceError> {
        mutations::documents::insert_document(&mut self.conn, document)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, or a database error.
    pub fn update_document(
        &mut self,
        document_id: i64,
        document: &Document,
    ) -> Result<(), PersistenceError> {
        mutations::documents::update_document(&mut self.conn, document_id, document)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_document(&mut self, document_id: i64) -> Result<(), PersistenceError> {
        mutations::documents::delete_document(&mut self.conn, document_id)
    }

    // ========================================================================
    // Guests
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_guest(&mut self, guest_id: i64) -> Result<Option<Guest>, PersistenceError> {
        queries::guests::get_guest(&mut self.conn, guest_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_guests(
        &mut self,
        params: &ListParams,
        filter: GuestFilter,
    ) -> Result<Page<Guest>, PersistenceError> {
        queries::guests::list_guests(&mut self.conn, params, filter)
    }

    /// Returns true if another guest already uses `phone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn phone_in_use(
        &mut self,
        phone: &str,
        excluding_guest_id: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        queries::guests::phone_in_use(&mut self.conn, phone, excluding_guest_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn guest_document_ids(
        &mut self,
        guest_ids: &[i64],
    ) -> Result<BTreeMap<i64, Vec<i64>>, PersistenceError> {
        queries::guests::guest_document_ids(&mut self.conn, guest_ids)
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_guest(&mut self, guest: &Guest) -> Result<i64, PersistenceError> {
        mutations::guests::insert_guest(&mut self.conn, guest)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown guest, or a database error.
    pub fn update_guest(&mut self, guest_id: i64, guest: &Guest) -> Result<(), PersistenceError> {
        mutations::guests::update_guest(&mut self.conn, guest_id, guest)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_guest(&mut self, guest_id: i64) -> Result<(), PersistenceError> {
        mutations::guests::delete_guest(&mut self.conn, guest_id)
    }

    /// # Errors
    ///
    /// Returns `ReferencedRecord` for an unknown document, or a database
    /// error.
    pub fn replace_guest_documents(
        &mut self,
        guest_id: i64,
        document_ids: &[i64],
    ) -> Result<(), PersistenceError> {
        mutations::guests::replace_guest_documents(&mut self.conn, guest_id, document_ids)
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_agent(&mut self, agent_id: i64) -> Result<Option<Agent>, PersistenceError> {
        queries::agents::get_agent(&mut self.conn, agent_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_agents(
        &mut self,
        params: &ListParams,
        filter: AgentFilter,
    ) -> Result<Page<Agent>, PersistenceError> {
        queries::agents::list_agents(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if either title is taken or the insert fails.
    pub fn insert_agent(&mut self, agent: &Agent) -> Result<i64, PersistenceError> {
        mutations::agents::insert_agent(&mut self.conn, agent)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, or a database error.
    pub fn update_agent(&mut self, agent_id: i64, agent: &Agent) -> Result<(), PersistenceError> {
        mutations::agents::update_agent(&mut self.conn, agent_id, agent)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_agent(&mut self, agent_id: i64) -> Result<(), PersistenceError> {
        mutations::agents::delete_agent(&mut self.conn, agent_id)
    }

    // ========================================================================
    // Room Types, Rooms & Room Conditions
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_room_type(&mut self, room_type_id: i64) -> Result<Option<RoomType>, PersistenceError> {
        queries::inventory::get_room_type(&mut self.conn, room_type_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_room_types(
        &mut self,
        params: &ListParams,
        filter: RoomTypeFilter,
    ) -> Result<Page<RoomType>, PersistenceError> {
        queries::inventory::list_room_types(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_room_type(&mut self, room_type: &RoomType) -> Result<i64, PersistenceError> {
        mutations::inventory::insert_room_type(&mut self.conn, room_type)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room type, or a database error.
    pub fn update_room_type(
        &mut self,
        room_type_id: i64,
        room_type: &RoomType,
    ) -> Result<(), PersistenceError> {
        mutations::inventory::update_room_type(&mut self.conn, room_type_id, room_type)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_room_type(&mut self, room_type_id: i64) -> Result<(), PersistenceError> {
        mutations::inventory::delete_room_type(&mut self.conn, room_type_id)
    }

    /// Nightly rate per room: the price of its lowest-id room type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn nightly_rates(&mut self, room_ids: &[i64]) -> Result<BTreeMap<i64, Money>, PersistenceError> {
        queries::inventory::nightly_rates(&mut self.conn, room_ids)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(&mut self, room_id: i64) -> Result<Option<Room>, PersistenceError> {
        queries::inventory::get_room(&mut self.conn, room_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_rooms(
        &mut self,
        params: &ListParams,
        filter: RoomFilter,
    ) -> Result<Page<Room>, PersistenceError> {
        queries::inventory::list_rooms(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if the number is taken, a room type is missing, or
    /// the insert fails.
    pub fn insert_room(&mut self, room: &Room) -> Result<i64, PersistenceError> {
        mutations::inventory::insert_room(&mut self.conn, room)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, `ReferencedRecord`, or a
    /// database error.
    pub fn update_room(&mut self, room_id: i64, room: &Room) -> Result<(), PersistenceError> {
        mutations::inventory::update_room(&mut self.conn, room_id, room)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_room(&mut self, room_id: i64) -> Result<(), PersistenceError> {
        mutations::inventory::delete_room(&mut self.conn, room_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_condition(
        &mut self,
        room_condition_id: i64,
    ) -> Result<Option<RoomCondition>, PersistenceError> {
        queries::inventory::get_room_condition(&mut self.conn, room_condition_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_room_conditions(
        &mut self,
        params: &ListParams,
        filter: RoomConditionFilter,
    ) -> Result<Page<RoomCondition>, PersistenceError> {
        queries::inventory::list_room_conditions(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if the label is taken or the insert fails.
    pub fn insert_room_condition(&mut self, condition: &RoomCondition) -> Result<i64, PersistenceError> {
        mutations::inventory::insert_room_condition(&mut self.conn, condition)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, or a database error.
    pub fn update_room_condition(
        &mut self,
        room_condition_id: i64,
        condition: &RoomCondition,
    ) -> Result<(), PersistenceError> {
        mutations::inventory::update_room_condition(&mut self.conn, room_condition_id, condition)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_room_condition(&mut self, room_condition_id: i64) -> Result<(), PersistenceError> {
        mutations::inventory::delete_room_condition(&mut self.conn, room_condition_id)
    }

    // ========================================================================
    // Goods & Services
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_catalog_item(
        &mut self,
        kind: CatalogKind,
        item_id: i64,
    ) -> Result<Option<CatalogItem>, PersistenceError> {
        queries::catalog::get_catalog_item(&mut self.conn, kind, item_id)
    }

    /// Loads the items of one kind with the given IDs. Unknown IDs are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn get_catalog_items(
        &mut self,
        kind: CatalogKind,
        item_ids: &[i64],
    ) -> Result<Vec<CatalogItem>, PersistenceError> {
        queries::catalog::get_catalog_items(&mut self.conn, kind, item_ids)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_catalog_items(
        &mut self,
        params: &ListParams,
        filter: CatalogFilter,
    ) -> Result<Page<CatalogItem>, PersistenceError> {
        queries::catalog::list_catalog_items(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn all_catalog_items(&mut self, kind: CatalogKind) -> Result<Vec<CatalogItem>, PersistenceError> {
        queries::catalog::all_catalog_items(&mut self.conn, kind)
    }

    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_catalog_item(&mut self, item: &CatalogItem) -> Result<i64, PersistenceError> {
        mutations::catalog::insert_catalog_item(&mut self.conn, item)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no item of that kind has the ID, or a database
    /// error.
    pub fn update_catalog_item(
        &mut self,
        kind: CatalogKind,
        item_id: i64,
        item: &CatalogItem,
    ) -> Result<(), PersistenceError> {
        mutations::catalog::update_catalog_item(&mut self.conn, kind, item_id, item)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_catalog_item(&mut self, kind: CatalogKind, item_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_catalog_item(&mut self.conn, kind, item_id)
    }

    // ========================================================================
    // Bookings & Booking Cards
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// Loads the bookings with the given IDs. Unknown IDs are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn get_bookings(&mut self, booking_ids: &[i64]) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::get_bookings(&mut self.conn, booking_ids)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_bookings(
        &mut self,
        params: &ListParams,
        filter: &BookingFilter,
    ) -> Result<Page<Booking>, PersistenceError> {
        queries::bookings::list_bookings(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or the insert fails.
    pub fn insert_booking(&mut self, booking: &Booking) -> Result<i64, PersistenceError> {
        mutations::bookings::insert_booking(&mut self.conn, booking)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn update_booking(&mut self, booking_id: i64, booking: &Booking) -> Result<(), PersistenceError> {
        mutations::bookings::update_booking(&mut self.conn, booking_id, booking)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown booking, or a database error.
    pub fn update_booking_status(
        &mut self,
        booking_id: i64,
        status: BookingStatus,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::bookings::update_booking_status(&mut self.conn, booking_id, status, now)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_booking(&mut self, booking_id: i64) -> Result<(), PersistenceError> {
        mutations::bookings::delete_booking(&mut self.conn, booking_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_booking_card(
        &mut self,
        booking_card_id: i64,
    ) -> Result<Option<BookingCard>, PersistenceError> {
        queries::bookings::get_booking_card(&mut self.conn, booking_card_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_booking_cards(
        &mut self,
        params: &ListParams,
        filter: BookingCardFilter,
    ) -> Result<Page<BookingCard>, PersistenceError> {
        queries::bookings::list_booking_cards(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if a member is missing or the insert fails.
    pub fn insert_booking_card(&mut self, card: &BookingCard) -> Result<i64, PersistenceError> {
        mutations::bookings::insert_booking_card(&mut self.conn, card)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn update_booking_card(
        &mut self,
        booking_card_id: i64,
        card: &BookingCard,
    ) -> Result<(), PersistenceError> {
        mutations::bookings::update_booking_card(&mut self.conn, booking_card_id, card)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_booking_card(&mut self, booking_card_id: i64) -> Result<(), PersistenceError> {
        mutations::bookings::delete_booking_card(&mut self.conn, booking_card_id)
    }

    /// # Errors
    ///
    /// Returns `ReferencedRecord` for an unknown booking, or a database error.
    pub fn add_card_bookings(
        &mut self,
        booking_card_id: i64,
        booking_ids: &[i64],
    ) -> Result<(), PersistenceError> {
        mutations::bookings::add_card_bookings(&mut self.conn, booking_card_id, booking_ids)
    }

    /// # Errors
    ///
    /// Returns `ReferencedRecord` for an unknown item, or a database error.
    pub fn add_card_items(
        &mut self,
        booking_card_id: i64,
        item_ids: &[i64],
    ) -> Result<(), PersistenceError> {
        mutations::bookings::add_card_items(&mut self.conn, booking_card_id, item_ids)
    }

    /// IDs of the cards holding any of the given bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn card_ids_containing_bookings(
        &mut self,
        booking_ids: &[i64],
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::bookings::card_ids_containing_bookings(&mut self.conn, booking_ids)
    }

    /// IDs of the cards holding a booking of the given room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn card_ids_using_room(&mut self, room_id: i64) -> Result<Vec<i64>, PersistenceError> {
        queries::bookings::card_ids_using_room(&mut self.conn, room_id)
    }

    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is invalid.
    pub fn card_billing_inputs(
        &mut self,
        booking_card_id: i64,
    ) -> Result<CardBillingInputs, PersistenceError> {
        queries::bookings::card_billing_inputs(&mut self.conn, booking_card_id)
    }

    /// Stores a computed total and clears the stale flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown card, or a database error.
    pub fn set_card_total(
        &mut self,
        booking_card_id: i64,
        total: Money,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::bookings::set_card_total(&mut self.conn, booking_card_id, total, now)
    }

    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_cards_stale(
        &mut self,
        booking_card_ids: &[i64],
        now: OffsetDateTime,
    ) -> Result<usize, PersistenceError> {
        mutations::bookings::mark_cards_stale(&mut self.conn, booking_card_ids, now)
    }

    // ========================================================================
    // Payments & Payment Orders
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_payment(
        &mut self,
        channel: PaymentChannel,
        payment_id: i64,
    ) -> Result<Option<Payment>, PersistenceError> {
        queries::payments::get_payment(&mut self.conn, channel, payment_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_any_payment(&mut self, payment_id: i64) -> Result<Option<Payment>, PersistenceError> {
        queries::payments::get_any_payment(&mut self.conn, payment_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_payments(
        &mut self,
        params: &ListParams,
        filter: &PaymentFilter,
    ) -> Result<Page<Payment>, PersistenceError> {
        queries::payments::list_payments(&mut self.conn, params, filter)
    }

    /// Every payment matching the filter, unpaginated, for statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn all_payments(&mut self, filter: &PaymentFilter) -> Result<Vec<Payment>, PersistenceError> {
        queries::payments::all_payments(&mut self.conn, filter)
    }

    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or the insert fails.
    pub fn insert_payment(&mut self, payment: &Payment) -> Result<i64, PersistenceError> {
        mutations::payments::insert_payment(&mut self.conn, payment)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn update_payment(
        &mut self,
        channel: PaymentChannel,
        payment_id: i64,
        payment: &Payment,
    ) -> Result<(), PersistenceError> {
        mutations::payments::update_payment(&mut self.conn, channel, payment_id, payment)
    }

    /// # Errors
    ///
    /// Returns `NotFound`, `ReferencedRecord`, or a database error.
    pub fn delete_payment(
        &mut self,
        channel: PaymentChannel,
        payment_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::payments::delete_payment(&mut self.conn, channel, payment_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_payment_order(
        &mut self,
        payment_order_id: i64,
    ) -> Result<Option<PaymentOrder>, PersistenceError> {
        queries::payments::get_payment_order(&mut self.conn, payment_order_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid.
    pub fn get_payment_order_for_card(
        &mut self,
        booking_card_id: i64,
    ) -> Result<Option<PaymentOrder>, PersistenceError> {
        queries::payments::get_payment_order_for_card(&mut self.conn, booking_card_id)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or the ordering is unknown.
    pub fn list_payment_orders(
        &mut self,
        params: &ListParams,
        filter: PaymentOrderFilter,
    ) -> Result<Page<PaymentOrder>, PersistenceError> {
        queries::payments::list_payment_orders(&mut self.conn, params, filter)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn payments_for_order(&mut self, payment_order_id: i64) -> Result<Vec<Payment>, PersistenceError> {
        queries::payments::payments_for_order(&mut self.conn, payment_order_id)
    }

    /// # Errors
    ///
    /// Returns `UniqueViolation` if the card already has an order, or a
    /// database error.
    pub fn insert_payment_order(&mut self, order: &PaymentOrder) -> Result<i64, PersistenceError> {
        mutations::payments::insert_payment_order(&mut self.conn, order)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown order, or a database error.
    pub fn update_payment_order_notes(
        &mut self,
        payment_order_id: i64,
        notes: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::payments::update_payment_order_notes(&mut self.conn, payment_order_id, notes)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown order, or a database error.
    pub fn delete_payment_order(&mut self, payment_order_id: i64) -> Result<(), PersistenceError> {
        mutations::payments::delete_payment_order(&mut self.conn, payment_order_id)
    }

    /// # Errors
    ///
    /// Returns `ReferencedRecord` if either side is missing, or a database
    /// error.
    pub fn attach_payment(
        &mut self,
        payment_order_id: i64,
        payment_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::payments::attach_payment(&mut self.conn, payment_order_id, payment_id)
    }
}
