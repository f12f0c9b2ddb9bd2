// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
    /// A unique constraint rejected the write.
    UniqueViolation {
        /// The column named by the constraint, when it can be determined.
        field: Option<String>,
        /// The database message.
        message: String,
    },
    /// The row is still referenced by other records and cannot be removed.
    ReferencedRecord(String),
    /// A stored value could not be converted back into its domain type.
    CorruptRecord(String),
    /// An unknown field was requested in `ordering`.
    InvalidOrdering(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::UniqueViolation { field, message } => match field {
                Some(field) => write!(f, "Value for '{field}' already exists"),
                None => write!(f, "Duplicate value: {message}"),
            },
            Self::ReferencedRecord(msg) => {
                write!(f, "Record is referenced by other records: {msg}")
            }
            Self::CorruptRecord(msg) => write!(f, "Stored record is invalid: {msg}"),
            Self::InvalidOrdering(field) => write!(f, "Cannot order by '{field}'"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Extracts the column from an `SQLite` message such as
/// `UNIQUE constraint failed: guests.phone`.
fn unique_violation_field(message: &str) -> Option<String> {
    let columns: &str = message.strip_prefix("UNIQUE constraint failed: ")?;
    let first: &str = columns.split(',').next()?.trim();
    let (_table, column) = first.split_once('.')?;
    Some(column.to_string())
}

/// `SQLite` reports restrict and missing-parent failures with this message
/// under the generic constraint code, so the kind alone is not enough.
fn is_foreign_key_failure(message: &str) -> bool {
    message.starts_with("FOREIGN KEY constraint failed")
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let message: String = info.message().to_string();
                Self::UniqueViolation {
                    field: unique_violation_field(&message),
                    message,
                }
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ReferencedRecord(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(_, ref info)
                if is_foreign_key_failure(info.message()) =>
            {
                Self::ReferencedRecord(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<innkeep_domain::DomainError> for PersistenceError {
    fn from(err: innkeep_domain::DomainError) -> Self {
        Self::CorruptRecord(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{PersistenceError, is_foreign_key_failure, unique_violation_field};
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};

    #[test]
    fn test_unique_violation_field_is_extracted() {
        assert_eq!(
            unique_violation_field("UNIQUE constraint failed: guests.phone").as_deref(),
            Some("phone")
        );
        assert_eq!(
            unique_violation_field(
                "UNIQUE constraint failed: booking_card_bookings.booking_card_id, booking_card_bookings.booking_id"
            )
            .as_deref(),
            Some("booking_card_id")
        );
        assert_eq!(unique_violation_field("something else"), None);
    }

    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_restrict_failure_under_generic_kind_is_referenced_record() {
        assert!(is_foreign_key_failure("FOREIGN KEY constraint failed"));
        assert!(!is_foreign_key_failure("NOT NULL constraint failed: rooms.floor"));

        let err = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::Unknown,
            Box::new(Info("FOREIGN KEY constraint failed")),
        );
        assert_eq!(
            PersistenceError::from(err),
            PersistenceError::ReferencedRecord(String::from("FOREIGN KEY constraint failed"))
        );
    }
}
