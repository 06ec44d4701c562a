//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)      ValidationError / CoreError           │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  DbError (this module) ← Categorized by constraint kind                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (seed binary returns it from main)                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here retries. Errors are classified and handed back.

use mesa_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Duplicate employee number
    /// - Duplicate table number
    /// - Linking the same menu item to an order twice
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Referencing a menu, table or employee that does not exist
    /// - Deleting a menu or menu item type that still owns menu items
    /// - Deleting a table or employee that still has orders
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint or trigger rejected the row.
    ///
    /// ## When This Occurs
    /// - Order status outside {Active, Ended}
    /// - Negative price, non-positive table capacity
    /// - Moving an order out of Ended
    #[error("Check violation: {message}")]
    CheckViolation { message: String },

    /// NOT NULL constraint violation.
    #[error("Missing value for {field}")]
    NotNullViolation { field: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Environment configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input rejected before reaching the database.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Domain rule failure (credential hashing, order lifecycle).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => classify_message(db_err.message()),

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Sorts a SQLite error message into a constraint kind.
///
/// SQLite formats:
/// - `UNIQUE constraint failed: <table>.<column>[, <table>.<column>]`
/// - `NOT NULL constraint failed: <table>.<column>`
/// - `CHECK constraint failed: <expr>`
/// - `FOREIGN KEY constraint failed`
/// - `RAISE(ABORT, msg)` from a trigger arrives as `msg`
fn classify_message(msg: &str) -> DbError {
    if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
        DbError::UniqueViolation {
            field: field.to_string(),
            value: "unknown".to_string(),
        }
    } else if let Some(field) = msg.strip_prefix("NOT NULL constraint failed: ") {
        DbError::NotNullViolation {
            field: field.to_string(),
        }
    } else if msg.contains("CHECK constraint failed") || msg.contains("cannot leave Ended") {
        DbError::CheckViolation {
            message: msg.to_string(),
        }
    } else if msg.contains("FOREIGN KEY constraint failed") {
        DbError::ForeignKeyViolation {
            message: msg.to_string(),
        }
    } else {
        DbError::QueryFailed(msg.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unique() {
        let err = classify_message("UNIQUE constraint failed: tables.number");
        match err {
            DbError::UniqueViolation { field, .. } => assert_eq!(field, "tables.number"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_constraints() {
        assert!(matches!(
            classify_message("NOT NULL constraint failed: menus.name"),
            DbError::NotNullViolation { .. }
        ));
        assert!(matches!(
            classify_message("CHECK constraint failed: status IN ('Active', 'Ended')"),
            DbError::CheckViolation { .. }
        ));
        assert!(matches!(
            classify_message("order status cannot leave Ended"),
            DbError::CheckViolation { .. }
        ));
        assert!(matches!(
            classify_message("FOREIGN KEY constraint failed"),
            DbError::ForeignKeyViolation { .. }
        ));
        assert!(matches!(
            classify_message("no such table: orders"),
            DbError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(DbError::not_found("Menu", 7).to_string(), "Menu not found: 7");
    }
}
