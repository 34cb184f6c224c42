//! Core error types for the stock ledger.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::{NaiveDate, ParseError as ChronoParseError};
use thiserror::Error;

use crate::movements::MovementType;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the stock ledger.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Item {0} not found")]
    ItemNotFound(i64),

    #[error("Stock ledger failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// True when the error came from a transaction source or the store behind it,
    /// i.e. the report is unavailable rather than the request being wrong.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            Error::Database(_)
                | Error::Ledger(LedgerError::SourceUnavailable { .. })
                | Error::Ledger(LedgerError::InvalidMovement { .. })
        )
    }
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row could not be mapped onto a domain value.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Errors raised while assembling a stock ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{movement_type} movements are unavailable: {reason}")]
    SourceUnavailable {
        movement_type: MovementType,
        reason: String,
    },

    #[error("Invalid {movement_type} movement {reference_id}: {reason}")]
    InvalidMovement {
        movement_type: MovementType,
        reference_id: String,
        reason: String,
    },

    #[error("No movement source registered for {0}")]
    SourceMissing(MovementType),

    #[error("More than one movement source registered for {0}")]
    DuplicateSource(MovementType),

    #[error("Valuation overflow while computing {0}")]
    ValuationOverflow(&'static str),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
