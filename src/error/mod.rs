//! Error types for the housing-fund core.
//!
//! This module provides the error handling system for the engine, with
//! specialized error types for each domain (schema registry, input
//! validation, store access). All errors use `thiserror` for ergonomic error
//! definitions with automatic `Display` and `Error` trait implementations.
//! Presentation of errors is the embedding UI layer's job; the core only
//! returns them.

pub mod data;
pub mod schema;
pub mod validation;

use sea_orm::DbErr;
use thiserror::Error;

use crate::error::{data::DataError, schema::SchemaError, validation::ValidationError};

/// Main error type for the housing-fund core.
///
/// This enum aggregates all domain-specific error types into a single
/// unified error type. It uses `thiserror`'s `#[from]` attribute to enable
/// automatic conversion from underlying error types via the `?` operator.
///
/// # Error Categories
/// - Connection errors (store unreachable at startup or first use)
/// - Schema errors (unknown entity or column keys; programming errors in a
///   conforming caller)
/// - Validation errors (missing or malformed user input, rejected before
///   any store access)
/// - Data errors (the store rejected a statement; the enclosing transaction
///   has been rolled back)
#[derive(Error, Debug)]
pub enum Error {
    /// The backing store could not be reached.
    ///
    /// Non-fatal to the embedding process: a caller may keep running in a
    /// disconnected state, but every subsequent data operation will fail
    /// fast with the same kind.
    #[error("failed to connect to the database: {0}")]
    ConnectionError(#[source] DbErr),
    /// Schema registry error (unknown entity key or column name).
    #[error(transparent)]
    SchemaError(#[from] SchemaError),
    /// Input validation error, raised before the store is touched.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Store-level query or mutation failure, raised after rollback.
    #[error(transparent)]
    DataError(#[from] DataError),
}
