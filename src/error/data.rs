use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

/// The mutation kinds a failed write operation is labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Row creation.
    Insert,
    /// Overwrite of editable columns by primary key.
    Update,
    /// Removal by primary key.
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        write!(f, "{name}")
    }
}

/// Store-level failures.
///
/// Every variant means the backing store rejected a statement. The service
/// that raised it has already rolled back the enclosing transaction, so no
/// partial state survives. The underlying message is carried for diagnosis
/// but not parsed or categorized further.
#[derive(Error, Debug)]
pub enum DataError {
    /// A read query failed; no rows were returned.
    #[error("failed to query `{entity}`: {source}")]
    QueryFailed {
        /// Entity (or report) the query was issued for.
        entity: &'static str,
        /// The store's error.
        #[source]
        source: DbErr,
    },
    /// A mutation failed and was rolled back.
    #[error("{operation} on `{entity}` failed: {source}")]
    MutationFailed {
        /// Entity the mutation targeted.
        entity: &'static str,
        /// Which kind of mutation failed.
        operation: Operation,
        /// The store's error.
        #[source]
        source: DbErr,
    },
}
