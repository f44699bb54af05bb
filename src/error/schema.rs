use thiserror::Error;

/// Errors raised by the schema registry.
///
/// A conforming caller only passes entity keys and column names obtained
/// from the registry itself, so these indicate a programming error in the
/// embedding layer rather than bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The entity key is not among the managed entities.
    #[error("unknown entity `{0}`")]
    UnknownEntity(String),
    /// The column name does not belong to the entity's schema.
    #[error("unknown column `{column}` for entity `{entity}`")]
    UnknownColumn {
        /// Entity whose schema was consulted.
        entity: &'static str,
        /// The offending column name.
        column: String,
    },
}
