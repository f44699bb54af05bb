use thiserror::Error;

use crate::model::FilterOperator;

/// User-input validation errors.
///
/// These are caught before any store access: a request that fails
/// validation never produces a statement, so there is nothing to roll back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A value-bearing filter operator was given an empty value.
    #[error("a value is required for the `{0}` filter operator")]
    MissingFilterValue(FilterOperator),
    /// A required form field was left empty.
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    /// The input could not be parsed as a number.
    #[error("`{value}` is not a valid number for `{column}`")]
    InvalidNumber {
        /// Column the input was destined for.
        column: String,
        /// The rejected input.
        value: String,
    },
    /// The input could not be parsed as a calendar date.
    #[error("`{value}` is not a valid date for `{column}` (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Column the input was destined for.
        column: String,
        /// The rejected input.
        value: String,
    },
    /// The input could not be interpreted as a boolean.
    #[error("`{value}` is not a valid boolean for `{column}`")]
    InvalidBoolean {
        /// Column the input was destined for.
        column: String,
        /// The rejected input.
        value: String,
    },
    /// Free text was supplied for a boolean column; boolean columns take
    /// their value from a toggle state, never from string parsing.
    #[error("boolean column `{0}` takes a toggle state, not text")]
    TextForBoolean(String),
    /// A toggle state was supplied for a non-boolean column.
    #[error("column `{0}` is not a boolean and cannot take a toggle state")]
    UnexpectedToggle(String),
    /// A mutation was requested with no editable values at all.
    #[error("no editable values supplied for `{0}`")]
    NoEditableValues(&'static str),
    /// The composite apartment form was submitted without a house.
    #[error("a house must be selected")]
    NoHouseSelected,
}
