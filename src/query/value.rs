//! Parsing of user input into typed bind values, one strategy per column
//! kind.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::Value;

use crate::{
    error::validation::ValidationError,
    model::FieldInput,
    schema::{ColumnDef, ColumnKind},
};

/// Parse a raw filter string into a typed bind value for `column`.
///
/// Malformed numeric or date input is rejected here, before the store sees
/// a statement.
pub fn parse_typed_value(column: &ColumnDef, raw: &str) -> Result<Value, ValidationError> {
    let raw = raw.trim();
    match column.kind {
        ColumnKind::Identifier | ColumnKind::ForeignKey => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid_number(column, raw)),
        ColumnKind::Numeric => raw
            .parse::<Decimal>()
            .map(Value::from)
            .map_err(|_| invalid_number(column, raw)),
        ColumnKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Value::from)
            .map_err(|_| invalid_date(column, raw)),
        ColumnKind::Timestamp => parse_timestamp(raw)
            .map(Value::from)
            .ok_or_else(|| invalid_date(column, raw)),
        ColumnKind::Boolean => parse_boolean(raw)
            .map(Value::from)
            .ok_or_else(|| ValidationError::InvalidBoolean {
                column: column.name.to_string(),
                value: raw.to_string(),
            }),
        ColumnKind::Text => Ok(Value::from(raw.to_owned())),
    }
}

/// Convert a form-field input into a typed bind value.
///
/// Empty text normalizes to SQL NULL. Boolean columns accept only toggle
/// states; toggle states are rejected for every other kind.
pub fn field_input_value(column: &ColumnDef, input: &FieldInput) -> Result<Value, ValidationError> {
    match input {
        FieldInput::Toggle(state) => match column.kind {
            ColumnKind::Boolean => Ok(Value::from(*state)),
            _ => Err(ValidationError::UnexpectedToggle(column.name.to_string())),
        },
        FieldInput::Text(text) => {
            let text = text.trim();
            if column.kind == ColumnKind::Boolean {
                return Err(ValidationError::TextForBoolean(column.name.to_string()));
            }
            if text.is_empty() {
                return Ok(null_for(column.kind));
            }
            parse_typed_value(column, text)
        }
    }
}

/// A typed NULL for the column kind, so the bind keeps its SQL type.
fn null_for(kind: ColumnKind) -> Value {
    match kind {
        ColumnKind::Identifier | ColumnKind::ForeignKey => Value::from(None::<i64>),
        ColumnKind::Numeric => Value::from(None::<Decimal>),
        ColumnKind::Date => Value::from(None::<NaiveDate>),
        ColumnKind::Timestamp => Value::from(None::<NaiveDateTime>),
        ColumnKind::Boolean => Value::from(None::<bool>),
        ColumnKind::Text => Value::from(None::<String>),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_boolean(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "да" => Some(true),
        "false" | "0" | "нет" => Some(false),
        _ => None,
    }
}

fn invalid_number(column: &ColumnDef, raw: &str) -> ValidationError {
    ValidationError::InvalidNumber {
        column: column.name.to_string(),
        value: raw.to_string(),
    }
}

fn invalid_date(column: &ColumnDef, raw: &str) -> ValidationError {
    ValidationError::InvalidDate {
        column: column.name.to_string(),
        value: raw.to_string(),
    }
}
