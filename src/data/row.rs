//! Typed column reads and display normalization for dynamically-shaped rows.
//!
//! The result shape of a registry-driven query is only known at runtime, so
//! values are read by column kind with a small tolerance for backend
//! differences (SQLite surfaces booleans as 0/1 integers and decimals as
//! reals; Postgres keeps NUMERIC and BIGINT distinct).

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use sea_orm::{DbErr, QueryResult};

use crate::schema::{ColumnDef, ColumnKind};

/// Localized token for a true boolean value.
pub(crate) const YES: &str = "Да";
/// Localized token for a false boolean value.
pub(crate) const NO: &str = "Нет";

/// Read one column and normalize it for display.
///
/// SQL NULL becomes an empty string, booleans become the localized yes/no
/// tokens, dates and timestamps take their canonical string form, and
/// numbers pass through unchanged.
pub(crate) fn display_value(row: &QueryResult, column: &ColumnDef) -> Result<String, DbErr> {
    match column.kind {
        ColumnKind::Identifier | ColumnKind::ForeignKey => Ok(row
            .try_get::<Option<i64>>("", column.name)?
            .map(|v| v.to_string())
            .unwrap_or_default()),
        ColumnKind::Text => Ok(row
            .try_get::<Option<String>>("", column.name)?
            .unwrap_or_default()),
        ColumnKind::Boolean => Ok(match read_bool(row, column.name)? {
            Some(true) => YES.to_owned(),
            Some(false) => NO.to_owned(),
            None => String::new(),
        }),
        ColumnKind::Numeric => read_numeric(row, column.name),
        ColumnKind::Date => Ok(row
            .try_get::<Option<NaiveDate>>("", column.name)?
            .map(|d| d.to_string())
            .unwrap_or_default()),
        ColumnKind::Timestamp => Ok(row
            .try_get::<Option<NaiveDateTime>>("", column.name)?
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default()),
    }
}

fn read_bool(row: &QueryResult, name: &str) -> Result<Option<bool>, DbErr> {
    if let Ok(value) = row.try_get::<Option<bool>>("", name) {
        return Ok(value);
    }
    let value = row.try_get::<Option<i64>>("", name)?;
    Ok(value.map(|v| v != 0))
}

fn read_numeric(row: &QueryResult, name: &str) -> Result<String, DbErr> {
    if let Ok(value) = row.try_get::<Option<Decimal>>("", name) {
        return Ok(value.map(|d| d.to_string()).unwrap_or_default());
    }
    if let Ok(value) = row.try_get::<Option<i64>>("", name) {
        return Ok(value.map(|v| v.to_string()).unwrap_or_default());
    }
    let value = row.try_get::<Option<f64>>("", name)?;
    Ok(value.map(|v| v.to_string()).unwrap_or_default())
}

/// Read an aggregate column as a float, treating NULL as zero.
pub(crate) fn numeric_f64(row: &QueryResult, name: &str) -> Result<f64, DbErr> {
    if let Ok(value) = row.try_get::<Option<f64>>("", name) {
        return Ok(value.unwrap_or(0.0));
    }
    if let Ok(value) = row.try_get::<Option<Decimal>>("", name) {
        return Ok(value.and_then(|d| d.to_f64()).unwrap_or(0.0));
    }
    let value = row.try_get::<Option<i64>>("", name)?;
    Ok(value.unwrap_or(0) as f64)
}

/// Read a count-like aggregate column as an integer, treating NULL as zero.
pub(crate) fn integer_i64(row: &QueryResult, name: &str) -> Result<i64, DbErr> {
    if let Ok(value) = row.try_get::<Option<i64>>("", name) {
        return Ok(value.unwrap_or(0));
    }
    if let Ok(value) = row.try_get::<Option<i32>>("", name) {
        return Ok(value.map(i64::from).unwrap_or(0));
    }
    let value = row.try_get::<Option<Decimal>>("", name)?;
    Ok(value.and_then(|d| d.to_i64()).unwrap_or(0))
}
