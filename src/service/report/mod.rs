//! Parameterized aggregate reports.
//!
//! Each report issues one detail query and one totals query against the
//! store and returns localized columns, display rows, and a summary line.
//! Reports bypass the generic per-row CRUD path; their column shapes are
//! fixed, only the filters, grouping, and ordering vary with parameters.
//! An empty result set is a valid report with zero-valued totals, never an
//! error.

pub mod rent;
pub mod roster;
pub mod stats;
