use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One loaded row, display-normalized and positionally aligned with the
/// entity's columns.
///
/// Values are transient: every load fully replaces the previous set, and
/// nothing is cached across loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// One display value per schema column, in schema order.
    pub values: Vec<String>,
}

impl Record {
    /// Value at a column position, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// A single form-field value as collected by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldInput {
    /// Free-text entry. Empty text normalizes to SQL NULL before storage.
    Text(String),
    /// Toggle state for boolean columns.
    Toggle(bool),
}

/// Editable-column values keyed by column name.
///
/// Keys outside the entity's editable set are ignored, so a UI may round-trip
/// disabled fields without filtering them out itself.
pub type FieldValues = HashMap<String, FieldInput>;

/// User input for the apartment half of the composite create form.
///
/// Numeric fields are kept as raw text: parsing them is part of the
/// validation the engine performs before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApartmentDraft {
    /// Selected house, if any. Required.
    pub house_id: Option<i64>,
    /// Apartment number within the house. Required.
    pub apt_number: String,
    /// Floor; blank for unknown.
    pub floor: String,
    /// Living area in square meters. Required.
    pub living_area: String,
    /// Total area in square meters. Required.
    pub total_area: String,
    /// Privatized flag.
    pub privatized: bool,
    /// Cold water service flag.
    pub cold_water: bool,
    /// Hot water service flag.
    pub hot_water: bool,
    /// Garbage chute flag.
    pub garbage_chute: bool,
    /// Elevator flag.
    pub elevator: bool,
}

impl Default for ApartmentDraft {
    /// Form defaults: water services on, everything else off or blank.
    fn default() -> Self {
        Self {
            house_id: None,
            apt_number: String::new(),
            floor: String::new(),
            living_area: String::new(),
            total_area: String::new(),
            privatized: false,
            cold_water: true,
            hot_water: true,
            garbage_chute: false,
            elevator: false,
        }
    }
}

/// A not-yet-persisted tenant entry held by the composite create form.
///
/// Drafts live in the form's ordered list until the transaction commits or
/// the form is cancelled; they are never independently durable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDraft {
    /// Tenant's full name.
    pub full_name: String,
    /// Passport number; blank stores NULL.
    pub passport: String,
    /// Birth date, when known.
    pub birth_date: Option<NaiveDate>,
    /// Responsible-tenant flag.
    pub is_responsible: bool,
    /// Move-in date; defaults to the current date when absent.
    pub moved_in: Option<NaiveDate>,
}
