use serde::{Deserialize, Serialize};

use crate::model::{Record, SortDirection};

/// Tabular report output: localized headers, display rows, and a totals line.
///
/// An empty result set is a valid report: the rows are empty and the
/// summary reflects zero counts and sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Localized column headers.
    pub columns: Vec<String>,
    /// Detail rows, display-normalized.
    pub rows: Vec<Record>,
    /// Totals line for the footer.
    pub summary: String,
}

/// Sort keys for the rent report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentSortField {
    /// Street, house number, then apartment number.
    Address,
    /// Apartment number.
    ApartmentNumber,
    /// Total area.
    TotalArea,
    /// Computed total charge.
    TotalRent,
}

/// Parameters of the rent report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentReportParams {
    /// Limit the report to one house. Takes precedence over `street`.
    pub house_id: Option<i64>,
    /// Case-insensitive street substring filter, used when no house is
    /// selected.
    pub street: Option<String>,
    /// Sort key.
    pub sort_field: RentSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl Default for RentReportParams {
    fn default() -> Self {
        Self {
            house_id: None,
            street: None,
            sort_field: RentSortField::Address,
            direction: SortDirection::Ascending,
        }
    }
}

/// Sort keys for the tenant roster report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterSortField {
    /// Tenant's full name.
    FullName,
    /// Street then house number.
    Address,
    /// Birth date.
    BirthDate,
    /// Age derived from birth date.
    Age,
}

/// Parameters of the tenant roster report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterReportParams {
    /// Limit the roster to one section.
    pub section_id: Option<i64>,
    /// Keep only tenants with a known birth date at least 18 years back.
    pub adults_only: bool,
    /// Keep only tenants who have not moved out.
    pub active_only: bool,
    /// Sort key, applied after the section grouping order.
    pub sort_field: RosterSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl Default for RosterReportParams {
    /// Form defaults: adults only, active only.
    fn default() -> Self {
        Self {
            section_id: None,
            adults_only: true,
            active_only: true,
            sort_field: RosterSortField::FullName,
            direction: SortDirection::Ascending,
        }
    }
}

/// Organizational dimension the housing statistics are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsDimension {
    /// Group houses by owning service.
    Service,
    /// Group houses by department.
    Department,
    /// Group houses by section.
    Section,
}

/// Sort keys for the housing statistics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsSortField {
    /// Name of the group.
    GroupName,
    /// Distinct house count.
    Houses,
    /// Distinct apartment count.
    Apartments,
    /// Registered resident total.
    Residents,
}

/// Parameters of the housing statistics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingStatsParams {
    /// Grouping dimension.
    pub dimension: StatsDimension,
    /// Inclusive lower bound on construction year; blank for none.
    pub year_from: String,
    /// Inclusive upper bound on construction year; blank for none.
    pub year_to: String,
    /// Sort key.
    pub sort_field: StatsSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl Default for HousingStatsParams {
    fn default() -> Self {
        Self {
            dimension: StatsDimension::Service,
            year_from: String::new(),
            year_to: String::new(),
            sort_field: StatsSortField::GroupName,
            direction: SortDirection::Ascending,
        }
    }
}
