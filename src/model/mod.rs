//! Data-transfer types exchanged with the embedding UI layer.

pub mod filter;
pub mod lookup;
pub mod record;
pub mod report;

pub use filter::{FilterOperator, FilterSpec, SortDirection, SortSpec};
pub use lookup::{HouseRef, SectionRef};
pub use record::{ApartmentDraft, FieldInput, FieldValues, Record, TenantDraft};
pub use report::{
    HousingStatsParams, RentReportParams, RentSortField, Report, RosterReportParams,
    RosterSortField, StatsDimension, StatsSortField,
};
