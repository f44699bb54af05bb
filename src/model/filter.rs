use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators available to record filters.
///
/// The set is closed: operators reach SQL text only through [`Self::sql`],
/// so the operator channel cannot carry arbitrary SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// Substring match against a text cast of the column.
    Contains,
    /// Negated substring match.
    NotContains,
    /// SQL NULL test.
    IsNull,
    /// Negated SQL NULL test.
    IsNotNull,
}

impl FilterOperator {
    /// Every operator, in picker order.
    pub const ALL: [FilterOperator; 10] = [
        FilterOperator::Eq,
        FilterOperator::Ne,
        FilterOperator::Gt,
        FilterOperator::Lt,
        FilterOperator::Gte,
        FilterOperator::Lte,
        FilterOperator::Contains,
        FilterOperator::NotContains,
        FilterOperator::IsNull,
        FilterOperator::IsNotNull,
    ];

    /// True when the operator compares against a caller-supplied value.
    pub fn takes_value(self) -> bool {
        !matches!(self, FilterOperator::IsNull | FilterOperator::IsNotNull)
    }

    /// Localized label for operator pickers.
    pub fn label(self) -> &'static str {
        match self {
            FilterOperator::Eq => "Равно",
            FilterOperator::Ne => "Не равно",
            FilterOperator::Gt => "Больше",
            FilterOperator::Lt => "Меньше",
            FilterOperator::Gte => "Больше или равно",
            FilterOperator::Lte => "Меньше или равно",
            FilterOperator::Contains => "Содержит",
            FilterOperator::NotContains => "Не содержит",
            FilterOperator::IsNull => "Пусто",
            FilterOperator::IsNotNull => "Не пусто",
        }
    }

    pub(crate) fn sql(self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Gte => ">=",
            FilterOperator::Lte => "<=",
            FilterOperator::Contains => "LIKE",
            FilterOperator::NotContains => "NOT LIKE",
            FilterOperator::IsNull => "IS NULL",
            FilterOperator::IsNotNull => "IS NOT NULL",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql())
    }
}

/// A single `(column, operator, value)` filter predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Column name; validated against the entity schema before use.
    pub column: String,
    /// Comparison operator.
    pub operator: FilterOperator,
    /// Raw caller input. Required unless the operator is a NULL test;
    /// always bound as a parameter, never spliced into SQL text.
    pub value: String,
}

impl FilterSpec {
    /// Convenience constructor.
    pub fn new(column: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Sort order for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn inverted(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub(crate) fn sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// An `ORDER BY` request; absent means backing-store default order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column name; validated against the entity schema before use.
    pub column: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Convenience constructor.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}
