use sea_orm::{DatabaseBackend, Value};

use crate::{
    error::{validation::ValidationError, Error},
    model::{FilterOperator, FilterSpec, SortSpec},
    query::{binder::SqlBinder, value::parse_typed_value},
    schema::EntitySchema,
};

/// WHERE and ORDER BY fragments plus their bound values.
///
/// Fragments carry a leading space so they can be appended to a base
/// statement verbatim; both are empty when the corresponding input is
/// absent.
#[derive(Debug)]
pub struct QueryParts {
    /// `" WHERE ..."` fragment, or empty.
    pub where_sql: String,
    /// `" ORDER BY ..."` fragment, or empty.
    pub order_sql: String,
    /// Values bound by the WHERE fragment, in placeholder order.
    pub values: Vec<Value>,
}

/// Build the filter and sort fragments for one entity query.
///
/// Column names are validated against `schema` before they are interpolated
/// into the fragments; values never enter the SQL text. Substring operators
/// compare against a text cast of the column, so they work on numeric and
/// date columns too. An empty value for a value-bearing operator is
/// rejected here, before any store access.
pub fn build_query_parts(
    schema: &EntitySchema,
    backend: DatabaseBackend,
    filter: Option<&FilterSpec>,
    sort: Option<&SortSpec>,
) -> Result<QueryParts, Error> {
    let mut binder = SqlBinder::new(backend);
    let mut where_sql = String::new();

    if let Some(filter) = filter {
        let column = schema.require_column(&filter.column)?;
        let operator = filter.operator;

        if operator.takes_value() && filter.value.is_empty() {
            return Err(ValidationError::MissingFilterValue(operator).into());
        }

        where_sql = match operator {
            FilterOperator::IsNull | FilterOperator::IsNotNull => {
                format!(" WHERE {} {}", column.name, operator.sql())
            }
            FilterOperator::Contains | FilterOperator::NotContains => {
                let placeholder = binder.push(format!("%{}%", filter.value));
                format!(
                    " WHERE CAST({} AS TEXT) {} {}",
                    column.name,
                    operator.sql(),
                    placeholder
                )
            }
            _ => {
                let value = parse_typed_value(column, &filter.value)?;
                let placeholder = binder.push(value);
                format!(" WHERE {} {} {}", column.name, operator.sql(), placeholder)
            }
        };
    }

    let mut order_sql = String::new();
    if let Some(sort) = sort {
        let column = schema.require_column(&sort.column)?;
        order_sql = format!(" ORDER BY {} {}", column.name, sort.direction.sql());
    }

    Ok(QueryParts {
        where_sql,
        order_sql,
        values: binder.into_values(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortDirection;
    use crate::schema;

    fn houses() -> &'static EntitySchema {
        schema::lookup("houses").unwrap()
    }

    /// Expect a comparison operator to bind exactly one typed value
    #[test]
    fn comparison_binds_one_value() {
        let filter = FilterSpec::new("year_built", FilterOperator::Gte, "1980");

        let parts =
            build_query_parts(houses(), DatabaseBackend::Postgres, Some(&filter), None).unwrap();

        assert_eq!(parts.where_sql, " WHERE year_built >= $1");
        assert_eq!(parts.values.len(), 1);
        assert!(parts.order_sql.is_empty());
    }

    /// Expect substring search to cast the column and wrap the value in
    /// wildcards
    #[test]
    fn contains_casts_to_text() {
        let filter = FilterSpec::new("house_number", FilterOperator::Contains, "1");

        let parts =
            build_query_parts(houses(), DatabaseBackend::Sqlite, Some(&filter), None).unwrap();

        assert_eq!(parts.where_sql, " WHERE CAST(house_number AS TEXT) LIKE ?");
        assert_eq!(parts.values, vec![Value::from("%1%")]);
    }

    /// Expect negated substring search to use NOT LIKE
    #[test]
    fn not_contains_negates() {
        let filter = FilterSpec::new("street", FilterOperator::NotContains, "Сад");

        let parts =
            build_query_parts(houses(), DatabaseBackend::Sqlite, Some(&filter), None).unwrap();

        assert!(parts.where_sql.contains("NOT LIKE"));
    }

    /// Expect NULL tests to bind no values at all
    #[test]
    fn null_test_binds_nothing() {
        let filter = FilterSpec::new("building", FilterOperator::IsNull, "");

        let parts =
            build_query_parts(houses(), DatabaseBackend::Postgres, Some(&filter), None).unwrap();

        assert_eq!(parts.where_sql, " WHERE building IS NULL");
        assert!(parts.values.is_empty());
    }

    /// Expect an empty value with a value-bearing operator to be rejected
    #[test]
    fn rejects_missing_filter_value() {
        let filter = FilterSpec::new("street", FilterOperator::Eq, "");

        let result = build_query_parts(houses(), DatabaseBackend::Postgres, Some(&filter), None);

        assert!(matches!(
            result,
            Err(Error::ValidationError(ValidationError::MissingFilterValue(_)))
        ));
    }

    /// Expect filter columns outside the schema to be rejected
    #[test]
    fn rejects_unknown_filter_column() {
        let filter = FilterSpec::new("password", FilterOperator::Eq, "x");

        let result = build_query_parts(houses(), DatabaseBackend::Postgres, Some(&filter), None);

        assert!(matches!(result, Err(Error::SchemaError(_))));
    }

    /// Expect the sort fragment to name the column and direction
    #[test]
    fn builds_order_fragment() {
        let sort = SortSpec::new("street", SortDirection::Descending);

        let parts = build_query_parts(houses(), DatabaseBackend::Postgres, None, Some(&sort)).unwrap();

        assert_eq!(parts.order_sql, " ORDER BY street DESC");
        assert!(parts.where_sql.is_empty());
    }

    /// Expect no fragments when neither filter nor sort is given
    #[test]
    fn absent_inputs_build_nothing() {
        let parts = build_query_parts(houses(), DatabaseBackend::Postgres, None, None).unwrap();

        assert!(parts.where_sql.is_empty());
        assert!(parts.order_sql.is_empty());
        assert!(parts.values.is_empty());
    }
}
