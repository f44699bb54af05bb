use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, QueryResult, Statement};

use crate::{
    data::row,
    error::{data::DataError, validation::ValidationError, Error},
    model::{HousingStatsParams, Record, Report, StatsDimension, StatsSortField},
    query::SqlBinder,
};

/// Builds the housing-stock statistics grouped by an organizational
/// dimension.
pub struct HousingStatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HousingStatsService<'a> {
    /// Creates a new instance of [`HousingStatsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run the report.
    ///
    /// Houses are grouped by the chosen dimension and joined to their
    /// apartments; the optional construction-year bounds are inclusive and
    /// independent of each other. The summary line holds ungrouped grand
    /// totals over the same year range.
    pub async fn run(&self, params: &HousingStatsParams) -> Result<Report, Error> {
        let backend = self.db.get_database_backend();
        let year_from = optional_year(&params.year_from)?;
        let year_to = optional_year(&params.year_to)?;

        let (group_column, group_table, group_join, group_header) = dimension_parts(params.dimension);
        let order_by = match params.sort_field {
            StatsSortField::GroupName => group_column,
            StatsSortField::Houses => "houses_count",
            StatsSortField::Apartments => "apartments_count",
            StatsSortField::Residents => "residents_count",
        };

        let mut detail_binder = SqlBinder::new(backend);
        let where_sql = year_filter_sql(year_from, year_to, &mut detail_binder);
        let detail_sql = format!(
            "SELECT \
                 {group_column} AS group_name, \
                 COUNT(DISTINCT h.house_id) AS houses_count, \
                 COUNT(DISTINCT a.apartment_id) AS apartments_count, \
                 CAST(COALESCE(SUM(a.current_residents), 0) AS BIGINT) AS residents_count, \
                 COALESCE(ROUND(AVG(a.total_area), 2), 0) AS avg_area, \
                 COALESCE(ROUND(SUM(a.total_area), 2), 0) AS area_total \
             FROM houses h \
             JOIN {group_table} ON {group_join} \
             LEFT JOIN apartments a ON h.house_id = a.house_id\
             {where_sql} \
             GROUP BY {group_column} \
             ORDER BY {order_by} {}",
            params.direction.sql()
        );
        let detail_stmt =
            Statement::from_sql_and_values(backend, detail_sql, detail_binder.into_values());
        let rows = self
            .db
            .query_all_raw(detail_stmt)
            .await
            .map_err(query_failed)?;
        let records = decode_rows(&rows).map_err(query_failed)?;

        let mut totals_binder = SqlBinder::new(backend);
        let where_sql = year_filter_sql(year_from, year_to, &mut totals_binder);
        let totals_sql = format!(
            "SELECT \
                 COUNT(DISTINCT h.house_id) AS houses_count, \
                 COUNT(DISTINCT a.apartment_id) AS apartments_count, \
                 CAST(COALESCE(SUM(a.current_residents), 0) AS BIGINT) AS residents_count, \
                 COALESCE(ROUND(SUM(a.total_area), 2), 0) AS area_total \
             FROM houses h \
             LEFT JOIN apartments a ON h.house_id = a.house_id\
             {where_sql}"
        );
        let totals_stmt =
            Statement::from_sql_and_values(backend, totals_sql, totals_binder.into_values());
        let totals_row = self
            .db
            .query_one_raw(totals_stmt)
            .await
            .map_err(query_failed)?;

        let (houses, apartments, residents, area_total) = match totals_row {
            Some(totals) => (
                row::integer_i64(&totals, "houses_count").map_err(query_failed)?,
                row::integer_i64(&totals, "apartments_count").map_err(query_failed)?,
                row::integer_i64(&totals, "residents_count").map_err(query_failed)?,
                row::numeric_f64(&totals, "area_total").map_err(query_failed)?,
            ),
            None => (0, 0, 0, 0.0),
        };

        Ok(Report {
            columns: [
                group_header,
                "Домов",
                "Квартир",
                "Жильцов",
                "Ср. площадь",
                "Общ. площадь",
            ]
            .map(str::to_owned)
            .to_vec(),
            rows: records,
            summary: format!(
                "ИТОГО: домов: {houses} | квартир: {apartments} | жильцов: {residents} | площадь: {area_total:.2} м²"
            ),
        })
    }
}

/// `(group column, joined table with alias, join predicate, localized header)`
/// for a grouping dimension. The triple is fixed here; nothing about it
/// comes from the caller.
fn dimension_parts(dimension: StatsDimension) -> (&'static str, &'static str, &'static str, &'static str) {
    match dimension {
        StatsDimension::Service => ("sv.name", "services sv", "h.service_id = sv.service_id", "Служба"),
        StatsDimension::Department => ("d.name", "departments d", "h.department_id = d.department_id", "Отдел"),
        StatsDimension::Section => ("sec.name", "sections sec", "h.section_id = sec.section_id", "Участок"),
    }
}

fn optional_year(raw: &str) -> Result<Option<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidNumber {
            column: "year_built".to_string(),
            value: raw.to_string(),
        })
}

fn year_filter_sql(
    year_from: Option<i64>,
    year_to: Option<i64>,
    binder: &mut SqlBinder,
) -> String {
    let mut conditions = Vec::new();

    if let Some(year) = year_from {
        conditions.push(format!("h.year_built >= {}", binder.push(year)));
    }
    if let Some(year) = year_to {
        conditions.push(format!("h.year_built <= {}", binder.push(year)));
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

fn decode_rows(rows: &[QueryResult]) -> Result<Vec<Record>, DbErr> {
    rows.iter()
        .map(|r| {
            Ok(Record {
                values: vec![
                    r.try_get("", "group_name")?,
                    row::integer_i64(r, "houses_count")?.to_string(),
                    row::integer_i64(r, "apartments_count")?.to_string(),
                    row::integer_i64(r, "residents_count")?.to_string(),
                    format!("{:.2}", row::numeric_f64(r, "avg_area")?),
                    format!("{:.2}", row::numeric_f64(r, "area_total")?),
                ],
            })
        })
        .collect()
}

fn query_failed(source: DbErr) -> Error {
    DataError::QueryFailed {
        entity: "housing_stats_report",
        source,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect both year bounds to bind independently
    #[test]
    fn binds_year_bounds() {
        let mut binder = SqlBinder::new(sea_orm::DatabaseBackend::Postgres);

        let sql = year_filter_sql(Some(1960), Some(1990), &mut binder);

        assert_eq!(sql, " WHERE h.year_built >= $1 AND h.year_built <= $2");
        assert_eq!(binder.len(), 2);
    }

    /// Expect a single bound to stand alone
    #[test]
    fn single_bound_stands_alone() {
        let mut binder = SqlBinder::new(sea_orm::DatabaseBackend::Sqlite);

        let sql = year_filter_sql(None, Some(1990), &mut binder);

        assert_eq!(sql, " WHERE h.year_built <= ?");
    }

    /// Expect malformed year input to be rejected before the store
    #[test]
    fn rejects_malformed_year() {
        let result = optional_year("199O");

        assert!(matches!(result, Err(ValidationError::InvalidNumber { .. })));
    }

    /// Expect blank year input to mean no bound
    #[test]
    fn blank_year_is_no_bound() {
        assert_eq!(optional_year("  ").unwrap(), None);
    }

    /// Expect each dimension to group by its own table
    #[test]
    fn dimensions_are_fixed_triples() {
        let (column, table, join, header) = dimension_parts(StatsDimension::Section);

        assert_eq!(column, "sec.name");
        assert_eq!(table, "sections sec");
        assert_eq!(join, "h.section_id = sec.section_id");
        assert_eq!(header, "Участок");
    }
}
