use chrono::{Datelike, Months, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, QueryResult, Statement};

use crate::{
    error::{data::DataError, Error},
    model::{Record, Report, RosterReportParams, RosterSortField},
    query::SqlBinder,
};

/// Age of majority used by the adults-only filter.
const ADULT_AGE_YEARS: u32 = 18;

/// Builds the tenant roster grouped by section.
pub struct RosterReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RosterReportService<'a> {
    /// Creates a new instance of [`RosterReportService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run the report.
    ///
    /// Rows are grouped by section name first, then ordered by the chosen
    /// sort key. The age column is derived from the birth date and the
    /// current date; sorting by age orders by birth date with the direction
    /// inverted, which is equivalent for known dates.
    pub async fn run(&self, params: &RosterReportParams) -> Result<Report, Error> {
        let backend = self.db.get_database_backend();
        let today = Utc::now().date_naive();
        // Latest birth date that still counts as an adult today.
        let adult_cutoff = today
            .checked_sub_months(Months::new(12 * ADULT_AGE_YEARS))
            .unwrap_or(today);

        let (order_column, direction) = match params.sort_field {
            RosterSortField::FullName => ("t.full_name", params.direction),
            RosterSortField::Address => ("h.street, h.house_number", params.direction),
            RosterSortField::BirthDate => ("t.birth_date", params.direction),
            // An earlier birth date means a greater age.
            RosterSortField::Age => ("t.birth_date", params.direction.inverted()),
        };

        let mut detail_binder = SqlBinder::new(backend);
        let filters = filter_sql(params, adult_cutoff, &mut detail_binder);
        let detail_sql = format!(
            "SELECT \
                 s.name AS section_name, \
                 t.full_name, \
                 h.street || ' ' || h.house_number || COALESCE(' корп.' || h.building, '') || ', кв.' || a.apt_number AS address, \
                 t.birth_date, \
                 t.passport \
             FROM tenants t \
             JOIN apartments a ON t.apartment_id = a.apartment_id \
             JOIN houses h ON a.house_id = h.house_id \
             JOIN sections s ON h.section_id = s.section_id \
             WHERE 1=1{filters} \
             ORDER BY s.name, {order_column} {}",
            direction.sql()
        );
        let detail_stmt =
            Statement::from_sql_and_values(backend, detail_sql, detail_binder.into_values());
        let rows = self
            .db
            .query_all_raw(detail_stmt)
            .await
            .map_err(query_failed)?;
        let records = decode_rows(&rows, today).map_err(query_failed)?;

        let mut totals_binder = SqlBinder::new(backend);
        let filters = filter_sql(params, adult_cutoff, &mut totals_binder);
        let totals_sql = format!(
            "SELECT s.name AS section_name, COUNT(*) AS cnt \
             FROM tenants t \
             JOIN apartments a ON t.apartment_id = a.apartment_id \
             JOIN houses h ON a.house_id = h.house_id \
             JOIN sections s ON h.section_id = s.section_id \
             WHERE 1=1{filters} \
             GROUP BY s.name \
             ORDER BY s.name"
        );
        let totals_stmt =
            Statement::from_sql_and_values(backend, totals_sql, totals_binder.into_values());
        let totals_rows = self
            .db
            .query_all_raw(totals_stmt)
            .await
            .map_err(query_failed)?;
        let summary = build_summary(&totals_rows).map_err(query_failed)?;

        Ok(Report {
            columns: ["Участок", "ФИО", "Адрес", "Дата рожд.", "Возраст", "Паспорт"]
                .map(str::to_owned)
                .to_vec(),
            rows: records,
            summary,
        })
    }
}

fn filter_sql(
    params: &RosterReportParams,
    adult_cutoff: NaiveDate,
    binder: &mut SqlBinder,
) -> String {
    let mut sql = String::new();

    if let Some(section_id) = params.section_id {
        sql.push_str(&format!(" AND s.section_id = {}", binder.push(section_id)));
    }
    if params.adults_only {
        sql.push_str(&format!(
            " AND t.birth_date IS NOT NULL AND t.birth_date <= {}",
            binder.push(adult_cutoff)
        ));
    }
    if params.active_only {
        sql.push_str(" AND t.moved_out IS NULL");
    }

    sql
}

fn decode_rows(rows: &[QueryResult], today: NaiveDate) -> Result<Vec<Record>, DbErr> {
    rows.iter()
        .map(|r| {
            let birth_date: Option<NaiveDate> = r.try_get("", "birth_date")?;
            let age = birth_date
                .map(|birth| age_on(birth, today).to_string())
                .unwrap_or_default();

            Ok(Record {
                values: vec![
                    r.try_get("", "section_name")?,
                    r.try_get("", "full_name")?,
                    r.try_get("", "address")?,
                    birth_date.map(|d| d.to_string()).unwrap_or_default(),
                    age,
                    r.try_get::<Option<String>>("", "passport")?.unwrap_or_default(),
                ],
            })
        })
        .collect()
}

fn build_summary(rows: &[QueryResult]) -> Result<String, DbErr> {
    let mut groups = Vec::with_capacity(rows.len());
    for r in rows {
        let name: String = r.try_get("", "section_name")?;
        let count: i64 = crate::data::row::integer_i64(r, "cnt")?;
        groups.push((name, count));
    }

    let total: i64 = groups.iter().map(|(_, count)| count).sum();
    if groups.is_empty() {
        return Ok("ИТОГО: 0 чел.".to_string());
    }

    let per_section = groups
        .iter()
        .map(|(name, count)| format!("{name}: {count} чел."))
        .collect::<Vec<_>>()
        .join(" | ");

    Ok(format!("ИТОГО: {total} чел. | {per_section}"))
}

/// Full years between `birth` and `today`.
fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

fn query_failed(source: DbErr) -> Error {
    DataError::QueryFailed {
        entity: "tenant_roster_report",
        source,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Expect the age to count only completed years
    #[test]
    fn counts_completed_years() {
        let birth = date(1990, 6, 15);

        assert_eq!(age_on(birth, date(2026, 6, 14)), 35);
        assert_eq!(age_on(birth, date(2026, 6, 15)), 36);
        assert_eq!(age_on(birth, date(2026, 6, 16)), 36);
    }

    /// Expect every enabled roster filter to appear in the fragment
    #[test]
    fn combines_filters() {
        let params = RosterReportParams {
            section_id: Some(3),
            ..RosterReportParams::default()
        };
        let mut binder = SqlBinder::new(sea_orm::DatabaseBackend::Postgres);

        let sql = filter_sql(&params, date(2008, 8, 5), &mut binder);

        assert!(sql.contains("s.section_id = $1"));
        assert!(sql.contains("t.birth_date <= $2"));
        assert!(sql.contains("t.moved_out IS NULL"));
        assert_eq!(binder.len(), 2);
    }

    /// Expect disabled filters to bind nothing
    #[test]
    fn no_filters_bind_nothing() {
        let params = RosterReportParams {
            adults_only: false,
            active_only: false,
            ..RosterReportParams::default()
        };
        let mut binder = SqlBinder::new(sea_orm::DatabaseBackend::Postgres);

        let sql = filter_sql(&params, date(2008, 8, 5), &mut binder);

        assert!(sql.is_empty());
        assert!(binder.is_empty());
    }
}
