use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, QueryResult, Statement};

use crate::{
    data::row::{self, NO, YES},
    error::{data::DataError, Error},
    model::{Record, RentReportParams, RentSortField, Report},
    query::SqlBinder,
};

/// Monthly maintenance charge per square meter of total area, in rubles.
const BASE_RATE: f64 = 25.50;
/// Cold water charge per registered resident, in rubles.
const COLD_WATER_RATE: f64 = 150.00;
/// Hot water charge per registered resident, in rubles.
const HOT_WATER_RATE: f64 = 200.00;
/// Elevator charge per square meter of total area, in rubles.
const ELEVATOR_RATE: f64 = 5.00;

/// Builds the per-apartment rent report.
pub struct RentReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RentReportService<'a> {
    /// Creates a new instance of [`RentReportService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run the report.
    ///
    /// A selected house takes precedence over the street substring filter;
    /// with neither, every apartment is charged.
    pub async fn run(&self, params: &RentReportParams) -> Result<Report, Error> {
        let backend = self.db.get_database_backend();

        let order_by = match params.sort_field {
            RentSortField::Address => "h.street, h.house_number, a.apt_number",
            RentSortField::ApartmentNumber => "a.apt_number",
            RentSortField::TotalArea => "a.total_area",
            RentSortField::TotalRent => "total_rent",
        };

        let mut detail_binder = SqlBinder::new(backend);
        let where_sql = filter_sql(params, &mut detail_binder);
        let charge = charge_term();
        let detail_sql = format!(
            "SELECT \
                 h.street || ' ' || h.house_number || COALESCE(' корп.' || h.building, '') AS address, \
                 a.apt_number, \
                 a.total_area, \
                 a.current_residents, \
                 CASE WHEN a.cold_water THEN '{YES}' ELSE '{NO}' END AS cold_water, \
                 CASE WHEN a.hot_water THEN '{YES}' ELSE '{NO}' END AS hot_water, \
                 CASE WHEN a.elevator THEN '{YES}' ELSE '{NO}' END AS elevator, \
                 ROUND(a.total_area * {BASE_RATE:.2}, 2) AS rent_base, \
                 ROUND(CASE WHEN a.cold_water THEN a.current_residents * {COLD_WATER_RATE:.2} ELSE 0 END, 2) AS cold_water_cost, \
                 ROUND(CASE WHEN a.hot_water THEN a.current_residents * {HOT_WATER_RATE:.2} ELSE 0 END, 2) AS hot_water_cost, \
                 ROUND(CASE WHEN a.elevator THEN a.total_area * {ELEVATOR_RATE:.2} ELSE 0 END, 2) AS elevator_cost, \
                 ROUND({charge}, 2) AS total_rent \
             FROM apartments a \
             JOIN houses h ON a.house_id = h.house_id\
             {where_sql} \
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
        let where_sql = filter_sql(params, &mut totals_binder);
        let totals_sql = format!(
            "SELECT \
                 COUNT(*) AS cnt, \
                 COALESCE(SUM(a.total_area), 0) AS area_total, \
                 COALESCE(SUM({charge}), 0) AS rent_total \
             FROM apartments a \
             JOIN houses h ON a.house_id = h.house_id\
             {where_sql}"
        );
        let totals_stmt =
            Statement::from_sql_and_values(backend, totals_sql, totals_binder.into_values());
        let totals_row = self
            .db
            .query_one_raw(totals_stmt)
            .await
            .map_err(query_failed)?;

        let (count, area_total, rent_total) = match totals_row {
            Some(totals) => (
                row::integer_i64(&totals, "cnt").map_err(query_failed)?,
                row::numeric_f64(&totals, "area_total").map_err(query_failed)?,
                row::numeric_f64(&totals, "rent_total").map_err(query_failed)?,
            ),
            None => (0, 0.0, 0.0),
        };

        Ok(Report {
            columns: [
                "Адрес", "Кв.", "Площадь", "Жильцов", "Хол.вода", "Гор.вода", "Лифт",
                "Содерж.", "Хол.вода₽", "Гор.вода₽", "Лифт₽", "ИТОГО",
            ]
            .map(str::to_owned)
            .to_vec(),
            rows: records,
            summary: format!(
                "Всего квартир: {count} | Общая площадь: {area_total:.2} м² | ИТОГО К ОПЛАТЕ: {rent_total:.2} руб."
            ),
        })
    }
}

/// The unrounded per-apartment charge expression; the detail query rounds
/// it per row, the totals query sums it first.
fn charge_term() -> String {
    format!(
        "a.total_area * {BASE_RATE:.2} + \
         CASE WHEN a.cold_water THEN a.current_residents * {COLD_WATER_RATE:.2} ELSE 0 END + \
         CASE WHEN a.hot_water THEN a.current_residents * {HOT_WATER_RATE:.2} ELSE 0 END + \
         CASE WHEN a.elevator THEN a.total_area * {ELEVATOR_RATE:.2} ELSE 0 END"
    )
}

fn filter_sql(params: &RentReportParams, binder: &mut SqlBinder) -> String {
    if let Some(house_id) = params.house_id {
        return format!(" WHERE h.house_id = {}", binder.push(house_id));
    }
    if let Some(street) = params
        .street
        .as_deref()
        .map(str::trim)
        .filter(|street| !street.is_empty())
    {
        let placeholder = binder.push(format!("%{}%", street.to_lowercase()));
        return format!(" WHERE LOWER(h.street) LIKE {placeholder}");
    }
    String::new()
}

fn decode_rows(rows: &[QueryResult]) -> Result<Vec<Record>, DbErr> {
    rows.iter()
        .map(|r| {
            Ok(Record {
                values: vec![
                    r.try_get("", "address")?,
                    r.try_get("", "apt_number")?,
                    money(row::numeric_f64(r, "total_area")?),
                    row::integer_i64(r, "current_residents")?.to_string(),
                    r.try_get("", "cold_water")?,
                    r.try_get("", "hot_water")?,
                    r.try_get("", "elevator")?,
                    money(row::numeric_f64(r, "rent_base")?),
                    money(row::numeric_f64(r, "cold_water_cost")?),
                    money(row::numeric_f64(r, "hot_water_cost")?),
                    money(row::numeric_f64(r, "elevator_cost")?),
                    money(row::numeric_f64(r, "total_rent")?),
                ],
            })
        })
        .collect()
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn query_failed(source: DbErr) -> Error {
    DataError::QueryFailed {
        entity: "rent_report",
        source,
    }
    .into()
}
