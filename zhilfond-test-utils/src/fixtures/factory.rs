//! Factory functions seeding the organizational hierarchy for tests.
//!
//! Each function inserts one row through a parameterized statement and
//! returns the generated identifier, so tests can build a
//! service, department, section, house, apartment, tenant chain in a few
//! lines. The factories write through raw statements and never go through
//! the engine under test.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement, Value};

use crate::error::TestError;

/// Insert a service and return its id.
pub async fn service(db: &DatabaseConnection, name: &str) -> Result<i64, TestError> {
    insert_returning(
        db,
        "INSERT INTO services (name) VALUES (?) RETURNING service_id",
        vec![name.into()],
        "service_id",
    )
    .await
}

/// Insert a department under a service and return its id.
pub async fn department(
    db: &DatabaseConnection,
    service_id: i64,
    name: &str,
) -> Result<i64, TestError> {
    insert_returning(
        db,
        "INSERT INTO departments (service_id, name) VALUES (?, ?) RETURNING department_id",
        vec![service_id.into(), name.into()],
        "department_id",
    )
    .await
}

/// Insert a section under a department and return its id.
pub async fn section(
    db: &DatabaseConnection,
    department_id: i64,
    name: &str,
) -> Result<i64, TestError> {
    insert_returning(
        db,
        "INSERT INTO sections (department_id, name) VALUES (?, ?) RETURNING section_id",
        vec![department_id.into(), name.into()],
        "section_id",
    )
    .await
}

/// Insert a house and return its id.
pub async fn house(
    db: &DatabaseConnection,
    service_id: i64,
    department_id: i64,
    section_id: i64,
    street: &str,
    house_number: &str,
    building: Option<&str>,
    year_built: Option<i64>,
) -> Result<i64, TestError> {
    insert_returning(
        db,
        "INSERT INTO houses (service_id, department_id, section_id, street, house_number, building, year_built) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING house_id",
        vec![
            service_id.into(),
            department_id.into(),
            section_id.into(),
            street.into(),
            house_number.into(),
            building.map(str::to_owned).into(),
            year_built.into(),
        ],
        "house_id",
    )
    .await
}

/// Column values for an apartment fixture.
///
/// Defaults mirror a plain apartment with both water services and no
/// registered residents.
pub struct ApartmentFixture<'a> {
    pub apt_number: &'a str,
    pub floor: i64,
    pub living_area: f64,
    pub total_area: f64,
    pub privatized: bool,
    pub cold_water: bool,
    pub hot_water: bool,
    pub garbage_chute: bool,
    pub elevator: bool,
    pub current_residents: i64,
}

impl Default for ApartmentFixture<'_> {
    fn default() -> Self {
        Self {
            apt_number: "1",
            floor: 1,
            living_area: 30.0,
            total_area: 45.0,
            privatized: false,
            cold_water: true,
            hot_water: true,
            garbage_chute: false,
            elevator: false,
            current_residents: 0,
        }
    }
}

/// Insert an apartment into a house and return its id.
pub async fn apartment(
    db: &DatabaseConnection,
    house_id: i64,
    fixture: &ApartmentFixture<'_>,
) -> Result<i64, TestError> {
    insert_returning(
        db,
        "INSERT INTO apartments (house_id, apt_number, floor, living_area, total_area, privatized, \
         cold_water, hot_water, garbage_chute, elevator, current_residents) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING apartment_id",
        vec![
            house_id.into(),
            fixture.apt_number.into(),
            fixture.floor.into(),
            fixture.living_area.into(),
            fixture.total_area.into(),
            fixture.privatized.into(),
            fixture.cold_water.into(),
            fixture.hot_water.into(),
            fixture.garbage_chute.into(),
            fixture.elevator.into(),
            fixture.current_residents.into(),
        ],
        "apartment_id",
    )
    .await
}

/// Insert a tenant into an apartment and return its id.
pub async fn tenant(
    db: &DatabaseConnection,
    apartment_id: i64,
    full_name: &str,
    birth_date: Option<NaiveDate>,
    moved_out: Option<NaiveDate>,
) -> Result<i64, TestError> {
    insert_returning(
        db,
        "INSERT INTO tenants (apartment_id, full_name, birth_date, moved_out) \
         VALUES (?, ?, ?, ?) RETURNING tenant_id",
        vec![
            apartment_id.into(),
            full_name.into(),
            birth_date.into(),
            moved_out.into(),
        ],
        "tenant_id",
    )
    .await
}

async fn insert_returning(
    db: &DatabaseConnection,
    sql: &str,
    values: Vec<Value>,
    pk: &str,
) -> Result<i64, TestError> {
    let stmt = Statement::from_sql_and_values(db.get_database_backend(), sql.to_owned(), values);
    let row = db
        .query_one_raw(stmt)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("fixture insert returned no row: {sql}")))?;

    Ok(row.try_get("", pk)?)
}
