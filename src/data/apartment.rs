use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbErr, Statement, Value};

use crate::query::SqlBinder;

/// Validated apartment column values, ready for insertion.
#[derive(Debug, Clone)]
pub struct ApartmentRow {
    /// Owning house.
    pub house_id: i64,
    /// Apartment number within the house.
    pub apt_number: String,
    /// Floor, when known.
    pub floor: Option<i64>,
    /// Living area in square meters.
    pub living_area: Decimal,
    /// Total area in square meters.
    pub total_area: Decimal,
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

/// Normalized tenant column values bound to the apartment being created.
///
/// An empty draft name normalizes to NULL; the store's NOT NULL
/// constraint rejects it inside the enclosing transaction.
#[derive(Debug, Clone)]
pub struct TenantRow {
    /// Tenant's full name, or NULL for a blank draft.
    pub full_name: Option<String>,
    /// Passport number, when given.
    pub passport: Option<String>,
    /// Birth date, when known.
    pub birth_date: Option<NaiveDate>,
    /// Responsible-tenant flag.
    pub is_responsible: bool,
    /// Move-in date.
    pub moved_in: NaiveDate,
}

/// Statements for the composite apartment-with-tenants insert.
pub struct ApartmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ApartmentRepository<'a, C> {
    /// Creates a new instance of [`ApartmentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert the apartment row and return its generated identifier.
    pub async fn insert_apartment(&self, apartment: &ApartmentRow) -> Result<i64, DbErr> {
        let values: Vec<Value> = vec![
            apartment.house_id.into(),
            apartment.apt_number.clone().into(),
            apartment.floor.into(),
            apartment.living_area.into(),
            apartment.total_area.into(),
            apartment.privatized.into(),
            apartment.cold_water.into(),
            apartment.hot_water.into(),
            apartment.garbage_chute.into(),
            apartment.elevator.into(),
        ];

        let mut binder = SqlBinder::new(self.db.get_database_backend());
        let placeholders = values
            .into_iter()
            .map(|value| binder.push(value))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO apartments (house_id, apt_number, floor, living_area, total_area, \
             privatized, cold_water, hot_water, garbage_chute, elevator) \
             VALUES ({placeholders}) RETURNING apartment_id"
        );

        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            binder.into_values(),
        );
        let row = self
            .db
            .query_one_raw(stmt)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("apartment insert returned no row".to_string()))?;

        row.try_get("", "apartment_id")
    }

    /// Insert one tenant row referencing `apartment_id`.
    pub async fn insert_tenant(&self, apartment_id: i64, tenant: &TenantRow) -> Result<(), DbErr> {
        let values: Vec<Value> = vec![
            apartment_id.into(),
            tenant.full_name.clone().into(),
            tenant.passport.clone().into(),
            tenant.birth_date.into(),
            tenant.is_responsible.into(),
            tenant.moved_in.into(),
        ];

        let mut binder = SqlBinder::new(self.db.get_database_backend());
        let placeholders = values
            .into_iter()
            .map(|value| binder.push(value))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO tenants (apartment_id, full_name, passport, birth_date, is_responsible, moved_in) \
             VALUES ({placeholders})"
        );

        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            binder.into_values(),
        );
        self.db.execute_raw(stmt).await?;

        Ok(())
    }
}
