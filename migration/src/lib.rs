pub use sea_orm_migration::prelude::*;

mod m20260805_000001_services;
mod m20260805_000002_departments;
mod m20260805_000003_sections;
mod m20260805_000004_houses;
mod m20260805_000005_apartments;
mod m20260805_000006_tenants;
mod m20260805_000007_payer_codes;
mod m20260805_000008_tariffs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260805_000001_services::Migration),
            Box::new(m20260805_000002_departments::Migration),
            Box::new(m20260805_000003_sections::Migration),
            Box::new(m20260805_000004_houses::Migration),
            Box::new(m20260805_000005_apartments::Migration),
            Box::new(m20260805_000006_tenants::Migration),
            Box::new(m20260805_000007_payer_codes::Migration),
            Box::new(m20260805_000008_tariffs::Migration),
        ]
    }
}
