use sea_orm_migration::{prelude::*, schema::*};

static IDX_TENANTS_APARTMENT_ID: &str = "idx_tenants_apartment_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(big_pk_auto(Tenants::TenantId))
                    .col(big_integer(Tenants::ApartmentId))
                    .col(string(Tenants::FullName))
                    .col(string_null(Tenants::Inn))
                    .col(string_null(Tenants::Passport))
                    .col(date_null(Tenants::BirthDate))
                    .col(boolean(Tenants::IsResponsible).default(false))
                    .col(big_integer_null(Tenants::PayerCodeId))
                    .col(date_null(Tenants::MovedIn))
                    .col(date_null(Tenants::MovedOut))
                    .col(timestamp(Tenants::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TENANTS_APARTMENT_ID)
                    .table(Tenants::Table)
                    .col(Tenants::ApartmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TENANTS_APARTMENT_ID)
                    .table(Tenants::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Tenants::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Tenants {
    Table,
    TenantId,
    ApartmentId,
    FullName,
    Inn,
    Passport,
    BirthDate,
    IsResponsible,
    PayerCodeId,
    MovedIn,
    MovedOut,
    CreatedAt,
}
