use sea_orm_migration::{prelude::*, schema::*};

static IDX_APARTMENTS_HOUSE_ID: &str = "idx_apartments_house_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Apartments::Table)
                    .if_not_exists()
                    .col(big_pk_auto(Apartments::ApartmentId))
                    .col(big_integer(Apartments::HouseId))
                    .col(string(Apartments::AptNumber))
                    .col(big_integer_null(Apartments::Floor))
                    .col(decimal_len(Apartments::LivingArea, 10, 2))
                    .col(decimal_len(Apartments::TotalArea, 10, 2))
                    .col(boolean(Apartments::Privatized).default(false))
                    .col(boolean(Apartments::ColdWater).default(true))
                    .col(boolean(Apartments::HotWater).default(true))
                    .col(boolean(Apartments::GarbageChute).default(false))
                    .col(boolean(Apartments::Elevator).default(false))
                    .col(big_integer(Apartments::CurrentResidents).default(0))
                    .col(timestamp(Apartments::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APARTMENTS_HOUSE_ID)
                    .table(Apartments::Table)
                    .col(Apartments::HouseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APARTMENTS_HOUSE_ID)
                    .table(Apartments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Apartments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Apartments {
    Table,
    ApartmentId,
    HouseId,
    AptNumber,
    Floor,
    LivingArea,
    TotalArea,
    Privatized,
    ColdWater,
    HotWater,
    GarbageChute,
    Elevator,
    CurrentResidents,
    CreatedAt,
}
