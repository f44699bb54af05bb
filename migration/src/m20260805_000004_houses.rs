use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Houses::Table)
                    .if_not_exists()
                    .col(big_pk_auto(Houses::HouseId))
                    .col(big_integer(Houses::ServiceId))
                    .col(big_integer(Houses::DepartmentId))
                    .col(big_integer(Houses::SectionId))
                    .col(string(Houses::Street))
                    .col(string(Houses::HouseNumber))
                    .col(string_null(Houses::Building))
                    .col(big_integer_null(Houses::YearBuilt))
                    .col(big_integer(Houses::TotalApartments).default(0))
                    .col(big_integer(Houses::ResidentCount).default(0))
                    .col(timestamp(Houses::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Houses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Houses {
    Table,
    HouseId,
    ServiceId,
    DepartmentId,
    SectionId,
    Street,
    HouseNumber,
    Building,
    YearBuilt,
    TotalApartments,
    ResidentCount,
    CreatedAt,
}
