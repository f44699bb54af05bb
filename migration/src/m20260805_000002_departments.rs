use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(big_pk_auto(Departments::DepartmentId))
                    .col(big_integer(Departments::ServiceId))
                    .col(string(Departments::Name))
                    .col(string_null(Departments::Address))
                    .col(string_null(Departments::Phone))
                    .col(timestamp(Departments::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Departments {
    Table,
    DepartmentId,
    ServiceId,
    Name,
    Address,
    Phone,
    CreatedAt,
}
