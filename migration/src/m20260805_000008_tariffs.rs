use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tariffs::Table)
                    .if_not_exists()
                    .col(big_pk_auto(Tariffs::TariffId))
                    .col(string(Tariffs::ServiceType))
                    .col(boolean(Tariffs::HasService).default(true))
                    .col(decimal_len(Tariffs::Tariff, 10, 2))
                    .col(date_null(Tariffs::ValidFrom))
                    .col(date_null(Tariffs::ValidTo))
                    .col(timestamp(Tariffs::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tariffs::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Tariffs {
    Table,
    TariffId,
    ServiceType,
    HasService,
    Tariff,
    ValidFrom,
    ValidTo,
    CreatedAt,
}
