use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PayerCodes::Table)
                    .if_not_exists()
                    .col(big_pk_auto(PayerCodes::PayerCodeId))
                    .col(string(PayerCodes::Code))
                    .col(string(PayerCodes::Name))
                    .col(decimal_len_null(PayerCodes::PercentShare, 5, 2))
                    .col(timestamp(PayerCodes::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PayerCodes::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PayerCodes {
    Table,
    PayerCodeId,
    Code,
    Name,
    PercentShare,
    CreatedAt,
}
