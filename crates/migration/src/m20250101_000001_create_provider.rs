//! Create `provider` table.
//!
//! `email` carries a unique index; it is the only cross-record constraint.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Provider::Table)
                    .if_not_exists()
                    .col(string_len(Provider::Id, 24).primary_key())
                    .col(text(Provider::Name).not_null())
                    .col(text(Provider::Email).not_null())
                    .col(text(Provider::Phone).not_null())
                    .col(text(Provider::ServiceType).not_null())
                    .col(string_len(Provider::Status, 16).not_null().default("active"))
                    .col(timestamp_with_time_zone(Provider::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Provider::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_provider_email")
                    .table(Provider::Table)
                    .col(Provider::Email)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Provider::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Provider {
    Table,
    Id,
    Name,
    Email,
    Phone,
    ServiceType,
    Status,
    CreatedAt,
    UpdatedAt,
}
