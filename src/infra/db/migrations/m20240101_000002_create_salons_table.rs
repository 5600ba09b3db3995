//! Migration: Create salons and services tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Salons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Salons::SalonId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Salons::Name).string().not_null())
                    .col(ColumnDef::new(Salons::Address).string().not_null().default(""))
                    .col(ColumnDef::new(Salons::ContactDetails).string().not_null().default(""))
                    .col(ColumnDef::new(Salons::Photos).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Salons::AverageRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::ServiceId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::SalonId).integer().not_null())
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Services::Duration).string().not_null().default(""))
                    .col(ColumnDef::new(Services::Price).double().not_null().default(0.0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_salon")
                            .from(Services::Table, Services::SalonId)
                            .to(Salons::Table, Salons::SalonId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_services_salon_id")
                    .table(Services::Table)
                    .col(Services::SalonId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Salons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Salons {
    Table,
    SalonId,
    Name,
    Address,
    ContactDetails,
    Photos,
    AverageRating,
}

#[derive(Iden)]
pub(super) enum Services {
    Table,
    ServiceId,
    SalonId,
    Name,
    Description,
    Duration,
    Price,
}
