//! Migration: Create availability table.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_salons_table::{Salons, Services};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Availability::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Availability::AvailabilityId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Availability::SalonId).integer().not_null())
                    .col(ColumnDef::new(Availability::ServiceId).integer().not_null())
                    .col(ColumnDef::new(Availability::StartDateTime).string().not_null())
                    .col(ColumnDef::new(Availability::EndDateTime).string().not_null())
                    .col(
                        ColumnDef::new(Availability::Status)
                            .string_len(16)
                            .not_null()
                            .default("Open"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_salon")
                            .from(Availability::Table, Availability::SalonId)
                            .to(Salons::Table, Salons::SalonId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_service")
                            .from(Availability::Table, Availability::ServiceId)
                            .to(Services::Table, Services::ServiceId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Open/booked slot lookups filter on all three
        manager
            .create_index(
                Index::create()
                    .name("idx_availability_service_salon_status")
                    .table(Availability::Table)
                    .col(Availability::ServiceId)
                    .col(Availability::SalonId)
                    .col(Availability::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Availability::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Availability {
    Table,
    AvailabilityId,
    SalonId,
    ServiceId,
    StartDateTime,
    EndDateTime,
    Status,
}
