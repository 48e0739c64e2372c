use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MedicineReminder::Table)
                    .if_not_exists()
                    .col(pk_auto(MedicineReminder::Id))
                    .col(integer(MedicineReminder::PatientId))
                    .col(string(MedicineReminder::MedicineName))
                    .col(string_null(MedicineReminder::Dosage))
                    .col(string(MedicineReminder::Times))
                    .col(date(MedicineReminder::StartDate))
                    .col(date_null(MedicineReminder::EndDate))
                    .col(boolean(MedicineReminder::Active).default(true))
                    .col(timestamp_null(MedicineReminder::LastSentAt))
                    .col(
                        timestamp(MedicineReminder::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medicine_reminder_patient_id")
                            .from(MedicineReminder::Table, MedicineReminder::PatientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MedicineReminder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MedicineReminder {
    Table,
    Id,
    PatientId,
    MedicineName,
    Dosage,
    Times,
    StartDate,
    EndDate,
    Active,
    LastSentAt,
    CreatedAt,
}
