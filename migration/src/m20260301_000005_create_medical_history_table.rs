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
                    .table(MedicalHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(MedicalHistory::Id))
                    .col(integer(MedicalHistory::PatientId))
                    .col(string(MedicalHistory::Condition))
                    .col(date_null(MedicalHistory::DiagnosedOn))
                    .col(text_null(MedicalHistory::Medications))
                    .col(text_null(MedicalHistory::Notes))
                    .col(
                        timestamp(MedicalHistory::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_history_patient_id")
                            .from(MedicalHistory::Table, MedicalHistory::PatientId)
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
            .drop_table(Table::drop().table(MedicalHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MedicalHistory {
    Table,
    Id,
    PatientId,
    Condition,
    DiagnosedOn,
    Medications,
    Notes,
    CreatedAt,
}
