use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_appointment_table::Appointment;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prescription::Table)
                    .if_not_exists()
                    .col(pk_auto(Prescription::Id))
                    .col(integer_uniq(Prescription::AppointmentId))
                    .col(integer(Prescription::DoctorId))
                    .col(integer(Prescription::PatientId))
                    .col(text(Prescription::Diagnosis))
                    .col(text_null(Prescription::Notes))
                    .col(
                        timestamp(Prescription::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Prescription::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prescription_appointment_id")
                            .from(Prescription::Table, Prescription::AppointmentId)
                            .to(Appointment::Table, Appointment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PrescriptionMedicine::Table)
                    .if_not_exists()
                    .col(pk_auto(PrescriptionMedicine::Id))
                    .col(integer(PrescriptionMedicine::PrescriptionId))
                    .col(string(PrescriptionMedicine::Name))
                    .col(string(PrescriptionMedicine::Dosage))
                    .col(string(PrescriptionMedicine::Frequency))
                    .col(integer(PrescriptionMedicine::DurationDays))
                    .col(string_null(PrescriptionMedicine::Instructions))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prescription_medicine_prescription_id")
                            .from(
                                PrescriptionMedicine::Table,
                                PrescriptionMedicine::PrescriptionId,
                            )
                            .to(Prescription::Table, Prescription::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrescriptionMedicine::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Prescription::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Prescription {
    Table,
    Id,
    AppointmentId,
    DoctorId,
    PatientId,
    Diagnosis,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum PrescriptionMedicine {
    Table,
    Id,
    PrescriptionId,
    Name,
    Dosage,
    Frequency,
    DurationDays,
    Instructions,
}
