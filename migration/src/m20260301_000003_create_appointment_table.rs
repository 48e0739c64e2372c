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
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointment::Id))
                    .col(integer(Appointment::PatientId))
                    .col(integer(Appointment::DoctorId))
                    .col(timestamp(Appointment::ScheduledAt))
                    .col(string(Appointment::Mode))
                    .col(text_null(Appointment::Reason))
                    .col(string(Appointment::Status).default("pending"))
                    .col(integer(Appointment::Fee).default(0))
                    .col(string(Appointment::PaymentStatus).default("unpaid"))
                    .col(string_null(Appointment::CheckoutSessionId))
                    .col(boolean(Appointment::ReminderSent).default(false))
                    .col(
                        timestamp(Appointment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Appointment::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_patient_id")
                            .from(Appointment::Table, Appointment::PatientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_doctor_id")
                            .from(Appointment::Table, Appointment::DoctorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_doctor_scheduled_at")
                    .table(Appointment::Table)
                    .col(Appointment::DoctorId)
                    .col(Appointment::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_patient_id")
                    .table(Appointment::Table)
                    .col(Appointment::PatientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Appointment {
    Table,
    Id,
    PatientId,
    DoctorId,
    ScheduledAt,
    Mode,
    Reason,
    Status,
    Fee,
    PaymentStatus,
    CheckoutSessionId,
    ReminderSent,
    CreatedAt,
    UpdatedAt,
}
