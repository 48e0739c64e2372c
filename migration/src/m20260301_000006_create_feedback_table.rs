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
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(pk_auto(Feedback::Id))
                    .col(integer_uniq(Feedback::AppointmentId))
                    .col(integer(Feedback::PatientId))
                    .col(integer(Feedback::DoctorId))
                    .col(integer(Feedback::Rating))
                    .col(text_null(Feedback::Comment))
                    .col(boolean(Feedback::Hidden).default(false))
                    .col(
                        timestamp(Feedback::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_appointment_id")
                            .from(Feedback::Table, Feedback::AppointmentId)
                            .to(Appointment::Table, Appointment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_doctor_id")
                    .table(Feedback::Table)
                    .col(Feedback::DoctorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Feedback {
    Table,
    Id,
    AppointmentId,
    PatientId,
    DoctorId,
    Rating,
    Comment,
    Hidden,
    CreatedAt,
}
