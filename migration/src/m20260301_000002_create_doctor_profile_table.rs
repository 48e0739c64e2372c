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
                    .table(DoctorProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(DoctorProfile::Id))
                    .col(integer_uniq(DoctorProfile::UserId))
                    .col(string(DoctorProfile::Specialization))
                    .col(string(DoctorProfile::Qualification))
                    .col(integer(DoctorProfile::ExperienceYears).default(0))
                    .col(integer(DoctorProfile::Fee).default(0))
                    .col(text_null(DoctorProfile::About))
                    .col(string_null(DoctorProfile::ClinicAddress))
                    .col(integer(DoctorProfile::SlotMinutes).default(30))
                    .col(string(DoctorProfile::Status).default("pending"))
                    .col(
                        timestamp(DoctorProfile::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(DoctorProfile::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_doctor_profile_user_id")
                            .from(DoctorProfile::Table, DoctorProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DoctorAvailability::Table)
                    .if_not_exists()
                    .col(pk_auto(DoctorAvailability::Id))
                    .col(integer(DoctorAvailability::DoctorId))
                    .col(integer(DoctorAvailability::Weekday))
                    .col(string(DoctorAvailability::StartTime))
                    .col(string(DoctorAvailability::EndTime))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_doctor_availability_doctor_id")
                            .from(DoctorAvailability::Table, DoctorAvailability::DoctorId)
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
            .drop_table(Table::drop().table(DoctorAvailability::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DoctorProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DoctorProfile {
    Table,
    Id,
    UserId,
    Specialization,
    Qualification,
    ExperienceYears,
    Fee,
    About,
    ClinicAddress,
    SlotMinutes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum DoctorAvailability {
    Table,
    Id,
    DoctorId,
    Weekday,
    StartTime,
    EndTime,
}
