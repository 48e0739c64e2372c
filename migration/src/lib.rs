pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_doctor_profile_table;
mod m20260301_000003_create_appointment_table;
mod m20260301_000004_create_prescription_table;
mod m20260301_000005_create_medical_history_table;
mod m20260301_000006_create_feedback_table;
mod m20260301_000007_create_medicine_reminder_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_doctor_profile_table::Migration),
            Box::new(m20260301_000003_create_appointment_table::Migration),
            Box::new(m20260301_000004_create_prescription_table::Migration),
            Box::new(m20260301_000005_create_medical_history_table::Migration),
            Box::new(m20260301_000006_create_feedback_table::Migration),
            Box::new(m20260301_000007_create_medicine_reminder_table::Migration),
        ]
    }
}
