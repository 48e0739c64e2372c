//! Medicine reminder factory.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating medicine reminders with customizable fields.
pub struct MedicineReminderFactory<'a> {
    db: &'a DatabaseConnection,
    patient_id: i32,
    medicine_name: String,
    times: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    active: bool,
}

impl<'a> MedicineReminderFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - medicine_name: `"Vitamin D"`
    /// - times: `"08:00,20:00"`
    /// - start_date: today (UTC)
    /// - end_date: none
    /// - active: `true`
    pub fn new(db: &'a DatabaseConnection, patient_id: i32) -> Self {
        Self {
            db,
            patient_id,
            medicine_name: "Vitamin D".to_string(),
            times: "08:00,20:00".to_string(),
            start_date: Utc::now().date_naive(),
            end_date: None,
            active: true,
        }
    }

    pub fn medicine_name(mut self, medicine_name: impl Into<String>) -> Self {
        self.medicine_name = medicine_name.into();
        self
    }

    /// Sets the comma-separated `HH:MM` dose times.
    pub fn times(mut self, times: impl Into<String>) -> Self {
        self.times = times.into();
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Builds and inserts the reminder entity into the database.
    pub async fn build(self) -> Result<entity::medicine_reminder::Model, DbErr> {
        entity::medicine_reminder::ActiveModel {
            patient_id: ActiveValue::Set(self.patient_id),
            medicine_name: ActiveValue::Set(self.medicine_name),
            dosage: ActiveValue::Set(None),
            times: ActiveValue::Set(self.times),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            active: ActiveValue::Set(self.active),
            last_sent_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active reminder with default dose times.
pub async fn create_medicine_reminder(
    db: &DatabaseConnection,
    patient_id: i32,
) -> Result<entity::medicine_reminder::Model, DbErr> {
    MedicineReminderFactory::new(db, patient_id).build().await
}
