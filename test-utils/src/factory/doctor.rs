//! Doctor factory for creating doctor users with profiles and availability.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::user::UserFactory;

/// Factory for creating a doctor user together with a doctor profile.
///
/// # Example
///
/// ```rust,ignore
/// let (doctor, profile) = DoctorFactory::new(&db)
///     .specialization("Cardiology")
///     .status("pending")
///     .availability(0, "09:00", "12:00")
///     .build()
///     .await?;
/// ```
pub struct DoctorFactory<'a> {
    db: &'a DatabaseConnection,
    specialization: String,
    fee: i32,
    slot_minutes: i32,
    status: String,
    availability: Vec<(i32, String, String)>,
}

impl<'a> DoctorFactory<'a> {
    /// Creates a new DoctorFactory with default values.
    ///
    /// Defaults:
    /// - specialization: `"General Medicine"`
    /// - fee: `500`
    /// - slot_minutes: `30`
    /// - status: `"approved"`
    /// - availability: none
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            specialization: "General Medicine".to_string(),
            fee: 500,
            slot_minutes: 30,
            status: "approved".to_string(),
            availability: Vec::new(),
        }
    }

    pub fn specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }

    pub fn fee(mut self, fee: i32) -> Self {
        self.fee = fee;
        self
    }

    pub fn slot_minutes(mut self, slot_minutes: i32) -> Self {
        self.slot_minutes = slot_minutes;
        self
    }

    /// Sets the profile status (`pending`, `approved` or `rejected`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Adds an availability window for a weekday (0 = Monday).
    pub fn availability(
        mut self,
        weekday: i32,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        self.availability
            .push((weekday, start_time.into(), end_time.into()));
        self
    }

    /// Builds and inserts the doctor user, profile and availability rows.
    ///
    /// # Returns
    /// - `Ok((user, profile))` - Created doctor user and profile
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(
        self,
    ) -> Result<(entity::user::Model, entity::doctor_profile::Model), DbErr> {
        let user = UserFactory::new(self.db).role("doctor").build().await?;
        let now = Utc::now();

        let profile = entity::doctor_profile::ActiveModel {
            user_id: ActiveValue::Set(user.id),
            specialization: ActiveValue::Set(self.specialization),
            qualification: ActiveValue::Set("MBBS".to_string()),
            experience_years: ActiveValue::Set(5),
            fee: ActiveValue::Set(self.fee),
            about: ActiveValue::Set(None),
            clinic_address: ActiveValue::Set(None),
            slot_minutes: ActiveValue::Set(self.slot_minutes),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for (weekday, start_time, end_time) in self.availability {
            entity::doctor_availability::ActiveModel {
                doctor_id: ActiveValue::Set(user.id),
                weekday: ActiveValue::Set(weekday),
                start_time: ActiveValue::Set(start_time),
                end_time: ActiveValue::Set(end_time),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok((user, profile))
    }
}

/// Creates a doctor with an approved profile and no availability constraints.
pub async fn create_approved_doctor(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::doctor_profile::Model), DbErr> {
    DoctorFactory::new(db).build().await
}

/// Creates a doctor whose profile is still awaiting admin review.
pub async fn create_pending_doctor(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::doctor_profile::Model), DbErr> {
    DoctorFactory::new(db).status("pending").build().await
}
