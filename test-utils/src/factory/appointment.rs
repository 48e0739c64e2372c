//! Appointment factory for creating test appointment entities.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test appointments with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let appointment = AppointmentFactory::new(&db, patient.id, doctor.id)
///     .status("completed")
///     .scheduled_at(Utc::now() - Duration::days(1))
///     .build()
///     .await?;
/// ```
pub struct AppointmentFactory<'a> {
    db: &'a DatabaseConnection,
    patient_id: i32,
    doctor_id: i32,
    scheduled_at: DateTime<Utc>,
    mode: String,
    status: String,
    fee: i32,
    payment_status: String,
    checkout_session_id: Option<String>,
    reminder_sent: bool,
}

impl<'a> AppointmentFactory<'a> {
    /// Creates a new AppointmentFactory with default values.
    ///
    /// Defaults:
    /// - scheduled_at: one day from now
    /// - mode: `"offline"`
    /// - status: `"pending"`
    /// - fee: `500`
    /// - payment_status: `"unpaid"`
    pub fn new(db: &'a DatabaseConnection, patient_id: i32, doctor_id: i32) -> Self {
        Self {
            db,
            patient_id,
            doctor_id,
            scheduled_at: Utc::now() + Duration::days(1),
            mode: "offline".to_string(),
            status: "pending".to_string(),
            fee: 500,
            payment_status: "unpaid".to_string(),
            checkout_session_id: None,
            reminder_sent: false,
        }
    }

    pub fn scheduled_at(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = scheduled_at;
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Sets the status (`pending`, `confirmed`, `completed` or `cancelled`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn fee(mut self, fee: i32) -> Self {
        self.fee = fee;
        self
    }

    pub fn payment_status(mut self, payment_status: impl Into<String>) -> Self {
        self.payment_status = payment_status.into();
        self
    }

    pub fn checkout_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.checkout_session_id = Some(session_id.into());
        self
    }

    pub fn reminder_sent(mut self, reminder_sent: bool) -> Self {
        self.reminder_sent = reminder_sent;
        self
    }

    /// Builds and inserts the appointment entity into the database.
    pub async fn build(self) -> Result<entity::appointment::Model, DbErr> {
        let now = Utc::now();
        entity::appointment::ActiveModel {
            patient_id: ActiveValue::Set(self.patient_id),
            doctor_id: ActiveValue::Set(self.doctor_id),
            scheduled_at: ActiveValue::Set(self.scheduled_at),
            mode: ActiveValue::Set(self.mode),
            reason: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            fee: ActiveValue::Set(self.fee),
            payment_status: ActiveValue::Set(self.payment_status),
            checkout_session_id: ActiveValue::Set(self.checkout_session_id),
            reminder_sent: ActiveValue::Set(self.reminder_sent),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending appointment one day from now.
pub async fn create_appointment(
    db: &DatabaseConnection,
    patient_id: i32,
    doctor_id: i32,
) -> Result<entity::appointment::Model, DbErr> {
    AppointmentFactory::new(db, patient_id, doctor_id)
        .build()
        .await
}

/// Creates a completed appointment that took place one day ago.
pub async fn create_completed_appointment(
    db: &DatabaseConnection,
    patient_id: i32,
    doctor_id: i32,
) -> Result<entity::appointment::Model, DbErr> {
    AppointmentFactory::new(db, patient_id, doctor_id)
        .scheduled_at(Utc::now() - Duration::days(1))
        .status("completed")
        .build()
        .await
}
