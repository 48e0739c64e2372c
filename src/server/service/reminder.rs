//! Medicine reminders and the periodic reminder dispatch.
//!
//! Patients manage reminders with one or more daily dose times. The scheduler calls
//! `send_due` every minute, which emails each dose at most once and also sends the
//! one-time reminder for confirmed appointments in the next 24 hours.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        appointment::AppointmentRepository, reminder::ReminderRepository, user::UserRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        reminder::{CreateReminderParam, MedicineReminder},
        user::User,
    },
    service::notification::Notifier,
};

/// How late a dose may still be sent after its scheduled time.
pub const DOSE_WINDOW_MINUTES: i64 = 5;

/// How far ahead appointment reminders are sent.
pub const APPOINTMENT_REMINDER_HOURS: i64 = 24;

/// Result of one dispatch run, used for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub medicine_reminders: usize,
    pub appointment_reminders: usize,
}

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a Notifier,
}

impl<'a> ReminderService<'a> {
    pub fn new(db: &'a DatabaseConnection, notifier: &'a Notifier) -> Self {
        Self { db, notifier }
    }

    /// Creates a reminder for the patient.
    ///
    /// # Returns
    /// - `Ok(MedicineReminder)` - Stored reminder with sorted dose times
    /// - `Err(AppError::BadRequest)` - Missing name, no or duplicate times, or end before start
    pub async fn create(&self, mut param: CreateReminderParam) -> Result<MedicineReminder, AppError> {
        param.medicine_name = param.medicine_name.trim().to_string();
        if param.medicine_name.is_empty() {
            return Err(AppError::BadRequest("Medicine name is required".to_string()));
        }
        if param.times.is_empty() {
            return Err(AppError::BadRequest(
                "At least one dose time is required".to_string(),
            ));
        }

        let count = param.times.len();
        param.times.sort();
        param.times.dedup();
        if param.times.len() != count {
            return Err(AppError::BadRequest("Dose times must be unique".to_string()));
        }

        if param.end_date.is_some_and(|end| end < param.start_date) {
            return Err(AppError::BadRequest(
                "End date cannot be before start date".to_string(),
            ));
        }

        let reminder = ReminderRepository::new(self.db).create(param).await?;

        tracing::info!(
            "Patient {} created reminder {} for {}",
            reminder.patient_id,
            reminder.id,
            reminder.medicine_name
        );

        Ok(reminder)
    }

    pub async fn get_own(&self, patient_id: i32) -> Result<Vec<MedicineReminder>, AppError> {
        ReminderRepository::new(self.db)
            .get_by_patient(patient_id)
            .await
    }

    /// Pauses or resumes one of the patient's reminders.
    pub async fn set_active(
        &self,
        actor: &User,
        id: i32,
        active: bool,
    ) -> Result<MedicineReminder, AppError> {
        self.find_own(actor, id).await?;

        ReminderRepository::new(self.db)
            .set_active(id, active)
            .await?
            .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))
    }

    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        self.find_own(actor, id).await?;

        ReminderRepository::new(self.db).delete(id).await?;

        Ok(())
    }

    /// Sends every medicine and appointment reminder due at `now`.
    ///
    /// A failure for one reminder is logged and does not stop the others, and a failure
    /// in the medicine half does not stop the appointment half.
    pub async fn send_due(&self, now: DateTime<Utc>) -> Result<DispatchSummary, AppError> {
        let medicine_reminders = self
            .send_medicine_reminders(now)
            .await
            .inspect_err(|e| tracing::error!("Error sending medicine reminders: {}", e))
            .unwrap_or_default();
        let appointment_reminders = self
            .send_appointment_reminders(now)
            .await
            .inspect_err(|e| tracing::error!("Error sending appointment reminders: {}", e))
            .unwrap_or_default();

        Ok(DispatchSummary {
            medicine_reminders,
            appointment_reminders,
        })
    }

    async fn send_medicine_reminders(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let repo = ReminderRepository::new(self.db);
        let users = UserRepository::new(self.db);
        let window = Duration::minutes(DOSE_WINDOW_MINUTES);

        let mut sent = 0;
        for reminder in repo.get_active().await? {
            let Some(dose_at) = reminder.due_dose(now, window) else {
                continue;
            };

            let patient = match users.find_by_id(reminder.patient_id).await {
                Ok(Some(patient)) => patient,
                Ok(None) => {
                    tracing::warn!("Reminder {} belongs to missing patient", reminder.id);
                    continue;
                }
                Err(e) => {
                    tracing::error!("Failed to load patient of reminder {}: {}", reminder.id, e);
                    continue;
                }
            };

            self.notifier
                .medicine_reminder(&patient, &reminder, dose_at)
                .await;

            if let Err(e) = repo.mark_sent(reminder.id, now).await {
                tracing::error!("Failed to record reminder {} as sent: {}", reminder.id, e);
                continue;
            }
            sent += 1;
        }

        Ok(sent)
    }

    async fn send_appointment_reminders(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let repo = AppointmentRepository::new(self.db);
        let due = repo
            .get_due_for_reminder(now, now + Duration::hours(APPOINTMENT_REMINDER_HOURS))
            .await?;

        let mut sent = 0;
        for appointment in due {
            let mut users = match UserRepository::new(self.db)
                .find_by_ids(&[appointment.patient_id, appointment.doctor_id])
                .await
            {
                Ok(users) => users,
                Err(e) => {
                    tracing::error!(
                        "Failed to load participants of appointment {}: {}",
                        appointment.id,
                        e
                    );
                    continue;
                }
            };
            let (Some(patient), Some(doctor)) = (
                users.remove(&appointment.patient_id),
                users.remove(&appointment.doctor_id),
            ) else {
                tracing::warn!("Appointment {} has a missing participant", appointment.id);
                continue;
            };

            self.notifier
                .appointment_reminder(&patient, &doctor, &appointment)
                .await;

            if let Err(e) = repo.mark_reminder_sent(appointment.id).await {
                tracing::error!(
                    "Failed to record appointment {} reminder as sent: {}",
                    appointment.id,
                    e
                );
                continue;
            }
            sent += 1;
        }

        Ok(sent)
    }

    async fn find_own(&self, actor: &User, id: i32) -> Result<MedicineReminder, AppError> {
        let reminder = ReminderRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

        if reminder.patient_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to modify reminder {} of another patient", id),
            )
            .into());
        }

        Ok(reminder)
    }
}
