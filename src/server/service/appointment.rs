//! Appointment booking and lifecycle.
//!
//! Booking and rescheduling validate the requested time against the doctor's weekly
//! availability before the repository runs the slot conflict check inside a transaction.
//! Status changes follow the appointment state machine and are limited by role: the
//! appointment's doctor may confirm, complete or cancel, its patient may only cancel.
//! Every booking and status change emails the participants.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        appointment::AppointmentRepository, doctor::DoctorRepository, user::UserRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        appointment::{
            Appointment, AppointmentDetails, AppointmentStatus, BookAppointmentParam,
            CreateAppointmentParam, GetAllAppointmentsParam, PaginatedAppointments,
            RescheduleAppointmentParam,
        },
        doctor::fits_availability,
        total_pages,
        user::{Role, User},
    },
    service::{doctor::DoctorService, notification::Notifier},
};

pub struct AppointmentService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a Notifier,
}

impl<'a> AppointmentService<'a> {
    pub fn new(db: &'a DatabaseConnection, notifier: &'a Notifier) -> Self {
        Self { db, notifier }
    }

    /// Books a pending appointment with an approved doctor.
    ///
    /// # Returns
    /// - `Ok(AppointmentDetails)` - Created appointment
    /// - `Err(AppError::NotFound)` - Doctor unknown or not approved
    /// - `Err(AppError::BadRequest)` - Time in the past or outside the doctor's availability
    /// - `Err(AppError::Conflict)` - Slot already taken
    pub async fn book(
        &self,
        param: BookAppointmentParam,
        now: DateTime<Utc>,
    ) -> Result<AppointmentDetails, AppError> {
        let profile = DoctorService::new(self.db)
            .get_approved_profile(param.doctor_id)
            .await?;

        self.validate_slot(param.doctor_id, param.scheduled_at, profile.slot_minutes, now)
            .await?;

        let appointment = AppointmentRepository::new(self.db)
            .create(CreateAppointmentParam {
                patient_id: param.patient_id,
                doctor_id: param.doctor_id,
                scheduled_at: param.scheduled_at,
                mode: param.mode,
                reason: param
                    .reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty()),
                fee: profile.fee,
                slot_minutes: profile.slot_minutes,
            })
            .await?;

        tracing::info!(
            "Patient {} booked appointment {} with doctor {} at {}",
            appointment.patient_id,
            appointment.id,
            appointment.doctor_id,
            appointment.scheduled_at
        );

        let (patient, doctor) = self.load_participants(&appointment).await?;
        self.notifier
            .appointment_booked(&patient, &doctor, &appointment)
            .await;

        Ok(AppointmentDetails {
            appointment,
            patient_name: patient.name,
            doctor_name: doctor.name,
        })
    }

    /// Gets a patient's appointments ordered by start time.
    pub async fn get_for_patient(
        &self,
        patient_id: i32,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentDetails>, AppError> {
        let appointments = AppointmentRepository::new(self.db)
            .get_by_patient(patient_id, status)
            .await?;

        self.with_names(appointments).await
    }

    /// Gets a doctor's appointments ordered by start time.
    pub async fn get_for_doctor(
        &self,
        doctor_id: i32,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<AppointmentDetails>, AppError> {
        let appointments = AppointmentRepository::new(self.db)
            .get_by_doctor(doctor_id, status)
            .await?;

        self.with_names(appointments).await
    }

    /// Gets all appointments, newest first, for the admin dashboard.
    pub async fn get_all(
        &self,
        param: GetAllAppointmentsParam,
    ) -> Result<PaginatedAppointments, AppError> {
        let (appointments, total) = AppointmentRepository::new(self.db)
            .get_all_paginated(param.page, param.per_page, param.status)
            .await?;

        Ok(PaginatedAppointments {
            appointments: self.with_names(appointments).await?,
            total,
            page: param.page,
            per_page: param.per_page,
            total_pages: total_pages(total, param.per_page),
        })
    }

    /// Gets one appointment visible to the actor.
    ///
    /// # Returns
    /// - `Ok(AppointmentDetails)` - Actor is a participant or an admin
    /// - `Err(AppError::NotFound)` - Unknown appointment
    /// - `Err(AppError::AuthErr(AccessDenied))` - Actor is not involved
    pub async fn get(&self, actor: &User, id: i32) -> Result<AppointmentDetails, AppError> {
        let appointment = self.find(id).await?;

        if actor.role != Role::Admin && !appointment.involves(actor.id) {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to view appointment {} they are not part of", id),
            )
            .into());
        }

        self.with_details(appointment).await
    }

    /// Moves an appointment to a new status.
    ///
    /// # Returns
    /// - `Ok(AppointmentDetails)` - Updated appointment
    /// - `Err(AppError::NotFound)` - Unknown appointment
    /// - `Err(AppError::AuthErr(AccessDenied))` - Actor may not make this change
    /// - `Err(AppError::BadRequest)` - Transition not allowed from the current status
    pub async fn update_status(
        &self,
        actor: &User,
        id: i32,
        status: AppointmentStatus,
    ) -> Result<AppointmentDetails, AppError> {
        let appointment = self.find(id).await?;

        let permitted = match actor.role {
            Role::Doctor => appointment.doctor_id == actor.id,
            Role::Patient => {
                appointment.patient_id == actor.id && status == AppointmentStatus::Cancelled
            }
            Role::Admin => false,
        };
        if !permitted {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!(
                    "attempted to set appointment {} to {} without being allowed to",
                    id, status
                ),
            )
            .into());
        }

        if !appointment.status.can_transition_to(status) {
            return Err(AppError::BadRequest(format!(
                "Cannot change appointment from {} to {}",
                appointment.status, status
            )));
        }

        let appointment = AppointmentRepository::new(self.db)
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        tracing::info!("User {} set appointment {} to {}", actor.id, id, status);

        self.notify_updated(appointment).await
    }

    /// Moves the patient's own active appointment to a new time.
    ///
    /// The appointment returns to `pending` and its reminder is re-armed.
    ///
    /// # Returns
    /// - `Ok(AppointmentDetails)` - Rescheduled appointment
    /// - `Err(AppError::BadRequest)` - Appointment not active, or the new time is invalid
    /// - `Err(AppError::Conflict)` - New slot already taken
    pub async fn reschedule(
        &self,
        actor: &User,
        id: i32,
        scheduled_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<AppointmentDetails, AppError> {
        let appointment = self.find(id).await?;

        if appointment.patient_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to reschedule appointment {} of another patient", id),
            )
            .into());
        }
        if !appointment.status.is_active() {
            return Err(AppError::BadRequest(format!(
                "A {} appointment cannot be rescheduled",
                appointment.status
            )));
        }

        let slot_minutes = DoctorRepository::new(self.db)
            .find_by_user_id(appointment.doctor_id)
            .await?
            .map(|p| p.slot_minutes)
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

        self.validate_slot(appointment.doctor_id, scheduled_at, slot_minutes, now)
            .await?;

        let appointment = AppointmentRepository::new(self.db)
            .reschedule(RescheduleAppointmentParam {
                appointment_id: id,
                doctor_id: appointment.doctor_id,
                scheduled_at,
                slot_minutes,
            })
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        tracing::info!("Patient {} rescheduled appointment {} to {}", actor.id, id, scheduled_at);

        self.notify_updated(appointment).await
    }

    /// Deletes an appointment.
    ///
    /// # Returns
    /// - `Ok(())` - Deleted
    /// - `Err(AppError::NotFound)` - Unknown appointment
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !AppointmentRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Appointment not found".to_string()));
        }

        tracing::info!("Deleted appointment {}", id);

        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Appointment, AppError> {
        AppointmentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }

    async fn validate_slot(
        &self,
        doctor_id: i32,
        scheduled_at: DateTime<Utc>,
        slot_minutes: i32,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if scheduled_at <= now {
            return Err(AppError::BadRequest(
                "Appointment time must be in the future".to_string(),
            ));
        }

        let availability = DoctorRepository::new(self.db)
            .get_availability(doctor_id)
            .await?;
        if !fits_availability(&availability, scheduled_at, slot_minutes) {
            return Err(AppError::BadRequest(
                "The doctor is not available at the selected time".to_string(),
            ));
        }

        Ok(())
    }

    async fn notify_updated(&self, appointment: Appointment) -> Result<AppointmentDetails, AppError> {
        let (patient, doctor) = self.load_participants(&appointment).await?;
        self.notifier
            .appointment_updated(&patient, &doctor, &appointment)
            .await;

        Ok(AppointmentDetails {
            appointment,
            patient_name: patient.name,
            doctor_name: doctor.name,
        })
    }

    async fn load_participants(&self, appointment: &Appointment) -> Result<(User, User), AppError> {
        let mut users = UserRepository::new(self.db)
            .find_by_ids(&[appointment.patient_id, appointment.doctor_id])
            .await?;

        let patient = users
            .remove(&appointment.patient_id)
            .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;
        let doctor = users
            .remove(&appointment.doctor_id)
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

        Ok((patient, doctor))
    }

    async fn with_details(&self, appointment: Appointment) -> Result<AppointmentDetails, AppError> {
        let mut details = self.with_names(vec![appointment]).await?;

        details
            .pop()
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }

    async fn with_names(
        &self,
        appointments: Vec<Appointment>,
    ) -> Result<Vec<AppointmentDetails>, AppError> {
        let mut ids: Vec<i32> = appointments
            .iter()
            .flat_map(|a| [a.patient_id, a.doctor_id])
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let names = UserRepository::new(self.db).get_names_by_ids(&ids).await?;

        Ok(appointments
            .into_iter()
            .map(|appointment| AppointmentDetails {
                patient_name: names
                    .get(&appointment.patient_id)
                    .cloned()
                    .unwrap_or_default(),
                doctor_name: names
                    .get(&appointment.doctor_id)
                    .cloned()
                    .unwrap_or_default(),
                appointment,
            })
            .collect())
    }
}
