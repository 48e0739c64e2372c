//! Appointment data repository.
//!
//! Booking and rescheduling check for overlapping appointments and write inside the
//! same transaction, so two concurrent requests for one slot cannot both succeed.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::appointment::{
        Appointment, AppointmentStatus, CreateAppointmentParam, PaymentStatus,
        RescheduleAppointmentParam,
    },
};

pub struct AppointmentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AppointmentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a new pending, unpaid appointment.
    ///
    /// Fails when another pending or confirmed appointment of the same doctor starts
    /// less than `slot_minutes` before or after the requested time.
    ///
    /// # Returns
    /// - `Ok(Appointment)` - The created appointment
    /// - `Err(AppError::Conflict)` - The slot is already taken
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateAppointmentParam) -> Result<Appointment, AppError> {
        let txn = self.db.begin().await?;

        if has_conflict(&txn, param.doctor_id, param.scheduled_at, param.slot_minutes, None).await? {
            return Err(AppError::Conflict(
                "The selected time slot is already booked".to_string(),
            ));
        }

        let now = Utc::now();
        let entity = entity::appointment::ActiveModel {
            patient_id: ActiveValue::Set(param.patient_id),
            doctor_id: ActiveValue::Set(param.doctor_id),
            scheduled_at: ActiveValue::Set(param.scheduled_at),
            mode: ActiveValue::Set(param.mode.to_string()),
            reason: ActiveValue::Set(param.reason),
            status: ActiveValue::Set(AppointmentStatus::Pending.to_string()),
            fee: ActiveValue::Set(param.fee),
            payment_status: ActiveValue::Set(PaymentStatus::Unpaid.to_string()),
            checkout_session_id: ActiveValue::Set(None),
            reminder_sent: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Appointment::from_entity(entity)
    }

    /// Moves an appointment to a new time, resetting it to pending.
    ///
    /// The overlap check ignores the appointment being moved.
    ///
    /// # Returns
    /// - `Ok(Some(Appointment))` - The rescheduled appointment
    /// - `Ok(None)` - No appointment with that ID
    /// - `Err(AppError::Conflict)` - The new slot is already taken
    pub async fn reschedule(
        &self,
        param: RescheduleAppointmentParam,
    ) -> Result<Option<Appointment>, AppError> {
        let txn = self.db.begin().await?;

        let Some(entity) = entity::prelude::Appointment::find_by_id(param.appointment_id)
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        if has_conflict(
            &txn,
            param.doctor_id,
            param.scheduled_at,
            param.slot_minutes,
            Some(param.appointment_id),
        )
        .await?
        {
            return Err(AppError::Conflict(
                "The selected time slot is already booked".to_string(),
            ));
        }

        let mut active: entity::appointment::ActiveModel = entity.into();
        active.scheduled_at = ActiveValue::Set(param.scheduled_at);
        active.status = ActiveValue::Set(AppointmentStatus::Pending.to_string());
        active.reminder_sent = ActiveValue::Set(false);
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(&txn).await?;

        txn.commit().await?;

        Ok(Some(Appointment::from_entity(entity)?))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Appointment>, AppError> {
        let entity = entity::prelude::Appointment::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(Appointment::from_entity).transpose()
    }

    /// Gets a patient's appointments in chronological order.
    pub async fn get_by_patient(
        &self,
        patient_id: i32,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, AppError> {
        self.get_by_participant(entity::appointment::Column::PatientId, patient_id, status)
            .await
    }

    /// Gets a doctor's appointments in chronological order.
    pub async fn get_by_doctor(
        &self,
        doctor_id: i32,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, AppError> {
        self.get_by_participant(entity::appointment::Column::DoctorId, doctor_id, status)
            .await
    }

    async fn get_by_participant(
        &self,
        column: entity::appointment::Column,
        user_id: i32,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, AppError> {
        let mut query = entity::prelude::Appointment::find()
            .filter(column.eq(user_id))
            .order_by_asc(entity::appointment::Column::ScheduledAt);
        if let Some(status) = status {
            query = query.filter(entity::appointment::Column::Status.eq(status.as_str()));
        }

        query
            .all(self.db)
            .await?
            .into_iter()
            .map(Appointment::from_entity)
            .collect()
    }

    /// Gets all appointments with pagination, newest slot first.
    ///
    /// # Returns
    /// - `Ok((appointments, total))` - Appointments for the page and total match count
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
        status: Option<AppointmentStatus>,
    ) -> Result<(Vec<Appointment>, u64), AppError> {
        let mut query = entity::prelude::Appointment::find()
            .order_by_desc(entity::appointment::Column::ScheduledAt);
        if let Some(status) = status {
            query = query.filter(entity::appointment::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let appointments = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Appointment::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((appointments, total))
    }

    /// Gets start times of a doctor's pending or confirmed appointments in `[from, to)`.
    pub async fn get_booked_times(
        &self,
        doctor_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        let booked = entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::DoctorId.eq(doctor_id))
            .filter(entity::appointment::Column::Status.is_in(AppointmentStatus::active_values()))
            .filter(entity::appointment::Column::ScheduledAt.gte(from))
            .filter(entity::appointment::Column::ScheduledAt.lt(to))
            .all(self.db)
            .await?;

        Ok(booked.into_iter().map(|a| a.scheduled_at).collect())
    }

    /// Sets the status of an appointment.
    ///
    /// # Returns
    /// - `Ok(Some(Appointment))` - The updated appointment
    /// - `Ok(None)` - No appointment with that ID
    pub async fn update_status(
        &self,
        id: i32,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, AppError> {
        self.update(id, |active| {
            active.status = ActiveValue::Set(status.to_string());
        })
        .await
    }

    /// Records the hosted checkout session started for an appointment.
    pub async fn set_checkout_session(
        &self,
        id: i32,
        session_id: String,
    ) -> Result<Option<Appointment>, AppError> {
        self.update(id, |active| {
            active.checkout_session_id = ActiveValue::Set(Some(session_id));
        })
        .await
    }

    /// Marks an appointment as paid.
    pub async fn mark_paid(&self, id: i32) -> Result<Option<Appointment>, AppError> {
        self.update(id, |active| {
            active.payment_status = ActiveValue::Set(PaymentStatus::Paid.to_string());
        })
        .await
    }

    /// Flags the 24 hour reminder as sent.
    pub async fn mark_reminder_sent(&self, id: i32) -> Result<(), AppError> {
        self.update(id, |active| {
            active.reminder_sent = ActiveValue::Set(true);
        })
        .await?;

        Ok(())
    }

    async fn update(
        &self,
        id: i32,
        apply: impl FnOnce(&mut entity::appointment::ActiveModel),
    ) -> Result<Option<Appointment>, AppError> {
        let Some(entity) = entity::prelude::Appointment::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::appointment::ActiveModel = entity.into();
        apply(&mut active);
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(self.db).await?;

        Ok(Some(Appointment::from_entity(entity)?))
    }

    /// Gets confirmed appointments starting in `(from, to]` whose reminder has not been
    /// sent yet. Rows that fail to convert are logged and skipped.
    pub async fn get_due_for_reminder(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError> {
        let entities = entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::Status.eq(AppointmentStatus::Confirmed.as_str()))
            .filter(entity::appointment::Column::ReminderSent.eq(false))
            .filter(entity::appointment::Column::ScheduledAt.gt(from))
            .filter(entity::appointment::Column::ScheduledAt.lte(to))
            .order_by_asc(entity::appointment::Column::ScheduledAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(|entity| {
                let id = entity.id;
                Appointment::from_entity(entity)
                    .inspect_err(|e| tracing::error!("Skipping unreadable appointment {}: {}", id, e))
                    .ok()
            })
            .collect())
    }

    /// Checks whether a doctor and a patient share at least one appointment.
    pub async fn has_shared_appointment(
        &self,
        doctor_id: i32,
        patient_id: i32,
    ) -> Result<bool, AppError> {
        let count = entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::DoctorId.eq(doctor_id))
            .filter(entity::appointment::Column::PatientId.eq(patient_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn count_by_status(&self, status: AppointmentStatus) -> Result<u64, AppError> {
        let count = entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::Status.eq(status.as_str()))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Deletes an appointment along with its prescription and feedback.
    ///
    /// # Returns
    /// - `Ok(true)` - Appointment deleted
    /// - `Ok(false)` - No appointment with that ID
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Appointment::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Whether a pending or confirmed appointment of the doctor starts within
/// `slot_minutes` of `scheduled_at`.
async fn has_conflict<C: ConnectionTrait>(
    conn: &C,
    doctor_id: i32,
    scheduled_at: DateTime<Utc>,
    slot_minutes: i32,
    exclude_id: Option<i32>,
) -> Result<bool, AppError> {
    let slot = Duration::minutes(slot_minutes as i64);

    let mut query = entity::prelude::Appointment::find()
        .filter(entity::appointment::Column::DoctorId.eq(doctor_id))
        .filter(entity::appointment::Column::Status.is_in(AppointmentStatus::active_values()))
        .filter(entity::appointment::Column::ScheduledAt.gt(scheduled_at - slot))
        .filter(entity::appointment::Column::ScheduledAt.lt(scheduled_at + slot));
    if let Some(exclude_id) = exclude_id {
        query = query.filter(entity::appointment::Column::Id.ne(exclude_id));
    }

    Ok(query.count(conn).await? > 0)
}
