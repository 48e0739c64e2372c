use chrono::{DateTime, Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::appointment::AppointmentRepository,
    error::AppError,
    model::appointment::{
        AppointmentMode, AppointmentStatus, CreateAppointmentParam, PaymentStatus,
        RescheduleAppointmentParam,
    },
};

mod create;
mod get_by_participant;
mod get_due_for_reminder;
mod reschedule;
mod update;

fn create_param(patient_id: i32, doctor_id: i32, scheduled_at: DateTime<Utc>) -> CreateAppointmentParam {
    CreateAppointmentParam {
        patient_id,
        doctor_id,
        scheduled_at,
        mode: AppointmentMode::Online,
        reason: Some("Checkup".to_string()),
        fee: 500,
        slot_minutes: 30,
    }
}

/// A whole-minute timestamp `days` days from now.
fn in_days(days: i64) -> DateTime<Utc> {
    let at = Utc::now() + Duration::days(days);
    DateTime::from_timestamp(at.timestamp() - at.timestamp() % 60, 0).unwrap()
}
