//! Appointment domain models and parameters.
//!
//! Appointments move through a small state machine: `pending` may become `confirmed`
//! or `cancelled`, `confirmed` may become `completed` or `cancelled`, and `completed`
//! and `cancelled` are terminal. Payment state is tracked independently.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{
    model::appointment::{
        AppointmentDto, CheckoutSessionDto, CreateAppointmentDto, PaginatedAppointmentsDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        util::{parse::parse_request_value, time::parse_request_datetime},
    },
};

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Whether an appointment in this state still holds its time slot.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Pending | AppointmentStatus::Confirmed
        )
    }

    /// Whether moving from `self` to `next` is an allowed transition.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Pending, AppointmentStatus::Confirmed)
                | (AppointmentStatus::Pending, AppointmentStatus::Cancelled)
                | (AppointmentStatus::Confirmed, AppointmentStatus::Completed)
                | (AppointmentStatus::Confirmed, AppointmentStatus::Cancelled)
        )
    }

    /// States that still hold a slot, used for conflict queries.
    pub fn active_values() -> [&'static str; 2] {
        [
            AppointmentStatus::Pending.as_str(),
            AppointmentStatus::Confirmed.as_str(),
        ]
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(InternalError::UnknownStoredValue {
                kind: "appointment status",
                value: other.to_string(),
            }),
        }
    }
}

/// Whether the consultation happens by video call or at the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentMode {
    Online,
    Offline,
}

impl AppointmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentMode::Online => "online",
            AppointmentMode::Offline => "offline",
        }
    }
}

impl fmt::Display for AppointmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentMode {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "online" => Ok(AppointmentMode::Online),
            "offline" => Ok(AppointmentMode::Offline),
            other => Err(InternalError::UnknownStoredValue {
                kind: "appointment mode",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(InternalError::UnknownStoredValue {
                kind: "payment status",
                value: other.to_string(),
            }),
        }
    }
}

/// Booked consultation between a patient and a doctor.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    /// Slot start in UTC.
    pub scheduled_at: DateTime<Utc>,
    pub mode: AppointmentMode,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
    /// Fee copied from the doctor's profile at booking time.
    pub fee: i32,
    pub payment_status: PaymentStatus,
    /// Hosted checkout session awaiting confirmation, if one was started.
    pub checkout_session_id: Option<String>,
    /// Whether the 24 hour reminder email has gone out.
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Appointment)` - The converted appointment
    /// - `Err(AppError::InternalErr(UnknownStoredValue))` - A stored enum column is not recognized
    pub fn from_entity(entity: entity::appointment::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            patient_id: entity.patient_id,
            doctor_id: entity.doctor_id,
            scheduled_at: entity.scheduled_at,
            mode: entity.mode.parse()?,
            reason: entity.reason,
            status: entity.status.parse()?,
            fee: entity.fee,
            payment_status: entity.payment_status.parse()?,
            checkout_session_id: entity.checkout_session_id,
            reminder_sent: entity.reminder_sent,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Whether the user takes part in this appointment as patient or doctor.
    pub fn involves(&self, user_id: i32) -> bool {
        self.patient_id == user_id || self.doctor_id == user_id
    }
}

/// Appointment with participant display names resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub patient_name: String,
    pub doctor_name: String,
}

impl AppointmentDetails {
    pub fn into_dto(self) -> AppointmentDto {
        let appointment = self.appointment;

        AppointmentDto {
            id: appointment.id,
            patient_id: appointment.patient_id,
            patient_name: self.patient_name,
            doctor_id: appointment.doctor_id,
            doctor_name: self.doctor_name,
            scheduled_at: appointment.scheduled_at,
            mode: appointment.mode.to_string(),
            reason: appointment.reason,
            status: appointment.status.to_string(),
            fee: appointment.fee,
            payment_status: appointment.payment_status.to_string(),
            created_at: appointment.created_at,
        }
    }
}

/// Checkout session issued for paying an appointment's fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub session_id: String,
    pub amount: i32,
    pub checkout_url: String,
}

impl CheckoutSession {
    pub fn into_dto(self) -> CheckoutSessionDto {
        CheckoutSessionDto {
            session_id: self.session_id,
            amount: self.amount,
            checkout_url: self.checkout_url,
        }
    }
}

/// Booking request from a patient, before the doctor's fee and slot length are known.
#[derive(Debug, Clone)]
pub struct BookAppointmentParam {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub mode: AppointmentMode,
    pub reason: Option<String>,
}

impl BookAppointmentParam {
    /// Builds booking parameters from the request body.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Malformed date, time or mode
    pub fn from_dto(patient_id: i32, dto: CreateAppointmentDto) -> Result<Self, AppError> {
        Ok(Self {
            patient_id,
            doctor_id: dto.doctor_id,
            scheduled_at: parse_request_datetime(&dto.date, &dto.time)?,
            mode: parse_request_value(&dto.mode, "mode")?,
            reason: dto.reason,
        })
    }
}

/// Parameters for inserting a new pending appointment.
#[derive(Debug, Clone)]
pub struct CreateAppointmentParam {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub mode: AppointmentMode,
    pub reason: Option<String>,
    pub fee: i32,
    /// Slot length used for the overlap check.
    pub slot_minutes: i32,
}

/// Parameters for moving an appointment to a new slot.
#[derive(Debug, Clone)]
pub struct RescheduleAppointmentParam {
    pub appointment_id: i32,
    pub doctor_id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub slot_minutes: i32,
}

/// Parameters for the admin appointment listing.
#[derive(Debug, Clone)]
pub struct GetAllAppointmentsParam {
    pub page: u64,
    pub per_page: u64,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedAppointments {
    pub appointments: Vec<AppointmentDetails>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedAppointments {
    pub fn into_dto(self) -> PaginatedAppointmentsDto {
        PaginatedAppointmentsDto {
            appointments: self
                .appointments
                .into_iter()
                .map(AppointmentDetails::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
