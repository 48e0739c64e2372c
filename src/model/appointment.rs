use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateAppointmentDto {
    pub doctor_id: i32,
    pub date: String, // Format: "YYYY-MM-DD" in UTC
    pub time: String, // Format: "HH:MM" in UTC
    /// `online` or `offline`
    pub mode: String,
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct RescheduleAppointmentDto {
    pub date: String, // Format: "YYYY-MM-DD" in UTC
    pub time: String, // Format: "HH:MM" in UTC
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpdateAppointmentStatusDto {
    /// `confirmed`, `completed` or `cancelled`
    pub status: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct AppointmentDto {
    pub id: i32,
    pub patient_id: i32,
    pub patient_name: String,
    pub doctor_id: i32,
    pub doctor_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub mode: String,
    pub reason: Option<String>,
    pub status: String,
    pub fee: i32,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedAppointmentsDto {
    pub appointments: Vec<AppointmentDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CheckoutSessionDto {
    pub session_id: String,
    pub amount: i32,
    pub checkout_url: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ConfirmPaymentDto {
    pub session_id: String,
}
