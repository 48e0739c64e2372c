use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct AvailabilityDto {
    /// 0 = Monday through 6 = Sunday.
    pub weekday: i32,
    /// Format: "HH:MM"
    pub start_time: String,
    /// Format: "HH:MM"
    pub end_time: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpsertDoctorProfileDto {
    pub specialization: String,
    pub qualification: String,
    pub experience_years: i32,
    pub fee: i32,
    pub about: Option<String>,
    pub clinic_address: Option<String>,
    pub slot_minutes: Option<i32>,
    #[serde(default)]
    pub availability: Vec<AvailabilityDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct DoctorProfileDto {
    /// User id of the doctor; used as `doctor_id` everywhere else.
    pub doctor_id: i32,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub qualification: String,
    pub experience_years: i32,
    pub fee: i32,
    pub about: Option<String>,
    pub clinic_address: Option<String>,
    pub slot_minutes: i32,
    pub status: String,
    pub availability: Vec<AvailabilityDto>,
    pub average_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedDoctorsDto {
    pub doctors: Vec<DoctorProfileDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct DoctorSlotsDto {
    pub doctor_id: i32,
    pub date: NaiveDate,
    pub slot_minutes: i32,
    /// Free slot start times, format "HH:MM"
    pub slots: Vec<String>,
}
