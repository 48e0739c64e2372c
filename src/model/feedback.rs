use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateFeedbackDto {
    pub appointment_id: i32,
    /// 1 to 5
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpdateFeedbackVisibilityDto {
    pub hidden: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct FeedbackDto {
    pub id: i32,
    pub appointment_id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct DoctorFeedbackDto {
    pub doctor_id: i32,
    pub average_rating: Option<f64>,
    pub count: u64,
    pub feedback: Vec<FeedbackDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedFeedbackDto {
    pub feedback: Vec<FeedbackDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
