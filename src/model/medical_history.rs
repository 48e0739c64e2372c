use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateMedicalHistoryDto {
    pub condition: String,
    pub diagnosed_on: Option<NaiveDate>,
    pub medications: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
pub struct UpdateMedicalHistoryDto {
    pub condition: Option<String>,
    pub diagnosed_on: Option<NaiveDate>,
    pub medications: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct MedicalHistoryDto {
    pub id: i32,
    pub patient_id: i32,
    pub condition: String,
    pub diagnosed_on: Option<NaiveDate>,
    pub medications: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
