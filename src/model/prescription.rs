use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct MedicineDto {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration_days: i32,
    pub instructions: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreatePrescriptionDto {
    pub appointment_id: i32,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub medicines: Vec<MedicineDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
pub struct UpdatePrescriptionDto {
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    /// Replaces every medicine on the prescription when present.
    pub medicines: Option<Vec<MedicineDto>>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PrescriptionDto {
    pub id: i32,
    pub appointment_id: i32,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub medicines: Vec<MedicineDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
