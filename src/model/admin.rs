use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpdateDoctorStatusDto {
    /// `approved` or `rejected`
    pub status: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct AdminStatsDto {
    pub patients: u64,
    pub doctors: u64,
    pub admins: u64,
    pub pending_doctors: u64,
    pub pending_appointments: u64,
    pub confirmed_appointments: u64,
    pub completed_appointments: u64,
    pub cancelled_appointments: u64,
}
