use crate::model::admin::AdminStatsDto;

/// Platform-wide counters shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminStats {
    pub patients: u64,
    pub doctors: u64,
    pub admins: u64,
    pub pending_doctors: u64,
    pub pending_appointments: u64,
    pub confirmed_appointments: u64,
    pub completed_appointments: u64,
    pub cancelled_appointments: u64,
}

impl AdminStats {
    pub fn into_dto(self) -> AdminStatsDto {
        AdminStatsDto {
            patients: self.patients,
            doctors: self.doctors,
            admins: self.admins,
            pending_doctors: self.pending_doctors,
            pending_appointments: self.pending_appointments,
            confirmed_appointments: self.confirmed_appointments,
            completed_appointments: self.completed_appointments,
            cancelled_appointments: self.cancelled_appointments,
        }
    }
}
