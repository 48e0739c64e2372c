//! Admin dashboard operations: doctor review and platform statistics.

pub mod code;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{appointment::AppointmentRepository, doctor::DoctorRepository, user::UserRepository},
    error::AppError,
    model::{
        admin::AdminStats,
        appointment::AppointmentStatus,
        doctor::{Doctor, DoctorStatus},
        user::Role,
    },
    service::doctor::DoctorService,
};

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists doctor profiles in a review state, oldest first.
    pub async fn get_doctors_by_status(&self, status: DoctorStatus) -> Result<Vec<Doctor>, AppError> {
        let profiles = DoctorRepository::new(self.db).get_by_status(status).await?;

        DoctorService::new(self.db).load_many_details(profiles).await
    }

    /// Approves or rejects a doctor profile.
    ///
    /// # Returns
    /// - `Ok(Doctor)` - Profile with its new status
    /// - `Err(AppError::BadRequest)` - Status is `pending`
    /// - `Err(AppError::NotFound)` - No profile for this user ID
    pub async fn set_doctor_status(
        &self,
        doctor_id: i32,
        status: DoctorStatus,
    ) -> Result<Doctor, AppError> {
        if status == DoctorStatus::Pending {
            return Err(AppError::BadRequest(
                "Status must be approved or rejected".to_string(),
            ));
        }

        let profile = DoctorRepository::new(self.db)
            .set_status(doctor_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

        tracing::info!("Doctor {} profile marked {}", doctor_id, status);

        let mut doctors = DoctorService::new(self.db)
            .load_many_details(vec![profile])
            .await?;

        doctors
            .pop()
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))
    }

    /// Counts users per role, appointments per status and pending doctor reviews.
    pub async fn get_stats(&self) -> Result<AdminStats, AppError> {
        let users = UserRepository::new(self.db);
        let appointments = AppointmentRepository::new(self.db);

        Ok(AdminStats {
            patients: users.count_by_role(Role::Patient).await?,
            doctors: users.count_by_role(Role::Doctor).await?,
            admins: users.count_by_role(Role::Admin).await?,
            pending_doctors: DoctorRepository::new(self.db)
                .count_by_status(DoctorStatus::Pending)
                .await?,
            pending_appointments: appointments.count_by_status(AppointmentStatus::Pending).await?,
            confirmed_appointments: appointments
                .count_by_status(AppointmentStatus::Confirmed)
                .await?,
            completed_appointments: appointments
                .count_by_status(AppointmentStatus::Completed)
                .await?,
            cancelled_appointments: appointments
                .count_by_status(AppointmentStatus::Cancelled)
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests approving a pending doctor.
    ///
    /// Expected: profile approved and no longer listed as pending
    #[tokio::test]
    async fn approves_pending_doctor() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (doctor, _) = factory::doctor::create_pending_doctor(db).await?;
        let service = AdminService::new(db);

        assert_eq!(service.get_doctors_by_status(DoctorStatus::Pending).await?.len(), 1);

        let approved = service
            .set_doctor_status(doctor.id, DoctorStatus::Approved)
            .await?;
        assert_eq!(approved.profile.status, DoctorStatus::Approved);
        assert!(service
            .get_doctors_by_status(DoctorStatus::Pending)
            .await?
            .is_empty());

        Ok(())
    }

    /// Tests status changes that are not allowed.
    ///
    /// Expected: Err(BadRequest) for pending, Err(NotFound) for an unknown doctor
    #[tokio::test]
    async fn rejects_invalid_status_changes() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (doctor, _) = factory::doctor::create_pending_doctor(db).await?;
        let service = AdminService::new(db);

        let result = service
            .set_doctor_status(doctor.id, DoctorStatus::Pending)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = service.set_doctor_status(9999, DoctorStatus::Approved).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }

    /// Tests dashboard counters.
    ///
    /// Expected: users counted per role, appointments per status
    #[tokio::test]
    async fn counts_stats() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        factory::create_admin(db).await?;
        let (patient, doctor, _) =
            factory::helpers::create_appointment_with_dependencies(db).await?;
        factory::appointment::create_completed_appointment(db, patient.id, doctor.id).await?;
        factory::doctor::create_pending_doctor(db).await?;

        let stats = AdminService::new(db).get_stats().await?;

        assert_eq!(stats.patients, 1);
        assert_eq!(stats.doctors, 2);
        assert_eq!(stats.admins, 1);
        assert_eq!(stats.pending_doctors, 1);
        assert_eq!(stats.pending_appointments, 1);
        assert_eq!(stats.completed_appointments, 1);
        assert_eq!(stats.cancelled_appointments, 0);

        Ok(())
    }
}
