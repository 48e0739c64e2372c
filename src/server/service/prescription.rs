//! Prescriptions written by doctors for their confirmed or completed appointments.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{appointment::AppointmentRepository, prescription::PrescriptionRepository},
    error::{auth::AuthError, AppError},
    model::{
        appointment::AppointmentStatus,
        prescription::{
            CreatePrescriptionParam, Medicine, Prescription, UpdatePrescriptionParam,
            WritePrescriptionParam,
        },
        user::{Role, User},
    },
};

pub struct PrescriptionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PrescriptionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes a prescription for one of the doctor's appointments.
    ///
    /// # Returns
    /// - `Ok(Prescription)` - Stored prescription with medicines
    /// - `Err(AppError::NotFound)` - Unknown appointment
    /// - `Err(AppError::AuthErr(AccessDenied))` - Appointment belongs to another doctor
    /// - `Err(AppError::BadRequest)` - Appointment not confirmed or completed, invalid
    ///   fields, or a prescription already exists
    pub async fn create(&self, param: WritePrescriptionParam) -> Result<Prescription, AppError> {
        let appointment = AppointmentRepository::new(self.db)
            .find_by_id(param.appointment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        if appointment.doctor_id != param.doctor_id {
            return Err(AuthError::AccessDenied(
                param.doctor_id,
                format!(
                    "attempted to prescribe for appointment {} of another doctor",
                    appointment.id
                ),
            )
            .into());
        }
        if !matches!(
            appointment.status,
            AppointmentStatus::Confirmed | AppointmentStatus::Completed
        ) {
            return Err(AppError::BadRequest(
                "Prescriptions can only be written for confirmed or completed appointments"
                    .to_string(),
            ));
        }

        let diagnosis = required_text(&param.diagnosis, "Diagnosis")?;
        let medicines = validate_medicines(param.medicines)?;

        let repo = PrescriptionRepository::new(self.db);
        if repo.exists_for_appointment(appointment.id).await? {
            return Err(AppError::BadRequest(
                "A prescription already exists for this appointment".to_string(),
            ));
        }

        let prescription = repo
            .create(CreatePrescriptionParam {
                appointment_id: appointment.id,
                doctor_id: appointment.doctor_id,
                patient_id: appointment.patient_id,
                diagnosis,
                notes: param.notes,
                medicines,
            })
            .await?;

        tracing::info!(
            "Doctor {} wrote prescription {} for appointment {}",
            prescription.doctor_id,
            prescription.id,
            prescription.appointment_id
        );

        Ok(prescription)
    }

    pub async fn get_for_patient(&self, patient_id: i32) -> Result<Vec<Prescription>, AppError> {
        PrescriptionRepository::new(self.db)
            .get_by_patient(patient_id)
            .await
    }

    pub async fn get_for_doctor(&self, doctor_id: i32) -> Result<Vec<Prescription>, AppError> {
        PrescriptionRepository::new(self.db)
            .get_by_doctor(doctor_id)
            .await
    }

    /// Gets a prescription visible to its author, its patient or an admin.
    pub async fn get(&self, actor: &User, id: i32) -> Result<Prescription, AppError> {
        let prescription = self.find(id).await?;

        let visible = actor.role == Role::Admin
            || prescription.doctor_id == actor.id
            || prescription.patient_id == actor.id;
        if !visible {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to view prescription {}", id),
            )
            .into());
        }

        Ok(prescription)
    }

    /// Updates a prescription; only the authoring doctor may edit it.
    pub async fn update(
        &self,
        actor: &User,
        id: i32,
        mut param: UpdatePrescriptionParam,
    ) -> Result<Prescription, AppError> {
        let prescription = self.find(id).await?;

        if prescription.doctor_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to edit prescription {} of another doctor", id),
            )
            .into());
        }

        if let Some(diagnosis) = &param.diagnosis {
            param.diagnosis = Some(required_text(diagnosis, "Diagnosis")?);
        }
        if let Some(medicines) = param.medicines.take() {
            param.medicines = Some(validate_medicines(medicines)?);
        }

        let prescription = PrescriptionRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Prescription not found".to_string()))?;

        tracing::info!("Doctor {} updated prescription {}", actor.id, id);

        Ok(prescription)
    }

    /// Deletes a prescription as its author or as an admin.
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        let prescription = self.find(id).await?;

        if actor.role != Role::Admin && prescription.doctor_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to delete prescription {} of another doctor", id),
            )
            .into());
        }

        PrescriptionRepository::new(self.db).delete(id).await?;

        tracing::info!("User {} deleted prescription {}", actor.id, id);

        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Prescription, AppError> {
        PrescriptionRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Prescription not found".to_string()))
    }
}

fn required_text(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn validate_medicines(medicines: Vec<Medicine>) -> Result<Vec<Medicine>, AppError> {
    if medicines.is_empty() {
        return Err(AppError::BadRequest(
            "At least one medicine is required".to_string(),
        ));
    }

    medicines
        .into_iter()
        .map(|medicine| {
            if medicine.duration_days <= 0 {
                return Err(AppError::BadRequest(format!(
                    "Duration of {} must be at least one day",
                    medicine.name
                )));
            }
            Ok(Medicine {
                name: required_text(&medicine.name, "Medicine name")?,
                dosage: required_text(&medicine.dosage, "Dosage")?,
                frequency: required_text(&medicine.frequency, "Frequency")?,
                duration_days: medicine.duration_days,
                instructions: medicine.instructions,
            })
        })
        .collect()
}
