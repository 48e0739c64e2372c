//! Patient-maintained medical history.
//!
//! Patients manage their own records. Doctors may read a patient's history only when
//! the two share at least one appointment; admins may read any history.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{appointment::AppointmentRepository, medical_history::MedicalHistoryRepository},
    error::{auth::AuthError, AppError},
    model::{
        medical_history::{CreateMedicalHistoryParam, MedicalHistory, UpdateMedicalHistoryParam},
        user::{Role, User},
    },
};

pub struct MedicalHistoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MedicalHistoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a record to the patient's history.
    ///
    /// # Returns
    /// - `Ok(MedicalHistory)` - Stored record
    /// - `Err(AppError::BadRequest)` - Empty condition or diagnosis date in the future
    pub async fn create(
        &self,
        mut param: CreateMedicalHistoryParam,
        today: NaiveDate,
    ) -> Result<MedicalHistory, AppError> {
        param.condition = validate_condition(&param.condition)?;
        validate_diagnosed_on(param.diagnosed_on, today)?;

        let record = MedicalHistoryRepository::new(self.db).create(param).await?;

        tracing::info!("Patient {} added medical history {}", record.patient_id, record.id);

        Ok(record)
    }

    pub async fn get_own(&self, patient_id: i32) -> Result<Vec<MedicalHistory>, AppError> {
        MedicalHistoryRepository::new(self.db)
            .get_by_patient(patient_id)
            .await
    }

    /// Gets another patient's history as a doctor or admin.
    ///
    /// # Returns
    /// - `Ok(Vec<MedicalHistory>)` - Records, newest first
    /// - `Err(AppError::AuthErr(AccessDenied))` - Doctor has no appointment with the patient
    pub async fn get_for_patient(
        &self,
        actor: &User,
        patient_id: i32,
    ) -> Result<Vec<MedicalHistory>, AppError> {
        if actor.role == Role::Doctor
            && !AppointmentRepository::new(self.db)
                .has_shared_appointment(actor.id, patient_id)
                .await?
        {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to read history of unrelated patient {}", patient_id),
            )
            .into());
        }

        MedicalHistoryRepository::new(self.db)
            .get_by_patient(patient_id)
            .await
    }

    /// Updates one of the patient's own records.
    pub async fn update(
        &self,
        actor: &User,
        id: i32,
        mut param: UpdateMedicalHistoryParam,
        today: NaiveDate,
    ) -> Result<MedicalHistory, AppError> {
        self.find_own(actor, id).await?;

        if let Some(condition) = &param.condition {
            param.condition = Some(validate_condition(condition)?);
        }
        validate_diagnosed_on(param.diagnosed_on, today)?;

        MedicalHistoryRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Medical history not found".to_string()))
    }

    /// Deletes one of the patient's own records.
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        self.find_own(actor, id).await?;

        MedicalHistoryRepository::new(self.db).delete(id).await?;

        tracing::info!("Patient {} deleted medical history {}", actor.id, id);

        Ok(())
    }

    async fn find_own(&self, actor: &User, id: i32) -> Result<MedicalHistory, AppError> {
        let record = MedicalHistoryRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Medical history not found".to_string()))?;

        if record.patient_id != actor.id {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("attempted to modify medical history {} of another patient", id),
            )
            .into());
        }

        Ok(record)
    }
}

fn validate_condition(condition: &str) -> Result<String, AppError> {
    let condition = condition.trim();
    if condition.is_empty() {
        return Err(AppError::BadRequest("Condition is required".to_string()));
    }
    Ok(condition.to_string())
}

fn validate_diagnosed_on(diagnosed_on: Option<NaiveDate>, today: NaiveDate) -> Result<(), AppError> {
    match diagnosed_on {
        Some(date) if date > today => Err(AppError::BadRequest(
            "Diagnosis date cannot be in the future".to_string(),
        )),
        _ => Ok(()),
    }
}
