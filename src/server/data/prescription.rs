//! Prescription data repository.
//!
//! A prescription and its medicine lines are always written together in one
//! transaction; updates that carry medicines replace the full list.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    LoaderTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::prescription::{
        CreatePrescriptionParam, Medicine, Prescription, UpdatePrescriptionParam,
    },
};

pub struct PrescriptionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PrescriptionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a prescription with its medicines.
    ///
    /// # Returns
    /// - `Ok(Prescription)` - The created prescription
    /// - `Err(AppError::DbErr)` - Database error, including a second prescription for
    ///   the same appointment
    pub async fn create(&self, param: CreatePrescriptionParam) -> Result<Prescription, AppError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let prescription = entity::prescription::ActiveModel {
            appointment_id: ActiveValue::Set(param.appointment_id),
            doctor_id: ActiveValue::Set(param.doctor_id),
            patient_id: ActiveValue::Set(param.patient_id),
            diagnosis: ActiveValue::Set(param.diagnosis),
            notes: ActiveValue::Set(param.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let medicines = insert_medicines(&txn, prescription.id, param.medicines).await?;

        txn.commit().await?;

        Ok(Prescription::from_entity(prescription, medicines))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Prescription>, AppError> {
        let Some(prescription) = entity::prelude::Prescription::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let medicines = self.get_medicines(prescription.id).await?;

        Ok(Some(Prescription::from_entity(prescription, medicines)))
    }

    /// Checks whether an appointment already has a prescription.
    pub async fn exists_for_appointment(&self, appointment_id: i32) -> Result<bool, AppError> {
        let existing = entity::prelude::Prescription::find()
            .filter(entity::prescription::Column::AppointmentId.eq(appointment_id))
            .one(self.db)
            .await?;

        Ok(existing.is_some())
    }

    /// Gets a patient's prescriptions, newest first.
    pub async fn get_by_patient(&self, patient_id: i32) -> Result<Vec<Prescription>, AppError> {
        self.get_by_column(entity::prescription::Column::PatientId, patient_id)
            .await
    }

    /// Gets prescriptions written by a doctor, newest first.
    pub async fn get_by_doctor(&self, doctor_id: i32) -> Result<Vec<Prescription>, AppError> {
        self.get_by_column(entity::prescription::Column::DoctorId, doctor_id)
            .await
    }

    async fn get_by_column(
        &self,
        column: entity::prescription::Column,
        user_id: i32,
    ) -> Result<Vec<Prescription>, AppError> {
        let prescriptions = entity::prelude::Prescription::find()
            .filter(column.eq(user_id))
            .order_by_desc(entity::prescription::Column::CreatedAt)
            .order_by_desc(entity::prescription::Column::Id)
            .all(self.db)
            .await?;

        let medicines = prescriptions
            .load_many(entity::prelude::PrescriptionMedicine, self.db)
            .await?;

        Ok(prescriptions
            .into_iter()
            .zip(medicines)
            .map(|(prescription, medicines)| Prescription::from_entity(prescription, medicines))
            .collect())
    }

    /// Applies changes to a prescription.
    ///
    /// # Returns
    /// - `Ok(Some(Prescription))` - The updated prescription
    /// - `Ok(None)` - No prescription with that ID
    pub async fn update(
        &self,
        id: i32,
        param: UpdatePrescriptionParam,
    ) -> Result<Option<Prescription>, AppError> {
        let txn = self.db.begin().await?;

        let Some(entity) = entity::prelude::Prescription::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: entity::prescription::ActiveModel = entity.into();
        if let Some(diagnosis) = param.diagnosis {
            active.diagnosis = ActiveValue::Set(diagnosis);
        }
        if let Some(notes) = param.notes {
            active.notes = ActiveValue::Set(Some(notes));
        }
        active.updated_at = ActiveValue::Set(Utc::now());
        let prescription = active.update(&txn).await?;

        if let Some(medicines) = param.medicines {
            entity::prelude::PrescriptionMedicine::delete_many()
                .filter(entity::prescription_medicine::Column::PrescriptionId.eq(id))
                .exec(&txn)
                .await?;
            insert_medicines(&txn, id, medicines).await?;
        }

        txn.commit().await?;

        let medicines = self.get_medicines(id).await?;

        Ok(Some(Prescription::from_entity(prescription, medicines)))
    }

    /// Deletes a prescription and its medicines.
    ///
    /// # Returns
    /// - `Ok(true)` - Prescription deleted
    /// - `Ok(false)` - No prescription with that ID
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        entity::prelude::PrescriptionMedicine::delete_many()
            .filter(entity::prescription_medicine::Column::PrescriptionId.eq(id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Prescription::delete_by_id(id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    async fn get_medicines(
        &self,
        prescription_id: i32,
    ) -> Result<Vec<entity::prescription_medicine::Model>, AppError> {
        let medicines = entity::prelude::PrescriptionMedicine::find()
            .filter(entity::prescription_medicine::Column::PrescriptionId.eq(prescription_id))
            .order_by_asc(entity::prescription_medicine::Column::Id)
            .all(self.db)
            .await?;

        Ok(medicines)
    }
}

async fn insert_medicines<C: ConnectionTrait>(
    conn: &C,
    prescription_id: i32,
    medicines: Vec<Medicine>,
) -> Result<Vec<entity::prescription_medicine::Model>, AppError> {
    let mut inserted = Vec::with_capacity(medicines.len());

    for medicine in medicines {
        let model = entity::prescription_medicine::ActiveModel {
            prescription_id: ActiveValue::Set(prescription_id),
            name: ActiveValue::Set(medicine.name),
            dosage: ActiveValue::Set(medicine.dosage),
            frequency: ActiveValue::Set(medicine.frequency),
            duration_days: ActiveValue::Set(medicine.duration_days),
            instructions: ActiveValue::Set(medicine.instructions),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        inserted.push(model);
    }

    Ok(inserted)
}
