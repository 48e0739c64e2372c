//! Medical history data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::medical_history::{
        CreateMedicalHistoryParam, MedicalHistory, UpdateMedicalHistoryParam,
    },
};

pub struct MedicalHistoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MedicalHistoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateMedicalHistoryParam) -> Result<MedicalHistory, AppError> {
        let entity = entity::medical_history::ActiveModel {
            patient_id: ActiveValue::Set(param.patient_id),
            condition: ActiveValue::Set(param.condition),
            diagnosed_on: ActiveValue::Set(param.diagnosed_on),
            medications: ActiveValue::Set(param.medications),
            notes: ActiveValue::Set(param.notes),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(MedicalHistory::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<MedicalHistory>, AppError> {
        let entity = entity::prelude::MedicalHistory::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(MedicalHistory::from_entity))
    }

    /// Gets a patient's records, newest first.
    pub async fn get_by_patient(&self, patient_id: i32) -> Result<Vec<MedicalHistory>, AppError> {
        let entities = entity::prelude::MedicalHistory::find()
            .filter(entity::medical_history::Column::PatientId.eq(patient_id))
            .order_by_desc(entity::medical_history::Column::CreatedAt)
            .order_by_desc(entity::medical_history::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(MedicalHistory::from_entity).collect())
    }

    /// Applies changes to a record.
    ///
    /// # Returns
    /// - `Ok(Some(MedicalHistory))` - The updated record
    /// - `Ok(None)` - No record with that ID
    pub async fn update(
        &self,
        id: i32,
        param: UpdateMedicalHistoryParam,
    ) -> Result<Option<MedicalHistory>, AppError> {
        let Some(entity) = entity::prelude::MedicalHistory::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::medical_history::ActiveModel = entity.into();
        if let Some(condition) = param.condition {
            active.condition = ActiveValue::Set(condition);
        }
        if let Some(diagnosed_on) = param.diagnosed_on {
            active.diagnosed_on = ActiveValue::Set(Some(diagnosed_on));
        }
        if let Some(medications) = param.medications {
            active.medications = ActiveValue::Set(Some(medications));
        }
        if let Some(notes) = param.notes {
            active.notes = ActiveValue::Set(Some(notes));
        }
        let entity = active.update(self.db).await?;

        Ok(Some(MedicalHistory::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::MedicalHistory::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
