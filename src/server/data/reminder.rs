//! Medicine reminder data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::reminder::{join_times, CreateReminderParam, MedicineReminder},
};

pub struct ReminderRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active reminder.
    pub async fn create(&self, param: CreateReminderParam) -> Result<MedicineReminder, AppError> {
        let entity = entity::medicine_reminder::ActiveModel {
            patient_id: ActiveValue::Set(param.patient_id),
            medicine_name: ActiveValue::Set(param.medicine_name),
            dosage: ActiveValue::Set(param.dosage),
            times: ActiveValue::Set(join_times(&param.times)),
            start_date: ActiveValue::Set(param.start_date),
            end_date: ActiveValue::Set(param.end_date),
            active: ActiveValue::Set(true),
            last_sent_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        MedicineReminder::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<MedicineReminder>, AppError> {
        let entity = entity::prelude::MedicineReminder::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(MedicineReminder::from_entity).transpose()
    }

    /// Gets a patient's reminders, newest first.
    pub async fn get_by_patient(&self, patient_id: i32) -> Result<Vec<MedicineReminder>, AppError> {
        entity::prelude::MedicineReminder::find()
            .filter(entity::medicine_reminder::Column::PatientId.eq(patient_id))
            .order_by_desc(entity::medicine_reminder::Column::CreatedAt)
            .order_by_desc(entity::medicine_reminder::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(MedicineReminder::from_entity)
            .collect()
    }

    /// Gets every active reminder for the scheduler to evaluate.
    ///
    /// Rows that fail to convert are logged and skipped.
    pub async fn get_active(&self) -> Result<Vec<MedicineReminder>, AppError> {
        let entities = entity::prelude::MedicineReminder::find()
            .filter(entity::medicine_reminder::Column::Active.eq(true))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(|entity| {
                let id = entity.id;
                MedicineReminder::from_entity(entity)
                    .inspect_err(|e| tracing::error!("Skipping unreadable reminder {}: {}", id, e))
                    .ok()
            })
            .collect())
    }

    /// Pauses or resumes a reminder.
    ///
    /// # Returns
    /// - `Ok(Some(MedicineReminder))` - The updated reminder
    /// - `Ok(None)` - No reminder with that ID
    pub async fn set_active(
        &self,
        id: i32,
        active: bool,
    ) -> Result<Option<MedicineReminder>, AppError> {
        let Some(entity) = entity::prelude::MedicineReminder::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: entity::medicine_reminder::ActiveModel = entity.into();
        model.active = ActiveValue::Set(active);
        let entity = model.update(self.db).await?;

        Ok(Some(MedicineReminder::from_entity(entity)?))
    }

    /// Records when a reminder email was last sent.
    pub async fn mark_sent(&self, id: i32, sent_at: DateTime<Utc>) -> Result<(), AppError> {
        entity::prelude::MedicineReminder::update(entity::medicine_reminder::ActiveModel {
            id: ActiveValue::Unchanged(id),
            last_sent_at: ActiveValue::Set(Some(sent_at)),
            ..Default::default()
        })
        .exec(self.db)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::MedicineReminder::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
