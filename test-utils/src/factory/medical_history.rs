//! Medical history factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a medical history record for a patient.
pub async fn create_medical_history(
    db: &DatabaseConnection,
    patient_id: i32,
    condition: impl Into<String>,
) -> Result<entity::medical_history::Model, DbErr> {
    entity::medical_history::ActiveModel {
        patient_id: ActiveValue::Set(patient_id),
        condition: ActiveValue::Set(condition.into()),
        diagnosed_on: ActiveValue::Set(None),
        medications: ActiveValue::Set(None),
        notes: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
