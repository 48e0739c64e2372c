//! Feedback factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a visible feedback entry for an appointment.
///
/// # Arguments
/// - `db` - Database connection
/// - `appointment` - Appointment the feedback is for
/// - `rating` - Rating from 1 to 5
pub async fn create_feedback(
    db: &DatabaseConnection,
    appointment: &entity::appointment::Model,
    rating: i32,
) -> Result<entity::feedback::Model, DbErr> {
    entity::feedback::ActiveModel {
        appointment_id: ActiveValue::Set(appointment.id),
        patient_id: ActiveValue::Set(appointment.patient_id),
        doctor_id: ActiveValue::Set(appointment.doctor_id),
        rating: ActiveValue::Set(rating),
        comment: ActiveValue::Set(Some("Great consultation".to_string())),
        hidden: ActiveValue::Set(false),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
