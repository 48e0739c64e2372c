//! Prescription factory for creating prescriptions with medicines.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a prescription for an appointment with a single medicine.
///
/// # Arguments
/// - `db` - Database connection
/// - `appointment` - Appointment the prescription is written for
///
/// # Returns
/// - `Ok(entity::prescription::Model)` - Created prescription
/// - `Err(DbErr)` - Database error during insert
pub async fn create_prescription(
    db: &DatabaseConnection,
    appointment: &entity::appointment::Model,
) -> Result<entity::prescription::Model, DbErr> {
    let now = Utc::now();
    let prescription = entity::prescription::ActiveModel {
        appointment_id: ActiveValue::Set(appointment.id),
        doctor_id: ActiveValue::Set(appointment.doctor_id),
        patient_id: ActiveValue::Set(appointment.patient_id),
        diagnosis: ActiveValue::Set("Seasonal flu".to_string()),
        notes: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    entity::prescription_medicine::ActiveModel {
        prescription_id: ActiveValue::Set(prescription.id),
        name: ActiveValue::Set("Paracetamol".to_string()),
        dosage: ActiveValue::Set("500mg".to_string()),
        frequency: ActiveValue::Set("Twice a day".to_string()),
        duration_days: ActiveValue::Set(5),
        instructions: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(prescription)
}
